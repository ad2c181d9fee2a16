//! Cats Dodge Dogs - An endless vertical dodging arcade game
//!
//! Core modules:
//! - `sim`: Run simulation (viewport, movement, spawning, collisions, difficulty)
//! - `renderer`: Draw model handed to the rendering collaborator
//! - `audio`: Sound cues emitted from gameplay events
//! - `platform`: Clocks, frame pacing and input snapshots
//! - `persistence`: JSON save file for the high score
//! - `tuning`: Data-driven game balance
//! - `session`: Menu/play flow driving the tick loop

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScoreStore, HighScores};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    pub const GAME_TITLE: &str = "Cats Dodge Dogs";
    /// Save file name (title with spaces replaced)
    pub const SAVE_FILE_NAME: &str = "Cats_Dodge_Dogs.json";
    /// High score that unlocks the special start screen and music
    pub const SPECIAL_SCORE: u32 = 10;

    /// Window dimensions
    pub const WINDOW_WIDTH: f32 = 800.0;
    pub const WINDOW_HEIGHT: f32 = 1080.0;
    /// World height in windows
    pub const LEVEL_HEIGHT: u32 = 3;

    pub const FPS: u32 = 60;

    /// Health and damage
    pub const DEFAULT_HEALTH: u8 = 2;
    pub const HEAVY_DAMAGE: u8 = 2;
    pub const LIGHT_DAMAGE: u8 = 1;
    /// Immunity window after a hit (ms)
    pub const IMMUNITY_TIME_MS: u64 = 200;

    /// Hitbox shrink factors (scaled about the rect centre)
    pub const CAT_HITBOX_SCALE: (f32, f32) = (1.0, 0.9);
    pub const DOG_HITBOX_SCALE: (f32, f32) = (0.8, 0.6);

    /// Spawning
    pub const MIN_GAP: f32 = 100.0;
    pub const GAP_REDUCTION_FACTOR: f32 = 10.0;
    pub const VIEWPORT_BUFFER: f32 = 600.0;
    pub const MAX_SPAWN_TRIES: u32 = 100;

    /// Movement speeds (pixels per tick)
    pub const CAT_SPEED_X: f32 = 8.0;
    pub const CAT_SPEED_Y: f32 = 16.0;
    pub const DOG_SPEED_X: f32 = 8.0;
    /// Dog speed cap as a multiple of `DOG_SPEED_X`
    pub const DOG_SPEED_CAP_MULTIPLIER: f32 = 4.0;

    /// Knockback applied to a dog that hits the cat
    pub const KNOCKBACK_HORIZONTAL_FACTOR: i32 = 4;
    pub const KNOCKBACK_VERTICAL_FACTOR: i32 = 2;

    /// Animation intervals (ms) and frame counts
    pub const CAT_ANIMATION_SPEED_MS: f32 = 60.0;
    pub const DOG_ANIMATION_SPEED_MS: f32 = 45.0;
    pub const CAT_WALK_FRAMES: usize = 4;
    pub const DOG_WALK_FRAMES: usize = 7;

    /// Reference sprite dimensions (unscaled)
    pub const REF_CAT_WIDTH: f32 = 23.0;
    pub const REF_CAT_HEIGHT: f32 = 21.0;
    pub const REF_DOG_WIDTH: f32 = 23.0;
    pub const REF_DOG_HEIGHT: f32 = 21.0;

    /// Collision sizes of the idle sprites after scaling
    pub const CAT_SIZE: (f32, f32) = (11.0 * 5.0, 24.0 * 5.0);
    pub const DOG_SIZE: (f32, f32) = (25.0 * 5.0, 22.0 * 5.0);
    pub const BOSS_SIZE: (f32, f32) = (84.0 * 1.5, 124.0 * 1.5);

    /// Distance above the world bottom where the cat restarts after a level
    pub const CAT_RESTART_MARGIN: f32 = 150.0;
}
