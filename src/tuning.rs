//! Data-driven game balance
//!
//! Every gameplay number lives here so a balance pass can be loaded from JSON
//! without touching the simulation. Missing fields keep their defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub window_width: f32,
    pub window_height: f32,
    /// World height as a multiple of the window height
    pub level_height: u32,

    // === Player ===
    pub player_size: Vec2,
    pub player_speed_x: f32,
    pub player_speed_y: f32,
    pub default_health: u8,
    pub immunity_ms: u64,
    pub player_hitbox_scale: Vec2,
    pub player_walk_frames: usize,
    pub player_animation_ms: f32,
    pub player_restart_margin: f32,
    pub ref_player_height: f32,

    // === Obstacles ===
    pub dog_size: Vec2,
    pub boss_size: Vec2,
    pub dog_hitbox_scale: Vec2,
    pub boss_hitbox_scale: Vec2,
    pub obstacle_base_speed: f32,
    pub obstacle_speed_cap_multiplier: f32,
    pub obstacle_walk_frames: usize,
    pub obstacle_animation_ms: f32,
    pub ref_obstacle_width: f32,
    pub ref_obstacle_height: f32,
    pub knockback_horizontal_factor: i32,
    pub knockback_vertical_factor: i32,

    // === Spawning ===
    pub min_gap: f32,
    pub gap_reduction_factor: f32,
    pub viewport_buffer: f32,
    pub max_spawn_tries: u32,
    /// Per-obstacle weight boost for the walking boss
    pub boss_walking_boost: f64,
    /// Per-obstacle weight boost for the boxing boss
    pub boss_boxing_boost: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            level_height: LEVEL_HEIGHT,

            player_size: Vec2::new(CAT_SIZE.0, CAT_SIZE.1),
            player_speed_x: CAT_SPEED_X,
            player_speed_y: CAT_SPEED_Y,
            default_health: DEFAULT_HEALTH,
            immunity_ms: IMMUNITY_TIME_MS,
            player_hitbox_scale: Vec2::new(CAT_HITBOX_SCALE.0, CAT_HITBOX_SCALE.1),
            player_walk_frames: CAT_WALK_FRAMES,
            player_animation_ms: CAT_ANIMATION_SPEED_MS,
            player_restart_margin: CAT_RESTART_MARGIN,
            ref_player_height: REF_CAT_HEIGHT,

            dog_size: Vec2::new(DOG_SIZE.0, DOG_SIZE.1),
            boss_size: Vec2::new(BOSS_SIZE.0, BOSS_SIZE.1),
            dog_hitbox_scale: Vec2::new(DOG_HITBOX_SCALE.0, DOG_HITBOX_SCALE.1),
            boss_hitbox_scale: Vec2::new(DOG_HITBOX_SCALE.0, DOG_HITBOX_SCALE.1),
            obstacle_base_speed: DOG_SPEED_X,
            obstacle_speed_cap_multiplier: DOG_SPEED_CAP_MULTIPLIER,
            obstacle_walk_frames: DOG_WALK_FRAMES,
            // The dog cadence is applied as `speed / (0.5 * (reaches + 1))`
            obstacle_animation_ms: DOG_ANIMATION_SPEED_MS,
            ref_obstacle_width: REF_DOG_WIDTH,
            ref_obstacle_height: REF_DOG_HEIGHT,
            knockback_horizontal_factor: KNOCKBACK_HORIZONTAL_FACTOR,
            knockback_vertical_factor: KNOCKBACK_VERTICAL_FACTOR,

            min_gap: MIN_GAP,
            gap_reduction_factor: GAP_REDUCTION_FACTOR,
            viewport_buffer: VIEWPORT_BUFFER,
            max_spawn_tries: MAX_SPAWN_TRIES,
            boss_walking_boost: 0.1,
            boss_boxing_boost: 0.05,
        }
    }
}

impl Tuning {
    /// Overlay a (possibly partial) JSON document onto the defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Total world height
    pub fn world_height(&self) -> f32 {
        self.window_height * self.level_height as f32
    }

    /// Largest valid viewport offset (viewport resting on the world bottom)
    pub fn max_scroll(&self) -> f32 {
        (self.world_height() - self.window_height).max(0.0)
    }

    /// Hard cap on obstacle speed
    pub fn obstacle_speed_cap(&self) -> f32 {
        self.obstacle_base_speed * self.obstacle_speed_cap_multiplier
    }

    /// Player centre at the start of a run
    pub fn player_spawn_center(&self) -> Vec2 {
        Vec2::new(
            self.window_width / 2.0,
            self.world_height() - 0.25 * self.window_height - self.ref_player_height,
        )
    }

    /// Player top edge after completing a level
    pub fn player_restart_top(&self) -> f32 {
        self.world_height() - self.player_restart_margin - self.ref_player_height
    }

    /// Centre y of the first obstacle, also the lowest spawn position
    pub fn obstacle_start_y(&self) -> f32 {
        self.world_height() - self.window_height - self.ref_obstacle_height
    }

    /// Vertical band `(low, high)` that spawn candidates are drawn from
    pub fn spawn_band(&self) -> (f32, f32) {
        let a = self.viewport_buffer;
        let b = self.obstacle_start_y();
        if a <= b { (a, b) } else { (b, a) }
    }
}
