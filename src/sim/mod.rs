//! Run simulation module
//!
//! All gameplay logic lives here. No rendering, audio or file access:
//! - Positions are abstract world coordinates (y grows downward)
//! - Time arrives as wall-clock milliseconds in `TickInput`
//! - Randomness comes from the state's own seeded generator

pub mod collision;
pub mod difficulty;
pub mod facing;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod viewport;

pub use collision::{apply_knockback, resolve_collisions};
pub use facing::{Animator, Facing, Heading, IdlePose, Pose, SpriteSet};
pub use rect::Rect;
pub use spawn::{choose_kind, normalize_weights, spawn_obstacle, spawn_y, weighted_choice};
pub use state::{GameEvent, GameState, Obstacle, ObstacleKind, Player};
pub use tick::{TickInput, tick};
pub use viewport::Viewport;
