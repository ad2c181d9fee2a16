//! Platform abstraction layer
//!
//! Handles the pieces the simulation must not touch directly:
//! - Wall-clock time and frame pacing
//! - Held-control snapshots from whatever input device is attached

pub mod input;
pub mod time;

pub use input::{Control, Controls, InputSnapshot, InputSource, ScriptedInput};
pub use time::{Clock, FrameLimiter, ManualClock, QuitFlag, SystemClock};
