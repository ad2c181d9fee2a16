//! Vertical camera over the world and border-reach detection

use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Vertical window into the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Top of the visible window in world coordinates
    pub offset_y: f32,
    /// Largest valid offset (world height minus window height)
    pub max_offset: f32,
}

impl Viewport {
    /// Viewport resting at the bottom of the world (run start)
    pub fn new(max_offset: f32) -> Self {
        Self {
            offset_y: max_offset,
            max_offset,
        }
    }

    /// Move the camera back to the run-start position
    pub fn reset(&mut self) {
        self.offset_y = self.max_offset;
    }

    /// Scroll by `direction * delta` and carry the player along.
    ///
    /// `direction` is +1 for up (toward the border) and -1 for down. The
    /// camera is clamped; the player always moves by the full delta, which is
    /// what lets the cat leave the top of the world once the camera is pinned.
    pub fn scroll(&mut self, direction: i32, delta: f32, player: &mut Rect) {
        let step = direction.signum() as f32 * delta;
        self.offset_y = (self.offset_y - step).clamp(0.0, self.max_offset);
        player.pos.y -= step;
    }

    /// True once the player's top edge has passed a full body height above
    /// the top of the viewport
    pub fn border_reached(&self, player: &Rect) -> bool {
        player.top() <= self.offset_y - player.height()
    }

    /// Fraction of the climb completed, 0 at the bottom and 1 at the top
    pub fn progress(&self) -> f32 {
        if self.max_offset <= 0.0 {
            return 1.0;
        }
        ((self.max_offset - self.offset_y) / self.max_offset).clamp(0.0, 1.0)
    }
}
