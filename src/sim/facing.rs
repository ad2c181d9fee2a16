//! Eight-way facing, idle poses and frame animation

use serde::{Deserialize, Serialize};

/// Movement heading derived from nonzero intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Heading {
    /// Heading for a horizontal/vertical intent pair (vertical +1 is north).
    /// Returns `None` when both intents are zero.
    pub fn from_intent(horizontal: i32, vertical: i32) -> Option<Self> {
        match (horizontal.signum(), vertical.signum()) {
            (0, 1) => Some(Heading::N),
            (1, 1) => Some(Heading::NE),
            (1, 0) => Some(Heading::E),
            (1, -1) => Some(Heading::SE),
            (0, -1) => Some(Heading::S),
            (-1, -1) => Some(Heading::SW),
            (-1, 0) => Some(Heading::W),
            (-1, 1) => Some(Heading::NW),
            _ => None,
        }
    }
}

/// Standing pose, picked from the last heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdlePose {
    North,
    East,
    South,
    West,
}

impl From<Heading> for IdlePose {
    fn from(heading: Heading) -> Self {
        match heading {
            Heading::N => IdlePose::North,
            Heading::NE | Heading::E | Heading::SE => IdlePose::East,
            Heading::S | Heading::SW => IdlePose::South,
            Heading::W | Heading::NW => IdlePose::West,
        }
    }
}

/// What an actor is visibly doing this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    Moving(Heading),
    Idle(IdlePose),
}

/// Which sprite sheet an actor draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteSet {
    /// Full eight-way walk cycle plus four idle poses
    Cat { walk_frames: usize },
    /// East walk cycle (west is mirrored); nothing else
    Dog { walk_frames: usize },
}

/// A concrete sprite to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pose {
    pub facing: Facing,
    pub frame: usize,
}

impl Pose {
    /// Used whenever a sheet has no entry for the requested state
    pub const DEFAULT: Pose = Pose {
        facing: Facing::Moving(Heading::E),
        frame: 0,
    };
}

impl SpriteSet {
    /// Resolve a facing/frame pair against this sheet, falling back to
    /// [`Pose::DEFAULT`] for anything the sheet does not contain
    pub fn pose(self, facing: Facing, frame: usize) -> Pose {
        match (self, facing) {
            (SpriteSet::Cat { walk_frames }, Facing::Moving(_)) if frame < walk_frames => {
                Pose { facing, frame }
            }
            (SpriteSet::Cat { .. }, Facing::Idle(_)) => Pose { facing, frame: 0 },
            (SpriteSet::Dog { walk_frames }, Facing::Moving(Heading::E | Heading::W))
                if frame < walk_frames =>
            {
                Pose { facing, frame }
            }
            _ => Pose::DEFAULT,
        }
    }
}

/// Per-actor animation state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Animator {
    pub frame: usize,
    /// Wall-clock time of the last frame advance (ms)
    pub last_advance_ms: u64,
    /// Last nonzero heading, used to pick the idle pose
    pub last_heading: Heading,
    pub facing: Facing,
}

impl Animator {
    pub fn new(heading: Heading) -> Self {
        Self {
            frame: 0,
            last_advance_ms: 0,
            last_heading: heading,
            facing: Facing::Idle(heading.into()),
        }
    }

    /// Advance the frame clock and recompute facing from this tick's intent
    pub fn update(
        &mut self,
        horizontal: i32,
        vertical: i32,
        now_ms: u64,
        interval_ms: f32,
        walk_frames: usize,
    ) -> Facing {
        if now_ms.saturating_sub(self.last_advance_ms) as f32 > interval_ms {
            self.last_advance_ms = now_ms;
            self.frame = (self.frame + 1) % walk_frames.max(1);
        }

        self.facing = match Heading::from_intent(horizontal, vertical) {
            Some(heading) => {
                self.last_heading = heading;
                Facing::Moving(heading)
            }
            None => Facing::Idle(self.last_heading.into()),
        };
        self.facing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_from_intent() {
        assert_eq!(Heading::from_intent(0, 0), None);
        assert_eq!(Heading::from_intent(1, 1), Some(Heading::NE));
        assert_eq!(Heading::from_intent(-4, 0), Some(Heading::W));
        assert_eq!(Heading::from_intent(0, -2), Some(Heading::S));
        assert_eq!(Heading::from_intent(-1, 1), Some(Heading::NW));
    }

    #[test]
    fn test_idle_pose_table() {
        assert_eq!(IdlePose::from(Heading::N), IdlePose::North);
        for h in [Heading::NE, Heading::E, Heading::SE] {
            assert_eq!(IdlePose::from(h), IdlePose::East);
        }
        for h in [Heading::S, Heading::SW] {
            assert_eq!(IdlePose::from(h), IdlePose::South);
        }
        for h in [Heading::W, Heading::NW] {
            assert_eq!(IdlePose::from(h), IdlePose::West);
        }
    }

    #[test]
    fn test_idle_uses_last_heading() {
        let mut anim = Animator::new(Heading::N);
        anim.update(-1, 1, 10, 60.0, 4);
        assert_eq!(anim.facing, Facing::Moving(Heading::NW));
        let facing = anim.update(0, 0, 20, 60.0, 4);
        assert_eq!(facing, Facing::Idle(IdlePose::West));
    }

    #[test]
    fn test_frame_advances_after_interval() {
        let mut anim = Animator::new(Heading::E);
        anim.update(1, 0, 60, 60.0, 4);
        assert_eq!(anim.frame, 0, "exactly the interval does not advance");
        anim.update(1, 0, 61, 60.0, 4);
        assert_eq!(anim.frame, 1);
        anim.update(1, 0, 100, 60.0, 4);
        assert_eq!(anim.frame, 1);
        for t in [200, 300, 400] {
            anim.update(1, 0, t, 60.0, 4);
        }
        assert_eq!(anim.frame, 0, "wraps modulo frame count");
    }

    #[test]
    fn test_dog_sheet_falls_back_to_default_pose() {
        let dog = SpriteSet::Dog { walk_frames: 7 };
        assert_eq!(
            dog.pose(Facing::Moving(Heading::W), 3),
            Pose {
                facing: Facing::Moving(Heading::W),
                frame: 3
            }
        );
        assert_eq!(dog.pose(Facing::Moving(Heading::NE), 3), Pose::DEFAULT);
        assert_eq!(dog.pose(Facing::Idle(IdlePose::East), 3), Pose::DEFAULT);
        assert_eq!(dog.pose(Facing::Moving(Heading::E), 9), Pose::DEFAULT);
    }

    #[test]
    fn test_cat_idle_pose_has_single_frame() {
        let cat = SpriteSet::Cat { walk_frames: 4 };
        let pose = cat.pose(Facing::Idle(IdlePose::South), 2);
        assert_eq!(pose.frame, 0);
        assert_eq!(pose.facing, Facing::Idle(IdlePose::South));
    }
}
