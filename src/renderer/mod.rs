//! Draw model handed to the rendering collaborator
//!
//! The simulation never touches pixels. Each tick it exposes a [`DrawModel`]
//! snapshot; a [`Renderer`] turns that into sprites, text and hearts.

use glam::Vec2;
use serde::Serialize;

use crate::highscores::HighScores;
use crate::sim::{GameState, Obstacle, ObstacleKind, Player, Pose, Rect};

/// Where the game flow currently is, for choosing which screen to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Screen {
    Menu,
    Playing,
}

/// The cat as the renderer needs it
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSprite {
    /// World-space top-left corner
    pub pos: Vec2,
    pub pose: Pose,
}

/// One dog as the renderer needs it
#[derive(Debug, Clone, Serialize)]
pub struct ObstacleSprite {
    pub kind: ObstacleKind,
    /// World-space top-left corner
    pub pos: Vec2,
    pub pose: Pose,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct DrawModel {
    pub screen: Screen,
    /// World y at the top of the window
    pub viewport_offset: f32,
    /// Climb progress, 0 at the bottom and 1 at the border
    pub progress: f32,
    pub player: PlayerSprite,
    pub obstacles: Vec<ObstacleSprite>,
    pub score: u32,
    pub high_score: u32,
    pub health: u8,
    /// Cat is inside its immunity window (flash it)
    pub immune: bool,
    /// Special start screen and music unlocked
    pub special_unlocked: bool,
    /// Collision boxes, present only when the debug overlay is on
    pub hitboxes: Option<Vec<Rect>>,
}

impl DrawModel {
    /// Snapshot the run state
    pub fn capture(state: &GameState, screen: Screen, show_hitboxes: bool) -> Self {
        let tuning = &state.tuning;
        let player_set = Player::sprite_set(tuning);
        let dog_set = Obstacle::sprite_set(tuning);

        let obstacles = state
            .obstacles
            .iter()
            .map(|dog| ObstacleSprite {
                kind: dog.kind,
                pos: dog.rect.pos,
                pose: dog_set.pose(dog.animator.facing, dog.animator.frame),
            })
            .collect();

        let hitboxes = show_hitboxes.then(|| {
            std::iter::once(state.player.hitbox(tuning))
                .chain(state.obstacles.iter().map(|dog| dog.hitbox(tuning)))
                .collect()
        });

        Self {
            screen,
            viewport_offset: state.viewport.offset_y,
            progress: state.viewport.progress(),
            player: PlayerSprite {
                pos: state.player.rect.pos,
                pose: player_set.pose(state.player.animator.facing, state.player.animator.frame),
            },
            obstacles,
            score: state.score,
            high_score: state.high_score,
            health: state.player.health,
            immune: state.player_immune(),
            special_unlocked: HighScores::new(state.high_score).special_unlocked(),
            hitboxes,
        }
    }
}

/// Render collaborator
pub trait Renderer {
    fn draw(&mut self, model: &DrawModel);
}

/// Renderer that logs a summary line every `every` frames (headless runs)
#[derive(Debug)]
pub struct LogRenderer {
    every: u64,
    frames: u64,
}

impl LogRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
        }
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, model: &DrawModel) {
        if self.frames % self.every == 0 {
            log::debug!(
                "frame {}: {:?} score {} hp {} progress {:.0}% dogs {}",
                self.frames,
                model.screen,
                model.score,
                model.health,
                model.progress * 100.0,
                model.obstacles.len()
            );
        }
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Facing, Heading};
    use crate::tuning::Tuning;

    #[test]
    fn test_capture_basic_fields() {
        let mut state = GameState::new(Tuning::default(), 1, 12);
        state.score = 3;
        let model = DrawModel::capture(&state, Screen::Playing, false);

        assert_eq!(model.score, 3);
        assert_eq!(model.high_score, 12);
        assert!(model.special_unlocked);
        assert_eq!(model.health, 2);
        assert!(!model.immune);
        assert_eq!(model.obstacles.len(), 1);
        assert_eq!(model.progress, 0.0);
        assert!(model.hitboxes.is_none());
        assert_eq!(model.viewport_offset, state.viewport.max_offset);
    }

    #[test]
    fn test_capture_hitboxes_when_debugging() {
        let state = GameState::new(Tuning::default(), 1, 0);
        let model = DrawModel::capture(&state, Screen::Playing, true);
        assert_eq!(model.hitboxes.map(|h| h.len()), Some(2));
    }

    #[test]
    fn test_drifting_dog_uses_default_pose() {
        let mut state = GameState::new(Tuning::default(), 1, 0);
        state.obstacles[0].animator.facing = Facing::Moving(Heading::NE);
        state.obstacles[0].animator.frame = 5;
        let model = DrawModel::capture(&state, Screen::Playing, false);
        assert_eq!(model.obstacles[0].pose, Pose::DEFAULT);
    }

    #[test]
    fn test_serializes_to_json() {
        let state = GameState::new(Tuning::default(), 1, 0);
        let model = DrawModel::capture(&state, Screen::Menu, false);
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["screen"], "Menu");
        assert_eq!(json["obstacles"][0]["kind"], "White");
    }
}
