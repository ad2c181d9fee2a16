//! Game state and core simulation types
//!
//! Everything the tick loop mutates lives in [`GameState`] and is passed by
//! reference into each step; there is no ambient state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::facing::{Animator, Heading, SpriteSet};
use super::rect::Rect;
use super::spawn;
use super::viewport::Viewport;
use crate::consts::{HEAVY_DAMAGE, LIGHT_DAMAGE};
use crate::tuning::Tuning;

/// Obstacle (dog) breeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    White,
    BlackWhite,
    Black,
    Brown,
    Exotic,
    BossWalking,
    BossBoxing,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 7] = [
        ObstacleKind::White,
        ObstacleKind::BlackWhite,
        ObstacleKind::Black,
        ObstacleKind::Brown,
        ObstacleKind::Exotic,
        ObstacleKind::BossWalking,
        ObstacleKind::BossBoxing,
    ];

    /// Sprite sheet name used by the renderer
    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::White => "dog_white",
            ObstacleKind::BlackWhite => "dog_bw",
            ObstacleKind::Black => "dog_black",
            ObstacleKind::Brown => "dog_brown",
            ObstacleKind::Exotic => "dog_exotic",
            ObstacleKind::BossWalking => "boss_walking",
            ObstacleKind::BossBoxing => "boss_boxing",
        }
    }

    /// Unnormalized spawn weight before progress bias
    pub fn base_weight(&self) -> f64 {
        match self {
            ObstacleKind::White => 3.0,
            ObstacleKind::BlackWhite => 3.0,
            ObstacleKind::Black => 2.0,
            ObstacleKind::Brown => 4.0,
            ObstacleKind::Exotic => 2.0,
            ObstacleKind::BossWalking => 0.25,
            ObstacleKind::BossBoxing => 0.125,
        }
    }

    /// Heavy obstacles deal double damage
    pub fn is_heavy(&self) -> bool {
        matches!(self, ObstacleKind::BossWalking | ObstacleKind::BossBoxing)
    }

    pub fn damage(&self) -> u8 {
        if self.is_heavy() { HEAVY_DAMAGE } else { LIGHT_DAMAGE }
    }

    /// Collision size of the idle sprite
    pub fn size(&self, tuning: &Tuning) -> Vec2 {
        if self.is_heavy() {
            tuning.boss_size
        } else {
            tuning.dog_size
        }
    }

    /// Hitbox shrink factor for this category
    pub fn hitbox_scale(&self, tuning: &Tuning) -> Vec2 {
        if self.is_heavy() {
            tuning.boss_hitbox_scale
        } else {
            tuning.dog_hitbox_scale
        }
    }
}

/// Events emitted by a tick, consumed by audio, UI and persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Cat took one point of damage
    HitLight,
    /// Cat took a heavy (boss) hit
    HitHeavy,
    /// Cat reached the top of the world
    LevelComplete { score: u32, new_high_score: bool },
    /// Run ended; `score` is the score the run finished with
    Death { score: u32, new_high_score: bool },
}

/// The player-controlled cat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub health: u8,
    /// Time of the last damaging hit (ms); `None` until first hit
    pub last_hit_ms: Option<u64>,
    /// Horizontal intent of the last tick (-1, 0, 1)
    pub horizontal_intent: i32,
    /// Vertical intent of the last tick (+1 up, -1 down)
    pub vertical_intent: i32,
    pub animator: Animator,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            rect: Rect::from_center(tuning.player_spawn_center(), tuning.player_size),
            health: tuning.default_health,
            last_hit_ms: None,
            horizontal_intent: 0,
            vertical_intent: 0,
            animator: Animator::new(Heading::N),
        }
    }

    /// Whether a hit at `now_ms` falls inside the immunity window
    pub fn is_immune(&self, now_ms: u64, immunity_ms: u64) -> bool {
        self.last_hit_ms
            .is_some_and(|hit| now_ms.saturating_sub(hit) <= immunity_ms)
    }

    pub fn hitbox(&self, tuning: &Tuning) -> Rect {
        self.rect.scaled(tuning.player_hitbox_scale)
    }

    pub fn sprite_set(tuning: &Tuning) -> SpriteSet {
        SpriteSet::Cat {
            walk_frames: tuning.player_walk_frames,
        }
    }
}

/// A patrolling dog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub rect: Rect,
    /// Signed horizontal multiplier; knockback scales it beyond ±1
    pub horizontal_dir: i32,
    /// Signed vertical drift per tick (+ is up); cleared at screen edges
    pub vertical_dir: i32,
    pub speed: f32,
    pub animator: Animator,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, center: Vec2, heading: Heading, tuning: &Tuning) -> Self {
        Self {
            kind,
            rect: Rect::from_center(center, kind.size(tuning)),
            horizontal_dir: 1,
            vertical_dir: 0,
            speed: tuning.obstacle_base_speed,
            animator: Animator::new(heading),
        }
    }

    pub fn hitbox(&self, tuning: &Tuning) -> Rect {
        self.rect.scaled(self.kind.hitbox_scale(tuning))
    }

    /// Bounce off the screen edges, then walk at `speed` for one tick
    pub fn patrol(&mut self, screen_width: f32, speed: f32) {
        if self.rect.left() <= 0.0 {
            self.horizontal_dir = 1;
            self.vertical_dir = 0;
        }
        if self.rect.left() >= screen_width - self.rect.width() {
            self.horizontal_dir = -1;
            self.vertical_dir = 0;
        }
        self.speed = speed;
        self.rect.pos.x += self.horizontal_dir as f32 * self.speed;
        self.rect.pos.y -= self.vertical_dir as f32;
    }

    pub fn sprite_set(tuning: &Tuning) -> SpriteSet {
        SpriteSet::Dog {
            walk_frames: tuning.obstacle_walk_frames,
        }
    }
}

/// Complete run state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub player: Player,
    /// Always `1 + score` long during a run
    pub obstacles: Vec<Obstacle>,
    /// Border reaches in the current run
    pub score: u32,
    /// Best score seen so far (mirrors the persistence collaborator)
    pub high_score: u32,
    /// Wall-clock time of the most recent tick (ms)
    pub time_ms: u64,
    pub rng: Pcg32,
}

impl GameState {
    /// Create a fresh run with the given seed
    pub fn new(tuning: Tuning, seed: u64, high_score: u32) -> Self {
        let player = Player::new(&tuning);
        let first = Obstacle::new(
            ObstacleKind::White,
            Vec2::new(tuning.ref_obstacle_width, tuning.obstacle_start_y()),
            Heading::E,
            &tuning,
        );
        Self {
            viewport: Viewport::new(tuning.max_scroll()),
            player,
            obstacles: vec![first],
            score: 0,
            high_score,
            time_ms: 0,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        }
    }

    /// Whether the cat is currently inside its immunity window
    pub fn player_immune(&self) -> bool {
        self.player.is_immune(self.time_ms, self.tuning.immunity_ms)
    }

    /// Put the cat back at the bottom of the world after a level
    pub fn restart_climb(&mut self) {
        self.player.rect.pos.y = self.tuning.player_restart_top();
        self.viewport.reset();
    }

    /// Death transition: back to a single freshly chosen obstacle, full
    /// health and zero score
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.player = Player::new(&self.tuning);
        self.viewport.reset();

        let kind = spawn::choose_kind(&self.tuning, 0, &mut self.rng);
        let heading = random_patrol_heading(&mut self.rng);
        let center = Vec2::new(self.tuning.ref_obstacle_width, self.tuning.obstacle_start_y());
        self.obstacles = vec![Obstacle::new(kind, center, heading, &self.tuning)];
    }
}

/// Initial idle heading for a new dog (east or west)
pub(crate) fn random_patrol_heading<R: Rng>(rng: &mut R) -> Heading {
    if rng.random_bool(0.5) {
        Heading::E
    } else {
        Heading::W
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_layout() {
        let state = GameState::new(Tuning::default(), 7, 0);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].kind, ObstacleKind::White);
        assert_eq!(state.player.health, 2);
        assert_eq!(state.viewport.offset_y, state.tuning.max_scroll());
        assert!(!state.player_immune());
    }

    #[test]
    fn test_heavy_kinds() {
        let heavy: Vec<_> = ObstacleKind::ALL
            .iter()
            .filter(|k| k.is_heavy())
            .collect();
        assert_eq!(heavy, [&ObstacleKind::BossWalking, &ObstacleKind::BossBoxing]);
        assert_eq!(ObstacleKind::BossBoxing.damage(), 2);
        assert_eq!(ObstacleKind::Exotic.damage(), 1);
    }

    #[test]
    fn test_patrol_bounces_and_clears_drift() {
        let tuning = Tuning::default();
        let mut dog = Obstacle::new(ObstacleKind::Brown, Vec2::new(780.0, 500.0), Heading::E, &tuning);
        dog.vertical_dir = 2;
        dog.patrol(800.0, 8.0);
        assert_eq!(dog.horizontal_dir, -1);
        assert_eq!(dog.vertical_dir, 0);

        let mut dog = Obstacle::new(ObstacleKind::Brown, Vec2::new(0.0, 500.0), Heading::E, &tuning);
        dog.horizontal_dir = -4;
        dog.patrol(800.0, 8.0);
        assert_eq!(dog.horizontal_dir, 1);
    }

    #[test]
    fn test_drift_persists_mid_screen() {
        let tuning = Tuning::default();
        let mut dog = Obstacle::new(ObstacleKind::Black, Vec2::new(400.0, 500.0), Heading::E, &tuning);
        dog.horizontal_dir = -4;
        dog.vertical_dir = 2;
        let y = dog.rect.top();
        dog.patrol(800.0, 8.0);
        assert_eq!(dog.vertical_dir, 2);
        assert_eq!(dog.rect.top(), y - 2.0);
        assert_eq!(dog.rect.center().x, 400.0 - 32.0);
    }

    #[test]
    fn test_immunity_window_is_inclusive() {
        let mut player = Player::new(&Tuning::default());
        player.last_hit_ms = Some(1000);
        assert!(player.is_immune(1200, 200));
        assert!(!player.is_immune(1201, 200));
    }
}
