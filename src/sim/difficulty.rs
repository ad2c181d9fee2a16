//! Progress-driven difficulty curves
//!
//! Pure functions of the number of border reaches so far. Nothing here owns
//! state; the tick, spawner and animators call in with the current score.

use super::spawn::normalize_weights;
use super::state::ObstacleKind;
use crate::tuning::Tuning;

/// Range of the per-tick speed jitter roll
pub const SPEED_ROLL_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

/// Obstacle speed for one tick.
///
/// `roll` is a uniform draw from [`SPEED_ROLL_RANGE`]; the jitter grows with
/// progress and the result never exceeds [`Tuning::obstacle_speed_cap`].
pub fn obstacle_speed(tuning: &Tuning, border_reaches: u32, roll: u32) -> f32 {
    let jitter = 2.0 * border_reaches as f32 * roll as f32 * 0.01;
    (tuning.obstacle_base_speed + jitter).min(tuning.obstacle_speed_cap())
}

/// Minimum vertical spacing between a new obstacle and existing ones
pub fn dynamic_gap(tuning: &Tuning, border_reaches: u32) -> f32 {
    let shrunk = tuning.min_gap - border_reaches as f32 * tuning.gap_reduction_factor;
    shrunk.max(tuning.ref_obstacle_width)
}

/// Spawn distribution given how many obstacles are already on the field.
///
/// Base weights are normalized, the bosses get an additive boost per existing
/// obstacle, and the result is normalized again.
pub fn spawn_weights(tuning: &Tuning, obstacle_count: usize) -> Vec<(ObstacleKind, f64)> {
    let mut weights: Vec<(ObstacleKind, f64)> = ObstacleKind::ALL
        .iter()
        .map(|&kind| (kind, kind.base_weight()))
        .collect();
    normalize_weights(&mut weights);

    let count = obstacle_count as f64;
    for (kind, weight) in &mut weights {
        match kind {
            ObstacleKind::BossWalking => *weight += tuning.boss_walking_boost * count,
            ObstacleKind::BossBoxing => *weight += tuning.boss_boxing_boost * count,
            _ => {}
        }
    }
    normalize_weights(&mut weights);
    weights
}

/// Milliseconds between obstacle animation frames; shrinks as the run goes on
pub fn obstacle_animation_interval(tuning: &Tuning, border_reaches: u32) -> f32 {
    tuning.obstacle_animation_ms / (0.5 * (border_reaches as f32 + 1.0))
}
