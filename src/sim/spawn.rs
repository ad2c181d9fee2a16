//! Obstacle spawning: weighted breed choice and anti-clustering placement

use glam::Vec2;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use super::difficulty::{dynamic_gap, spawn_weights};
use super::state::{GameState, Obstacle, ObstacleKind, random_patrol_heading};
use crate::tuning::Tuning;

/// Rescale weights in place so they sum to 1.
///
/// Negative weights are treated as zero. An all-zero table is left as is.
pub fn normalize_weights<K>(weights: &mut [(K, f64)]) {
    for (_, w) in weights.iter_mut() {
        *w = w.max(0.0);
    }
    let total: f64 = weights.iter().map(|(_, w)| *w).sum();
    if total > 0.0 {
        for (_, w) in weights.iter_mut() {
            *w /= total;
        }
    }
}

/// Sample one key from a weight table.
///
/// The table is normalized before the draw. Returns `None` if the table is
/// empty or carries no positive weight.
pub fn weighted_choice<K: Copy, R: Rng>(weights: &[(K, f64)], rng: &mut R) -> Option<K> {
    let mut table = weights.to_vec();
    normalize_weights(&mut table);
    let dist = WeightedIndex::new(table.iter().map(|(_, w)| *w)).ok()?;
    table.get(dist.sample(rng)).map(|(k, _)| *k)
}

/// Pick a breed for the next obstacle given how many are already out
pub fn choose_kind<R: Rng>(tuning: &Tuning, obstacle_count: usize, rng: &mut R) -> ObstacleKind {
    let weights = spawn_weights(tuning, obstacle_count);
    weighted_choice(&weights, rng).unwrap_or(ObstacleKind::White)
}

/// Vertical centre for a new obstacle.
///
/// Draws uniformly from the spawn band and rejects candidates within the
/// dynamic gap of any existing obstacle. After `max_spawn_tries` draws the
/// last candidate is used even if it is too close.
pub fn spawn_y<R: Rng>(
    tuning: &Tuning,
    existing: &[Obstacle],
    border_reaches: u32,
    rng: &mut R,
) -> f32 {
    let gap = dynamic_gap(tuning, border_reaches);
    let (low, high) = tuning.spawn_band();
    let tries = tuning.max_spawn_tries.max(1);

    let mut candidate = low;
    for attempt in 1..=tries {
        candidate = if low < high {
            rng.random_range(low..=high)
        } else {
            low
        };
        let clear = existing
            .iter()
            .all(|o| (candidate - o.rect.center().y).abs() > gap);
        if clear {
            log::debug!("Spawn at y={candidate:.0} after {attempt} tries (gap {gap:.0})");
            return candidate;
        }
    }

    log::debug!("Spawn tries exhausted, using y={candidate:.0} (gap {gap:.0})");
    candidate
}

/// Append one obstacle for the current score (called on border reach)
pub fn spawn_obstacle(state: &mut GameState) -> ObstacleKind {
    let kind = choose_kind(&state.tuning, state.obstacles.len(), &mut state.rng);
    let y = spawn_y(&state.tuning, &state.obstacles, state.score, &mut state.rng);
    let heading = random_patrol_heading(&mut state.rng);
    let center = Vec2::new(state.tuning.ref_obstacle_width, y);
    state
        .obstacles
        .push(Obstacle::new(kind, center, heading, &state.tuning));
    kind
}
