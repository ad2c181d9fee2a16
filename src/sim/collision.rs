//! Cat-vs-dog collision resolution
//!
//! The cat is either Normal (takes damage) or Immune (a fixed window after
//! each hit). Per overlapping dog, in list order:
//! 1. Immune: nothing happens.
//! 2. Health left: take damage, start immunity, knock the dog back.
//! 3. No health left and not immune: the run ends.

use super::state::{GameEvent, GameState};
use crate::highscores::HighScoreStore;

/// Knock a dog away after it lands a hit.
///
/// The horizontal multiplier flips and grows; vertical drift is set from the
/// caller-supplied bias.
pub fn apply_knockback(
    horizontal_dir: &mut i32,
    vertical_dir: &mut i32,
    horizontal_factor: i32,
    vertical_bias: i32,
) {
    *horizontal_dir = -*horizontal_dir * horizontal_factor;
    *vertical_dir = vertical_bias;
}

/// Resolve all cat/dog overlaps for this tick.
///
/// `knockback_vertical_bias` is the vertical drift given to a dog that lands
/// a hit. On death the prior score is reported to `scores` before any state
/// is reset, and resolution stops for the rest of the tick.
pub fn resolve_collisions(
    state: &mut GameState,
    now_ms: u64,
    knockback_vertical_bias: i32,
    scores: &mut dyn HighScoreStore,
    events: &mut Vec<GameEvent>,
) {
    let player_box = state.player.hitbox(&state.tuning);

    for index in 0..state.obstacles.len() {
        let dog_box = state.obstacles[index].hitbox(&state.tuning);
        if !player_box.overlaps(&dog_box) {
            continue;
        }

        if state.player.is_immune(now_ms, state.tuning.immunity_ms) {
            continue;
        }

        if state.player.health > 0 {
            let dog = &mut state.obstacles[index];
            let damage = dog.kind.damage();
            state.player.last_hit_ms = Some(now_ms);
            state.player.health = state.player.health.saturating_sub(damage);
            apply_knockback(
                &mut dog.horizontal_dir,
                &mut dog.vertical_dir,
                state.tuning.knockback_horizontal_factor,
                knockback_vertical_bias,
            );
            events.push(if dog.kind.is_heavy() {
                GameEvent::HitHeavy
            } else {
                GameEvent::HitLight
            });
            log::debug!(
                "Cat hit by {} for {damage}, health now {}",
                dog.kind.as_str(),
                state.player.health
            );
            continue;
        }

        let score = state.score;
        let new_high_score = scores.report_score(score);
        state.high_score = state.high_score.max(scores.high_score()).max(score);
        events.push(GameEvent::Death {
            score,
            new_high_score,
        });
        log::info!("Cat caught with score {score}");
        state.reset_run();
        return;
    }
}
