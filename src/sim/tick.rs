//! Per-frame simulation tick
//!
//! Order: steer the cat (camera follows vertical input), check the border,
//! walk the dogs, resolve collisions.

use super::collision::resolve_collisions;
use super::difficulty::{SPEED_ROLL_RANGE, obstacle_animation_interval, obstacle_speed};
use super::spawn::spawn_obstacle;
use super::state::{GameEvent, GameState, Obstacle};
use crate::highscores::HighScoreStore;
use rand::Rng;

/// Held controls for a single tick, plus the wall-clock time it runs at
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Wall-clock time (ms) used for animation and immunity
    pub now_ms: u64,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Advance the run by one frame and return the events it produced
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    scores: &mut dyn HighScoreStore,
) -> Vec<GameEvent> {
    let now = input.now_ms;
    state.time_ms = now;
    let mut events = Vec::new();

    steer_player(state, input);

    if state.viewport.border_reached(&state.player.rect) {
        complete_level(state, scores, &mut events);
    }

    move_obstacles(state, now);

    let bias = state.player.vertical_intent * state.tuning.knockback_vertical_factor;
    resolve_collisions(state, now, bias, scores, &mut events);

    events
}

/// Turn held controls into intents, move the cat and scroll the camera
fn steer_player(state: &mut GameState, input: &TickInput) {
    let tuning = &state.tuning;
    let rect = state.player.rect;

    let mut horizontal = 0;
    if input.left && rect.left() > 0.0 {
        horizontal = -1;
    }
    if input.right && rect.left() < tuning.window_width - rect.width() {
        horizontal = 1;
    }

    let mut vertical = 0;
    if input.up && rect.top() > state.viewport.offset_y - rect.height() {
        vertical = 1;
    }
    if input.down && rect.top() < tuning.world_height() - rect.height() {
        vertical = -1;
    }

    state.player.rect.pos.x += horizontal as f32 * tuning.player_speed_x;
    if vertical != 0 {
        state
            .viewport
            .scroll(vertical, tuning.player_speed_y, &mut state.player.rect);
    }

    state.player.horizontal_intent = horizontal;
    state.player.vertical_intent = vertical;
    state.player.animator.update(
        horizontal,
        vertical,
        input.now_ms,
        tuning.player_animation_ms,
        tuning.player_walk_frames,
    );
}

/// Border reached: score, spawn a dog, report the score and restart the climb
fn complete_level(
    state: &mut GameState,
    scores: &mut dyn HighScoreStore,
    events: &mut Vec<GameEvent>,
) {
    state.score += 1;
    let kind = spawn_obstacle(state);
    let new_high_score = scores.report_score(state.score);
    state.high_score = state.high_score.max(state.score);
    state.restart_climb();

    log::info!(
        "Level complete: score {} ({} joins, {} dogs)",
        state.score,
        kind.as_str(),
        state.obstacles.len()
    );
    if new_high_score {
        log::info!("New high score: {}", state.score);
    }
    events.push(GameEvent::LevelComplete {
        score: state.score,
        new_high_score,
    });
}

/// Walk every dog with a freshly rolled speed and advance its animation
fn move_obstacles(state: &mut GameState, now_ms: u64) {
    let GameState {
        tuning,
        obstacles,
        rng,
        score,
        ..
    } = state;
    let interval = obstacle_animation_interval(tuning, *score);

    for dog in obstacles.iter_mut() {
        let speed = obstacle_speed(tuning, *score, rng.random_range(SPEED_ROLL_RANGE));
        dog.patrol(tuning.window_width, speed);
        animate_obstacle(dog, now_ms, interval, tuning.obstacle_walk_frames);
    }
}

fn animate_obstacle(dog: &mut Obstacle, now_ms: u64, interval_ms: f32, walk_frames: usize) {
    dog.animator.update(
        dog.horizontal_dir,
        dog.vertical_dir,
        now_ms,
        interval_ms,
        walk_frames,
    );
}
