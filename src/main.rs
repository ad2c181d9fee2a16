//! Cats Dodge Dogs entry point
//!
//! Headless build: runs a scripted autopilot through the full session loop
//! (menu, climb, dodge, death) with logging stand-ins for video and audio.
//! The high score is saved next to the working directory.
//!
//! Usage: `cats-dodge-dogs [frames]`

use std::path::Path;

use cats_dodge_dogs::audio::LogBackend;
use cats_dodge_dogs::consts::*;
use cats_dodge_dogs::persistence::JsonFileStore;
use cats_dodge_dogs::platform::{Control, FrameLimiter, InputSnapshot, ScriptedInput, SystemClock};
use cats_dodge_dogs::renderer::LogRenderer;
use cats_dodge_dogs::session::{Session, SessionIo};
use cats_dodge_dogs::{Settings, Tuning};

const SETTINGS_FILE: &str = "settings.json";
const TUNING_FILE: &str = "tuning.json";
/// Ticks per side of the autopilot's left/right sway
const SWAY_TICKS: u64 = 45;

fn load_tuning(path: &Path) -> Tuning {
    let Ok(json) = std::fs::read_to_string(path) else {
        return Tuning::default();
    };
    match Tuning::from_json(&json) {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path.display());
            tuning
        }
        Err(err) => {
            log::warn!("Ignoring bad tuning file {}: {err}", path.display());
            Tuning::default()
        }
    }
}

/// Press confirm, then climb while weaving across the screen
fn autopilot(frames: u64) -> ScriptedInput {
    let script = (0..frames).map(|i| {
        if i == 0 {
            return InputSnapshot::new(&[Control::Confirm]);
        }
        let side = if (i / SWAY_TICKS) % 2 == 0 {
            Control::Left
        } else {
            Control::Right
        };
        // Re-confirm now and then so a death sends us straight back in
        if i % (SWAY_TICKS * 4) == 0 {
            InputSnapshot::new(&[Control::Up, side, Control::Confirm])
        } else {
            InputSnapshot::new(&[Control::Up, side])
        }
    });
    ScriptedInput::new(script).then_hold(InputSnapshot::new(&[Control::Quit]))
}

fn main() {
    env_logger::init();
    log::info!("{GAME_TITLE} (headless) starting...");

    let frames = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(u64::from(FPS) * 60);

    let settings = Settings::load(Path::new(SETTINGS_FILE));
    let tuning = load_tuning(Path::new(TUNING_FILE));
    let mut limiter = FrameLimiter::new(settings.target_fps);

    let store = JsonFileStore::open(SAVE_FILE_NAME);
    log::info!("High score file: {}", store.path().display());

    let io = SessionIo {
        scores: Box::new(store),
        audio: Box::new(LogBackend),
        renderer: Box::new(LogRenderer::new(u64::from(settings.target_fps))),
        input: Box::new(autopilot(frames)),
        clock: Box::new(SystemClock::new()),
    };
    let mut session =
        Session::new(tuning, settings, io, rand::random()).with_settings_path(SETTINGS_FILE);

    let ran = session.run(&mut limiter, Some(frames + 1));
    log::info!(
        "Autopilot finished: {ran} frames, score {}, high score {}",
        session.state.score,
        session.high_score()
    );
}
