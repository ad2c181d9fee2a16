//! Menu / play flow around the simulation
//!
//! A [`Session`] owns one run plus every collaborator the run talks to, and
//! advances them together one tick at a time. The game opens on the menu;
//! confirm starts play, cancel pauses back to the menu, death ends on the
//! menu, and quit stops the loop. The menu also toggles music and deletes
//! the saved high score.

use std::path::PathBuf;

use crate::audio::{AudioBackend, AudioManager};
use crate::highscores::HighScoreStore;
use crate::platform::{Clock, Control, FrameLimiter, InputSnapshot, InputSource, QuitFlag};
use crate::renderer::{DrawModel, Renderer, Screen};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, tick};
use crate::tuning::Tuning;

/// Collaborators a session drives
pub struct SessionIo {
    pub scores: Box<dyn HighScoreStore>,
    pub audio: Box<dyn AudioBackend>,
    pub renderer: Box<dyn Renderer>,
    pub input: Box<dyn InputSource>,
    pub clock: Box<dyn Clock>,
}

/// What the loop should do after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Quit,
}

pub struct Session {
    pub state: GameState,
    screen: Screen,
    settings: Settings,
    scores: Box<dyn HighScoreStore>,
    audio: AudioManager,
    renderer: Box<dyn Renderer>,
    input: Box<dyn InputSource>,
    clock: Box<dyn Clock>,
    quit: QuitFlag,
    /// Previous tick's controls, for toggles that fire on press
    previous: InputSnapshot,
    /// Where settings changes are written, if anywhere
    settings_path: Option<PathBuf>,
}

impl Session {
    pub fn new(tuning: Tuning, settings: Settings, io: SessionIo, seed: u64) -> Self {
        let high_score = io.scores.high_score();
        log::info!("New session (seed {seed}, high score {high_score})");
        Self {
            state: GameState::new(tuning, seed, high_score),
            screen: Screen::Menu,
            audio: AudioManager::new(io.audio, &settings),
            settings,
            scores: io.scores,
            renderer: io.renderer,
            input: io.input,
            clock: io.clock,
            quit: QuitFlag::new(),
            previous: InputSnapshot::default(),
            settings_path: None,
        }
    }

    /// Persist settings to `path` whenever a control changes them
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Best score according to the persistence collaborator
    pub fn high_score(&self) -> u32 {
        self.scores.high_score()
    }

    /// Handle for stopping the loop from elsewhere
    pub fn quit_flag(&self) -> QuitFlag {
        self.quit.clone()
    }

    /// Run one tick: read input, advance the flow, draw
    pub fn step(&mut self) -> StepOutcome {
        if self.quit.is_set() {
            return StepOutcome::Quit;
        }

        let input = self.input.poll();
        if input.is_held(Control::Quit) {
            log::info!("Quit requested");
            self.quit.request();
            return StepOutcome::Quit;
        }

        if input.pressed_since(&self.previous, Control::DebugHitboxes) {
            self.settings.show_hitboxes = !self.settings.show_hitboxes;
            log::debug!("Hitbox overlay: {}", self.settings.show_hitboxes);
            self.settings_changed();
        }

        let now = self.clock.now_ms();
        match self.screen {
            Screen::Menu => {
                if input.pressed_since(&self.previous, Control::ToggleMusic) {
                    self.settings.toggle_music();
                    log::info!("Music volume now {}", self.settings.music_volume);
                    self.settings_changed();
                }
                if input.pressed_since(&self.previous, Control::DeleteSave) {
                    self.scores.clear();
                    self.state.high_score = 0;
                    log::info!("Save data deleted");
                }
                if input.is_held(Control::Confirm) {
                    log::info!("Starting play at score {}", self.state.score);
                    self.screen = Screen::Playing;
                }
            }
            Screen::Playing => {
                if input.is_held(Control::Cancel) {
                    log::info!("Paused");
                    self.screen = Screen::Menu;
                } else {
                    self.play_tick(&input, now);
                }
            }
        }

        let model = DrawModel::capture(&self.state, self.screen, self.settings.show_hitboxes);
        self.renderer.draw(&model);
        self.previous = input;
        StepOutcome::Continue
    }

    fn settings_changed(&mut self) {
        self.audio.apply_settings(&self.settings);
        if let Some(path) = &self.settings_path {
            self.settings.save(path);
        }
    }

    fn play_tick(&mut self, input: &InputSnapshot, now: u64) {
        let events = tick(&mut self.state, &input.tick_input(now), self.scores.as_mut());
        self.audio.play_events(&events);

        for event in &events {
            if let GameEvent::Death { score, .. } = event {
                log::info!("Run over at score {score}, back to menu");
                self.screen = Screen::Menu;
            }
        }
    }

    /// Step until quit, pacing with `limiter`. Stops after `max_frames`
    /// ticks when given. Returns the number of ticks run.
    pub fn run(&mut self, limiter: &mut FrameLimiter, max_frames: Option<u64>) -> u64 {
        let mut frames = 0;
        while max_frames.is_none_or(|max| frames < max) {
            if self.step() == StepOutcome::Quit {
                break;
            }
            frames += 1;
            limiter.wait();
        }
        log::info!("Session ended after {frames} frames, high score {}", self.high_score());
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::LogBackend;
    use crate::highscores::MemoryStore;
    use crate::platform::{ManualClock, ScriptedInput};
    use crate::sim::{Heading, Obstacle, ObstacleKind};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct ScreenLog(Rc<RefCell<Vec<(Screen, bool)>>>);

    impl Renderer for ScreenLog {
        fn draw(&mut self, model: &DrawModel) {
            self.0
                .borrow_mut()
                .push((model.screen, model.hitboxes.is_some()));
        }
    }

    fn session_with(script: ScriptedInput, best: u32) -> (Session, ScreenLog, ManualClock) {
        let drawn = ScreenLog::default();
        let clock = ManualClock::new(10_000);
        let io = SessionIo {
            scores: Box::new(MemoryStore::new(best)),
            audio: Box::new(LogBackend),
            renderer: Box::new(drawn.clone()),
            input: Box::new(script),
            clock: Box::new(clock.clone()),
        };
        (
            Session::new(Tuning::default(), Settings::default(), io, 7),
            drawn,
            clock,
        )
    }

    fn held(controls: &[Control]) -> InputSnapshot {
        InputSnapshot::new(controls)
    }

    #[test]
    fn test_opens_on_menu_and_confirm_starts() {
        let script = ScriptedInput::new([held(&[]), held(&[Control::Confirm])]);
        let (mut session, drawn, _) = session_with(script, 0);

        assert_eq!(session.step(), StepOutcome::Continue);
        assert_eq!(session.screen(), Screen::Menu);
        session.step();
        assert_eq!(session.screen(), Screen::Playing);

        let screens: Vec<Screen> = drawn.0.borrow().iter().map(|(s, _)| *s).collect();
        assert_eq!(screens, vec![Screen::Menu, Screen::Playing]);
    }

    #[test]
    fn test_menu_does_not_advance_the_run() {
        let script = ScriptedInput::default().then_hold(held(&[Control::Up]));
        let (mut session, _, _) = session_with(script, 0);
        let start = session.state.player.rect.pos;
        for _ in 0..10 {
            session.step();
        }
        assert_eq!(session.state.player.rect.pos, start);
    }

    #[test]
    fn test_cancel_pauses_to_menu() {
        let script = ScriptedInput::new([
            held(&[Control::Confirm]),
            held(&[Control::Up]),
            held(&[Control::Cancel]),
        ]);
        let (mut session, _, clock) = session_with(script, 0);
        session.step();
        let start = session.state.player.rect.pos.y;
        clock.advance(16);
        session.step();
        let climbed = session.state.player.rect.pos.y;
        assert!(climbed < start);

        clock.advance(16);
        session.step();
        assert_eq!(session.screen(), Screen::Menu);
        assert_eq!(session.state.player.rect.pos.y, climbed);
    }

    #[test]
    fn test_death_returns_to_menu_and_reports() {
        let script = ScriptedInput::new([held(&[Control::Confirm])]);
        let (mut session, _, clock) = session_with(script, 1);
        session.step();

        let state = &mut session.state;
        state.score = 4;
        state.player.health = 0;
        let center = state.player.rect.center();
        state.obstacles = vec![Obstacle::new(
            ObstacleKind::BossWalking,
            center,
            Heading::E,
            &state.tuning,
        )];

        clock.advance(16);
        session.step();

        assert_eq!(session.screen(), Screen::Menu);
        assert_eq!(session.high_score(), 4);
        assert_eq!(session.state.score, 0);
        assert_eq!(session.state.obstacles.len(), 1);
    }

    #[test]
    fn test_quit_stops_the_loop() {
        let script = ScriptedInput::new([held(&[]), held(&[]), held(&[Control::Quit])]);
        let (mut session, _, _) = session_with(script, 0);
        let mut limiter = FrameLimiter::new(1000);
        assert_eq!(session.run(&mut limiter, None), 2);
        assert!(session.quit_flag().is_set());
    }

    #[test]
    fn test_external_quit_flag() {
        let (mut session, drawn, _) = session_with(ScriptedInput::default(), 0);
        session.quit_flag().request();
        assert_eq!(session.step(), StepOutcome::Quit);
        assert!(drawn.0.borrow().is_empty());
    }

    #[test]
    fn test_run_respects_frame_cap() {
        let (mut session, _, _) = session_with(ScriptedInput::default(), 0);
        let mut limiter = FrameLimiter::new(1000);
        assert_eq!(session.run(&mut limiter, Some(3)), 3);
    }

    #[test]
    fn test_debug_overlay_toggles_on_press() {
        let debug = held(&[Control::DebugHitboxes]);
        let script = ScriptedInput::new([debug, debug, held(&[]), debug]);
        let (mut session, drawn, _) = session_with(script, 0);
        for _ in 0..4 {
            session.step();
        }
        let overlay: Vec<bool> = drawn.0.borrow().iter().map(|(_, h)| *h).collect();
        assert_eq!(overlay, vec![true, true, true, false]);
        assert!(!session.settings().show_hitboxes);
    }

    #[test]
    fn test_menu_toggles_music_and_saves_settings() {
        let path = std::env::temp_dir().join(format!(
            "cats-dodge-dogs-session-settings-{}.json",
            std::process::id()
        ));
        let music = held(&[Control::ToggleMusic]);
        let script = ScriptedInput::new([music, music, held(&[])]);
        let (session, _, _) = session_with(script, 0);
        let mut session = session.with_settings_path(&path);

        session.step();
        session.step();
        assert_eq!(session.settings().music_volume, 0.0);
        assert_eq!(Settings::load(&path).music_volume, 0.0);

        session.step();
        assert_eq!(session.settings().music_volume, 0.0);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_music_toggle_ignored_while_playing() {
        let script = ScriptedInput::new([
            held(&[Control::Confirm]),
            held(&[Control::ToggleMusic]),
        ]);
        let (mut session, _, _) = session_with(script, 0);
        session.step();
        session.step();
        assert_eq!(session.settings().music_volume, 0.2);
    }

    #[test]
    fn test_menu_deletes_save_data() {
        let script = ScriptedInput::new([held(&[Control::DeleteSave])]);
        let (mut session, _, _) = session_with(script, 12);
        assert_eq!(session.state.high_score, 12);

        session.step();

        assert_eq!(session.high_score(), 0);
        assert_eq!(session.state.high_score, 0);
        assert_eq!(session.screen(), Screen::Menu);
    }
}
