//! Sound cues
//!
//! The simulation emits [`GameEvent`]s; this module turns them into
//! fire-and-forget sound effects. Playback itself belongs to an
//! [`AudioBackend`] supplied by the platform.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Cat hit by a regular dog
    HitLight,
    /// Cat hit by a boss
    HitHeavy,
    /// Border reached
    LevelComplete,
    /// Run over
    Death,
}

impl SoundEffect {
    /// Cue for a gameplay event
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::HitLight => SoundEffect::HitLight,
            GameEvent::HitHeavy => SoundEffect::HitHeavy,
            GameEvent::LevelComplete { .. } => SoundEffect::LevelComplete,
            GameEvent::Death { .. } => SoundEffect::Death,
        }
    }

    /// Asset name of the clip
    pub fn clip_name(&self) -> &'static str {
        match self {
            SoundEffect::HitLight => "cat-hurt-light",
            SoundEffect::HitHeavy => "cat-hurt-hard",
            SoundEffect::LevelComplete => "level-complete",
            SoundEffect::Death => "you-died",
        }
    }

    /// Mix level of the clip before settings are applied
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::LevelComplete => 0.25,
            SoundEffect::HitLight | SoundEffect::HitHeavy | SoundEffect::Death => 0.5,
        }
    }
}

/// Something that can actually make noise
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32);

    /// Background music gain; 0 silences it
    fn set_music_volume(&mut self, _volume: f32) {}
}

/// Backend that only logs (headless runs)
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("♪ {} at {volume:.2}", effect.clip_name());
    }

    fn set_music_volume(&mut self, volume: f32) {
        log::debug!("Music volume {volume:.2}");
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    sfx_volume: f32,
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>, settings: &Settings) -> Self {
        let mut audio = Self {
            backend,
            sfx_volume: 0.0,
        };
        audio.apply_settings(settings);
        audio
    }

    /// Re-read volumes and mute from settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sfx_volume = settings.effective_sfx_volume();
        self.backend
            .set_music_volume(settings.effective_music_volume());
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = effect.base_volume() * self.sfx_volume;
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect, vol);
    }

    /// Play the cue for every event of a tick
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for event in events {
            self.play(SoundEffect::for_event(event));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<(SoundEffect, f32)>>>, Rc<RefCell<Vec<f32>>>);

    impl AudioBackend for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.0.borrow_mut().push((effect, volume));
        }

        fn set_music_volume(&mut self, volume: f32) {
            self.1.borrow_mut().push(volume);
        }
    }

    #[test]
    fn test_events_map_to_cues() {
        let recorder = Recorder::default();
        let settings = Settings {
            master_volume: 0.5,
            ..Settings::default()
        };
        let mut audio = AudioManager::new(Box::new(recorder.clone()), &settings);

        audio.play_events(&[
            GameEvent::HitHeavy,
            GameEvent::LevelComplete {
                score: 1,
                new_high_score: true,
            },
        ]);

        assert_eq!(
            *recorder.0.borrow(),
            vec![
                (SoundEffect::HitHeavy, 0.25),
                (SoundEffect::LevelComplete, 0.125)
            ]
        );
    }

    #[test]
    fn test_muted_plays_nothing() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()), &Settings::default());
        audio.apply_settings(&Settings {
            muted: true,
            ..Settings::default()
        });
        audio.play(SoundEffect::Death);
        assert!(recorder.0.borrow().is_empty());
        assert_eq!(*recorder.1.borrow(), vec![0.2, 0.0]);
    }
}
