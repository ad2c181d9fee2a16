//! Clocks, frame pacing and the quit flag

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Source of wall-clock milliseconds
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Milliseconds since the clock was created
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock for tests and scripted runs. Clones share one time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Blocks at the end of each tick until the frame budget is spent
#[derive(Debug)]
pub struct FrameLimiter {
    frame: Duration,
    last: Option<Instant>,
}

impl FrameLimiter {
    pub fn new(target_fps: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / target_fps.max(1),
            last: None,
        }
    }

    /// Target duration of one frame
    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Sleep off whatever is left of the current frame
    pub fn wait(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last {
            let elapsed = now.duration_since(last);
            if let Some(remaining) = self.frame.checked_sub(elapsed) {
                std::thread::sleep(remaining);
            }
        }
        self.last = Some(Instant::now());
    }
}

/// Global "stop the loop" flag, checked once per tick
#[derive(Debug, Clone, Default)]
pub struct QuitFlag(Arc<AtomicBool>);

impl QuitFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(100);
        clock.advance(16);
        assert_eq!(clock.now_ms(), 116);
        let shared = clock.clone();
        shared.set(5);
        assert_eq!(clock.now_ms(), 5);
    }

    #[test]
    fn test_frame_limiter_paces() {
        let mut limiter = FrameLimiter::new(100);
        assert_eq!(limiter.frame_duration(), Duration::from_millis(10));
        let start = Instant::now();
        for _ in 0..4 {
            limiter.wait();
        }
        // First wait returns immediately, the next three sleep ~10ms each
        assert!(start.elapsed() >= Duration::from_millis(25));
    }

    #[test]
    fn test_quit_flag_is_shared() {
        let flag = QuitFlag::new();
        let handle = flag.clone();
        assert!(!flag.is_set());
        handle.request();
        assert!(flag.is_set());
    }
}
