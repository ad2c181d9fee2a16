//! Held-control snapshots
//!
//! Input is level-triggered: each tick sees which controls are held right
//! now, and held controls reapply their effect every tick.

use std::collections::VecDeque;

use crate::sim::TickInput;

bitflags::bitflags! {
    /// Controls held during one tick
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Controls: u16 {
        const LEFT           = 1 << 0;
        const RIGHT          = 1 << 1;
        const UP             = 1 << 2;
        const DOWN           = 1 << 3;
        const CONFIRM        = 1 << 4;
        const CANCEL         = 1 << 5;
        const QUIT           = 1 << 6;
        const DEBUG_HITBOXES = 1 << 7;
        const TOGGLE_MUSIC   = 1 << 8;
        const DELETE_SAVE    = 1 << 9;
    }
}

/// Abstract controls the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Left,
    Right,
    Up,
    Down,
    Confirm,
    Cancel,
    Quit,
    /// Toggle the hitbox overlay
    DebugHitboxes,
    /// Menu only: music on/off
    ToggleMusic,
    /// Menu only: forget the saved high score
    DeleteSave,
}

impl Control {
    pub fn flag(self) -> Controls {
        match self {
            Control::Left => Controls::LEFT,
            Control::Right => Controls::RIGHT,
            Control::Up => Controls::UP,
            Control::Down => Controls::DOWN,
            Control::Confirm => Controls::CONFIRM,
            Control::Cancel => Controls::CANCEL,
            Control::Quit => Controls::QUIT,
            Control::DebugHitboxes => Controls::DEBUG_HITBOXES,
            Control::ToggleMusic => Controls::TOGGLE_MUSIC,
            Control::DeleteSave => Controls::DELETE_SAVE,
        }
    }
}

/// Set of controls held during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: Controls,
}

impl InputSnapshot {
    pub fn new(controls: &[Control]) -> Self {
        let mut snapshot = Self::default();
        for &control in controls {
            snapshot.press(control);
        }
        snapshot
    }

    pub fn press(&mut self, control: Control) {
        self.held |= control.flag();
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held.contains(control.flag())
    }

    /// Held now but not in `previous`
    pub fn pressed_since(&self, previous: &InputSnapshot, control: Control) -> bool {
        self.is_held(control) && !previous.is_held(control)
    }

    /// Movement part of the snapshot, stamped with the tick time
    pub fn tick_input(&self, now_ms: u64) -> TickInput {
        TickInput {
            now_ms,
            left: self.held.contains(Controls::LEFT),
            right: self.held.contains(Controls::RIGHT),
            up: self.held.contains(Controls::UP),
            down: self.held.contains(Controls::DOWN),
        }
    }
}

/// Input collaborator: sampled once at the start of every tick
pub trait InputSource {
    fn poll(&mut self) -> InputSnapshot;
}

/// Replays a fixed sequence of snapshots, optionally looping the tail
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputSnapshot>,
    /// Played forever once `frames` runs out
    idle: InputSnapshot,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputSnapshot>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            idle: InputSnapshot::default(),
        }
    }

    /// Snapshot to repeat after the script ends
    pub fn then_hold(mut self, snapshot: InputSnapshot) -> Self {
        self.idle = snapshot;
        self
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputSnapshot {
        self.frames.pop_front().unwrap_or(self.idle)
    }
}
