//! Edge-triggered input latching
//!
//! Hosts report raw presses and releases. A held key fires exactly once
//! until it is released, so key repeat never turns into a jump per tick.

use crate::sim::{GamePhase, TickInput};

/// Physical inputs the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    ArrowUp,
    Enter,
    R,
    /// Touch or mouse tap anywhere on the playfield
    Tap,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code` (or similar) to a key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Space" | " " => Some(Key::Space),
            "ArrowUp" | "KeyW" => Some(Key::ArrowUp),
            "Enter" | "NumpadEnter" => Some(Key::Enter),
            "KeyR" | "r" | "R" => Some(Key::R),
            _ => None,
        }
    }
}

/// Logical action produced by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Jump,
    BeginOrRestart,
}

impl Action {
    /// Space, up and tap are context sensitive: jump while playing, start or
    /// restart otherwise. Enter and R always (re)start.
    pub fn for_key(key: Key, phase: GamePhase) -> Action {
        match key {
            Key::Enter | Key::R => Action::BeginOrRestart,
            Key::Space | Key::ArrowUp | Key::Tap => {
                if phase == GamePhase::Playing {
                    Action::Jump
                } else {
                    Action::BeginOrRestart
                }
            }
        }
    }
}

/// Tracks which keys are down and accumulates one-shot actions between ticks
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    held: Vec<Key>,
    pending: TickInput,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// A key went down. Returns the action if this is a fresh press.
    pub fn key_down(&mut self, key: Key, phase: GamePhase) -> Option<Action> {
        if self.held.contains(&key) {
            return None;
        }
        self.held.push(key);
        let action = Action::for_key(key, phase);
        self.latch(action);
        Some(action)
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.retain(|&k| k != key);
    }

    /// Taps have no release event; they always fire
    pub fn tap(&mut self, phase: GamePhase) -> Action {
        let action = Action::for_key(Key::Tap, phase);
        self.latch(action);
        action
    }

    /// Forget held keys (focus loss means we will never see their release)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Hand over everything latched since the last tick
    pub fn take(&mut self) -> TickInput {
        std::mem::take(&mut self.pending)
    }

    fn latch(&mut self, action: Action) {
        match action {
            Action::Jump => self.pending.jump = true,
            Action::BeginOrRestart => self.pending.begin_or_restart = true,
        }
    }
}
