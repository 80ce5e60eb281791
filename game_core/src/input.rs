//! Keyboard input as a per-frame snapshot.
//!
//! Front ends feed raw key transitions into [`InputState`]. Once per frame the
//! loop asks its [`InputSource`] for an [`InputSnapshot`]: the held movement
//! directions for both paddles plus the discrete presses seen since the last
//! frame. Held keys are level-triggered and presses are edge-triggered.

use std::collections::HashSet;
use std::io;

use crate::components::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Left paddle up
    W,
    /// Left paddle down
    S,
    /// Right paddle up
    Up,
    /// Right paddle down
    Down,
    /// Restart after game over
    R,
    /// Quit after game over
    Q,
    Space,
    Enter,
    /// Any other key; still counts for "press any key"
    Other,
}

/// Immutable view of one frame's input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: Direction,
    pub right: Direction,
    /// Key-down edges since the previous snapshot, in arrival order
    pub pressed: Vec<Key>,
    /// Window close / Ctrl-C; exits from any screen
    pub close_requested: bool,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot with only discrete presses
    pub fn with_presses(keys: &[Key]) -> Self {
        Self {
            pressed: keys.to_vec(),
            ..Self::default()
        }
    }

    /// Snapshot with only held directions
    pub fn with_directions(left: Direction, right: Direction) -> Self {
        Self {
            left,
            right,
            ..Self::default()
        }
    }
}

/// Produces one snapshot per frame; must never block
pub trait InputSource {
    fn poll(&mut self) -> io::Result<InputSnapshot>;
}

/// Accumulates key transitions between frames
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
    just_pressed: Vec<Key>,
    close_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.push(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Both or neither key held means no movement
    fn axis(&self, up: Key, down: Key) -> Direction {
        match (self.is_held(up), self.is_held(down)) {
            (true, false) => Direction::Up,
            (false, true) => Direction::Down,
            _ => Direction::None,
        }
    }

    /// Build this frame's snapshot and clear the edge-triggered state
    pub fn take_snapshot(&mut self) -> InputSnapshot {
        InputSnapshot {
            left: self.axis(Key::W, Key::S),
            right: self.axis(Key::Up, Key::Down),
            pressed: std::mem::take(&mut self.just_pressed),
            close_requested: std::mem::take(&mut self.close_requested),
        }
    }
}
