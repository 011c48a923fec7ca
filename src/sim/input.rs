//! Keyboard input, polled once per frame
//!
//! The host forwards raw key names (`KeyboardEvent.key`) to an
//! [`InputTracker`]; the simulation only ever sees the [`TickInput`] it
//! produces.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Restart,
}

impl Key {
    /// Map a key name to a game key (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "w" | "arrowup" => Some(Key::Up),
            "s" | "arrowdown" => Some(Key::Down),
            "a" | "arrowleft" => Some(Key::Left),
            "d" | "arrowright" => Some(Key::Right),
            " " | "space" | "spacebar" => Some(Key::Fire),
            "r" => Some(Key::Restart),
            _ => None,
        }
    }
}

/// Movement keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    /// Build from a 4-bit mask (up, down, left, right from the low bit)
    pub fn from_bits(bits: u8) -> Self {
        Self {
            up: bits & 0b0001 != 0,
            down: bits & 0b0010 != 0,
            left: bits & 0b0100 != 0,
            right: bits & 0b1000 != 0,
        }
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Sum of the held axis unit vectors (screen coordinates, +y is down).
    /// Opposite keys cancel; diagonals are NOT normalized.
    pub fn axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.up {
            axis.y -= 1.0;
        }
        if self.down {
            axis.y += 1.0;
        }
        if self.left {
            axis.x -= 1.0;
        }
        if self.right {
            axis.x += 1.0;
        }
        axis
    }

    fn set(&mut self, key: Key, held: bool) {
        match key {
            Key::Up => self.up = held,
            Key::Down => self.down = held,
            Key::Left => self.left = held,
            Key::Right => self.right = held,
            Key::Fire | Key::Restart => {}
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub held: HeldKeys,
    /// Fire key went down since the last tick
    pub fire: bool,
    /// Restart key went down since the last tick
    pub restart: bool,
}

/// Accumulates key events between frames
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    held: HeldKeys,
    fire_held: bool,
    restart_held: bool,
    fire_edge: bool,
    restart_edge: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press. Returns false for keys the game ignores.
    pub fn key_down(&mut self, name: &str) -> bool {
        let Some(key) = Key::from_name(name) else {
            return false;
        };
        match key {
            // Auto-repeat keydowns don't count as new presses
            Key::Fire => {
                if !self.fire_held {
                    self.fire_edge = true;
                }
                self.fire_held = true;
            }
            Key::Restart => {
                if !self.restart_held {
                    self.restart_edge = true;
                }
                self.restart_held = true;
            }
            _ => self.held.set(key, true),
        }
        true
    }

    /// Handle a key release
    pub fn key_up(&mut self, name: &str) -> bool {
        let Some(key) = Key::from_name(name) else {
            return false;
        };
        match key {
            Key::Fire => self.fire_held = false,
            Key::Restart => self.restart_held = false,
            _ => self.held.set(key, false),
        }
        true
    }

    /// Drop every held key (e.g. when the window loses focus)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Input for the next tick; consumes pending edges
    pub fn take_input(&mut self) -> TickInput {
        let input = TickInput {
            held: self.held,
            fire: self.fire_edge,
            restart: self.restart_edge,
        };
        self.fire_edge = false;
        self.restart_edge = false;
        input
    }
}
