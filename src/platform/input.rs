//! Polled keyboard and mouse state
//!
//! Window events are folded into this struct between frames; the game reads
//! it once per frame. Mouse motion accumulates until it is taken, so the
//! camera controller never sees a mid-frame update.

use std::collections::HashSet;

use glam::Vec2;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    C,
    Space,
    Left,
    Right,
    R,
    Enter,
    Escape,
    F11,
}

#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
    pressed: HashSet<Key>,
    mouse_delta: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// True only in the frame the key went down
    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn accumulate_mouse(&mut self, dx: f32, dy: f32) {
        self.mouse_delta += Vec2::new(dx, dy);
    }

    /// Mouse travel since the last call
    pub fn take_mouse_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.mouse_delta)
    }

    /// Pad steering: -1 (A / Left), 1 (D / Right), 0 otherwise. Right wins when both are held.
    pub fn horizontal_axis(&self) -> i8 {
        let mut direction = 0;
        if self.is_key_down(Key::A) || self.is_key_down(Key::Left) {
            direction = -1;
        }
        if self.is_key_down(Key::D) || self.is_key_down(Key::Right) {
            direction = 1;
        }
        direction
    }

    /// Clear per-frame edges
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }

    /// Drop everything held, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.held.clear();
        self.pressed.clear();
        self.mouse_delta = Vec2::ZERO;
    }
}
