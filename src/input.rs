//! Input boundary
//!
//! Movement is level-triggered (held keys persist across ticks) while firing
//! is edge-triggered: each key press queues exactly one shot, consumed by the
//! next tick. The input side may live on another thread, so `SharedInput`
//! wraps the state in a mutex and the simulation takes one snapshot per tick.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::sim::{Direction, HeldIntents, TickInput};

/// Keys the game reacts to (the mapping is fixed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    S,
    A,
    D,
    Space,
}

impl Key {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' => Some(Key::W),
            's' => Some(Key::S),
            'a' => Some(Key::A),
            'd' => Some(Key::D),
            ' ' => Some(Key::Space),
            _ => None,
        }
    }

    /// Movement intent bound to this key
    pub fn intent(self) -> Option<Direction> {
        match self {
            Key::W => Some(Direction::Up),
            Key::S => Some(Direction::Down),
            Key::A => Some(Direction::Left),
            Key::D => Some(Direction::Right),
            Key::Space => None,
        }
    }
}

/// Held movement intents plus pending fire requests
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HeldIntents,
    fire_pending: bool,
}

impl InputState {
    pub fn key_down(&mut self, key: Key) {
        match key.intent() {
            Some(direction) => self.held.press(direction),
            None => self.fire_pending = true,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if let Some(direction) = key.intent() {
            self.held.release(direction);
        }
    }

    pub fn held_intents(&self) -> HeldIntents {
        self.held
    }

    /// Take the pending fire request, if any
    pub fn consume_fire_request(&mut self) -> bool {
        std::mem::take(&mut self.fire_pending)
    }

    /// Drop a queued shot without firing it (used on restart)
    pub fn cancel_fire_request(&mut self) {
        self.fire_pending = false;
    }

    /// Consistent view for one tick; consumes the fire request
    pub fn snapshot(&mut self) -> TickInput {
        TickInput {
            held: self.held,
            fire: self.consume_fire_request(),
        }
    }
}

/// Cloneable handle to input state shared with an input thread
#[derive(Debug, Clone, Default)]
pub struct SharedInput(Arc<Mutex<InputState>>);

impl SharedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the state; a poisoned lock still yields the last written input
    pub fn lock(&self) -> MutexGuard<'_, InputState> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn key_down(&self, key: Key) {
        self.lock().key_down(key);
    }

    pub fn key_up(&self, key: Key) {
        self.lock().key_up(key);
    }

    pub fn snapshot(&self) -> TickInput {
        self.lock().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_persist() {
        let mut input = InputState::default();
        input.key_down(Key::W);
        input.key_down(Key::A);
        for _ in 0..3 {
            let tick = input.snapshot();
            assert!(tick.held.contains(Direction::Up));
            assert!(tick.held.contains(Direction::Left));
        }
        input.key_up(Key::W);
        assert!(!input.held_intents().contains(Direction::Up));
    }

    #[test]
    fn test_fire_is_one_shot() {
        let mut input = InputState::default();
        input.key_down(Key::Space);
        assert!(input.snapshot().fire);
        assert!(!input.snapshot().fire);
        // Holding space does not auto-repeat until pressed again
        input.key_up(Key::Space);
        assert!(!input.consume_fire_request());
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Key::from_char('W'), Some(Key::W));
        assert_eq!(Key::from_char(' '), Some(Key::Space));
        assert_eq!(Key::from_char('x'), None);
        assert_eq!(Key::D.intent(), Some(Direction::Right));
        assert_eq!(Key::Space.intent(), None);
    }

    #[test]
    fn test_shared_input_across_threads() {
        let shared = SharedInput::new();
        let writer = shared.clone();
        std::thread::spawn(move || {
            writer.key_down(Key::D);
            writer.key_down(Key::Space);
        })
        .join()
        .unwrap();
        let tick = shared.snapshot();
        assert!(tick.held.contains(Direction::Right));
        assert!(tick.fire);
        assert!(!shared.snapshot().fire);
    }
}
