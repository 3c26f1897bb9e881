//! Keyboard state and its mapping to per-tick commands
//!
//! The platform layer records raw key identifiers as they go down and up;
//! the tick only ever sees the resolved [`TickInput`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Logical player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Fire,
}

/// Physical key identifiers bound to each action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBindings {
    bindings: HashMap<Action, Vec<String>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let table: [(Action, &[&str]); 5] = [
            (Action::MoveLeft, &["ArrowLeft", "a", "A"]),
            (Action::MoveRight, &["ArrowRight", "d", "D"]),
            (Action::MoveUp, &["ArrowUp", "w", "W"]),
            (Action::MoveDown, &["ArrowDown", "s", "S"]),
            (Action::Fire, &[" ", "Space"]),
        ];
        let bindings = table
            .into_iter()
            .map(|(action, keys)| (action, keys.iter().map(|k| k.to_string()).collect()))
            .collect();
        Self { bindings }
    }
}

impl KeyBindings {
    /// Keys currently bound to an action
    pub fn keys(&self, action: Action) -> &[String] {
        self.bindings.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace the keys bound to an action
    pub fn rebind(&mut self, action: Action, keys: Vec<String>) {
        self.bindings.insert(action, keys);
    }

    /// Whether a key is bound to any action (the platform suppresses default
    /// browser handling for these)
    pub fn is_bound(&self, key: &str) -> bool {
        self.bindings.values().any(|keys| keys.iter().any(|k| k == key))
    }
}

/// Held state of every key seen so far
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    held: HashMap<String, bool>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        self.held.insert(key.to_string(), true);
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.insert(key.to_string(), false);
    }

    pub fn is_key_held(&self, key: &str) -> bool {
        self.held.get(key).copied().unwrap_or(false)
    }

    /// Whether any key bound to `action` is held
    pub fn is_held(&self, action: Action, bindings: &KeyBindings) -> bool {
        bindings.keys(action).iter().any(|k| self.is_key_held(k))
    }

    /// Release every key
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

impl TickInput {
    /// Resolve held keys into commands
    pub fn from_keys(keys: &InputSnapshot, bindings: &KeyBindings) -> Self {
        Self {
            left: keys.is_held(Action::MoveLeft, bindings),
            right: keys.is_held(Action::MoveRight, bindings),
            up: keys.is_held(Action::MoveUp, bindings),
            down: keys.is_held(Action::MoveDown, bindings),
            fire: keys.is_held(Action::Fire, bindings),
        }
    }
}
