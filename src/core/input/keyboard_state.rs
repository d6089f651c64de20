//=========================================================================
// Keyboard State
//=========================================================================
//
// Continuous snapshot of which keys are held, sampled once per frame and
// broadcast to the tree after the discrete events.
//
// Frame lifecycle: apply(event)* → dispatch_keyboard(&state) → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode};

//=== KeyboardState =======================================================

/// Set of keys currently held down.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyboardState {
    keys_down: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot with exactly the given keys held.
    pub fn with_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = KeyCode>,
    {
        Self {
            keys_down: keys.into_iter().collect(),
        }
    }

    /// Folds one event into the snapshot.
    ///
    /// Only key events change the state; everything else is ignored.
    pub fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key, .. } => {
                self.keys_down.insert(*key);
            }
            InputEvent::KeyUp { key, .. } => {
                self.keys_down.remove(key);
            }
            _ => {}
        }
    }

    /// Returns `true` while `key` is held.
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if any of `keys` is held.
    pub fn any_down(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|key| self.is_down(*key))
    }

    /// Releases every key (e.g. when the window loses focus).
    pub fn clear(&mut self) {
        self.keys_down.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
