use std::collections::HashSet;

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Tracks keyboard state between frames.
#[derive(Default)]
pub struct Input {
    keys_down: HashSet<KeyCode>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a window event and update input state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            if let PhysicalKey::Code(key) = event.physical_key {
                self.set_key(key, event.state);
            }
        }
    }

    fn set_key(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.keys_down.insert(key);
            }
            ElementState::Released => {
                self.keys_down.remove(&key);
            }
        }
    }

    /// Returns true if the key is currently held down.
    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_held_until_released() {
        let mut input = Input::new();
        assert!(!input.key_down(KeyCode::Escape));

        input.set_key(KeyCode::Escape, ElementState::Pressed);
        assert!(input.key_down(KeyCode::Escape));

        // Key repeat arrives as another Pressed while still held.
        input.set_key(KeyCode::Escape, ElementState::Pressed);
        assert!(input.key_down(KeyCode::Escape));
        assert!(!input.key_down(KeyCode::Space));

        input.set_key(KeyCode::Escape, ElementState::Released);
        assert!(!input.key_down(KeyCode::Escape));
    }
}
