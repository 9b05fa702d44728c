use std::collections::HashSet;
use winit::keyboard::KeyCode;

/// Window input translated out of winit's event types, in the order it arrived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyPressed(KeyCode),
    KeyReleased(KeyCode),
    /// Absolute cursor position in physical pixels, origin top-left.
    CursorMoved { x: f64, y: f64 },
    /// Raw relative mouse motion, delivered even while the cursor is grabbed.
    MouseMotion { dx: f64, dy: f64 },
    Scroll { x: f32, y: f32 },
    Resized { width: u32, height: u32 },
}

/// Keys currently held down.
#[derive(Debug, Default, Clone)]
pub struct KeyboardState {
    pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyPressed(key) => self.handle_key(key, true),
            InputEvent::KeyReleased(key) => self.handle_key(key, false),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.pressed.insert(key);
        } else {
            self.pressed.remove(&key);
        }
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Forgets every held key, e.g. when the window loses focus and release
    /// events would be missed.
    pub fn release_all(&mut self) {
        self.pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keys = KeyboardState::new();
        keys.handle_event(&InputEvent::KeyPressed(KeyCode::KeyW));
        keys.handle_event(&InputEvent::KeyPressed(KeyCode::KeyA));
        assert!(keys.is_pressed(KeyCode::KeyW));
        assert!(keys.is_pressed(KeyCode::KeyA));

        keys.handle_event(&InputEvent::KeyReleased(KeyCode::KeyW));
        assert!(!keys.is_pressed(KeyCode::KeyW));
        assert!(keys.is_pressed(KeyCode::KeyA));
    }

    #[test]
    fn test_non_key_events_ignored() {
        let mut keys = KeyboardState::new();
        keys.handle_event(&InputEvent::Scroll { x: 0.0, y: 1.0 });
        keys.handle_event(&InputEvent::Resized {
            width: 10,
            height: 10,
        });
        assert!(!keys.is_pressed(KeyCode::Space));
    }

    #[test]
    fn test_release_all() {
        let mut keys = KeyboardState::new();
        keys.handle_key(KeyCode::KeyD, true);
        keys.release_all();
        assert!(!keys.is_pressed(KeyCode::KeyD));
    }
}
