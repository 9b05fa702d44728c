use gl::types::GLint;
use winit::keyboard::KeyCode;

use super::keyboard::{InputEvent, KeyboardState};
use crate::render::camera::{Camera, CameraMovement};
use crate::render::uniforms::Uniform;

/// Post-processing mode selected from the keyboard and read by the lesson
/// fragment shaders as an `int` uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShaderState {
    #[default]
    Normal,
    Negative,
    Greyscale,
}

impl ShaderState {
    pub fn as_int(self) -> GLint {
        match self {
            ShaderState::Normal => 0,
            ShaderState::Negative => 1,
            ShaderState::Greyscale => 2,
        }
    }
}

impl Uniform for ShaderState {
    fn upload(&self, location: GLint) {
        self.as_int().upload(location)
    }
}

/// Per-window interaction state fed by input events.
#[derive(Debug, Clone)]
pub struct WindowState {
    pub wireframe: bool,
    pub shader_state: ShaderState,
    last_x: f32,
    last_y: f32,
    first_mouse: bool,
}

impl WindowState {
    /// `center_x`/`center_y` seed the cursor tracking, normally the middle of
    /// the framebuffer.
    pub fn new(center_x: f32, center_y: f32) -> Self {
        Self {
            wireframe: false,
            shader_state: ShaderState::Normal,
            last_x: center_x,
            last_y: center_y,
            first_mouse: true,
        }
    }

    /// Reacts to one event. Camera-related events are ignored when no camera
    /// is passed. Returns true when the wireframe mode changed.
    pub fn handle_event(&mut self, event: &InputEvent, camera: Option<&mut Camera>) -> bool {
        match *event {
            InputEvent::KeyPressed(key) => return self.handle_key(key),
            InputEvent::CursorMoved { x, y } => {
                let offset = self.cursor_offset(x as f32, y as f32);
                if let (Some((dx, dy)), Some(camera)) = (offset, camera) {
                    camera.process_mouse_movement(dx, dy, true);
                }
            }
            InputEvent::MouseMotion { dx, dy } => {
                if let Some(camera) = camera {
                    // Screen y grows downwards, pitch grows upwards.
                    camera.process_mouse_movement(dx as f32, -dy as f32, true);
                }
            }
            InputEvent::Scroll { y, .. } => {
                if let Some(camera) = camera {
                    camera.process_mouse_scroll(y);
                }
            }
            InputEvent::KeyReleased(_) | InputEvent::Resized { .. } => {}
        }
        false
    }

    fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Space => {
                self.wireframe = !self.wireframe;
                return true;
            }
            KeyCode::Digit1 => self.shader_state = ShaderState::Normal,
            KeyCode::Digit2 => self.shader_state = ShaderState::Greyscale,
            KeyCode::Digit3 => self.shader_state = ShaderState::Negative,
            _ => {}
        }
        false
    }

    /// Offset since the last cursor position, with y reversed. The first
    /// position only seeds the tracker and yields no offset, so the camera
    /// does not jump when the cursor enters the window.
    pub fn cursor_offset(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        if self.first_mouse {
            self.last_x = x;
            self.last_y = y;
            self.first_mouse = false;
            return None;
        }

        let offset = (x - self.last_x, self.last_y - y);
        self.last_x = x;
        self.last_y = y;
        Some(offset)
    }
}

/// Per-frame polling of held keys. W/A/S/D move the camera and R resets it.
/// Returns true when Escape asks the program to close.
pub fn process_input(keys: &KeyboardState, camera: &mut Camera, delta_time: f32) -> bool {
    let bindings = [
        (KeyCode::KeyW, CameraMovement::Forward),
        (KeyCode::KeyS, CameraMovement::Backward),
        (KeyCode::KeyA, CameraMovement::Left),
        (KeyCode::KeyD, CameraMovement::Right),
    ];
    for (key, movement) in bindings {
        if keys.is_pressed(key) {
            camera.process_keyboard(movement, delta_time);
        }
    }

    if keys.is_pressed(KeyCode::KeyR) {
        camera.reset();
    }

    close_requested(keys)
}

pub fn close_requested(keys: &KeyboardState) -> bool {
    keys.is_pressed(KeyCode::Escape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraOptions;
    use approx::assert_relative_eq;
    use glam::Vec3;

    #[test]
    fn test_shader_state_values() {
        assert_eq!(ShaderState::Normal.as_int(), 0);
        assert_eq!(ShaderState::Negative.as_int(), 1);
        assert_eq!(ShaderState::Greyscale.as_int(), 2);
    }

    #[test]
    fn test_space_toggles_wireframe() {
        let mut state = WindowState::new(400.0, 300.0);
        assert!(state.handle_event(&InputEvent::KeyPressed(KeyCode::Space), None));
        assert!(state.wireframe);
        assert!(state.handle_event(&InputEvent::KeyPressed(KeyCode::Space), None));
        assert!(!state.wireframe);
        assert!(!state.handle_event(&InputEvent::KeyReleased(KeyCode::Space), None));
    }

    #[test]
    fn test_number_keys_select_shader_state() {
        let mut state = WindowState::new(0.0, 0.0);
        state.handle_event(&InputEvent::KeyPressed(KeyCode::Digit2), None);
        assert_eq!(state.shader_state, ShaderState::Greyscale);
        state.handle_event(&InputEvent::KeyPressed(KeyCode::Digit3), None);
        assert_eq!(state.shader_state, ShaderState::Negative);
        state.handle_event(&InputEvent::KeyPressed(KeyCode::Digit1), None);
        assert_eq!(state.shader_state, ShaderState::Normal);
    }

    #[test]
    fn test_first_cursor_position_only_seeds() {
        let mut state = WindowState::new(400.0, 300.0);
        assert_eq!(state.cursor_offset(100.0, 100.0), None);
        assert_eq!(state.cursor_offset(110.0, 90.0), Some((10.0, 10.0)));
        assert_eq!(state.cursor_offset(105.0, 95.0), Some((-5.0, -5.0)));
    }

    #[test]
    fn test_cursor_turns_camera() {
        let mut state = WindowState::new(400.0, 300.0);
        let mut camera = Camera::default();

        state.handle_event(&InputEvent::CursorMoved { x: 400.0, y: 300.0 }, Some(&mut camera));
        assert_eq!(camera.yaw(), -90.0);

        state.handle_event(&InputEvent::CursorMoved { x: 500.0, y: 250.0 }, Some(&mut camera));
        assert_relative_eq!(camera.yaw(), -80.0, epsilon = 1e-4);
        assert_relative_eq!(camera.pitch(), 5.0, epsilon = 1e-4);
    }

    #[test]
    fn test_mouse_motion_reverses_y() {
        let mut state = WindowState::new(0.0, 0.0);
        let mut camera = Camera::default();
        state.handle_event(&InputEvent::MouseMotion { dx: 0.0, dy: 20.0 }, Some(&mut camera));
        assert_relative_eq!(camera.pitch(), -2.0, epsilon = 1e-4);
    }

    #[test]
    fn test_scroll_zooms_camera() {
        let mut state = WindowState::new(0.0, 0.0);
        let mut camera = Camera::default();
        state.handle_event(&InputEvent::Scroll { x: 0.0, y: 5.0 }, Some(&mut camera));
        assert_eq!(camera.fov(), 40.0);
    }

    #[test]
    fn test_process_input_moves_and_closes() {
        let mut keys = KeyboardState::new();
        let mut camera = Camera::new(CameraOptions::default().with_speed(1.0));

        keys.handle_key(KeyCode::KeyW, true);
        assert!(!process_input(&keys, &mut camera, 1.0));
        assert_relative_eq!(camera.position(), Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);

        keys.handle_key(KeyCode::KeyW, false);
        keys.handle_key(KeyCode::Escape, true);
        assert!(process_input(&keys, &mut camera, 1.0));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut keys = KeyboardState::new();
        let mut camera = Camera::default();
        keys.handle_key(KeyCode::KeyA, true);
        keys.handle_key(KeyCode::KeyD, true);
        process_input(&keys, &mut camera, 0.5);
        assert_relative_eq!(camera.position(), Vec3::ZERO, epsilon = 1e-6);
    }

    #[test]
    fn test_r_resets_camera() {
        let mut keys = KeyboardState::new();
        let mut camera = Camera::default();
        camera.process_mouse_movement(50.0, 0.0, true);

        keys.handle_key(KeyCode::KeyR, true);
        process_input(&keys, &mut camera, 0.016);
        assert_eq!(camera.yaw(), -90.0);
    }
}
