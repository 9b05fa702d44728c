pub mod keyboard;
pub mod state;

pub use keyboard::{InputEvent, KeyboardState};
pub use state::{close_requested, process_input, ShaderState, WindowState};
pub use winit::keyboard::KeyCode;
