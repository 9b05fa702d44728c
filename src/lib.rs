pub mod assets;
pub mod config;
pub mod input;
pub mod lesson;
pub mod render;
pub mod ui;
pub mod utils;
pub mod window;

// Re-export commonly used types
pub use assets::{asset_path, ImageData, ImageLoader};
pub use config::{CameraOptions, LessonConfig, WindowOptions};
pub use input::{InputEvent, KeyboardState, ShaderState, WindowState};
pub use lesson::{run_lesson, run_lesson_with};
pub use render::{Camera, CameraMovement, Mesh, ShaderProgram, Texture, TextureParameters, VertexLayout};
pub use ui::TextOverlay;
pub use utils::{FpsCounter, FrameClock, LessonError};
pub use window::{Window, WindowError};
