pub mod camera;
pub mod core;
pub mod logging;
pub mod window;

pub use camera::CameraOptions;
pub use self::core::{config_candidates, ConfigError, LessonConfig};
pub use logging::LoggingConfig;
pub use window::{GlProfile, WindowOptions};
