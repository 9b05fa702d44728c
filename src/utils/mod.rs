pub mod clock;
pub mod error;
pub mod fps;

pub use clock::FrameClock;
pub use error::LessonError;
pub use fps::FpsCounter;
