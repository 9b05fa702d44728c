use thiserror::Error;

use crate::assets::images::ImageError;
use crate::config::ConfigError;
use crate::render::shaders::ShaderError;
use crate::render::texture::TextureError;
use crate::window::WindowError;

#[derive(Debug, Error)]
pub enum LessonError {
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    #[error("Shader error: {0}")]
    Shader(#[from] ShaderError),

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}

pub type Result<T> = std::result::Result<T, LessonError>;
