use gl::types::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::assets::images::{ImageData, ImageError, ImageLoader};

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("Failed to load image: {0}")]
    Image(#[from] ImageError),

    #[error("Unsupported image format in {path:?}: {channels} channels")]
    UnsupportedFormat { path: Option<PathBuf>, channels: u8 },

    #[error("Magnification filter cannot use mipmaps: {0:?}")]
    InvalidMagFilter(FilterMode),

    #[error("Image buffer holds {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    Repeat,
    MirroredRepeat,
    ClampToEdge,
    ClampToBorder,
}

impl WrapMode {
    pub fn gl_enum(self) -> GLenum {
        match self {
            WrapMode::Repeat => gl::REPEAT,
            WrapMode::MirroredRepeat => gl::MIRRORED_REPEAT,
            WrapMode::ClampToEdge => gl::CLAMP_TO_EDGE,
            WrapMode::ClampToBorder => gl::CLAMP_TO_BORDER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

impl FilterMode {
    pub fn gl_enum(self) -> GLenum {
        match self {
            FilterMode::Nearest => gl::NEAREST,
            FilterMode::Linear => gl::LINEAR,
            FilterMode::NearestMipmapNearest => gl::NEAREST_MIPMAP_NEAREST,
            FilterMode::LinearMipmapNearest => gl::LINEAR_MIPMAP_NEAREST,
            FilterMode::NearestMipmapLinear => gl::NEAREST_MIPMAP_LINEAR,
            FilterMode::LinearMipmapLinear => gl::LINEAR_MIPMAP_LINEAR,
        }
    }

    pub fn uses_mipmaps(self) -> bool {
        !matches!(self, FilterMode::Nearest | FilterMode::Linear)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureParameters {
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub min_filter: FilterMode,
    pub mag_filter: FilterMode,
}

impl TextureParameters {
    /// Nearest-neighbour sampling without mipmaps, for pixel art.
    pub fn pixelated() -> Self {
        Self {
            min_filter: FilterMode::Nearest,
            mag_filter: FilterMode::Nearest,
            ..Self::default()
        }
    }

    pub fn with_wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap_s = wrap;
        self.wrap_t = wrap;
        self
    }

    pub fn validate(&self) -> Result<(), TextureError> {
        if self.mag_filter.uses_mipmaps() {
            return Err(TextureError::InvalidMagFilter(self.mag_filter));
        }
        Ok(())
    }
}

impl Default for TextureParameters {
    fn default() -> Self {
        Self {
            wrap_s: WrapMode::Repeat,
            wrap_t: WrapMode::Repeat,
            min_filter: FilterMode::LinearMipmapLinear,
            mag_filter: FilterMode::Linear,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb,
    Rgba,
}

impl PixelFormat {
    pub fn from_channels(channels: u8) -> Option<Self> {
        match channels {
            3 => Some(PixelFormat::Rgb),
            4 => Some(PixelFormat::Rgba),
            _ => None,
        }
    }

    pub fn gl_enum(self) -> GLenum {
        match self {
            PixelFormat::Rgb => gl::RGB,
            PixelFormat::Rgba => gl::RGBA,
        }
    }

    pub fn channels(self) -> u8 {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

/// Checks that `image` can be uploaded as-is and returns its GL format.
fn upload_format(image: &ImageData) -> Result<PixelFormat, TextureError> {
    let format =
        PixelFormat::from_channels(image.channels).ok_or_else(|| TextureError::UnsupportedFormat {
            path: image.path.clone(),
            channels: image.channels,
        })?;

    let expected = image.width as usize * image.height as usize * format.channels() as usize;
    if image.pixels.len() != expected {
        return Err(TextureError::SizeMismatch {
            expected,
            actual: image.pixels.len(),
        });
    }
    Ok(format)
}

/// An immutable 2D texture. The GL handle is deleted on drop.
pub struct Texture {
    id: GLuint,
    width: u32,
    height: u32,
    path: Option<PathBuf>,
}

impl Texture {
    pub fn from_file<P: AsRef<Path>>(path: P, params: TextureParameters) -> Result<Self, TextureError> {
        params.validate()?;
        let image = ImageLoader::new().load(path)?;
        Self::from_image(&image, params)
    }

    pub fn from_image(image: &ImageData, params: TextureParameters) -> Result<Self, TextureError> {
        params.validate()?;
        let format = upload_format(image)?;

        let mut id = 0;
        unsafe {
            gl::GenTextures(1, &mut id);
            gl::BindTexture(gl::TEXTURE_2D, id);

            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, params.wrap_s.gl_enum() as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, params.wrap_t.gl_enum() as GLint);
            gl::TexParameteri(
                gl::TEXTURE_2D,
                gl::TEXTURE_MIN_FILTER,
                params.min_filter.gl_enum() as GLint,
            );
            gl::TexParameteri(
                gl::TEXTURE_2D,
                gl::TEXTURE_MAG_FILTER,
                params.mag_filter.gl_enum() as GLint,
            );

            // RGB rows are not necessarily 4-byte aligned.
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                format.gl_enum() as GLint,
                image.width as GLsizei,
                image.height as GLsizei,
                0,
                format.gl_enum(),
                gl::UNSIGNED_BYTE,
                image.pixels.as_ptr() as *const _,
            );

            if params.min_filter.uses_mipmaps() {
                gl::GenerateMipmap(gl::TEXTURE_2D);
            }

            gl::BindTexture(gl::TEXTURE_2D, 0);
        }

        log::debug!(
            "Created texture {} ({}x{}) from {:?}",
            id,
            image.width,
            image.height,
            image.path
        );

        Ok(Self {
            id,
            width: image.width,
            height: image.height,
            path: image.path.clone(),
        })
    }

    /// Binds the texture to texture unit `slot`.
    pub fn bind(&self, slot: u32) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + slot);
            gl::BindTexture(gl::TEXTURE_2D, self.id);
        }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, &self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(channels: u8, width: u32, height: u32) -> ImageData {
        ImageData {
            width,
            height,
            channels,
            pixels: vec![0; (width * height) as usize * channels as usize],
            path: Some(PathBuf::from("assets/textures/test.png")),
        }
    }

    #[test]
    fn test_default_parameters() {
        let params = TextureParameters::default();
        assert_eq!(params.wrap_s, WrapMode::Repeat);
        assert_eq!(params.wrap_t, WrapMode::Repeat);
        assert_eq!(params.min_filter, FilterMode::LinearMipmapLinear);
        assert_eq!(params.mag_filter, FilterMode::Linear);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_mipmap_mag_filter_rejected() {
        let params = TextureParameters {
            mag_filter: FilterMode::LinearMipmapLinear,
            ..TextureParameters::default()
        };
        assert!(matches!(
            params.validate(),
            Err(TextureError::InvalidMagFilter(FilterMode::LinearMipmapLinear))
        ));
    }

    #[test]
    fn test_pixelated_preset() {
        let params = TextureParameters::pixelated().with_wrap(WrapMode::ClampToEdge);
        assert!(!params.min_filter.uses_mipmaps());
        assert_eq!(params.wrap_s.gl_enum(), gl::CLAMP_TO_EDGE);
        assert_eq!(params.wrap_t, WrapMode::ClampToEdge);
    }

    #[test]
    fn test_pixel_format_from_channels() {
        assert_eq!(PixelFormat::from_channels(3), Some(PixelFormat::Rgb));
        assert_eq!(PixelFormat::from_channels(4), Some(PixelFormat::Rgba));
        assert_eq!(PixelFormat::from_channels(1), None);
        assert_eq!(PixelFormat::from_channels(2), None);
        assert_eq!(PixelFormat::Rgba.gl_enum(), gl::RGBA);
    }

    #[test]
    fn test_upload_format_checks_channels() {
        assert_eq!(upload_format(&image(3, 4, 2)).unwrap(), PixelFormat::Rgb);
        assert_eq!(upload_format(&image(4, 4, 2)).unwrap(), PixelFormat::Rgba);

        match upload_format(&image(1, 4, 2)) {
            Err(TextureError::UnsupportedFormat { channels, path }) => {
                assert_eq!(channels, 1);
                assert_eq!(path, Some(PathBuf::from("assets/textures/test.png")));
            }
            _ => panic!("expected unsupported format"),
        }
    }

    #[test]
    fn test_upload_format_checks_size() {
        let mut data = image(4, 2, 2);
        data.pixels.pop();
        assert!(matches!(
            upload_format(&data),
            Err(TextureError::SizeMismatch {
                expected: 16,
                actual: 15
            })
        ));
    }

    #[test]
    fn test_filter_mipmap_detection() {
        assert!(FilterMode::NearestMipmapLinear.uses_mipmaps());
        assert!(!FilterMode::Linear.uses_mipmaps());
    }
}
