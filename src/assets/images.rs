use image::{DynamicImage, ImageReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("File does not exist: {0:?}")]
    NotFound(PathBuf),

    #[error("Failed to load image at {path:?}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to open image at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Decoded 8-bit pixels, tightly packed row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    /// Components per pixel: 1 (grey), 2 (grey + alpha), 3 (RGB) or 4 (RGBA).
    pub channels: u8,
    pub pixels: Vec<u8>,
    pub path: Option<PathBuf>,
}

impl ImageData {
    pub fn from_dynamic(image: DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        let channels = image.color().channel_count().clamp(1, 4);
        let pixels = match channels {
            1 => image.into_luma8().into_raw(),
            2 => image.into_luma_alpha8().into_raw(),
            3 => image.into_rgb8().into_raw(),
            _ => image.into_rgba8().into_raw(),
        };

        Self {
            width,
            height,
            channels,
            pixels,
            path: None,
        }
    }

    /// Byte length of one row.
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels as usize
    }
}

/// Reads image files from disk. Images are flipped vertically by default so
/// the first row is the bottom one, which is what GL texture coordinates expect.
#[derive(Debug, Clone)]
pub struct ImageLoader {
    flip_vertically: bool,
}

impl ImageLoader {
    pub fn new() -> Self {
        Self {
            flip_vertically: true,
        }
    }

    pub fn flip_vertically(mut self, flip: bool) -> Self {
        self.flip_vertically = flip;
        self
    }

    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<ImageData, ImageError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ImageError::NotFound(path.to_path_buf()));
        }

        let reader = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|source| ImageError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let mut image = reader.decode().map_err(|source| ImageError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        if self.flip_vertically {
            image = image.flipv();
        }

        let mut data = ImageData::from_dynamic(image);
        data.path = Some(path.to_path_buf());
        log::debug!(
            "Loaded image {:?} ({}x{}, {} channels)",
            path,
            data.width,
            data.height,
            data.channels
        );
        Ok(data)
    }
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}
