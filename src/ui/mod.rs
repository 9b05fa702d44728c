pub mod overlay;

pub use overlay::{OverlayError, TextOverlay};
