use serde::{Deserialize, Serialize};

/// OpenGL context profile requested from the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlProfile {
    Core,
    Compatibility,
    Any,
}

impl GlProfile {
    pub fn to_glutin(self) -> Option<glutin::context::GlProfile> {
        match self {
            GlProfile::Core => Some(glutin::context::GlProfile::Core),
            GlProfile::Compatibility => Some(glutin::context::GlProfile::Compatibility),
            GlProfile::Any => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    pub title: String,
    pub gl_major: u8,
    pub gl_minor: u8,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub profile: GlProfile,
    pub resizable: bool,
    /// Draw an egui text overlay (the FPS readout) over the scene.
    pub overlay: bool,
}

impl WindowOptions {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_overlay(mut self, overlay: bool) -> Self {
        self.overlay = overlay;
        self
    }

    pub fn with_version(mut self, major: u8, minor: u8) -> Self {
        self.gl_major = major;
        self.gl_minor = minor;
        self
    }

    /// True when these options already ask for the 3.3 core context that
    /// window creation falls back to.
    pub fn is_fallback_context(&self) -> bool {
        (self.gl_major, self.gl_minor, self.profile) == (3, 3, GlProfile::Core)
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "OpenGL Window".to_string(),
            gl_major: 4,
            gl_minor: 6,
            width: 800,
            height: 600,
            vsync: true,
            profile: GlProfile::Core,
            resizable: true,
            overlay: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_context_matches_version_and_profile() {
        assert!(!WindowOptions::default().is_fallback_context());
        assert!(WindowOptions::default().with_version(3, 3).is_fallback_context());

        // Same version with another profile still has a core context to retry.
        let mut compat = WindowOptions::default().with_version(3, 3);
        compat.profile = GlProfile::Compatibility;
        assert!(!compat.is_fallback_context());

        let mut any = WindowOptions::default().with_version(3, 3);
        any.profile = GlProfile::Any;
        assert!(!any.is_fallback_context());
    }

    #[test]
    fn test_overlay_is_opt_in() {
        assert!(!WindowOptions::default().overlay);
        assert!(WindowOptions::titled("Camera").with_overlay(true).overlay);
    }
}
