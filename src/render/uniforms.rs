use gl::types::*;
use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};
use std::collections::HashMap;

/// Location GL reports for a uniform that does not exist or was optimised out.
/// Uploads to it are silently ignored by the driver.
pub const MISSING_LOCATION: GLint = -1;

/// A host value that can be uploaded to a uniform of the matching GLSL type.
///
/// The GL entry point is chosen statically by the implementing type, so
/// `program.set_uniform("model", model)` with a [`Mat4`] always calls
/// `glUniformMatrix4fv`.
pub trait Uniform {
    /// Uploads the value to `location` of the currently bound program.
    fn upload(&self, location: GLint);
}

impl Uniform for bool {
    fn upload(&self, location: GLint) {
        unsafe { gl::Uniform1i(location, *self as GLint) }
    }
}

impl Uniform for i32 {
    fn upload(&self, location: GLint) {
        unsafe { gl::Uniform1i(location, *self) }
    }
}

impl Uniform for u32 {
    fn upload(&self, location: GLint) {
        unsafe { gl::Uniform1ui(location, *self) }
    }
}

impl Uniform for f32 {
    fn upload(&self, location: GLint) {
        unsafe { gl::Uniform1f(location, *self) }
    }
}

impl Uniform for Vec2 {
    fn upload(&self, location: GLint) {
        let values = self.to_array();
        unsafe { gl::Uniform2fv(location, 1, values.as_ptr()) }
    }
}

impl Uniform for Vec3 {
    fn upload(&self, location: GLint) {
        let values = self.to_array();
        unsafe { gl::Uniform3fv(location, 1, values.as_ptr()) }
    }
}

impl Uniform for Vec4 {
    fn upload(&self, location: GLint) {
        let values = self.to_array();
        unsafe { gl::Uniform4fv(location, 1, values.as_ptr()) }
    }
}

impl Uniform for Mat3 {
    fn upload(&self, location: GLint) {
        let columns = self.to_cols_array();
        unsafe { gl::UniformMatrix3fv(location, 1, gl::FALSE, columns.as_ptr()) }
    }
}

impl Uniform for Mat4 {
    fn upload(&self, location: GLint) {
        let columns = self.to_cols_array();
        unsafe { gl::UniformMatrix4fv(location, 1, gl::FALSE, columns.as_ptr()) }
    }
}

impl<T: Uniform + ?Sized> Uniform for &T {
    fn upload(&self, location: GLint) {
        (**self).upload(location)
    }
}

/// Lazily populated map from uniform name to location. Entries are never
/// invalidated, which holds as long as the owning program is not relinked.
#[derive(Debug, Default)]
pub struct UniformCache {
    locations: HashMap<String, GLint>,
}

impl UniformCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached location for `name`, calling `lookup` only the first
    /// time a name is seen. Missing uniforms are cached too, so the warning is
    /// logged once per name.
    pub fn location<F>(&mut self, name: &str, lookup: F) -> GLint
    where
        F: FnOnce(&str) -> GLint,
    {
        if let Some(location) = self.locations.get(name) {
            return *location;
        }

        let location = lookup(name);
        if location == MISSING_LOCATION {
            log::warn!("Uniform '{}' not found in shader", name);
        }

        self.locations.insert(name.to_string(), location);
        location
    }

    pub fn cached(&self, name: &str) -> Option<GLint> {
        self.locations.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_lookup_happens_once_per_name() {
        let mut cache = UniformCache::new();
        let calls = Cell::new(0);
        let lookup = |name: &str| {
            calls.set(calls.get() + 1);
            if name == "model" {
                3
            } else {
                7
            }
        };

        assert_eq!(cache.location("model", lookup), 3);
        assert_eq!(cache.location("model", lookup), 3);
        assert_eq!(cache.location("view", lookup), 7);
        assert_eq!(calls.get(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_missing_uniform_is_cached() {
        let mut cache = UniformCache::new();
        let calls = Cell::new(0);
        let lookup = |_: &str| {
            calls.set(calls.get() + 1);
            MISSING_LOCATION
        };

        assert_eq!(cache.location("typo", lookup), MISSING_LOCATION);
        assert_eq!(cache.location("typo", lookup), MISSING_LOCATION);
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.cached("typo"), Some(MISSING_LOCATION));
    }

    #[test]
    fn test_empty_cache() {
        let cache = UniformCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.cached("model"), None);
    }
}
