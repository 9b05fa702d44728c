pub mod geometry;
pub mod images;

pub use images::{ImageData, ImageError, ImageLoader};

use std::env;
use std::path::{Path, PathBuf};

/// Overrides the directory shaders and textures are read from.
pub const ASSETS_ENV: &str = "LEARN_GL_ASSETS";

/// Resolves a path relative to the assets directory.
///
/// Candidates are tried in order: `$LEARN_GL_ASSETS`, `./assets`, then the
/// `assets/` directory shipped next to this crate's manifest. The first
/// candidate that exists wins; if none does, the bundled location is returned
/// so the eventual "not found" error names a sensible path.
pub fn asset_path<P: AsRef<Path>>(relative: P) -> PathBuf {
    let mut roots = Vec::with_capacity(3);
    if let Some(dir) = env::var_os(ASSETS_ENV) {
        roots.push(PathBuf::from(dir));
    }
    roots.push(PathBuf::from("assets"));
    roots.push(bundled_assets_dir());

    resolve_in(&roots, relative.as_ref())
}

pub fn bundled_assets_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets")
}

fn resolve_in(roots: &[PathBuf], relative: &Path) -> PathBuf {
    roots
        .iter()
        .map(|root| root.join(relative))
        .find(|candidate| candidate.exists())
        .unwrap_or_else(|| {
            roots
                .last()
                .map(|root| root.join(relative))
                .unwrap_or_else(|| relative.to_path_buf())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_first_existing_root_wins() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        fs::create_dir_all(second.path().join("shaders")).unwrap();
        fs::write(second.path().join("shaders/a.vert"), "").unwrap();

        let roots = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        assert_eq!(
            resolve_in(&roots, Path::new("shaders/a.vert")),
            second.path().join("shaders/a.vert")
        );

        fs::create_dir_all(first.path().join("shaders")).unwrap();
        fs::write(first.path().join("shaders/a.vert"), "").unwrap();
        assert_eq!(
            resolve_in(&roots, Path::new("shaders/a.vert")),
            first.path().join("shaders/a.vert")
        );
    }

    #[test]
    fn test_missing_falls_back_to_last_root() {
        let first = tempdir().unwrap();
        let last = tempdir().unwrap();
        let roots = vec![first.path().to_path_buf(), last.path().to_path_buf()];
        assert_eq!(
            resolve_in(&roots, Path::new("nope.png")),
            last.path().join("nope.png")
        );
    }

    #[test]
    fn test_bundled_shaders_resolve() {
        let path = asset_path("shaders/camera/shader.vert");
        assert!(path.is_file(), "{} should exist", path.display());
    }
}
