use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::camera::CameraOptions;
use super::logging::LoggingConfig;
use super::window::WindowOptions;

pub const CONFIG_FILE_NAME: &str = "learn-gl.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize defaults: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] toml::de::Error),
}

/// Settings shared by every lesson program. Each program builds its own
/// defaults; an optional TOML file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonConfig {
    pub window: WindowOptions,
    pub camera: CameraOptions,
    pub logging: LoggingConfig,
}

impl LessonConfig {
    pub fn new(window: WindowOptions) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }

    pub fn with_camera(mut self, camera: CameraOptions) -> Self {
        self.camera = camera;
        self
    }

    /// Applies the first config file found in [`config_candidates`] to
    /// `defaults`.
    pub fn load(defaults: Self) -> Result<Self, ConfigError> {
        Self::load_from(defaults, &config_candidates())
    }

    /// Merges the first of `candidates` that is a regular file over
    /// `defaults`. Later candidates are ignored, even if the first one fails
    /// to parse.
    pub fn load_from(defaults: Self, candidates: &[PathBuf]) -> Result<Self, ConfigError> {
        match candidates.iter().find(|path| path.is_file()) {
            Some(path) => Self::merge_file(defaults, path),
            None => Ok(defaults),
        }
    }

    /// Deep-merges the TOML file at `path` over `defaults`. A missing file
    /// leaves the defaults untouched.
    pub fn merge_file(defaults: Self, path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Ok(defaults);
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let overrides: toml::Value =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Self::merge_value(defaults, overrides)
    }

    pub fn merge_str(defaults: Self, content: &str) -> Result<Self, ConfigError> {
        let overrides: toml::Value = toml::from_str(content)?;
        Self::merge_value(defaults, overrides)
    }

    fn merge_value(defaults: Self, overrides: toml::Value) -> Result<Self, ConfigError> {
        let mut merged = toml::Value::try_from(&defaults)?;
        merge_tables(&mut merged, overrides);
        Ok(merged.try_into()?)
    }
}

/// Recursively copies `overrides` into `base`. Tables merge key by key, every
/// other value replaces what was there.
pub fn merge_tables(base: &mut toml::Value, overrides: toml::Value) {
    match (base, overrides) {
        (toml::Value::Table(base), toml::Value::Table(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(existing) => merge_tables(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overrides) => *base = overrides,
    }
}

/// Where a config file is looked for, in priority order: the working
/// directory, then the platform config directory.
pub fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dirs) = ProjectDirs::from("com", "learn-gl", "learn-gl") {
        candidates.push(dirs.config_dir().join(CONFIG_FILE_NAME));
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GlProfile;
    use glam::Vec3;
    use std::io::Write;

    fn lesson_defaults() -> LessonConfig {
        LessonConfig::new(WindowOptions::titled("Camera").with_vsync(false))
            .with_camera(CameraOptions::at(Vec3::new(0.0, 0.0, 3.0)).with_speed(7.5))
    }

    #[test]
    fn test_empty_override_keeps_defaults() {
        let merged = LessonConfig::merge_str(lesson_defaults(), "").unwrap();
        assert_eq!(merged, lesson_defaults());
    }

    #[test]
    fn test_partial_override_keeps_lesson_defaults() {
        let merged = LessonConfig::merge_str(
            lesson_defaults(),
            r#"
            [window]
            width = 1280
            profile = "compatibility"

            [camera]
            fov = 60.0
            "#,
        )
        .unwrap();

        assert_eq!(merged.window.width, 1280);
        assert_eq!(merged.window.height, 600);
        assert_eq!(merged.window.title, "Camera");
        assert!(!merged.window.vsync);
        assert_eq!(merged.window.profile, GlProfile::Compatibility);
        assert_eq!(merged.camera.fov, 60.0);
        assert_eq!(merged.camera.speed, 7.5);
        assert_eq!(merged.camera.position, Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn test_integer_for_float_field() {
        let merged = LessonConfig::merge_str(lesson_defaults(), "[camera]\nspeed = 5").unwrap();
        assert_eq!(merged.camera.speed, 5.0);
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let result = LessonConfig::merge_str(lesson_defaults(), "[window]\nwidth = \"wide\"");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_merge_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"debug\"").unwrap();

        let merged = LessonConfig::merge_file(lesson_defaults(), file.path()).unwrap();
        assert_eq!(merged.logging.level, "debug");
        assert_eq!(merged.window.title, "Camera");
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let merged =
            LessonConfig::merge_file(lesson_defaults(), &dir.path().join("absent.toml")).unwrap();
        assert_eq!(merged, lesson_defaults());
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[window").unwrap();

        match LessonConfig::merge_file(lesson_defaults(), file.path()) {
            Err(ConfigError::Parse { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_tables_replaces_scalars() {
        let mut base: toml::Value = toml::from_str("a = 1\n[t]\nx = 1\ny = 2").unwrap();
        let overrides: toml::Value = toml::from_str("a = 3\n[t]\ny = 5\nz = 6").unwrap();
        merge_tables(&mut base, overrides);

        assert_eq!(base["a"].as_integer(), Some(3));
        assert_eq!(base["t"]["x"].as_integer(), Some(1));
        assert_eq!(base["t"]["y"].as_integer(), Some(5));
        assert_eq!(base["t"]["z"].as_integer(), Some(6));
    }

    #[test]
    fn test_candidates_start_in_working_directory() {
        let candidates = config_candidates();
        assert_eq!(candidates[0], PathBuf::from(CONFIG_FILE_NAME));
        assert!(candidates.iter().all(|path| path.ends_with(CONFIG_FILE_NAME)));
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let local = dir.path().join("local.toml");
        let user = dir.path().join("user.toml");
        std::fs::write(&local, "[window]\ntitle = \"Local\"").unwrap();
        std::fs::write(&user, "[window]\ntitle = \"User\"\nwidth = 1024").unwrap();

        let merged =
            LessonConfig::load_from(lesson_defaults(), &[missing, local, user.clone()]).unwrap();
        assert_eq!(merged.window.title, "Local");
        assert_eq!(merged.window.width, 800);

        let merged = LessonConfig::load_from(lesson_defaults(), &[user]).unwrap();
        assert_eq!(merged.window.title, "User");
        assert_eq!(merged.window.width, 1024);
    }

    #[test]
    fn test_no_candidates_keeps_defaults() {
        let merged = LessonConfig::load_from(lesson_defaults(), &[]).unwrap();
        assert_eq!(merged, lesson_defaults());

        let dir = tempfile::tempdir().unwrap();
        let merged =
            LessonConfig::load_from(lesson_defaults(), &[dir.path().join("absent.toml")]).unwrap();
        assert_eq!(merged, lesson_defaults());
    }

    #[test]
    fn test_directory_candidate_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("learn-gl.toml");
        std::fs::write(&file, "[camera]\nfov = 30.0").unwrap();

        let merged =
            LessonConfig::load_from(lesson_defaults(), &[dir.path().to_path_buf(), file]).unwrap();
        assert_eq!(merged.camera.fov, 30.0);
    }
}
