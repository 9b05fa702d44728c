use std::path::PathBuf;
use std::process::ExitCode;

use log::{error, info};
use simple_logger::SimpleLogger;

use crate::config::{config_candidates, LessonConfig, LoggingConfig};
use crate::utils::error::Result;

/// Process status for a failed lesson, the unsigned form of `-1`.
pub const FAILURE_STATUS: u8 = 255;

/// Starts the global logger. `RUST_LOG` takes precedence over the configured
/// level.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    SimpleLogger::new()
        .with_level(config.level_filter())
        .env()
        .init()?;
    Ok(())
}

/// Shared `main` for the lesson binaries: merges the config file over
/// `defaults`, starts logging, then runs `body` and maps its outcome to an
/// exit status.
pub fn run_lesson<F>(name: &str, defaults: LessonConfig, body: F) -> ExitCode
where
    F: FnOnce(LessonConfig) -> anyhow::Result<()>,
{
    run_lesson_with(name, defaults, &config_candidates(), body)
}

/// [`run_lesson`] with an explicit list of config file locations.
pub fn run_lesson_with<F>(
    name: &str,
    defaults: LessonConfig,
    candidates: &[PathBuf],
    body: F,
) -> ExitCode
where
    F: FnOnce(LessonConfig) -> anyhow::Result<()>,
{
    let (config, config_error) = match LessonConfig::load_from(defaults.clone(), candidates) {
        Ok(config) => (config, None),
        Err(e) => (defaults, Some(e)),
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("{}", e);
    }

    if let Some(e) = config_error {
        error!("{}: {}", name, e);
        return ExitCode::from(FAILURE_STATUS);
    }

    info!("Starting {}", name);
    match body(config) {
        Ok(()) => {
            info!("{} finished", name);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{} failed: {:#}", name, e);
            ExitCode::from(FAILURE_STATUS)
        }
    }
}
