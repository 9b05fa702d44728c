use log::LevelFilter;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl LoggingConfig {
    /// Parsed level, falling back to `Info` for unrecognised names.
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::Info)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parsing() {
        let config = LoggingConfig {
            level: "debug".to_string(),
        };
        assert_eq!(config.level_filter(), LevelFilter::Debug);

        let config = LoggingConfig {
            level: "WARN".to_string(),
        };
        assert_eq!(config.level_filter(), LevelFilter::Warn);
    }

    #[test]
    fn test_unknown_level_defaults_to_info() {
        let config = LoggingConfig {
            level: "chatty".to_string(),
        };
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }
}
