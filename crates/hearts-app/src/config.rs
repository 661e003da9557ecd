use hearts_core::game::GameConfig;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

/// Root application configuration loaded from YAML.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: AppConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_game(&self.game)?;
        self.logging.normalize();
        if self.logging.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown level '{}'", self.logging.tracing_level),
            });
        }
        Ok(())
    }
}

fn validate_game(game: &GameConfig) -> Result<(), ValidationError> {
    if game.losing_threshold == 0 {
        return Err(ValidationError::InvalidField {
            field: "game.losing_threshold".to_string(),
            message: "threshold must be greater than zero".to_string(),
        });
    }

    if game.max_rounds == 0 {
        return Err(ValidationError::InvalidField {
            field: "game.max_rounds".to_string(),
            message: "at least one round must be allowed".to_string(),
        });
    }

    Ok(())
}

/// Human-readable logs on stderr unless `log_file` redirects them to JSON lines.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            tracing_level: default_tracing_level(),
            log_file: None,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "warn".to_string()
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearts_core::model::player::Seat;
    use std::io::Write;

    const FULL_YAML: &str = r#"
game:
  losing_threshold: 50
  seed: 7
  human_seat: 2
  shoot_the_moon: false
logging:
  tracing_level: "debug"
  log_file: "logs/hearts.jsonl"
"#;

    #[test]
    fn loads_full_config() {
        let mut cfg: AppConfig = serde_yaml::from_str(FULL_YAML).expect("parse yaml");
        cfg.validate().expect("validate");

        assert_eq!(cfg.game.losing_threshold, 50);
        assert_eq!(cfg.game.seed, Some(7));
        assert_eq!(cfg.game.human_seat, Some(Seat::Two));
        assert!(!cfg.game.shoot_the_moon);
        assert_eq!(cfg.game.max_rounds, GameConfig::default().max_rounds);
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));
        assert_eq!(cfg.logging.log_file, Some(PathBuf::from("logs/hearts.jsonl")));
    }

    #[test]
    fn empty_document_is_default() {
        let mut cfg: AppConfig = serde_yaml::from_str("{}").expect("parse");
        cfg.validate().expect("validate");
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.logging.level(), Some(Level::WARN));
    }

    #[test]
    fn rejects_zero_threshold() {
        let yaml = FULL_YAML.replace("losing_threshold: 50", "losing_threshold: 0");
        let mut cfg: AppConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "game.losing_threshold"
        ));
    }

    #[test]
    fn rejects_unknown_level() {
        let yaml = FULL_YAML.replace("\"debug\"", "\"chatty\"");
        let mut cfg: AppConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "logging.tracing_level"
        ));
    }

    #[test]
    fn blank_level_falls_back_to_default() {
        let mut cfg: AppConfig =
            serde_yaml::from_str("logging:\n  tracing_level: \"  \"\n").expect("parse");
        cfg.validate().expect("validate");
        assert_eq!(cfg.logging.tracing_level, "warn");
    }

    #[test]
    fn from_path_reports_file_errors() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("missing.yaml");
        let err = AppConfig::from_path(&missing).expect_err("missing file");
        assert!(matches!(err, ConfigError::Read { .. }));
        assert_eq!(err.path(), missing.as_path());

        let bad = dir.path().join("bad.yaml");
        let mut file = File::create(&bad).expect("create");
        writeln!(file, "game:\n  threshold: 10").expect("write");
        let err = AppConfig::from_path(&bad).expect_err("unknown field");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
