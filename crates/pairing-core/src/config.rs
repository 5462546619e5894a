//! Pipeline settings, stored as TOML.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use pairing_ingest::{DEFAULT_MIN_CONFIDENCE, DEFAULT_PREVIEW_ROWS};
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::logging::{LogConfig, LogFormat};

/// Settings for one pairing deployment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairingSettings {
    pub import: ImportSettings,
    pub criteria: CriteriaSettings,
    pub logging: LoggingSettings,
}

impl PairingSettings {
    /// Load settings from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read settings {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parse settings {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content)?;
        Ok(settings)
    }

    /// Write settings to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create config directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("serialize settings")?;
        std::fs::write(path, content).with_context(|| format!("write settings {}", path.display()))
    }
}

/// Import behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Rows inspected for column compatibility.
    pub preview_rows: usize,
    /// Default for creating missing choice options on import.
    pub create_options: bool,
    pub min_suggestion_confidence: f32,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            preview_rows: DEFAULT_PREVIEW_ROWS,
            create_options: false,
            min_suggestion_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

/// Defaults for new match criteria entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriteriaSettings {
    /// Weight given to newly mapped pairs; unweighted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// One of error, warn, info, debug, trace.
    pub level: String,
    pub format: LogFormat,
    /// Append logs to this file instead of stderr.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Allow raw submission values in log events.
    pub log_data: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            file: None,
            log_data: false,
        }
    }
}

impl LoggingSettings {
    pub fn to_log_config(&self) -> Result<LogConfig> {
        let level = Level::from_str(self.level.trim())
            .with_context(|| format!("unknown log level '{}'", self.level))?;
        Ok(LogConfig::default()
            .with_level(level)
            .with_format(self.format)
            .with_log_file(self.file.clone())
            .with_log_data(self.log_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings = PairingSettings::from_toml(
            r#"
            [import]
            create_options = true

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert!(settings.import.create_options);
        assert_eq!(settings.import.preview_rows, 5);
        assert_eq!(settings.criteria.default_weight, None);
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn bad_level_is_an_error() {
        let logging = LoggingSettings {
            level: "loud".to_string(),
            ..LoggingSettings::default()
        };
        assert!(logging.to_log_config().is_err());
    }
}
