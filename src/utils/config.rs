//! Run configuration: column names, analysis parameters, output layout
//! and log level, loaded from JSON, TOML or YAML.

use crate::defaults;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level run configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Input column names
    pub input: InputSettings,
    /// Analysis parameters
    pub analysis: AnalysisSettings,
    /// Output file layout
    pub output: OutputSettings,
    /// Log verbosity
    pub logging: LoggingSettings,
}

/// CSV column names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Required review text column
    pub text_column: String,
    /// Optional ground-truth label column
    pub label_column: String,
    /// Optional timestamp column
    pub timestamp_column: String,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            text_column: "Review".to_string(),
            label_column: "label".to_string(),
            timestamp_column: "timestamp".to_string(),
        }
    }
}

/// Analysis parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Keywords extracted per review
    pub top_keywords: usize,
    /// Themes kept in the summary
    pub top_themes: usize,
    /// Themes printed to the console
    pub console_themes: usize,
    /// First synthesized date when the input has no timestamps
    pub trend_epoch: NaiveDate,
    /// Score reviews on the rayon thread pool
    pub parallel: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            top_keywords: defaults::TOP_KEYWORDS,
            top_themes: defaults::TOP_THEMES,
            console_themes: defaults::CONSOLE_THEMES,
            trend_epoch: defaults::trend_epoch(),
            parallel: true,
        }
    }
}

/// Output file layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Output directory
    pub dir: PathBuf,
    /// Processed dataset file name
    pub processed_file: String,
    /// Summary file name
    pub summary_file: String,
    /// Distribution data file name
    pub distribution_file: String,
    /// Trend data file name
    pub trend_file: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./output"),
            processed_file: "sentiment_report.csv".to_string(),
            summary_file: "summary.txt".to_string(),
            distribution_file: "sentiment_distribution.json".to_string(),
            trend_file: "sentiment_trend.csv".to_string(),
        }
    }
}

impl OutputSettings {
    /// Path of the processed dataset
    pub fn processed_path(&self) -> PathBuf {
        self.dir.join(&self.processed_file)
    }

    /// Path of the summary
    pub fn summary_path(&self) -> PathBuf {
        self.dir.join(&self.summary_file)
    }

    /// Path of the distribution data
    pub fn distribution_path(&self) -> PathBuf {
        self.dir.join(&self.distribution_file)
    }

    /// Path of the trend data
    pub fn trend_path(&self) -> PathBuf {
        self.dir.join(&self.trend_file)
    }
}

/// Log verbosity for the binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// One of trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Serialization formats accepted for configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        match ext.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(ext.to_string())),
        }
    }

    fn parse(self, content: &str) -> Result<AppConfig, ConfigError> {
        let parsed = match self {
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(ConfigError::ParseError)
    }

    fn render(self, config: &AppConfig) -> Result<String, ConfigError> {
        let rendered = match self {
            Self::Json => serde_json::to_string_pretty(config).map_err(|e| e.to_string()),
            Self::Toml => toml::to_string_pretty(config).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::to_string(config).map_err(|e| e.to_string()),
        };
        rendered.map_err(ConfigError::SerializeError)
    }
}

/// Read a configuration file; missing keys take their defaults
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::FileError(format!("{}: {}", path.display(), e)))?;
    format.parse(&content)
}

/// Write a configuration file in the format implied by its extension
pub fn save_config<P: AsRef<Path>>(config: &AppConfig, path: P) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let content = ConfigFormat::from_path(path)?.render(config)?;
    std::fs::write(path, content)
        .map_err(|e| ConfigError::FileError(format!("{}: {}", path.display(), e)))
}

/// Failure to read or write a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot access config file {0}")]
    FileError(String),
    #[error("invalid configuration: {0}")]
    ParseError(String),
    #[error("cannot serialize configuration: {0}")]
    SerializeError(String),
    #[error("unsupported config format '{0}' (expected json, toml, yaml or yml)")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.input.text_column, "Review");
        assert_eq!(config.analysis.top_keywords, 5);
        assert_eq!(config.analysis.top_themes, 20);
        assert_eq!(
            config.analysis.trend_epoch,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
        assert_eq!(config.output.summary_path(), PathBuf::from("./output/summary.txt"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [input]
            text_column = "body"

            [analysis]
            parallel = false
            trend_epoch = "2024-06-01"
            "#,
        )
        .unwrap();

        assert_eq!(config.input.text_column, "body");
        assert_eq!(config.input.label_column, "label");
        assert!(!config.analysis.parallel);
        assert_eq!(config.analysis.top_keywords, 5);
        assert_eq!(
            config.analysis.trend_epoch,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let mut config = AppConfig::default();
        config.analysis.top_themes = 7;

        for name in ["cfg.toml", "cfg.json", "cfg.yaml"] {
            let path = dir.path().join(name);
            save_config(&config, &path).unwrap();
            assert_eq!(load_config(&path).unwrap(), config, "{}", name);
        }
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.YML")).unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")).unwrap(), ConfigFormat::Json);
        assert!(ConfigFormat::from_path(Path::new("config")).is_err());
    }

    #[test]
    fn test_unsupported_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cfg.ini");
        std::fs::write(&path, "x=1").unwrap();
        assert!(matches!(
            load_config(&path),
            Err(ConfigError::UnsupportedFormat(ref ext)) if ext == "ini"
        ));
    }
}
