//! Utility modules for common functionality

pub mod config;

pub use config::{
    load_config, save_config, AnalysisSettings, AppConfig, ConfigError, ConfigFormat, InputSettings,
    LoggingSettings, OutputSettings,
};
