use std::path::PathBuf;

use thiserror::Error;

/// Rejection reasons for text typed into the settings editor
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("'{input}' is not a positive whole number of seconds")]
    InvalidDuration { input: String },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    #[error("duration must be at least one second")]
    ZeroDuration,
}

/// Errors raised while loading or writing the config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
