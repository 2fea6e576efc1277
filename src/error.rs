//! Error types for loading generator configuration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid horizon ({field} = {value}): {message}")]
    InvalidHorizon {
        field: &'static str,
        value: i64,
        message: String,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
