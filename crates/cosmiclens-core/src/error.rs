//! Error types for Cosmic Lens

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("config error: {0}")]
    ConfigError(String),

    #[error("invalid record: {field} - {reason}")]
    InvalidRecord { field: String, reason: String },

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("json error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("toml error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    pub fn invalid_record(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
