//! Error types for Morphbot

use thiserror::Error;

/// The main error type for Morphbot operations
#[derive(Debug, Error)]
pub enum MorphError {
    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Render error: {0}")]
    RenderError(String),
}

/// Result type alias for Morphbot operations
pub type Result<T> = std::result::Result<T, MorphError>;

impl From<toml::de::Error> for MorphError {
    fn from(err: toml::de::Error) -> Self {
        MorphError::TomlParseError(err.to_string())
    }
}
