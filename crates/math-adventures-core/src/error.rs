//! Core error types for math-adventures-core.
//!
//! Decision logic is total over its inputs, so the only fallible paths are
//! setup-time ones: loading a model artifact and reading/writing configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for math-adventures-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Model artifact could not be loaded
    #[error("Model load error: {0}")]
    Load(#[from] LoadError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while constructing a model-based policy from an artifact.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Artifact path does not exist
    #[error("Model artifact not found at {0}")]
    NotFound(PathBuf),

    /// Artifact exists but could not be read
    #[error("Failed to read model artifact at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Artifact is not a valid JSON document of the expected shape
    #[error("Malformed model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    /// Artifact was written by an incompatible format version
    #[error("Incompatible model artifact version {found} (supported: {supported})")]
    IncompatibleVersion { found: String, supported: String },

    /// Decision tree failed structural validation
    #[error("Invalid decision tree: {0}")]
    InvalidTree(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not name a configuration field
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
