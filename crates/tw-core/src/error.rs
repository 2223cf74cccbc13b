//! Error types for tw-core

use thiserror::Error;

/// Core error type for Trackway
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E003: Malformed migration version string
    #[error("[E003] Invalid migration version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    /// E004: Migration filename does not match `<version>_<description>.sql`
    #[error("[E004] Invalid migration filename '{filename}': {reason}")]
    InvalidMigrationFilename { filename: String, reason: String },

    /// E005: IO error
    #[error("[E005] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E006: IO error with file path context
    #[error("[E006] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E007: Config YAML parse error
    #[error("[E007] Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
