//! Error types for tw-health

use thiserror::Error;
use tw_db::DbError;

/// Health scoring errors
#[derive(Error, Debug)]
pub enum HealthError {
    /// H001: No project row for the given id
    #[error("[H001] Project not found: {id}")]
    ProjectNotFound { id: String },

    /// H002: A stats query returned an unexpected shape
    #[error("[H002] Unexpected stats result: {0}")]
    BadStatsRow(String),

    /// Database error
    #[error("[H003] Database error: {0}")]
    Db(#[from] DbError),
}

/// Result type alias for HealthError
pub type HealthResult<T> = Result<T, HealthError>;
