//! Error types for tw-migrate

use thiserror::Error;
use tw_core::CoreError;
use tw_db::DbError;

/// Migration subsystem errors
#[derive(Error, Debug)]
pub enum MigrateError {
    /// M001: Another runner holds the advisory lock
    #[error("[M001] Migration is already in progress")]
    LockHeld,

    /// M002: Storage failure while acquiring the advisory lock
    #[error("[M002] Failed to acquire migration lock: {0}")]
    LockFailed(String),

    /// M003: Script content rejected by the dangerous-statement check
    #[error("[M003] Migration {version} ({filename}) contains dangerous statement '{statement}' (use force to override)")]
    DangerousStatement {
        version: String,
        filename: String,
        statement: String,
    },

    /// M004: Script has no executable forward section
    #[error("[M004] Migration {version} ({filename}) has an empty script body")]
    EmptyScript { version: String, filename: String },

    /// M005: Forward execution or history recording failed
    #[error("[M005] Failed to apply migration {version} ({filename}): {message}")]
    ApplyFailed {
        version: String,
        filename: String,
        message: String,
    },

    /// M006: Script file could not be read
    #[error("[M006] Failed to read migration script {filename}: {source}")]
    ScriptUnreadable {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    /// M007: Script has no rollback section
    #[error("[M007] No rollback section found in migration {version} ({filename})")]
    MissingRollback { version: String, filename: String },

    /// M008: Rollback execution failed
    #[error("[M008] Failed to roll back migration {version} ({filename}): {message}")]
    RollbackFailed {
        version: String,
        filename: String,
        message: String,
    },

    /// M009: Rollback target is not strictly behind the current version
    #[error("[M009] Cannot roll back to {target}: not behind current version {current}")]
    RollbackTargetAhead { target: String, current: String },

    /// M010: Migrations directory could not be read (all-or-nothing)
    #[error("[M010] Failed to read migrations directory {path}: {source}")]
    DirectoryUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// M011: Two scripts carry the same version
    #[error("[M011] Duplicate migration version {version} in {first} and {second}")]
    DuplicateVersion {
        version: String,
        first: String,
        second: String,
    },

    /// M012: Schema history row could not be decoded
    #[error("[M012] Corrupt schema history row: {0}")]
    HistoryCorrupt(String),

    /// Database error
    #[error("[M013] Database error: {0}")]
    Db(#[from] DbError),

    /// Core error (filename/version parsing, config)
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;
