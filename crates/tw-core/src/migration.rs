//! Migration record types and filename parsing.
//!
//! Migration scripts live on disk as `<version>_<description-with-dashes>.sql`.
//! Filenames are parsed into validated records once, at load time; malformed
//! names are rejected at the boundary instead of flowing through the runner.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};
use crate::version::MigrationVersion;

/// A migration script discovered on disk, not yet applied.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationFile {
    /// Version parsed from the filename
    pub version: MigrationVersion,

    /// Human-readable description derived from the filename
    pub description: String,

    /// The filename, e.g. `1.0.0_init.sql`
    pub filename: String,

    /// Absolute path to the script
    #[serde(skip)]
    pub path: PathBuf,
}

impl MigrationFile {
    /// Build a migration record from a script path.
    ///
    /// The filename (sans `.sql`) is split on the first underscore run into a
    /// version token and a description token. Dashes in the description become
    /// spaces.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let filename = path
            .file_name()
            .and_then(|f| f.to_str())
            .ok_or_else(|| CoreError::InvalidMigrationFilename {
                filename: path.display().to_string(),
                reason: "not valid UTF-8".to_string(),
            })?
            .to_string();

        let stem = filename.strip_suffix(".sql").ok_or_else(|| {
            CoreError::InvalidMigrationFilename {
                filename: filename.clone(),
                reason: "missing .sql extension".to_string(),
            }
        })?;

        let (version_token, description_token) =
            stem.split_once('_')
                .ok_or_else(|| CoreError::InvalidMigrationFilename {
                    filename: filename.clone(),
                    reason: "expected <version>_<description>.sql".to_string(),
                })?;

        // Tolerate underscore runs: `1.0.0__init` describes "init"
        let description_token = description_token.trim_start_matches('_');
        if description_token.is_empty() {
            return Err(CoreError::InvalidMigrationFilename {
                filename: filename.clone(),
                reason: "empty description".to_string(),
            });
        }

        let version =
            MigrationVersion::parse(version_token).map_err(|e| match e {
                CoreError::InvalidVersion { reason, .. } => CoreError::InvalidMigrationFilename {
                    filename: filename.clone(),
                    reason,
                },
                other => other,
            })?;

        Ok(Self {
            version,
            description: description_token.replace('-', " "),
            filename,
            path: path.to_path_buf(),
        })
    }
}

/// A migration recorded in the schema history store.
#[derive(Debug, Clone, Serialize)]
pub struct AppliedMigration {
    /// Version as recorded at apply time
    pub version: MigrationVersion,

    /// Description as recorded at apply time
    pub description: String,

    /// The script filename
    pub filename: String,

    /// Checksum of the whitespace-normalized script content
    pub checksum: String,

    /// When the migration was applied
    pub applied_at: DateTime<Utc>,
}

/// Derived snapshot of the migration state. Never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationStatus {
    /// Latest applied version, `0.0.0` when the history store is empty
    pub current: MigrationVersion,

    /// Unapplied migrations, ascending by version
    pub pending: Vec<MigrationFile>,

    /// Applied migrations, newest first
    pub applied: Vec<AppliedMigration>,

    /// Timestamp of the most recent applied migration
    pub last_run: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
