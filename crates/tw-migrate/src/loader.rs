//! Migration file discovery.
//!
//! Reads `<version>_<description>.sql` files from the migrations directory
//! and produces validated records sorted ascending by version. Loading is
//! all-or-nothing: an unreadable directory or a malformed filename fails the
//! whole load rather than returning partial results.

use std::fs;
use std::path::{Path, PathBuf};

use tw_core::MigrationFile;

use crate::error::{MigrateError, MigrateResult};

/// Discovers migration scripts in a directory.
pub struct MigrationLoader {
    dir: PathBuf,
}

impl MigrationLoader {
    /// Create a loader over a migrations directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The migrations directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load all migration files, ascending by version.
    ///
    /// Non-`.sql` entries and subdirectories are ignored. Two files sharing
    /// a version (numerically, so `1.0` and `1.0.0` collide) are an error.
    pub fn load(&self) -> MigrateResult<Vec<MigrationFile>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| MigrateError::DirectoryUnreadable {
            path: self.dir.display().to_string(),
            source: e,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| MigrateError::DirectoryUnreadable {
                path: self.dir.display().to_string(),
                source: e,
            })?;
            let path = entry.path();

            if path.is_dir() || !path.extension().is_some_and(|e| e == "sql") {
                continue;
            }

            files.push(MigrationFile::from_path(&path)?);
        }

        files.sort_by(|a, b| a.version.cmp(&b.version));

        for pair in files.windows(2) {
            if pair[0].version == pair[1].version {
                return Err(MigrateError::DuplicateVersion {
                    version: pair[0].version.to_string(),
                    first: pair[0].filename.clone(),
                    second: pair[1].filename.clone(),
                });
            }
        }

        log::debug!("Loaded {} migration files from {}", files.len(), self.dir.display());
        Ok(files)
    }

    /// Read the script content for a discovered migration.
    pub fn read_script(&self, migration: &MigrationFile) -> MigrateResult<String> {
        fs::read_to_string(&migration.path).map_err(|e| MigrateError::ScriptUnreadable {
            filename: migration.filename.clone(),
            source: e,
        })
    }

    /// Read a script by filename, for migrations known only from history.
    pub fn read_script_named(&self, filename: &str) -> MigrateResult<String> {
        fs::read_to_string(self.dir.join(filename)).map_err(|e| MigrateError::ScriptUnreadable {
            filename: filename.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
