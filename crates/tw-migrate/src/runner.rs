//! Migration orchestration.
//!
//! `MigrationRunner` ties discovery, locking, script execution and history
//! recording together. `migrate` and `rollback` each take the advisory lock,
//! run their whole batch inside one transaction, and release the lock whether
//! the batch succeeded or not.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tw_core::{compute_checksum, AppliedMigration, MigrationFile, MigrationStatus, MigrationVersion};
use tw_db::Database;

use crate::error::{MigrateError, MigrateResult};
use crate::loader::MigrationLoader;
use crate::lock::{MigrationLock, DEFAULT_STALE_AFTER_SECS};
use crate::script::{find_dangerous, MigrationScript};
use crate::store::SchemaHistory;

/// Options controlling a `migrate` run.
#[derive(Debug, Clone, Default)]
pub struct MigrateOptions {
    /// Execute scripts inside the transaction, then roll it back
    pub dry_run: bool,

    /// Apply scripts that trip the dangerous-statement check, with a warning
    pub force: bool,
}

/// How an applied migration has diverged from the files on disk.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Drift {
    /// Script content changed after it was applied
    ChecksumMismatch { recorded: String, actual: String },

    /// Script no longer exists in the migrations directory
    FileMissing,
}

/// A single drift finding for an applied migration.
#[derive(Debug, Clone, Serialize)]
pub struct DriftReport {
    pub version: MigrationVersion,
    pub filename: String,
    #[serde(flatten)]
    pub drift: Drift,
}

/// Applies and rolls back versioned migrations against a database.
pub struct MigrationRunner {
    db: Arc<dyn Database>,
    loader: MigrationLoader,
    dangerous_statements: Vec<String>,
    lock_staleness_secs: u64,
}

impl MigrationRunner {
    pub fn new(
        db: Arc<dyn Database>,
        loader: MigrationLoader,
        dangerous_statements: Vec<String>,
    ) -> Self {
        Self {
            db,
            loader,
            dangerous_statements,
            lock_staleness_secs: DEFAULT_STALE_AFTER_SECS,
        }
    }

    /// Override the advisory-lock staleness threshold.
    pub fn with_lock_staleness(mut self, secs: u64) -> Self {
        self.lock_staleness_secs = secs;
        self
    }

    /// Current migration state: applied history diffed against files on disk.
    pub async fn status(&self) -> MigrateResult<MigrationStatus> {
        let history = SchemaHistory::new(self.db.as_ref());
        history.ensure().await?;
        let applied = history.applied().await?;

        let applied_versions: HashSet<MigrationVersion> =
            applied.iter().map(|a| a.version.clone()).collect();

        let pending: Vec<MigrationFile> = self
            .loader
            .load()?
            .into_iter()
            .filter(|f| !applied_versions.contains(&f.version))
            .collect();

        let current = applied
            .iter()
            .map(|a| a.version.clone())
            .max()
            .unwrap_or_else(MigrationVersion::zero);
        let last_run = applied.iter().map(|a| a.applied_at).max();

        Ok(MigrationStatus {
            current,
            pending,
            applied,
            last_run,
        })
    }

    /// Apply all pending migrations in version order.
    ///
    /// Returns the migrations that were applied (or would have been, under
    /// `dry_run`). The batch is transactional: any failure leaves the schema
    /// and history exactly as they were.
    pub async fn migrate(&self, options: &MigrateOptions) -> MigrateResult<Vec<MigrationFile>> {
        let lock = MigrationLock::with_staleness(self.db.as_ref(), self.lock_staleness_secs);
        if !lock.acquire().await? {
            return Err(MigrateError::LockHeld);
        }
        let result = self.migrate_locked(options).await;
        lock.release().await;
        result
    }

    async fn migrate_locked(&self, options: &MigrateOptions) -> MigrateResult<Vec<MigrationFile>> {
        let status = self.status().await?;
        if status.pending.is_empty() {
            log::info!("No pending migrations");
            return Ok(Vec::new());
        }

        self.db.begin().await?;
        match self.apply_all(&status.pending, options).await {
            Ok(()) => {
                if options.dry_run {
                    self.db.rollback_tx().await?;
                    log::info!(
                        "Dry run: {} migration(s) validated, changes rolled back",
                        status.pending.len()
                    );
                } else {
                    self.db.commit().await?;
                }
                Ok(status.pending)
            }
            Err(e) => {
                if let Err(rb) = self.db.rollback_tx().await {
                    log::error!("Failed to roll back migration transaction: {}", rb);
                }
                Err(e)
            }
        }
    }

    async fn apply_all(
        &self,
        pending: &[MigrationFile],
        options: &MigrateOptions,
    ) -> MigrateResult<()> {
        let history = SchemaHistory::new(self.db.as_ref());

        for migration in pending {
            let content = self.loader.read_script(migration)?;
            let checksum = compute_checksum(&content);
            let script = MigrationScript::parse(&content);

            if script.forward.trim().is_empty() {
                return Err(MigrateError::EmptyScript {
                    version: migration.version.to_string(),
                    filename: migration.filename.clone(),
                });
            }

            if let Some(statement) = find_dangerous(&script.forward, &self.dangerous_statements) {
                if options.force {
                    log::warn!(
                        "Migration {} contains dangerous statement '{}', applying anyway (force)",
                        migration.version,
                        statement
                    );
                } else {
                    return Err(MigrateError::DangerousStatement {
                        version: migration.version.to_string(),
                        filename: migration.filename.clone(),
                        statement: statement.to_string(),
                    });
                }
            }

            log::info!("Applying migration {} ({})", migration.version, migration.filename);
            self.db
                .execute_batch(&script.forward)
                .await
                .map_err(|e| MigrateError::ApplyFailed {
                    version: migration.version.to_string(),
                    filename: migration.filename.clone(),
                    message: e.to_string(),
                })?;

            history
                .record(migration, &checksum, Utc::now())
                .await
                .map_err(|e| MigrateError::ApplyFailed {
                    version: migration.version.to_string(),
                    filename: migration.filename.clone(),
                    message: e.to_string(),
                })?;
        }

        Ok(())
    }

    /// Roll back applied migrations, newest first.
    ///
    /// With no target, rolls back only the most recent migration. With a
    /// target version, rolls back everything strictly above it; the target
    /// must be behind the current version. Every rolled-back script must
    /// carry a rollback section or the whole batch is refused.
    pub async fn rollback(
        &self,
        target: Option<&MigrationVersion>,
    ) -> MigrateResult<Vec<AppliedMigration>> {
        let lock = MigrationLock::with_staleness(self.db.as_ref(), self.lock_staleness_secs);
        if !lock.acquire().await? {
            return Err(MigrateError::LockHeld);
        }
        let result = self.rollback_locked(target).await;
        lock.release().await;
        result
    }

    async fn rollback_locked(
        &self,
        target: Option<&MigrationVersion>,
    ) -> MigrateResult<Vec<AppliedMigration>> {
        let status = self.status().await?;
        if status.applied.is_empty() {
            log::info!("No applied migrations to roll back");
            return Ok(Vec::new());
        }

        let mut to_undo: Vec<AppliedMigration> = match target {
            Some(target) => {
                if *target >= status.current {
                    return Err(MigrateError::RollbackTargetAhead {
                        target: target.to_string(),
                        current: status.current.to_string(),
                    });
                }
                status
                    .applied
                    .iter()
                    .filter(|a| a.version > *target)
                    .cloned()
                    .collect()
            }
            None => status
                .applied
                .iter()
                .max_by(|a, b| a.version.cmp(&b.version))
                .cloned()
                .into_iter()
                .collect(),
        };
        to_undo.sort_by(|a, b| b.version.cmp(&a.version));

        self.db.begin().await?;
        match self.undo_all(&to_undo).await {
            Ok(()) => {
                self.db.commit().await?;
                Ok(to_undo)
            }
            Err(e) => {
                if let Err(rb) = self.db.rollback_tx().await {
                    log::error!("Failed to roll back rollback transaction: {}", rb);
                }
                Err(e)
            }
        }
    }

    async fn undo_all(&self, to_undo: &[AppliedMigration]) -> MigrateResult<()> {
        let history = SchemaHistory::new(self.db.as_ref());

        for applied in to_undo {
            let content = self.loader.read_script_named(&applied.filename)?;
            let script = MigrationScript::parse(&content);
            let rollback_sql =
                script
                    .rollback
                    .as_deref()
                    .ok_or_else(|| MigrateError::MissingRollback {
                        version: applied.version.to_string(),
                        filename: applied.filename.clone(),
                    })?;

            log::info!(
                "Rolling back migration {} ({})",
                applied.version,
                applied.filename
            );
            self.db
                .execute_batch(rollback_sql)
                .await
                .map_err(|e| MigrateError::RollbackFailed {
                    version: applied.version.to_string(),
                    filename: applied.filename.clone(),
                    message: e.to_string(),
                })?;

            history.remove(&applied.version).await?;
        }

        Ok(())
    }

    /// Compare applied history against the scripts currently on disk.
    pub async fn detect_drift(&self) -> MigrateResult<Vec<DriftReport>> {
        let status = self.status().await?;
        let files = self.loader.load()?;

        let mut reports = Vec::new();
        for applied in &status.applied {
            let Some(file) = files.iter().find(|f| f.version == applied.version) else {
                reports.push(DriftReport {
                    version: applied.version.clone(),
                    filename: applied.filename.clone(),
                    drift: Drift::FileMissing,
                });
                continue;
            };

            let actual = compute_checksum(&self.loader.read_script(file)?);
            if actual != applied.checksum {
                reports.push(DriftReport {
                    version: applied.version.clone(),
                    filename: file.filename.clone(),
                    drift: Drift::ChecksumMismatch {
                        recorded: applied.checksum.clone(),
                        actual,
                    },
                });
            }
        }

        Ok(reports)
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
