//! Advisory migration lock.
//!
//! A singleton row in `migration_locks` keeps at most one `migrate`/`rollback`
//! run in flight per deployment, across process instances. Acquisition is
//! non-blocking: callers that need retries re-invoke `acquire` themselves.
//! A lock older than the staleness threshold is treated as abandoned and may
//! be forcibly reacquired, trading strict mutual exclusion for availability
//! when a holder crashes mid-run.

use tw_core::escape_sql_string;
use tw_db::{Database, DbResult};
use uuid::Uuid;

use crate::error::{MigrateError, MigrateResult};

const LOCK_ID: i64 = 1;

/// Default staleness threshold in seconds.
pub const DEFAULT_STALE_AFTER_SECS: u64 = 5;

/// Row-based advisory lock guarding migration runs.
pub struct MigrationLock<'a> {
    db: &'a dyn Database,
    holder: String,
    stale_after_secs: u64,
}

impl<'a> MigrationLock<'a> {
    /// Create a lock handle with a fresh holder identity.
    pub fn new(db: &'a dyn Database) -> Self {
        Self::with_staleness(db, DEFAULT_STALE_AFTER_SECS)
    }

    /// Create a lock handle with a custom staleness threshold.
    pub fn with_staleness(db: &'a dyn Database, stale_after_secs: u64) -> Self {
        Self {
            db,
            holder: Uuid::new_v4().to_string(),
            stale_after_secs,
        }
    }

    /// Opaque identity written to `locked_by` while this handle holds the lock.
    pub fn holder(&self) -> &str {
        &self.holder
    }

    /// Attempt to take the lock without blocking.
    ///
    /// Returns `true` when the row was unlocked or stale. Storage failures
    /// surface as `LockFailed` and must abort the run.
    pub async fn acquire(&self) -> MigrateResult<bool> {
        self.try_acquire()
            .await
            .map_err(|e| MigrateError::LockFailed(e.to_string()))
    }

    async fn try_acquire(&self) -> DbResult<bool> {
        // Lazily create the lock table and its singleton row
        self.db
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS migration_locks (
                    id INTEGER PRIMARY KEY,
                    locked BOOLEAN DEFAULT false,
                    locked_at TIMESTAMP,
                    locked_by TEXT
                );",
            )
            .await?;
        self.db
            .execute(&format!(
                "INSERT INTO migration_locks (id, locked) VALUES ({}, false) ON CONFLICT (id) DO NOTHING",
                LOCK_ID
            ))
            .await?;

        let sql = format!(
            "UPDATE migration_locks
             SET locked = true, locked_at = CURRENT_TIMESTAMP, locked_by = '{holder}'
             WHERE id = {id}
               AND (locked = false
                    OR locked_at IS NULL
                    OR locked_at < CAST(CURRENT_TIMESTAMP AS TIMESTAMP) - INTERVAL 1 SECOND * {stale})",
            holder = escape_sql_string(&self.holder),
            id = LOCK_ID,
            stale = self.stale_after_secs,
        );

        let updated = self.db.execute(&sql).await?;
        Ok(updated > 0)
    }

    /// Release the lock if this handle still holds it.
    ///
    /// Releasing is best-effort: a lock stolen after going stale or already
    /// released is logged, and storage errors are logged and swallowed so
    /// they never mask the outcome of the run itself.
    pub async fn release(&self) {
        match self.try_release().await {
            Ok(true) => {}
            Ok(false) => {
                log::warn!(
                    "Migration lock was not held by {} at release time",
                    self.holder
                );
            }
            Err(e) => {
                log::error!("Error releasing migration lock: {}", e);
            }
        }
    }

    async fn try_release(&self) -> DbResult<bool> {
        let sql = format!(
            "UPDATE migration_locks
             SET locked = false, locked_at = NULL, locked_by = NULL
             WHERE id = {id} AND locked = true AND locked_by = '{holder}'",
            id = LOCK_ID,
            holder = escape_sql_string(&self.holder),
        );
        let updated = self.db.execute(&sql).await?;
        Ok(updated > 0)
    }
}

#[cfg(test)]
#[path = "lock_test.rs"]
mod tests;
