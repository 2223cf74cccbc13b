//! Schema history persistence.
//!
//! `schema_history` records one row per applied migration. The table is the
//! source of truth for what has run: `status` diffs it against the files on
//! disk, `rollback` deletes from it as sections execute.

use chrono::{DateTime, Utc};
use tw_core::{escape_sql_string, AppliedMigration, MigrationFile, MigrationVersion};
use tw_db::{Database, Row, Value};

use crate::error::{MigrateError, MigrateResult};

/// Accessor for the `schema_history` table.
pub struct SchemaHistory<'a> {
    db: &'a dyn Database,
}

impl<'a> SchemaHistory<'a> {
    pub fn new(db: &'a dyn Database) -> Self {
        Self { db }
    }

    /// Create the history table if it does not exist.
    pub async fn ensure(&self) -> MigrateResult<()> {
        self.db
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS schema_history (
                    version TEXT NOT NULL,
                    description TEXT,
                    script_name TEXT NOT NULL,
                    checksum TEXT NOT NULL,
                    applied_at TIMESTAMP NOT NULL
                );",
            )
            .await?;
        Ok(())
    }

    /// All applied migrations, most recent first.
    pub async fn applied(&self) -> MigrateResult<Vec<AppliedMigration>> {
        let rows = self
            .db
            .query(
                "SELECT version, description, script_name, checksum, applied_at
                 FROM schema_history
                 ORDER BY applied_at DESC",
            )
            .await?;

        rows.iter().map(decode_row).collect()
    }

    /// Record a migration as applied.
    pub async fn record(
        &self,
        migration: &MigrationFile,
        checksum: &str,
        applied_at: DateTime<Utc>,
    ) -> MigrateResult<()> {
        let sql = format!(
            "INSERT INTO schema_history (version, description, script_name, checksum, applied_at)
             VALUES ('{}', '{}', '{}', '{}', TIMESTAMP '{}')",
            escape_sql_string(migration.version.as_str()),
            escape_sql_string(&migration.description),
            escape_sql_string(&migration.filename),
            escape_sql_string(checksum),
            applied_at.format("%Y-%m-%d %H:%M:%S%.6f"),
        );
        self.db.execute(&sql).await?;
        Ok(())
    }

    /// Remove a migration's history row after a successful rollback.
    pub async fn remove(&self, version: &MigrationVersion) -> MigrateResult<()> {
        let sql = format!(
            "DELETE FROM schema_history WHERE version = '{}'",
            escape_sql_string(version.as_str())
        );
        self.db.execute(&sql).await?;
        Ok(())
    }
}

fn decode_row(row: &Row) -> MigrateResult<AppliedMigration> {
    if row.len() != 5 {
        return Err(MigrateError::HistoryCorrupt(format!(
            "expected 5 columns, got {}",
            row.len()
        )));
    }

    let text = |value: &Value, column: &str| -> MigrateResult<String> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| MigrateError::HistoryCorrupt(format!("non-text {} column", column)))
    };

    let version = MigrationVersion::parse(&text(&row[0], "version")?)
        .map_err(|e| MigrateError::HistoryCorrupt(e.to_string()))?;
    let description = text(&row[1], "description")?;
    let filename = text(&row[2], "script_name")?;
    let checksum = text(&row[3], "checksum")?;
    let applied_at = row[4]
        .as_timestamp()
        .ok_or_else(|| MigrateError::HistoryCorrupt("non-timestamp applied_at column".to_string()))?;

    Ok(AppliedMigration {
        version,
        description,
        filename,
        checksum,
        applied_at,
    })
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
