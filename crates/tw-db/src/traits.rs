//! Database trait definition

use crate::error::DbResult;
use crate::value::Row;
use async_trait::async_trait;

/// Database abstraction trait for Trackway
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute SQL that modifies data, returns affected rows
    async fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute multiple SQL statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Execute a query and return all result rows
    async fn query(&self, sql: &str) -> DbResult<Vec<Row>>;

    /// Check if a table or view exists
    async fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;

    /// Open a transaction
    async fn begin(&self) -> DbResult<()> {
        self.execute_batch("BEGIN TRANSACTION;").await
    }

    /// Commit the open transaction
    async fn commit(&self) -> DbResult<()> {
        self.execute_batch("COMMIT;").await
    }

    /// Roll back the open transaction
    async fn rollback_tx(&self) -> DbResult<()> {
        self.execute_batch("ROLLBACK;").await
    }
}
