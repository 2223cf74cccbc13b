//! tw-migrate - Schema migration runner for Trackway
//!
//! Applies versioned SQL scripts from a migrations directory against the
//! database, recording each success in the schema history table. A row-based
//! advisory lock keeps concurrent runner instances (e.g. multiple replicas
//! booting at once) from migrating simultaneously. Every `migrate` and
//! `rollback` call runs inside a single transaction: the batch either fully
//! succeeds or leaves the schema untouched.

pub mod error;
pub mod loader;
pub mod lock;
pub mod runner;
pub mod script;
pub mod store;

pub use error::{MigrateError, MigrateResult};
pub use loader::MigrationLoader;
pub use lock::MigrationLock;
pub use runner::{Drift, DriftReport, MigrateOptions, MigrationRunner};
pub use script::MigrationScript;
pub use store::SchemaHistory;
