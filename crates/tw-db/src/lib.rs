//! tw-db - Database abstraction layer for Trackway
//!
//! This crate provides the `Database` trait and its DuckDB implementation.
//! The trait is the seam that lets the migration runner and health scorer
//! accept an explicitly constructed handle (in-memory for tests, file-backed
//! in production) instead of a process-wide singleton.

pub mod duckdb;
pub mod error;
pub mod traits;
pub mod value;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::Database;
pub use value::{Row, Value};
