//! tw-core - Core library for Trackway
//!
//! This crate provides the shared types used across all Trackway components:
//! project configuration, migration version and record types, checksums,
//! and SQL string escaping.

pub mod checksum;
pub mod config;
pub mod error;
pub mod migration;
pub mod sql_utils;
pub mod version;

pub use checksum::compute_checksum;
pub use config::{Config, DatabaseConfig, TargetConfig};
pub use error::{CoreError, CoreResult};
pub use migration::{AppliedMigration, MigrationFile, MigrationStatus};
pub use sql_utils::escape_sql_string;
pub use version::MigrationVersion;
