//! CLI command implementations

pub(crate) mod health;
pub(crate) mod init;
pub(crate) mod migrate;
pub(crate) mod rollback;
pub(crate) mod status;
