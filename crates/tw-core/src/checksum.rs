//! SHA-256 checksum utility for migration drift detection.
//!
//! Checksums are computed over whitespace-normalized content so that
//! reformatting a script (indentation, line endings) does not register
//! as drift. They are never used to skip re-application.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 checksum of a migration script.
///
/// Runs of whitespace are collapsed to a single space and the content is
/// trimmed before hashing.
pub fn compute_checksum(content: &str) -> String {
    let normalized = content.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)
}
