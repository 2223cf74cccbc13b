//! Migration version value type.
//!
//! Versions are validated once, at the boundary where filenames are parsed,
//! instead of carrying stringly-typed version tokens through the runner.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{CoreError, CoreResult};

/// A dotted-integer migration version (`major[.minor[.patch]]`).
///
/// Comparison is purely numeric and component-wise: `1.9.0 < 1.10.0`, and
/// missing components count as zero so `1.0` equals `1.0.0`. The original
/// string is preserved for display and storage and never coerced.
#[derive(Debug, Clone)]
pub struct MigrationVersion {
    raw: String,
    parts: [u64; 3],
}

impl MigrationVersion {
    /// Parse a version string, rejecting non-numeric or extra components.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(CoreError::InvalidVersion {
                version: s.to_string(),
                reason: "empty version".to_string(),
            });
        }

        let components: Vec<&str> = raw.split('.').collect();
        if components.len() > 3 {
            return Err(CoreError::InvalidVersion {
                version: raw.to_string(),
                reason: format!("expected at most 3 components, found {}", components.len()),
            });
        }

        let mut parts = [0u64; 3];
        for (i, component) in components.iter().enumerate() {
            parts[i] = component
                .parse::<u64>()
                .map_err(|_| CoreError::InvalidVersion {
                    version: raw.to_string(),
                    reason: format!("non-numeric component '{}'", component),
                })?;
        }

        Ok(Self {
            raw: raw.to_string(),
            parts,
        })
    }

    /// The `0.0.0` sentinel used when the schema history is empty.
    pub fn zero() -> Self {
        Self {
            raw: "0.0.0".to_string(),
            parts: [0, 0, 0],
        }
    }

    /// Return the version as originally written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Numeric `(major, minor, patch)` components.
    pub fn parts(&self) -> (u64, u64, u64) {
        (self.parts[0], self.parts[1], self.parts[2])
    }
}

impl fmt::Display for MigrationVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// Equality and ordering intentionally ignore the raw string: "1.0" and
// "1.0.0" are the same version.
impl PartialEq for MigrationVersion {
    fn eq(&self, other: &Self) -> bool {
        self.parts == other.parts
    }
}

impl Eq for MigrationVersion {}

impl Hash for MigrationVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.parts.hash(state);
    }
}

impl PartialOrd for MigrationVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MigrationVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parts.cmp(&other.parts)
    }
}

impl Serialize for MigrationVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for MigrationVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        MigrationVersion::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
