//! tw-health - Project health scoring for Trackway
//!
//! Splits scoring into two halves: `stats` gathers a project's aggregated
//! row-state with plain read-only queries, `score` turns that state into a
//! 0-100 health snapshot with fixed-weight arithmetic. Scores are computed
//! fresh on every request and never persisted.

pub mod error;
pub mod model;
pub mod score;
pub mod stats;

pub use error::{HealthError, HealthResult};
pub use model::{HealthComponents, HealthScore, ProjectStats};
pub use score::score;
pub use stats::gather;

use chrono::{DateTime, Utc};
use tw_db::Database;

/// Gather and score a project's health in one call.
pub async fn calculate_health(
    db: &dyn Database,
    project_id: &str,
    now: DateTime<Utc>,
) -> HealthResult<HealthScore> {
    let stats = gather(db, project_id, now).await?;
    Ok(score(&stats, now))
}
