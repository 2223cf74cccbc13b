//! Health scoring data shapes.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Aggregated row-state for one project, as read by the stats queries.
///
/// Averages are 0 when the underlying set is empty; the scorer treats an
/// empty set and a zero average identically.
#[derive(Debug, Clone)]
pub struct ProjectStats {
    pub project_id: String,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub completed_milestones: u64,
    pub total_milestones: u64,
    pub output_count: u64,
    /// Average hours allocated per output, 0 with no outputs
    pub avg_time_allocated: f64,
    /// Meetings within the trailing 30-day window
    pub meeting_count_30d: u64,
    pub resource_count: u64,
    /// Average usage count per resource, 0 with no resources
    pub avg_resource_usage: f64,
    pub feedback_count: u64,
    /// Average rating on a 1-5 scale, 0 with no feedback
    pub avg_feedback_rating: f64,
}

/// Per-signal component scores, each 0-100 except the on-track flag.
#[derive(Debug, Clone, Serialize)]
pub struct HealthComponents {
    pub milestones_on_track: bool,
    pub output_quality: u8,
    pub meeting_frequency: u8,
    pub resource_utilization: u8,
    pub feedback_score: u8,
}

/// Derived health snapshot. Computed fresh on every request, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct HealthScore {
    pub overall: u8,
    pub timeline: u8,
    pub quality: u8,
    pub risk: u8,
    pub components: HealthComponents,
}
