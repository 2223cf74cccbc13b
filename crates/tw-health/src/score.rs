//! Pure fixed-weight health scoring.
//!
//! Each signal becomes a 0-100 raw value; rollups combine raw values and
//! round once at the point of combination. Empty signal sets (no milestones,
//! outputs, resources or feedback) score 0 rather than dividing by zero.
//!
//! Weights:
//!   quality = 0.6 * output_quality + 0.4 * feedback_score
//!   risk    = 0.4 * milestone_pace + 0.3 * meeting_frequency
//!           + 0.3 * resource_utilization
//!   overall = mean(timeline, quality, risk)

use chrono::{DateTime, Utc};

use crate::model::{HealthComponents, HealthScore, ProjectStats};

/// Average hours per output that counts as full quality.
const TARGET_AVG_OUTPUT_HOURS: f64 = 8.0;

/// Meetings per trailing 30-day window that counts as full cadence.
const TARGET_MEETINGS_PER_WINDOW: f64 = 4.0;

/// Average uses per resource that counts as full utilization.
const TARGET_AVG_RESOURCE_USES: f64 = 10.0;

/// Score a project's aggregated row-state at a point in time.
pub fn score(stats: &ProjectStats, now: DateTime<Utc>) -> HealthScore {
    let expected_progress = expected_progress(stats.start_date, stats.due_date, now);
    let actual_progress = if stats.total_milestones == 0 {
        0.0
    } else {
        stats.completed_milestones as f64 / stats.total_milestones as f64
    };
    let milestones_on_track = actual_progress >= expected_progress;

    // On or ahead of schedule pegs the pace at 100
    let milestone_pace = if expected_progress <= 0.0 || milestones_on_track {
        100.0
    } else {
        (actual_progress / expected_progress * 100.0).min(100.0)
    };

    let output_quality = if stats.output_count == 0 {
        0.0
    } else {
        (stats.avg_time_allocated / TARGET_AVG_OUTPUT_HOURS * 100.0).clamp(0.0, 100.0)
    };

    let meeting_frequency =
        (stats.meeting_count_30d as f64 / TARGET_MEETINGS_PER_WINDOW * 100.0).min(100.0);

    let resource_utilization = if stats.resource_count == 0 {
        0.0
    } else {
        (stats.avg_resource_usage / TARGET_AVG_RESOURCE_USES * 100.0).clamp(0.0, 100.0)
    };

    let feedback_score = if stats.feedback_count == 0 {
        0.0
    } else {
        (stats.avg_feedback_rating / 5.0 * 100.0).clamp(0.0, 100.0)
    };

    let timeline = milestone_pace;
    let quality = 0.6 * output_quality + 0.4 * feedback_score;
    let risk = 0.4 * milestone_pace + 0.3 * meeting_frequency + 0.3 * resource_utilization;
    let overall = (timeline + quality + risk) / 3.0;

    HealthScore {
        overall: round_pct(overall),
        timeline: round_pct(timeline),
        quality: round_pct(quality),
        risk: round_pct(risk),
        components: HealthComponents {
            milestones_on_track,
            output_quality: round_pct(output_quality),
            meeting_frequency: round_pct(meeting_frequency),
            resource_utilization: round_pct(resource_utilization),
            feedback_score: round_pct(feedback_score),
        },
    }
}

/// Fraction of the project duration that has elapsed, clamped to [0, 1].
///
/// A due date at or before the start date counts as fully elapsed.
fn expected_progress(start: DateTime<Utc>, due: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let total_secs = (due - start).num_seconds();
    if total_secs <= 0 {
        return 1.0;
    }
    let elapsed_secs = (now - start).num_seconds();
    (elapsed_secs as f64 / total_secs as f64).clamp(0.0, 1.0)
}

fn round_pct(value: f64) -> u8 {
    value.clamp(0.0, 100.0).round() as u8
}

#[cfg(test)]
#[path = "score_test.rs"]
mod tests;
