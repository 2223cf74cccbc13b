//! Stats gathering for the health scorer.
//!
//! Plain aggregate queries over the project-tracking tables. Read-only and
//! lock-free: concurrent scoring runs are independent.

use chrono::{DateTime, Utc};
use tw_core::escape_sql_string;
use tw_db::{Database, Row, Value};

use crate::error::{HealthError, HealthResult};
use crate::model::ProjectStats;

/// Gather a project's aggregated row-state.
///
/// `now` anchors the trailing 30-day meeting window so results are
/// reproducible under test.
pub async fn gather(
    db: &dyn Database,
    project_id: &str,
    now: DateTime<Utc>,
) -> HealthResult<ProjectStats> {
    let id = escape_sql_string(project_id);

    let project_rows = db
        .query(&format!(
            "SELECT name, start_date, due_date FROM projects WHERE project_id = '{id}'"
        ))
        .await?;
    let project = project_rows
        .first()
        .ok_or_else(|| HealthError::ProjectNotFound {
            id: project_id.to_string(),
        })?;
    let name = text(project, 0, "projects.name")?;
    let start_date = timestamp(project, 1, "projects.start_date")?;
    let due_date = timestamp(project, 2, "projects.due_date")?;

    let milestones = one_row(
        db.query(&format!(
            "SELECT COUNT(*),
                    COUNT(CASE WHEN status = 'completed' THEN 1 END)
             FROM milestones WHERE project_id = '{id}'"
        ))
        .await?,
        "milestones",
    )?;
    let total_milestones = count(&milestones, 0, "milestones.total")?;
    let completed_milestones = count(&milestones, 1, "milestones.completed")?;

    let outputs = one_row(
        db.query(&format!(
            "SELECT COUNT(*),
                    COALESCE(AVG(CAST(time_allocated AS DOUBLE)), 0)
             FROM outputs WHERE project_id = '{id}'"
        ))
        .await?,
        "outputs",
    )?;
    let output_count = count(&outputs, 0, "outputs.count")?;
    let avg_time_allocated = float(&outputs, 1, "outputs.avg_time_allocated")?;

    let meetings = one_row(
        db.query(&format!(
            "SELECT COUNT(*) FROM meetings
             WHERE project_id = '{id}'
               AND date_time > TIMESTAMP '{now}' - INTERVAL 30 DAY",
            now = now.format("%Y-%m-%d %H:%M:%S%.6f"),
        ))
        .await?,
        "meetings",
    )?;
    let meeting_count_30d = count(&meetings, 0, "meetings.count")?;

    let resources = one_row(
        db.query(&format!(
            "SELECT COUNT(*),
                    COALESCE(AVG(CAST(usage_count AS DOUBLE)), 0)
             FROM resources WHERE project_id = '{id}'"
        ))
        .await?,
        "resources",
    )?;
    let resource_count = count(&resources, 0, "resources.count")?;
    let avg_resource_usage = float(&resources, 1, "resources.avg_usage")?;

    let feedback = one_row(
        db.query(&format!(
            "SELECT COUNT(*),
                    COALESCE(AVG(CAST(rating AS DOUBLE)), 0)
             FROM feedback WHERE project_id = '{id}'"
        ))
        .await?,
        "feedback",
    )?;
    let feedback_count = count(&feedback, 0, "feedback.count")?;
    let avg_feedback_rating = float(&feedback, 1, "feedback.avg_rating")?;

    log::debug!(
        "Gathered stats for project {}: {}/{} milestones, {} outputs, {} meetings/30d",
        project_id,
        completed_milestones,
        total_milestones,
        output_count,
        meeting_count_30d
    );

    Ok(ProjectStats {
        project_id: project_id.to_string(),
        name,
        start_date,
        due_date,
        completed_milestones,
        total_milestones,
        output_count,
        avg_time_allocated,
        meeting_count_30d,
        resource_count,
        avg_resource_usage,
        feedback_count,
        avg_feedback_rating,
    })
}

fn one_row(rows: Vec<Row>, table: &str) -> HealthResult<Row> {
    rows.into_iter()
        .next()
        .ok_or_else(|| HealthError::BadStatsRow(format!("empty aggregate result for {}", table)))
}

fn value<'a>(row: &'a Row, index: usize, column: &str) -> HealthResult<&'a Value> {
    row.get(index)
        .ok_or_else(|| HealthError::BadStatsRow(format!("missing column {}", column)))
}

fn text(row: &Row, index: usize, column: &str) -> HealthResult<String> {
    value(row, index, column)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| HealthError::BadStatsRow(format!("non-text column {}", column)))
}

fn timestamp(row: &Row, index: usize, column: &str) -> HealthResult<DateTime<Utc>> {
    value(row, index, column)?
        .as_timestamp()
        .ok_or_else(|| HealthError::BadStatsRow(format!("non-timestamp column {}", column)))
}

fn count(row: &Row, index: usize, column: &str) -> HealthResult<u64> {
    let n = value(row, index, column)?
        .as_i64()
        .ok_or_else(|| HealthError::BadStatsRow(format!("non-integer column {}", column)))?;
    u64::try_from(n).map_err(|_| HealthError::BadStatsRow(format!("negative count in {}", column)))
}

fn float(row: &Row, index: usize, column: &str) -> HealthResult<f64> {
    value(row, index, column)?
        .as_f64()
        .ok_or_else(|| HealthError::BadStatsRow(format!("non-numeric column {}", column)))
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod tests;
