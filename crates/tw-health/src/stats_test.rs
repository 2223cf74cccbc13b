use super::*;
use crate::calculate_health;
use chrono::TimeZone;
use tw_db::DuckDbBackend;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
}

async fn seeded_db() -> DuckDbBackend {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(
        "CREATE TABLE projects (
            project_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            start_date TIMESTAMP NOT NULL,
            due_date TIMESTAMP NOT NULL
        );
        CREATE TABLE milestones (project_id TEXT NOT NULL, title TEXT, status TEXT NOT NULL);
        CREATE TABLE outputs (project_id TEXT NOT NULL, title TEXT, time_allocated DOUBLE);
        CREATE TABLE meetings (project_id TEXT NOT NULL, date_time TIMESTAMP NOT NULL);
        CREATE TABLE resources (project_id TEXT NOT NULL, name TEXT, usage_count INTEGER);
        CREATE TABLE feedback (project_id TEXT NOT NULL, rating INTEGER);",
    )
    .await
    .unwrap();
    db
}

#[tokio::test]
async fn test_unknown_project_is_an_error() {
    let db = seeded_db().await;
    let err = gather(&db, "nope", now()).await.unwrap_err();
    assert!(matches!(err, HealthError::ProjectNotFound { .. }));
}

#[tokio::test]
async fn test_gather_aggregates_project_rows() {
    let db = seeded_db().await;
    db.execute_batch(
        "INSERT INTO projects VALUES
            ('p1', 'Apollo', TIMESTAMP '2026-06-05 12:00:00', TIMESTAMP '2026-06-25 12:00:00');
        INSERT INTO milestones VALUES
            ('p1', 'design', 'completed'),
            ('p1', 'build', 'completed'),
            ('p1', 'test', 'in_progress'),
            ('p1', 'ship', 'pending');
        INSERT INTO outputs VALUES ('p1', 'report', 3.0), ('p1', 'demo', 5.0);
        INSERT INTO meetings VALUES
            ('p1', TIMESTAMP '2026-06-10 09:00:00'),
            ('p1', TIMESTAMP '2026-06-14 09:00:00'),
            ('p1', TIMESTAMP '2026-04-01 09:00:00');
        INSERT INTO resources VALUES ('p1', 'board', 5);
        INSERT INTO feedback VALUES ('p1', 4), ('p1', 4);",
    )
    .await
    .unwrap();

    let stats = gather(&db, "p1", now()).await.unwrap();
    assert_eq!(stats.name, "Apollo");
    assert_eq!(stats.total_milestones, 4);
    assert_eq!(stats.completed_milestones, 2);
    assert_eq!(stats.output_count, 2);
    assert_eq!(stats.avg_time_allocated, 4.0);
    // The April meeting is outside the trailing 30-day window
    assert_eq!(stats.meeting_count_30d, 2);
    assert_eq!(stats.resource_count, 1);
    assert_eq!(stats.avg_resource_usage, 5.0);
    assert_eq!(stats.feedback_count, 2);
    assert_eq!(stats.avg_feedback_rating, 4.0);
}

#[tokio::test]
async fn test_gather_with_no_child_rows() {
    let db = seeded_db().await;
    db.execute_batch(
        "INSERT INTO projects VALUES
            ('p1', 'Bare', TIMESTAMP '2026-06-05 12:00:00', TIMESTAMP '2026-06-25 12:00:00');",
    )
    .await
    .unwrap();

    let stats = gather(&db, "p1", now()).await.unwrap();
    assert_eq!(stats.total_milestones, 0);
    assert_eq!(stats.output_count, 0);
    assert_eq!(stats.avg_time_allocated, 0.0);
    assert_eq!(stats.meeting_count_30d, 0);
    assert_eq!(stats.feedback_count, 0);
}

#[tokio::test]
async fn test_calculate_health_end_to_end() {
    let db = seeded_db().await;
    // Halfway through with half the milestones done: timeline 100
    db.execute_batch(
        "INSERT INTO projects VALUES
            ('p1', 'Apollo', TIMESTAMP '2026-06-05 12:00:00', TIMESTAMP '2026-06-25 12:00:00');
        INSERT INTO milestones VALUES
            ('p1', 'design', 'completed'),
            ('p1', 'build', 'completed'),
            ('p1', 'test', 'pending'),
            ('p1', 'ship', 'pending');
        INSERT INTO outputs VALUES ('p1', 'report', 4.0), ('p1', 'demo', 4.0);
        INSERT INTO meetings VALUES
            ('p1', TIMESTAMP '2026-06-10 09:00:00'),
            ('p1', TIMESTAMP '2026-06-14 09:00:00');
        INSERT INTO resources VALUES ('p1', 'board', 5);
        INSERT INTO feedback VALUES ('p1', 4), ('p1', 4);",
    )
    .await
    .unwrap();

    let health = calculate_health(&db, "p1", now()).await.unwrap();
    assert!(health.components.milestones_on_track);
    assert_eq!(health.timeline, 100);
    assert_eq!(health.components.output_quality, 50);
    assert_eq!(health.components.meeting_frequency, 50);
    assert_eq!(health.components.resource_utilization, 50);
    assert_eq!(health.components.feedback_score, 80);
    assert_eq!(health.quality, 62);
    assert_eq!(health.risk, 70);
    assert_eq!(health.overall, 77);

    let empty = calculate_health(&db, "missing", now()).await;
    assert!(matches!(empty, Err(HealthError::ProjectNotFound { .. })));
}
