use super::*;
use chrono::{Duration, TimeZone};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
}

fn bare_stats() -> ProjectStats {
    ProjectStats {
        project_id: "p1".to_string(),
        name: "Test project".to_string(),
        start_date: now() - Duration::days(10),
        due_date: now() + Duration::days(10),
        completed_milestones: 0,
        total_milestones: 0,
        output_count: 0,
        avg_time_allocated: 0.0,
        meeting_count_30d: 0,
        resource_count: 0,
        avg_resource_usage: 0.0,
        feedback_count: 0,
        avg_feedback_rating: 0.0,
    }
}

#[test]
fn test_empty_project_scores_zero_without_error() {
    let health = score(&bare_stats(), now());
    assert!(!health.components.milestones_on_track);
    assert_eq!(health.components.output_quality, 0);
    assert_eq!(health.components.meeting_frequency, 0);
    assert_eq!(health.components.resource_utilization, 0);
    assert_eq!(health.components.feedback_score, 0);
    assert_eq!(health.timeline, 0);
    assert_eq!(health.quality, 0);
    assert_eq!(health.risk, 0);
    assert_eq!(health.overall, 0);
}

#[test]
fn test_on_schedule_completion_scores_full_timeline() {
    // Halfway through the duration with half the milestones completed
    let stats = ProjectStats {
        completed_milestones: 2,
        total_milestones: 4,
        ..bare_stats()
    };
    let health = score(&stats, now());
    assert!(health.components.milestones_on_track);
    assert_eq!(health.timeline, 100);
}

#[test]
fn test_ahead_of_schedule_caps_at_full_timeline() {
    let stats = ProjectStats {
        completed_milestones: 4,
        total_milestones: 4,
        ..bare_stats()
    };
    let health = score(&stats, now());
    assert!(health.components.milestones_on_track);
    assert_eq!(health.timeline, 100);
}

#[test]
fn test_behind_schedule_scales_timeline() {
    // Three quarters elapsed with one quarter completed: pace = 1/3
    let stats = ProjectStats {
        start_date: now() - Duration::days(15),
        due_date: now() + Duration::days(5),
        completed_milestones: 1,
        total_milestones: 4,
        ..bare_stats()
    };
    let health = score(&stats, now());
    assert!(!health.components.milestones_on_track);
    assert_eq!(health.timeline, 33);
}

#[test]
fn test_fixed_weight_rollups() {
    // pace 100, output_quality 50, meetings 50, resources 50, feedback 80
    let stats = ProjectStats {
        completed_milestones: 2,
        total_milestones: 4,
        output_count: 2,
        avg_time_allocated: 4.0,
        meeting_count_30d: 2,
        resource_count: 1,
        avg_resource_usage: 5.0,
        feedback_count: 2,
        avg_feedback_rating: 4.0,
        ..bare_stats()
    };
    let health = score(&stats, now());
    assert_eq!(health.components.output_quality, 50);
    assert_eq!(health.components.meeting_frequency, 50);
    assert_eq!(health.components.resource_utilization, 50);
    assert_eq!(health.components.feedback_score, 80);
    assert_eq!(health.timeline, 100);
    // 0.6 * 50 + 0.4 * 80
    assert_eq!(health.quality, 62);
    // 0.4 * 100 + 0.3 * 50 + 0.3 * 50
    assert_eq!(health.risk, 70);
    // round((100 + 62 + 70) / 3)
    assert_eq!(health.overall, 77);
}

#[test]
fn test_components_cap_at_100() {
    let stats = ProjectStats {
        completed_milestones: 4,
        total_milestones: 4,
        output_count: 3,
        avg_time_allocated: 40.0,
        meeting_count_30d: 20,
        resource_count: 2,
        avg_resource_usage: 50.0,
        feedback_count: 5,
        avg_feedback_rating: 5.0,
        ..bare_stats()
    };
    let health = score(&stats, now());
    assert_eq!(health.components.output_quality, 100);
    assert_eq!(health.components.meeting_frequency, 100);
    assert_eq!(health.components.resource_utilization, 100);
    assert_eq!(health.components.feedback_score, 100);
    assert_eq!(health.overall, 100);
}

#[test]
fn test_overdue_project_expected_progress_clamps() {
    // Past the due date: expected progress is 1.0, not > 1
    let stats = ProjectStats {
        start_date: now() - Duration::days(30),
        due_date: now() - Duration::days(10),
        completed_milestones: 1,
        total_milestones: 2,
        ..bare_stats()
    };
    let health = score(&stats, now());
    assert!(!health.components.milestones_on_track);
    assert_eq!(health.timeline, 50);
}

#[test]
fn test_project_not_yet_started_is_on_track() {
    let stats = ProjectStats {
        start_date: now() + Duration::days(5),
        due_date: now() + Duration::days(25),
        completed_milestones: 0,
        total_milestones: 4,
        ..bare_stats()
    };
    let health = score(&stats, now());
    assert!(health.components.milestones_on_track);
    assert_eq!(health.timeline, 100);
}
