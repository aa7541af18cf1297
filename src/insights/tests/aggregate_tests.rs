//! Tests for the report aggregation algorithm.

use crate::insights::domain::{
    PeakTime, PlanningAccuracy, ReportWindow, TOP_GOAL_SLICES, WindowTask, build_report,
};
use crate::planner::domain::DueDate;
use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};

fn date(value: &str) -> DueDate {
    DueDate::parse(value).expect("valid date")
}

fn completed_at(hour: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2024, 6, 3, hour, 15, 0).single()
}

/// Open task due on the given date.
fn open_task(due: &str) -> WindowTask {
    WindowTask {
        due_date: date(due),
        completed: false,
        completed_at: None,
        goal_title: None,
        estimated_minutes: 60,
        actual_minutes: 0,
    }
}

/// Completed task due on the given date, finished at the given hour.
fn done_task(due: &str, hour: u32) -> WindowTask {
    WindowTask {
        completed: true,
        completed_at: completed_at(hour),
        ..open_task(due)
    }
}

/// Week of 2024-06-03 (Mon) to 2024-06-09 (Sun).
#[fixture]
fn week() -> ReportWindow {
    ReportWindow::week_containing(date("2024-06-05"))
}

#[rstest]
fn score_rounds_the_completion_ratio(week: ReportWindow) {
    let mut tasks: Vec<WindowTask> = (0..6).map(|_| done_task("2024-06-03", 9)).collect();
    tasks.extend((0..4).map(|_| open_task("2024-06-04")));

    let report = build_report(&tasks, &week);

    assert_eq!(report.total, 10);
    assert_eq!(report.completed, 6);
    assert_eq!(report.score, 60);
}

#[rstest]
fn empty_window_degrades_to_neutral_defaults(week: ReportWindow) {
    let report = build_report(&[], &week);

    assert_eq!(report.total, 0);
    assert_eq!(report.completed, 0);
    assert_eq!(report.score, 0);
    assert_eq!(report.activity_by_day.len(), 7);
    assert!(report.activity_by_day.iter().all(|bucket| bucket.total == 0));
    assert!(report.goal_breakdown.is_empty());
    assert_eq!(report.focus_minutes, 0);
    assert_eq!(report.peak_time, PeakTime::Unknown);
    assert_eq!(report.planning_accuracy, PlanningAccuracy::Calibrated);
    assert_eq!(report.flow.total(), 0);
}

#[rstest]
fn week_buckets_carry_day_labels_and_dates(week: ReportWindow) {
    let report = build_report(&[], &week);

    let labels: Vec<&str> = report
        .activity_by_day
        .iter()
        .map(|bucket| bucket.label.as_str())
        .collect();
    assert_eq!(labels, vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
    assert_eq!(report.activity_by_day[0].date, date("2024-06-03"));
    assert_eq!(report.activity_by_day[6].date, date("2024-06-09"));
}

#[rstest]
fn month_windows_bucket_every_calendar_day() {
    let june = ReportWindow::month_containing(date("2024-06-15"));
    let report = build_report(&[], &june);

    assert_eq!(report.activity_by_day.len(), 30);
    assert_eq!(report.activity_by_day[0].label, "1");
    assert_eq!(report.activity_by_day[29].label, "30");
}

#[rstest]
fn tasks_land_in_their_day_bucket(week: ReportWindow) {
    let tasks = vec![
        done_task("2024-06-04", 9),
        open_task("2024-06-04"),
        open_task("2024-06-07"),
    ];

    let report = build_report(&tasks, &week);

    let tuesday = &report.activity_by_day[1];
    assert_eq!((tuesday.total, tuesday.completed), (2, 1));
    let friday = &report.activity_by_day[4];
    assert_eq!((friday.total, friday.completed), (1, 0));
    assert_eq!(report.activity_by_day[0].total, 0);
}

#[rstest]
fn day_bucket_sums_reproduce_the_window_totals(week: ReportWindow) {
    let tasks = vec![
        done_task("2024-06-03", 8),
        done_task("2024-06-05", 13),
        open_task("2024-06-05"),
        open_task("2024-06-09"),
    ];

    let report = build_report(&tasks, &week);

    let bucket_total: u32 = report.activity_by_day.iter().map(|bucket| bucket.total).sum();
    let bucket_completed: u32 = report
        .activity_by_day
        .iter()
        .map(|bucket| bucket.completed)
        .sum();
    assert_eq!(bucket_total, report.total);
    assert_eq!(bucket_completed, report.completed);
}

#[rstest]
fn goalless_tasks_roll_up_under_uncategorized(week: ReportWindow) {
    let mut with_goal = done_task("2024-06-03", 9);
    with_goal.goal_title = Some("Health".to_owned());
    let tasks = vec![with_goal, open_task("2024-06-04"), open_task("2024-06-05")];

    let report = build_report(&tasks, &week);

    let group_total: u32 = report.goal_breakdown.iter().map(|slice| slice.total).sum();
    assert_eq!(group_total, report.total);

    let uncategorized = report
        .goal_breakdown
        .iter()
        .find(|slice| slice.goal == "Uncategorized")
        .expect("goalless bucket present");
    assert_eq!(uncategorized.total, 2);
}

#[rstest]
fn goal_breakdown_sorts_descending_with_stable_ties(week: ReportWindow) {
    let mut tasks = Vec::new();
    for _ in 0..3 {
        let mut task = open_task("2024-06-03");
        task.goal_title = Some("Big".to_owned());
        tasks.push(task);
    }
    let mut first_tie = open_task("2024-06-04");
    first_tie.goal_title = Some("TieA".to_owned());
    tasks.push(first_tie);
    let mut second_tie = open_task("2024-06-04");
    second_tie.goal_title = Some("TieB".to_owned());
    tasks.push(second_tie);

    let report = build_report(&tasks, &week);

    let order: Vec<&str> = report
        .goal_breakdown
        .iter()
        .map(|slice| slice.goal.as_str())
        .collect();
    assert_eq!(order, vec!["Big", "TieA", "TieB"]);
}

#[rstest]
fn only_the_top_four_groups_are_surfaced(week: ReportWindow) {
    let mut tasks = Vec::new();
    for goal in ["A", "B", "C", "D", "E"] {
        let mut task = open_task("2024-06-03");
        task.goal_title = Some(goal.to_owned());
        tasks.push(task);
    }

    let report = build_report(&tasks, &week);

    assert_eq!(report.goal_breakdown.len(), 5);
    assert_eq!(report.top_goal_slices().len(), TOP_GOAL_SLICES);
}

#[rstest]
fn flow_counts_cross_tabulate_and_sum_to_total(week: ReportWindow) {
    let mut planned_done = done_task("2024-06-03", 9);
    planned_done.goal_title = Some("Health".to_owned());
    let mut planned_open = open_task("2024-06-04");
    planned_open.goal_title = Some("Health".to_owned());
    let tasks = vec![
        planned_done,
        planned_open,
        done_task("2024-06-05", 14),
        open_task("2024-06-06"),
    ];

    let report = build_report(&tasks, &week);

    assert_eq!(report.flow.planned_completed, 1);
    assert_eq!(report.flow.planned_rolled, 1);
    assert_eq!(report.flow.adhoc_completed, 1);
    assert_eq!(report.flow.adhoc_rolled, 1);
    assert_eq!(report.flow.total(), report.total);
}

#[rstest]
fn focus_minutes_sum_and_convert_to_hours(week: ReportWindow) {
    let mut first = done_task("2024-06-03", 9);
    first.actual_minutes = 60;
    let mut second = open_task("2024-06-04");
    second.actual_minutes = 40;

    let report = build_report(&[first, second], &week);

    assert_eq!(report.focus_minutes, 100);
    assert!((report.focus_hours() - 1.7).abs() < f64::EPSILON);
}

#[rstest]
fn peak_time_follows_the_majority_of_completions(week: ReportWindow) {
    let tasks = vec![
        done_task("2024-06-03", 8),
        done_task("2024-06-04", 9),
        done_task("2024-06-05", 19),
    ];

    let report = build_report(&tasks, &week);

    assert_eq!(report.peak_time, PeakTime::Morning);
    assert_eq!(report.peak_time.label(), "Morning worker");
}

#[rstest]
fn peak_time_ties_resolve_in_day_order(week: ReportWindow) {
    let tasks = vec![done_task("2024-06-03", 9), done_task("2024-06-04", 19)];

    let report = build_report(&tasks, &week);

    assert_eq!(report.peak_time, PeakTime::Morning);
}

#[rstest]
fn late_night_completions_read_as_night_owl(week: ReportWindow) {
    let tasks = vec![done_task("2024-06-03", 23), done_task("2024-06-04", 2)];

    let report = build_report(&tasks, &week);

    assert_eq!(report.peak_time, PeakTime::Night);
    assert_eq!(report.peak_time.label(), "Night owl");
}

#[rstest]
fn planning_accuracy_classifies_the_mean_deviation(week: ReportWindow) {
    let mut underestimated = done_task("2024-06-03", 9);
    underestimated.estimated_minutes = 30;
    underestimated.actual_minutes = 90;

    let report = build_report(&[underestimated], &week);
    assert_eq!(report.planning_accuracy, PlanningAccuracy::Underestimator);

    let mut overestimated = done_task("2024-06-03", 9);
    overestimated.estimated_minutes = 90;
    overestimated.actual_minutes = 30;

    let second_report = build_report(&[overestimated], &week);
    assert_eq!(second_report.planning_accuracy, PlanningAccuracy::Overestimator);
}

#[rstest]
fn planning_accuracy_tolerates_small_deviations(week: ReportWindow) {
    let mut close = done_task("2024-06-03", 9);
    close.estimated_minutes = 60;
    close.actual_minutes = 68;

    let report = build_report(&[close], &week);

    assert_eq!(report.planning_accuracy, PlanningAccuracy::Calibrated);
}

#[rstest]
fn untimed_tasks_do_not_skew_planning_accuracy(week: ReportWindow) {
    // Completed but never timed: no actual minutes recorded, so the task
    // is not a planning-accuracy sample.
    let untimed = done_task("2024-06-03", 9);

    let report = build_report(&[untimed], &week);

    assert_eq!(report.planning_accuracy, PlanningAccuracy::Calibrated);
}

#[rstest]
fn busiest_day_takes_the_first_maximum(week: ReportWindow) {
    let tasks = vec![
        open_task("2024-06-04"),
        open_task("2024-06-04"),
        open_task("2024-06-07"),
        open_task("2024-06-07"),
    ];

    let report = build_report(&tasks, &week);

    let busiest = report.busiest_day().expect("buckets exist");
    assert_eq!(busiest.date, date("2024-06-04"));
}

#[rstest]
fn rebuilding_over_unchanged_input_is_deterministic(week: ReportWindow) {
    let mut task = done_task("2024-06-03", 9);
    task.goal_title = Some("Health".to_owned());
    task.actual_minutes = 50;
    let tasks = vec![task, open_task("2024-06-05")];

    let first_run = build_report(&tasks, &week);
    let second_run = build_report(&tasks, &week);

    assert_eq!(first_run, second_run);
}
