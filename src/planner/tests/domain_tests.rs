//! Domain-focused tests for planner value types and the task aggregate.

use crate::planner::domain::{
    DaySelector, DueDate, DurationMinutes, GoalId, Placement, PlannerDomainError, Priority,
    StartTime, Task, TaskDraft, Title, UserId, WeekWindow,
};
use crate::testing::FixedClock;
use chrono::{TimeZone, Utc, Weekday};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
fn title_trims_surrounding_whitespace() {
    let title = Title::new("  Morning run  ").expect("valid title");
    assert_eq!(title.as_str(), "Morning run");
}

#[rstest]
fn title_rejects_whitespace_only_values() {
    assert_eq!(Title::new("   "), Err(PlannerDomainError::EmptyTitle));
}

#[rstest]
fn title_normalized_key_folds_case() {
    let title = Title::new("Deep Work").expect("valid title");
    assert_eq!(title.normalized_key(), "deep work");
}

#[rstest]
#[case::low("low", Priority::Low)]
#[case::medium("medium", Priority::Medium)]
#[case::high("HIGH", Priority::High)]
fn priority_parses_known_labels(#[case] label: &str, #[case] expected: Priority) {
    assert_eq!(Priority::try_from(label), Ok(expected));
}

#[rstest]
fn priority_rejects_unknown_labels() {
    assert!(Priority::try_from("urgent").is_err());
}

#[rstest]
fn duration_rejects_zero_and_over_a_day() {
    assert_eq!(
        DurationMinutes::new(0),
        Err(PlannerDomainError::InvalidDuration(0))
    );
    assert_eq!(
        DurationMinutes::new(1441),
        Err(PlannerDomainError::InvalidDuration(1441))
    );
}

#[rstest]
fn duration_defaults_to_one_hour() {
    assert_eq!(DurationMinutes::default().value(), 60);
}

#[rstest]
fn due_date_parses_and_displays_iso_format() {
    let date = DueDate::parse("2024-06-03").expect("valid date");
    assert_eq!(date.to_string(), "2024-06-03");
}

#[rstest]
fn due_date_rejects_malformed_values() {
    assert!(DueDate::parse("03/06/2024").is_err());
    assert!(DueDate::parse("2024-13-01").is_err());
}

#[rstest]
fn start_time_parses_and_displays_hours_minutes() {
    let time = StartTime::parse("09:30").expect("valid time");
    assert_eq!(time.to_string(), "09:30");
}

#[rstest]
#[case::sunday(Some(0), DaySelector::On { weekday: Weekday::Sun })]
#[case::monday(Some(1), DaySelector::On { weekday: Weekday::Mon })]
#[case::saturday(Some(6), DaySelector::On { weekday: Weekday::Sat })]
#[case::every_day(Some(7), DaySelector::EveryDay)]
#[case::weekdays(Some(8), DaySelector::Weekdays)]
#[case::weekend(Some(9), DaySelector::Weekend)]
#[case::unscheduled(None, DaySelector::Unscheduled)]
fn day_selector_round_trips_storage_codes(
    #[case] code: Option<i16>,
    #[case] expected: DaySelector,
) {
    let selector = DaySelector::from_code(code).expect("valid code");
    assert_eq!(selector, expected);
    assert_eq!(selector.code(), code);
}

#[rstest]
fn day_selector_rejects_codes_outside_domain() {
    assert_eq!(
        DaySelector::from_code(Some(10)),
        Err(PlannerDomainError::InvalidDayCode(10))
    );
    assert_eq!(
        DaySelector::from_code(Some(-1)),
        Err(PlannerDomainError::InvalidDayCode(-1))
    );
}

#[rstest]
fn day_selector_resolves_monday_based_offsets() {
    assert_eq!(
        DaySelector::EveryDay.week_offsets(),
        Some(vec![0, 1, 2, 3, 4, 5, 6])
    );
    assert_eq!(
        DaySelector::Weekdays.week_offsets(),
        Some(vec![0, 1, 2, 3, 4])
    );
    assert_eq!(DaySelector::Weekend.week_offsets(), Some(vec![5, 6]));
    assert_eq!(DaySelector::Unscheduled.week_offsets(), None);
}

#[rstest]
fn sunday_selector_lands_at_the_far_end_of_the_week() {
    let selector = DaySelector::On {
        weekday: Weekday::Sun,
    };
    assert_eq!(selector.week_offsets(), Some(vec![6]));
}

#[rstest]
fn week_window_spans_monday_to_sunday() {
    let wednesday = DueDate::parse("2024-06-05").expect("valid date");
    let week = WeekWindow::containing(wednesday);

    assert_eq!(week.first_day().to_string(), "2024-06-03");
    assert_eq!(week.last_day().to_string(), "2024-06-09");
    assert!(week.contains(wednesday));
    assert!(!week.contains(DueDate::parse("2024-06-10").expect("valid date")));
}

#[rstest]
fn week_window_offsets_walk_the_week() {
    let monday = DueDate::parse("2024-06-03").expect("valid date");
    let week = WeekWindow::containing(monday);

    assert_eq!(week.date_at_offset(0).to_string(), "2024-06-03");
    assert_eq!(week.date_at_offset(6).to_string(), "2024-06-09");
}

fn draft(title: &str) -> TaskDraft {
    TaskDraft::new(Title::new(title).expect("valid title"))
}

#[rstest]
fn task_from_draft_starts_clean() {
    let task = Task::from_draft(UserId::new(), draft("Write report"), &DefaultClock);

    assert!(!task.is_completed());
    assert_eq!(task.completed_at(), None);
    assert_eq!(task.actual_minutes(), 0);
    assert_eq!(task.timer_started_at(), None);
    assert_eq!(task.created_at(), task.updated_at());
}

#[rstest]
fn placement_classifies_the_planning_taxonomy() {
    let user = UserId::new();
    let clock = DefaultClock;

    let inbox = Task::from_draft(user, draft("Inbox item"), &clock);
    assert_eq!(inbox.placement(), Placement::Inbox);

    let mut backlog_draft = draft("Backlog item");
    backlog_draft.goal = Some(GoalId::new());
    let backlog = Task::from_draft(user, backlog_draft, &clock);
    assert_eq!(backlog.placement(), Placement::Backlog);

    let mut all_day_draft = draft("All day item");
    all_day_draft.due_date = Some(DueDate::parse("2024-06-03").expect("valid date"));
    let all_day = Task::from_draft(user, all_day_draft, &clock);
    assert_eq!(all_day.placement(), Placement::AllDay);

    let mut blocked_draft = draft("Blocked item");
    blocked_draft.due_date = Some(DueDate::parse("2024-06-03").expect("valid date"));
    blocked_draft.start_time = Some(StartTime::parse("09:00").expect("valid time"));
    let blocked = Task::from_draft(user, blocked_draft, &clock);
    assert_eq!(blocked.placement(), Placement::TimeBlocked);
}

#[rstest]
fn toggle_completion_stamps_and_clears_the_timestamp() {
    let completion_instant = Utc
        .with_ymd_and_hms(2024, 6, 3, 9, 30, 0)
        .single()
        .expect("valid instant");
    let clock = FixedClock(completion_instant);
    let mut task = Task::from_draft(UserId::new(), draft("Gym"), &clock);

    task.toggle_completion(&clock);
    assert!(task.is_completed());
    assert_eq!(task.completed_at(), Some(completion_instant));

    task.toggle_completion(&clock);
    assert!(!task.is_completed());
    assert_eq!(task.completed_at(), None);
}

#[rstest]
fn stop_timer_accumulates_elapsed_whole_minutes() {
    let started = Utc
        .with_ymd_and_hms(2024, 6, 3, 9, 0, 0)
        .single()
        .expect("valid instant");
    let stopped = Utc
        .with_ymd_and_hms(2024, 6, 3, 9, 25, 30)
        .single()
        .expect("valid instant");
    let mut task = Task::from_draft(UserId::new(), draft("Focus block"), &FixedClock(started));

    task.start_timer(&FixedClock(started));
    assert_eq!(task.timer_started_at(), Some(started));

    task.stop_timer(&FixedClock(stopped));
    assert_eq!(task.actual_minutes(), 25);
    assert_eq!(task.timer_started_at(), None);
}

#[rstest]
fn stop_timer_without_a_running_timer_is_a_no_op() {
    let clock = DefaultClock;
    let mut task = Task::from_draft(UserId::new(), draft("Idle"), &clock);

    task.stop_timer(&clock);
    assert_eq!(task.actual_minutes(), 0);
}

#[rstest]
fn restarting_the_timer_overwrites_the_marker() {
    let first = Utc
        .with_ymd_and_hms(2024, 6, 3, 9, 0, 0)
        .single()
        .expect("valid instant");
    let second = Utc
        .with_ymd_and_hms(2024, 6, 3, 10, 0, 0)
        .single()
        .expect("valid instant");
    let mut task = Task::from_draft(UserId::new(), draft("Restart"), &FixedClock(first));

    task.start_timer(&FixedClock(first));
    task.start_timer(&FixedClock(second));
    assert_eq!(task.timer_started_at(), Some(second));
}
