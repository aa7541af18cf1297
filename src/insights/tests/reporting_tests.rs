//! Reporting service tests over in-memory adapters and a mocked
//! summarizer.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::DefaultClock;
use mockall::mock;
use mockall::predicate::function;
use rstest::{fixture, rstest};

use crate::insights::{
    adapters::memory::InMemoryReflectionRepository,
    domain::WindowKind,
    ports::{ReportSummarizer, SummarizerError},
    services::{InsightsError, InsightsService, RecordReflectionRequest},
};
use crate::planner::{
    adapters::memory::{InMemoryGoalRepository, InMemoryTaskRepository},
    domain::UserId,
    services::{CreateTaskRequest, GoalService, TaskPlanningService},
};

mock! {
    Summarizer {}

    #[async_trait]
    impl ReportSummarizer for Summarizer {
        async fn summarize(&self, prompt: &str) -> Result<String, SummarizerError>;
    }
}

type TestTaskService = TaskPlanningService<InMemoryTaskRepository, DefaultClock>;
type TestGoalService =
    GoalService<InMemoryGoalRepository, InMemoryTaskRepository, DefaultClock>;
type TestInsightsService = InsightsService<
    InMemoryTaskRepository,
    InMemoryGoalRepository,
    InMemoryReflectionRepository,
    MockSummarizer,
    DefaultClock,
>;

/// Planner services plus a factory for insights services sharing the same
/// repositories.
struct Harness {
    tasks: TestTaskService,
    goals: TestGoalService,
    task_repo: Arc<InMemoryTaskRepository>,
    goal_repo: Arc<InMemoryGoalRepository>,
    reflection_repo: Arc<InMemoryReflectionRepository>,
}

impl Harness {
    fn insights(&self, summarizer: MockSummarizer) -> TestInsightsService {
        InsightsService::new(
            Arc::clone(&self.task_repo),
            Arc::clone(&self.goal_repo),
            Arc::clone(&self.reflection_repo),
            Arc::new(summarizer),
            Arc::new(DefaultClock),
        )
    }
}

#[fixture]
fn harness() -> Harness {
    let task_repo = Arc::new(InMemoryTaskRepository::new());
    let goal_repo = Arc::new(InMemoryGoalRepository::new());
    let reflection_repo = Arc::new(InMemoryReflectionRepository::new());
    let clock = Arc::new(DefaultClock);

    Harness {
        tasks: TaskPlanningService::new(Arc::clone(&task_repo), Arc::clone(&clock)),
        goals: GoalService::new(
            Arc::clone(&goal_repo),
            Arc::clone(&task_repo),
            Arc::clone(&clock),
        ),
        task_repo,
        goal_repo,
        reflection_repo,
    }
}

#[fixture]
fn user() -> UserId {
    UserId::new()
}

/// Seeds the week of 2024-06-03: three tasks, one goal-linked and
/// completed, one goalless and completed, one open.
async fn seed_week(harness: &Harness, user: UserId) {
    let goal = harness
        .goals
        .create(user, "Health")
        .await
        .expect("goal creation should succeed");

    let linked = harness
        .tasks
        .create(
            user,
            CreateTaskRequest::new("Gym")
                .with_due_date("2024-06-03")
                .with_goal(goal.id()),
        )
        .await
        .expect("task creation should succeed");
    harness
        .tasks
        .toggle_completion(user, linked.id())
        .await
        .expect("toggle should succeed");

    let adhoc = harness
        .tasks
        .create(
            user,
            CreateTaskRequest::new("Errands").with_due_date("2024-06-04"),
        )
        .await
        .expect("task creation should succeed");
    harness
        .tasks
        .toggle_completion(user, adhoc.id())
        .await
        .expect("toggle should succeed");

    harness
        .tasks
        .create(
            user,
            CreateTaskRequest::new("Taxes").with_due_date("2024-06-07"),
        )
        .await
        .expect("task creation should succeed");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn weekly_report_joins_goal_titles(harness: Harness, user: UserId) {
    seed_week(&harness, user).await;
    let insights = harness.insights(MockSummarizer::new());

    let report = insights
        .report(user, WindowKind::Week, "2024-06-05")
        .await
        .expect("report should build");

    assert_eq!(report.total, 3);
    assert_eq!(report.completed, 2);
    assert_eq!(report.score, 67);
    assert_eq!(report.flow.planned_completed, 1);
    assert_eq!(report.flow.adhoc_completed, 1);
    assert_eq!(report.flow.adhoc_rolled, 1);

    let goals: Vec<&str> = report
        .goal_breakdown
        .iter()
        .map(|slice| slice.goal.as_str())
        .collect();
    assert!(goals.contains(&"Health"));
    assert!(goals.contains(&"Uncategorized"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn monthly_report_covers_the_calendar_month(harness: Harness, user: UserId) {
    seed_week(&harness, user).await;
    let insights = harness.insights(MockSummarizer::new());

    let report = insights
        .report(user, WindowKind::Month, "2024-06-15")
        .await
        .expect("report should build");

    assert_eq!(report.activity_by_day.len(), 30);
    assert_eq!(report.total, 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn generated_reflection_stores_prose_and_prompt_hash(harness: Harness, user: UserId) {
    seed_week(&harness, user).await;

    let mut summarizer = MockSummarizer::new();
    summarizer
        .expect_summarize()
        .with(function(|prompt: &str| {
            prompt.contains("2024-06-03") && prompt.contains("2 of 3 tasks")
        }))
        .times(1)
        .returning(|_| Ok("A steady week with real momentum.".to_owned()));
    let insights = harness.insights(summarizer);

    let reflection = insights
        .generate_weekly_reflection(user, "2024-06-05")
        .await
        .expect("generation should succeed");

    assert_eq!(reflection.week_start().to_string(), "2024-06-03");
    assert_eq!(reflection.summary(), "A steady week with real momentum.");
    assert_eq!(reflection.tasks_completed(), 2);
    assert_eq!(reflection.tasks_scheduled(), 3);
    assert_eq!(reflection.energy(), None);
    let hash = reflection.prompt_hash().expect("generated hash present");
    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|ch| ch.is_ascii_hexdigit()));

    let stored = insights
        .reflection_for_week(user, "2024-06-05")
        .await
        .expect("lookup should succeed");
    assert_eq!(stored, Some(reflection));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn summarizer_failure_stores_nothing(harness: Harness, user: UserId) {
    seed_week(&harness, user).await;

    let mut summarizer = MockSummarizer::new();
    summarizer
        .expect_summarize()
        .returning(|_| Err(SummarizerError::Unavailable("timeout".to_owned())));
    let insights = harness.insights(summarizer);

    let result = insights.generate_weekly_reflection(user, "2024-06-05").await;

    assert!(matches!(result, Err(InsightsError::Summarizer(_))));
    assert!(
        insights
            .reflections(user)
            .await
            .expect("list should succeed")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn manual_reflection_normalizes_to_the_week_monday(harness: Harness, user: UserId) {
    let insights = harness.insights(MockSummarizer::new());

    let request = RecordReflectionRequest::new("2024-06-07", "Good week overall.")
        .with_energy(4)
        .with_counts(5, 8)
        .with_focus_goals(vec!["Sleep earlier".to_owned()]);
    let reflection = insights
        .record_reflection(user, request)
        .await
        .expect("recording should succeed");

    assert_eq!(reflection.week_start().to_string(), "2024-06-03");
    assert_eq!(reflection.energy().map(|rating| rating.value()), Some(4));
    assert_eq!(reflection.tasks_completed(), 5);
    assert_eq!(reflection.tasks_scheduled(), 8);
    assert_eq!(reflection.focus_goals(), ["Sleep earlier".to_owned()]);
    assert_eq!(reflection.prompt_hash(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn manual_reflection_rejects_out_of_scale_energy(harness: Harness, user: UserId) {
    let insights = harness.insights(MockSummarizer::new());

    let request = RecordReflectionRequest::new("2024-06-07", "Off the scale.").with_energy(9);
    let result = insights.record_reflection(user, request).await;

    assert!(matches!(result, Err(InsightsError::Domain(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reflections_list_newest_week_first(harness: Harness, user: UserId) {
    let insights = harness.insights(MockSummarizer::new());

    insights
        .record_reflection(
            user,
            RecordReflectionRequest::new("2024-05-29", "Older week."),
        )
        .await
        .expect("recording should succeed");
    insights
        .record_reflection(
            user,
            RecordReflectionRequest::new("2024-06-05", "Newer week."),
        )
        .await
        .expect("recording should succeed");

    let listed = insights
        .reflections(user)
        .await
        .expect("list should succeed");

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].summary(), "Newer week.");
    assert_eq!(listed[1].summary(), "Older week.");
}
