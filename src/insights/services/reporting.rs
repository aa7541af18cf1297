//! Service layer for report building and reflection management.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::Clock;
use sha2::{Digest, Sha256};

use super::{InsightsResult, prompt::render_reflection_prompt};
use crate::insights::{
    domain::{
        EnergyRating, NewReflectionData, ProductivityReport, Reflection, ReportWindow, WindowKind,
        WindowTask, build_report,
    },
    ports::{ReflectionRepository, ReportSummarizer},
};
use crate::planner::{
    domain::{DueDate, GoalId, UserId, WeekWindow},
    ports::{GoalRepository, TaskRepository},
};

/// Request payload for recording a user-written weekly reflection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordReflectionRequest {
    week_date: String,
    summary: String,
    energy: Option<u8>,
    tasks_completed: u32,
    tasks_scheduled: u32,
    focus_goals: Vec<String>,
}

impl RecordReflectionRequest {
    /// Creates a request for the week containing the given date, with the
    /// reflection body.
    #[must_use]
    pub fn new(week_date: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            week_date: week_date.into(),
            summary: summary.into(),
            ..Self::default()
        }
    }

    /// Sets the self-reported energy rating.
    #[must_use]
    pub const fn with_energy(mut self, energy: u8) -> Self {
        self.energy = Some(energy);
        self
    }

    /// Sets the completed/scheduled counts for the week.
    #[must_use]
    pub const fn with_counts(mut self, completed: u32, scheduled: u32) -> Self {
        self.tasks_completed = completed;
        self.tasks_scheduled = scheduled;
        self
    }

    /// Sets the forward-looking focus goals.
    #[must_use]
    pub fn with_focus_goals(mut self, goals: impl IntoIterator<Item = String>) -> Self {
        self.focus_goals = goals.into_iter().collect();
        self
    }
}

/// Insights orchestration service.
#[derive(Clone)]
pub struct InsightsService<T, G, R, S, C>
where
    T: TaskRepository,
    G: GoalRepository,
    R: ReflectionRepository,
    S: ReportSummarizer,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    goals: Arc<G>,
    reflections: Arc<R>,
    summarizer: Arc<S>,
    clock: Arc<C>,
}

impl<T, G, R, S, C> InsightsService<T, G, R, S, C>
where
    T: TaskRepository,
    G: GoalRepository,
    R: ReflectionRepository,
    S: ReportSummarizer,
    C: Clock + Send + Sync,
{
    /// Creates a new insights service.
    #[must_use]
    pub const fn new(
        tasks: Arc<T>,
        goals: Arc<G>,
        reflections: Arc<R>,
        summarizer: Arc<S>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            goals,
            reflections,
            summarizer,
            clock,
        }
    }

    /// Builds the productivity report for the window containing the
    /// anchor date.
    ///
    /// # Errors
    ///
    /// Returns [`InsightsError`](super::InsightsError) when the anchor
    /// date is invalid or a fetch fails.
    pub async fn report(
        &self,
        user: UserId,
        kind: WindowKind,
        anchor_date: &str,
    ) -> InsightsResult<ProductivityReport> {
        let anchor = DueDate::parse(anchor_date)?;
        let window = ReportWindow::containing(kind, anchor);
        self.window_report(user, &window).await
    }

    /// Records a user-written reflection for the week containing the
    /// given date.
    ///
    /// # Errors
    ///
    /// Returns [`InsightsError`](super::InsightsError) when validation or
    /// persistence fails.
    pub async fn record_reflection(
        &self,
        user: UserId,
        request: RecordReflectionRequest,
    ) -> InsightsResult<Reflection> {
        let anchor = DueDate::parse(&request.week_date)?;
        let week_start = WeekWindow::containing(anchor).first_day();
        let energy = request.energy.map(EnergyRating::new).transpose()?;

        let reflection = Reflection::new(
            NewReflectionData {
                user,
                week_start,
                summary: request.summary,
                energy,
                tasks_completed: request.tasks_completed,
                tasks_scheduled: request.tasks_scheduled,
                focus_goals: request.focus_goals,
                prompt_hash: None,
            },
            &*self.clock,
        );
        self.reflections.insert(&reflection).await?;
        Ok(reflection)
    }

    /// Generates an AI reflection for the week containing the anchor
    /// date: builds the report, renders the prompt, asks the summarizer
    /// for prose, and stores the result with the prompt hash.
    ///
    /// # Errors
    ///
    /// Returns [`InsightsError`](super::InsightsError) when report
    /// building, prompt rendering, the summarizer call, or persistence
    /// fails.
    pub async fn generate_weekly_reflection(
        &self,
        user: UserId,
        anchor_date: &str,
    ) -> InsightsResult<Reflection> {
        let anchor = DueDate::parse(anchor_date)?;
        let window = ReportWindow::week_containing(anchor);
        let report = self.window_report(user, &window).await?;

        let prompt = render_reflection_prompt(&report, &window)?;
        let prompt_hash = prompt_digest(&prompt);
        let summary = self.summarizer.summarize(&prompt).await?;

        let reflection = Reflection::new(
            NewReflectionData {
                user,
                week_start: window.first_day(),
                summary,
                energy: None,
                tasks_completed: report.completed,
                tasks_scheduled: report.total,
                focus_goals: Vec::new(),
                prompt_hash: Some(prompt_hash),
            },
            &*self.clock,
        );
        self.reflections.insert(&reflection).await?;
        Ok(reflection)
    }

    /// Returns all of the user's reflections, newest week first.
    ///
    /// # Errors
    ///
    /// Returns [`InsightsError::Repository`](super::InsightsError) when
    /// the lookup fails.
    pub async fn reflections(&self, user: UserId) -> InsightsResult<Vec<Reflection>> {
        Ok(self.reflections.list_for_user(user).await?)
    }

    /// Finds the user's reflection for the week containing the given
    /// date.
    ///
    /// # Errors
    ///
    /// Returns [`InsightsError`](super::InsightsError) when the date is
    /// invalid or the lookup fails.
    pub async fn reflection_for_week(
        &self,
        user: UserId,
        anchor_date: &str,
    ) -> InsightsResult<Option<Reflection>> {
        let anchor = DueDate::parse(anchor_date)?;
        let week_start = WeekWindow::containing(anchor).first_day();
        Ok(self
            .reflections
            .find_by_week_start(user, week_start)
            .await?)
    }

    /// Fetches window tasks, joins goal titles, and reduces them into a
    /// report.
    async fn window_report(
        &self,
        user: UserId,
        window: &ReportWindow,
    ) -> InsightsResult<ProductivityReport> {
        let tasks = self
            .tasks
            .list_scheduled_between(user, window.first_day(), window.last_day())
            .await?;
        let goal_titles: HashMap<GoalId, String> = self
            .goals
            .list_for_user(user)
            .await?
            .into_iter()
            .map(|goal| (goal.id(), goal.title().as_str().to_owned()))
            .collect();

        let window_tasks: Vec<WindowTask> = tasks
            .iter()
            .filter_map(|task| {
                task.due_date().map(|due_date| WindowTask {
                    due_date,
                    completed: task.is_completed(),
                    completed_at: task.completed_at(),
                    goal_title: task.goal().and_then(|id| goal_titles.get(&id).cloned()),
                    estimated_minutes: task.duration().value(),
                    actual_minutes: task.actual_minutes(),
                })
            })
            .collect();

        Ok(build_report(&window_tasks, window))
    }
}

/// Returns the lowercase hex SHA-256 digest of a prompt, stored with
/// generated reflections for staleness detection.
fn prompt_digest(prompt: &str) -> String {
    let digest = Sha256::digest(prompt.as_bytes());
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}
