//! Reflection prompt rendering for the text-generation collaborator.

use minijinja::Environment;
use serde_json::{Map, Value};

use super::InsightsError;
use crate::insights::domain::{ProductivityReport, ReportWindow};

/// Template handed to the summarizer, rendered over the report numbers.
const REFLECTION_PROMPT_TEMPLATE: &str = "\
You are a supportive productivity coach. Write a short weekly reflection \
for the period {{ window_start }} to {{ window_end }}.

The numbers for the week:
- Completed {{ completed }} of {{ total }} tasks ({{ score }}% completion)
- Focus time: {{ focus_hours }} hours
- Work style: {{ peak_time }}
- Estimate quality: {{ planning_accuracy }}
{%- if busiest_day %}
- Busiest day: {{ busiest_day }}
{%- endif %}
{%- for slice in goal_slices %}
- Goal \"{{ slice.goal }}\": {{ slice.completed }} of {{ slice.total }} done
{%- endfor %}

Write two encouraging paragraphs and one concrete suggestion for next \
week. Do not repeat the raw numbers verbatim.";

/// Renders the reflection prompt from a report and its window.
///
/// # Errors
///
/// Returns [`InsightsError::Prompt`] when the template or context payload
/// fails to render.
pub fn render_reflection_prompt(
    report: &ProductivityReport,
    window: &ReportWindow,
) -> Result<String, InsightsError> {
    let environment = Environment::new();
    let context = build_prompt_context(report, window)?;
    environment
        .render_str(REFLECTION_PROMPT_TEMPLATE, context)
        .map_err(|error| InsightsError::Prompt(error.to_string()))
}

fn build_prompt_context(
    report: &ProductivityReport,
    window: &ReportWindow,
) -> Result<Map<String, Value>, InsightsError> {
    let mut context = Map::new();
    context.insert(
        "window_start".to_owned(),
        Value::String(window.first_day().to_string()),
    );
    context.insert(
        "window_end".to_owned(),
        Value::String(window.last_day().to_string()),
    );
    context.insert("total".to_owned(), Value::from(report.total));
    context.insert("completed".to_owned(), Value::from(report.completed));
    context.insert("score".to_owned(), Value::from(report.score));
    context.insert("focus_hours".to_owned(), Value::from(report.focus_hours()));
    context.insert(
        "peak_time".to_owned(),
        Value::String(report.peak_time.label().to_owned()),
    );
    context.insert(
        "planning_accuracy".to_owned(),
        Value::String(report.planning_accuracy.label().to_owned()),
    );
    context.insert(
        "busiest_day".to_owned(),
        report
            .busiest_day()
            .filter(|bucket| bucket.total > 0)
            .map_or(Value::Null, |bucket| Value::String(bucket.label.clone())),
    );
    context.insert(
        "goal_slices".to_owned(),
        serde_json::to_value(report.top_goal_slices())
            .map_err(|error| InsightsError::Prompt(error.to_string()))?,
    );
    Ok(context)
}
