//! Domain model for productivity analytics and reflections.

mod aggregate;
mod error;
mod reflection;
mod report;
mod window;

pub use aggregate::{WindowTask, build_report};
pub use error::InsightsDomainError;
pub use reflection::{
    EnergyRating, NewReflectionData, PersistedReflectionData, Reflection, ReflectionId,
};
pub use report::{
    DayActivity, FlowBreakdown, GoalSlice, PeakTime, PlanningAccuracy, ProductivityReport,
    TOP_GOAL_SLICES, UNCATEGORIZED_GOAL,
};
pub use window::{ReportWindow, WindowKind};
