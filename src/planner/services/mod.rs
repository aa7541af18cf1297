//! Application services for planning orchestration.

mod blueprints;
mod error;
mod goals;
mod tasks;

pub use blueprints::{BlueprintService, CreateBlueprintRequest};
pub use error::{PlanningError, PlanningResult};
pub use goals::GoalService;
pub use tasks::{CreateTaskRequest, TaskPlanningService};
