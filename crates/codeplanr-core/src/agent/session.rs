//! Holder of the most recent plan.

use crate::{display::PlanChecklist, models::Plan};

/// Keeps at most one active plan for inspection and export.
///
/// Setting a plan replaces the previous one unconditionally; the session
/// itself never executes anything.
#[derive(Debug, Default)]
pub struct AgentSession {
    current_plan: Option<Plan>,
}

impl AgentSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `plan` the active plan, dropping any previous one.
    pub fn set_active_plan(&mut self, plan: Plan) -> &mut Plan {
        self.current_plan.insert(plan)
    }

    pub fn active_plan(&self) -> Option<&Plan> {
        self.current_plan.as_ref()
    }

    pub fn active_plan_mut(&mut self) -> Option<&mut Plan> {
        self.current_plan.as_mut()
    }

    /// Forgets the active plan.
    pub fn clear(&mut self) {
        self.current_plan = None;
    }

    /// Renders the active plan as a markdown checklist.
    pub fn export_markdown(&self) -> Option<String> {
        self.current_plan
            .as_ref()
            .map(|plan| PlanChecklist(plan).to_string())
    }
}
