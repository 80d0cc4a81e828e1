//! Turning a user request into a [`Plan`].

use std::{str::FromStr, sync::Arc};

use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::Value;

use super::{
    classifier::TaskClassifier, extract::extract_json_array, scanner::WorkspaceScanner,
};
use crate::{
    completion::CompletionProvider,
    error::{AgentError, PlanGenerationError, Result},
    models::{Action, Plan, Step},
};

const PLANNER_SYSTEM_PROMPT: &str =
    "You are a helpful coding assistant. Always return valid JSON when requested.";

/// Raw step as the model describes it.
#[derive(Debug, Deserialize)]
struct PlannedStep {
    #[serde(default)]
    description: String,
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    file: Option<String>,
}

/// Converts validated requests into ordered plans.
#[derive(Clone)]
pub struct Planner {
    classifier: TaskClassifier,
    provider: Arc<dyn CompletionProvider>,
    scanner: Option<WorkspaceScanner>,
}

impl Planner {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            classifier: TaskClassifier::new(Arc::clone(&provider)),
            provider,
            scanner: None,
        }
    }

    /// Lists relevant existing workspace files in the planning prompt.
    pub fn with_scanner(mut self, scanner: WorkspaceScanner) -> Self {
        self.scanner = Some(scanner);
        self
    }

    /// Classifies `request`, asks the model for a plan and parses it.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::NotACodingTask` when the classifier rejects the
    /// request (no planning call is made), and `AgentError::PlanGeneration`
    /// when a completion call fails or the response is not a usable plan.
    pub async fn create_plan(&self, request: &str) -> Result<Plan> {
        let is_coding = self
            .classifier
            .classify(request)
            .await
            .map_err(PlanGenerationError::from)?;
        if !is_coding {
            info!("Request rejected by classifier: {request:?}");
            return Err(AgentError::NotACodingTask);
        }

        let existing = match &self.scanner {
            Some(scanner) => scanner.relevant_files(request).await,
            None => Vec::new(),
        };
        debug!("Planning with {} existing files as context", existing.len());

        let response = self
            .provider
            .complete(PLANNER_SYSTEM_PROMPT, &planning_prompt(request, &existing))
            .await
            .map_err(PlanGenerationError::from)?;
        debug!("Planner response: {} bytes", response.len());

        let steps = parse_steps(&response)?;
        info!("Created plan with {} steps for {request:?}", steps.len());
        Ok(Plan::new(request, steps))
    }
}

fn planning_prompt(request: &str, existing: &[String]) -> String {
    let mut prompt = format!(
        r#"Break down this task into clear steps: "{request}"

Return ONLY a JSON array of steps, each with:
- description: what to do
- action: one of [create_file, write_code, check_errors, modify_file]
- file: filename relative to the workspace root

Example for "create a cpp file for addition of 2 numbers":
[
    {{"description": "Create addition.cpp file", "action": "create_file", "file": "addition.cpp"}},
    {{"description": "Write C++ code for addition", "action": "write_code", "file": "addition.cpp"}},
    {{"description": "Check for compilation errors", "action": "check_errors", "file": "addition.cpp"}}
]
"#
    );

    if !existing.is_empty() {
        prompt.push_str("\nExisting files in the workspace that may be relevant:\n");
        let listing: String = existing.iter().map(|path| format!("- {path}\n")).collect();
        prompt.push_str(&listing);
    }

    prompt.push_str("\nReturn ONLY the JSON array, no other text.");
    prompt
}

/// Maps the extracted array onto pending steps numbered from 1.
fn parse_steps(response: &str) -> std::result::Result<Vec<Step>, PlanGenerationError> {
    let items = extract_json_array(response)?;
    if items.is_empty() {
        return Err(PlanGenerationError::Empty);
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| to_step(index, item))
        .collect()
}

fn to_step(index: usize, item: Value) -> std::result::Result<Step, PlanGenerationError> {
    let id = u32::try_from(index + 1).map_err(|_| PlanGenerationError::Parse {
        reason: "too many steps".to_string(),
    })?;
    let planned: PlannedStep =
        serde_json::from_value(item).map_err(|e| PlanGenerationError::Parse {
            reason: format!("step {id}: {e}"),
        })?;

    let action = planned
        .action
        .as_deref()
        .and_then(|raw| match Action::from_str(raw) {
            Ok(action) => Some(action),
            Err(e) => {
                warn!("Step {id}: {e}; action will be inferred from the description");
                None
            }
        });
    let file = planned.file.filter(|f| !f.trim().is_empty());

    Ok(Step::new(id, planned.description, action, file))
}
