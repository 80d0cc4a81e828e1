use std::{
    collections::VecDeque,
    path::Path,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use codeplanr_core::{
    host::EditorDiagnostics, Agent, AgentBuilder, CompletionError, CompletionErrorKind,
    CompletionProvider,
};
use tempfile::TempDir;

/// Completion provider that answers from a fixed script.
pub struct MockProvider {
    responses: Mutex<VecDeque<Result<String, CompletionError>>>,
    calls: Mutex<usize>,
}

impl MockProvider {
    pub fn new(responses: Vec<Result<String, CompletionError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(0),
        })
    }

    pub fn answering(responses: &[&str]) -> Arc<Self> {
        Self::new(responses.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String, CompletionError> {
        *self.calls.lock().unwrap() += 1;
        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(CompletionError::new(
                CompletionErrorKind::Unknown,
                "no scripted response left",
            ))
        })
    }
}

/// Helper function to create an agent over a temporary workspace
pub async fn create_test_agent(
    provider: Arc<MockProvider>,
    diagnostics: Option<Arc<dyn EditorDiagnostics>>,
) -> (TempDir, Agent) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut builder = AgentBuilder::new()
        .with_provider(provider)
        .with_workspace_root(temp_dir.path());
    if let Some(diagnostics) = diagnostics {
        builder = builder.with_diagnostics(diagnostics);
    }
    let agent = builder.build().await.expect("Failed to create agent");
    (temp_dir, agent)
}

#[allow(dead_code)]
pub fn read(root: &Path, file: &str) -> String {
    std::fs::read_to_string(root.join(file)).expect("Failed to read workspace file")
}
