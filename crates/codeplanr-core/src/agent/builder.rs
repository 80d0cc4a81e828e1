//! Builder for creating and configuring Agent instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::debug;

use super::{Agent, PlanRunner, Planner, StepExecutor, WorkspaceScanner};
use crate::{
    completion::CompletionProvider,
    error::{AgentError, IoResultExt, Result},
    host::{EditorDiagnostics, Editor, FileSystem, InMemoryDiagnostics, LocalFileSystem, NoopEditor},
};

/// Builder for creating and configuring Agent instances.
#[derive(Default)]
pub struct AgentBuilder {
    provider: Option<Arc<dyn CompletionProvider>>,
    file_system: Option<Arc<dyn FileSystem>>,
    diagnostics: Option<Arc<dyn EditorDiagnostics>>,
    editor: Option<Arc<dyn Editor>>,
    workspace_root: Option<PathBuf>,
}

impl AgentBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the completion provider used for classification, planning and
    /// code generation. Required.
    pub fn with_provider(mut self, provider: Arc<dyn CompletionProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Sets the directory step files are resolved against. Required.
    pub fn with_workspace_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.workspace_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Overrides the file system (defaults to the local disk).
    pub fn with_file_system(mut self, file_system: Arc<dyn FileSystem>) -> Self {
        self.file_system = Some(file_system);
        self
    }

    /// Overrides the diagnostics source (defaults to reporting none).
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn EditorDiagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Overrides the editor used to show written files.
    pub fn with_editor(mut self, editor: Arc<dyn Editor>) -> Self {
        self.editor = Some(editor);
        self
    }

    /// Builds the configured agent.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::Configuration` if the provider or workspace root
    /// is missing or the root is not a directory, and
    /// `AgentError::FileSystem` if the root cannot be inspected.
    pub async fn build(self) -> Result<Agent> {
        let provider = self
            .provider
            .ok_or_else(|| AgentError::configuration("no completion provider configured"))?;
        let workspace_root = self
            .workspace_root
            .ok_or_else(|| AgentError::configuration("no workspace root configured"))?;

        let metadata = tokio::fs::metadata(&workspace_root)
            .await
            .fs_context(&workspace_root)?;
        if !metadata.is_dir() {
            return Err(AgentError::configuration(format!(
                "workspace root {} is not a directory",
                workspace_root.display()
            )));
        }

        let file_system = self
            .file_system
            .unwrap_or_else(|| Arc::new(LocalFileSystem));
        let scanner = WorkspaceScanner::new(Arc::clone(&file_system), &workspace_root);
        let executor = StepExecutor::new(
            Arc::clone(&provider),
            file_system,
            self.diagnostics
                .unwrap_or_else(|| Arc::new(InMemoryDiagnostics::new())),
            self.editor.unwrap_or_else(|| Arc::new(NoopEditor)),
        );

        debug!("Agent workspace: {}", workspace_root.display());
        Ok(Agent::new(
            Planner::new(provider).with_scanner(scanner),
            PlanRunner::new(executor, workspace_root),
        ))
    }
}
