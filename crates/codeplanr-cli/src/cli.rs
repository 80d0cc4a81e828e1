//! Command handlers for the CodePlanr CLI.
//!
//! Each handler loads what it needs from the settings store, calls into
//! `codeplanr_core` and renders the markdown output through
//! [`TerminalRenderer`].

use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use codeplanr_core::{
    config::{mask_key, ConfigStore, FileConfigStore, Settings, API_KEY, KNOWN_MODELS, MODEL_KEY},
    display::{ErrorGuidance, OperationStatus, PlanChecklist, StepTransition},
    Agent, AgentBuilder, AgentError, ChatAssistant, OpenAiProvider,
};
use log::{info, warn};

use crate::{
    args::{AgentArgs, ChatArgs, ConfigCommands, PlanArgs},
    renderer::TerminalRenderer,
};

pub struct Cli {
    store: FileConfigStore,
    renderer: TerminalRenderer,
    workspace: PathBuf,
    model: Option<String>,
}

impl Cli {
    pub fn new(
        store: FileConfigStore,
        renderer: TerminalRenderer,
        workspace: PathBuf,
        model: Option<String>,
    ) -> Self {
        Self {
            store,
            renderer,
            workspace,
            model,
        }
    }

    /// Plans the request, executes every step and prints the final checklist.
    pub async fn handle_agent(&self, args: &AgentArgs) -> Result<()> {
        let mut agent = self.build_agent().await?;

        if let Err(e) = agent.create_plan(&args.request).await {
            return Err(self.fail(e));
        }
        if let Some(plan) = agent.session().active_plan() {
            self.renderer.render(&format!("{plan}\n"))?;
        }

        let renderer = &self.renderer;
        let outcome = agent
            .run_active_plan(|step| {
                if let Err(e) = renderer.render(&format!("{}\n", StepTransition(step))) {
                    warn!("Failed to render progress: {e}");
                }
            })
            .await;

        if let Some(plan) = agent.session().active_plan() {
            self.renderer.render(&format!("\n{}", PlanChecklist(plan)))?;
        }
        if let Some(path) = &args.export {
            self.export(&agent, path)?;
        }

        outcome.map_err(|e| self.fail(e))
    }

    /// Prints the generated plan without executing it.
    pub async fn handle_plan(&self, args: &PlanArgs) -> Result<()> {
        let mut agent = self.build_agent().await?;
        match agent.create_plan(&args.request).await {
            Ok(plan) => self.renderer.render(&plan.to_string()),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Answers a general question without touching the workspace.
    pub async fn handle_chat(&self, args: &ChatArgs) -> Result<()> {
        let chat = ChatAssistant::new(Arc::new(self.provider()?));
        match chat.reply(&args.message).await {
            Ok(reply) => self.renderer.render(&format!("{reply}\n")),
            Err(e) => Err(self.fail(e)),
        }
    }

    pub fn handle_config_command(&mut self, command: ConfigCommands) -> Result<()> {
        match command {
            ConfigCommands::Show => self.show_config(),
            ConfigCommands::SetKey { key } => {
                let key = key.trim();
                if key.is_empty() {
                    bail!("API key cannot be empty");
                }
                self.store.set(API_KEY, key)?;
                info!("API key stored in {}", self.store.path().display());
                self.renderer
                    .render(&OperationStatus::success("API key saved").to_string())
            }
            ConfigCommands::SetModel { model } => {
                if !KNOWN_MODELS.contains(&model.as_str()) {
                    bail!(
                        "Unknown model '{model}'. Run `codeplanr models` to list the available models"
                    );
                }
                self.store.set(MODEL_KEY, &model)?;
                self.renderer.render(
                    &OperationStatus::success(format!("Model changed to {model}")).to_string(),
                )
            }
        }
    }

    pub fn list_models(&self) -> Result<()> {
        let current = self.settings().model;
        let mut output = String::from("# Models\n\n");
        for model in KNOWN_MODELS {
            if *model == current {
                writeln!(output, "- {model} (current)")?;
            } else {
                writeln!(output, "- {model}")?;
            }
        }
        self.renderer.render(&output)
    }

    fn show_config(&self) -> Result<()> {
        let settings = self.settings();
        let key = settings
            .api_key
            .as_deref()
            .map(mask_key)
            .unwrap_or_else(|| "not set".to_string());

        let mut output = String::from("# Configuration\n\n");
        writeln!(output, "- Config file: {}", self.store.path().display())?;
        writeln!(output, "- API key: {key}")?;
        writeln!(output, "- Model: {}", settings.model)?;
        self.renderer.render(&output)
    }

    fn settings(&self) -> Settings {
        let mut settings = Settings::load(&self.store);
        if let Some(model) = &self.model {
            settings.model = model.clone();
        }
        settings
    }

    fn provider(&self) -> Result<OpenAiProvider> {
        let Some(provider) = OpenAiProvider::from_settings(&self.settings()) else {
            bail!(
                "No OpenAI API key configured. \
                 Run `codeplanr config set-key <KEY>` or set OPENAI_API_KEY"
            );
        };
        info!("Using model {}", provider.model());
        Ok(provider)
    }

    async fn build_agent(&self) -> Result<Agent> {
        AgentBuilder::new()
            .with_provider(Arc::new(self.provider()?))
            .with_workspace_root(&self.workspace)
            .build()
            .await
            .context("Failed to initialize agent")
    }

    fn export(&self, agent: &Agent, path: &Path) -> Result<()> {
        let markdown = agent
            .session()
            .export_markdown()
            .ok_or(AgentError::NoActivePlan)?;
        std::fs::write(path, markdown)
            .with_context(|| format!("Failed to export plan to {}", path.display()))?;
        self.renderer.render(
            &OperationStatus::success(format!("Plan exported to {}", path.display())).to_string(),
        )
    }

    fn fail(&self, err: AgentError) -> anyhow::Error {
        if let Err(e) = self.renderer.render(&format!("\n{}", ErrorGuidance(&err))) {
            warn!("Failed to render error guidance: {e}");
        }
        err.into()
    }
}
