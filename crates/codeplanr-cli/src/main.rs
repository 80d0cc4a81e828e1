//! CodePlanr CLI Application
//!
//! Command-line interface for the CodePlanr coding agent.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use codeplanr_core::config::FileConfigStore;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        config_file,
        workspace,
        model,
        no_color,
        command,
    } = Args::parse();

    let store = match config_file {
        Some(path) => FileConfigStore::open(path),
        None => FileConfigStore::open_default(),
    }
    .context("Failed to load settings")?;

    let workspace = match workspace {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to resolve the current directory")?,
    };

    let renderer = TerminalRenderer::new(!no_color);
    let mut cli = Cli::new(store, renderer, workspace, model);

    info!("CodePlanr started");

    match command {
        Agent(args) => cli.handle_agent(&args).await,
        Plan(args) => cli.handle_plan(&args).await,
        Chat(args) => cli.handle_chat(&args).await,
        Config { command } => cli.handle_config_command(command),
        Models => cli.list_models(),
    }
}
