use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

/// Command-line coding agent
///
/// CodePlanr turns a request such as "create a cpp file for addition of 2
/// numbers" into a numbered plan of file steps, executes the steps in a
/// workspace directory using an OpenAI chat model and reports progress as it
/// goes.
#[derive(Parser)]
#[command(version, about, name = "codeplanr")]
pub struct Args {
    /// Path to the settings file. Defaults to
    /// $XDG_CONFIG_HOME/codeplanr/config.json
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,

    /// Directory the plan's files are created in. Defaults to the current
    /// directory
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,

    /// Model to use for this run, overriding the configured one
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the CodePlanr CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Plan and execute a coding request
    #[command(alias = "a")]
    Agent(AgentArgs),
    /// Generate a plan without executing it
    #[command(alias = "p")]
    Plan(PlanArgs),
    /// Ask a general question and print a plain-text answer
    #[command(alias = "c")]
    Chat(ChatArgs),
    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// List the selectable models
    Models,
}

#[derive(ClapArgs)]
pub struct AgentArgs {
    /// What to build, e.g. "create a python file for sorting"
    pub request: String,
    /// Write the final plan as a markdown checklist to this file
    #[arg(short, long)]
    pub export: Option<PathBuf>,
}

#[derive(ClapArgs)]
pub struct PlanArgs {
    /// What to build, e.g. "create a python file for sorting"
    pub request: String,
}

#[derive(ClapArgs)]
pub struct ChatArgs {
    /// The question, e.g. "what is the difference between a vec and a slice?"
    pub message: String,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current settings with the API key masked
    Show,
    /// Store the OpenAI API key
    SetKey {
        /// The API key, usually starting with "sk-"
        key: String,
    },
    /// Select the model used for planning and code generation
    SetModel {
        /// One of the names listed by `codeplanr models`
        model: String,
    },
}
