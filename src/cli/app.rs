//! Main CLI application structure

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{shell, task};
use crate::storage::{Config, TaskStore};

#[derive(Parser)]
#[command(name = "taskq")]
#[command(author, version, about = "Priority task queue with dependency-gated execution")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Task store file (defaults to config, then ./tasks.json)
    #[arg(long, global = true, env = "TASKQ_FILE")]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a pending task
    ///
    /// Examples:
    ///   taskq add build 1
    ///   taskq add deploy 2 --dep build --due 2024-05-01
    ///   taskq add cleanup -3 --deps "build, deploy"
    Add {
        /// Task name
        name: String,

        /// Integer priority, lower runs first
        #[arg(allow_negative_numbers = true)]
        priority: String,

        /// Task that must be completed first (repeatable)
        #[arg(long = "dep")]
        dep: Vec<String>,

        /// Comma-separated dependencies
        #[arg(long)]
        deps: Option<String>,

        /// Due date, used only for ordering the list
        #[arg(long)]
        due: Option<String>,
    },

    /// List pending tasks by priority, then due date
    List,

    /// Mark a pending task as completed
    Done {
        /// Task name
        name: String,
    },

    /// Show the highest-priority task if its dependencies are completed
    Next,

    /// Show store summary
    Status,

    /// Interactive menu
    Shell,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load().context("Failed to load configuration")?;
    let format = cli
        .format
        .unwrap_or_else(|| config.default_format().into());
    let output = Output::new(format, cli.verbose);

    let path = config.store_file(cli.file.as_deref());
    output.verbose(&format!("Using task store: {}", path.display()));

    let mut store = TaskStore::load(&path)
        .with_context(|| format!("Failed to load task store: {}", path.display()))?;
    output.verbose(&format!(
        "Loaded {} pending and {} completed tasks",
        store.pending_len(),
        store.completed().len()
    ));

    match cli.command {
        Commands::Add { name, priority, dep, deps, due } => {
            let mut dependencies = dep;
            if let Some(raw) = deps {
                dependencies.extend(task::parse_dependency_list(&raw));
            }
            task::add(&mut store, &output, &name, &priority, dependencies, due)?
        }
        Commands::List => task::list(&store, &output)?,
        Commands::Done { name } => task::done(&mut store, &output, &name)?,
        Commands::Next => task::next(&store, &output)?,
        Commands::Status => task::status(&store, &output)?,
        Commands::Shell => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            shell::run(&mut store, &mut stdin.lock(), &mut stdout.lock())?
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}
