//! CLI entry point for taskdeck.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use taskdeck_app::{AppConfig, MemoryWorkspace, Seed, TaskBoard};
use taskdeck_core::{CategoryId, Priority, SortKey, StatusFilter, TaskId};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod commands;
mod render;

/// Task board with categories, search and progress statistics.
#[derive(Parser, Debug)]
#[command(
    name = "taskdeck",
    version,
    about = "taskdeck: tasks grouped by category with filters, search and progress stats"
)]
struct Cli {
    /// Config file (defaults to .taskdeck/config.toml under the current directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed JSON replacing the built-in sample board.
    #[arg(long, global = true)]
    seed: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Skip the simulated store latency.
    #[arg(long, global = true)]
    no_latency: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the board for a category, status tab and search.
    List {
        /// Category id, or `all`.
        #[arg(long)]
        category: Option<String>,
        /// Status tab: all, pending, completed or high.
        #[arg(long)]
        status: Option<StatusFilter>,
        #[arg(long)]
        search: Option<String>,
    },

    /// Show archived tasks.
    Archived {
        #[arg(long)]
        search: Option<String>,
    },

    /// Show progress and tab counts.
    Stats,

    /// Show the dashboard summary.
    Summary,

    /// List categories with their task counts.
    Categories,

    /// Create, rename or delete a category.
    Category {
        #[command(subcommand)]
        action: CategoryCommand,
    },

    /// Query tasks by field, text and date range.
    Find {
        #[arg(long)]
        completed: Option<bool>,
        #[arg(long)]
        priority: Option<String>,
        /// Category name.
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
        /// Earliest date (YYYY-MM-DD), checked against the due or creation date.
        #[arg(long)]
        due_from: Option<String>,
        /// Latest date (YYYY-MM-DD), checked against the due or creation date.
        #[arg(long)]
        due_to: Option<String>,
        #[arg(long, default_value_t = SortKey::Priority)]
        sort: SortKey,
    },

    /// Show a single task.
    Show {
        #[arg(long)]
        id: TaskId,
    },

    /// Create a new task.
    New {
        #[arg(long)]
        title: String,
        /// Category name.
        #[arg(long)]
        category: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
        /// Due date (YYYY-MM-DD).
        #[arg(long)]
        due: Option<String>,
    },

    /// Edit a task; omitted fields keep their current value.
    Edit {
        #[arg(long)]
        id: TaskId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
        /// Due date (YYYY-MM-DD).
        #[arg(long)]
        due: Option<String>,
        /// Remove the due date.
        #[arg(long, conflicts_with = "due")]
        clear_due: bool,
    },

    /// Flip a task between pending and completed.
    Toggle {
        #[arg(long)]
        id: TaskId,
    },

    /// Move a task to the archive.
    Archive {
        #[arg(long)]
        id: TaskId,
    },

    /// Bring a task back from the archive.
    Restore {
        #[arg(long)]
        id: TaskId,
    },

    /// Delete a task permanently.
    Delete {
        #[arg(long)]
        id: TaskId,
    },

    /// Delete every archived task.
    ClearArchived,
}

#[derive(Subcommand, Debug)]
enum CategoryCommand {
    /// Create a category.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },

    /// Rename a category along with the tasks that use it.
    Rename {
        #[arg(long)]
        id: CategoryId,
        #[arg(long)]
        name: String,
    },

    /// Delete a category; its tasks keep the old name.
    Delete {
        #[arg(long)]
        id: CategoryId,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    install_tracing();
    tokio::runtime::Runtime::new()?.block_on(execute(cli))
}

async fn execute(cli: Cli) -> Result<()> {
    let Cli {
        config,
        seed,
        format,
        no_latency,
        cmd,
    } = cli;

    let config = load_config(config.as_deref(), no_latency)?;
    let seed = Seed::load(seed.or_else(|| config.seed_path()).as_deref())?;
    let mut board = TaskBoard::new(MemoryWorkspace::in_memory(&config, seed));
    board.load().await.context("failed to load the board")?;
    commands::run(cmd, &mut board, &config, format).await
}

fn load_config(path: Option<&Path>, no_latency: bool) -> Result<AppConfig> {
    let mut config = match path {
        Some(path) => AppConfig::from_path(path)?,
        None => {
            let cwd = std::env::current_dir().context("failed to resolve current directory")?;
            AppConfig::from_workdir(cwd)?
        }
    };
    if no_latency {
        config = config.without_latency();
    }
    Ok(config)
}

fn install_tracing() {
    // RUST_LOG overrides the filter; the default level is INFO.
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}
