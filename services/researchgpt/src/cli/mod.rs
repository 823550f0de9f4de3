//! CLI adapter for ResearchGPT
//!
//! Provides the command-line interface for research runs, the
//! interactive session and knowledge-base maintenance.
//!
//! # Architecture
//!
//! ```text
//!              +------------------+
//!              |     core/        |
//!              |  (domain logic)  |
//!              +--------+---------+
//!                       |
//!                       v
//!              +------------------+
//!              |      cli/        |
//!              | (clap adapter)   |
//!              +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};

/// ResearchGPT - AI Research Assistant
///
/// Ask a question; ResearchGPT searches the web, recalls related past
/// research from its knowledge base and has a language model write a
/// structured report.
#[derive(Parser, Debug)]
#[command(name = "researchgpt")]
#[command(version)]
#[command(about = "AI research assistant with web search and knowledge-base recall", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Research a question and print the report
    Research(commands::ResearchArgs),

    /// Interactive research session with history
    Session(commands::SessionArgs),

    /// Search the knowledge base of past research
    #[command(name = "kb-search")]
    KbSearch(commands::knowledge::SearchArgs),

    /// Show knowledge base statistics
    #[command(name = "kb-stats")]
    KbStats(commands::knowledge::StatsArgs),

    /// Delete every document from the knowledge base
    #[command(name = "kb-clear")]
    KbClear(commands::knowledge::ClearArgs),

    /// Show how a text would be split into chunks
    Chunk(commands::ChunkArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Show version and backend information
    #[command(name = "get-info")]
    GetInfo(commands::InfoArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  researchgpt completions bash > ~/.local/share/bash-completion/completions/researchgpt
    ///   zsh:   researchgpt completions zsh > ~/.zfunc/_researchgpt
    ///   fish:  researchgpt completions fish > ~/.config/fish/completions/researchgpt.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::{migrate_legacy_paths, XdgDirs};
    use std::sync::Arc;

    // Handle completions command early (doesn't need services)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    // Initialize XDG directories
    let xdg = XdgDirs::new();
    xdg.log_paths();
    xdg.ensure_dirs_exist()?;

    // Run migration from legacy paths (if needed)
    if let Err(e) = migrate_legacy_paths(&xdg) {
        output::print_warning(&format!("Migration issue: {e}"));
    }

    // Load configuration
    let config = Config::load_with_xdg(&xdg)?;
    config.log_config();

    // Commands that only read configuration never open the index
    let services = match cli.command {
        Commands::Chunk(args) => return commands::chunk::execute(args, &config, cli.format).await,
        Commands::ShowConfig(args) => {
            return commands::config::execute(args, &config, cli.format).await
        }
        Commands::GetInfo(args) => return commands::info::execute(args, &config, cli.format).await,
        _ => Arc::new(Services::new(config)?),
    };

    // Execute command
    match cli.command {
        Commands::Research(args) => commands::research::execute(args, &services, cli.format).await,
        Commands::Session(args) => commands::session::execute(args, &services, cli.format).await,
        Commands::KbSearch(args) => {
            commands::knowledge::execute_search(args, &services, cli.format).await
        }
        Commands::KbStats(args) => {
            commands::knowledge::execute_stats(args, &services, cli.format).await
        }
        Commands::KbClear(args) => {
            commands::knowledge::execute_clear(args, &services, cli.format).await
        }
        // Handled above
        Commands::Chunk(_)
        | Commands::ShowConfig(_)
        | Commands::GetInfo(_)
        | Commands::Completions(_) => unreachable!(),
    }
}
