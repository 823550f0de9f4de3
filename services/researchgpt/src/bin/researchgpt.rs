//! ResearchGPT CLI - AI research assistant
//!
//! Searches the web, recalls related past research from a local
//! knowledge base and asks a chat model to write a report.
//!
//! # Examples
//!
//! ```bash
//! # One-shot research, saved to the reports directory
//! researchgpt research "What are the latest developments in quantum computing?" --save
//!
//! # Interactive session with history
//! researchgpt session --template brief
//!
//! # Look through past research
//! researchgpt kb-search "quantum error correction" -k 5
//! ```
//!
//! Logs go to stderr. Set `RESEARCHGPT_LOG` to an `EnvFilter`
//! directive and `RESEARCHGPT_LOG_FORMAT=json` for JSON lines.

use clap::Parser;
use researchgpt::cli::output::print_error;
use researchgpt::cli::{run, Cli};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging(verbose: u8) {
    let default_directive = match verbose {
        0 => "researchgpt=warn",
        1 => "researchgpt=info",
        _ => "researchgpt=debug",
    };
    let filter =
        EnvFilter::try_from_env("RESEARCHGPT_LOG").unwrap_or_else(|_| default_directive.into());

    let json = std::env::var("RESEARCHGPT_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr).compact()) // stdout carries reports
            .init();
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
