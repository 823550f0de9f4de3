//! Knowledge base commands - search, stats and clear

use crate::cli::output::{colors, print_success, truncate_chars};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the kb-search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query
    pub query: String,

    /// Maximum number of results (1-100)
    #[arg(long, short = 'k', default_value = "3")]
    pub limit: usize,
}

/// Arguments for the kb-stats command
#[derive(Args, Debug)]
pub struct StatsArgs {}

/// Arguments for the kb-clear command
#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Confirm deletion of every stored chunk
    #[arg(long)]
    pub yes: bool,
}

/// Search result item
#[derive(Debug, Serialize)]
pub struct SearchResultItem {
    pub rank: usize,
    pub query: String,
    pub timestamp: String,
    pub score: f32,
    pub chunk_index: usize,
    pub text: String,
}

/// Search response
#[derive(Debug, Serialize)]
pub struct SearchResponseOutput {
    pub query: String,
    pub total_results: usize,
    pub results: Vec<SearchResultItem>,
}

/// Knowledge base statistics
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub documents: u64,
    pub persistent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Clear response
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub deleted: u64,
}

/// Execute the kb-search command
pub async fn execute_search(
    args: SearchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let limit = args.limit.clamp(1, 100);
    let hits = services.knowledge.similarity_search(&args.query, limit)?;

    let output = SearchResponseOutput {
        query: args.query.clone(),
        total_results: hits.len(),
        results: hits
            .into_iter()
            .enumerate()
            .map(|(i, hit)| SearchResultItem {
                rank: i + 1,
                query: hit.metadata.query,
                timestamp: hit.metadata.timestamp,
                score: hit.score,
                chunk_index: hit.chunk_index,
                text: hit.text,
            })
            .collect(),
    };

    match format {
        OutputFormat::Human => {
            if output.results.is_empty() {
                println!(
                    "No past research matches '{}'",
                    colors::label(&args.query)
                );
            } else {
                println!(
                    "Found {} result(s):\n",
                    colors::number(&output.total_results.to_string())
                );

                for result in &output.results {
                    println!(
                        "[{}] {} {} {}",
                        colors::rank(&result.rank.to_string()),
                        colors::query(&result.query),
                        colors::dim(&format!("- {}", result.timestamp)),
                        colors::score(&format!("(score: {:.2})", result.score))
                    );
                    // Indent and truncate text for display
                    for line in result.text.lines().filter(|l| !l.trim().is_empty()).take(4) {
                        println!("    {}", colors::dim(&truncate_chars(line, 100)));
                    }
                    println!();
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

/// Execute the kb-stats command
pub async fn execute_stats(
    _args: StatsArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let location = services
        .knowledge
        .location()
        .map(|p| p.to_string_lossy().into_owned());

    let stats = StatsResponse {
        documents: services.knowledge.count(),
        persistent: location.is_some(),
        location,
    };

    match format {
        OutputFormat::Human => {
            println!("KB Vectors: {}", colors::number(&stats.documents.to_string()));
            match &stats.location {
                Some(path) => println!("Location: {}", colors::file_path(path)),
                None => println!("Location: {}", colors::dim("in memory (not persisted)")),
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}

/// Execute the kb-clear command
pub async fn execute_clear(
    args: ClearArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if !args.yes {
        return Err(format!(
            "Refusing to delete {} knowledge base document(s) without --yes",
            services.knowledge.count()
        )
        .into());
    }

    let deleted = services.knowledge.clear()?;
    let response = ClearResponse { deleted };

    match format {
        OutputFormat::Human => {
            print_success(&format!("Deleted {deleted} document(s) from the knowledge base"));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
