//! Research command - run one query and print the report

use crate::cli::output::{colors, format_duration_ms_colored};
use crate::cli::OutputFormat;
use crate::core::history::export_report;
use crate::core::prompts::PromptStyle;
use crate::core::research::ResearchRequest;
use crate::core::services::Services;
use crate::core::types::ResearchOutcome;
use clap::Args;
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Arguments for the research command
#[derive(Args, Debug)]
pub struct ResearchArgs {
    /// Research question
    pub query: String,

    /// Prompt template (report, brief, academic)
    #[arg(long, short = 't')]
    pub template: Option<PromptStyle>,

    /// Skip the web search
    #[arg(long)]
    pub no_web: bool,

    /// Skip knowledge-base recall and indexing
    #[arg(long)]
    pub no_kb: bool,

    /// Maximum number of web results (1-25)
    #[arg(long, short = 'n')]
    pub max_results: Option<usize>,

    /// Save the report as a text file (defaults to the reports directory)
    #[arg(long, value_name = "DIR")]
    pub save: Option<Option<PathBuf>>,
}

/// Research response
#[derive(Debug, Serialize)]
pub struct ResearchResponse<'a> {
    #[serde(flatten)]
    pub outcome: &'a ResearchOutcome,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<&'a Path>,
}

/// Build a request from the flags shared by `research` and `session`
pub fn build_request(
    query: &str,
    template: Option<PromptStyle>,
    no_web: bool,
    no_kb: bool,
    max_results: Option<usize>,
) -> ResearchRequest {
    let mut request = ResearchRequest::new(query);
    if let Some(template) = template {
        request = request.with_template(template);
    }
    if no_web {
        request = request.without_web();
    }
    if no_kb {
        request = request.without_kb();
    }
    if let Some(n) = max_results {
        request = request.with_max_results(n.clamp(1, 25));
    }
    request
}

/// Execute the research command
pub async fn execute(
    args: ResearchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = build_request(
        &args.query,
        args.template,
        args.no_web,
        args.no_kb,
        args.max_results,
    );

    let outcome = services.research.run(&request).await?;

    let saved_to = match args.save {
        Some(dir) => {
            let dir = dir.unwrap_or_else(|| services.config.research.reports_dir.clone());
            Some(export_report(&outcome.record, &dir)?)
        }
        None => None,
    };

    let mut stdout = io::stdout().lock();
    write_outcome(&mut stdout, &outcome, saved_to.as_deref(), format)
}

/// Render a research outcome in the requested format
pub fn write_outcome<W: Write>(
    out: &mut W,
    outcome: &ResearchOutcome,
    saved_to: Option<&Path>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Human => {
            writeln!(
                out,
                "{} {}\n",
                colors::label("Research Report"),
                colors::dim(&format!("({})", outcome.record.timestamp))
            )?;
            writeln!(out, "{}\n", outcome.record.report.trim_end())?;

            if !outcome.sources.is_empty() {
                writeln!(out, "{}", colors::label("Web sources:"))?;
                for (i, source) in outcome.sources.iter().enumerate() {
                    writeln!(
                        out,
                        "[{}] {} {}",
                        colors::rank(&(i + 1).to_string()),
                        source.title,
                        colors::file_path(&source.url)
                    )?;
                }
                writeln!(out)?;
            }

            let kb_status = if outcome.indexed {
                format!(
                    "{} chunk(s) added to knowledge base",
                    colors::number(&outcome.chunks_indexed.to_string())
                )
            } else {
                "knowledge base not updated".to_string()
            };
            writeln!(
                out,
                "{} {} past excerpt(s) used, {} in {}",
                colors::success("Research complete:"),
                colors::number(&outcome.kb_hits.to_string()),
                kb_status,
                format_duration_ms_colored(outcome.duration_ms)
            )?;

            if let Some(path) = saved_to {
                writeln!(
                    out,
                    "Saved to {}",
                    colors::file_path(&path.display().to_string())
                )?;
            }
        }
        OutputFormat::Json => {
            let response = ResearchResponse { outcome, saved_to };
            serde_json::to_writer_pretty(&mut *out, &response)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
