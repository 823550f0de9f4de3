//! Session command - interactive research with in-memory history
//!
//! Every non-command line is a research question. Colon commands
//! browse, export and clear the history kept for this session.

use crate::cli::commands::research::{build_request, write_outcome};
use crate::cli::output::{colors, truncate_chars};
use crate::cli::OutputFormat;
use crate::core::history::export_report;
use crate::core::prompts::PromptStyle;
use crate::core::research::ResearchSession;
use crate::core::services::Services;
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

const PROMPT: &str = "research> ";

/// Characters of a question shown in the history list
const HISTORY_TITLE_CHARS: usize = 70;

const HELP: &str = "\
Type a question and press enter to start research.

Commands:
  :history          list past research (newest first)
  :show N           print report N from the history
  :save N [DIR]     save report N as a text file
  :clear            clear the history
  :stats            show history and knowledge base counts
  :help             show this help
  :quit             end the session";

/// Arguments for the session command
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Prompt template (report, brief, academic)
    #[arg(long, short = 't')]
    pub template: Option<PromptStyle>,

    /// Skip the web search
    #[arg(long)]
    pub no_web: bool,

    /// Skip knowledge-base recall and indexing
    #[arg(long)]
    pub no_kb: bool,

    /// Default directory for `:save` (defaults to the reports directory)
    #[arg(long, value_name = "DIR")]
    pub save_dir: Option<PathBuf>,
}

/// A parsed line of session input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Research(String),
    History,
    Show(usize),
    Save(usize, Option<PathBuf>),
    Clear,
    Stats,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

/// Parse one line of session input
pub fn parse_command(line: &str) -> SessionCommand {
    let line = line.trim();
    if line.is_empty() {
        return SessionCommand::Empty;
    }

    let Some(command) = line.strip_prefix(':') else {
        return SessionCommand::Research(line.to_string());
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let mut index = || -> Result<usize, String> {
        parts
            .next()
            .ok_or_else(|| format!("':{name}' needs an entry number"))?
            .parse::<usize>()
            .map_err(|_| format!("':{name}' needs an entry number"))
    };

    match name {
        "history" | "h" => SessionCommand::History,
        "show" => match index() {
            Ok(n) => SessionCommand::Show(n),
            Err(e) => SessionCommand::Invalid(e),
        },
        "save" => match index() {
            Ok(n) => {
                let dir = command
                    .split_whitespace()
                    .nth(2)
                    .map(PathBuf::from);
                SessionCommand::Save(n, dir)
            }
            Err(e) => SessionCommand::Invalid(e),
        },
        "clear" => SessionCommand::Clear,
        "stats" => SessionCommand::Stats,
        "help" | "?" => SessionCommand::Help,
        "quit" | "q" | "exit" => SessionCommand::Quit,
        other => SessionCommand::Invalid(format!("Unknown command ':{other}' (try :help)")),
    }
}

/// Execute the session command on stdin/stdout
pub async fn execute(
    args: SessionArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();

    let session = run_loop(&args, services, format, input, &mut stdout).await?;
    tracing::debug!("Session ended with {} record(s)", session.history().len());
    Ok(())
}

/// Drive a session from `input` until `:quit` or end of input.
///
/// Research failures are reported inline and the session continues.
pub async fn run_loop<R, W>(
    args: &SessionArgs,
    services: &Arc<Services>,
    format: OutputFormat,
    input: R,
    out: &mut W,
) -> Result<ResearchSession, Box<dyn std::error::Error>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut session = ResearchSession::new();
    let mut lines = input.lines();

    if format == OutputFormat::Human {
        writeln!(
            out,
            "{} Type a question, or :help for commands.",
            colors::label("ResearchGPT session.")
        )?;
    }

    loop {
        if format == OutputFormat::Human {
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            SessionCommand::Empty => {}
            SessionCommand::Quit => break,
            SessionCommand::Help => writeln!(out, "{HELP}")?,
            SessionCommand::Invalid(message) => report_error(out, &message)?,
            SessionCommand::Research(query) => {
                let request =
                    build_request(&query, args.template, args.no_web, args.no_kb, None);
                match session.research(&services.research, &request).await {
                    Ok(outcome) => write_outcome(out, &outcome, None, format)?,
                    Err(e) => report_error(out, &e.to_string())?,
                }
            }
            SessionCommand::History => write_history(out, &session)?,
            SessionCommand::Show(n) => match session.history().get(n) {
                Ok(record) => {
                    writeln!(
                        out,
                        "{} {}\n",
                        colors::query(&record.query),
                        colors::dim(&format!("({})", record.timestamp))
                    )?;
                    writeln!(out, "{}", record.report.trim_end())?;
                }
                Err(e) => report_error(out, &e.to_string())?,
            },
            SessionCommand::Save(n, dir) => {
                let dir = dir
                    .or_else(|| args.save_dir.clone())
                    .unwrap_or_else(|| services.config.research.reports_dir.clone());
                let saved = session
                    .history()
                    .get(n)
                    .and_then(|record| export_report(record, &dir));
                match saved {
                    Ok(path) => writeln!(
                        out,
                        "{} {}",
                        colors::success("Saved to"),
                        colors::file_path(&path.display().to_string())
                    )?,
                    Err(e) => report_error(out, &e.to_string())?,
                }
            }
            SessionCommand::Clear => {
                let removed = session.history_mut().clear();
                writeln!(
                    out,
                    "{} {} record(s)",
                    colors::success("Cleared"),
                    colors::number(&removed.to_string())
                )?;
            }
            SessionCommand::Stats => {
                writeln!(
                    out,
                    "Total Research: {}",
                    colors::number(&session.history().len().to_string())
                )?;
                writeln!(
                    out,
                    "KB Vectors: {}",
                    colors::number(&services.knowledge.count().to_string())
                )?;
            }
        }
    }

    Ok(session)
}

fn write_history<W: Write>(out: &mut W, session: &ResearchSession) -> io::Result<()> {
    let history = session.history();
    if history.is_empty() {
        return writeln!(out, "No history yet.");
    }

    for (i, record) in history.newest_first().enumerate() {
        writeln!(
            out,
            "[{}] {} - {}",
            colors::rank(&(i + 1).to_string()),
            colors::query(&truncate_chars(&record.query, HISTORY_TITLE_CHARS)),
            colors::dim(&record.timestamp)
        )?;
    }
    Ok(())
}

fn report_error<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{}: {}", colors::error("Error"), message)
}
