//! Info command - show version and backend information

use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::error::Result as CoreResult;
use crate::core::search::DuckDuckGoSearch;
use crate::core::storage::{KnowledgeBase, KnowledgeStore, SCHEMA_VERSION};
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;

/// Arguments for the info command
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Show detailed information
    #[arg(long, short = 'd')]
    pub detailed: bool,
}

/// Backend information response
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub name: String,
    pub version: String,
    pub model: String,
    pub web_search: String,
    pub template: String,
    pub data_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kb_documents: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kb_schema_version: Option<u32>,
}

/// Documents in the persistent index, without creating one if absent
fn stored_documents(config: &Config) -> CoreResult<u64> {
    let dir = &config.knowledge.index_dir;
    if !config.knowledge.persist || !dir.join("meta.json").exists() {
        return Ok(0);
    }
    Ok(KnowledgeBase::open(dir)?.count())
}

/// Execute the info command
///
/// Reads the configuration only; no backend or index writer is created.
pub async fn execute(
    args: InfoArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    // Get data directory from XDG
    let xdg = XdgDirs::new();
    let data_dir = xdg.data_dir.to_string_lossy().into_owned();

    let (kb_documents, kb_schema_version) = if args.detailed {
        (Some(stored_documents(config)?), Some(SCHEMA_VERSION))
    } else {
        (None, None)
    };

    let web_search = if config.web.enabled {
        DuckDuckGoSearch::NAME
    } else {
        "disabled"
    };

    let info = InfoResponse {
        name: "researchgpt".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: config.llm.model.clone(),
        web_search: web_search.to_string(),
        template: config.research.template.to_string(),
        data_dir,
        kb_documents,
        kb_schema_version,
    };

    match format {
        OutputFormat::Human => {
            println!("researchgpt {}", info.version);
            println!("Model: {}", info.model);
            println!("Web search: {}", info.web_search);
            println!("Template: {}", info.template);
            println!("Data: {}", info.data_dir);
            if let Some(count) = info.kb_documents {
                println!("KB Vectors: {count}");
            }
            if let Some(version) = info.kb_schema_version {
                println!("KB schema: v{version}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
    }

    Ok(())
}
