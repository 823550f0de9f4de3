//! Config command - show current configuration

use crate::cli::output::print_header;
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;

const REDACTED: &str = "<redacted>";

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub config_file: String,
    pub api_key: &'static str,
    #[serde(flatten)]
    pub config: Config,
}

/// Copy of `config` that is safe to print
pub fn redacted(config: &Config) -> Config {
    let mut config = config.clone();
    if config.llm.api_key.is_some() {
        config.llm.api_key = Some(REDACTED.to_string());
    }
    config
}

/// Execute the config command
pub async fn execute(
    _args: ConfigArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let xdg = XdgDirs::new();
    let api_key = if config.llm.resolve_api_key().is_some() {
        "set"
    } else {
        "missing"
    };

    let response = ConfigResponse {
        config_file: xdg.config_file().to_string_lossy().into_owned(),
        api_key,
        config: redacted(config),
    };

    match format {
        OutputFormat::Human => {
            let config = &response.config;
            print_header("Configuration:");
            println!("  config_file: {}", response.config_file);
            println!("  llm:");
            println!("    base_url: {}", config.llm.base_url);
            println!("    model: {}", config.llm.model);
            println!("    api_key: {} ({})", response.api_key, config.llm.api_key_env);
            println!("    temperature: {}", config.llm.temperature);
            println!("    max_tokens: {}", config.llm.max_tokens);
            println!("  web:");
            println!("    enabled: {}", config.web.enabled);
            println!("    max_results: {}", config.web.max_results);
            println!("    region: {}", config.web.region);
            println!("  knowledge:");
            println!("    enabled: {}", config.knowledge.enabled);
            println!("    persist: {}", config.knowledge.persist);
            println!("    index_dir: {}", config.knowledge.index_dir.display());
            println!("    k: {}", config.knowledge.k);
            println!("    chunk_size: {}", config.knowledge.chunk_size);
            println!("    overlap: {}", config.knowledge.overlap);
            println!("  research:");
            println!("    template: {}", config.research.template);
            println!("    max_query_length: {}", config.research.max_query_length);
            println!("    reports_dir: {}", config.research.reports_dir.display());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
