//! Configuration management for ResearchGPT.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{Result, ResearchError};
use crate::core::prompts::PromptStyle;
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    #[serde(default)]
    pub research: ResearchConfig,
}

/// Chat-completion backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    /// OpenAI-compatible base URL
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// Model identifier
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// API key (prefer the environment variable)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable consulted when `api_key` is unset
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Send requests without credentials (local servers)
    #[serde(default)]
    pub allow_anonymous: bool,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Completion token limit
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_sec: u64,
}

/// Web search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebConfig {
    /// Include web results in the prompt
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// DuckDuckGo HTML endpoint
    #[serde(default = "default_web_endpoint")]
    pub endpoint: String,

    /// Results per query
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// DuckDuckGo region code
    #[serde(default = "default_region")]
    pub region: String,

    /// Request timeout in seconds
    #[serde(default = "default_web_timeout")]
    pub timeout_sec: u64,
}

/// Knowledge base configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KnowledgeConfig {
    /// Consult and grow the knowledge base
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Keep the index on disk between runs
    #[serde(default = "default_true")]
    pub persist: bool,

    /// Index directory (used when `persist` is set)
    #[serde(default = "default_index_dir")]
    pub index_dir: PathBuf,

    /// Past-research chunks placed in each prompt
    #[serde(default = "default_k")]
    pub k: usize,

    /// Characters of each chunk shown in the prompt
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,

    /// Characters per chunk (not bytes!)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Character overlap between consecutive chunks
    #[serde(default = "default_overlap")]
    pub overlap: usize,
}

/// Research flow configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResearchConfig {
    /// Prompt template
    #[serde(default)]
    pub template: PromptStyle,

    /// Maximum query length in characters
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,

    /// Directory for downloaded reports
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_llm_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_llm_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    3000
}

fn default_llm_timeout() -> u64 {
    120
}

fn default_web_endpoint() -> String {
    "https://html.duckduckgo.com/html/".to_string()
}

fn default_max_results() -> usize {
    5
}

fn default_region() -> String {
    "wt-wt".to_string()
}

fn default_web_timeout() -> u64 {
    20
}

fn default_index_dir() -> PathBuf {
    PathBuf::from("./data/knowledge")
}

fn default_k() -> usize {
    3
}

fn default_excerpt_chars() -> usize {
    200
}

fn default_chunk_size() -> usize {
    1000
}

fn default_overlap() -> usize {
    200
}

fn default_max_query_length() -> usize {
    2000
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("./reports")
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            api_key: None,
            api_key_env: default_api_key_env(),
            allow_anonymous: false,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_sec: default_llm_timeout(),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_web_endpoint(),
            max_results: default_max_results(),
            region: default_region(),
            timeout_sec: default_web_timeout(),
        }
    }
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            persist: true,
            index_dir: default_index_dir(),
            k: default_k(),
            excerpt_chars: default_excerpt_chars(),
            chunk_size: default_chunk_size(),
            overlap: default_overlap(),
        }
    }
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            template: PromptStyle::default(),
            max_query_length: default_max_query_length(),
            reports_dir: default_reports_dir(),
        }
    }
}

impl LlmConfig {
    /// Resolve the API key from config, then from the environment
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let value = env::var(name).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!("Ignoring invalid value for {}: {:?}", name, value);
            None
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ResearchError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. RESEARCHGPT_CONFIG env var
    /// 2. XDG config file (~/.config/researchgpt/config.toml)
    /// 3. Legacy ./researchgpt.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("RESEARCHGPT_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("researchgpt.toml").exists() {
                Self::from_file("researchgpt.toml")?
            } else {
                Self::default()
            }
        };

        // Relative defaults move under the XDG data directory
        if config.knowledge.index_dir == default_index_dir() {
            config.knowledge.index_dir = xdg.knowledge_dir();
        }
        if config.research.reports_dir == default_reports_dir() {
            config.research.reports_dir = xdg.reports_dir();
        }

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // LLM configuration
        if let Ok(base_url) = env::var("RESEARCHGPT_LLM_BASE_URL") {
            self.llm.base_url = base_url;
        }
        if let Ok(model) = env::var("RESEARCHGPT_LLM_MODEL") {
            self.llm.model = model;
        }
        if let Ok(key) = env::var("RESEARCHGPT_API_KEY") {
            if !key.trim().is_empty() {
                self.llm.api_key = Some(key);
            }
        }

        // Research configuration
        if let Some(template) = parse_env("RESEARCHGPT_TEMPLATE") {
            self.research.template = template;
        }
        if let Ok(dir) = env::var("RESEARCHGPT_REPORTS_DIR") {
            self.research.reports_dir = PathBuf::from(dir);
        }

        // Web configuration
        if let Some(n) = parse_env("RESEARCHGPT_MAX_RESULTS") {
            self.web.max_results = n;
        }

        // Knowledge configuration
        if let Some(k) = parse_env("RESEARCHGPT_KB_K") {
            self.knowledge.k = k;
        }
        if let Some(persist) = parse_env("RESEARCHGPT_KB_PERSIST") {
            self.knowledge.persist = persist;
        }
        if let Some(size) = parse_env("RESEARCHGPT_CHUNK_SIZE") {
            self.knowledge.chunk_size = size;
        }
        if let Some(overlap) = parse_env("RESEARCHGPT_OVERLAP") {
            self.knowledge.overlap = overlap;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: &str| Err(ResearchError::ConfigError(msg.to_string()));

        // Knowledge config
        if self.knowledge.chunk_size == 0 {
            return fail("Chunk size must be non-zero");
        }
        if self.knowledge.overlap >= self.knowledge.chunk_size {
            return fail("Overlap must be less than chunk size");
        }
        if self.knowledge.k == 0 {
            return fail("Knowledge base k must be non-zero");
        }

        // Web config
        if self.web.max_results == 0 || self.web.max_results > 25 {
            return fail("Max results must be between 1 and 25");
        }
        if self.web.timeout_sec == 0 {
            return fail("Web search timeout must be non-zero");
        }

        // LLM config
        if self.llm.base_url.trim().is_empty() {
            return fail("LLM base URL must not be empty");
        }
        if self.llm.model.trim().is_empty() {
            return fail("LLM model must not be empty");
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return fail("Temperature must be between 0.0 and 2.0");
        }
        if self.llm.max_tokens == 0 {
            return fail("Max tokens must be non-zero");
        }
        if self.llm.timeout_sec == 0 {
            return fail("LLM timeout must be non-zero");
        }

        // Research config
        if self.research.max_query_length == 0 {
            return fail("Max query length must be non-zero");
        }

        Ok(())
    }

    /// Log configuration (redacting sensitive values)
    pub fn log_config(&self) {
        let key_state = if self.llm.resolve_api_key().is_some() {
            "set"
        } else {
            "missing"
        };

        tracing::info!("Configuration loaded:");
        tracing::info!("  LLM: {} @ {}", self.llm.model, self.llm.base_url);
        tracing::info!("  API key: {} ({})", key_state, self.llm.api_key_env);
        tracing::info!(
            "  Temperature: {}, max tokens: {}",
            self.llm.temperature,
            self.llm.max_tokens
        );
        tracing::info!(
            "  Web search: {} ({} results)",
            if self.web.enabled { "on" } else { "off" },
            self.web.max_results
        );
        tracing::info!(
            "  Knowledge base: {} (persist: {}, k: {})",
            if self.knowledge.enabled { "on" } else { "off" },
            self.knowledge.persist,
            self.knowledge.k
        );
        tracing::info!("  Index dir: {:?}", self.knowledge.index_dir);
        tracing::info!(
            "  Chunking: {} chars, {} overlap",
            self.knowledge.chunk_size,
            self.knowledge.overlap
        );
        tracing::info!("  Template: {}", self.research.template);
        tracing::info!("  Reports dir: {:?}", self.research.reports_dir);
    }
}
