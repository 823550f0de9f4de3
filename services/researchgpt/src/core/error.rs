//! Error types and error handling for ResearchGPT.
//!
//! This module defines the error type used throughout the
//! application. Context-gathering failures (web search, knowledge
//! base lookup) are degraded to placeholder text by the research
//! service; everything else surfaces through this type.

use thiserror::Error;

/// Result type alias for ResearchGPT operations
pub type Result<T> = std::result::Result<T, ResearchError>;

/// Main error type for ResearchGPT
#[derive(Error, Debug)]
pub enum ResearchError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid chunking parameters: {0}")]
    InvalidChunking(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("API key not found: set {0} or llm.api_key in the config file")]
    MissingApiKey(String),

    #[error("Web search failed: {0}")]
    SearchFailed(String),

    #[error("Language model request failed: {0}")]
    LlmFailed(String),

    #[error("Knowledge base error: {0}")]
    StorageError(String),

    #[error("History entry not found: {0}")]
    RecordNotFound(usize),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl ResearchError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResearchError::RecordNotFound(_))
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            ResearchError::InvalidQuery(_)
                | ResearchError::InvalidInput(_)
                | ResearchError::InvalidChunking(_)
                | ResearchError::ConfigError(_)
                | ResearchError::MissingApiKey(_)
        )
    }

    /// Check if the failure came from a remote service
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ResearchError::SearchFailed(_)
                | ResearchError::LlmFailed(_)
                | ResearchError::HttpError(_)
        )
    }
}
