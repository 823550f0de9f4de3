//! Web search for fresh research context.
//!
//! Backends implement [`WebSearch`]; the research service only sees
//! the formatted text produced by [`format_web_results`].

mod duckduckgo;

pub use duckduckgo::{parse_results, DuckDuckGoSearch};

use crate::core::error::Result;
use crate::core::types::WebResult;
use async_trait::async_trait;

/// Placeholder used when a search returns nothing
pub const NO_RESULTS: &str = "No results found.";

/// A web search backend
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Return at most `max_results` results for `query`
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<WebResult>>;

    /// Short backend name for logs and `get-info`
    fn name(&self) -> &str;
}

/// Render results as numbered sources for the prompt
pub fn format_web_results(results: &[WebResult]) -> String {
    if results.is_empty() {
        return NO_RESULTS.to_string();
    }

    results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "Source {}:\nTitle: {}\nContent: {}\nURL: {}\n",
                i + 1,
                r.title,
                r.body,
                r.url
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Placeholder used in place of results when the search failed
pub fn search_error_text(message: &str) -> String {
    format!("Search error: {message}")
}
