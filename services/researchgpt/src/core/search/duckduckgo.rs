//! DuckDuckGo HTML search backend.
//!
//! Scrapes the JavaScript-free results page. Each result carries a
//! `result__a` title anchor whose `href` is a redirect
//! (`//duckduckgo.com/l/?uddg=<encoded target>`) and a
//! `result__snippet` element with the summary.

use crate::core::config::WebConfig;
use crate::core::error::{Result, ResearchError};
use crate::core::search::WebSearch;
use crate::core::types::WebResult;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (X11; Linux x86_64) researchgpt/",
    env!("CARGO_PKG_VERSION")
);

static TITLE_ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<a\b([^>]*\bclass="[^"]*\bresult__a\b[^"]*"[^>]*)>(.*?)</a>"#)
        .expect("valid regex")
});

static SNIPPET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<(a|div|td)\b[^>]*\bclass="[^"]*\bresult__snippet\b[^"]*"[^>]*>(.*?)</(?:a|div|td)>"#)
        .expect("valid regex")
});

static HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\bhref="([^"]*)""#).expect("valid regex"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Render width for fragments; wide enough that titles never wrap
const TEXT_WIDTH: usize = 10_000;

/// Web search through `html.duckduckgo.com`
#[derive(Debug, Clone)]
pub struct DuckDuckGoSearch {
    client: reqwest::Client,
    endpoint: String,
    region: String,
}

impl DuckDuckGoSearch {
    /// Backend name reported by [`WebSearch::name`]
    pub const NAME: &'static str = "duckduckgo";

    /// Build a client from the `[web]` config section
    pub fn from_config(config: &WebConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_sec))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            region: config.region.clone(),
        })
    }

    /// Full request URL for `query`
    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}?q={}&kl={}",
            self.endpoint,
            urlencoding::encode(query),
            urlencoding::encode(&self.region)
        )
    }
}

#[async_trait]
impl WebSearch for DuckDuckGoSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<WebResult>> {
        let url = self.search_url(query);
        tracing::debug!("DuckDuckGo request: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ResearchError::SearchFailed(format!(
                "DuckDuckGo returned HTTP {}",
                status.as_u16()
            )));
        }
        // Rate-limited requests get a captcha page with a 200 status
        if body.contains("anomaly-modal") {
            return Err(ResearchError::SearchFailed(
                "DuckDuckGo rate limit (captcha page)".to_string(),
            ));
        }

        let results = parse_results(&body, max_results);
        tracing::debug!("DuckDuckGo returned {} result(s)", results.len());
        Ok(results)
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}

/// Extract up to `max_results` results from a DuckDuckGo HTML page
pub fn parse_results(html: &str, max_results: usize) -> Vec<WebResult> {
    let anchors: Vec<_> = TITLE_ANCHOR.captures_iter(html).collect();
    let mut results = Vec::new();

    for (i, caps) in anchors.iter().enumerate() {
        if results.len() >= max_results {
            break;
        }

        let whole = caps.get(0).map_or(0..0, |m| m.range());
        let block_end = anchors
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(html.len(), |m| m.start());
        let block = &html[whole.end..block_end];

        let Some(href) = HREF.captures(&caps[1]).map(|h| h[1].to_string()) else {
            continue;
        };
        let Some(url) = resolve_link(&href) else {
            continue;
        };

        let title = html_to_text(&caps[2]);
        if title.is_empty() {
            continue;
        }
        let body = SNIPPET
            .captures(block)
            .map(|s| html_to_text(&s[2]))
            .unwrap_or_default();

        results.push(WebResult { title, body, url });
    }

    results
}

/// Turn a result `href` into the target URL; ad links yield `None`
fn resolve_link(href: &str) -> Option<String> {
    let href = html_to_text(href);

    if href.contains("duckduckgo.com/y.js") {
        return None;
    }

    if let Some(pos) = href.find("uddg=") {
        let encoded = href[pos + 5..].split('&').next().unwrap_or_default();
        return urlencoding::decode(encoded).ok().map(|url| url.into_owned());
    }

    if let Some(rest) = href.strip_prefix("//") {
        return Some(format!("https://{rest}"));
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href);
    }

    None
}

/// Render an HTML fragment as plain text on a single line
fn html_to_text(fragment: &str) -> String {
    let text = html2text::config::plain_no_decorate()
        .string_from_read(fragment.as_bytes(), TEXT_WIDTH)
        .unwrap_or_else(|e| {
            tracing::debug!("Keeping raw fragment, html2text failed: {}", e);
            fragment.to_string()
        });
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}
