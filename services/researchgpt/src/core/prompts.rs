//! Prompt templates for report generation.
//!
//! Each template receives the question, the formatted web sources
//! and the formatted knowledge-base excerpts through the
//! `{query}`, `{web_results}` and `{kb_results}` placeholders.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(query|web_results|kb_results)\}").expect("valid regex"));

const REPORT_TEMPLATE: &str = r#"You are a professional research assistant.

Query: {query}

Web Sources:
{web_results}

Knowledge Base:
{kb_results}

Create a comprehensive research report with:

# {query}

## Executive Summary
2-3 sentences of key findings.

## Key Findings
- Current information from web
- Historical context from knowledge base
- Cite sources as [Source 1], [Source 2]

## Analysis
Your expert analysis and insights.

## Sources
List all sources used.

## Conclusion
Key takeaways and recommendations.

Be thorough, cite sources, provide insights."#;

const BRIEF_TEMPLATE: &str = r#"You are a research analyst writing for a busy executive.

Question: {query}

Web Sources:
{web_results}

Earlier Research:
{kb_results}

Write a one-page brief:

# {query}

## Bottom Line
One paragraph answering the question directly.

## What Matters
3-5 bullet points, each citing its source as [Source N].

## Next Steps
2-3 concrete recommendations.

Keep it under 300 words."#;

const ACADEMIC_TEMPLATE: &str = r#"You are an academic researcher preparing a literature review.

Research question: {query}

Retrieved sources:
{web_results}

Prior notes from the knowledge base:
{kb_results}

Write a structured review:

# {query}

## Abstract
A 100-word summary of the state of knowledge.

## Background
Definitions and context needed to follow the discussion.

## Current Evidence
Synthesize the sources, citing them as [Source N]. Note where they agree and where they conflict.

## Open Questions
Gaps, limitations and disputed points.

## References
List every cited source with its URL.

Use a neutral, precise tone."#;

/// Built-in prompt templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptStyle {
    /// Comprehensive research report (default)
    #[default]
    Report,
    /// Short executive brief
    Brief,
    /// Literature-review style write-up
    Academic,
}

impl PromptStyle {
    /// All built-in styles
    pub const ALL: [PromptStyle; 3] = [Self::Report, Self::Brief, Self::Academic];

    /// Template text with placeholders
    pub fn template(&self) -> &'static str {
        match self {
            Self::Report => REPORT_TEMPLATE,
            Self::Brief => BRIEF_TEMPLATE,
            Self::Academic => ACADEMIC_TEMPLATE,
        }
    }

    /// Lowercase identifier used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::Brief => "brief",
            Self::Academic => "academic",
        }
    }

    /// Fill in the template.
    ///
    /// Substitution is a single pass, so placeholder-like text inside
    /// search results is left untouched.
    pub fn render(&self, query: &str, web_results: &str, kb_results: &str) -> String {
        PLACEHOLDER
            .replace_all(self.template(), |caps: &Captures| match &caps[1] {
                "query" => query.to_string(),
                "web_results" => web_results.to_string(),
                _ => kb_results.to_string(),
            })
            .into_owned()
    }
}

impl fmt::Display for PromptStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown template '{s}' (expected report, brief or academic)"))
    }
}
