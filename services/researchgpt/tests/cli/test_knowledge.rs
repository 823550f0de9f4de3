//! Tests for the kb-search, kb-stats and kb-clear CLI commands

use crate::cli::test_helpers::{create_cli_test_services, seed_knowledge};
use researchgpt::cli::commands::knowledge::{
    execute_clear, execute_search, execute_stats, ClearArgs, SearchArgs, StatsArgs,
};
use researchgpt::cli::OutputFormat;

// =============================================================================
// kb-search tests
// =============================================================================

/// Test searching an empty knowledge base
#[tokio::test]
async fn test_kb_search_empty() {
    let (services, _temp) = create_cli_test_services();

    let args = SearchArgs {
        query: "qubits".to_string(),
        limit: 3,
    };
    let result = execute_search(args, &services, OutputFormat::Human).await;
    assert!(result.is_ok(), "Search on empty KB should succeed");
}

/// Test searching after a research run
#[tokio::test]
async fn test_kb_search_after_research() {
    let (services, _temp) = create_cli_test_services();
    seed_knowledge(&services, "quantum error correction").await;

    for format in [OutputFormat::Human, OutputFormat::Json] {
        let args = SearchArgs {
            query: "logical qubits".to_string(),
            limit: 2,
        };
        let result = execute_search(args, &services, format).await;
        assert!(result.is_ok(), "Search ({format:?}) should succeed");
    }
}

/// Test that out-of-range limits are clamped rather than rejected
#[tokio::test]
async fn test_kb_search_limit_clamped() {
    let (services, _temp) = create_cli_test_services();
    seed_knowledge(&services, "quantum error correction").await;

    let args = SearchArgs {
        query: "qubits".to_string(),
        limit: 0,
    };
    assert!(execute_search(args, &services, OutputFormat::Json).await.is_ok());
}

// =============================================================================
// kb-stats tests
// =============================================================================

/// Test stats in both formats
#[tokio::test]
async fn test_kb_stats() {
    let (services, _temp) = create_cli_test_services();
    seed_knowledge(&services, "quantum error correction").await;

    assert!(execute_stats(StatsArgs {}, &services, OutputFormat::Human).await.is_ok());
    assert!(execute_stats(StatsArgs {}, &services, OutputFormat::Json).await.is_ok());
}

// =============================================================================
// kb-clear tests
// =============================================================================

/// Test that clearing requires --yes
#[tokio::test]
async fn test_kb_clear_requires_confirmation() {
    let (services, _temp) = create_cli_test_services();
    seed_knowledge(&services, "quantum error correction").await;

    let result = execute_clear(ClearArgs { yes: false }, &services, OutputFormat::Human).await;
    let err = result.expect_err("Clear without --yes should fail");
    assert!(err.to_string().contains("without --yes"));
    assert_eq!(services.knowledge.count(), 3);
}

/// Test clearing with confirmation
#[tokio::test]
async fn test_kb_clear_confirmed() {
    let (services, _temp) = create_cli_test_services();
    seed_knowledge(&services, "quantum error correction").await;

    let result = execute_clear(ClearArgs { yes: true }, &services, OutputFormat::Json).await;
    assert!(result.is_ok(), "Clear with --yes should succeed");
    assert!(services.knowledge.is_empty());

    // Research keeps working against the emptied index
    seed_knowledge(&services, "quantum error correction").await;
    assert_eq!(services.knowledge.count(), 3);
}
