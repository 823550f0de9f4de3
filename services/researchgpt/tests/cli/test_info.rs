//! Tests for get-info, show-config and chunk CLI commands
//!
//! These are simple commands that display static/config information
//! or preview chunking without touching the backends. They take only
//! the configuration, so they also run while another handle holds the
//! knowledge base open.

use crate::cli::test_helpers::{create_cli_test_services, seed_knowledge};
use researchgpt::cli::commands::chunk::{execute as execute_chunk, ChunkArgs};
use researchgpt::cli::commands::config::{execute as execute_config, ConfigArgs};
use researchgpt::cli::commands::info::{execute as execute_info, InfoArgs};
use researchgpt::cli::OutputFormat;
use std::path::PathBuf;
use tempfile::TempDir;

// =============================================================================
// get-info tests
// =============================================================================

/// Test getting info (human format)
#[tokio::test]
async fn test_info_human() {
    let (services, _temp) = create_cli_test_services();

    let args = InfoArgs { detailed: false };
    let result = execute_info(args, &services.config, OutputFormat::Human).await;
    assert!(result.is_ok(), "Get info should succeed");
}

/// Test getting info (JSON format)
#[tokio::test]
async fn test_info_json() {
    let (services, _temp) = create_cli_test_services();

    let args = InfoArgs { detailed: false };
    let result = execute_info(args, &services.config, OutputFormat::Json).await;
    assert!(result.is_ok(), "Get info (JSON) should succeed");
}

/// Test getting detailed info
#[tokio::test]
async fn test_info_detailed() {
    let (services, _temp) = create_cli_test_services();

    let args = InfoArgs { detailed: true };
    let result = execute_info(args, &services.config, OutputFormat::Human).await;
    assert!(result.is_ok(), "Get detailed info should succeed");
}

/// Test detailed info counts documents written by a live session
#[tokio::test]
async fn test_info_detailed_while_session_open() {
    let (services, _temp) = create_cli_test_services();
    seed_knowledge(&services, "tidal energy").await;

    let args = InfoArgs { detailed: true };
    let result = execute_info(args, &services.config, OutputFormat::Json).await;
    assert!(result.is_ok(), "Get info should not contend with the open session");
    assert_eq!(services.knowledge.count(), 3);
}

/// Test detailed info on a directory that has no index yet
#[tokio::test]
async fn test_info_detailed_without_index() {
    let (services, temp) = create_cli_test_services();
    let mut config = (*services.config).clone();
    config.knowledge.index_dir = temp.path().join("never-created");

    let args = InfoArgs { detailed: true };
    assert!(execute_info(args, &config, OutputFormat::Human).await.is_ok());
    assert!(!config.knowledge.index_dir.exists());
}

// =============================================================================
// show-config tests
// =============================================================================

/// Test showing config (human format)
#[tokio::test]
async fn test_show_config_human() {
    let (services, _temp) = create_cli_test_services();

    let result = execute_config(ConfigArgs {}, &services.config, OutputFormat::Human).await;
    assert!(result.is_ok(), "Show config should succeed");
}

/// Test showing config (JSON format)
#[tokio::test]
async fn test_show_config_json() {
    let (services, _temp) = create_cli_test_services();

    let result = execute_config(ConfigArgs {}, &services.config, OutputFormat::Json).await;
    assert!(result.is_ok(), "Show config (JSON) should succeed");
}

// =============================================================================
// chunk tests
// =============================================================================

fn write_input(dir: &TempDir, text: &str) -> PathBuf {
    let path = dir.path().join("report.txt");
    std::fs::write(&path, text).unwrap();
    path
}

/// Test chunking a file with the configured defaults
#[tokio::test]
async fn test_chunk_file_defaults() {
    let (services, _temp) = create_cli_test_services();
    let input_dir = TempDir::new().unwrap();
    let input = write_input(&input_dir, &"Fusion plasma confinement. ".repeat(100));

    for format in [OutputFormat::Human, OutputFormat::Json] {
        let args = ChunkArgs {
            input: input.clone(),
            size: None,
            overlap: None,
        };
        let result = execute_chunk(args, &services.config, format).await;
        assert!(result.is_ok(), "Chunk ({format:?}) should succeed");
    }
}

/// Test chunking with explicit size and overlap
#[tokio::test]
async fn test_chunk_file_custom_window() {
    let (services, _temp) = create_cli_test_services();
    let input_dir = TempDir::new().unwrap();
    let input = write_input(&input_dir, "abcdefghij");

    let args = ChunkArgs {
        input,
        size: Some(4),
        overlap: Some(2),
    };
    assert!(execute_chunk(args, &services.config, OutputFormat::Json).await.is_ok());
}

/// Test that overlap must be smaller than the chunk size
#[tokio::test]
async fn test_chunk_invalid_overlap() {
    let (services, _temp) = create_cli_test_services();
    let input_dir = TempDir::new().unwrap();
    let input = write_input(&input_dir, "abcdefghij");

    let args = ChunkArgs {
        input,
        size: Some(4),
        overlap: Some(4),
    };
    let err = execute_chunk(args, &services.config, OutputFormat::Human)
        .await
        .expect_err("overlap == size should fail");
    assert!(err.to_string().contains("Invalid chunking parameters"));
}

/// Test a missing input file
#[tokio::test]
async fn test_chunk_missing_file() {
    let (services, _temp) = create_cli_test_services();

    let args = ChunkArgs {
        input: PathBuf::from("/nonexistent/report.txt"),
        size: None,
        overlap: None,
    };
    let err = execute_chunk(args, &services.config, OutputFormat::Human)
        .await
        .expect_err("missing file should fail");
    assert!(err.to_string().contains("Failed to read /nonexistent/report.txt"));
}
