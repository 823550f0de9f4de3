//! Tests for CLI output formatting helpers
//!
//! Tests the output formatting utilities:
//! - Duration formatting (ms, s, m)
//! - Character-safe truncation
//! - Color helpers (respects NO_COLOR)

use researchgpt::cli::output::{format_duration, format_duration_ms_colored, truncate_chars};

// =============================================================================
// format_duration tests
// =============================================================================

/// Test duration formatting with various times
#[test]
fn test_format_duration_various_times() {
    // Milliseconds (under 1 second)
    assert_eq!(format_duration(0.001), "1ms");
    assert_eq!(format_duration(0.5), "500ms");

    // Seconds
    assert_eq!(format_duration(1.0), "1.00s");
    assert_eq!(format_duration(59.99), "59.99s");

    // Minutes
    assert_eq!(format_duration(60.0), "1m 0.0s");
    assert_eq!(format_duration(125.5), "2m 5.5s");
}

/// Test duration formatting boundaries
#[test]
fn test_format_duration_edge_cases() {
    assert_eq!(format_duration(0.0), "0ms");
    assert!(format_duration(0.999).ends_with("ms"));
    assert!(format_duration(1.0).ends_with('s'));
    assert!(!format_duration(59.9).contains('m'));
    assert!(format_duration(60.0).contains('m'));
}

/// Test millisecond input is converted before formatting
#[test]
fn test_format_duration_ms_colored() {
    colored::control::set_override(false);
    assert_eq!(format_duration_ms_colored(250), "250ms");
    assert_eq!(format_duration_ms_colored(4200), "4.20s");
}

// =============================================================================
// truncate_chars tests
// =============================================================================

/// Test truncation leaves short text alone
#[test]
fn test_truncate_chars_short() {
    assert_eq!(truncate_chars("", 10), "");
    assert_eq!(truncate_chars("exactly10!", 10), "exactly10!");
}

/// Test truncation counts characters, not bytes
#[test]
fn test_truncate_chars_multibyte() {
    let question = "Was ist Quantenverschränkung und warum ist sie wichtig?";
    let short = truncate_chars(question, 30);

    assert_eq!(short.chars().count(), 30);
    assert!(short.ends_with("..."));
    assert!(short.starts_with("Was ist Quantenverschr"));

    assert_eq!(truncate_chars("日本語のテキストです", 6), "日本語...");
}

// =============================================================================
// Color helper tests
// Note: These test that colors don't break output, not visual appearance.
// =============================================================================

/// Test that color functions keep the text intact
#[test]
fn test_colors_keep_text() {
    use researchgpt::cli::output::colors;

    colored::control::set_override(false);

    assert_eq!(colors::label("Research Report").to_string(), "Research Report");
    assert_eq!(colors::query("fusion").to_string(), "fusion");
    assert_eq!(colors::file_path("/tmp/r.txt").to_string(), "/tmp/r.txt");
    assert_eq!(colors::number("42").to_string(), "42");
    assert_eq!(colors::success("done").to_string(), "done");
    assert_eq!(colors::warning("careful").to_string(), "careful");
    assert_eq!(colors::error("Error").to_string(), "Error");
    assert_eq!(colors::dim("secondary").to_string(), "secondary");
    assert_eq!(colors::score("(score: 1.00)").to_string(), "(score: 1.00)");
    assert_eq!(colors::rank("1").to_string(), "1");
}
