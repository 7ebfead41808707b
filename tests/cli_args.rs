//! Integration tests for CLI argument and startup handling
//!
//! Tests the positional query, the --no-detect flag, and the startup
//! failures that print before the terminal UI takes over.

use std::process::Command;

/// Helper to run the CLI with given args and capture output.
///
/// The API key is scrubbed and the working directory moved away from the
/// repo so a local .env file cannot supply configuration.
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_skycast"))
        .args(args)
        .env_remove("OPENWEATHER_API_KEY")
        .current_dir(std::env::temp_dir())
        .output()
        .expect("Failed to execute skycast")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("skycast"), "Help should mention skycast");
    assert!(stdout.contains("QUERY"), "Help should mention the query");
    assert!(
        stdout.contains("no-detect"),
        "Help should mention --no-detect"
    );
}

#[test]
fn test_blank_query_prints_error_and_exits() {
    let output = run_cli(&[""]);
    assert!(!output.status.success(), "Expected a blank query to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("blank"),
        "Should print error message about a blank query: {}",
        stderr
    );
}

#[test]
fn test_whitespace_query_prints_error_and_exits() {
    let output = run_cli(&["   "]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("blank"), "stderr was: {}", stderr);
}

#[test]
fn test_missing_api_key_prints_error_and_exits() {
    let output = run_cli(&["London"]);
    assert!(
        !output.status.success(),
        "Expected startup without an API key to fail"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("OPENWEATHER_API_KEY"),
        "Should name the missing variable: {}",
        stderr
    );
}

#[test]
fn test_unknown_flag_is_rejected() {
    let output = run_cli(&["--bogus"]);
    assert!(!output.status.success(), "Expected unknown flag to fail");
}

#[test]
fn test_query_and_no_detect_are_accepted() {
    // With --help present the binary exits before startup, which verifies the
    // arguments parse without driving the TUI
    let output = run_cli(&["--no-detect", "Tokyo", "--help"]);
    assert!(output.status.success());
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use skycast::cli::{Cli, StartupConfig};

    #[test]
    fn test_cli_no_args() {
        let cli = Cli::parse_from(["skycast"]);
        assert!(cli.query.is_none());
        assert!(!cli.no_detect);
    }

    #[test]
    fn test_cli_positional_query() {
        let cli = Cli::parse_from(["skycast", "Tokyo"]);
        assert_eq!(cli.query.as_deref(), Some("Tokyo"));
    }

    #[test]
    fn test_cli_no_detect_flag() {
        let cli = Cli::parse_from(["skycast", "--no-detect"]);
        assert!(cli.no_detect);
    }

    #[test]
    fn test_startup_config_trims_the_query() {
        let cli = Cli::parse_from(["skycast", "  Lisbon "]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.initial_query.as_deref(), Some("Lisbon"));
    }

    #[test]
    fn test_startup_config_rejects_blank_query() {
        let cli = Cli::parse_from(["skycast", "  "]);
        assert!(StartupConfig::from_cli(&cli).is_err());
    }

    #[test]
    fn test_startup_config_detection_defaults_on() {
        let cli = Cli::parse_from(["skycast"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert!(config.detect_position);
    }
}
