//! Command-line interface parsing
//!
//! This module handles parsing of CLI arguments using clap, including the
//! optional positional query for fetching a place straight away and the
//! --no-detect flag for skipping position detection.

use clap::Parser;
use thiserror::Error;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The positional query contained nothing but whitespace
    #[error("Search query must not be blank")]
    BlankQuery,
}

/// Current weather in your terminal
#[derive(Parser, Debug)]
#[command(name = "skycast")]
#[command(about = "Current weather in your terminal")]
#[command(version)]
pub struct Cli {
    /// Fetch this place at startup instead of detecting the position
    ///
    /// Examples:
    ///   skycast              # Detect position, fall back to the default place
    ///   skycast Tokyo        # Start with a search for Tokyo
    ///   skycast "New York"   # Place names with spaces need quoting
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Skip position detection and start with the default place
    #[arg(long)]
    pub no_detect: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Place to search for at startup, already trimmed
    pub initial_query: Option<String>,
    /// Whether to detect the position for the first fetch
    pub detect_position: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            initial_query: None,
            detect_position: true,
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError::BlankQuery)` if the query is all whitespace
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let initial_query = match &cli.query {
            None => None,
            Some(query) => {
                let query = query.trim();
                if query.is_empty() {
                    return Err(CliError::BlankQuery);
                }
                Some(query.to_string())
            }
        };

        Ok(StartupConfig {
            initial_query,
            detect_position: !cli.no_detect,
        })
    }
}
