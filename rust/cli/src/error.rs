//! Error types for the CLI application.

use holdem_engine::errors::GameError;
use holdem_tables::{SettingsError, TableError};
use std::fmt;

/// Custom error type for CLI operations.
///
/// Every variant maps to exit code 2; the message is printed to stderr.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Engine-related error
    Engine(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        match error {
            GameError::InvalidCard(_) => CliError::InvalidInput(error.to_string()),
            other => CliError::Engine(other.to_string()),
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(error: SettingsError) -> Self {
        CliError::Config(error.to_string())
    }
}

impl From<TableError> for CliError {
    fn from(error: TableError) -> Self {
        match error {
            TableError::Io(e) => CliError::Io(e),
            TableError::Config(_) | TableError::Settings(_) => CliError::Config(error.to_string()),
            other => CliError::Engine(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_cards_are_input_errors() {
        let err = CliError::from(GameError::InvalidCard("Zz".into()));
        assert!(matches!(err, CliError::InvalidInput(_)));
        assert_eq!(err.to_string(), "Invalid input: Invalid card: \"Zz\"");
    }

    #[test]
    fn table_config_errors_map_to_config() {
        let err = CliError::from(TableError::Config(
            holdem_engine::errors::ConfigError::Invalid("bad".into()),
        ));
        assert!(matches!(err, CliError::Config(_)));
    }
}
