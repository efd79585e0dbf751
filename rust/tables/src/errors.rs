use holdem_engine::errors::{ConfigError, GameError};
use thiserror::Error;

use crate::registry::TableId;
use crate::settings::SettingsError;

/// Error classification for logging levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Caused by the caller (illegal action, unknown table); normal operation
    Client,
    /// Unexpected, needs investigation
    Server,
    /// The hand could not be completed
    Critical,
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Table not found: {0}")]
    NotFound(TableId),
    #[error("Table storage poisoned")]
    StoragePoisoned,
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("Hand history write failed: {0}")]
    Io(#[from] std::io::Error),
}

impl TableError {
    /// Machine-readable code a session layer can forward to clients.
    pub fn error_code(&self) -> &'static str {
        match self {
            TableError::NotFound(_) => "table_not_found",
            TableError::StoragePoisoned => "storage_poisoned",
            TableError::Game(e) if e.is_illegal_action() => "illegal_action",
            TableError::Game(e) if e.is_fatal() => "hand_aborted",
            TableError::Game(_) => "rejected",
            TableError::Config(_) | TableError::Settings(_) => "invalid_config",
            TableError::Io(_) => "history_io",
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TableError::NotFound(_) | TableError::Config(_) | TableError::Settings(_) => {
                ErrorSeverity::Client
            }
            TableError::Game(e) if e.is_fatal() => ErrorSeverity::Critical,
            TableError::Game(_) => ErrorSeverity::Client,
            TableError::StoragePoisoned | TableError::Io(_) => ErrorSeverity::Server,
        }
    }

    /// Logs the error at a level matching its severity.
    pub fn log(&self, table_id: &str) {
        match self.severity() {
            ErrorSeverity::Client => {
                tracing::debug!(table_id, code = self.error_code(), error = %self, "request rejected")
            }
            ErrorSeverity::Server => {
                tracing::error!(table_id, code = self.error_code(), error = %self, "table error")
            }
            ErrorSeverity::Critical => {
                tracing::error!(table_id, code = self.error_code(), error = %self, "hand aborted")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_actions_are_client_errors() {
        let err = TableError::from(GameError::CannotCheck { to_call: 10 });
        assert_eq!(err.error_code(), "illegal_action");
        assert_eq!(err.severity(), ErrorSeverity::Client);
        assert_eq!(err.to_string(), "Cannot check facing a bet of 10");
    }

    #[test]
    fn deck_exhaustion_is_critical() {
        let err = TableError::from(GameError::DeckExhausted {
            requested: 3,
            remaining: 0,
        });
        assert_eq!(err.error_code(), "hand_aborted");
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn poisoned_storage_is_a_server_error() {
        assert_eq!(TableError::StoragePoisoned.severity(), ErrorSeverity::Server);
        assert_eq!(
            TableError::NotFound("t-1".into()).to_string(),
            "Table not found: t-1"
        );
    }
}
