//! Table registry and hand driver on top of `holdem-engine`.
//!
//! A session layer owns one [`TableRegistry`], turns client intents into
//! registry calls, and forwards the returned [`TableEvent`]s.

pub mod errors;
pub mod events;
pub mod logging;
pub mod registry;
pub mod settings;
pub mod table;

pub use errors::{ErrorSeverity, TableError};
pub use events::{LeaveReason, SeatChange, TableEvent};
pub use logging::{init_logging, init_logging_with, init_test_logging, LogEntry, TestLogSubscriber};
pub use registry::{TableId, TableRegistry};
pub use settings::{Settings, SettingsError, SettingsResolved, SettingsSources, ValueSource};
pub use table::Table;
