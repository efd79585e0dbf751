//! Configuration command handler.
//!
//! Prints every setting with the layer it came from:
//!
//! ```json
//! {
//!   "big_blind": {
//!     "value": 10,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::error::CliError;
use holdem_tables::settings::{self, SettingsResolved};
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let SettingsResolved { settings, sources } = settings::load_with_sources()?;
    let table = &settings.table;
    let display = serde_json::json!({
        "small_blind": {
            "value": table.small_blind,
            "source": sources.small_blind,
        },
        "big_blind": {
            "value": table.big_blind,
            "source": sources.big_blind,
        },
        "starting_chips": {
            "value": table.starting_chips,
            "source": sources.starting_chips,
        },
        "max_seats": {
            "value": table.max_seats,
            "source": sources.max_seats,
        },
        "seed": {
            "value": table.seed,
            "source": sources.seed,
        },
        "history_path": {
            "value": settings.history_path,
            "source": sources.history_path,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
