use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Two hole cards per seat plus a five-card board must fit in 52 cards.
pub const MAX_SEATS_LIMIT: usize = 22;

/// Stakes and seating for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    /// Stack handed to a player when they take a seat
    pub starting_chips: u32,
    pub max_seats: usize,
    /// Fixed shuffle seed; random when absent
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: 5,
            big_blind: 10,
            starting_chips: 1000,
            max_seats: 6,
            seed: None,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.small_blind == 0 || self.big_blind == 0 {
            return Err(ConfigError::Invalid("blinds must be greater than 0".into()));
        }
        if self.small_blind > self.big_blind {
            return Err(ConfigError::Invalid(
                "small_blind must not exceed big_blind".into(),
            ));
        }
        if self.starting_chips <= self.big_blind {
            return Err(ConfigError::Invalid(
                "starting_chips must be greater than big_blind".into(),
            ));
        }
        if !(2..=MAX_SEATS_LIMIT).contains(&self.max_seats) {
            return Err(ConfigError::Invalid(format!(
                "max_seats must be between 2 and {}",
                MAX_SEATS_LIMIT
            )));
        }
        // A full table's chips must fit in a u32 pot
        if u64::from(self.starting_chips) * self.max_seats as u64 > u64::from(u32::MAX) {
            return Err(ConfigError::Invalid(format!(
                "starting_chips * max_seats must not exceed {}",
                u32::MAX
            )));
        }
        Ok(())
    }
}
