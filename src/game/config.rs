//! Game configuration and house rules

use crate::{MonopolyError, Result};
use serde::{Deserialize, Serialize};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 8;

/// Settings fixed at game creation
///
/// Deserializable so a server can load table rules from JSON; missing
/// fields fall back to the standard rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// One name per seat, in turn order
    pub player_names: Vec<String>,

    pub starting_money: i32,

    /// Salary for passing or landing on Go
    pub go_salary: i32,

    pub jail_fine: i32,

    /// Taxes and fines accumulate on Free Parking (house rule)
    pub free_parking_pot: bool,

    /// Failed escape rolls before the fine is forced
    pub max_jail_turns: u8,

    /// Seed for dice and deck shuffles
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            player_names: vec!["Player 1".to_string(), "Player 2".to_string()],
            starting_money: 1500,
            go_salary: 200,
            jail_fine: 50,
            free_parking_pot: true,
            max_jail_turns: 3,
            seed: 0,
        }
    }
}

impl GameConfig {
    /// Standard rules for the named players
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        GameConfig {
            player_names: names.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Standard rules with `count` generically named players
    pub fn with_player_count(count: usize) -> Self {
        Self::new((1..=count).map(|i| format!("Player {i}")))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_starting_money(mut self, money: i32) -> Self {
        self.starting_money = money;
        self
    }

    pub fn with_free_parking_pot(mut self, enabled: bool) -> Self {
        self.free_parking_pot = enabled;
        self
    }

    pub fn with_jail_fine(mut self, fine: i32) -> Self {
        self.jail_fine = fine;
        self
    }

    /// Check the table can actually be played
    pub fn validate(&self) -> Result<()> {
        let count = self.player_names.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(MonopolyError::invalid(format!(
                "need {MIN_PLAYERS}-{MAX_PLAYERS} players, got {count}"
            )));
        }
        if self.starting_money < 0 || self.go_salary < 0 || self.jail_fine < 0 {
            return Err(MonopolyError::invalid("money settings must be non-negative"));
        }
        if self.max_jail_turns == 0 {
            return Err(MonopolyError::invalid("max_jail_turns must be at least 1"));
        }
        Ok(())
    }

    /// Parse a config from JSON, filling gaps with defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
