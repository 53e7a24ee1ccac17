//! Read-only state export
//!
//! A snapshot is the view handed to UI layers: a plain, field-stable copy
//! of the public game state with no RNG or logger. It is versioned so a
//! client can detect a layout it does not understand.

use crate::core::{space, BankSupply, Player, PlayerId};
use crate::decks::CardDeck;
use crate::game::{GameState, TradeOffer, TurnPhase};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Bumped whenever a field is renamed or removed
pub const SNAPSHOT_VERSION: u32 = 1;

/// Ownership state of one ownable space, with its name for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySnapshot {
    pub position: u8,
    pub name: String,
    pub owner: Option<PlayerId>,
    pub houses: u8,
    pub mortgaged: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub version: u32,
    pub turn_number: u32,
    pub current_player: PlayerId,
    pub phase: TurnPhase,
    pub last_roll: Option<(u8, u8)>,
    pub players: Vec<Player>,

    /// Ownable spaces only, in board order
    pub properties: Vec<PropertySnapshot>,

    pub bank: BankSupply,
    pub free_parking_pot: i32,
    pub chance: CardDeck,
    pub community_chest: CardDeck,
    pub trades: Vec<TradeOffer>,
    pub pending_auctions: Vec<u8>,
}

impl GameSnapshot {
    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            TurnPhase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save this snapshot to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }

    /// Load a snapshot from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }
}

impl GameState {
    /// Capture the public state
    pub fn snapshot(&self) -> GameSnapshot {
        let properties = self
            .properties
            .iter()
            .enumerate()
            .filter(|(pos, _)| space(*pos as u8).is_ownable())
            .map(|(pos, prop)| PropertySnapshot {
                position: pos as u8,
                name: space(pos as u8).name.to_string(),
                owner: prop.owner,
                houses: prop.houses,
                mortgaged: prop.mortgaged,
            })
            .collect();

        GameSnapshot {
            version: SNAPSHOT_VERSION,
            turn_number: self.turn_number,
            current_player: self.current,
            phase: self.phase.clone(),
            last_roll: self.last_roll,
            players: self.players.clone(),
            properties,
            bank: self.bank.clone(),
            free_parking_pot: self.free_parking_pot,
            chance: self.decks.chance.clone(),
            community_chest: self.decks.community_chest.clone(),
            trades: self.trades.clone(),
            pending_auctions: self.pending_auctions.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::test_support::*;

    #[test]
    fn test_snapshot_lists_ownable_spaces() {
        let mut game = quiet_game(2);
        give(&mut game, PlayerId::new(1), 39);
        let snapshot = game.snapshot();

        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.properties.len(), 28);
        let boardwalk = snapshot.properties.last().unwrap();
        assert_eq!(boardwalk.name, "Boardwalk");
        assert_eq!(boardwalk.owner, Some(PlayerId::new(1)));
        assert_eq!(snapshot.winner(), None);
    }

    #[test]
    fn test_snapshot_json_fields() {
        let game = quiet_game(2);
        let json: serde_json::Value = serde_json::from_str(&game.snapshot().to_json().unwrap()).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["phase"], serde_json::json!({"phase": "awaiting_roll"}));
        assert_eq!(json["players"][0]["money"], 1500);
        assert!(json.get("rng").is_none());
    }

    #[test]
    fn test_snapshot_file_roundtrip() {
        let game = quiet_game(3);
        let path = std::env::temp_dir().join(format!("monopoly_snapshot_{}.json", std::process::id()));
        game.snapshot().save_to_file(&path).unwrap();
        let loaded = GameSnapshot::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.players.len(), 3);
        assert_eq!(loaded.chance, game.decks.chance);
    }
}
