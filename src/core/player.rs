//! Player account representation

use crate::core::{DeckKind, GameEntity, PlayerId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeSet;

/// A seat at the table: money, position, jail status and holdings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Unique ID for this player
    pub id: PlayerId,

    /// Display name
    pub name: String,

    /// Cash on hand. May dip below zero only while a debt is being resolved.
    pub money: i32,

    /// Board position (0-39)
    pub position: u8,

    /// Positions this player owns; mirrors `PropertyState::owner`
    pub owned: BTreeSet<u8>,

    pub in_jail: bool,

    /// Failed escape rolls so far (0-3)
    pub jail_turns: u8,

    /// Get Out of Jail Free cards held, tagged with the deck they return to
    pub jail_free_cards: SmallVec<[DeckKind; 2]>,

    /// Doubles rolled in a row this turn (0-3)
    pub consecutive_doubles: u8,

    /// Out of the game
    pub bankrupt: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, starting_money: i32) -> Self {
        Player {
            id,
            name: name.into(),
            money: starting_money,
            position: 0,
            owned: BTreeSet::new(),
            in_jail: false,
            jail_turns: 0,
            jail_free_cards: SmallVec::new(),
            consecutive_doubles: 0,
            bankrupt: false,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.bankrupt
    }

    pub fn can_afford(&self, amount: i32) -> bool {
        self.money >= amount
    }

    pub fn credit(&mut self, amount: i32) {
        self.money += amount;
    }

    pub fn debit(&mut self, amount: i32) {
        self.money -= amount;
    }

    pub fn jail_free_count(&self) -> usize {
        self.jail_free_cards.len()
    }

    /// Put the player in jail, clearing any doubles streak
    pub fn send_to_jail(&mut self) {
        self.position = crate::core::board::JAIL;
        self.in_jail = true;
        self.jail_turns = 0;
        self.consecutive_doubles = 0;
    }

    pub fn release_from_jail(&mut self) {
        self.in_jail = false;
        self.jail_turns = 0;
    }
}

impl GameEntity for Player {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
