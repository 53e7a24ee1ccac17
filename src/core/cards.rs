//! Chance and Community Chest card catalog
//!
//! Each card carries a tagged [`CardAction`] interpreted by
//! `game::card_effects`. The tables are immutable statics; decks refer to
//! cards by their index into the table.

use crate::core::board::SpaceKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two decks a card belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckKind {
    Chance,
    CommunityChest,
}

impl DeckKind {
    /// Static card table for this deck
    pub fn catalog(&self) -> &'static [Card] {
        match self {
            DeckKind::Chance => &CHANCE_CARDS,
            DeckKind::CommunityChest => &COMMUNITY_CHEST_CARDS,
        }
    }
}

impl fmt::Display for DeckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckKind::Chance => write!(f, "Chance"),
            DeckKind::CommunityChest => write!(f, "Community Chest"),
        }
    }
}

/// Effect of a drawn card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CardAction {
    /// Credit (positive) or charge (negative) the drawing player
    Money { amount: i32 },

    /// Teleport to a position, optionally collecting the Go salary if the
    /// move wraps
    AdvanceTo { position: u8, collect_go: bool },

    /// Step forwards or backwards; never pays the Go salary
    AdvanceRelative { delta: i8 },

    /// Move to the nearest space of this kind strictly ahead
    AdvanceNearest { kind: SpaceKind },

    GoToJail,

    JailFreeCard,

    /// Every other active player pays the drawer
    CollectFromEachPlayer { amount: i32 },

    /// The drawer pays every other active player
    PayEachPlayer { amount: i32 },

    /// Charge per house and per hotel across the drawer's properties
    PayPerHouseHotel { house: i32, hotel: i32 },
}

/// A printed card: its text and its action
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Card {
    pub text: &'static str,
    pub action: CardAction,
}

impl Card {
    pub fn is_jail_free(&self) -> bool {
        matches!(self.action, CardAction::JailFreeCard)
    }
}

const fn card(text: &'static str, action: CardAction) -> Card {
    Card { text, action }
}

use CardAction::*;

pub static CHANCE_CARDS: [Card; 16] = [
    card("Advance to Boardwalk", AdvanceTo { position: 39, collect_go: true }),
    card("Advance to Go (Collect $200)", AdvanceTo { position: 0, collect_go: true }),
    card(
        "Advance to Illinois Avenue. If you pass Go, collect $200",
        AdvanceTo { position: 24, collect_go: true },
    ),
    card(
        "Advance to St. Charles Place. If you pass Go, collect $200",
        AdvanceTo { position: 11, collect_go: true },
    ),
    card("Advance to the nearest Railroad", AdvanceNearest { kind: SpaceKind::Railroad }),
    card("Advance to the nearest Railroad", AdvanceNearest { kind: SpaceKind::Railroad }),
    card("Advance to the nearest Utility", AdvanceNearest { kind: SpaceKind::Utility }),
    card("Bank pays you dividend of $50", Money { amount: 50 }),
    card("Get Out of Jail Free", JailFreeCard),
    card("Go Back 3 Spaces", AdvanceRelative { delta: -3 }),
    card("Go to Jail. Go directly to Jail, do not pass Go, do not collect $200", GoToJail),
    card(
        "Make general repairs on all your property. For each house pay $25. For each hotel pay $100",
        PayPerHouseHotel { house: 25, hotel: 100 },
    ),
    card("Speeding fine $15", Money { amount: -15 }),
    card(
        "Take a trip to Reading Railroad. If you pass Go, collect $200",
        AdvanceTo { position: 5, collect_go: true },
    ),
    card(
        "You have been elected Chairman of the Board. Pay each player $50",
        PayEachPlayer { amount: 50 },
    ),
    card("Your building loan matures. Collect $150", Money { amount: 150 }),
];

pub static COMMUNITY_CHEST_CARDS: [Card; 16] = [
    card("Advance to Go (Collect $200)", AdvanceTo { position: 0, collect_go: true }),
    card("Bank error in your favor. Collect $200", Money { amount: 200 }),
    card("Doctor's fee. Pay $50", Money { amount: -50 }),
    card("From sale of stock you get $50", Money { amount: 50 }),
    card("Get Out of Jail Free", JailFreeCard),
    card("Go to Jail. Go directly to jail, do not pass Go, do not collect $200", GoToJail),
    card("Holiday fund matures. Receive $100", Money { amount: 100 }),
    card("Income tax refund. Collect $20", Money { amount: 20 }),
    card(
        "It is your birthday. Collect $10 from every player",
        CollectFromEachPlayer { amount: 10 },
    ),
    card("Life insurance matures. Collect $100", Money { amount: 100 }),
    card("Pay hospital fees of $100", Money { amount: -100 }),
    card("Pay school fees of $50", Money { amount: -50 }),
    card("Receive $25 consultancy fee", Money { amount: 25 }),
    card(
        "You are assessed for street repair. $40 per house. $115 per hotel",
        PayPerHouseHotel { house: 40, hotel: 115 },
    ),
    card(
        "You have won second prize in a beauty contest. Collect $10",
        Money { amount: 10 },
    ),
    card("You inherit $100", Money { amount: 100 }),
];
