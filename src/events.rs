//! Structured event log
//!
//! Every mutation the engine performs is recorded as a [`GameEvent`]. The
//! log is what UI layers animate from and what tests assert against; each
//! call to `GameState::apply` returns the slice of events it appended.

use crate::core::{DeckKind, PlayerId};
use serde::{Deserialize, Serialize};

/// How a player got out of jail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JailExit {
    Doubles,
    Fine,
    Card,
    /// Fine paid automatically after the last failed escape roll
    ForcedFine,
}

/// Atomic game events, serialized as `{"type": "...", ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    TurnStarted {
        player: PlayerId,
        turn: u32,
    },

    DiceRolled {
        player: PlayerId,
        dice: (u8, u8),
        doubles: bool,
    },

    Moved {
        player: PlayerId,
        from: u8,
        to: u8,
    },

    PassedGo {
        player: PlayerId,
        amount: i32,
    },

    SentToJail {
        player: PlayerId,
    },

    LeftJail {
        player: PlayerId,
        via: JailExit,
    },

    PropertyPurchased {
        player: PlayerId,
        position: u8,
        price: i32,
    },

    PurchaseDeclined {
        player: PlayerId,
        position: u8,
    },

    RentPaid {
        from: PlayerId,
        to: PlayerId,
        position: u8,
        amount: i32,
    },

    /// Tax, fine or card charge paid to the bank
    BankPayment {
        player: PlayerId,
        amount: i32,
    },

    /// Money received from the bank (card payouts)
    BankPayout {
        player: PlayerId,
        amount: i32,
    },

    FreeParkingCollected {
        player: PlayerId,
        amount: i32,
    },

    /// Direct payment between players outside of rent
    PlayerPayment {
        from: PlayerId,
        to: PlayerId,
        amount: i32,
    },

    CardDrawn {
        player: PlayerId,
        deck: DeckKind,
        card: u8,
        text: String,
    },

    JailFreeCardReturned {
        player: PlayerId,
        deck: DeckKind,
    },

    HouseBuilt {
        player: PlayerId,
        position: u8,
        houses: u8,
    },

    HouseSold {
        player: PlayerId,
        position: u8,
        houses: u8,
        refund: i32,
    },

    Mortgaged {
        player: PlayerId,
        position: u8,
        amount: i32,
    },

    Unmortgaged {
        player: PlayerId,
        position: u8,
        cost: i32,
    },

    AuctionStarted {
        position: u8,
        first_bidder: PlayerId,
    },

    BidPlaced {
        player: PlayerId,
        position: u8,
        amount: i32,
    },

    BidPassed {
        player: PlayerId,
        position: u8,
        forced: bool,
    },

    AuctionWon {
        player: PlayerId,
        position: u8,
        price: i32,
    },

    AuctionUnsold {
        position: u8,
    },

    TradeOpened {
        initiator: PlayerId,
        partner: PlayerId,
    },

    TradeSent {
        initiator: PlayerId,
        partner: PlayerId,
    },

    TradeCompleted {
        initiator: PlayerId,
        partner: PlayerId,
    },

    TradeDeclined {
        initiator: PlayerId,
        partner: PlayerId,
        forced: bool,
    },

    TradeCancelled {
        initiator: PlayerId,
        partner: PlayerId,
    },

    /// Accepted offer referenced a property that changed since it was drafted
    TradeInvalidated {
        initiator: PlayerId,
        partner: PlayerId,
        position: u8,
    },

    PropertyTransferred {
        position: u8,
        from: PlayerId,
        to: Option<PlayerId>,
    },

    Bankrupt {
        player: PlayerId,
        creditor: Option<PlayerId>,
    },

    GameOver {
        winner: PlayerId,
    },
}

/// Append-only log of game events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLog {
    /// Events in order (most recent at end)
    events: Vec<GameEvent>,

    /// Is logging enabled? (disabled for benchmarks)
    enabled: bool,

    /// Total events ever logged, including while disabled
    recorded: usize,
}

impl EventLog {
    pub fn new() -> Self {
        EventLog {
            events: Vec::new(),
            enabled: true,
            recorded: 0,
        }
    }

    /// Create a disabled log (for benchmarking)
    pub fn disabled() -> Self {
        EventLog {
            events: Vec::new(),
            enabled: false,
            recorded: 0,
        }
    }

    /// Log an event
    pub fn log(&mut self, event: GameEvent) {
        self.recorded += 1;
        if self.enabled {
            self.events.push(event);
        }
    }

    /// Get the most recent event without removing it
    pub fn peek(&self) -> Option<&GameEvent> {
        self.events.last()
    }

    /// Number of events held in the log
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events ever logged, whether or not they were kept
    pub fn recorded(&self) -> usize {
        self.recorded
    }

    /// Events logged after position `mark` (a previous `len()`)
    pub fn since(&self, mark: usize) -> &[GameEvent] {
        self.events.get(mark..).unwrap_or(&[])
    }

    /// Clear the entire log
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Get all events (for debugging/serialization)
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}
