//! Turn phases

use crate::core::PlayerId;
use crate::game::auction::AuctionState;
use serde::{Deserialize, Serialize};

/// Where the current turn stands between commands
///
/// Movement, rent, tax and card resolution all finish inside the command
/// that triggered them, so only the phases that wait for input appear here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum TurnPhase {
    /// Current player must roll (or first pay their way out of jail)
    AwaitingRoll,

    /// Current player landed on an unowned space and may buy it
    AwaitingPurchaseDecision { position: u8 },

    /// Current player landed on a property of a group they hold in full
    AwaitingBuildDecision { position: u8 },

    /// A property is up for auction
    Auction(AuctionState),

    /// Landing resolved; current player ends the turn (or rolls again)
    TurnComplete,

    GameOver { winner: PlayerId },
}

impl TurnPhase {
    pub fn name(&self) -> &'static str {
        match self {
            TurnPhase::AwaitingRoll => "awaiting roll",
            TurnPhase::AwaitingPurchaseDecision { .. } => "awaiting purchase decision",
            TurnPhase::AwaitingBuildDecision { .. } => "awaiting build decision",
            TurnPhase::Auction(_) => "auction",
            TurnPhase::TurnComplete => "turn complete",
            TurnPhase::GameOver { .. } => "game over",
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, TurnPhase::GameOver { .. })
    }

    /// Can the current player end the turn from here?
    pub fn can_end_turn(&self) -> bool {
        matches!(
            self,
            TurnPhase::TurnComplete | TurnPhase::AwaitingBuildDecision { .. }
        )
    }
}
