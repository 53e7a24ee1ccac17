//! Game state, rules and turn flow

/// Macro for conditional narration that avoids allocation when the feature is disabled
///
/// When the verbose-logging feature is off this compiles to nothing, so the
/// `format!` calls in hot rule paths cost nothing in benchmarks.
macro_rules! log_if_verbose {
    ($self:expr, $level:ident, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $self.logger.$level(&format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$self; // Suppress unused variable warning
        }
    };
}

pub mod auction;
pub mod bankruptcy;
pub mod card_effects;
pub mod command;
pub mod config;
pub mod controller;
pub mod game_loop;
pub mod logger;
pub mod mailbox;
pub mod ownership;
pub mod phase;
pub mod random_controller;
pub mod snapshot;
pub mod state;
pub mod state_hash;
pub mod trade;
pub mod turn;

pub use auction::AuctionState;
pub use command::Command;
pub use config::GameConfig;
pub use controller::{GameStateView, PlayerController};
pub use game_loop::{GameEndReason, GameLoop, GameResult};
pub use logger::{GameLogger, OutputFormat, OutputMode, VerbosityLevel};
pub use mailbox::{spawn_engine, EngineHandle};
pub use phase::TurnPhase;
pub use random_controller::RandomController;
pub use snapshot::GameSnapshot;
pub use state::GameState;
pub use state_hash::{compute_state_hash, format_hash};
pub use trade::{TradeOffer, TradeSide, TradeStatus, DENOMINATIONS};
