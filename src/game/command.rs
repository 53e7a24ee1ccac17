//! Inbound commands and the single mutation entry point

use crate::core::PlayerId;
use crate::events::GameEvent;
use crate::game::{GameState, TradeSide, TurnPhase};
use crate::{MonopolyError, Result};
use serde::{Deserialize, Serialize};

/// Everything a client (or supervisor) can ask the engine to do
///
/// Serialized as `{"type": "roll_dice"}`, `{"type": "build", "position": 3}`, ...
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    RollDice,
    BuyDecision { buy: bool },
    EndTurn,
    PayJailFine,
    UseJailFreeCard,

    Build { position: u8 },
    SellHouse { position: u8 },
    Mortgage { position: u8 },
    Unmortgage { position: u8 },

    AuctionBid { amount: i32 },
    AuctionPass,
    /// Supervisor passes for a bidder who timed out
    ForcePass { player: PlayerId },

    TradeOpen { partner: PlayerId },
    TradeAddMoney { side: TradeSide, denomination: i32 },
    TradeClearMoney { side: TradeSide },
    TradeToggleProperty { position: u8 },
    TradeSend,
    TradeAccept { initiator: PlayerId },
    TradeDecline { initiator: PlayerId },
    TradeCancel,
    /// Supervisor declines for a partner who timed out
    ForceDecline { player: PlayerId, initiator: PlayerId },
}

impl Command {
    /// Supervisor commands act on the player named inside them
    pub fn is_supervisor(&self) -> bool {
        matches!(self, Command::ForcePass { .. } | Command::ForceDecline { .. })
    }
}

impl GameState {
    /// Apply one command from `issuer`
    ///
    /// On error nothing has changed. On success returns the events the
    /// command produced, in order.
    pub fn apply(&mut self, issuer: PlayerId, command: Command) -> Result<Vec<GameEvent>> {
        if self.phase.is_game_over() {
            return Err(MonopolyError::invalid("the game is over"));
        }
        if !command.is_supervisor() {
            self.require_active(issuer)?;
        }

        let mark = self.events.len();
        match command {
            Command::RollDice => self.roll_dice(issuer)?,
            Command::BuyDecision { buy } => self.buy_decision(issuer, buy)?,
            Command::EndTurn => self.end_turn(issuer)?,
            Command::PayJailFine => self.pay_jail_fine(issuer)?,
            Command::UseJailFreeCard => self.use_jail_free_card(issuer)?,
            Command::Build { position } => self.build_house(issuer, position)?,
            Command::SellHouse { position } => self.sell_house(issuer, position)?,
            Command::Mortgage { position } => self.mortgage(issuer, position)?,
            Command::Unmortgage { position } => self.unmortgage(issuer, position)?,
            Command::AuctionBid { amount } => self.auction_bid(issuer, amount)?,
            Command::AuctionPass => self.auction_pass(issuer, false)?,
            Command::ForcePass { player } => self.auction_pass(player, true)?,
            Command::TradeOpen { partner } => self.trade_open(issuer, partner)?,
            Command::TradeAddMoney { side, denomination } => self.trade_add_money(issuer, side, denomination)?,
            Command::TradeClearMoney { side } => self.trade_clear_money(issuer, side)?,
            Command::TradeToggleProperty { position } => self.trade_toggle_property(issuer, position)?,
            Command::TradeSend => self.trade_send(issuer)?,
            Command::TradeAccept { initiator } => self.trade_accept(issuer, initiator)?,
            Command::TradeDecline { initiator } => self.trade_decline(issuer, initiator, false)?,
            Command::TradeCancel => self.trade_cancel(issuer)?,
            Command::ForceDecline { player, initiator } => self.trade_decline(player, initiator, true)?,
        }
        Ok(self.events.since(mark).to_vec())
    }

    /// Turn-flow commands `player` could issue right now
    ///
    /// Covers rolling, jail exits, purchase, building, auction moves and
    /// ending the turn. Mortgage and trade commands are always open to
    /// owners and are left to the caller.
    pub fn available_commands(&self, player: PlayerId) -> Vec<Command> {
        let mut commands = Vec::new();
        let Ok(account) = self.player(player) else {
            return commands;
        };
        if account.bankrupt {
            return commands;
        }

        match &self.phase {
            TurnPhase::GameOver { .. } => {}
            TurnPhase::Auction(auction) => {
                if auction.cursor == player {
                    commands.push(Command::AuctionPass);
                    for raise in [1, 10, 50] {
                        let amount = auction.current_bid + raise;
                        if account.can_afford(amount) {
                            commands.push(Command::AuctionBid { amount });
                        }
                    }
                }
            }
            _ if player != self.current => {}
            TurnPhase::AwaitingRoll => {
                commands.push(Command::RollDice);
                if account.in_jail {
                    if account.can_afford(self.config.jail_fine) {
                        commands.push(Command::PayJailFine);
                    }
                    if account.jail_free_count() > 0 {
                        commands.push(Command::UseJailFreeCard);
                    }
                }
            }
            TurnPhase::AwaitingPurchaseDecision { position } => {
                if account.can_afford(crate::core::space(*position).price) {
                    commands.push(Command::BuyDecision { buy: true });
                }
                commands.push(Command::BuyDecision { buy: false });
            }
            TurnPhase::AwaitingBuildDecision { .. } | TurnPhase::TurnComplete => {
                commands.push(Command::EndTurn);
                for &position in &account.owned {
                    if self.check_build(player, position).is_ok() {
                        commands.push(Command::Build { position });
                    }
                }
            }
        }
        commands
    }
}
