//! Player-to-player trade negotiation
//!
//! An initiator drafts an offer (money in fixed bill denominations plus
//! properties from either side), sends it, and the partner accepts or
//! declines. Nothing moves until acceptance, which re-checks everything
//! against the board as it stands then.

use crate::core::{space, try_space, PlayerId};
use crate::events::GameEvent;
use crate::game::GameState;
use crate::{MonopolyError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Bills that can be added to either side of an offer
pub const DENOMINATIONS: [i32; 7] = [1, 5, 10, 20, 50, 100, 500];

/// Which half of an offer a change applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeSide {
    /// What the initiator gives
    Offered,
    /// What the initiator asks for
    Requested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeStatus {
    Drafting,
    AwaitingResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOffer {
    pub initiator: PlayerId,
    pub partner: PlayerId,
    pub money_offered: i32,
    pub money_requested: i32,
    pub properties_offered: BTreeSet<u8>,
    pub properties_requested: BTreeSet<u8>,
    pub status: TradeStatus,
}

impl TradeOffer {
    pub fn new(initiator: PlayerId, partner: PlayerId) -> Self {
        TradeOffer {
            initiator,
            partner,
            money_offered: 0,
            money_requested: 0,
            properties_offered: BTreeSet::new(),
            properties_requested: BTreeSet::new(),
            status: TradeStatus::Drafting,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.money_offered == 0
            && self.money_requested == 0
            && self.properties_offered.is_empty()
            && self.properties_requested.is_empty()
    }

    pub fn involves(&self, player: PlayerId) -> bool {
        self.initiator == player || self.partner == player
    }

    fn money_mut(&mut self, side: TradeSide) -> &mut i32 {
        match side {
            TradeSide::Offered => &mut self.money_offered,
            TradeSide::Requested => &mut self.money_requested,
        }
    }
}

impl GameState {
    pub fn trade_by(&self, initiator: PlayerId) -> Option<&TradeOffer> {
        self.trades.iter().find(|t| t.initiator == initiator)
    }

    fn draft_mut(&mut self, initiator: PlayerId) -> Result<&mut TradeOffer> {
        let offer = self
            .trades
            .iter_mut()
            .find(|t| t.initiator == initiator)
            .ok_or_else(|| MonopolyError::invalid(format!("{initiator} has no open offer")))?;
        if offer.status != TradeStatus::Drafting {
            return Err(MonopolyError::invalid("offer was already sent"));
        }
        Ok(offer)
    }

    fn take_offer(&mut self, initiator: PlayerId) -> Option<TradeOffer> {
        let index = self.trades.iter().position(|t| t.initiator == initiator)?;
        Some(self.trades.remove(index))
    }

    /// Start drafting an offer to `partner`
    pub fn trade_open(&mut self, initiator: PlayerId, partner: PlayerId) -> Result<()> {
        self.require_active(initiator)?;
        self.require_active(partner)?;
        if initiator == partner {
            return Err(MonopolyError::InvalidTrade("cannot trade with yourself".to_string()));
        }
        if self.trade_by(initiator).is_some() {
            return Err(MonopolyError::InvalidTrade(format!("{initiator} already has an open offer")));
        }
        self.trades.push(TradeOffer::new(initiator, partner));
        self.events.log(GameEvent::TradeOpened { initiator, partner });
        log_if_verbose!(
            self,
            verbose,
            "{} opens a trade with {}",
            self.account(initiator).name,
            self.account(partner).name
        );
        Ok(())
    }

    /// Add one bill to the offered or requested money
    pub fn trade_add_money(&mut self, initiator: PlayerId, side: TradeSide, denomination: i32) -> Result<()> {
        if !DENOMINATIONS.contains(&denomination) {
            return Err(MonopolyError::InvalidTrade(format!("no ${denomination} bill")));
        }
        *self.draft_mut(initiator)?.money_mut(side) += denomination;
        Ok(())
    }

    pub fn trade_clear_money(&mut self, initiator: PlayerId, side: TradeSide) -> Result<()> {
        *self.draft_mut(initiator)?.money_mut(side) = 0;
        Ok(())
    }

    /// Add or remove a property; the owner decides which side it goes on
    pub fn trade_toggle_property(&mut self, initiator: PlayerId, position: u8) -> Result<()> {
        let space = try_space(position)
            .filter(|s| s.is_ownable())
            .ok_or_else(|| MonopolyError::InvalidTrade(format!("position {position} cannot be traded")))?;
        let prop = self.property(position).clone();
        let offer = self.draft_mut(initiator)?;

        let set = if prop.owner == Some(offer.initiator) {
            &mut offer.properties_offered
        } else if prop.owner == Some(offer.partner) {
            &mut offer.properties_requested
        } else {
            return Err(MonopolyError::InvalidTrade(format!(
                "{} is not owned by either party",
                space.name
            )));
        };

        if !set.remove(&position) {
            if !prop.is_tradeable() {
                return Err(MonopolyError::InvalidTrade(format!(
                    "{} is mortgaged or has buildings",
                    space.name
                )));
            }
            set.insert(position);
        }
        Ok(())
    }

    pub fn trade_send(&mut self, initiator: PlayerId) -> Result<()> {
        let offer = self.draft_mut(initiator)?;
        if offer.is_empty() {
            return Err(MonopolyError::InvalidTrade("offer is empty".to_string()));
        }
        offer.status = TradeStatus::AwaitingResponse;
        let partner = offer.partner;
        self.events.log(GameEvent::TradeSent { initiator, partner });
        log_if_verbose!(
            self,
            normal,
            "{} sends a trade offer to {}",
            self.account(initiator).name,
            self.account(partner).name
        );
        Ok(())
    }

    /// Find the offer from `initiator` awaiting an answer from `partner`
    fn pending_for(&self, partner: PlayerId, initiator: PlayerId) -> Result<&TradeOffer> {
        self.trade_by(initiator)
            .filter(|t| t.partner == partner && t.status == TradeStatus::AwaitingResponse)
            .ok_or_else(|| MonopolyError::invalid(format!("no offer from {initiator} awaiting {partner}")))
    }

    /// First property in the offer no longer eligible to change hands
    fn stale_property(&self, offer: &TradeOffer) -> Option<u8> {
        let sides = [
            (&offer.properties_offered, offer.initiator),
            (&offer.properties_requested, offer.partner),
        ];
        sides.into_iter().find_map(|(set, owner)| {
            set.iter().copied().find(|&pos| {
                let prop = self.property(pos);
                prop.owner != Some(owner) || !prop.is_tradeable()
            })
        })
    }

    /// Execute the offer atomically
    ///
    /// If a property changed since drafting the offer is thrown out and
    /// `trade_invalidated` is logged. A side that cannot cover its money
    /// fails the command and leaves the offer pending.
    pub fn trade_accept(&mut self, partner: PlayerId, initiator: PlayerId) -> Result<()> {
        self.require_active(partner)?;
        let offer = self.pending_for(partner, initiator)?;

        if let Some(position) = self.stale_property(offer) {
            self.take_offer(initiator);
            self.events.log(GameEvent::TradeInvalidated {
                initiator,
                partner,
                position,
            });
            log_if_verbose!(self, normal, "Trade voided: {} changed hands or state", space(position).name);
            return Ok(());
        }

        for (payer, amount) in [(initiator, offer.money_offered), (partner, offer.money_requested)] {
            let available = self.account(payer).money;
            if available < amount {
                return Err(MonopolyError::InsufficientFunds {
                    needed: amount,
                    available,
                });
            }
        }

        let Some(offer) = self.take_offer(initiator) else {
            return Err(MonopolyError::invalid("offer vanished"));
        };
        self.account_mut(initiator).debit(offer.money_offered);
        self.account_mut(partner).credit(offer.money_offered);
        self.account_mut(partner).debit(offer.money_requested);
        self.account_mut(initiator).credit(offer.money_requested);
        for &position in &offer.properties_offered {
            self.transfer_property(position, Some(partner));
        }
        for &position in &offer.properties_requested {
            self.transfer_property(position, Some(initiator));
        }
        self.events.log(GameEvent::TradeCompleted { initiator, partner });
        log_if_verbose!(
            self,
            normal,
            "{} and {} complete a trade",
            self.account(initiator).name,
            self.account(partner).name
        );
        Ok(())
    }

    /// Turn down a pending offer; `forced` marks a supervisor timeout
    pub fn trade_decline(&mut self, partner: PlayerId, initiator: PlayerId, forced: bool) -> Result<()> {
        self.pending_for(partner, initiator)?;
        self.take_offer(initiator);
        self.events.log(GameEvent::TradeDeclined {
            initiator,
            partner,
            forced,
        });
        Ok(())
    }

    /// Withdraw the initiator's offer, drafted or sent
    pub fn trade_cancel(&mut self, initiator: PlayerId) -> Result<()> {
        let offer = self
            .take_offer(initiator)
            .ok_or_else(|| MonopolyError::invalid(format!("{initiator} has no open offer")))?;
        self.events.log(GameEvent::TradeCancelled {
            initiator,
            partner: offer.partner,
        });
        Ok(())
    }

    /// Drop every offer `player` is part of
    pub(crate) fn discard_trades_involving(&mut self, player: PlayerId) {
        self.trades.retain(|t| !t.involves(player));
    }
}
