//! Property auctions
//!
//! Bidding runs in seat order from the player after the one who declined
//! (or went bankrupt). A bid clears everyone's pass, so the auction only
//! closes once every active player other than the high bidder has passed
//! since the last bid.

use crate::core::{space, PlayerId};
use crate::events::GameEvent;
use crate::game::{GameState, TurnPhase};
use crate::{MonopolyError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Live auction for one property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionState {
    pub position: u8,

    /// Highest bid so far (0 before any bid)
    pub current_bid: i32,

    pub high_bidder: Option<PlayerId>,

    /// Players who passed since the last bid
    pub passed: BTreeSet<PlayerId>,

    /// Next expected bidder
    pub cursor: PlayerId,
}

impl AuctionState {
    fn new(position: u8, cursor: PlayerId) -> Self {
        AuctionState {
            position,
            current_bid: 0,
            high_bidder: None,
            passed: BTreeSet::new(),
            cursor,
        }
    }

    fn can_bid(&self, player: PlayerId) -> bool {
        !self.passed.contains(&player) && self.high_bidder != Some(player)
    }
}

impl GameState {
    /// First player after `from` (in seat order, `from` last) who may still bid
    fn next_bidder(&self, auction: &AuctionState, from: PlayerId) -> Option<PlayerId> {
        let seats = self.players.len();
        (1..=seats)
            .map(|step| &self.players[(from.seat() + step) % seats])
            .find(|p| p.is_active() && auction.can_bid(p.id))
            .map(|p| p.id)
    }

    /// Put `position` up for auction, starting with the seat after `after`
    pub(crate) fn start_auction(&mut self, position: u8, after: PlayerId) {
        let mut auction = AuctionState::new(position, after);
        let Some(first) = self.next_bidder(&auction, after) else {
            self.events.log(GameEvent::AuctionUnsold { position });
            self.resume_after_auction();
            return;
        };
        auction.cursor = first;
        self.events.log(GameEvent::AuctionStarted {
            position,
            first_bidder: first,
        });
        log_if_verbose!(
            self,
            normal,
            "{} goes up for auction, {} bids first",
            space(position).name,
            self.account(first).name
        );
        self.set_phase(TurnPhase::Auction(auction));
    }

    fn auction_for(&self, player: PlayerId) -> Result<&AuctionState> {
        let TurnPhase::Auction(auction) = &self.phase else {
            return Err(MonopolyError::invalid("no auction in progress"));
        };
        if auction.cursor != player {
            return Err(MonopolyError::invalid(format!(
                "waiting for {} to bid, not {player}",
                auction.cursor
            )));
        }
        Ok(auction)
    }

    /// Raise the bid
    pub fn auction_bid(&mut self, player: PlayerId, amount: i32) -> Result<()> {
        let auction = self.auction_for(player)?;
        if amount <= auction.current_bid {
            return Err(MonopolyError::invalid(format!(
                "bid ${amount} does not beat ${}",
                auction.current_bid
            )));
        }
        let available = self.account(player).money;
        if amount > available {
            return Err(MonopolyError::InsufficientFunds {
                needed: amount,
                available,
            });
        }

        let mut auction = auction.clone();
        auction.current_bid = amount;
        auction.high_bidder = Some(player);
        auction.passed.clear();
        self.events.log(GameEvent::BidPlaced {
            player,
            position: auction.position,
            amount,
        });
        log_if_verbose!(self, normal, "{} bids ${}", self.account(player).name, amount);
        self.advance_auction(auction, player);
        Ok(())
    }

    /// Drop out of the bidding until someone bids again
    ///
    /// `forced` marks a pass issued by a supervisor on a timed-out player.
    pub fn auction_pass(&mut self, player: PlayerId, forced: bool) -> Result<()> {
        let mut auction = self.auction_for(player)?.clone();
        auction.passed.insert(player);
        self.events.log(GameEvent::BidPassed {
            player,
            position: auction.position,
            forced,
        });
        log_if_verbose!(self, verbose, "{} passes", self.account(player).name);
        self.advance_auction(auction, player);
        Ok(())
    }

    /// Move the cursor on, or close the auction if nobody is left to bid
    fn advance_auction(&mut self, mut auction: AuctionState, from: PlayerId) {
        match self.next_bidder(&auction, from) {
            Some(next) => {
                auction.cursor = next;
                self.phase = TurnPhase::Auction(auction);
            }
            None => self.finish_auction(auction),
        }
    }

    fn finish_auction(&mut self, auction: AuctionState) {
        let position = auction.position;
        match auction.high_bidder {
            Some(winner) if self.account(winner).is_active() && self.account(winner).can_afford(auction.current_bid) => {
                self.account_mut(winner).debit(auction.current_bid);
                let prop = self.property_mut(position);
                prop.houses = 0;
                prop.mortgaged = false;
                self.transfer_property(position, Some(winner));
                self.events.log(GameEvent::AuctionWon {
                    player: winner,
                    position,
                    price: auction.current_bid,
                });
                log_if_verbose!(
                    self,
                    normal,
                    "{} wins {} for ${}",
                    self.account(winner).name,
                    space(position).name,
                    auction.current_bid
                );
            }
            _ => {
                self.events.log(GameEvent::AuctionUnsold { position });
                log_if_verbose!(self, normal, "{} stays with the bank", space(position).name);
            }
        }
        self.resume_after_auction();
    }

    /// Run the next queued auction, or hand control back to the turn
    pub(crate) fn resume_after_auction(&mut self) {
        if self.phase.is_game_over() {
            return;
        }
        if let Some(position) = self.pending_auctions.pop_front() {
            self.start_auction(position, self.current);
        } else if self.current_player().bankrupt {
            self.advance_turn();
        } else {
            self.phase = TurnPhase::TurnComplete;
        }
    }
}
