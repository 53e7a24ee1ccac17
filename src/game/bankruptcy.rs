//! Bankruptcy resolution
//!
//! A player who cannot cover a mandatory payment is out. What they leave
//! behind depends on who they owed: a player creditor takes everything as
//! it stands, while the bank strips the buildings and auctions the land.

use crate::core::{space, PlayerId};
use crate::events::GameEvent;
use crate::game::GameState;

impl GameState {
    /// Take `debtor` out of the game, settling with `creditor` (or the bank)
    pub(crate) fn declare_bankruptcy(&mut self, debtor: PlayerId, creditor: Option<PlayerId>) {
        let positions: Vec<u8> = self.account(debtor).owned.iter().copied().collect();
        let cash = self.account(debtor).money.max(0);

        match creditor {
            Some(to) => {
                for &position in &positions {
                    self.transfer_property(position, Some(to));
                }
                if cash > 0 {
                    self.account_mut(to).credit(cash);
                    self.events.log(GameEvent::PlayerPayment {
                        from: debtor,
                        to,
                        amount: cash,
                    });
                }
            }
            None => {
                for &position in &positions {
                    let houses = self.property(position).houses;
                    self.bank.return_all(houses);
                    self.transfer_property(position, None);
                    self.property_mut(position).reset();
                }
            }
        }

        let cards: Vec<_> = self.account_mut(debtor).jail_free_cards.drain(..).collect();
        for deck in cards {
            self.decks.get_mut(deck).return_jail_free();
            self.events.log(GameEvent::JailFreeCardReturned { player: debtor, deck });
        }

        let account = self.account_mut(debtor);
        account.money = 0;
        account.bankrupt = true;
        account.in_jail = false;
        account.jail_turns = 0;
        account.consecutive_doubles = 0;
        self.discard_trades_involving(debtor);

        self.events.log(GameEvent::Bankrupt {
            player: debtor,
            creditor,
        });
        log_if_verbose!(
            self,
            minimal,
            "{} is bankrupt{}",
            self.account(debtor).name,
            match creditor {
                Some(to) => format!(", everything goes to {}", self.account(to).name),
                None => " to the bank".to_string(),
            }
        );

        if self.check_game_over() {
            return;
        }

        if creditor.is_none() {
            for &position in &positions {
                log_if_verbose!(self, verbose, "{} queued for auction", space(position).name);
            }
            self.pending_auctions.extend(positions);
        }

        if debtor == self.current {
            match self.pending_auctions.pop_front() {
                Some(position) => self.start_auction(position, debtor),
                None => self.advance_turn(),
            }
        }
    }
}
