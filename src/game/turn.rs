//! Dice, movement, landing and turn hand-off

use crate::core::board::{BOARD_SIZE, GO_TO_JAIL};
use crate::core::{space, DeckKind, PlayerId, SpaceKind};
use crate::events::{GameEvent, JailExit};
use crate::game::{GameState, TurnPhase};
use crate::{MonopolyError, Result};
use rand::Rng;

/// Doubles in a row that send a player to jail
const DOUBLES_LIMIT: u8 = 3;

impl GameState {
    fn require_roll_phase(&self, player: PlayerId) -> Result<()> {
        self.require_current(player)?;
        if self.phase != TurnPhase::AwaitingRoll {
            return Err(MonopolyError::invalid(format!(
                "cannot roll during {}",
                self.phase.name()
            )));
        }
        Ok(())
    }

    /// Roll two dice from the game RNG and play out the move
    pub fn roll_dice(&mut self, player: PlayerId) -> Result<()> {
        self.require_roll_phase(player)?;
        let dice = (self.rng.gen_range(1..=6), self.rng.gen_range(1..=6));
        self.play_roll(player, dice);
        Ok(())
    }

    /// Play out a move with the given dice instead of rolling
    ///
    /// For scripted games and replays; the RNG is not touched.
    pub fn roll_with(&mut self, player: PlayerId, dice: (u8, u8)) -> Result<()> {
        self.require_roll_phase(player)?;
        if !(1..=6).contains(&dice.0) || !(1..=6).contains(&dice.1) {
            return Err(MonopolyError::invalid(format!("impossible dice {dice:?}")));
        }
        self.play_roll(player, dice);
        Ok(())
    }

    fn play_roll(&mut self, player: PlayerId, dice: (u8, u8)) {
        let doubles = dice.0 == dice.1;
        let total = dice.0 + dice.1;
        self.last_roll = Some(dice);
        self.events.log(GameEvent::DiceRolled { player, dice, doubles });
        log_if_verbose!(
            self,
            normal,
            "{} rolls {} + {}{}",
            self.account(player).name,
            dice.0,
            dice.1,
            if doubles { " (doubles)" } else { "" }
        );

        if self.account(player).in_jail {
            self.roll_in_jail(player, doubles, total);
            return;
        }

        if doubles {
            let account = self.account_mut(player);
            account.consecutive_doubles += 1;
            if account.consecutive_doubles >= DOUBLES_LIMIT {
                log_if_verbose!(self, normal, "Third doubles in a row!");
                self.jail(player);
                self.set_phase(TurnPhase::TurnComplete);
                return;
            }
        } else {
            self.account_mut(player).consecutive_doubles = 0;
        }

        self.advance_by(player, total);
        self.land(player);
    }

    fn roll_in_jail(&mut self, player: PlayerId, doubles: bool, total: u8) {
        if doubles {
            self.release(player, JailExit::Doubles);
            self.advance_by(player, total);
            self.land(player);
            return;
        }

        let max_turns = self.config.max_jail_turns;
        let account = self.account_mut(player);
        account.jail_turns = (account.jail_turns + 1).min(max_turns);
        if account.jail_turns < max_turns {
            log_if_verbose!(self, verbose, "{} stays in jail", self.account(player).name);
            self.set_phase(TurnPhase::TurnComplete);
            return;
        }

        let fine = self.config.jail_fine;
        if !self.account(player).can_afford(fine) {
            log_if_verbose!(
                self,
                normal,
                "{} cannot afford the ${} fine and stays in jail",
                self.account(player).name,
                fine
            );
            self.set_phase(TurnPhase::TurnComplete);
            return;
        }
        self.charge_to_bank(player, fine, true);
        self.release(player, JailExit::ForcedFine);
        self.advance_by(player, total);
        self.land(player);
    }

    fn release(&mut self, player: PlayerId, via: JailExit) {
        self.account_mut(player).release_from_jail();
        self.events.log(GameEvent::LeftJail { player, via });
        log_if_verbose!(self, normal, "{} leaves jail ({:?})", self.account(player).name, via);
    }

    pub(crate) fn jail(&mut self, player: PlayerId) {
        self.account_mut(player).send_to_jail();
        self.events.log(GameEvent::SentToJail { player });
        log_if_verbose!(self, normal, "{} goes to jail", self.account(player).name);
    }

    /// Pay the fine to leave jail before rolling
    pub fn pay_jail_fine(&mut self, player: PlayerId) -> Result<()> {
        self.require_roll_phase(player)?;
        let account = self.account(player);
        if !account.in_jail {
            return Err(MonopolyError::invalid(format!("{} is not in jail", account.name)));
        }
        let fine = self.config.jail_fine;
        if !account.can_afford(fine) {
            return Err(MonopolyError::InsufficientFunds {
                needed: fine,
                available: account.money,
            });
        }
        self.charge_to_bank(player, fine, true);
        self.release(player, JailExit::Fine);
        Ok(())
    }

    /// Spend a Get Out of Jail Free card before rolling
    pub fn use_jail_free_card(&mut self, player: PlayerId) -> Result<()> {
        self.require_roll_phase(player)?;
        let account = self.account(player);
        if !account.in_jail {
            return Err(MonopolyError::invalid(format!("{} is not in jail", account.name)));
        }
        let Some(deck) = self.account_mut(player).jail_free_cards.pop() else {
            return Err(MonopolyError::invalid(format!("{player} holds no Get Out of Jail Free card")));
        };
        self.decks.get_mut(deck).return_jail_free();
        self.events.log(GameEvent::JailFreeCardReturned { player, deck });
        self.release(player, JailExit::Card);
        Ok(())
    }

    /// Move forward `steps`, paying the Go salary on wrap
    pub(crate) fn advance_by(&mut self, player: PlayerId, steps: u8) {
        let from = self.account(player).position;
        let to = ((from as u16 + steps as u16) % BOARD_SIZE as u16) as u8;
        self.move_to(player, to, true);
    }

    /// Teleport to `to`; a move to a lower position wraps past Go
    pub(crate) fn move_to(&mut self, player: PlayerId, to: u8, collect_go: bool) {
        let from = self.account(player).position;
        self.account_mut(player).position = to;
        self.events.log(GameEvent::Moved { player, from, to });
        log_if_verbose!(
            self,
            verbose,
            "{} moves to {} ({})",
            self.account(player).name,
            space(to).name,
            to
        );
        if collect_go && to < from {
            let salary = self.config.go_salary;
            self.account_mut(player).credit(salary);
            self.events.log(GameEvent::PassedGo { player, amount: salary });
            log_if_verbose!(self, normal, "{} collects ${} for passing Go", self.account(player).name, salary);
        }
    }

    /// Step by a signed offset without any Go salary
    pub(crate) fn move_relative(&mut self, player: PlayerId, delta: i8) {
        let from = self.account(player).position as i16;
        let to = (from + delta as i16).rem_euclid(BOARD_SIZE as i16) as u8;
        self.move_to(player, to, false);
    }

    /// Resolve the space the player is standing on
    ///
    /// Sets the phase for whatever comes next, unless a payment bankrupted
    /// the player (the resolver has already moved the game on).
    pub(crate) fn land(&mut self, player: PlayerId) {
        let position = self.account(player).position;
        let space = space(position);

        match space.kind {
            SpaceKind::Go | SpaceKind::Jail => self.set_phase(TurnPhase::TurnComplete),
            SpaceKind::FreeParking => {
                let pot = std::mem::take(&mut self.free_parking_pot);
                if pot > 0 {
                    self.account_mut(player).credit(pot);
                    self.events.log(GameEvent::FreeParkingCollected { player, amount: pot });
                    log_if_verbose!(self, normal, "{} collects ${} from Free Parking", self.account(player).name, pot);
                }
                self.set_phase(TurnPhase::TurnComplete);
            }
            SpaceKind::Property | SpaceKind::Railroad | SpaceKind::Utility => match self.owner_of(position) {
                None => self.set_phase(TurnPhase::AwaitingPurchaseDecision { position }),
                Some(owner) if owner == player => {
                    let builds = space.group.is_some_and(|g| self.owns_group(player, g));
                    self.set_phase(if builds {
                        TurnPhase::AwaitingBuildDecision { position }
                    } else {
                        TurnPhase::TurnComplete
                    });
                }
                Some(owner) => {
                    let rent = self.rent_due(position, self.last_roll_total());
                    if rent > 0 {
                        if !self.charge_to_player(player, owner, rent) {
                            return;
                        }
                        self.events.log(GameEvent::RentPaid {
                            from: player,
                            to: owner,
                            position,
                            amount: rent,
                        });
                        log_if_verbose!(
                            self,
                            normal,
                            "{} pays ${} rent to {}",
                            self.account(player).name,
                            rent,
                            self.account(owner).name
                        );
                    }
                    self.set_phase(TurnPhase::TurnComplete);
                }
            },
            SpaceKind::Chance => self.draw_card(player, DeckKind::Chance),
            SpaceKind::CommunityChest => self.draw_card(player, DeckKind::CommunityChest),
            SpaceKind::IncomeTax | SpaceKind::LuxuryTax => {
                log_if_verbose!(self, normal, "{} pays ${} {}", self.account(player).name, space.tax, space.name);
                if self.charge_to_bank(player, space.tax, true) {
                    self.set_phase(TurnPhase::TurnComplete);
                }
            }
            SpaceKind::GoToJail => {
                debug_assert_eq!(position, GO_TO_JAIL);
                self.jail(player);
                self.set_phase(TurnPhase::TurnComplete);
            }
        }
    }

    /// Answer the purchase prompt; declining starts an auction
    pub fn buy_decision(&mut self, player: PlayerId, buy: bool) -> Result<()> {
        self.require_current(player)?;
        let TurnPhase::AwaitingPurchaseDecision { position } = self.phase else {
            return Err(MonopolyError::invalid(format!(
                "no purchase pending during {}",
                self.phase.name()
            )));
        };

        if buy {
            self.purchase(player, position)?;
            self.set_phase(TurnPhase::TurnComplete);
        } else {
            self.events.log(GameEvent::PurchaseDeclined { player, position });
            log_if_verbose!(self, normal, "{} declines {}", self.account(player).name, space(position).name);
            self.start_auction(position, player);
        }
        Ok(())
    }

    /// Finish the turn, or roll again after doubles
    pub fn end_turn(&mut self, player: PlayerId) -> Result<()> {
        self.require_current(player)?;
        if !self.phase.can_end_turn() {
            return Err(MonopolyError::invalid(format!(
                "cannot end turn during {}",
                self.phase.name()
            )));
        }

        let account = self.account(player);
        if account.consecutive_doubles > 0 && !account.in_jail {
            log_if_verbose!(self, verbose, "{} rolls again", account.name);
            self.phase = TurnPhase::AwaitingRoll;
        } else {
            self.advance_turn();
        }
        Ok(())
    }
}
