//! Main game state structure

use crate::core::board::{RAILROADS, RAILROAD_RENT, UTILITIES, UTILITY_MULTIPLIER};
use crate::core::{space, BankSupply, ColorGroup, Player, PlayerId, PropertyState, SpaceKind};
use crate::decks::Decks;
use crate::events::{EventLog, GameEvent};
use crate::game::{GameConfig, GameLogger, TradeOffer, TurnPhase};
use crate::{MonopolyError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Complete game state
///
/// Everything the rules touch lives here, including the RNG, so a game is
/// fully reproducible from its config and command stream. All mutation goes
/// through [`GameState::apply`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,

    /// Seats in turn order; `PlayerId` doubles as the index
    pub players: Vec<Player>,

    /// One entry per board space
    pub properties: Vec<PropertyState>,

    pub bank: BankSupply,

    pub decks: Decks,

    /// Taxes and fines waiting on Free Parking
    pub free_parking_pot: i32,

    /// Whose turn it is
    pub current: PlayerId,

    pub phase: TurnPhase,

    pub turn_number: u32,

    /// Most recent dice, used for utility rent
    pub last_roll: Option<(u8, u8)>,

    /// Open trade offers, at most one per initiator
    pub trades: Vec<TradeOffer>,

    /// Positions surrendered to the bank that still need auctioning
    pub pending_auctions: VecDeque<u8>,

    /// Dice and shuffles (serializable for deterministic replay)
    pub rng: ChaCha12Rng,

    pub events: EventLog,

    pub logger: GameLogger,
}

impl GameState {
    /// Set up a fresh table: shuffled decks, full bank, seat 0 to roll
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = ChaCha12Rng::seed_from_u64(config.seed);
        let decks = Decks::new(&mut rng);
        let players = config
            .player_names
            .iter()
            .enumerate()
            .map(|(seat, name)| Player::new(PlayerId::new(seat as u32), name.clone(), config.starting_money))
            .collect();

        let mut game = GameState {
            config,
            players,
            properties: vec![PropertyState::default(); crate::core::board::BOARD_SIZE as usize],
            bank: BankSupply::new(),
            decks,
            free_parking_pot: 0,
            current: PlayerId::new(0),
            phase: TurnPhase::AwaitingRoll,
            turn_number: 1,
            last_roll: None,
            trades: Vec::new(),
            pending_auctions: VecDeque::new(),
            rng,
            events: EventLog::new(),
            logger: GameLogger::new(),
        };
        game.events.log(GameEvent::TurnStarted {
            player: game.current,
            turn: game.turn_number,
        });
        Ok(game)
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.players
            .get(id.seat())
            .ok_or(MonopolyError::PlayerNotFound(id.as_u32()))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players
            .get_mut(id.seat())
            .ok_or(MonopolyError::PlayerNotFound(id.as_u32()))
    }

    /// Look up a seat already known to exist
    pub(crate) fn account(&self, id: PlayerId) -> &Player {
        &self.players[id.seat()]
    }

    pub(crate) fn account_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.seat()]
    }

    pub fn current_player(&self) -> &Player {
        self.account(self.current)
    }

    /// Fails unless `id` is seated and still in the game
    pub(crate) fn require_active(&self, id: PlayerId) -> Result<&Player> {
        let player = self.player(id)?;
        if player.bankrupt {
            return Err(MonopolyError::invalid(format!("{} is bankrupt", player.name)));
        }
        Ok(player)
    }

    /// Fails unless it is `id`'s turn
    pub(crate) fn require_current(&self, id: PlayerId) -> Result<()> {
        self.player(id)?;
        if id != self.current {
            return Err(MonopolyError::invalid(format!(
                "not {id}'s turn (current is {})",
                self.current
            )));
        }
        Ok(())
    }

    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active_players().count()
    }

    /// First active seat after `from`, wrapping around the table
    pub fn next_active_after(&self, from: PlayerId) -> Option<PlayerId> {
        let seats = self.players.len();
        (1..=seats)
            .map(|step| &self.players[(from.seat() + step) % seats])
            .find(|p| p.is_active())
            .map(|p| p.id)
    }

    pub fn property(&self, position: u8) -> &PropertyState {
        &self.properties[(position % crate::core::board::BOARD_SIZE) as usize]
    }

    pub(crate) fn property_mut(&mut self, position: u8) -> &mut PropertyState {
        &mut self.properties[(position % crate::core::board::BOARD_SIZE) as usize]
    }

    pub fn owner_of(&self, position: u8) -> Option<PlayerId> {
        self.property(position).owner
    }

    /// Does `owner` hold every property in `group`?
    pub fn owns_group(&self, owner: PlayerId, group: ColorGroup) -> bool {
        group
            .members()
            .iter()
            .all(|&pos| self.owner_of(pos) == Some(owner))
    }

    fn count_owned(&self, owner: PlayerId, positions: &[u8]) -> usize {
        positions
            .iter()
            .filter(|&&pos| self.owner_of(pos) == Some(owner))
            .count()
    }

    /// Rent due for landing on `position` with the given dice total
    ///
    /// Zero for unowned or mortgaged spaces.
    pub fn rent_due(&self, position: u8, dice_total: u8) -> i32 {
        let prop = self.property(position);
        let Some(owner) = prop.owner else {
            return 0;
        };
        if prop.mortgaged {
            return 0;
        }

        let space = space(position);
        match space.kind {
            SpaceKind::Property => {
                let base = space.rent[prop.houses as usize];
                match space.group {
                    Some(group) if prop.houses == 0 && self.owns_group(owner, group) => base * 2,
                    _ => base,
                }
            }
            SpaceKind::Railroad => {
                let count = self.count_owned(owner, &RAILROADS).clamp(1, RAILROAD_RENT.len());
                RAILROAD_RENT[count - 1]
            }
            SpaceKind::Utility => {
                let count = self.count_owned(owner, &UTILITIES).clamp(1, UTILITY_MULTIPLIER.len());
                dice_total as i32 * UTILITY_MULTIPLIER[count - 1]
            }
            _ => 0,
        }
    }

    /// Total of the most recent roll (0 before anyone has rolled)
    pub fn last_roll_total(&self) -> u8 {
        self.last_roll.map(|(a, b)| a + b).unwrap_or(0)
    }

    /// Move a property between owners, keeping buildings and mortgage
    pub(crate) fn transfer_property(&mut self, position: u8, to: Option<PlayerId>) {
        let from = self.owner_of(position);
        if let Some(prev) = from {
            self.account_mut(prev).owned.remove(&position);
        }
        if let Some(next) = to {
            self.account_mut(next).owned.insert(position);
        }
        self.property_mut(position).owner = to;
        if let Some(prev) = from {
            self.events.log(GameEvent::PropertyTransferred { position, from: prev, to });
        }
    }

    /// Charge a mandatory payment to the bank
    ///
    /// Returns false if the payer could not cover it and went bankrupt.
    /// With `to_pot` and the pot rule enabled the money lands on Free Parking.
    pub(crate) fn charge_to_bank(&mut self, payer: PlayerId, amount: i32, to_pot: bool) -> bool {
        if !self.account(payer).can_afford(amount) {
            log_if_verbose!(
                self,
                minimal,
                "{} cannot pay ${} to the bank",
                self.account(payer).name,
                amount
            );
            self.declare_bankruptcy(payer, None);
            return false;
        }
        self.account_mut(payer).debit(amount);
        if to_pot && self.config.free_parking_pot {
            self.free_parking_pot += amount;
        }
        self.events.log(GameEvent::BankPayment { player: payer, amount });
        true
    }

    /// Charge a mandatory payment owed to another player
    ///
    /// Returns false if the payer could not cover it and went bankrupt to
    /// the payee. The caller logs the payment event on success.
    pub(crate) fn charge_to_player(&mut self, payer: PlayerId, payee: PlayerId, amount: i32) -> bool {
        if !self.account(payer).can_afford(amount) {
            log_if_verbose!(
                self,
                minimal,
                "{} cannot pay ${} to {}",
                self.account(payer).name,
                amount,
                self.account(payee).name
            );
            self.declare_bankruptcy(payer, Some(payee));
            return false;
        }
        self.account_mut(payer).debit(amount);
        self.account_mut(payee).credit(amount);
        true
    }

    /// Set the phase, unless the game has already ended
    pub(crate) fn set_phase(&mut self, phase: TurnPhase) {
        if !self.phase.is_game_over() {
            self.phase = phase;
        }
    }

    /// Hand the turn to the next active seat
    pub(crate) fn advance_turn(&mut self) {
        if self.phase.is_game_over() {
            return;
        }
        let current = self.current;
        self.account_mut(current).consecutive_doubles = 0;
        let Some(next) = self.next_active_after(current) else {
            return;
        };
        self.current = next;
        self.turn_number += 1;
        self.last_roll = None;
        self.phase = TurnPhase::AwaitingRoll;
        self.events.log(GameEvent::TurnStarted {
            player: next,
            turn: self.turn_number,
        });
        log_if_verbose!(
            self,
            normal,
            "--- Turn {}: {} (${}) ---",
            self.turn_number,
            self.account(next).name,
            self.account(next).money
        );
    }

    /// End the game if only one player remains
    pub(crate) fn check_game_over(&mut self) -> bool {
        if self.phase.is_game_over() {
            return true;
        }
        let survivors = {
            let mut active = self.active_players().map(|p| p.id);
            (active.next(), active.next())
        };
        let (Some(winner), None) = survivors else {
            return false;
        };
        self.phase = TurnPhase::GameOver { winner };
        self.pending_auctions.clear();
        self.events.log(GameEvent::GameOver { winner });
        log_if_verbose!(self, minimal, "{} wins the game!", self.account(winner).name);
        true
    }

    pub fn is_game_over(&self) -> bool {
        self.phase.is_game_over()
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            TurnPhase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    /// The player whose input the engine is waiting for
    ///
    /// The auction cursor during an auction, otherwise the current player.
    pub fn acting_player(&self) -> PlayerId {
        match &self.phase {
            TurnPhase::Auction(auction) => auction.cursor,
            _ => self.current,
        }
    }

    /// Sum of all player cash (the bank itself is unlimited)
    pub fn total_player_money(&self) -> i32 {
        self.players.iter().map(|p| p.money).sum()
    }

    /// Check structural invariants, returning a description of the first
    /// violation found
    ///
    /// Used by tests and the self-play runner.
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        let mut houses_on_board = 0u32;
        let mut hotels_on_board = 0u32;
        for (pos, prop) in self.properties.iter().enumerate() {
            if prop.mortgaged && prop.houses > 0 {
                return Err(format!("position {pos} is mortgaged with {} houses", prop.houses));
            }
            if prop.has_hotel() {
                hotels_on_board += 1;
            } else {
                houses_on_board += prop.houses as u32;
            }
            if let Some(owner) = prop.owner {
                let player = self.player(owner).map_err(|e| e.to_string())?;
                if !player.owned.contains(&(pos as u8)) {
                    return Err(format!("{owner} owns {pos} but does not list it"));
                }
            }
        }
        if houses_on_board + self.bank.houses_remaining as u32 != crate::core::property::TOTAL_HOUSES as u32 {
            return Err(format!(
                "{houses_on_board} houses on board + {} in bank",
                self.bank.houses_remaining
            ));
        }
        if hotels_on_board + self.bank.hotels_remaining as u32 != crate::core::property::TOTAL_HOTELS as u32 {
            return Err(format!(
                "{hotels_on_board} hotels on board + {} in bank",
                self.bank.hotels_remaining
            ));
        }
        for player in &self.players {
            for &pos in &player.owned {
                if self.owner_of(pos) != Some(player.id) {
                    return Err(format!("{} lists {pos} but does not own it", player.id));
                }
            }
            if player.bankrupt && (player.money != 0 || !player.owned.is_empty()) {
                return Err(format!("bankrupt {} still holds assets", player.id));
            }
            if !player.bankrupt && player.money < 0 {
                return Err(format!("{} has negative money", player.id));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Two or more players, silent logger
    pub fn quiet_game(players: usize) -> GameState {
        let mut game = GameState::new(GameConfig::with_player_count(players)).unwrap();
        game.logger.set_verbosity(crate::game::VerbosityLevel::Silent);
        game
    }

    /// Hand `position` to `owner` directly
    pub fn give(game: &mut GameState, owner: PlayerId, position: u8) {
        game.transfer_property(position, Some(owner));
    }
}
