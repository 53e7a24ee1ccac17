//! Game runner
//!
//! Drives a game to completion by asking each seat's controller for a
//! command whenever that seat is the one the engine is waiting on.

use crate::core::PlayerId;
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::{GameState, VerbosityLevel};
use crate::{MonopolyError, Result};

/// Result of running a game to completion
#[derive(Debug, Clone)]
pub struct GameResult {
    /// Winner of the game (None if the turn limit hit first)
    pub winner: Option<PlayerId>,
    /// Turn number reached
    pub turns_played: u32,
    /// Commands applied
    pub actions_taken: u32,
    /// Reason the game ended
    pub end_reason: GameEndReason,
}

/// Reason the game ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEndReason {
    /// Everyone else went bankrupt
    LastPlayerStanding(PlayerId),
    /// Game reached maximum turn limit
    TurnLimit,
}

/// Game loop manager
pub struct GameLoop<'a> {
    /// The game state
    pub game: &'a mut GameState,
    /// Maximum turns before stopping
    max_turns: u32,
    actions_taken: u32,
}

impl<'a> GameLoop<'a> {
    /// Create a new game loop for the given game state
    pub fn new(game: &'a mut GameState) -> Self {
        GameLoop {
            game,
            max_turns: 1000,
            actions_taken: 0,
        }
    }

    /// Set maximum turns before stopping without a winner
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Set verbosity on the game's logger
    pub fn with_verbosity(self, verbosity: VerbosityLevel) -> Self {
        self.game.logger.set_verbosity(verbosity);
        self
    }

    /// Run the game with one controller per seat, in seat order
    pub fn run_game(&mut self, controllers: &mut [Box<dyn PlayerController>]) -> Result<GameResult> {
        if controllers.len() != self.game.players.len() {
            return Err(MonopolyError::invalid(format!(
                "{} controllers for {} seats",
                controllers.len(),
                self.game.players.len()
            )));
        }
        for (seat, controller) in controllers.iter().enumerate() {
            if controller.player_id().seat() != seat {
                return Err(MonopolyError::invalid(format!(
                    "controller for {} sits in seat {seat}",
                    controller.player_id()
                )));
            }
        }

        let result = loop {
            if let Some(result) = self.step(controllers)? {
                break result;
            }
        };

        for controller in controllers.iter_mut() {
            let id = controller.player_id();
            let view = GameStateView::new(self.game, id);
            controller.on_game_end(&view, result.winner == Some(id));
        }

        log_if_verbose!(
            self.game,
            minimal,
            "Game ended after {} turns ({} commands): {:?}",
            result.turns_played,
            result.actions_taken,
            result.end_reason
        );
        Ok(result)
    }

    /// Apply one controller decision, or report how the game ended
    fn step(&mut self, controllers: &mut [Box<dyn PlayerController>]) -> Result<Option<GameResult>> {
        if let Some(winner) = self.game.winner() {
            return Ok(Some(self.result(GameEndReason::LastPlayerStanding(winner))));
        }
        if self.game.turn_number > self.max_turns {
            return Ok(Some(self.result(GameEndReason::TurnLimit)));
        }

        let acting = self.game.acting_player();
        let available = self.game.available_commands(acting);
        if available.is_empty() {
            return Err(MonopolyError::invalid(format!(
                "no legal command for {acting} during {}",
                self.game.phase.name()
            )));
        }

        let view = GameStateView::new(self.game, acting);
        let command = controllers[acting.seat()].choose_command(&view, &available);
        self.game.apply(acting, command)?;
        self.actions_taken += 1;
        Ok(None)
    }

    fn result(&self, end_reason: GameEndReason) -> GameResult {
        GameResult {
            winner: self.game.winner(),
            turns_played: self.game.turn_number,
            actions_taken: self.actions_taken,
            end_reason,
        }
    }
}
