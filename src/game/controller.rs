//! Player controller interface
//!
//! Controllers are the decision makers behind each seat. The runner asks
//! the acting player's controller to pick one of the legal commands.

use crate::core::{Player, PlayerId};
use crate::game::{Command, GameState, TurnPhase};

/// Read-only view of the game for one player's controller
pub struct GameStateView<'a> {
    game: &'a GameState,
    player_id: PlayerId,
}

impl<'a> GameStateView<'a> {
    pub fn new(game: &'a GameState, player_id: PlayerId) -> Self {
        GameStateView { game, player_id }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn me(&self) -> &'a Player {
        self.game.account(self.player_id)
    }

    pub fn money(&self) -> i32 {
        self.me().money
    }

    pub fn owned(&self) -> impl Iterator<Item = u8> + 'a {
        self.me().owned.iter().copied()
    }

    pub fn in_jail(&self) -> bool {
        self.me().in_jail
    }

    pub fn phase(&self) -> &'a TurnPhase {
        &self.game.phase
    }

    /// Full state, for controllers that want more than the shortcuts
    pub fn game(&self) -> &'a GameState {
        self.game
    }
}

/// Trait for anything that can make decisions for a seat
pub trait PlayerController {
    /// Get the player ID this controller is responsible for
    fn player_id(&self) -> PlayerId;

    /// Choose one of the available commands
    ///
    /// `available` is never empty when this is called.
    fn choose_command(&mut self, view: &GameStateView, available: &[Command]) -> Command;

    /// Called when the game ends (for cleanup/logging)
    fn on_game_end(&mut self, _view: &GameStateView, _won: bool) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::test_support::*;

    #[test]
    fn test_view_reads_own_seat() {
        let mut game = quiet_game(2);
        give(&mut game, PlayerId::new(1), 39);
        let view = GameStateView::new(&game, PlayerId::new(1));
        assert_eq!(view.money(), 1500);
        assert_eq!(view.owned().collect::<Vec<_>>(), vec![39]);
        assert!(!view.in_jail());
        assert_eq!(view.phase(), &TurnPhase::AwaitingRoll);
    }
}
