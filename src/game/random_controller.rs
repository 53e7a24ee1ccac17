//! Random controller for self-play and baseline testing
//!
//! Picks uniformly among the legal commands, with a seeded RNG so
//! self-play games are reproducible.

use crate::core::PlayerId;
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::Command;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};

/// A controller that makes random choices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomController {
    player_id: PlayerId,
    rng: ChaCha12Rng,
}

impl RandomController {
    /// Create a random controller with a seeded RNG (for deterministic testing)
    pub fn with_seed(player_id: PlayerId, seed: u64) -> Self {
        RandomController {
            player_id,
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }
}

impl PlayerController for RandomController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_command(&mut self, _view: &GameStateView, available: &[Command]) -> Command {
        let index = self.rng.gen_range(0..available.len());
        available[index].clone()
    }
}
