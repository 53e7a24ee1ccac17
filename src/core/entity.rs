//! Player identity with simple integer IDs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seat-stable player identifier
///
/// IDs are assigned in seat order starting at 0 and never reused, so the
/// ID doubles as an index into `GameState::players`. Bankrupt players keep
/// their ID; they are skipped by the rotation rather than removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(u32);

impl PlayerId {
    pub fn new(id: u32) -> Self {
        PlayerId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Seat index in the player table
    pub fn seat(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Base trait for named game participants
pub trait GameEntity {
    fn id(&self) -> PlayerId;
    fn name(&self) -> &str;
}
