//! Error types for the Monopoly engine

use crate::core::Building;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonopolyError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Insufficient funds: needed ${needed}, have ${available}")]
    InsufficientFunds { needed: i32, available: i32 },

    #[error("Invalid trade: {0}")]
    InvalidTrade(String),

    #[error("Bank supply exhausted: no {0} remaining")]
    SupplyExhausted(Building),

    #[error("Illegal build: {0}")]
    IllegalBuild(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(u32),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Engine mailbox closed")]
    EngineStopped,
}

impl MonopolyError {
    /// Shorthand for the most common rejection
    pub fn invalid(message: impl Into<String>) -> Self {
        MonopolyError::InvalidCommand(message.into())
    }
}

impl From<serde_json::Error> for MonopolyError {
    fn from(err: serde_json::Error) -> Self {
        MonopolyError::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MonopolyError>;
