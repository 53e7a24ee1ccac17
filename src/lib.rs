//! Monopoly rules engine
//!
//! The authoritative state machine for a game of Monopoly: players, property
//! ownership, money, turn order, card effects, building, mortgaging,
//! auctions, trading and bankruptcy. Rendering and transport live elsewhere;
//! this crate consumes commands and produces snapshots and events.

pub mod core;
pub mod decks;
pub mod error;
pub mod events;
pub mod game;

pub use error::{MonopolyError, Result};
