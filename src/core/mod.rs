//! Core game types and entities

pub mod board;
pub mod cards;
pub mod entity;
pub mod player;
pub mod property;

pub use board::{space, try_space, ColorGroup, Space, SpaceKind, BOARD};
pub use cards::{Card, CardAction, DeckKind};
pub use entity::{GameEntity, PlayerId};
pub use player::Player;
pub use property::{BankSupply, Building, PropertyState, HOTEL};
