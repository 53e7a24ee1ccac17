//! Mutable per-space ownership state and the bank's building supply

use crate::core::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// House count that represents a hotel
pub const HOTEL: u8 = 5;

pub const TOTAL_HOUSES: u8 = 32;
pub const TOTAL_HOTELS: u8 = 12;

/// Ownership state of one board space
///
/// One entry exists per space; entries for non-ownable spaces stay at the
/// default forever. Invariant: `mortgaged` implies `houses == 0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyState {
    pub owner: Option<PlayerId>,

    /// 0-4 houses, or `HOTEL`
    pub houses: u8,

    pub mortgaged: bool,
}

impl PropertyState {
    pub fn has_hotel(&self) -> bool {
        self.houses == HOTEL
    }

    pub fn is_developed(&self) -> bool {
        self.houses > 0
    }

    /// Eligible to change hands in a trade
    pub fn is_tradeable(&self) -> bool {
        !self.mortgaged && self.houses == 0
    }

    /// Return to the bank's pristine state
    pub fn reset(&mut self) {
        *self = PropertyState::default();
    }
}

/// Kind of building piece held by the bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Building {
    House,
    Hotel,
}

impl fmt::Display for Building {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Building::House => write!(f, "houses"),
            Building::Hotel => write!(f, "hotels"),
        }
    }
}

/// Finite house and hotel inventory shared by all players
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankSupply {
    pub houses_remaining: u8,
    pub hotels_remaining: u8,
}

impl BankSupply {
    pub fn new() -> Self {
        BankSupply {
            houses_remaining: TOTAL_HOUSES,
            hotels_remaining: TOTAL_HOTELS,
        }
    }

    /// The piece the bank is out of for a build step from `houses` to
    /// `houses + 1`, or `None` if the step can be supplied
    pub fn missing_piece(&self, houses: u8) -> Option<Building> {
        if houses + 1 == HOTEL {
            (self.hotels_remaining == 0).then_some(Building::Hotel)
        } else {
            (self.houses_remaining == 0).then_some(Building::House)
        }
    }

    /// Take the pieces for one build step from `houses` to `houses + 1`
    ///
    /// Callers check [`BankSupply::missing_piece`] first.
    pub fn take_for_build(&mut self, houses: u8) {
        if houses + 1 == HOTEL {
            self.hotels_remaining -= 1;
            self.houses_remaining += 4;
        } else {
            self.houses_remaining -= 1;
        }
    }

    /// Return every piece standing on a property with `houses` buildings
    pub fn return_all(&mut self, houses: u8) {
        if houses == HOTEL {
            self.hotels_remaining += 1;
        } else {
            self.houses_remaining += houses;
        }
    }
}

impl Default for BankSupply {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_defaults() {
        let prop = PropertyState::default();
        assert_eq!(prop.owner, None);
        assert!(!prop.is_developed());
        assert!(prop.is_tradeable());
    }

    #[test]
    fn test_tradeable_requires_clean_property() {
        let mut prop = PropertyState {
            owner: Some(PlayerId::new(0)),
            houses: 1,
            mortgaged: false,
        };
        assert!(!prop.is_tradeable());
        prop.houses = 0;
        prop.mortgaged = true;
        assert!(!prop.is_tradeable());
    }

    #[test]
    fn test_supply_build_steps() {
        let mut supply = BankSupply::new();
        assert_eq!(supply.missing_piece(0), None);

        supply.take_for_build(0);
        assert_eq!(supply.houses_remaining, 31);

        // 4 -> hotel returns the four houses and consumes a hotel
        supply.take_for_build(4);
        assert_eq!(supply.houses_remaining, 35);
        assert_eq!(supply.hotels_remaining, 11);
    }

    #[test]
    fn test_supply_exhaustion() {
        let supply = BankSupply {
            houses_remaining: 0,
            hotels_remaining: 0,
        };
        assert_eq!(supply.missing_piece(2), Some(Building::House));
        assert_eq!(supply.missing_piece(4), Some(Building::Hotel));
    }

    #[test]
    fn test_return_all() {
        let mut supply = BankSupply {
            houses_remaining: 10,
            hotels_remaining: 5,
        };
        supply.return_all(3);
        assert_eq!(supply.houses_remaining, 13);
        supply.return_all(HOTEL);
        assert_eq!(supply.hotels_remaining, 6);
    }
}
