//! Static board catalog
//!
//! The 40 spaces of the standard US board with their fixed attributes.
//! The table is a process-wide `static` and is never mutated; all mutable
//! per-space state lives in [`crate::core::PropertyState`].

use serde::{Deserialize, Serialize};
use std::fmt;

pub const BOARD_SIZE: u8 = 40;
pub const GO: u8 = 0;
pub const JAIL: u8 = 10;
pub const FREE_PARKING: u8 = 20;
pub const GO_TO_JAIL: u8 = 30;

/// Railroad rent by number of railroads held by the owner (index = count - 1)
pub const RAILROAD_RENT: [i32; 4] = [25, 50, 100, 200];

/// Utility rent multiplier on the dice sum (index = count - 1)
pub const UTILITY_MULTIPLIER: [i32; 2] = [4, 10];

pub const RAILROADS: [u8; 4] = [5, 15, 25, 35];
pub const UTILITIES: [u8; 2] = [12, 28];

/// Kind of board space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceKind {
    Go,
    Property,
    Railroad,
    Utility,
    Chance,
    CommunityChest,
    IncomeTax,
    LuxuryTax,
    Jail,
    GoToJail,
    FreeParking,
}

impl SpaceKind {
    /// Can this kind of space be bought, mortgaged and traded?
    pub fn is_ownable(&self) -> bool {
        matches!(self, SpaceKind::Property | SpaceKind::Railroad | SpaceKind::Utility)
    }
}

/// Color groups of the street properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorGroup {
    Brown,
    LightBlue,
    Pink,
    Orange,
    Red,
    Yellow,
    Green,
    DarkBlue,
}

impl ColorGroup {
    /// Board positions of every property in this group
    pub fn members(&self) -> &'static [u8] {
        match self {
            ColorGroup::Brown => &[1, 3],
            ColorGroup::LightBlue => &[6, 8, 9],
            ColorGroup::Pink => &[11, 13, 14],
            ColorGroup::Orange => &[16, 18, 19],
            ColorGroup::Red => &[21, 23, 24],
            ColorGroup::Yellow => &[26, 27, 29],
            ColorGroup::Green => &[31, 32, 34],
            ColorGroup::DarkBlue => &[37, 39],
        }
    }
}

impl fmt::Display for ColorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorGroup::Brown => "Brown",
            ColorGroup::LightBlue => "Light Blue",
            ColorGroup::Pink => "Pink",
            ColorGroup::Orange => "Orange",
            ColorGroup::Red => "Red",
            ColorGroup::Yellow => "Yellow",
            ColorGroup::Green => "Green",
            ColorGroup::DarkBlue => "Dark Blue",
        };
        write!(f, "{name}")
    }
}

/// A single board space and its fixed attributes
#[derive(Debug, Clone, Serialize)]
pub struct Space {
    pub index: u8,
    pub name: &'static str,
    pub kind: SpaceKind,
    pub group: Option<ColorGroup>,

    /// Purchase price (0 for non-ownable spaces)
    pub price: i32,

    /// Rent by house count; index 5 is the hotel tier. Only street
    /// properties use it.
    pub rent: [i32; 6],

    pub house_cost: i32,
    pub mortgage_value: i32,

    /// Fixed amount charged by tax spaces
    pub tax: i32,
}

impl Space {
    /// Cost of lifting the mortgage: mortgage value plus 10%, rounded up
    pub fn unmortgage_cost(&self) -> i32 {
        (self.mortgage_value * 11 + 9) / 10
    }

    pub fn is_ownable(&self) -> bool {
        self.kind.is_ownable()
    }
}

const fn street(
    index: u8,
    name: &'static str,
    group: ColorGroup,
    price: i32,
    rent: [i32; 6],
    house_cost: i32,
) -> Space {
    Space {
        index,
        name,
        kind: SpaceKind::Property,
        group: Some(group),
        price,
        rent,
        house_cost,
        mortgage_value: price / 2,
        tax: 0,
    }
}

const fn railroad(index: u8, name: &'static str) -> Space {
    Space {
        index,
        name,
        kind: SpaceKind::Railroad,
        group: None,
        price: 200,
        rent: [0; 6],
        house_cost: 0,
        mortgage_value: 100,
        tax: 0,
    }
}

const fn utility(index: u8, name: &'static str) -> Space {
    Space {
        index,
        name,
        kind: SpaceKind::Utility,
        group: None,
        price: 150,
        rent: [0; 6],
        house_cost: 0,
        mortgage_value: 75,
        tax: 0,
    }
}

const fn special(index: u8, name: &'static str, kind: SpaceKind, tax: i32) -> Space {
    Space {
        index,
        name,
        kind,
        group: None,
        price: 0,
        rent: [0; 6],
        house_cost: 0,
        mortgage_value: 0,
        tax,
    }
}

use ColorGroup::*;
use SpaceKind::*;

pub static BOARD: [Space; BOARD_SIZE as usize] = [
    special(0, "Go", Go, 0),
    street(1, "Mediterranean Avenue", Brown, 60, [2, 10, 30, 90, 160, 250], 50),
    special(2, "Community Chest", CommunityChest, 0),
    street(3, "Baltic Avenue", Brown, 60, [4, 20, 60, 180, 320, 450], 50),
    special(4, "Income Tax", IncomeTax, 200),
    railroad(5, "Reading Railroad"),
    street(6, "Oriental Avenue", LightBlue, 100, [6, 30, 90, 270, 400, 550], 50),
    special(7, "Chance", Chance, 0),
    street(8, "Vermont Avenue", LightBlue, 100, [6, 30, 90, 270, 400, 550], 50),
    street(9, "Connecticut Avenue", LightBlue, 120, [8, 40, 100, 300, 450, 600], 50),
    special(10, "Jail", Jail, 0),
    street(11, "St. Charles Place", Pink, 140, [10, 50, 150, 450, 625, 750], 100),
    utility(12, "Electric Company"),
    street(13, "States Avenue", Pink, 140, [10, 50, 150, 450, 625, 750], 100),
    street(14, "Virginia Avenue", Pink, 160, [12, 60, 180, 500, 700, 900], 100),
    railroad(15, "Pennsylvania Railroad"),
    street(16, "St. James Place", Orange, 180, [14, 70, 200, 550, 750, 950], 100),
    special(17, "Community Chest", CommunityChest, 0),
    street(18, "Tennessee Avenue", Orange, 180, [14, 70, 200, 550, 750, 950], 100),
    street(19, "New York Avenue", Orange, 200, [16, 80, 220, 600, 800, 1000], 100),
    special(20, "Free Parking", FreeParking, 0),
    street(21, "Kentucky Avenue", Red, 220, [18, 90, 250, 700, 875, 1050], 150),
    special(22, "Chance", Chance, 0),
    street(23, "Indiana Avenue", Red, 220, [18, 90, 250, 700, 875, 1050], 150),
    street(24, "Illinois Avenue", Red, 240, [20, 100, 300, 750, 925, 1100], 150),
    railroad(25, "B. & O. Railroad"),
    street(26, "Atlantic Avenue", Yellow, 260, [22, 110, 330, 800, 975, 1150], 150),
    street(27, "Ventnor Avenue", Yellow, 260, [22, 110, 330, 800, 975, 1150], 150),
    utility(28, "Water Works"),
    street(29, "Marvin Gardens", Yellow, 280, [24, 120, 360, 850, 1025, 1200], 150),
    special(30, "Go To Jail", GoToJail, 0),
    street(31, "Pacific Avenue", Green, 300, [26, 130, 390, 900, 1100, 1275], 200),
    street(32, "North Carolina Avenue", Green, 300, [26, 130, 390, 900, 1100, 1275], 200),
    special(33, "Community Chest", CommunityChest, 0),
    street(34, "Pennsylvania Avenue", Green, 320, [28, 150, 450, 1000, 1200, 1400], 200),
    railroad(35, "Short Line"),
    special(36, "Chance", Chance, 0),
    street(37, "Park Place", DarkBlue, 350, [35, 175, 500, 1100, 1300, 1500], 200),
    special(38, "Luxury Tax", LuxuryTax, 100),
    street(39, "Boardwalk", DarkBlue, 400, [50, 200, 600, 1400, 1700, 2000], 200),
];

/// Look up a space, wrapping out-of-range positions around the board
pub fn space(position: u8) -> &'static Space {
    &BOARD[(position % BOARD_SIZE) as usize]
}

/// Look up a space without wrapping (for validating client input)
pub fn try_space(position: u8) -> Option<&'static Space> {
    BOARD.get(position as usize)
}

/// Every position that can be owned, in board order
pub fn ownable_positions() -> impl Iterator<Item = u8> {
    BOARD.iter().filter(|s| s.is_ownable()).map(|s| s.index)
}

/// Find the nearest space of `kind` strictly ahead of `from`
///
/// Returns the position and whether the search wrapped past Go.
pub fn nearest_ahead(from: u8, kind: SpaceKind) -> Option<(u8, bool)> {
    (1..BOARD_SIZE)
        .map(|step| from as u16 + step as u16)
        .find(|&pos| space((pos % BOARD_SIZE as u16) as u8).kind == kind)
        .map(|pos| ((pos % BOARD_SIZE as u16) as u8, pos >= BOARD_SIZE as u16))
}
