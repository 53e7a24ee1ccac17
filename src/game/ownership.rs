//! Purchase, mortgage and building operations
//!
//! Every operation validates completely before touching state, so a
//! rejected command leaves the game exactly as it was.

use crate::core::{space, try_space, Building, PlayerId, PropertyState, Space, SpaceKind, HOTEL};
use crate::events::GameEvent;
use crate::game::GameState;
use crate::{MonopolyError, Result};

impl GameState {
    /// Fails unless `position` is an ownable space held by `player`
    fn owned_by(&self, player: PlayerId, position: u8) -> Result<(&'static Space, &PropertyState)> {
        let space = try_space(position)
            .filter(|s| s.is_ownable())
            .ok_or_else(|| MonopolyError::invalid(format!("position {position} cannot be owned")))?;
        let prop = self.property(position);
        if prop.owner != Some(player) {
            return Err(MonopolyError::invalid(format!("{player} does not own {}", space.name)));
        }
        Ok((space, prop))
    }

    /// Buy an unowned space at list price
    pub fn purchase(&mut self, player: PlayerId, position: u8) -> Result<()> {
        let space = try_space(position)
            .filter(|s| s.is_ownable())
            .ok_or_else(|| MonopolyError::invalid(format!("position {position} cannot be bought")))?;
        if self.owner_of(position).is_some() {
            return Err(MonopolyError::invalid(format!("{} is already owned", space.name)));
        }
        let available = self.player(player)?.money;
        if available < space.price {
            return Err(MonopolyError::InsufficientFunds {
                needed: space.price,
                available,
            });
        }

        self.account_mut(player).debit(space.price);
        self.transfer_property(position, Some(player));
        self.events.log(GameEvent::PropertyPurchased {
            player,
            position,
            price: space.price,
        });
        log_if_verbose!(
            self,
            normal,
            "{} buys {} for ${}",
            self.account(player).name,
            space.name,
            space.price
        );
        Ok(())
    }

    pub fn mortgage(&mut self, player: PlayerId, position: u8) -> Result<()> {
        let (space, prop) = self.owned_by(player, position)?;
        if prop.mortgaged {
            return Err(MonopolyError::invalid(format!("{} is already mortgaged", space.name)));
        }
        if prop.houses > 0 {
            return Err(MonopolyError::invalid(format!(
                "sell the buildings on {} before mortgaging",
                space.name
            )));
        }

        self.property_mut(position).mortgaged = true;
        self.account_mut(player).credit(space.mortgage_value);
        self.events.log(GameEvent::Mortgaged {
            player,
            position,
            amount: space.mortgage_value,
        });
        log_if_verbose!(
            self,
            normal,
            "{} mortgages {} for ${}",
            self.account(player).name,
            space.name,
            space.mortgage_value
        );
        Ok(())
    }

    pub fn unmortgage(&mut self, player: PlayerId, position: u8) -> Result<()> {
        let (space, prop) = self.owned_by(player, position)?;
        if !prop.mortgaged {
            return Err(MonopolyError::invalid(format!("{} is not mortgaged", space.name)));
        }
        let cost = space.unmortgage_cost();
        let available = self.account(player).money;
        if available < cost {
            return Err(MonopolyError::InsufficientFunds {
                needed: cost,
                available,
            });
        }

        self.property_mut(position).mortgaged = false;
        self.account_mut(player).debit(cost);
        self.events.log(GameEvent::Unmortgaged { player, position, cost });
        log_if_verbose!(
            self,
            normal,
            "{} lifts the mortgage on {} for ${}",
            self.account(player).name,
            space.name,
            cost
        );
        Ok(())
    }

    /// Check every building rule for adding one house to `position`
    pub fn check_build(&self, player: PlayerId, position: u8) -> Result<()> {
        let (space, prop) = self.owned_by(player, position)?;
        let group = match (space.kind, space.group) {
            (SpaceKind::Property, Some(group)) => group,
            _ => {
                return Err(MonopolyError::IllegalBuild(format!(
                    "{} cannot hold buildings",
                    space.name
                )))
            }
        };
        if !self.owns_group(player, group) {
            return Err(MonopolyError::IllegalBuild(format!("{player} does not hold all of {group}")));
        }
        if group.members().iter().any(|&pos| self.property(pos).mortgaged) {
            return Err(MonopolyError::IllegalBuild(format!("{group} has a mortgaged property")));
        }
        if prop.houses >= HOTEL {
            return Err(MonopolyError::IllegalBuild(format!("{} already has a hotel", space.name)));
        }
        let fewest = group
            .members()
            .iter()
            .map(|&pos| self.property(pos).houses)
            .min()
            .unwrap_or(0);
        if prop.houses > fewest {
            return Err(MonopolyError::IllegalBuild(format!(
                "build evenly across {group} first"
            )));
        }
        if let Some(piece) = self.bank.missing_piece(prop.houses) {
            return Err(MonopolyError::SupplyExhausted(piece));
        }
        let available = self.account(player).money;
        if available < space.house_cost {
            return Err(MonopolyError::InsufficientFunds {
                needed: space.house_cost,
                available,
            });
        }
        Ok(())
    }

    /// Add one house (or the hotel) to `position`
    pub fn build_house(&mut self, player: PlayerId, position: u8) -> Result<()> {
        self.check_build(player, position)?;

        let space = space(position);
        let houses = self.property(position).houses;
        self.bank.take_for_build(houses);
        self.property_mut(position).houses = houses + 1;
        self.account_mut(player).debit(space.house_cost);
        self.events.log(GameEvent::HouseBuilt {
            player,
            position,
            houses: houses + 1,
        });
        log_if_verbose!(
            self,
            normal,
            "{} builds on {} ({})",
            self.account(player).name,
            space.name,
            if houses + 1 == HOTEL {
                "hotel".to_string()
            } else {
                format!("{} houses", houses + 1)
            }
        );
        Ok(())
    }

    /// Sell one house (or break down the hotel) on `position` for half cost
    ///
    /// A hotel steps back down to four houses when the bank can supply
    /// them; otherwise the property is cleared and all five units are
    /// refunded.
    pub fn sell_house(&mut self, player: PlayerId, position: u8) -> Result<()> {
        let (space, prop) = self.owned_by(player, position)?;
        if prop.houses == 0 {
            return Err(MonopolyError::invalid(format!("{} has no buildings", space.name)));
        }
        if let Some(group) = space.group {
            let most = group
                .members()
                .iter()
                .map(|&pos| self.property(pos).houses)
                .max()
                .unwrap_or(0);
            if prop.houses < most {
                return Err(MonopolyError::IllegalBuild(format!("sell evenly across {group} first")));
            }
        }

        let half = space.house_cost / 2;
        let houses = prop.houses;
        let (remaining, refund) = if houses == HOTEL {
            self.bank.hotels_remaining += 1;
            if self.bank.houses_remaining >= 4 {
                self.bank.houses_remaining -= 4;
                (4, half)
            } else {
                (0, half * HOTEL as i32)
            }
        } else {
            self.bank.houses_remaining += 1;
            (houses - 1, half)
        };

        self.property_mut(position).houses = remaining;
        self.account_mut(player).credit(refund);
        self.events.log(GameEvent::HouseSold {
            player,
            position,
            houses: remaining,
            refund,
        });
        log_if_verbose!(
            self,
            normal,
            "{} sells {} on {} for ${}",
            self.account(player).name,
            if houses == HOTEL { Building::Hotel } else { Building::House },
            space.name,
            refund
        );
        Ok(())
    }
}
