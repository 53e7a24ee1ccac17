//! Chance and Community Chest card interpreter

use crate::core::board::nearest_ahead;
use crate::core::{CardAction, DeckKind, PlayerId, HOTEL};
use crate::events::GameEvent;
use crate::game::{GameState, TurnPhase};

impl GameState {
    /// Draw the top card of `kind` and carry it out for `player`
    pub(crate) fn draw_card(&mut self, player: PlayerId, kind: DeckKind) {
        let Some(index) = self.decks.get_mut(kind).draw(&mut self.rng) else {
            // Every card is out in players' hands
            self.set_phase(TurnPhase::TurnComplete);
            return;
        };
        let card = self.decks.get(kind).card(index);
        self.events.log(GameEvent::CardDrawn {
            player,
            deck: kind,
            card: index,
            text: card.text.to_string(),
        });
        log_if_verbose!(self, normal, "{} draws {}: {}", self.account(player).name, kind, card.text);
        self.execute_card(player, kind, card.action);
    }

    /// Carry out a card action, leaving the phase set for what comes next
    pub(crate) fn execute_card(&mut self, player: PlayerId, deck: DeckKind, action: CardAction) {
        match action {
            CardAction::Money { amount } if amount >= 0 => {
                self.account_mut(player).credit(amount);
                self.events.log(GameEvent::BankPayout { player, amount });
            }
            CardAction::Money { amount } => {
                if !self.charge_to_bank(player, -amount, true) {
                    return;
                }
            }
            CardAction::AdvanceTo { position, collect_go } => {
                self.move_to(player, position, collect_go);
                self.land(player);
                return;
            }
            CardAction::AdvanceRelative { delta } => {
                self.move_relative(player, delta);
                self.land(player);
                return;
            }
            CardAction::AdvanceNearest { kind } => {
                let from = self.account(player).position;
                if let Some((target, _)) = nearest_ahead(from, kind) {
                    self.move_to(player, target, true);
                    self.land(player);
                    return;
                }
            }
            CardAction::GoToJail => self.jail(player),
            CardAction::JailFreeCard => {
                self.account_mut(player).jail_free_cards.push(deck);
            }
            CardAction::CollectFromEachPlayer { amount } => {
                let payers: Vec<PlayerId> = self
                    .active_players()
                    .map(|p| p.id)
                    .filter(|&id| id != player)
                    .collect();
                for payer in payers {
                    if self.charge_to_player(payer, player, amount) {
                        self.events.log(GameEvent::PlayerPayment {
                            from: payer,
                            to: player,
                            amount,
                        });
                    }
                }
            }
            CardAction::PayEachPlayer { amount } => {
                let payees: Vec<PlayerId> = self
                    .active_players()
                    .map(|p| p.id)
                    .filter(|&id| id != player)
                    .collect();
                let mut short = false;
                for payee in payees {
                    let paid = amount.min(self.account(player).money.max(0));
                    if paid > 0 {
                        self.account_mut(player).debit(paid);
                        self.account_mut(payee).credit(paid);
                        self.events.log(GameEvent::PlayerPayment {
                            from: player,
                            to: payee,
                            amount: paid,
                        });
                    }
                    short |= paid < amount;
                }
                if short {
                    log_if_verbose!(self, minimal, "{} cannot pay everyone", self.account(player).name);
                    self.declare_bankruptcy(player, None);
                    return;
                }
            }
            CardAction::PayPerHouseHotel { house, hotel } => {
                let total: i32 = self
                    .account(player)
                    .owned
                    .iter()
                    .map(|&pos| match self.property(pos).houses {
                        HOTEL => hotel,
                        houses => house * houses as i32,
                    })
                    .sum();
                if total > 0 && !self.charge_to_bank(player, total, true) {
                    return;
                }
            }
        }
        self.set_phase(TurnPhase::TurnComplete);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::JAIL;
    use crate::game::state::test_support::*;

    fn p(n: u32) -> PlayerId {
        PlayerId::new(n)
    }

    fn stage(game: &mut GameState, kind: DeckKind, text: &str) {
        let deck = game.decks.get_mut(kind);
        let index = deck.find(text).unwrap();
        assert!(deck.put_on_top(index));
    }

    #[test]
    fn test_advance_to_illinois_from_chance() {
        let mut game = quiet_game(2);
        stage(
            &mut game,
            DeckKind::Chance,
            "Advance to Illinois Avenue. If you pass Go, collect $200",
        );
        game.roll_with(p(0), (3, 4)).unwrap();
        assert_eq!(game.players[0].position, 24);
        assert_eq!(game.players[0].money, 1500);
        assert_eq!(game.phase, TurnPhase::AwaitingPurchaseDecision { position: 24 });
    }

    #[test]
    fn test_money_cards() {
        let mut game = quiet_game(2);
        game.execute_card(p(0), DeckKind::Chance, CardAction::Money { amount: 50 });
        assert_eq!(game.players[0].money, 1550);
        game.execute_card(p(0), DeckKind::Chance, CardAction::Money { amount: -15 });
        assert_eq!(game.players[0].money, 1535);
        assert_eq!(game.free_parking_pot, 15);
        assert_eq!(game.phase, TurnPhase::TurnComplete);
    }

    #[test]
    fn test_advance_relative_wrap_pays_no_salary() {
        let mut game = quiet_game(2);
        game.players[0].position = 2;
        game.execute_card(p(0), DeckKind::Chance, CardAction::AdvanceRelative { delta: -3 });
        assert_eq!(game.players[0].position, 39);
        assert_eq!(game.players[0].money, 1500);
    }

    #[test]
    fn test_advance_to_go_pays_salary() {
        let mut game = quiet_game(2);
        game.players[0].position = 7;
        game.execute_card(
            p(0),
            DeckKind::Chance,
            CardAction::AdvanceTo {
                position: 0,
                collect_go: true,
            },
        );
        assert_eq!(game.players[0].money, 1700);
        assert_eq!(game.phase, TurnPhase::TurnComplete);
    }

    #[test]
    fn test_advance_nearest_railroad_wraps() {
        let mut game = quiet_game(2);
        game.players[0].position = 36;
        game.execute_card(
            p(0),
            DeckKind::Chance,
            CardAction::AdvanceNearest {
                kind: crate::core::SpaceKind::Railroad,
            },
        );
        assert_eq!(game.players[0].position, 5);
        assert_eq!(game.players[0].money, 1700);
        assert_eq!(game.phase, TurnPhase::AwaitingPurchaseDecision { position: 5 });
    }

    #[test]
    fn test_go_to_jail_card() {
        let mut game = quiet_game(2);
        game.players[0].position = 7;
        game.execute_card(p(0), DeckKind::Chance, CardAction::GoToJail);
        assert!(game.players[0].in_jail);
        assert_eq!(game.players[0].position, JAIL);
    }

    #[test]
    fn test_jail_free_card_leaves_deck() {
        let mut game = quiet_game(2);
        let deck = game.decks.get(DeckKind::CommunityChest);
        let index = deck.jail_free_index().unwrap();
        let text = deck.card(index).text;
        stage(&mut game, DeckKind::CommunityChest, text);
        game.draw_card(p(0), DeckKind::CommunityChest);
        assert_eq!(game.players[0].jail_free_cards.as_slice(), &[DeckKind::CommunityChest]);
        assert!(!game.decks.get(DeckKind::CommunityChest).contains(index));
    }

    #[test]
    fn test_collect_from_each_player() {
        let mut game = quiet_game(3);
        game.execute_card(p(0), DeckKind::CommunityChest, CardAction::CollectFromEachPlayer { amount: 50 });
        assert_eq!(game.players[0].money, 1600);
        assert_eq!(game.players[1].money, 1450);
        assert_eq!(game.players[2].money, 1450);
    }

    #[test]
    fn test_collect_bankrupts_broke_payer_to_drawer() {
        let mut game = quiet_game(3);
        game.players[2].money = 20;
        give(&mut game, p(2), 39);
        game.execute_card(p(0), DeckKind::CommunityChest, CardAction::CollectFromEachPlayer { amount: 50 });
        assert!(game.players[2].bankrupt);
        assert_eq!(game.owner_of(39), Some(p(0)));
        assert_eq!(game.players[0].money, 1500 + 50 + 20);
        assert_eq!(game.phase, TurnPhase::TurnComplete);
    }

    #[test]
    fn test_pay_each_player_shortfall_bankrupts_to_bank() {
        let mut game = quiet_game(3);
        game.players[0].money = 60;
        game.execute_card(p(0), DeckKind::Chance, CardAction::PayEachPlayer { amount: 50 });
        assert!(game.players[0].bankrupt);
        assert_eq!(game.players[1].money, 1550);
        assert_eq!(game.players[2].money, 1510);
        assert_eq!(game.current, p(1));
    }

    #[test]
    fn test_repairs_charge_per_building() {
        let mut game = quiet_game(2);
        give(&mut game, p(0), 1);
        give(&mut game, p(0), 3);
        game.property_mut(1).houses = 2;
        game.property_mut(3).houses = HOTEL;
        game.execute_card(p(0), DeckKind::Chance, CardAction::PayPerHouseHotel { house: 25, hotel: 100 });
        assert_eq!(game.players[0].money, 1500 - 150);
    }
}
