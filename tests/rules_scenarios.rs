//! End-to-end rule scenarios driven through the public API
//!
//! Each test stages a table, plays scripted dice through `roll_with` and
//! checks money, ownership, phase and the events emitted along the way.

use monopoly_engine::core::{DeckKind, PlayerId, HOTEL};
use monopoly_engine::events::GameEvent;
use monopoly_engine::game::{Command, GameConfig, GameState, TurnPhase, VerbosityLevel};
use monopoly_engine::MonopolyError;

fn p(n: u32) -> PlayerId {
    PlayerId::new(n)
}

fn table(players: usize) -> GameState {
    let mut game = GameState::new(GameConfig::with_player_count(players).with_seed(2024)).unwrap();
    game.logger.set_verbosity(VerbosityLevel::Silent);
    game
}

/// Hand `position` to `owner` with `houses` already standing, taking the
/// pieces out of the bank
fn stage_owner(game: &mut GameState, owner: PlayerId, position: u8, houses: u8) {
    let prop = &mut game.properties[position as usize];
    prop.owner = Some(owner);
    prop.houses = houses;
    game.players[owner.seat()].owned.insert(position);
    if houses == HOTEL {
        game.bank.hotels_remaining -= 1;
    } else {
        game.bank.houses_remaining -= houses;
    }
}

fn stage_card(game: &mut GameState, kind: DeckKind, text: &str) {
    let deck = game.decks.get_mut(kind);
    let index = deck.find(text).unwrap();
    assert!(deck.put_on_top(index));
}

/// Events logged since `mark`
fn events_since(game: &GameState, mark: usize) -> Vec<GameEvent> {
    game.events.since(mark).to_vec()
}

#[test]
fn chance_to_illinois_does_not_pay_salary() {
    let mut game = table(2);
    stage_card(
        &mut game,
        DeckKind::Chance,
        "Advance to Illinois Avenue. If you pass Go, collect $200",
    );

    let mark = game.events.len();
    game.roll_with(p(0), (3, 4)).unwrap();

    assert_eq!(game.players[0].position, 24);
    assert_eq!(game.players[0].money, 1500);
    assert_eq!(game.phase, TurnPhase::AwaitingPurchaseDecision { position: 24 });

    let events = events_since(&game, mark);
    assert!(events.iter().any(|e| matches!(e, GameEvent::CardDrawn { deck: DeckKind::Chance, .. })));
    assert!(!events.iter().any(|e| matches!(e, GameEvent::PassedGo { .. })));
    game.check_invariants().unwrap();
}

#[test]
fn two_railroads_charge_fifty() {
    let mut game = table(2);
    game.purchase(p(1), 5).unwrap();
    game.purchase(p(1), 15).unwrap();

    let mark = game.events.len();
    game.roll_with(p(0), (2, 3)).unwrap();

    assert_eq!(game.players[0].money, 1450);
    assert_eq!(game.players[1].money, 1500 - 200 - 200 + 50);
    assert!(events_since(&game, mark).contains(&GameEvent::RentPaid {
        from: p(0),
        to: p(1),
        position: 5,
        amount: 50,
    }));
    assert_eq!(game.phase, TurnPhase::TurnComplete);
}

#[test]
fn undeveloped_monopoly_doubles_base_rent() {
    let mut game = table(2);
    game.purchase(p(1), 1).unwrap();
    game.purchase(p(1), 3).unwrap();

    game.roll_with(p(0), (1, 2)).unwrap();

    // Baltic base rent is $4
    assert_eq!(game.players[0].money, 1500 - 8);
    assert_eq!(game.rent_due(3, 3), 8);
}

#[test]
fn bankruptcy_to_player_hands_over_developed_property() {
    let mut game = table(2);
    // Seat 0 is the debtor, seat 1 the creditor
    stage_owner(&mut game, p(0), 1, 2);
    stage_owner(&mut game, p(1), 21, 2);
    stage_owner(&mut game, p(1), 23, 2);
    stage_owner(&mut game, p(1), 24, 2);
    game.players[0].money = 100;
    game.players[0].position = 20;

    let mark = game.events.len();
    game.roll_with(p(0), (1, 3)).unwrap();

    // Illinois with two houses rents for $300
    assert_eq!(game.rent_due(24, 4), 300);
    assert_eq!(game.property(1).owner, Some(p(1)));
    assert_eq!(game.property(1).houses, 2);
    assert!(game.players[0].bankrupt);
    assert_eq!(game.players[0].money, 0);
    assert!(game.players[0].owned.is_empty());
    assert_eq!(game.players[1].money, 1600);
    assert_eq!(game.phase, TurnPhase::GameOver { winner: p(1) });
    assert_eq!(game.winner(), Some(p(1)));

    let events = events_since(&game, mark);
    assert!(events.contains(&GameEvent::Bankrupt {
        player: p(0),
        creditor: Some(p(1)),
    }));
    assert_eq!(events.last(), Some(&GameEvent::GameOver { winner: p(1) }));
    game.check_invariants().unwrap();

    let err = game.apply(p(1), Command::RollDice).unwrap_err();
    assert!(matches!(err, MonopolyError::InvalidCommand(_)));
}

#[test]
fn bankruptcy_to_bank_auctions_the_estate() {
    let mut game = table(3);
    game.purchase(p(0), 39).unwrap();
    game.players[0].money = 50;
    game.players[0].position = 2;

    // Income tax at 4 is $200
    game.roll_with(p(0), (1, 1)).unwrap();

    assert!(game.players[0].bankrupt);
    assert_eq!(game.property(39).owner, None);
    match &game.phase {
        TurnPhase::Auction(auction) => {
            assert_eq!(auction.position, 39);
            assert_eq!(auction.cursor, p(1));
        }
        other => panic!("expected an auction, got {other:?}"),
    }

    game.apply(p(1), Command::AuctionBid { amount: 300 }).unwrap();
    game.apply(p(2), Command::AuctionPass).unwrap();

    assert_eq!(game.property(39).owner, Some(p(1)));
    assert_eq!(game.players[1].money, 1200);
    // Debtor's turn is over; play moves on
    assert_eq!(game.current, p(1));
    assert_eq!(game.phase, TurnPhase::AwaitingRoll);
    game.check_invariants().unwrap();
}

#[test]
fn third_doubles_go_straight_to_jail() {
    let mut game = table(2);

    game.roll_with(p(0), (2, 2)).unwrap(); // Income Tax
    assert_eq!(game.players[0].money, 1300);
    game.apply(p(0), Command::EndTurn).unwrap();
    assert_eq!(game.current, p(0));

    game.roll_with(p(0), (1, 1)).unwrap(); // Oriental Avenue
    game.apply(p(0), Command::BuyDecision { buy: true }).unwrap();
    game.apply(p(0), Command::EndTurn).unwrap();
    assert_eq!(game.current, p(0));

    let mark = game.events.len();
    game.roll_with(p(0), (3, 3)).unwrap();

    let player = &game.players[0];
    assert!(player.in_jail);
    assert_eq!(player.position, 10);
    assert_eq!(player.consecutive_doubles, 0);
    assert_eq!(game.phase, TurnPhase::TurnComplete);
    assert!(!events_since(&game, mark)
        .iter()
        .any(|e| matches!(e, GameEvent::Moved { .. })));

    // No reroll from jail
    game.apply(p(0), Command::EndTurn).unwrap();
    assert_eq!(game.current, p(1));
}

#[test]
fn declined_purchase_with_no_bids_stays_unowned() {
    let mut game = table(2);
    game.roll_with(p(0), (1, 2)).unwrap();
    assert_eq!(game.phase, TurnPhase::AwaitingPurchaseDecision { position: 3 });

    let events = game.apply(p(0), Command::BuyDecision { buy: false }).unwrap();
    assert!(events.contains(&GameEvent::AuctionStarted {
        position: 3,
        first_bidder: p(1),
    }));

    // Out of turn
    assert!(game.apply(p(0), Command::AuctionPass).is_err());

    game.apply(p(1), Command::AuctionPass).unwrap();
    let events = game.apply(p(0), Command::AuctionPass).unwrap();

    assert!(events.contains(&GameEvent::AuctionUnsold { position: 3 }));
    assert_eq!(game.property(3).owner, None);
    assert_eq!(game.players[0].money, 1500);
    assert_eq!(game.players[1].money, 1500);
    assert_eq!(game.phase, TurnPhase::TurnComplete);
}

#[test]
fn supervisor_force_pass_closes_auction() {
    let mut game = table(2);
    game.roll_with(p(0), (1, 2)).unwrap();
    game.apply(p(0), Command::BuyDecision { buy: false }).unwrap();
    game.apply(p(1), Command::AuctionBid { amount: 10 }).unwrap();

    // Issuer is ignored for supervisor commands
    let events = game.apply(p(1), Command::ForcePass { player: p(0) }).unwrap();
    assert!(events.contains(&GameEvent::BidPassed {
        player: p(0),
        position: 3,
        forced: true,
    }));
    assert_eq!(game.property(3).owner, Some(p(1)));
    assert_eq!(game.players[1].money, 1490);
}

#[test]
fn hotel_supply_exhausted_leaves_four_houses() {
    let mut game = table(2);
    stage_owner(&mut game, p(0), 1, 4);
    stage_owner(&mut game, p(0), 3, 4);
    game.bank.hotels_remaining = 0;

    let err = game.apply(p(0), Command::Build { position: 1 }).unwrap_err();
    assert!(matches!(err, MonopolyError::SupplyExhausted(_)));
    assert_eq!(game.property(1).houses, 4);
    assert_eq!(game.players[0].money, 1500);
}

#[test]
fn uneven_build_is_rejected() {
    let mut game = table(2);
    game.purchase(p(0), 1).unwrap();
    game.purchase(p(0), 3).unwrap();

    game.apply(p(0), Command::Build { position: 1 }).unwrap();
    let err = game.apply(p(0), Command::Build { position: 1 }).unwrap_err();
    assert!(matches!(err, MonopolyError::IllegalBuild(_)));

    game.apply(p(0), Command::Build { position: 3 }).unwrap();
    game.apply(p(0), Command::Build { position: 1 }).unwrap();
    assert_eq!(game.property(1).houses, 2);
    assert_eq!(game.bank.houses_remaining, 29);
    game.check_invariants().unwrap();
}

#[test]
fn go_back_three_never_pays_salary() {
    let mut game = table(2);
    stage_card(&mut game, DeckKind::Chance, "Go Back 3 Spaces");

    let mark = game.events.len();
    game.roll_with(p(0), (3, 4)).unwrap();

    // Lands on Income Tax
    assert_eq!(game.players[0].position, 4);
    assert_eq!(game.players[0].money, 1300);
    assert_eq!(game.free_parking_pot, 200);
    assert!(!events_since(&game, mark)
        .iter()
        .any(|e| matches!(e, GameEvent::PassedGo { .. })));
}

#[test]
fn passing_go_pays_once() {
    let mut game = table(2);
    game.players[0].position = 35;

    let mark = game.events.len();
    game.roll_with(p(0), (2, 4)).unwrap();

    assert_eq!(game.players[0].position, 1);
    assert_eq!(game.players[0].money, 1700);
    let salaries = events_since(&game, mark)
        .iter()
        .filter(|e| matches!(e, GameEvent::PassedGo { .. }))
        .count();
    assert_eq!(salaries, 1);
}

#[test]
fn trade_between_players_conserves_money() {
    let mut game = table(3);
    game.purchase(p(1), 1).unwrap();
    game.purchase(p(2), 39).unwrap();
    let before = game.players[1].money + game.players[2].money;

    // Seat 1 trades while seat 0 holds the turn
    game.apply(p(1), Command::TradeOpen { partner: p(2) }).unwrap();
    game.apply(p(1), Command::TradeToggleProperty { position: 1 }).unwrap();
    game.apply(p(1), Command::TradeToggleProperty { position: 39 }).unwrap();
    game.apply(
        p(1),
        Command::TradeAddMoney {
            side: monopoly_engine::game::TradeSide::Offered,
            denomination: 100,
        },
    )
    .unwrap();
    game.apply(p(1), Command::TradeSend).unwrap();
    let events = game.apply(p(2), Command::TradeAccept { initiator: p(1) }).unwrap();

    assert!(events.contains(&GameEvent::TradeCompleted {
        initiator: p(1),
        partner: p(2),
    }));
    assert_eq!(game.owner_of(1), Some(p(2)));
    assert_eq!(game.owner_of(39), Some(p(1)));
    assert_eq!(game.players[1].money + game.players[2].money, before);
    assert_eq!(game.players[2].money, 1500 - 400 + 100);
    game.check_invariants().unwrap();
}

#[test]
fn trade_on_developed_property_is_voided() {
    let mut game = table(2);
    game.purchase(p(0), 1).unwrap();
    game.purchase(p(0), 3).unwrap();
    game.purchase(p(1), 5).unwrap();

    game.apply(p(1), Command::TradeOpen { partner: p(0) }).unwrap();
    game.apply(p(1), Command::TradeToggleProperty { position: 1 }).unwrap();
    game.apply(p(1), Command::TradeToggleProperty { position: 5 }).unwrap();
    game.apply(p(1), Command::TradeSend).unwrap();

    game.apply(p(0), Command::Build { position: 1 }).unwrap();
    let events = game.apply(p(0), Command::TradeAccept { initiator: p(1) }).unwrap();

    assert!(events.contains(&GameEvent::TradeInvalidated {
        initiator: p(1),
        partner: p(0),
        position: 1,
    }));
    assert_eq!(game.owner_of(1), Some(p(0)));
    assert_eq!(game.owner_of(5), Some(p(1)));
    assert!(game.trades.is_empty());
}

#[test]
fn rejected_command_changes_nothing() {
    let mut game = table(2);
    let before = serde_json::to_string(&game.snapshot()).unwrap();

    assert!(game.apply(p(1), Command::RollDice).is_err());
    assert!(game.apply(p(0), Command::EndTurn).is_err());
    assert!(game.apply(p(0), Command::Mortgage { position: 1 }).is_err());
    assert!(game.apply(p(0), Command::Unmortgage { position: 1 }).is_err());

    let after = serde_json::to_string(&game.snapshot()).unwrap();
    assert_eq!(before, after);
}
