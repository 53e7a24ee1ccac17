//! Chance and Community Chest draw piles
//!
//! A deck holds card indices into its static catalog. Drawn cards go to
//! the discard pile, except the Get Out of Jail Free card, which leaves the
//! deck until its holder uses or forfeits it.

use crate::core::{Card, DeckKind};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One shuffled deck with its discard pile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDeck {
    pub kind: DeckKind,

    /// Front is the next card drawn
    pub draw_pile: VecDeque<u8>,

    pub discard_pile: Vec<u8>,
}

impl CardDeck {
    /// Create a deck with every card of `kind`, shuffled
    pub fn new(kind: DeckKind, rng: &mut impl Rng) -> Self {
        let mut cards: Vec<u8> = (0..kind.catalog().len() as u8).collect();
        cards.shuffle(rng);
        CardDeck {
            kind,
            draw_pile: cards.into(),
            discard_pile: Vec::new(),
        }
    }

    /// Create a deck in catalog order (for scripted tests)
    pub fn unshuffled(kind: DeckKind) -> Self {
        CardDeck {
            kind,
            draw_pile: (0..kind.catalog().len() as u8).collect(),
            discard_pile: Vec::new(),
        }
    }

    pub fn card(&self, index: u8) -> &'static Card {
        &self.kind.catalog()[index as usize]
    }

    /// Draw the front card, reshuffling the discards first if the pile is empty
    ///
    /// Returns `None` only if every card is out of the deck (held by players).
    pub fn draw(&mut self, rng: &mut impl Rng) -> Option<u8> {
        if self.draw_pile.is_empty() {
            self.reshuffle(rng);
        }
        let index = self.draw_pile.pop_front()?;
        if !self.card(index).is_jail_free() {
            self.discard_pile.push(index);
        }
        Some(index)
    }

    /// Move the discard pile back into the draw pile and shuffle it
    pub fn reshuffle(&mut self, rng: &mut impl Rng) {
        let mut cards: Vec<u8> = self.draw_pile.drain(..).collect();
        cards.append(&mut self.discard_pile);
        cards.shuffle(rng);
        self.draw_pile = cards.into();
    }

    /// Catalog index of this deck's Get Out of Jail Free card
    pub fn jail_free_index(&self) -> Option<u8> {
        self.kind
            .catalog()
            .iter()
            .position(|c| c.is_jail_free())
            .map(|i| i as u8)
    }

    /// Return a held Get Out of Jail Free card to the discard pile
    pub fn return_jail_free(&mut self) {
        if let Some(index) = self.jail_free_index() {
            if !self.contains(index) {
                self.discard_pile.push(index);
            }
        }
    }

    pub fn contains(&self, index: u8) -> bool {
        self.draw_pile.contains(&index) || self.discard_pile.contains(&index)
    }

    /// Number of cards physically in the deck (both piles)
    pub fn len(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Place a card on top of the draw pile, pulling it from wherever it is
    ///
    /// Used to stage scripted draws. Returns false if the card is not in
    /// the deck.
    pub fn put_on_top(&mut self, index: u8) -> bool {
        if let Some(pos) = self.draw_pile.iter().position(|&c| c == index) {
            self.draw_pile.remove(pos);
        } else if let Some(pos) = self.discard_pile.iter().position(|&c| c == index) {
            self.discard_pile.remove(pos);
        } else {
            return false;
        }
        self.draw_pile.push_front(index);
        true
    }

    /// Find a card by its printed text
    pub fn find(&self, text: &str) -> Option<u8> {
        self.kind
            .catalog()
            .iter()
            .position(|c| c.text == text)
            .map(|i| i as u8)
    }
}

/// Both decks of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decks {
    pub chance: CardDeck,
    pub community_chest: CardDeck,
}

impl Decks {
    pub fn new(rng: &mut impl Rng) -> Self {
        Decks {
            chance: CardDeck::new(DeckKind::Chance, rng),
            community_chest: CardDeck::new(DeckKind::CommunityChest, rng),
        }
    }

    pub fn get(&self, kind: DeckKind) -> &CardDeck {
        match kind {
            DeckKind::Chance => &self.chance,
            DeckKind::CommunityChest => &self.community_chest,
        }
    }

    pub fn get_mut(&mut self, kind: DeckKind) -> &mut CardDeck {
        match kind {
            DeckKind::Chance => &mut self.chance,
            DeckKind::CommunityChest => &mut self.community_chest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    #[test]
    fn test_new_deck_holds_every_card() {
        let mut rng = ChaCha12Rng::seed_from_u64(7);
        let deck = CardDeck::new(DeckKind::Chance, &mut rng);
        assert_eq!(deck.len(), 16);
        for i in 0..16 {
            assert!(deck.contains(i));
        }
    }

    #[test]
    fn test_draw_discards_and_reshuffles() {
        let mut rng = ChaCha12Rng::seed_from_u64(7);
        let mut deck = CardDeck::unshuffled(DeckKind::CommunityChest);
        let jail_free = deck.jail_free_index().unwrap();

        for _ in 0..16 {
            deck.draw(&mut rng).unwrap();
        }
        assert!(deck.draw_pile.is_empty());
        assert_eq!(deck.discard_pile.len(), 15);
        assert!(!deck.contains(jail_free));

        // Next draw reshuffles the 15 discards
        deck.draw(&mut rng).unwrap();
        assert_eq!(deck.len(), 15);
        assert_eq!(deck.discard_pile.len(), 1);
    }

    #[test]
    fn test_return_jail_free_only_once() {
        let mut rng = ChaCha12Rng::seed_from_u64(1);
        let mut deck = CardDeck::unshuffled(DeckKind::Chance);
        let jail_free = deck.jail_free_index().unwrap();
        assert!(deck.put_on_top(jail_free));
        assert_eq!(deck.draw(&mut rng), Some(jail_free));
        assert_eq!(deck.len(), 15);

        deck.return_jail_free();
        deck.return_jail_free();
        assert_eq!(deck.len(), 16);
        assert_eq!(deck.discard_pile, vec![jail_free]);
    }

    #[test]
    fn test_put_on_top_from_discard() {
        let mut rng = ChaCha12Rng::seed_from_u64(3);
        let mut deck = CardDeck::unshuffled(DeckKind::Chance);
        let first = deck.draw(&mut rng).unwrap();
        assert!(deck.discard_pile.contains(&first));

        assert!(deck.put_on_top(first));
        assert_eq!(deck.draw_pile.front(), Some(&first));
        assert!(deck.discard_pile.is_empty());
    }
}
