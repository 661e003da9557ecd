use crate::model::card::Card;
use core::cmp::Ordering;
use std::vec::Vec;

/// Comparator for the canonical hand order (suit-major, rank-minor ascending).
pub fn sort_order(a: &Card, b: &Card) -> Ordering {
    a.suit.cmp(&b.suit).then(a.rank.cmp(&b.rank))
}

/// Cards held by one player, always kept in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        debug_assert!(
            hand.cards.windows(2).all(|pair| pair[0] != pair[1]),
            "hand built with duplicate cards"
        );
        hand
    }

    pub fn add(&mut self, card: Card) {
        debug_assert!(!self.contains(card), "{card} is already in hand");
        self.cards.push(card);
        self.sort();
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    /// Removes and returns the card at `index` in hand order.
    pub fn take_at(&mut self, index: usize) -> Option<Card> {
        (index < self.cards.len()).then(|| self.cards.remove(index))
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn sort(&mut self) {
        self.cards.sort_by(sort_order);
    }
}

impl Extend<Card> for Hand {
    fn extend<I: IntoIterator<Item = Card>>(&mut self, iter: I) {
        for card in iter {
            debug_assert!(!self.contains(card), "{card} is already in hand");
            self.cards.push(card);
        }
        self.sort();
    }
}
