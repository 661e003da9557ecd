use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use std::fmt;

pub const DECK_SIZE: usize = 52;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealError {
    NoPlayers,
    UnevenSplit { cards: usize, players: usize },
    WrongSize(usize),
    DuplicateCard(Card),
}

impl fmt::Display for DealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealError::NoPlayers => write!(f, "cannot deal to zero players"),
            DealError::UnevenSplit { cards, players } => {
                write!(f, "{cards} cards do not split evenly between {players} players")
            }
            DealError::WrongSize(size) => {
                write!(f, "a deck needs {DECK_SIZE} cards, got {size}")
            }
            DealError::DuplicateCard(card) => write!(f, "{card} appears more than once"),
        }
    }
}

impl std::error::Error for DealError {}

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    /// Builds a deck from an explicit ordering; the cards must be the 52 distinct cards.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, DealError> {
        if cards.len() != DECK_SIZE {
            return Err(DealError::WrongSize(cards.len()));
        }
        let mut seen = HashSet::with_capacity(DECK_SIZE);
        for card in cards.iter().copied() {
            if !seen.insert(card) {
                return Err(DealError::DuplicateCard(card));
            }
        }
        Ok(Self { cards })
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    /// Fisher–Yates: walk down from the top, swapping each slot with one drawn from `[0, i]`.
    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in (1..self.cards.len()).rev() {
            let j = rng.gen_range(0..=i);
            self.cards.swap(i, j);
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Deals round-robin (seat 0, 1, 2, 3, 0, ...) and returns one sorted hand per player.
    pub fn deal(self, num_players: usize) -> Result<Vec<Hand>, DealError> {
        if num_players == 0 {
            return Err(DealError::NoPlayers);
        }
        if self.cards.len() % num_players != 0 {
            return Err(DealError::UnevenSplit {
                cards: self.cards.len(),
                players: num_players,
            });
        }

        let per_player = self.cards.len() / num_players;
        let mut piles: Vec<Vec<Card>> = (0..num_players)
            .map(|_| Vec::with_capacity(per_player))
            .collect();
        for (index, card) in self.cards.into_iter().enumerate() {
            piles[index % num_players].push(card);
        }
        Ok(piles.into_iter().map(Hand::with_cards).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{DealError, Deck};
    use crate::model::card::Card;
    use crate::model::hand::sort_order;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_52_unique_cards() {
        let deck = Deck::standard();
        assert_eq!(deck.cards().len(), 52);
        let unique: HashSet<Card> = deck.cards().iter().copied().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let deck_a = Deck::shuffled_with_seed(42);
        let deck_b = Deck::shuffled_with_seed(42);
        assert_eq!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let deck_a = Deck::shuffled_with_seed(1);
        let deck_b = Deck::shuffled_with_seed(2);
        assert_ne!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_keeps_every_card() {
        let deck = Deck::shuffled_with_seed(3);
        let shuffled: HashSet<Card> = deck.cards().iter().copied().collect();
        let standard: HashSet<Card> = Deck::standard().cards().iter().copied().collect();
        assert_eq!(shuffled, standard);
    }

    #[test]
    fn deal_partitions_deck_into_disjoint_sorted_hands() {
        for seed in 0..32 {
            let deck = Deck::shuffled_with_seed(seed);
            let original: HashSet<Card> = deck.cards().iter().copied().collect();
            let hands = deck.deal(4).unwrap();
            assert_eq!(hands.len(), 4);

            let mut union = HashSet::new();
            for hand in &hands {
                assert_eq!(hand.len(), 13);
                assert!(hand.cards().is_sorted_by(|a, b| sort_order(a, b).is_le()));
                for card in hand.iter() {
                    assert!(union.insert(*card), "seed {seed}: {card} dealt twice");
                }
            }
            assert_eq!(union, original);
        }
    }

    #[test]
    fn deal_is_round_robin() {
        let deck = Deck::standard();
        let order = deck.cards().to_vec();
        let hands = deck.deal(4).unwrap();
        assert!(hands[0].contains(order[0]));
        assert!(hands[1].contains(order[1]));
        assert!(hands[3].contains(order[7]));
        assert!(hands[0].contains(order[48]));
    }

    #[test]
    fn deal_rejects_bad_player_counts() {
        assert_eq!(Deck::standard().deal(0).unwrap_err(), DealError::NoPlayers);
        assert!(matches!(
            Deck::standard().deal(5),
            Err(DealError::UnevenSplit { cards: 52, players: 5 })
        ));
        assert_eq!(Deck::standard().deal(2).unwrap()[0].len(), 26);
    }

    #[test]
    fn from_cards_validates_contents() {
        let mut cards = Deck::standard().cards().to_vec();
        assert!(Deck::from_cards(cards.clone()).is_ok());
        cards[1] = cards[0];
        assert!(matches!(Deck::from_cards(cards), Err(DealError::DuplicateCard(_))));
        assert_eq!(
            Deck::from_cards(Vec::new()).unwrap_err(),
            DealError::WrongSize(0)
        );
    }
}
