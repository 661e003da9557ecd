use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const TWO_OF_CLUBS: Card = Card::new(Rank::Two, Suit::Clubs);
    pub const QUEEN_OF_SPADES: Card = Card::new(Rank::Queen, Suit::Spades);

    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn is_penalty(self) -> bool {
        matches!(self.suit, Suit::Hearts) || self.is_queen_of_spades()
    }

    pub const fn is_queen_of_spades(self) -> bool {
        matches!(self.rank, Rank::Queen) && matches!(self.suit, Suit::Spades)
    }

    pub const fn is_two_of_clubs(self) -> bool {
        matches!(self.rank, Rank::Two) && matches!(self.suit, Suit::Clubs)
    }

    pub fn penalty_value(self) -> u8 {
        if self.is_queen_of_spades() {
            13
        } else if self.suit == Suit::Hearts {
            1
        } else {
            0
        }
    }
}

/// Canonical hand order: suit first, then rank ascending.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.suit
            .cmp(&other.suit)
            .then_with(|| self.rank.cmp(&other.rank))
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardParseError {
    Empty,
    UnknownSuit(String),
    UnknownRank(String),
}

impl fmt::Display for CardParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardParseError::Empty => write!(f, "card token is empty"),
            CardParseError::UnknownSuit(token) => write!(f, "unknown suit in card token '{token}'"),
            CardParseError::UnknownRank(token) => write!(f, "unknown rank in card token '{token}'"),
        }
    }
}

impl std::error::Error for CardParseError {}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let token = value.trim();
        if token.is_empty() {
            return Err(CardParseError::Empty);
        }
        // Suit tokens are a single ASCII letter; anything else cannot split cleanly.
        if !token.is_ascii() || token.len() < 2 {
            return Err(CardParseError::UnknownSuit(token.to_string()));
        }
        let (rank_part, suit_part) = token.split_at(token.len() - 1);
        let suit = Suit::from_token(suit_part)
            .ok_or_else(|| CardParseError::UnknownSuit(token.to_string()))?;
        let rank = Rank::from_token(rank_part)
            .ok_or_else(|| CardParseError::UnknownRank(token.to_string()))?;
        Ok(Card::new(rank, suit))
    }
}
