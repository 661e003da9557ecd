use crate::model::card::Card;
use crate::model::hand::Hand;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Seats are numbered 1–4; passing left moves cards from seat n to seat n+1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Seat {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
}

impl Seat {
    pub const LOOP: [Seat; 4] = [Seat::One, Seat::Two, Seat::Three, Seat::Four];

    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Seat::One),
            2 => Some(Seat::Two),
            3 => Some(Seat::Three),
            4 => Some(Seat::Four),
            _ => None,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::One),
            1 => Some(Seat::Two),
            2 => Some(Seat::Three),
            3 => Some(Seat::Four),
            _ => None,
        }
    }

    pub const fn number(self) -> u8 {
        self as u8
    }

    pub const fn index(self) -> usize {
        self as usize - 1
    }

    pub const fn next(self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::Three,
            Seat::Three => Seat::Four,
            Seat::Four => Seat::One,
        }
    }

    pub const fn previous(self) -> Seat {
        match self {
            Seat::One => Seat::Four,
            Seat::Two => Seat::One,
            Seat::Three => Seat::Two,
            Seat::Four => Seat::Three,
        }
    }

    pub const fn opposite(self) -> Seat {
        match self {
            Seat::One => Seat::Three,
            Seat::Two => Seat::Four,
            Seat::Three => Seat::One,
            Seat::Four => Seat::Two,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSeat(pub u8);

impl fmt::Display for InvalidSeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat must be between 1 and 4, got {}", self.0)
    }
}

impl std::error::Error for InvalidSeat {}

impl TryFrom<u8> for Seat {
    type Error = InvalidSeat;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Seat::from_number(value).ok_or(InvalidSeat(value))
    }
}

impl From<Seat> for u8 {
    fn from(seat: Seat) -> Self {
        seat.number()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Automated,
}

#[derive(Debug, Clone)]
pub struct Player {
    seat: Seat,
    kind: PlayerKind,
    hand: Hand,
    score: u32,
    loser: bool,
}

impl Player {
    pub fn new(seat: Seat, kind: PlayerKind) -> Self {
        Self {
            seat,
            kind,
            hand: Hand::new(),
            score: 0,
            loser: false,
        }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn is_human(&self) -> bool {
        matches!(self.kind, PlayerKind::Human)
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub(crate) fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    pub fn set_hand(&mut self, hand: Hand) {
        self.hand = hand;
    }

    pub fn holds(&self, card: Card) -> bool {
        self.hand.contains(card)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn set_score(&mut self, points: u32) {
        self.score = points;
    }

    pub fn is_loser(&self) -> bool {
        self.loser
    }

    /// Flags the player once their score reaches `threshold`. The flag never clears.
    pub fn check_loss(&mut self, threshold: u32) -> bool {
        if self.score >= threshold {
            self.loser = true;
        }
        self.loser
    }
}

#[cfg(test)]
mod tests {
    use super::{Player, PlayerKind, Seat};

    #[test]
    fn next_wraps_around() {
        assert_eq!(Seat::Four.next(), Seat::One);
    }

    #[test]
    fn previous_wraps_around() {
        assert_eq!(Seat::One.previous(), Seat::Four);
    }

    #[test]
    fn opposite_is_expected() {
        assert_eq!(Seat::One.opposite(), Seat::Three);
        assert_eq!(Seat::Two.opposite(), Seat::Four);
    }

    #[test]
    fn index_roundtrip() {
        for (i, seat) in Seat::LOOP.iter().enumerate() {
            assert_eq!(Seat::from_index(i), Some(*seat));
            assert_eq!(seat.index(), i);
            assert_eq!(seat.number() as usize, i + 1);
        }
        assert_eq!(Seat::from_number(0), None);
        assert_eq!(Seat::from_number(5), None);
    }

    #[test]
    fn seats_deserialize_from_numbers() {
        let seat: Seat = serde_json::from_str("3").unwrap();
        assert_eq!(seat, Seat::Three);
        assert!(serde_json::from_str::<Seat>("7").is_err());
        assert_eq!(serde_json::to_string(&Seat::Two).unwrap(), "2");
    }

    #[test]
    fn loser_flag_sticks_once_threshold_reached() {
        let mut player = Player::new(Seat::Two, PlayerKind::Automated);
        player.add_score(99);
        assert!(!player.check_loss(100));
        player.add_score(1);
        assert!(player.check_loss(100));
        player.set_score(0);
        assert!(player.check_loss(100));
        assert!(player.is_loser());
    }
}
