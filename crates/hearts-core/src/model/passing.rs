use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::{Player, Seat};
use std::{array, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassingDirection {
    Left,
    Right,
    Across,
    Hold,
}

impl PassingDirection {
    /// Direction for a 1-based round number: left, right, across, then a hold round.
    pub const fn for_round(round: u32) -> PassingDirection {
        match round % 4 {
            1 => PassingDirection::Left,
            2 => PassingDirection::Right,
            3 => PassingDirection::Across,
            _ => PassingDirection::Hold,
        }
    }

    pub const fn requires_selection(self) -> bool {
        !matches!(self, PassingDirection::Hold)
    }

    pub const fn target(self, seat: Seat) -> Seat {
        match self {
            PassingDirection::Left => seat.next(),
            PassingDirection::Right => seat.previous(),
            PassingDirection::Across => seat.opposite(),
            PassingDirection::Hold => seat,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PassingDirection::Left => "Left",
            PassingDirection::Right => "Right",
            PassingDirection::Across => "Across",
            PassingDirection::Hold => "Hold",
        }
    }
}

impl fmt::Display for PassingDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a pass selection: the three cards leaving the hand and what stays behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassPick {
    pub picks: [Card; 3],
    pub remainder: Hand,
}

/// Returns `target` with `picks` merged in, in canonical order.
pub fn pass(picks: &[Card; 3], target: &Hand) -> Hand {
    let mut cards = target.cards().to_vec();
    cards.extend_from_slice(picks);
    Hand::with_cards(cards)
}

#[derive(Debug, Clone)]
pub struct PassingState {
    direction: PassingDirection,
    submissions: [Option<[Card; 3]>; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassingError {
    NotInPassingPhase,
    DirectionDoesNotPass,
    AlreadySubmitted(Seat),
    CardNotInHand(Card),
    DuplicateCard(Card),
    Incomplete,
}

impl fmt::Display for PassingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassingError::NotInPassingPhase => write!(f, "round is not in the passing phase"),
            PassingError::DirectionDoesNotPass => write!(f, "no cards are passed this round"),
            PassingError::AlreadySubmitted(seat) => write!(f, "{seat} already passed"),
            PassingError::CardNotInHand(card) => write!(f, "{card} is not in hand"),
            PassingError::DuplicateCard(card) => write!(f, "{card} picked more than once"),
            PassingError::Incomplete => write!(f, "not every player has passed yet"),
        }
    }
}

impl std::error::Error for PassingError {}

impl PassingState {
    pub fn new(direction: PassingDirection) -> Self {
        Self {
            direction,
            submissions: array::from_fn(|_| None),
        }
    }

    pub fn direction(&self) -> PassingDirection {
        self.direction
    }

    pub fn has_submitted(&self, seat: Seat) -> bool {
        self.submissions[seat.index()].is_some()
    }

    /// Takes the picks out of the passer's (pre-pass) hand and holds them until `apply`.
    pub fn submit(
        &mut self,
        seat: Seat,
        cards: [Card; 3],
        hand: &mut Hand,
    ) -> Result<(), PassingError> {
        if !self.direction.requires_selection() {
            return Err(PassingError::DirectionDoesNotPass);
        }

        if self.submissions[seat.index()].is_some() {
            return Err(PassingError::AlreadySubmitted(seat));
        }

        for (i, card) in cards.iter().enumerate() {
            if cards[..i].contains(card) {
                return Err(PassingError::DuplicateCard(*card));
            }
            if !hand.contains(*card) {
                return Err(PassingError::CardNotInHand(*card));
            }
        }

        for card in cards.iter() {
            if !hand.remove(*card) {
                return Err(PassingError::CardNotInHand(*card));
            }
        }

        self.submissions[seat.index()] = Some(cards);
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.submissions
            .iter()
            .all(|submission| submission.is_some())
    }

    /// Delivers every submission at once; no hand receives cards before all four are in.
    pub fn apply(self, players: &mut [Player; 4]) -> Result<(), PassingError> {
        if !self.direction.requires_selection() {
            return Err(PassingError::DirectionDoesNotPass);
        }

        if !self.is_complete() {
            return Err(PassingError::Incomplete);
        }

        for seat in Seat::LOOP.iter().copied() {
            if let Some(cards) = self.submissions[seat.index()] {
                let target = &mut players[self.direction.target(seat).index()];
                let received = pass(&cards, target.hand());
                target.set_hand(received);
            }
        }

        Ok(())
    }
}
