use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use crate::model::turn_order::trick_order;
use std::fmt;

/// The cards on the table for one trick, one slot per seat.
///
/// Play order is fixed when the trick opens: the leader, then clockwise. A
/// trick never needs to be asked who already played, only who is next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trick {
    order: [Seat; 4],
    table: [Option<Card>; 4],
    played: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrickError {
    Full,
    OutOfTurn { expected: Seat, actual: Seat },
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::Full => f.write_str("all four cards are already on the table"),
            TrickError::OutOfTurn { expected, actual } => {
                write!(f, "it is {expected}'s turn, not {actual}'s")
            }
        }
    }
}

impl std::error::Error for TrickError {}

impl Trick {
    pub fn new(leader: Seat) -> Self {
        Self {
            order: trick_order(leader),
            table: [None; 4],
            played: 0,
        }
    }

    pub fn leader(&self) -> Seat {
        self.order[0]
    }

    pub fn len(&self) -> usize {
        self.played
    }

    pub fn is_empty(&self) -> bool {
        self.played == 0
    }

    pub fn is_complete(&self) -> bool {
        self.played == self.order.len()
    }

    /// `None` once all four cards are down.
    pub fn next_seat(&self) -> Option<Seat> {
        self.order.get(self.played).copied()
    }

    pub fn card_of(&self, seat: Seat) -> Option<Card> {
        self.table[seat.index()]
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.card_of(self.leader()).map(|card| card.suit)
    }

    /// The led suit when `hand` can still follow it.
    pub fn suit_to_follow(&self, hand: &Hand) -> Option<Suit> {
        self.lead_suit()
            .filter(|&lead| hand.iter().any(|card| card.suit == lead))
    }

    /// Cards in the order they were played.
    pub fn plays(&self) -> impl Iterator<Item = (Seat, Card)> + '_ {
        self.order[..self.played]
            .iter()
            .filter_map(|&seat| self.card_of(seat).map(|card| (seat, card)))
    }

    pub fn play(&mut self, seat: Seat, card: Card) -> Result<(), TrickError> {
        let expected = self.next_seat().ok_or(TrickError::Full)?;
        if expected != seat {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: seat,
            });
        }
        self.table[seat.index()] = Some(card);
        self.played += 1;
        Ok(())
    }

    /// Seat and card currently taking the trick: the highest card of the led suit.
    pub fn taking(&self) -> Option<(Seat, Card)> {
        let lead = self.lead_suit()?;
        self.plays()
            .filter(|(_, card)| card.suit == lead)
            .max_by_key(|(_, card)| card.rank)
    }

    /// Only decided once the trick is complete.
    pub fn winner(&self) -> Option<Seat> {
        if !self.is_complete() {
            return None;
        }
        self.taking().map(|(seat, _)| seat)
    }

    pub fn penalty_total(&self) -> u8 {
        self.table.iter().flatten().map(|card| card.penalty_value()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::{Trick, TrickError};
    use crate::model::card::Card;
    use crate::model::hand::Hand;
    use crate::model::player::Seat;
    use crate::model::suit::Suit;

    fn card(token: &str) -> Card {
        token.parse().unwrap()
    }

    fn trick_with(leader: Seat, tokens: &[&str]) -> Trick {
        let mut trick = Trick::new(leader);
        for token in tokens {
            let seat = trick.next_seat().unwrap();
            trick.play(seat, card(token)).unwrap();
        }
        trick
    }

    #[test]
    fn seats_play_clockwise_from_the_leader() {
        let mut trick = Trick::new(Seat::Three);
        assert_eq!(trick.next_seat(), Some(Seat::Three));
        assert_eq!(
            trick.play(Seat::One, card("2C")),
            Err(TrickError::OutOfTurn {
                expected: Seat::Three,
                actual: Seat::One
            })
        );
        trick.play(Seat::Three, card("9D")).unwrap();
        trick.play(Seat::Four, card("JD")).unwrap();
        assert_eq!(trick.next_seat(), Some(Seat::One));
        assert_eq!(trick.card_of(Seat::Four), Some(card("JD")));
        assert_eq!(trick.card_of(Seat::Two), None);
    }

    #[test]
    fn plays_come_back_in_table_order() {
        let trick = trick_with(Seat::Four, &["5S", "KS", "2H"]);
        let plays: Vec<_> = trick.plays().collect();
        assert_eq!(
            plays,
            vec![
                (Seat::Four, card("5S")),
                (Seat::One, card("KS")),
                (Seat::Two, card("2H")),
            ]
        );
        assert_eq!(trick.len(), 3);
    }

    #[test]
    fn off_suit_cards_never_take_the_trick() {
        let trick = trick_with(Seat::One, &["10C", "QC"]);
        assert_eq!(trick.taking(), Some((Seat::Two, card("QC"))));
        assert_eq!(trick.winner(), None);

        let trick = trick_with(Seat::One, &["10C", "QC", "4C", "AS"]);
        assert_eq!(trick.winner(), Some(Seat::Two));
        assert_eq!(trick.penalty_total(), 0);
    }

    #[test]
    fn fifth_card_is_refused() {
        let mut trick = trick_with(Seat::Two, &["3D", "4D", "5D", "6D"]);
        assert!(trick.is_complete());
        assert_eq!(trick.next_seat(), None);
        assert_eq!(trick.play(Seat::Two, card("7D")), Err(TrickError::Full));
    }

    #[test]
    fn penalties_count_hearts_and_the_queen() {
        let trick = trick_with(Seat::One, &["2C", "QS", "4H", "5C"]);
        assert_eq!(trick.penalty_total(), 14);
        assert_eq!(trick.winner(), Some(Seat::Four));
    }

    #[test]
    fn follow_suit_only_applies_while_the_hand_holds_it() {
        let trick = trick_with(Seat::One, &["8S"]);
        let with_spade = Hand::with_cards(vec![card("2S"), card("AH")]);
        let void = Hand::with_cards(vec![card("3D"), card("AH")]);
        assert_eq!(trick.suit_to_follow(&with_spade), Some(Suit::Spades));
        assert_eq!(trick.suit_to_follow(&void), None);
        assert_eq!(Trick::new(Seat::One).suit_to_follow(&with_spade), None);
    }
}
