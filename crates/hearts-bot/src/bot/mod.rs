mod pass;
mod play;

pub use pass::{PassPlanner, PassReason};
pub use play::{PlayPlanner, PlayReason};

use hearts_core::model::card::Card;
use hearts_core::model::hand::Hand;
use hearts_core::model::suit::Suit;

pub(crate) fn count_cards_in_suit(hand: &Hand, suit: Suit) -> usize {
    hand.iter().filter(|card| card.suit == suit).count()
}

pub(crate) fn card_sort_key(card: Card) -> (u8, u8) {
    (card.suit as u8, card.rank.value())
}
