use super::{card_sort_key, count_cards_in_suit};
use hearts_core::model::card::Card;
use hearts_core::model::hand::Hand;
use hearts_core::model::round::RoundState;
use hearts_core::model::suit::Suit;
use std::cmp::Reverse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayReason {
    Forced,
    /// Lowest safe lead, preferring short suits.
    LeadLow,
    /// Highest card that still loses to the current winner.
    Duck,
    /// Last to play on a clean trick; shed the highest card of the suit.
    TakeClean,
    /// Cannot duck; play as low as possible.
    FollowLow,
    DumpQueen,
    DumpHeart,
    DumpHigh,
}

impl PlayReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            PlayReason::Forced => "forced",
            PlayReason::LeadLow => "lead_low",
            PlayReason::Duck => "duck",
            PlayReason::TakeClean => "take_clean",
            PlayReason::FollowLow => "follow_low",
            PlayReason::DumpQueen => "dump_queen",
            PlayReason::DumpHeart => "dump_heart",
            PlayReason::DumpHigh => "dump_high",
        }
    }
}

pub struct PlayPlanner;

impl PlayPlanner {
    /// Picks one of `legal` for the player holding `hand`. `None` only when `legal` is empty.
    pub fn choose(legal: &[Card], hand: &Hand, round: &RoundState) -> Option<(Card, PlayReason)> {
        match legal {
            [] => return None,
            [only] => return Some((*only, PlayReason::Forced)),
            _ => {}
        }

        let trick = round.current_trick();
        let Some(lead) = trick.lead_suit() else {
            return Some(choose_lead(legal, hand));
        };

        let following: Vec<Card> = legal.iter().copied().filter(|c| c.suit == lead).collect();
        if following.is_empty() {
            return Some(choose_discard(legal));
        }

        let winning_rank = trick
            .taking()
            .map(|(_, card)| card.rank)
            .unwrap_or(following[0].rank);

        let duck = following
            .iter()
            .copied()
            .filter(|c| c.rank < winning_rank)
            .max_by_key(|c| c.rank);
        if let Some(card) = duck {
            return Some((card, PlayReason::Duck));
        }

        let last_to_play = trick.len() == 3;
        if last_to_play && trick.penalty_total() == 0 {
            let top = following
                .iter()
                .copied()
                .filter(|c| !c.is_queen_of_spades())
                .max_by_key(|c| c.rank);
            if let Some(card) = top {
                return Some((card, PlayReason::TakeClean));
            }
        }

        following
            .iter()
            .copied()
            .min_by_key(|c| c.rank)
            .map(|card| (card, PlayReason::FollowLow))
    }
}

fn choose_lead(legal: &[Card], hand: &Hand) -> (Card, PlayReason) {
    if legal.contains(&Card::TWO_OF_CLUBS) {
        return (Card::TWO_OF_CLUBS, PlayReason::Forced);
    }

    let safe: Vec<Card> = legal
        .iter()
        .copied()
        .filter(|c| !c.is_queen_of_spades() && !c.suit.is_heart())
        .collect();
    let pool: &[Card] = if safe.is_empty() { legal } else { &safe };

    // Low rank first, then the shorter suit so it empties sooner.
    let card = pool
        .iter()
        .copied()
        .min_by_key(|&c| (c.rank, count_cards_in_suit(hand, c.suit), card_sort_key(c)))
        .unwrap_or(legal[0]);
    (card, PlayReason::LeadLow)
}

fn choose_discard(legal: &[Card]) -> (Card, PlayReason) {
    if legal.contains(&Card::QUEEN_OF_SPADES) {
        return (Card::QUEEN_OF_SPADES, PlayReason::DumpQueen);
    }

    let top_heart = legal
        .iter()
        .copied()
        .filter(|c| c.suit == Suit::Hearts)
        .max_by_key(|c| c.rank);
    if let Some(card) = top_heart {
        return (card, PlayReason::DumpHeart);
    }

    let card = legal
        .iter()
        .copied()
        .min_by_key(|&c| (Reverse(c.rank), card_sort_key(c)))
        .unwrap_or(legal[0]);
    (card, PlayReason::DumpHigh)
}
