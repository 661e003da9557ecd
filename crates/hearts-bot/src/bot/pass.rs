use hearts_core::model::card::Card;
use hearts_core::model::hand::Hand;
use hearts_core::model::passing::PassPick;
use hearts_core::model::suit::Suit;
use tracing::{Level, event};

/// Why a card was chosen for the pass, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassReason {
    QueenOfSpades,
    /// Jack or better in spades or hearts.
    HighDangerous,
    /// Jack or better in any suit.
    High,
    /// Seven through ten.
    Middling,
    FirstCard,
}

impl PassReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            PassReason::QueenOfSpades => "queen_of_spades",
            PassReason::HighDangerous => "high_dangerous",
            PassReason::High => "high",
            PassReason::Middling => "middling",
            PassReason::FirstCard => "first_card",
        }
    }
}

pub struct PassPlanner;

impl PassPlanner {
    /// Removes three cards one at a time, re-checking the tiers against what is left
    /// after each removal. `None` for hands smaller than three.
    pub fn choose(hand: &Hand) -> Option<PassPick> {
        if hand.len() < 3 {
            return None;
        }

        let mut remainder = hand.clone();
        let mut picks = Vec::with_capacity(3);
        let mut reasons = Vec::with_capacity(3);
        while picks.len() < 3 {
            let (index, reason) = Self::next_pick(&remainder)?;
            let card = remainder.take_at(index)?;
            picks.push(card);
            reasons.push(reason);
        }

        let picks: [Card; 3] = picks.try_into().ok()?;
        log_pass_decision(&picks, &reasons, remainder.len());
        Some(PassPick { picks, remainder })
    }

    /// Index (in hand order) of the card to pass next and the tier that matched.
    pub fn next_pick(hand: &Hand) -> Option<(usize, PassReason)> {
        let cards = hand.cards();
        if cards.is_empty() {
            return None;
        }

        let tiers: [(PassReason, fn(&Card) -> bool); 4] = [
            (PassReason::QueenOfSpades, |card: &Card| card.is_queen_of_spades()),
            (PassReason::HighDangerous, |card: &Card| {
                card.rank.value() > 10 && card.suit > Suit::Diamonds
            }),
            (PassReason::High, |card: &Card| card.rank.value() > 10),
            (PassReason::Middling, |card: &Card| card.rank.value() > 6),
        ];

        let pick = tiers
            .iter()
            .find_map(|(reason, matches)| cards.iter().position(matches).map(|idx| (idx, *reason)))
            .unwrap_or((0, PassReason::FirstCard));
        Some(pick)
    }
}

fn log_pass_decision(picks: &[Card; 3], reasons: &[PassReason], remaining: usize) {
    if !tracing::enabled!(target: "hearts_bot::pass_decision", Level::DEBUG) {
        return;
    }

    let cards = picks
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(",");
    let reasons = reasons
        .iter()
        .map(|reason| reason.as_str())
        .collect::<Vec<_>>()
        .join(",");

    event!(
        target: "hearts_bot::pass_decision",
        Level::DEBUG,
        cards = %cards,
        reasons = %reasons,
        remaining,
    );
}

#[cfg(test)]
mod tests {
    use super::{PassPlanner, PassReason};
    use hearts_core::model::card::Card;
    use hearts_core::model::deck::Deck;
    use hearts_core::model::hand::Hand;

    fn hand(tokens: &[&str]) -> Hand {
        Hand::with_cards(tokens.iter().map(|t| t.parse::<Card>().unwrap()).collect())
    }

    fn picks(tokens: &[&str]) -> [Card; 3] {
        let cards: Vec<Card> = tokens.iter().map(|t| t.parse().unwrap()).collect();
        cards.try_into().unwrap()
    }

    #[test]
    fn queen_of_spades_goes_first() {
        let h = hand(&["2C", "AD", "QS", "KH", "3H"]);
        assert_eq!(
            PassPlanner::next_pick(&h),
            Some((2, PassReason::QueenOfSpades))
        );
    }

    #[test]
    fn dangerous_high_cards_beat_other_high_cards() {
        let h = hand(&["AC", "KD", "4S", "JH", "QH", "2H"]);
        let pick = PassPlanner::choose(&h).unwrap();
        // JH and QH are the only dangerous honours; AC is the first plain one.
        assert_eq!(pick.picks, picks(&["JH", "QH", "AC"]));
        assert_eq!(pick.remainder, hand(&["KD", "4S", "2H"]));
    }

    #[test]
    fn falls_back_to_middling_then_first_card() {
        let h = hand(&["2C", "3C", "8D", "4S", "5H"]);
        let pick = PassPlanner::choose(&h).unwrap();
        assert_eq!(pick.picks, picks(&["8D", "2C", "3C"]));
        assert_eq!(pick.remainder, hand(&["4S", "5H"]));
    }

    #[test]
    fn spades_queen_then_top_spades() {
        let h = hand(&[
            "2C", "5C", "9C", "3D", "6D", "2S", "5S", "QS", "KS", "AS", "2H", "4H", "6H",
        ]);
        let pick = PassPlanner::choose(&h).unwrap();
        assert_eq!(pick.picks, picks(&["QS", "KS", "AS"]));
    }

    #[test]
    fn small_hands_do_not_pass() {
        assert!(PassPlanner::choose(&hand(&["2C", "QS"])).is_none());
        assert!(PassPlanner::next_pick(&Hand::new()).is_none());
    }

    #[test]
    fn picks_always_come_from_the_hand() {
        for seed in 0..32 {
            let hands = Deck::shuffled_with_seed(seed).deal(4).unwrap();
            for h in hands {
                let pick = PassPlanner::choose(&h).unwrap();
                assert_eq!(pick.remainder.len(), 10);
                for (i, card) in pick.picks.iter().enumerate() {
                    assert!(h.contains(*card), "seed {seed}: {card} not in hand");
                    assert!(!pick.remainder.contains(*card));
                    assert!(!pick.picks[..i].contains(card));
                }
            }
        }
    }
}
