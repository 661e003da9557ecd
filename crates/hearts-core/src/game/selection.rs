use crate::game::adapter::{DisplayAdapter, SelectionEvent};
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::passing::PassPick;
use tracing::debug;

pub const PASS_SIZE: usize = 3;

/// Toggle state for a human choosing three cards to pass.
///
/// Cards move between the remaining hand and the pick set; confirming is only
/// possible with exactly [`PASS_SIZE`] picks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumanPassSelection {
    remaining: Hand,
    picks: Vec<Card>,
}

impl HumanPassSelection {
    pub fn new(hand: &Hand) -> Self {
        Self {
            remaining: hand.clone(),
            picks: Vec::with_capacity(PASS_SIZE),
        }
    }

    /// Moves `card` to whichever side it is not on.
    ///
    /// Panics if the card is in neither the hand nor the pick set; the display
    /// only offers cards it was given.
    pub fn toggle(&mut self, card: Card) {
        if let Some(pos) = self.picks.iter().position(|&c| c == card) {
            self.picks.remove(pos);
            self.remaining.add(card);
        } else {
            assert!(
                self.remaining.remove(card),
                "display reported {card}, which is neither in hand nor picked"
            );
            self.picks.push(card);
        }
    }

    pub fn picks(&self) -> &[Card] {
        &self.picks
    }

    pub fn remaining(&self) -> &Hand {
        &self.remaining
    }

    pub fn is_ready(&self) -> bool {
        self.picks.len() == PASS_SIZE
    }

    /// `None` unless exactly three cards are picked.
    pub fn confirm(&self) -> Option<PassPick> {
        let picks: [Card; PASS_SIZE] = self.picks.as_slice().try_into().ok()?;
        Some(PassPick {
            picks,
            remainder: self.remaining.clone(),
        })
    }
}

/// Runs the toggle loop against `display` until the human confirms three cards.
/// `None` if the display closes first.
pub fn select_pass_cards<D: DisplayAdapter + ?Sized>(
    display: &mut D,
    hand: &Hand,
) -> Option<PassPick> {
    let mut selection = HumanPassSelection::new(hand);
    display.render_hand(selection.remaining().cards());
    display.show_picks(selection.picks());
    display.set_confirm_visible(false);

    loop {
        match display.next_event() {
            SelectionEvent::Toggle(card) => {
                let was_ready = selection.is_ready();
                selection.toggle(card);
                display.render_hand(selection.remaining().cards());
                display.show_picks(selection.picks());
                if selection.is_ready() != was_ready {
                    display.set_confirm_visible(selection.is_ready());
                }
            }
            SelectionEvent::Confirm => match selection.confirm() {
                Some(pick) => {
                    display.set_confirm_visible(false);
                    return Some(pick);
                }
                None => {
                    debug!(picked = selection.picks().len(), "confirm ignored");
                }
            },
            SelectionEvent::Closed => return None,
        }
    }
}
