use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::passing::PassPick;
use crate::model::player::Seat;
use crate::model::round::RoundState;

/// Snapshot handed to an automated player when it has to decide something.
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext<'a> {
    pub seat: Seat,
    pub hand: &'a Hand,
    pub round: &'a RoundState,
    pub scores: [u32; 4],
    /// Playable cards; empty while passing.
    pub legal: &'a [Card],
}

/// Decision maker for an automated seat.
pub trait Policy {
    /// Three cards to pass, or `None` when the hand is too small to pass from.
    fn choose_pass(&mut self, ctx: &PolicyContext<'_>) -> Option<PassPick>;

    /// Must return one of `ctx.legal`.
    fn choose_play(&mut self, ctx: &PolicyContext<'_>) -> Card;
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn choose_pass(&mut self, ctx: &PolicyContext<'_>) -> Option<PassPick> {
        (**self).choose_pass(ctx)
    }

    fn choose_play(&mut self, ctx: &PolicyContext<'_>) -> Card {
        (**self).choose_play(ctx)
    }
}
