//! Boundary between the game loop and whatever shows cards to the human player.

use crate::model::card::Card;
use crate::model::passing::PassingDirection;
use crate::model::player::Seat;
use crate::model::round::PlayError;
use crate::model::score::RoundScore;
use std::collections::VecDeque;

/// Input coming back from the display: a card was clicked, or the confirm control was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    Toggle(Card),
    Confirm,
    /// No further input will arrive (closed stdin, exhausted script).
    Closed,
}

/// Presentation collaborator driven by [`GameDriver`](crate::game::GameDriver).
///
/// The adapter only reads snapshots and reports events; game state stays with
/// [`Game`](crate::game::Game). `next_event` blocks until the human acts and
/// returns [`SelectionEvent::Closed`] once no more input can arrive.
pub trait DisplayAdapter {
    /// Shows the human's current hand in canonical order.
    fn render_hand(&mut self, cards: &[Card]);

    fn set_confirm_visible(&mut self, visible: bool);

    fn next_event(&mut self) -> SelectionEvent;

    /// Cards currently set aside for passing.
    fn show_picks(&mut self, _picks: &[Card]) {}

    fn show_round_start(&mut self, _round: u32, _direction: PassingDirection) {}

    fn show_play(&mut self, _seat: Seat, _card: Card) {}

    fn show_trick_result(&mut self, _winner: Seat, _penalties: u8) {}

    fn show_scores(&mut self, _round: &RoundScore, _totals: &[u32; 4]) {}

    fn show_illegal_play(&mut self, _card: Card, _reason: &PlayError) {}
}

impl<A: DisplayAdapter + ?Sized> DisplayAdapter for &mut A {
    fn render_hand(&mut self, cards: &[Card]) {
        (**self).render_hand(cards)
    }

    fn set_confirm_visible(&mut self, visible: bool) {
        (**self).set_confirm_visible(visible)
    }

    fn next_event(&mut self) -> SelectionEvent {
        (**self).next_event()
    }

    fn show_picks(&mut self, picks: &[Card]) {
        (**self).show_picks(picks)
    }

    fn show_round_start(&mut self, round: u32, direction: PassingDirection) {
        (**self).show_round_start(round, direction)
    }

    fn show_play(&mut self, seat: Seat, card: Card) {
        (**self).show_play(seat, card)
    }

    fn show_trick_result(&mut self, winner: Seat, penalties: u8) {
        (**self).show_trick_result(winner, penalties)
    }

    fn show_scores(&mut self, round: &RoundScore, totals: &[u32; 4]) {
        (**self).show_scores(round, totals)
    }

    fn show_illegal_play(&mut self, card: Card, reason: &PlayError) {
        (**self).show_illegal_play(card, reason)
    }
}

/// Queue-backed adapter for headless runs. Replays queued events and records what it was shown.
#[derive(Debug, Default, Clone)]
pub struct ScriptedDisplay {
    events: VecDeque<SelectionEvent>,
    renders: Vec<Vec<Card>>,
    confirm_visible: bool,
    confirm_toggles: Vec<bool>,
    plays: Vec<(Seat, Card)>,
    tricks: Vec<(Seat, u8)>,
    scores: Vec<[u32; 4]>,
    illegal: Vec<Card>,
}

impl ScriptedDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = SelectionEvent>,
    {
        Self {
            events: events.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, event: SelectionEvent) {
        self.events.push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.events.len()
    }

    pub fn renders(&self) -> &[Vec<Card>] {
        &self.renders
    }

    pub fn confirm_visible(&self) -> bool {
        self.confirm_visible
    }

    /// Every value passed to `set_confirm_visible`, in order.
    pub fn confirm_history(&self) -> &[bool] {
        &self.confirm_toggles
    }

    pub fn plays(&self) -> &[(Seat, Card)] {
        &self.plays
    }

    pub fn tricks(&self) -> &[(Seat, u8)] {
        &self.tricks
    }

    /// Running totals reported after each round.
    pub fn scores(&self) -> &[[u32; 4]] {
        &self.scores
    }

    pub fn illegal_plays(&self) -> &[Card] {
        &self.illegal
    }
}

impl DisplayAdapter for ScriptedDisplay {
    fn render_hand(&mut self, cards: &[Card]) {
        self.renders.push(cards.to_vec());
    }

    fn set_confirm_visible(&mut self, visible: bool) {
        self.confirm_visible = visible;
        self.confirm_toggles.push(visible);
    }

    fn next_event(&mut self) -> SelectionEvent {
        self.events.pop_front().unwrap_or(SelectionEvent::Closed)
    }

    fn show_play(&mut self, seat: Seat, card: Card) {
        self.plays.push((seat, card));
    }

    fn show_trick_result(&mut self, winner: Seat, penalties: u8) {
        self.tricks.push((winner, penalties));
    }

    fn show_scores(&mut self, _round: &RoundScore, totals: &[u32; 4]) {
        self.scores.push(*totals);
    }

    fn show_illegal_play(&mut self, card: Card, _reason: &PlayError) {
        self.illegal.push(card);
    }
}
