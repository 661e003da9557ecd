//! Line-oriented display adapter: prints the table to a writer and reads card
//! tokens (`QS`, `10h`) and `ok` from a reader.

use hearts_core::game::{DisplayAdapter, SelectionEvent};
use hearts_core::model::card::Card;
use hearts_core::model::passing::PassingDirection;
use hearts_core::model::player::Seat;
use hearts_core::model::round::PlayError;
use hearts_core::model::score::RoundScore;
use std::collections::VecDeque;
use std::fmt;
use std::io::{BufRead, Write};
use tracing::warn;

const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

pub struct TerminalAdapter<R, W> {
    input: R,
    output: W,
    color: bool,
    pending: VecDeque<SelectionEvent>,
    hand: Vec<Card>,
    picks: Vec<Card>,
}

impl<R: BufRead, W: Write> TerminalAdapter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            color: false,
            pending: VecDeque::new(),
            hand: Vec::new(),
            picks: Vec::new(),
        }
    }

    /// Marks diamonds and hearts with ANSI red.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn card_label(&self, card: Card) -> String {
        if self.color && card.suit.is_red() {
            format!("{RED}{card}{RESET}")
        } else {
            card.to_string()
        }
    }

    fn cards_label(&self, cards: &[Card]) -> String {
        if cards.is_empty() {
            return "(none)".to_string();
        }
        cards
            .iter()
            .map(|&card| self.card_label(card))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn say(&mut self, line: fmt::Arguments<'_>) {
        if let Err(err) = writeln!(self.output, "{line}") {
            warn!(%err, "terminal write failed");
        }
    }

    fn prompt(&mut self) {
        let result = write!(self.output, "> ").and_then(|_| self.output.flush());
        if let Err(err) = result {
            warn!(%err, "terminal write failed");
        }
    }

    /// Cards the core may receive back: the rendered hand plus the current picks.
    fn is_offered(&self, card: Card) -> bool {
        self.hand.contains(&card) || self.picks.contains(&card)
    }

    /// Reads lines until one yields at least one event. Unknown tokens are reported and skipped.
    fn read_events(&mut self) -> bool {
        loop {
            self.prompt();
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => return false,
                Ok(_) => {}
                Err(err) => {
                    warn!(%err, "reading input failed");
                    return false;
                }
            }

            for token in line.split_whitespace() {
                match parse_token(token) {
                    Some(event) => self.pending.push_back(event),
                    None => self.say(format_args!(
                        "'{token}' is not a card; use tokens like QS or 10H, or 'ok'"
                    )),
                }
            }
            if !self.pending.is_empty() {
                return true;
            }
        }
    }
}

fn parse_token(token: &str) -> Option<SelectionEvent> {
    match token.to_ascii_lowercase().as_str() {
        "ok" => Some(SelectionEvent::Confirm),
        "quit" | "q" => Some(SelectionEvent::Closed),
        _ => token.parse::<Card>().ok().map(SelectionEvent::Toggle),
    }
}

impl<R: BufRead, W: Write> DisplayAdapter for TerminalAdapter<R, W> {
    fn render_hand(&mut self, cards: &[Card]) {
        self.hand = cards.to_vec();
        self.picks.clear();
        let label = self.cards_label(cards);
        self.say(format_args!("Your hand: {label}"));
    }

    fn set_confirm_visible(&mut self, visible: bool) {
        if visible {
            self.say(format_args!("Type 'ok' to pass these cards."));
        }
    }

    /// Queued cards are checked against the hand when they are handed out, since
    /// the hand may have changed since the line was typed.
    fn next_event(&mut self) -> SelectionEvent {
        loop {
            if self.pending.is_empty() && !self.read_events() {
                return SelectionEvent::Closed;
            }
            match self.pending.pop_front() {
                Some(SelectionEvent::Toggle(card)) if !self.is_offered(card) => {
                    let label = self.card_label(card);
                    self.say(format_args!("You do not hold {label}"));
                }
                Some(event) => return event,
                None => return SelectionEvent::Closed,
            }
        }
    }

    fn show_picks(&mut self, picks: &[Card]) {
        self.picks = picks.to_vec();
        let label = self.cards_label(picks);
        self.say(format_args!("Passing: {label}"));
    }

    fn show_round_start(&mut self, round: u32, direction: PassingDirection) {
        match direction {
            PassingDirection::Hold => {
                self.say(format_args!("== Round {round}: no passing =="));
            }
            _ => self.say(format_args!("== Round {round}: pass {direction} ==")),
        }
    }

    fn show_play(&mut self, seat: Seat, card: Card) {
        let label = self.card_label(card);
        self.say(format_args!("{seat} plays {label}"));
    }

    fn show_trick_result(&mut self, winner: Seat, penalties: u8) {
        self.say(format_args!("{winner} takes the trick ({penalties} points)"));
    }

    fn show_scores(&mut self, round: &RoundScore, totals: &[u32; 4]) {
        if let Some(shooter) = round.moon_shooter {
            self.say(format_args!("{shooter} shot the moon!"));
        }
        let line = Seat::LOOP
            .iter()
            .map(|seat| {
                format!(
                    "P{} +{} = {}",
                    seat.number(),
                    round.points_for(*seat),
                    totals[seat.index()]
                )
            })
            .collect::<Vec<_>>()
            .join(" | ");
        self.say(format_args!("Scores: {line}"));
    }

    fn show_illegal_play(&mut self, card: Card, reason: &PlayError) {
        let label = self.card_label(card);
        self.say(format_args!("Cannot play {label}: {reason}"));
    }
}
