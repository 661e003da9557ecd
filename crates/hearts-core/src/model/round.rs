use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::passing::{PassingDirection, PassingError, PassingState};
use crate::model::player::{Player, Seat};
use crate::model::suit::Suit;
use crate::model::trick::{Trick, TrickError};
use crate::model::turn_order::two_of_clubs_holder;
use std::fmt;
use std::vec::Vec;

pub const TRICKS_PER_ROUND: usize = 13;

/// Trick-taking state of one round. Hands live on the players and are passed in.
#[derive(Debug, Clone)]
pub struct RoundState {
    number: u32,
    current_trick: Trick,
    trick_history: Vec<Trick>,
    starting_player: Seat,
    passing_direction: PassingDirection,
    phase: RoundPhase,
    hearts_broken: bool,
}

#[derive(Debug, Clone)]
pub enum RoundPhase {
    Passing(PassingState),
    Playing,
    Complete,
}

impl RoundState {
    /// Starts round `number` over freshly dealt hands.
    pub fn begin(number: u32, players: &[Player; 4]) -> Self {
        let passing_direction = PassingDirection::for_round(number);
        let starting_player = two_of_clubs_holder(players).unwrap_or(Seat::One);

        let phase = if passing_direction.requires_selection() {
            RoundPhase::Passing(PassingState::new(passing_direction))
        } else {
            RoundPhase::Playing
        };

        Self {
            number,
            current_trick: Trick::new(starting_player),
            trick_history: Vec::new(),
            starting_player,
            passing_direction,
            phase,
            hearts_broken: false,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn passing_direction(&self) -> PassingDirection {
        self.passing_direction
    }

    pub fn phase(&self) -> &RoundPhase {
        &self.phase
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, RoundPhase::Complete)
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn trick_history(&self) -> &[Trick] {
        &self.trick_history
    }

    pub fn starting_player(&self) -> Seat {
        self.starting_player
    }

    pub fn tricks_completed(&self) -> usize {
        self.trick_history.len()
    }

    pub fn hearts_broken(&self) -> bool {
        self.hearts_broken
    }

    pub fn is_first_trick(&self) -> bool {
        self.trick_history.is_empty()
    }

    pub fn expected_to_play(&self) -> Seat {
        // A finished trick is replaced by the winner's lead straight away.
        self.current_trick
            .next_seat()
            .unwrap_or_else(|| self.current_trick.leader())
    }

    pub fn has_passed(&self, seat: Seat) -> bool {
        match &self.phase {
            RoundPhase::Passing(state) => state.has_submitted(seat),
            RoundPhase::Playing | RoundPhase::Complete => false,
        }
    }

    pub fn submit_pass(
        &mut self,
        players: &mut [Player; 4],
        seat: Seat,
        cards: [Card; 3],
    ) -> Result<(), PassingError> {
        match &mut self.phase {
            RoundPhase::Passing(state) => {
                state.submit(seat, cards, players[seat.index()].hand_mut())
            }
            RoundPhase::Playing | RoundPhase::Complete => Err(PassingError::NotInPassingPhase),
        }
    }

    pub fn resolve_passes(&mut self, players: &mut [Player; 4]) -> Result<(), PassingError> {
        let state = match &self.phase {
            RoundPhase::Passing(state) => state.clone(),
            RoundPhase::Playing | RoundPhase::Complete => {
                return Err(PassingError::NotInPassingPhase);
            }
        };

        if !state.is_complete() {
            return Err(PassingError::Incomplete);
        }

        state.apply(players)?;
        // The two of clubs may have changed hands; the first lead follows it.
        if let Some(new_leader) = two_of_clubs_holder(players) {
            self.starting_player = new_leader;
            self.current_trick = Trick::new(new_leader);
        }
        self.phase = RoundPhase::Playing;
        Ok(())
    }

    pub fn penalty_totals(&self) -> [u8; 4] {
        let mut totals = [0u8; 4];
        for trick in &self.trick_history {
            if let Some(winner) = trick.winner() {
                let idx = winner.index();
                totals[idx] = totals[idx].saturating_add(trick.penalty_total());
            }
        }
        totals
    }

    fn legal_to_lead_hearts(&self, hand: &Hand) -> bool {
        self.hearts_broken || hand.iter().all(|c| c.suit.is_heart())
    }

    /// Checks `card` against turn order and the standard Hearts play rules.
    pub fn check_play(&self, hand: &Hand, seat: Seat, card: Card) -> Result<(), PlayError> {
        if !matches!(self.phase, RoundPhase::Playing) {
            return Err(PlayError::NotInPlayPhase);
        }

        if !hand.contains(card) {
            return Err(PlayError::CardNotInHand(card));
        }

        let expected = self.expected_to_play();
        if expected != seat {
            return Err(PlayError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        match self.current_trick.lead_suit() {
            None => {
                if self.is_first_trick()
                    && hand.contains(Card::TWO_OF_CLUBS)
                    && !card.is_two_of_clubs()
                {
                    return Err(PlayError::MustLeadTwoOfClubs);
                }
                if card.suit == Suit::Hearts && !self.legal_to_lead_hearts(hand) {
                    return Err(PlayError::HeartsNotBroken);
                }
            }
            Some(lead) => {
                if card.suit != lead {
                    if let Some(suit) = self.current_trick.suit_to_follow(hand) {
                        return Err(PlayError::MustFollowSuit(suit));
                    }
                    let only_penalties = hand.iter().all(|c| c.is_penalty());
                    if self.is_first_trick() && card.is_penalty() && !only_penalties {
                        return Err(PlayError::NoPointsOnFirstTrick);
                    }
                }
            }
        }

        Ok(())
    }

    pub fn legal_moves(&self, hand: &Hand, seat: Seat) -> Vec<Card> {
        hand.iter()
            .copied()
            .filter(|&card| self.check_play(hand, seat, card).is_ok())
            .collect()
    }

    pub fn play_card(
        &mut self,
        players: &mut [Player; 4],
        seat: Seat,
        card: Card,
    ) -> Result<PlayOutcome, PlayError> {
        self.check_play(players[seat.index()].hand(), seat, card)?;

        self.current_trick
            .play(seat, card)
            .map_err(PlayError::Trick)?;
        players[seat.index()].hand_mut().remove(card);
        if card.suit == Suit::Hearts {
            self.hearts_broken = true;
        }

        if !self.current_trick.is_complete() {
            return Ok(PlayOutcome::Played);
        }

        let winner = self
            .current_trick
            .winner()
            .ok_or(PlayError::Trick(TrickError::Full))?;
        let penalties = self.current_trick.penalty_total();
        let finished = std::mem::replace(&mut self.current_trick, Trick::new(winner));
        self.trick_history.push(finished);

        if players.iter().all(|player| player.hand().is_empty()) {
            self.phase = RoundPhase::Complete;
        }
        Ok(PlayOutcome::TrickCompleted { winner, penalties })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played,
    TrickCompleted { winner: Seat, penalties: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    NotInPlayPhase,
    CardNotInHand(Card),
    OutOfTurn { expected: Seat, actual: Seat },
    MustLeadTwoOfClubs,
    MustFollowSuit(Suit),
    HeartsNotBroken,
    NoPointsOnFirstTrick,
    Trick(TrickError),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::NotInPlayPhase => write!(f, "round is not in the playing phase"),
            PlayError::CardNotInHand(card) => write!(f, "{card} is not in hand"),
            PlayError::OutOfTurn { expected, actual } => {
                write!(f, "it is {expected}'s turn, not {actual}'s")
            }
            PlayError::MustLeadTwoOfClubs => write!(f, "the first trick must be led with 2C"),
            PlayError::MustFollowSuit(suit) => write!(f, "must follow suit ({suit})"),
            PlayError::HeartsNotBroken => write!(f, "hearts have not been broken yet"),
            PlayError::NoPointsOnFirstTrick => {
                write!(f, "penalty cards cannot be played on the first trick")
            }
            PlayError::Trick(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PlayError {}
