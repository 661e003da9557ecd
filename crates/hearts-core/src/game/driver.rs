use crate::game::adapter::{DisplayAdapter, SelectionEvent};
use crate::game::policy::{Policy, PolicyContext};
use crate::game::selection::select_pass_cards;
use crate::game::state::{Game, GameError, GamePhase, GameSummary};
use crate::model::card::Card;
use crate::model::passing::PassPick;
use crate::model::player::Seat;
use crate::model::round::PlayOutcome;
use std::array;
use tracing::{debug, info};

/// Runs a [`Game`] to completion, asking the display for the human's choices and a
/// [`Policy`] for every other seat.
pub struct GameDriver<D> {
    game: Game,
    display: D,
    policies: [Option<Box<dyn Policy>>; 4],
}

impl<D: DisplayAdapter> GameDriver<D> {
    pub fn new(game: Game, display: D) -> Self {
        Self {
            game,
            display,
            policies: array::from_fn(|_| None),
        }
    }

    /// Seats `policy` at `seat`. A policy on the human seat takes precedence over the display.
    pub fn with_policy<P: Policy + 'static>(mut self, seat: Seat, policy: P) -> Self {
        self.set_policy(seat, Box::new(policy));
        self
    }

    pub fn set_policy(&mut self, seat: Seat, policy: Box<dyn Policy>) {
        self.policies[seat.index()] = Some(policy);
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn into_parts(self) -> (Game, D) {
        (self.game, self.display)
    }

    pub fn run(&mut self) -> Result<GameSummary, GameError> {
        loop {
            if let Some(summary) = self.step()? {
                return Ok(summary);
            }
        }
    }

    /// Advances by one unit of work: a deal, a whole passing phase, one card, or one
    /// scoring. Returns the summary once the game is over.
    pub fn step(&mut self) -> Result<Option<GameSummary>, GameError> {
        if self.game.round().is_none() {
            self.check_seats()?;
            self.game.start()?;
            self.announce_round();
            return Ok(None);
        }

        match self.game.phase() {
            GamePhase::Dealing => {
                self.game.deal_round()?;
                self.announce_round();
            }
            GamePhase::Passing => self.run_passing()?,
            GamePhase::Playing => self.play_next()?,
            GamePhase::Scoring => {
                let score = self.game.finish_round()?;
                let totals = self.game.standings();
                self.display.show_scores(&score, &totals);
            }
            GamePhase::GameOver => {
                let summary = self.game.summary();
                info!(
                    rounds = summary.rounds_played,
                    winner = %summary.winner,
                    scores = ?summary.scores,
                    "game finished"
                );
                return Ok(Some(summary));
            }
        }
        Ok(None)
    }

    fn check_seats(&self) -> Result<(), GameError> {
        for player in self.game.players() {
            let seat = player.seat();
            if !player.is_human() && self.policies[seat.index()].is_none() {
                return Err(GameError::MissingPolicy(seat));
            }
        }
        Ok(())
    }

    fn announce_round(&mut self) {
        let round = self.game.round_number();
        if let Some(direction) = self.game.passing_direction() {
            self.display.show_round_start(round, direction);
        }
        if self.game.phase() == GamePhase::Playing {
            self.log_opening_order();
        }
        self.render_human_hand();
    }

    fn log_opening_order(&self) {
        if let Some(order) = self.game.opening_order() {
            debug!(
                round = self.game.round_number(),
                order = ?order.map(Seat::number),
                "opening trick order"
            );
        }
    }

    fn render_human_hand(&mut self) {
        if let Some(seat) = self.human_display_seat() {
            self.display.render_hand(self.game.hand(seat).cards());
        }
    }

    /// The human seat, unless a policy has been put in charge of it.
    fn human_display_seat(&self) -> Option<Seat> {
        self.game
            .human_seat()
            .filter(|seat| self.policies[seat.index()].is_none())
    }

    /// Collects every pick against the pre-pass hands before anything is submitted.
    fn run_passing(&mut self) -> Result<(), GameError> {
        let mut picks: [Option<[Card; 3]>; 4] = [None; 4];
        for seat in Seat::LOOP {
            let pick = self.choose_pass(seat)?;
            picks[seat.index()] = Some(pick.picks);
        }

        for seat in Seat::LOOP {
            if let Some(cards) = picks[seat.index()] {
                self.game.submit_pass(seat, cards)?;
            }
        }
        self.game.resolve_passes()?;

        self.log_opening_order();
        self.render_human_hand();
        Ok(())
    }

    fn choose_pass(&mut self, seat: Seat) -> Result<PassPick, GameError> {
        let Self {
            game,
            display,
            policies,
        } = self;
        let round = game.round().ok_or(GameError::NotStarted)?;

        match policies[seat.index()].as_mut() {
            Some(policy) => {
                let ctx = PolicyContext {
                    seat,
                    hand: game.hand(seat),
                    round,
                    scores: game.standings(),
                    legal: &[],
                };
                policy
                    .choose_pass(&ctx)
                    .ok_or(GameError::NoPassSelection(seat))
            }
            None if game.player(seat).is_human() => {
                select_pass_cards(display, game.hand(seat)).ok_or(GameError::InputClosed)
            }
            None => Err(GameError::MissingPolicy(seat)),
        }
    }

    fn play_next(&mut self) -> Result<(), GameError> {
        let seat = self.game.expected_to_play().ok_or(GameError::NotStarted)?;
        let (card, outcome) = if self.policies[seat.index()].is_some() {
            let card = self.policy_play(seat)?;
            (card, self.game.play_card(seat, card)?)
        } else if self.game.player(seat).is_human() {
            self.human_play(seat)?
        } else {
            return Err(GameError::MissingPolicy(seat));
        };

        self.display.show_play(seat, card);
        if let PlayOutcome::TrickCompleted { winner, penalties } = outcome {
            self.display.show_trick_result(winner, penalties);
        }
        Ok(())
    }

    fn policy_play(&mut self, seat: Seat) -> Result<Card, GameError> {
        let legal = self.game.legal_moves(seat);
        let Self { game, policies, .. } = self;
        let round = game.round().ok_or(GameError::NotStarted)?;
        let policy = policies[seat.index()]
            .as_mut()
            .ok_or(GameError::MissingPolicy(seat))?;
        let ctx = PolicyContext {
            seat,
            hand: game.hand(seat),
            round,
            scores: game.standings(),
            legal: &legal,
        };
        let card = policy.choose_play(&ctx);
        assert!(
            legal.contains(&card),
            "policy for {seat} chose {card}, which is not a legal play"
        );
        Ok(card)
    }

    /// Asks the display until the human picks a legal card. Confirm has no meaning here.
    fn human_play(&mut self, seat: Seat) -> Result<(Card, PlayOutcome), GameError> {
        loop {
            self.display.render_hand(self.game.hand(seat).cards());
            let card = match self.display.next_event() {
                SelectionEvent::Toggle(card) => card,
                SelectionEvent::Confirm => continue,
                SelectionEvent::Closed => return Err(GameError::InputClosed),
            };
            match self.game.play_card(seat, card) {
                Ok(outcome) => return Ok((card, outcome)),
                Err(GameError::Play(reason)) => {
                    debug!(seat = %seat, card = %card, %reason, "rejected human play");
                    self.display.show_illegal_play(card, &reason);
                }
                Err(err) => return Err(err),
            }
        }
    }
}
