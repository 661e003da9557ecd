use crate::game::config::GameConfig;
use crate::model::card::Card;
use crate::model::deck::{DealError, Deck};
use crate::model::hand::Hand;
use crate::model::passing::{PassingDirection, PassingError};
use crate::model::player::{Player, PlayerKind, Seat};
use crate::model::round::{PlayError, PlayOutcome, RoundPhase, RoundState};
use crate::model::score::{RoundScore, leading_player, standings};
use crate::model::turn_order::resolve_turn_order;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::{array, fmt};
use tracing::{debug, info, warn};

/// Dealing → Passing (skipped on hold rounds) → Playing → Scoring → Dealing | GameOver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    Dealing,
    Passing,
    Playing,
    Scoring,
    GameOver,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GamePhase::Dealing => "dealing",
            GamePhase::Passing => "passing",
            GamePhase::Playing => "playing",
            GamePhase::Scoring => "scoring",
            GamePhase::GameOver => "game over",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    NotStarted,
    AlreadyStarted,
    WrongPhase { expected: GamePhase, actual: GamePhase },
    Deal(DealError),
    Passing(PassingError),
    Play(PlayError),
    MissingPolicy(Seat),
    NoPassSelection(Seat),
    InputClosed,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NotStarted => write!(f, "game has not been started"),
            GameError::AlreadyStarted => write!(f, "game was already started"),
            GameError::WrongPhase { expected, actual } => {
                write!(f, "expected the {expected} phase but the game is in {actual}")
            }
            GameError::Deal(err) => write!(f, "deal failed: {err}"),
            GameError::Passing(err) => write!(f, "pass failed: {err}"),
            GameError::Play(err) => write!(f, "illegal play: {err}"),
            GameError::MissingPolicy(seat) => write!(f, "{seat} is automated but has no policy"),
            GameError::NoPassSelection(seat) => write!(f, "{seat} did not choose cards to pass"),
            GameError::InputClosed => write!(f, "display closed before the human finished"),
        }
    }
}

impl std::error::Error for GameError {}

impl From<DealError> for GameError {
    fn from(value: DealError) -> Self {
        GameError::Deal(value)
    }
}

impl From<PassingError> for GameError {
    fn from(value: PassingError) -> Self {
        GameError::Passing(value)
    }
}

impl From<PlayError> for GameError {
    fn from(value: PlayError) -> Self {
        GameError::Play(value)
    }
}

/// Final standings once the game is over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub seed: u64,
    pub rounds_played: u32,
    pub scores: [u32; 4],
    pub losers: Vec<Seat>,
    pub winner: Seat,
}

/// One game of Hearts: four players, a seeded deck source and the round in progress.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    seed: u64,
    rng: StdRng,
    players: [Player; 4],
    round: Option<RoundState>,
    rounds_played: u32,
    phase: GamePhase,
    last_score: Option<RoundScore>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let players = array::from_fn(|idx| {
            let seat = Seat::LOOP[idx];
            let kind = if config.human_seat == Some(seat) {
                PlayerKind::Human
            } else {
                PlayerKind::Automated
            };
            Player::new(seat, kind)
        });

        Self {
            config,
            seed,
            rng: StdRng::seed_from_u64(seed),
            players,
            round: None,
            rounds_played: 0,
            phase: GamePhase::Dealing,
            last_score: None,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(GameConfig::seeded(seed))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn players(&self) -> &[Player; 4] {
        &self.players
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        self.players[seat.index()].hand()
    }

    pub fn human_seat(&self) -> Option<Seat> {
        self.players.iter().find(|p| p.is_human()).map(Player::seat)
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    /// 1-based number of the round in progress, 0 before the first deal.
    pub fn round_number(&self) -> u32 {
        self.round.as_ref().map_or(0, RoundState::number)
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn passing_direction(&self) -> Option<PassingDirection> {
        self.round.as_ref().map(RoundState::passing_direction)
    }

    pub fn expected_to_play(&self) -> Option<Seat> {
        self.round.as_ref().map(RoundState::expected_to_play)
    }

    pub fn legal_moves(&self, seat: Seat) -> Vec<Card> {
        match &self.round {
            Some(round) => round.legal_moves(self.hand(seat), seat),
            None => Vec::new(),
        }
    }

    /// Play order for the opening trick, chained from the two of clubs holder.
    pub fn opening_order(&self) -> Option<[Seat; 4]> {
        resolve_turn_order(&self.players)
    }

    pub fn standings(&self) -> [u32; 4] {
        standings(&self.players)
    }

    pub fn losers(&self) -> Vec<Seat> {
        self.players
            .iter()
            .filter(|p| p.is_loser())
            .map(Player::seat)
            .collect()
    }

    pub fn last_round_score(&self) -> Option<&RoundScore> {
        self.last_score.as_ref()
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            seed: self.seed,
            rounds_played: self.rounds_played,
            scores: self.standings(),
            losers: self.losers(),
            winner: leading_player(&self.players),
        }
    }

    /// Deals the first round.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.round.is_some() {
            return Err(GameError::AlreadyStarted);
        }
        self.deal_round()
    }

    pub fn deal_round(&mut self) -> Result<(), GameError> {
        self.expect_phase(GamePhase::Dealing)?;
        let deck = Deck::shuffled(&mut self.rng);
        self.deal_round_with(deck)
    }

    /// Deals the next round from an explicit deck instead of the seeded shuffle.
    pub fn deal_round_with(&mut self, deck: Deck) -> Result<(), GameError> {
        self.expect_phase(GamePhase::Dealing)?;
        let hands = deck.deal(self.players.len())?;
        for (player, hand) in self.players.iter_mut().zip(hands) {
            player.set_hand(hand);
        }

        let number = self.round_number() + 1;
        let round = RoundState::begin(number, &self.players);
        self.phase = match round.phase() {
            RoundPhase::Passing(_) => GamePhase::Passing,
            RoundPhase::Playing | RoundPhase::Complete => GamePhase::Playing,
        };
        info!(
            round = number,
            direction = %round.passing_direction(),
            leader = %round.starting_player(),
            "dealt round"
        );
        self.round = Some(round);
        Ok(())
    }

    pub fn submit_pass(&mut self, seat: Seat, cards: [Card; 3]) -> Result<(), GameError> {
        self.expect_phase(GamePhase::Passing)?;
        let round = self.round.as_mut().ok_or(GameError::NotStarted)?;
        round.submit_pass(&mut self.players, seat, cards)?;
        debug!(seat = %seat, cards = ?cards.map(|c| c.to_string()), "pass submitted");
        Ok(())
    }

    /// Hands every submitted pass to its recipient at once and moves to trick play.
    pub fn resolve_passes(&mut self) -> Result<(), GameError> {
        self.expect_phase(GamePhase::Passing)?;
        let round = self.round.as_mut().ok_or(GameError::NotStarted)?;
        round.resolve_passes(&mut self.players)?;
        info!(
            round = round.number(),
            direction = %round.passing_direction(),
            leader = %round.starting_player(),
            "passes resolved"
        );
        self.phase = GamePhase::Playing;
        Ok(())
    }

    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<PlayOutcome, GameError> {
        self.expect_phase(GamePhase::Playing)?;
        let round = self.round.as_mut().ok_or(GameError::NotStarted)?;
        let outcome = round.play_card(&mut self.players, seat, card)?;
        if let PlayOutcome::TrickCompleted { winner, penalties } = outcome {
            debug!(
                trick = round.tricks_completed(),
                winner = %winner,
                penalties,
                "trick complete"
            );
        }
        if round.is_complete() {
            self.phase = GamePhase::Scoring;
        }
        Ok(outcome)
    }

    /// Scores the finished round from the tricks each player took.
    pub fn finish_round(&mut self) -> Result<RoundScore, GameError> {
        self.expect_phase(GamePhase::Scoring)?;
        let round = self.round.as_ref().ok_or(GameError::NotStarted)?;
        let penalties = round.penalty_totals();
        Ok(self.apply_round_score(penalties))
    }

    /// Ends the live round with the given penalty points instead of the tricks taken.
    pub fn finish_round_with(&mut self, penalties: [u8; 4]) -> Result<RoundScore, GameError> {
        match self.phase {
            GamePhase::Passing | GamePhase::Playing | GamePhase::Scoring => {
                Ok(self.apply_round_score(penalties))
            }
            GamePhase::Dealing if self.round.is_none() => Err(GameError::NotStarted),
            actual => Err(GameError::WrongPhase {
                expected: GamePhase::Scoring,
                actual,
            }),
        }
    }

    fn apply_round_score(&mut self, penalties: [u8; 4]) -> RoundScore {
        let score = RoundScore::tally(penalties, self.config.shoot_the_moon);
        let threshold = self.config.losing_threshold;
        for player in self.players.iter_mut() {
            player.add_score(score.points_for(player.seat()));
            player.check_loss(threshold);
        }
        self.rounds_played += 1;

        info!(
            round = self.round_number(),
            points = ?score.points,
            totals = ?self.standings(),
            moon = ?score.moon_shooter,
            "round scored"
        );

        let losers = self.losers();
        if !losers.is_empty() {
            info!(losers = ?losers, rounds = self.rounds_played, "game over");
            self.phase = GamePhase::GameOver;
        } else if self.rounds_played >= self.config.max_rounds {
            warn!(
                rounds = self.rounds_played,
                "round limit reached before anyone crossed the threshold"
            );
            self.phase = GamePhase::GameOver;
        } else {
            self.phase = GamePhase::Dealing;
        }

        self.last_score = Some(score);
        score
    }

    fn expect_phase(&self, expected: GamePhase) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Game, GameError, GamePhase};
    use crate::game::config::GameConfig;
    use crate::model::card::Card;
    use crate::model::passing::PassingDirection;
    use crate::model::player::Seat;

    fn play_out_round(game: &mut Game) {
        while game.phase() == GamePhase::Playing {
            let seat = game.expected_to_play().unwrap();
            let card = game.legal_moves(seat)[0];
            game.play_card(seat, card).unwrap();
        }
    }

    fn pass_lowest_three(game: &mut Game) {
        for seat in Seat::LOOP {
            let cards = game.hand(seat).cards();
            let picks = [cards[0], cards[1], cards[2]];
            game.submit_pass(seat, picks).unwrap();
        }
        game.resolve_passes().unwrap();
    }

    #[test]
    fn new_game_waits_in_dealing_phase() {
        let game = Game::with_seed(0);
        assert_eq!(game.phase(), GamePhase::Dealing);
        assert_eq!(game.round_number(), 0);
        assert_eq!(game.human_seat(), Some(Seat::One));
        assert!(game.round().is_none());
        assert_eq!(game.seed(), 0);
    }

    #[test]
    fn start_deals_round_one_with_left_pass() {
        let mut game = Game::with_seed(3);
        game.start().unwrap();
        assert_eq!(game.round_number(), 1);
        assert_eq!(game.phase(), GamePhase::Passing);
        assert_eq!(game.passing_direction(), Some(PassingDirection::Left));
        for seat in Seat::LOOP {
            assert_eq!(game.hand(seat).len(), 13);
        }
        assert_eq!(game.start(), Err(GameError::AlreadyStarted));
    }

    #[test]
    fn playing_before_passing_is_rejected() {
        let mut game = Game::with_seed(3);
        game.start().unwrap();
        let seat = game.expected_to_play().unwrap();
        assert_eq!(
            game.play_card(seat, Card::TWO_OF_CLUBS),
            Err(GameError::WrongPhase {
                expected: GamePhase::Playing,
                actual: GamePhase::Passing
            })
        );
    }

    #[test]
    fn rounds_rotate_direction_and_redeal() {
        let mut game = Game::new(GameConfig::seeded(11).without_human());
        game.start().unwrap();
        let expected = [
            PassingDirection::Left,
            PassingDirection::Right,
            PassingDirection::Across,
            PassingDirection::Hold,
            PassingDirection::Left,
        ];
        for (round, direction) in expected.iter().enumerate() {
            assert_eq!(game.round_number(), round as u32 + 1);
            assert_eq!(game.passing_direction(), Some(*direction));
            if direction.requires_selection() {
                pass_lowest_three(&mut game);
            } else {
                assert_eq!(game.phase(), GamePhase::Playing);
            }
            play_out_round(&mut game);
            assert_eq!(game.phase(), GamePhase::Scoring);
            game.finish_round().unwrap();
            if game.is_over() {
                return;
            }
            game.deal_round().unwrap();
            for seat in Seat::LOOP {
                assert_eq!(game.hand(seat).len(), 13);
            }
        }
    }

    #[test]
    fn scores_accumulate_across_rounds() {
        let mut game = Game::with_seed(5);
        game.start().unwrap();
        pass_lowest_three(&mut game);
        play_out_round(&mut game);
        let score = game.finish_round().unwrap();
        let total: u32 = score.points.iter().sum();
        assert!(total == 26 || total == 78);
        assert_eq!(game.standings(), score.points);
        assert_eq!(game.rounds_played(), 1);
        assert_eq!(game.last_round_score(), Some(&score));
    }

    #[test]
    fn injected_scoring_ends_game_at_threshold() {
        let mut game = Game::with_seed(1);
        game.start().unwrap();
        game.finish_round_with([13, 0, 0, 0]).unwrap();
        assert_eq!(game.phase(), GamePhase::Dealing);
        game.deal_round().unwrap();
        game.finish_round_with([90, 0, 0, 0]).unwrap();
        assert!(game.is_over());
        assert_eq!(game.losers(), vec![Seat::One]);
        assert!(game.player(Seat::One).is_loser());

        let summary = game.summary();
        assert_eq!(summary.rounds_played, 2);
        assert_eq!(summary.scores, [103, 0, 0, 0]);
        assert_eq!(summary.winner, Seat::Two);
        assert!(matches!(
            game.deal_round(),
            Err(GameError::WrongPhase { actual: GamePhase::GameOver, .. })
        ));
    }

    #[test]
    fn round_limit_stops_game_without_loser() {
        let config = GameConfig {
            max_rounds: 1,
            ..GameConfig::seeded(2)
        };
        let mut game = Game::new(config);
        game.start().unwrap();
        game.finish_round_with([1, 2, 3, 4]).unwrap();
        assert!(game.is_over());
        assert!(game.losers().is_empty());
        assert_eq!(game.summary().winner, Seat::One);
    }

    #[test]
    fn finishing_before_start_is_an_error() {
        let mut game = Game::with_seed(1);
        assert_eq!(game.finish_round_with([0; 4]), Err(GameError::NotStarted));
        assert_eq!(
            game.finish_round(),
            Err(GameError::WrongPhase {
                expected: GamePhase::Scoring,
                actual: GamePhase::Dealing
            })
        );
    }

    #[test]
    fn opening_order_follows_two_of_clubs() {
        let mut game = Game::with_seed(8);
        game.start().unwrap();
        let order = game.opening_order().unwrap();
        assert!(game.player(order[0]).holds(Card::TWO_OF_CLUBS));
        assert_eq!(order[1], order[0].next());
    }
}
