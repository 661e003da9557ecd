use crate::model::player::Seat;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOSING_THRESHOLD: u32 = 100;
pub const DEFAULT_MAX_ROUNDS: u32 = 1_000;

/// Rules and seating for one game. Every field has a default, so an empty
/// document deserializes to a standard game with the human in seat 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// A player whose cumulative score reaches this value loses and ends the game.
    pub losing_threshold: u32,
    /// Seed for the per-round shuffles; drawn at random when absent.
    pub seed: Option<u64>,
    /// Seat driven through the display adapter. `None` seats automated players only.
    pub human_seat: Option<Seat>,
    pub shoot_the_moon: bool,
    /// Hard stop for games that never produce a loser.
    pub max_rounds: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            losing_threshold: DEFAULT_LOSING_THRESHOLD,
            seed: None,
            human_seat: Some(Seat::One),
            shoot_the_moon: true,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl GameConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn without_human(mut self) -> Self {
        self.human_seat = None;
        self
    }
}
