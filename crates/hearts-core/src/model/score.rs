use crate::model::player::{Player, Seat};
use serde::Serialize;

/// Penalty points available in one round: thirteen hearts plus the queen of spades.
pub const MOON_TOTAL: u8 = 26;

/// Points awarded at the end of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundScore {
    pub penalties: [u8; 4],
    pub points: [u32; 4],
    pub moon_shooter: Option<Seat>,
}

impl RoundScore {
    /// Hearts count 1 and the queen of spades 13. With `shoot_the_moon`, a player who
    /// took all 26 scores nothing and everyone else takes 26.
    pub fn tally(penalties: [u8; 4], shoot_the_moon: bool) -> Self {
        let shooter = Seat::LOOP
            .iter()
            .copied()
            .find(|seat| penalties[seat.index()] == MOON_TOTAL)
            .filter(|_| shoot_the_moon);

        let points = match shooter {
            Some(shooter) => std::array::from_fn(|idx| {
                if idx == shooter.index() {
                    0
                } else {
                    MOON_TOTAL as u32
                }
            }),
            None => penalties.map(u32::from),
        };

        Self {
            penalties,
            points,
            moon_shooter: shooter,
        }
    }

    pub fn points_for(&self, seat: Seat) -> u32 {
        self.points[seat.index()]
    }
}

/// Lowest cumulative score wins; ties go to the earlier seat.
pub fn leading_player(players: &[Player; 4]) -> Seat {
    players
        .iter()
        .min_by_key(|player| (player.score(), player.seat()))
        .map(Player::seat)
        .unwrap_or(Seat::One)
}

pub fn standings(players: &[Player; 4]) -> [u32; 4] {
    std::array::from_fn(|idx| players[idx].score())
}
