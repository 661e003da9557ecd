use crate::terminal::TerminalAdapter;
use anyhow::{Context, Result};
use hearts_bot::HeuristicPolicy;
use hearts_core::game::{Game, GameConfig, GameDriver, GameSummary};
use hearts_core::model::player::Seat;
use std::io::{self, BufRead, Write};
use tracing::info;

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub color: bool,
}

/// Plays one game on the terminal. Every seat except `config.human_seat` gets the
/// heuristic bot. Returns the summary and hands the output writer back.
pub fn play<R, W>(
    config: &GameConfig,
    options: SessionOptions,
    input: R,
    output: W,
) -> Result<(GameSummary, W)>
where
    R: BufRead,
    W: Write,
{
    let game = Game::new(config.clone());
    info!(
        seed = game.seed(),
        human = ?config.human_seat.map(Seat::number),
        threshold = config.losing_threshold,
        "starting game"
    );

    let display = TerminalAdapter::new(input, output).with_color(options.color);
    let mut driver = GameDriver::new(game, display);
    for seat in Seat::LOOP {
        if config.human_seat != Some(seat) {
            driver.set_policy(seat, Box::new(HeuristicPolicy::new()));
        }
    }

    let summary = driver.run().context("game aborted")?;
    let (_, display) = driver.into_parts();
    Ok((summary, display.into_output()))
}

/// Plain-text final standings.
pub fn write_summary(summary: &GameSummary, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "Game over after {} rounds (seed {}).",
        summary.rounds_played, summary.seed
    )?;
    for seat in Seat::LOOP {
        let marker = if summary.losers.contains(&seat) {
            " (lost)"
        } else {
            ""
        };
        writeln!(out, "  {seat}: {}{marker}", summary.scores[seat.index()])?;
    }
    writeln!(out, "Winner: {}", summary.winner)
}
