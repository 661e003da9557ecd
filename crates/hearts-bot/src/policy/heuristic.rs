use super::{Policy, PolicyContext};
use crate::bot::{PassPlanner, PlayPlanner, PlayReason};
use hearts_core::model::card::Card;
use hearts_core::model::passing::PassPick;
use tracing::{Level, event};

/// Adapter that wraps PassPlanner/PlayPlanner to implement the Policy trait
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicPolicy;

impl HeuristicPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for HeuristicPolicy {
    fn choose_pass(&mut self, ctx: &PolicyContext<'_>) -> Option<PassPick> {
        let pick = PassPlanner::choose(ctx.hand)?;
        event!(
            target: "hearts_bot::pass_decision",
            Level::INFO,
            seat = %ctx.seat,
            round = ctx.round.number(),
            direction = %ctx.round.passing_direction(),
            cards = ?pick.picks.map(|card| card.to_string()),
        );
        Some(pick)
    }

    fn choose_play(&mut self, ctx: &PolicyContext<'_>) -> Card {
        let (card, reason) = PlayPlanner::choose(ctx.legal, ctx.hand, ctx.round)
            .expect("driver offers at least one legal card");
        log_play_decision(ctx, card, reason);
        card
    }
}

fn log_play_decision(ctx: &PolicyContext<'_>, chosen: Card, reason: PlayReason) {
    if !tracing::enabled!(target: "hearts_bot::play_decision", Level::DEBUG) {
        return;
    }

    let legal_preview = if ctx.legal.len() <= 6 {
        ctx.legal
            .iter()
            .map(Card::to_string)
            .collect::<Vec<_>>()
            .join(",")
    } else {
        format!("{} moves", ctx.legal.len())
    };

    event!(
        target: "hearts_bot::play_decision",
        Level::DEBUG,
        seat = %ctx.seat,
        legal_count = ctx.legal.len(),
        legal_moves = %legal_preview,
        chosen = %chosen,
        hearts_broken = ctx.round.hearts_broken(),
        trick_cards = ctx.round.current_trick().len(),
        reason = reason.as_str(),
    );
}
