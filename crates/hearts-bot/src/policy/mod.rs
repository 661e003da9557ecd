mod heuristic;

pub use heuristic::HeuristicPolicy;

pub use hearts_core::game::{Policy, PolicyContext};
