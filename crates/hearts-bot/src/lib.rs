pub mod bot;
pub mod policy;

pub use bot::{PassPlanner, PassReason, PlayPlanner, PlayReason};
pub use policy::{HeuristicPolicy, Policy, PolicyContext};
