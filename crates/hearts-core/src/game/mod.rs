pub mod adapter;
pub mod config;
pub mod driver;
pub mod policy;
pub mod selection;
pub mod state;

pub use adapter::{DisplayAdapter, ScriptedDisplay, SelectionEvent};
pub use config::GameConfig;
pub use driver::GameDriver;
pub use policy::{Policy, PolicyContext};
pub use selection::{HumanPassSelection, select_pass_cards};
pub use state::{Game, GameError, GamePhase, GameSummary};
