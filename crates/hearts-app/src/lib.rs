pub mod cli;
pub mod config;
pub mod logging;
pub mod session;
pub mod terminal;

pub use cli::Cli;
pub use config::{AppConfig, ConfigError, LoggingConfig, ValidationError};
pub use session::{SessionOptions, play, write_summary};
pub use terminal::TerminalAdapter;
