use crate::config::{AppConfig, ConfigError};
use clap::Parser;
use std::path::PathBuf;

/// Command-line front end for a game of Hearts.
#[derive(Debug, Parser)]
#[command(
    name = "hearts",
    author,
    version,
    about = "Play Hearts in the terminal against three computer players"
)]
pub struct Cli {
    /// Path to a YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the RNG seed used for every shuffle.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Override the score at which a player loses.
    #[arg(long, value_name = "POINTS")]
    pub threshold: Option<u32>,

    /// Let a computer player take the human seat.
    #[arg(long)]
    pub autoplay: bool,

    /// Print the final summary as JSON on stdout (table output moves to stderr).
    #[arg(long)]
    pub json: bool,

    /// Override the tracing level (trace, debug, info, warn, error).
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Write JSON log lines to this file instead of stderr.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Never color red suits.
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Reads `--config` if given, otherwise starts from defaults. Overrides are not applied yet.
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        match &self.config {
            Some(path) => AppConfig::from_path(path),
            None => Ok(AppConfig::default()),
        }
    }

    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(seed) = self.seed {
            config.game.seed = Some(seed);
        }

        if let Some(threshold) = self.threshold {
            config.game.losing_threshold = threshold;
        }

        if self.autoplay {
            config.game.human_seat = None;
        }

        if let Some(level) = &self.log_level {
            config.logging.tracing_level = level.clone();
        }

        if let Some(path) = &self.log_file {
            config.logging.log_file = Some(path.clone());
        }
    }
}
