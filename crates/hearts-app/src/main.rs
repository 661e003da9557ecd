use std::io::{self, IsTerminal, Write};

use clap::Parser;

use hearts_app::logging::init_logging;
use hearts_app::{Cli, SessionOptions, play, write_summary};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = cli.load_config()?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let _logging_guard = init_logging(&config.logging)?;

    let stdout = io::stdout();
    let color = !cli.no_color && !cli.json && stdout.is_terminal();
    let table: Box<dyn Write> = if cli.json {
        Box::new(io::stderr())
    } else {
        Box::new(stdout.lock())
    };

    let stdin = io::stdin();
    let (summary, _) = play(&config.game, SessionOptions { color }, stdin.lock(), table)?;

    let mut out = io::stdout().lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &summary)?;
        writeln!(out)?;
    } else {
        write_summary(&summary, &mut out)?;
    }
    Ok(())
}
