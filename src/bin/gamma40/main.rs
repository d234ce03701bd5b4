//! gamma40 - 40Hz auditory stimulation generator
//!
//! Run with: cargo run --release
//!
//! Plays a 1kHz pure tone for 1ms every 25ms (40Hz). Space pauses, T swaps in
//! a continuous 1kHz test tone, Q or Esc quits.

mod app;
mod audio;
mod cli;
mod ui;

use std::{fs::File, sync::Mutex};

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::EnvFilter;

use app::Stimulator;
use cli::Args;

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_tracing(&args)?;

    Stimulator::from_args(&args).run()
}

/// Logs go to `--log-file` if given, else stderr when headless. The terminal
/// UI owns the screen, so without a log file its logs are discarded.
fn init_tracing(args: &Args) -> EyreResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match (&args.log_file, args.headless) {
        (Some(path), _) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        (None, true) => builder.with_writer(std::io::stderr).init(),
        (None, false) => builder.with_writer(std::io::sink).init(),
    }

    Ok(())
}
