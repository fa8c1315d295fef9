//! Replays recognizer guesses from stdin through the calculator pipeline.
//!
//! Each input line is one recognized-text event. A line reading `:clear`
//! triggers the clear action. The display is printed after every change.

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use inkcalc::Config;
use inkcalc::display::{self, DisplayState, EventSource, QueueError};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const PLACEHOLDER_TEXT: &str = "Write an expression";
const CLEAR_COMMAND: &str = ":clear";

#[derive(Parser, Debug)]
#[command(name = "inkcalc", version, about)]
struct Args {
    /// Path to a config file (defaults to ~/.config/inkcalc/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print each outcome as JSON segments
    #[arg(long)]
    json: bool,

    /// Treat every event as coming from an empty canvas
    #[arg(long)]
    no_ink: bool,
}

fn init_tracing(config_filter: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config_filter.unwrap_or("inkcalc=info")))
        .unwrap_or_else(|_| EnvFilter::new("inkcalc=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_state(state: &DisplayState, json: bool) {
    match state {
        DisplayState::Placeholder => println!("{PLACEHOLDER_TEXT}"),
        DisplayState::Showing(outcome) if json => match serde_json::to_string(outcome) {
            Ok(line) => println!("{line}"),
            Err(e) => error!("Failed to serialize outcome: {}", e),
        },
        DisplayState::Showing(outcome) => println!("{}", outcome.display_text()),
    }
}

/// Submit one recognition event per input line until end of input.
///
/// Lines that are not valid UTF-8 are passed on lossily; the pipeline turns
/// them into an error outcome like any other garbage.
fn replay_lines(mut input: impl BufRead, source: &EventSource, has_ink: bool) -> Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .context("Failed to read stdin")?;
        if read == 0 {
            return Ok(());
        }

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches('\n').trim_end_matches('\r');

        let submitted = if line.trim() == CLEAR_COMMAND {
            source.submit_clear()
        } else {
            source.submit_text(line, has_ink)
        };

        match submitted {
            Ok(()) => {}
            Err(QueueError::Full) => warn!("Update queue full, dropping line: {:?}", line),
            Err(err @ QueueError::Closed) => return Err(err.into()),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (config, adjustments) =
        Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(config.log_filter.as_deref());
    for adjustment in &adjustments {
        warn!("{}", adjustment);
    }
    info!(
        precision = config.precision(),
        rounding = ?config.rounding,
        "configuration loaded"
    );

    let (source, mut updates) = display::channel(config);
    let json = args.json;
    updates.set_on_change(move |state| print_state(state, json));
    print_state(updates.state(), json);

    let has_ink = !args.no_ink;
    let reader = std::thread::spawn(move || replay_lines(std::io::stdin().lock(), &source, has_ink));

    updates.run().await;

    reader
        .join()
        .map_err(|_| anyhow::anyhow!("stdin reader thread panicked"))??;

    Ok(())
}
