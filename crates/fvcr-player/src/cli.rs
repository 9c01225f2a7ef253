#![forbid(unsafe_code)]

//! The `fvcr` command line: load a cast file, replay it on the terminal.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fvcr_engine::{ReplaySession, SessionConfig, Speed};
use fvcr_tty::{TtyInput, TtySink};

use crate::cast::CastReader;

/// Replay a recorded terminal session.
///
/// Controls during playback: `.`/`6`/`j`/`n` step forward, `4`/`k`/`N` step
/// backward, `p` or space toggles pause, `+`/`>` and `-`/`<` change speed,
/// `Q` quits. Mouse: left forward, middle pause, right backward.
#[derive(Debug, Parser)]
#[command(name = "fvcr", version, about = "Replay a recorded terminal session")]
pub struct Cli {
    /// Cast file to replay (.fvcr or .fvcr.gz).
    pub cast: PathBuf,

    /// Initial speed factor (1, 2, 4, 8, or 16).
    #[arg(long, default_value_t = 1, value_parser = parse_speed)]
    pub speed: u8,

    /// Start paused instead of playing.
    #[arg(long)]
    pub paused: bool,

    /// Command queue capacity.
    #[arg(long, default_value_t = 100, hide = true)]
    pub queue_capacity: usize,
}

fn parse_speed(raw: &str) -> Result<u8, String> {
    let factor: u8 = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    if Speed::from_factor(factor).is_some() {
        Ok(factor)
    } else {
        Err(format!("`{factor}` is not one of 1, 2, 4, 8, 16"))
    }
}

/// Parse the process arguments and run.
pub fn run_from_env() -> anyhow::Result<()> {
    run(Cli::parse())
}

/// Run the player with the given arguments.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    init_tracing();

    let cast = CastReader::open(&cli.cast)
        .with_context(|| format!("loading cast {}", cli.cast.display()))?;
    if cast.log.is_empty() {
        info!("cast has no frames, nothing to replay");
        return Ok(());
    }

    let speed = Speed::from_factor(cli.speed).context("invalid speed factor")?;
    let config = SessionConfig {
        auto: !cli.paused,
        speed,
        queue_capacity: cli.queue_capacity,
    };

    let sink = TtySink::new().context("initializing terminal")?;
    let session = ReplaySession::new(cast.log, sink, &config);
    // The sink's drop restores the terminal on success and on error alike.
    session
        .run(TtyInput::new())
        .context("replay session failed")?;
    Ok(())
}

/// Route tracing to stderr so the alternate screen stays clean; enabled only
/// when `FVCR_LOG` asks for it.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("FVCR_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
