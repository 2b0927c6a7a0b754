//! Terminal front end for the memory pairs game.
//!
//! Reads one command per line from stdin and redraws the board on stdout.
//! Logs go to stderr.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use memory_pairs::{
    BoardView, ClickOutcome, GameConfig, GameController, MismatchPolicy, SystemClock, TextRenderer,
    TileId,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

const HELP: &str = "\
commands:
  start          start the round and the clock
  restart        deal a new board
  <n>, flip <n>  flip tile n
  show           redraw the board
  help           show this text
  quit           leave the game";

#[derive(Parser, Debug)]
#[command(name = "memory-pairs")]
#[command(about = "Find every pair of matching tiles", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for reproducible boards
    #[arg(short, long)]
    seed: Option<u64>,

    /// Comma separated image identifiers (one pair per image)
    #[arg(short, long, value_delimiter = ',')]
    images: Vec<String>,

    /// How long a mismatched pair stays face up
    #[arg(long)]
    mismatch_delay_ms: Option<u64>,

    /// Tiles per row
    #[arg(long)]
    columns: Option<usize>,

    /// Keep a mismatched pair selected until it flips back
    #[arg(long)]
    lock_until_revert: bool,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: Level,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Start,
    Restart,
    Flip(TileId),
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let first = words.next()?;
    let command = match first.to_ascii_lowercase().as_str() {
        "start" | "s" => Command::Start,
        "restart" | "r" => Command::Restart,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "flip" | "f" => Command::Flip(TileId::new(words.next()?.parse().ok()?)),
        number => Command::Flip(TileId::new(number.parse().ok()?)),
    };
    if words.next().is_some() {
        return None;
    }
    Some(command)
}

fn init_logging(level: Level) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install logger: {err}"))
}

fn build_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => GameConfig::default(),
    };

    if !cli.images.is_empty() {
        config.images = cli.images.iter().map(|image| image.trim().into()).collect();
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(delay) = cli.mismatch_delay_ms {
        config.mismatch_delay_ms = delay;
    }
    if let Some(columns) = cli.columns {
        config.columns = columns;
    }
    if cli.lock_until_revert {
        config.mismatch_policy = MismatchPolicy::LockUntilRevert;
    }

    Ok(config)
}

fn draw(game: &GameController<BoardView>, renderer: &TextRenderer, status: &str) -> Result<()> {
    let mut out = io::stdout().lock();
    write!(out, "{CLEAR_SCREEN}")?;
    renderer.render(game.display(), &mut out)?;
    if !status.is_empty() {
        writeln!(out, " {status}")?;
    }
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

fn describe(outcome: ClickOutcome) -> String {
    match outcome {
        ClickOutcome::Ignored(reason) => format!("ignored: {reason}"),
        ClickOutcome::Flipped(tile) => format!("flipped {}", tile.raw()),
        ClickOutcome::Matched { first, second, .. } => {
            format!("match: {} and {}", first.raw(), second.raw())
        }
        ClickOutcome::Mismatched { first, second } => {
            format!("no match: {} and {}", first.raw(), second.raw())
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at.into()).await,
        None => std::future::pending().await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level)?;

    let config = build_config(&cli)?;
    let mut game = GameController::new(config, BoardView::new(), SystemClock::new())
        .context("invalid game configuration")?;
    let renderer = TextRenderer::new(game.config().columns);
    info!(pairs = game.round().total_pairs, "game ready");

    let mut status = HELP.to_string();
    draw(&game, &renderer, &status)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let deadline = game.next_deadline().map(|offset| game.clock().instant_at(offset));

        let line = tokio::select! {
            line = lines.next_line() => line?,
            () = sleep_until(deadline) => {
                if game.pump() > 0 {
                    draw(&game, &renderer, &status)?;
                }
                continue;
            }
        };

        // stdin closed
        let Some(line) = line else { break };
        if line.trim().is_empty() {
            draw(&game, &renderer, &status)?;
            continue;
        }

        status = match parse_command(&line) {
            Some(Command::Start) => {
                if game.start() { String::new() } else { "already started".to_string() }
            }
            Some(Command::Restart) => {
                if game.restart() { String::new() } else { "press start first".to_string() }
            }
            Some(Command::Flip(tile)) => describe(game.handle_click(tile)),
            Some(Command::Show) => status,
            Some(Command::Help) => HELP.to_string(),
            Some(Command::Quit) => break,
            None => format!("unknown command: {}", line.trim()),
        };
        debug!(command = line.trim(), "command handled");
        draw(&game, &renderer, &status)?;
    }

    writeln!(io::stdout())?;
    Ok(())
}
