//! Tic-Tac-Toe against a minimax opponent.
//!
//! ## Usage
//!
//! - `tictactoe-rust` - Play interactively, choosing difficulty from a menu
//! - `tictactoe-rust play --difficulty easy` - Play at a fixed difficulty
//! - `tictactoe-rust selfplay --x hard --o medium` - Watch two engines play
//!
//! Set `RUST_LOG=debug` to see search statistics on stderr.

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tictactoe_rust::constants::THINK_DELAY_MS;
use tictactoe_rust::game::{Session, SessionConfig, result_message, self_play};
use tictactoe_rust::strategy::Difficulty;

/// Tic-Tac-Toe: play against an alpha-beta minimax engine
#[derive(Parser)]
#[command(name = "tictactoe-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game against the computer
    Play(PlayArgs),
    /// Let the engine play against itself and print the result
    Selfplay {
        /// Difficulty of the first player (X)
        #[arg(long, value_enum, default_value_t = Difficulty::Hard)]
        x: Difficulty,
        /// Difficulty of the second player (O)
        #[arg(long, value_enum, default_value_t = Difficulty::Hard)]
        o: Difficulty,
        /// Seed for reproducible games
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
struct PlayArgs {
    /// Skip the menu and play at this difficulty
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,
    /// Seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,
    /// Do not clear the terminal between turns
    #[arg(long)]
    no_clear: bool,
    /// Pause before the computer moves, in milliseconds
    #[arg(long, default_value_t = THINK_DELAY_MS)]
    think_ms: u64,
}

impl From<PlayArgs> for SessionConfig {
    fn from(args: PlayArgs) -> Self {
        SessionConfig {
            difficulty: args.difficulty,
            seed: args.seed,
            clear_screen: !args.no_clear,
            think_delay: Duration::from_millis(args.think_ms),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play(args)) => run_play(args.into()),
        Some(Commands::Selfplay { x, o, seed }) => {
            run_selfplay(x, o, seed);
            Ok(())
        }
        None => run_play(SessionConfig::default()),
    }
}

fn run_play(config: SessionConfig) -> Result<()> {
    info!(?config, "starting session");
    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout(), config);
    session.run()
}

fn run_selfplay(x: Difficulty, o: Difficulty, seed: Option<u64>) {
    let mut rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let (board, status) = self_play(x, o, &mut rng);

    println!("X ({x}) vs O ({o})\n");
    println!("{board}");
    println!("{}", result_message(status));
}
