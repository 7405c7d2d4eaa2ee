//! Self-play driver: the search plays both sides from a starting position
//! until the game ends or the ply limit is reached.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use plum_rules::utils::long_algebraic::moves_to_long_algebraic;
use plum_rules::{ChessResult, GameState, GameStatus, SearchConfig, SearchTask};

#[derive(Debug, Parser)]
#[command(name = "plum_rules", about = "Minimax self-play on the plum_rules chess engine")]
struct Args {
    /// Seed for the root move shuffle; omit for a different game each run.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many plies even if the game is still going.
    #[arg(long, default_value_t = 200)]
    max_plies: usize,

    /// Start from this position instead of the standard one.
    #[arg(long)]
    fen: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "self-play aborted");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> ChessResult<()> {
    let mut game = match &args.fen {
        Some(fen) => GameState::from_fen(fen)?,
        None => GameState::new_game(),
    };
    let config = SearchConfig {
        seed: args.seed,
        ..SearchConfig::default()
    };

    let mut plies = 0;
    while !game.status().is_terminal() && plies < args.max_plies {
        let mover = game.turn();
        let mv = SearchTask::spawn(&game, config).wait()?;
        if mv.is_promotion_marker() {
            game.try_promote(mv.promotion)?;
        } else {
            game.try_make_move(mv)?;
        }
        info!(ply = game.ply_count(), %mover, %mv, "played");
        if game.status() != GameStatus::AwaitingPromotion {
            plies += 1;
        }
    }

    println!("{game}");
    println!("{}", moves_to_long_algebraic(game.history()));
    println!("{}", game.to_fen());
    Ok(())
}
