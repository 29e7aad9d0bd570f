//! Engine-vs-engine self-play driver.
//!
//! Run with:
//! `cargo run --release --bin self_play`
//! `cargo run --release --bin self_play -- --seed 7 --depth 2 --max-plies 120`
//!
//! Opens with a few seeded random moves, then lets the minimax engine play
//! both sides. Prints the final board and the game as PGN. Set `RUST_LOG`
//! (for example `RUST_LOG=sable_chess=info`) to see engine logging.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use sable_chess::chess_errors::ChessResult;
use sable_chess::engines::engine_minimax::MinimaxEngine;
use sable_chess::engines::engine_random::RandomEngine;
use sable_chess::engines::engine_trait::{Engine, SearchParams};
use sable_chess::game_state::game_controller::GameController;
use sable_chess::game_state::game_events::RecordingSink;
use sable_chess::utils::render_game_state::render_game_state;

struct SelfPlayConfig {
    seed: u64,
    depth: u8,
    max_plies: usize,
    opening_min_plies: usize,
    opening_max_plies: usize,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            seed: 1234,
            depth: 2,
            max_plies: 160,
            opening_min_plies: 2,
            opening_max_plies: 6,
        }
    }
}

fn parse_args() -> SelfPlayConfig {
    let mut config = SelfPlayConfig::default();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut i = 0;
    while i < args.len() {
        let value = args.get(i + 1).and_then(|v| v.parse::<u64>().ok());
        match (args[i].as_str(), value) {
            ("--seed", Some(v)) => config.seed = v,
            ("--depth", Some(v)) => config.depth = v.clamp(1, 6) as u8,
            ("--max-plies", Some(v)) => config.max_plies = v as usize,
            _ => {
                eprintln!("ignoring argument '{}'", args[i]);
                i += 1;
                continue;
            }
        }
        i += 2;
    }
    config
}

fn main() -> ChessResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = parse_args();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let opening_plies = rng.random_range(config.opening_min_plies..=config.opening_max_plies);

    let mut opener = RandomEngine::with_seed(config.seed);
    let mut controller = GameController::with_engine(
        RecordingSink::default(),
        Box::new(MinimaxEngine::with_depth(config.depth)),
    );
    controller.start_game();

    for ply in 0..config.max_plies {
        if controller.state().is_terminal() {
            break;
        }
        let side = controller.state().side_to_move;

        if ply < opening_plies {
            let mut scratch = controller.state().clone();
            let output = opener.choose_move(&mut scratch, &SearchParams::default())?;
            if let Some(mv) = output.best_move {
                controller.apply_user_move(mv.from, mv.to, mv.promotion)?;
            }
        } else {
            controller.request_ai_move(side, config.depth)?;
        }
    }

    println!("{}", render_game_state(controller.state()));
    println!("status: {:?}", controller.status());
    println!("events: {}", controller.sink().events().len());
    println!();
    println!("{}", controller.pgn()?);
    Ok(())
}
