use std::path::PathBuf;

use clap::Parser;

use durak_sim::logging::init_logging;
use durak_sim::simulator::{SimConfig, StrategyKind, run};

/// Simulation harness for the Durak rule engine.
#[derive(Debug, Parser)]
#[command(
    name = "durak-sim",
    author,
    version,
    about = "Deterministic Durak match simulator"
)]
struct Cli {
    /// Number of games to play.
    #[arg(long, default_value_t = 100)]
    games: usize,

    /// RNG seed; a random one is chosen when omitted.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Strategy for Player 1 (random | greedy).
    #[arg(long, default_value = "greedy")]
    player_one: StrategyKind,

    /// Strategy for Player 2 (random | greedy).
    #[arg(long, default_value = "random")]
    player_two: StrategyKind,

    /// Write the aggregate summary as JSON to this file.
    #[arg(long, value_name = "FILE")]
    summary_json: Option<PathBuf>,

    /// Log level when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let config = SimConfig {
        games: cli.games,
        seed: cli.seed.unwrap_or_else(rand::random),
        player_one: cli.player_one,
        player_two: cli.player_two,
    };

    let summary = run(&config)?;
    println!(
        "{} games (seed {}): {} wins {}, {} wins {}, {} draws, {} rounds total",
        summary.games,
        summary.seed,
        summary.player_one,
        summary.player_one_wins,
        summary.player_two,
        summary.player_two_wins,
        summary.draws,
        summary.total_rounds
    );

    if let Some(path) = cli.summary_json {
        summary.write_json(&path)?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}
