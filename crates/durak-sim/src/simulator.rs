use anyhow::{Context, Result, bail};
use durak_bot::{GreedyStrategy, RandomStrategy, Strategy, StrategyContext};
use durak_core::game::match_state::{MatchOutcome, MatchState};
use durak_core::model::player::Seat;
use durak_core::model::round::RoundPhase;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{Level, event};

/// Guard against a strategy pair that never finishes a game.
const MAX_ROUNDS_PER_GAME: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Random,
    Greedy,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy '{0}', expected 'random' or 'greedy'")]
pub struct ParseStrategyError(String);

impl FromStr for StrategyKind {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(StrategyKind::Random),
            "greedy" => Ok(StrategyKind::Greedy),
            other => Err(ParseStrategyError(other.to_string())),
        }
    }
}

impl StrategyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Random => "random",
            StrategyKind::Greedy => "greedy",
        }
    }

    fn build(self, seed: u64) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Random => Box::new(RandomStrategy::with_seed(seed)),
            StrategyKind::Greedy => Box::new(GreedyStrategy::new()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub games: usize,
    pub seed: u64,
    pub player_one: StrategyKind,
    pub player_two: StrategyKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub games: usize,
    pub seed: u64,
    pub player_one: &'static str,
    pub player_two: &'static str,
    pub player_one_wins: usize,
    pub player_two_wins: usize,
    pub draws: usize,
    pub total_rounds: u64,
}

impl Summary {
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("creating summary file at {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .with_context(|| format!("writing summary to {}", path.display()))?;
        Ok(())
    }
}

/// Plays `config.games` matches, alternating the opening attacker, each game
/// on its own deterministic sub-seed.
pub fn run(config: &SimConfig) -> Result<Summary> {
    let mut summary = Summary {
        games: config.games,
        seed: config.seed,
        player_one: config.player_one.as_str(),
        player_two: config.player_two.as_str(),
        player_one_wins: 0,
        player_two_wins: 0,
        draws: 0,
        total_rounds: 0,
    };

    for game_index in 0..config.games {
        let game_seed = config.seed.wrapping_add(game_index as u64);
        let starting_attacker = if game_index % 2 == 0 { Seat::One } else { Seat::Two };
        let mut strategies = [
            config.player_one.build(game_seed),
            config.player_two.build(game_seed ^ 0x9e37_79b9),
        ];

        let (outcome, rounds) = play_game(game_seed, starting_attacker, &mut strategies)?;
        summary.total_rounds += u64::from(rounds);
        match outcome {
            MatchOutcome::Winner { winner: Seat::One, .. } => summary.player_one_wins += 1,
            MatchOutcome::Winner { winner: Seat::Two, .. } => summary.player_two_wins += 1,
            MatchOutcome::Draw => summary.draws += 1,
        }
        event!(
            Level::INFO,
            game = game_index,
            seed = game_seed,
            rounds,
            ?outcome,
            "game finished"
        );
    }

    Ok(summary)
}

fn play_game(
    seed: u64,
    starting_attacker: Seat,
    strategies: &mut [Box<dyn Strategy>; 2],
) -> Result<(MatchOutcome, u32)> {
    let mut match_state = MatchState::with_seed(starting_attacker, seed)?;
    event!(
        Level::DEBUG,
        seed,
        trump = %match_state.trump(),
        attacker = %match_state.attacker(),
        "game dealt"
    );

    loop {
        if let Some(outcome) = match_state.outcome() {
            return Ok((outcome, match_state.round_number() - 1));
        }
        if match_state.round_number() > MAX_ROUNDS_PER_GAME {
            bail!("game with seed {seed} exceeded {MAX_ROUNDS_PER_GAME} rounds");
        }

        let mut round = match_state.begin_round()?;
        loop {
            match round.phase() {
                RoundPhase::AwaitingAttack => {
                    let seat = round.attacker();
                    let legal = round.legal_attacks();
                    let action = {
                        let ctx = StrategyContext::new(seat, &round);
                        strategies[seat.index()].choose_attack(&ctx, &legal)
                    };
                    round.submit_attack(action)?;
                }
                RoundPhase::AwaitingDefense => {
                    let seat = round.defender();
                    let legal = round.legal_defenses();
                    let action = {
                        let ctx = StrategyContext::new(seat, &round);
                        strategies[seat.index()].choose_defense(&ctx, &legal)
                    };
                    round.submit_defense(action)?;
                }
                RoundPhase::Resolved => break,
            }
        }

        let result = match_state.conclude_round(round)?;
        event!(
            Level::DEBUG,
            round = match_state.round_number() - 1,
            winner = %result.winner,
            "round resolved"
        );
    }
}
