mod greedy;
mod random;
mod scripted;

pub use greedy::GreedyStrategy;
pub use random::RandomStrategy;
pub use scripted::{ScriptedAction, ScriptedStrategy};

use durak_core::model::moves::{AttackAction, DefenseAction, MoveSet};
use durak_core::model::player::Seat;
use durak_core::model::round::RoundState;

/// Read-only view handed to a strategy for one decision.
pub struct StrategyContext<'a> {
    pub seat: Seat,
    pub round: &'a RoundState,
}

impl<'a> StrategyContext<'a> {
    pub fn new(seat: Seat, round: &'a RoundState) -> Self {
        Self { seat, round }
    }
}

/// The Player-strategy collaborator. The engine validates the returned move
/// against the legal set; a strategy returning anything else is a bug in the
/// strategy, surfaced as a `RoundError` by the round.
///
/// `choose_attack` must not return `Pass` when the round pool is empty: the
/// opening attack is mandatory and the legal set is never empty there.
pub trait Strategy: Send {
    fn choose_attack(&mut self, ctx: &StrategyContext, legal: &MoveSet) -> AttackAction;
    fn choose_defense(&mut self, ctx: &StrategyContext, legal: &MoveSet) -> DefenseAction;
}
