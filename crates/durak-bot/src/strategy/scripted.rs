use super::{Strategy, StrategyContext};
use durak_core::model::moves::{AttackAction, DefenseAction, MoveSet};
use std::collections::VecDeque;

/// One predetermined decision for a [`ScriptedStrategy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedAction {
    Attack(AttackAction),
    Defense(DefenseAction),
}

/// Replays a fixed action queue. Used by tests that need exact move
/// sequences; running past the script is a test bug and panics.
pub struct ScriptedStrategy {
    script: VecDeque<ScriptedAction>,
}

impl ScriptedStrategy {
    pub fn new<I: IntoIterator<Item = ScriptedAction>>(script: I) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.script.is_empty()
    }
}

impl Strategy for ScriptedStrategy {
    fn choose_attack(&mut self, _ctx: &StrategyContext, _legal: &MoveSet) -> AttackAction {
        match self.script.pop_front() {
            Some(ScriptedAction::Attack(action)) => action,
            other => panic!("script expected an attack decision, had {other:?}"),
        }
    }

    fn choose_defense(&mut self, _ctx: &StrategyContext, _legal: &MoveSet) -> DefenseAction {
        match self.script.pop_front() {
            Some(ScriptedAction::Defense(action)) => action,
            other => panic!("script expected a defense decision, had {other:?}"),
        }
    }
}
