#![deny(warnings)]
pub mod strategy;

pub use strategy::{
    GreedyStrategy, RandomStrategy, ScriptedAction, ScriptedStrategy, Strategy, StrategyContext,
};
