use super::{Strategy, StrategyContext};
use durak_core::model::card::Card;
use durak_core::model::moves::{AttackAction, CardSet, DefenseAction, MoveSet};
use durak_core::model::suit::Suit;
use tracing::{Level, event};

/// Spend-cheap heuristic: sheds the lowest-value cards it can, hoards trumps,
/// and stops feeding a round once only valuable cards would continue it.
pub struct GreedyStrategy;

impl GreedyStrategy {
    pub fn new() -> Self {
        Self
    }

    fn card_cost(card: Card, trump: Suit) -> u32 {
        let base = card.rank.value() as u32;
        if card.is_trump(trump) { base + 20 } else { base }
    }

    fn move_cost(batch: &CardSet, trump: Suit) -> u32 {
        batch.iter().map(|&c| Self::card_cost(c, trump)).sum()
    }

    /// Cheapest move, breaking ties by the canonical card-set order.
    fn cheapest(legal: &MoveSet, trump: Suit) -> Option<CardSet> {
        legal
            .iter()
            .min_by(|a, b| {
                Self::move_cost(a, trump)
                    .cmp(&Self::move_cost(b, trump))
                    .then_with(|| a.cmp(b))
            })
            .cloned()
    }
}

impl Default for GreedyStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for GreedyStrategy {
    fn choose_attack(&mut self, ctx: &StrategyContext, legal: &MoveSet) -> AttackAction {
        let trump = ctx.round.trump();
        let Some(batch) = Self::cheapest(legal, trump) else {
            event!(Level::DEBUG, seat = %ctx.seat, "no continuation available, passing");
            return AttackAction::Pass;
        };

        // A continuation that spends a trump gives away more than a finished
        // round is worth; the opening attack has no such choice.
        let opening = ctx.round.pool().is_empty();
        if !opening && batch.iter().any(|c| c.is_trump(trump)) {
            event!(Level::DEBUG, seat = %ctx.seat, "cheapest continuation is trump, passing");
            return AttackAction::Pass;
        }

        event!(
            Level::DEBUG,
            seat = %ctx.seat,
            cards = batch.len(),
            cost = Self::move_cost(&batch, trump),
            "attacking with cheapest batch"
        );
        AttackAction::Play(batch)
    }

    fn choose_defense(&mut self, ctx: &StrategyContext, legal: &MoveSet) -> DefenseAction {
        let trump = ctx.round.trump();
        match Self::cheapest(legal, trump) {
            Some(cover) => {
                event!(
                    Level::DEBUG,
                    seat = %ctx.seat,
                    cards = cover.len(),
                    cost = Self::move_cost(&cover, trump),
                    "covering with cheapest defense"
                );
                DefenseAction::Cover(cover)
            }
            None => {
                event!(Level::DEBUG, seat = %ctx.seat, "no complete cover, surrendering");
                DefenseAction::Surrender
            }
        }
    }
}
