use super::{Strategy, StrategyContext};
use durak_core::model::moves::{AttackAction, CardSet, DefenseAction, MoveSet};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Picks uniformly among the legal moves. Passes or surrenders only when the
/// legal set is empty, so it never violates the opening-attack contract.
pub struct RandomStrategy {
    rng: SmallRng,
}

impl RandomStrategy {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    fn pick(&mut self, legal: &MoveSet) -> Option<CardSet> {
        // Sort for a stable order before sampling, so a seed fully determines
        // the choice regardless of hash iteration order.
        let mut moves: Vec<&CardSet> = legal.iter().collect();
        moves.sort();
        moves.choose(&mut self.rng).map(|m| (*m).clone())
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomStrategy {
    fn choose_attack(&mut self, ctx: &StrategyContext, legal: &MoveSet) -> AttackAction {
        match self.pick(legal) {
            // Once the round is open, sometimes let the defender off even
            // though a continuation exists.
            Some(_) if !ctx.round.pool().is_empty() && self.rng.gen_bool(0.25) => {
                AttackAction::Pass
            }
            Some(batch) => AttackAction::Play(batch),
            None => AttackAction::Pass,
        }
    }

    fn choose_defense(&mut self, _ctx: &StrategyContext, legal: &MoveSet) -> DefenseAction {
        match self.pick(legal) {
            Some(cover) => DefenseAction::Cover(cover),
            None => DefenseAction::Surrender,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RandomStrategy;
    use crate::strategy::{Strategy, StrategyContext};
    use durak_core::model::card::Card;
    use durak_core::model::hand::Hand;
    use durak_core::model::moves::AttackAction;
    use durak_core::model::player::Seat;
    use durak_core::model::rank::Rank;
    use durak_core::model::round::RoundState;
    use durak_core::model::suit::Suit;

    fn opening_round() -> RoundState {
        let hands = [
            Hand::with_cards(vec![
                Card::new(Rank::Six, Suit::Clubs),
                Card::new(Rank::Nine, Suit::Spades),
            ]),
            Hand::with_cards(vec![Card::new(Rank::Seven, Suit::Clubs)]),
        ];
        RoundState::begin(hands, Seat::One, Suit::Hearts)
    }

    #[test]
    fn never_passes_on_the_opening_attack() {
        let round = opening_round();
        let legal = round.legal_attacks();
        for seed in 0..50 {
            let mut strategy = RandomStrategy::with_seed(seed);
            let ctx = StrategyContext::new(Seat::One, &round);
            match strategy.choose_attack(&ctx, &legal) {
                AttackAction::Play(batch) => assert!(legal.contains(&batch)),
                AttackAction::Pass => panic!("seed {seed}: passed on the opening attack"),
            }
        }
    }

    #[test]
    fn same_seed_makes_the_same_choice() {
        let round = opening_round();
        let legal = round.legal_attacks();
        let ctx = StrategyContext::new(Seat::One, &round);
        let a = RandomStrategy::with_seed(77).choose_attack(&ctx, &legal);
        let b = RandomStrategy::with_seed(77).choose_attack(&ctx, &legal);
        assert_eq!(a, b);
    }
}
