use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::moves::{
    AttackAction, CardSet, DefenseAction, DrawObligation, MoveSet, RoundResult,
};
use crate::model::player::Seat;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    AwaitingAttack,
    AwaitingDefense,
    Resolved,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("round is not awaiting an attack")]
    NotAwaitingAttack,
    #[error("round is not awaiting a defense")]
    NotAwaitingDefense,
    #[error("passing is illegal on the opening attack")]
    PassOnOpeningAttack,
    #[error("attack {0:?} is not in the legal move set")]
    IllegalAttack(CardSet),
    #[error("defense {0:?} is not in the legal move set")]
    IllegalDefense(CardSet),
    #[error("round has not resolved yet")]
    NotResolved,
}

/// One attack/defense cycle. The round owns both hands while it runs; they are
/// moved back out together with the result when the round resolves.
///
/// Submitting a move outside the legal-move set, or passing on the opening
/// attack, is a contract breach by the caller and fails that call without
/// changing any state. Empty hands and an empty deck are ordinary states here.
#[derive(Debug, Clone)]
pub struct RoundState {
    hands: [Hand; 2],
    attacker: Seat,
    trump: Suit,
    attacking: Vec<Card>,
    pool: Vec<Card>,
    phase: RoundPhase,
    result: Option<RoundResult>,
}

impl RoundState {
    pub fn begin(hands: [Hand; 2], attacker: Seat, trump: Suit) -> Self {
        Self {
            hands,
            attacker,
            trump,
            attacking: Vec::new(),
            pool: Vec::new(),
            phase: RoundPhase::AwaitingAttack,
            result: None,
        }
    }

    pub fn attacker(&self) -> Seat {
        self.attacker
    }

    pub fn defender(&self) -> Seat {
        self.attacker.other()
    }

    pub fn trump(&self) -> Suit {
        self.trump
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    /// The pending, not-yet-covered attack batch.
    pub fn attacking_cards(&self) -> &[Card] {
        &self.attacking
    }

    /// Every card played this round by either side.
    pub fn pool(&self) -> &[Card] {
        &self.pool
    }

    /// Ranks already in play this round; empty on the opening attack.
    pub fn playable_ranks(&self) -> BTreeSet<Rank> {
        self.pool.iter().map(|card| card.rank).collect()
    }

    /// Legal attack batches for the current attacker. The size cap is the
    /// defender's hand size at this moment, so the defender is never handed
    /// more cards than they could possibly cover.
    pub fn legal_attacks(&self) -> MoveSet {
        let defender_cards = self.hand(self.defender()).len();
        self.hand(self.attacker)
            .attack_moves(&self.playable_ranks(), defender_cards)
    }

    /// Complete covers available to the defender against the pending batch.
    /// An empty set is not an error: it means the defender must surrender.
    pub fn legal_defenses(&self) -> MoveSet {
        self.hand(self.defender())
            .defense_moves(&self.attacking, self.trump)
    }

    /// Whether the reflection house rule is available. Always false; the rule
    /// is an unspecified extension point.
    pub fn reflections_supported(&self) -> bool {
        false
    }

    pub fn submit_attack(&mut self, action: AttackAction) -> Result<RoundPhase, RoundError> {
        if self.phase != RoundPhase::AwaitingAttack {
            return Err(RoundError::NotAwaitingAttack);
        }
        match action {
            AttackAction::Pass => {
                if self.pool.is_empty() {
                    return Err(RoundError::PassOnOpeningAttack);
                }
                let discarded = std::mem::take(&mut self.pool);
                self.result = Some(RoundResult {
                    winner: self.defender(),
                    attacker_draw: DrawObligation::Replenish,
                    defender_draw: DrawObligation::Replenish,
                    discarded,
                });
                self.phase = RoundPhase::Resolved;
            }
            AttackAction::Play(batch) => {
                if !self.legal_attacks().contains(&batch) {
                    return Err(RoundError::IllegalAttack(batch));
                }
                let attacker = self.attacker.index();
                for card in &batch {
                    self.hands[attacker].remove(*card);
                }
                self.pool.extend(batch.iter().copied());
                self.attacking = batch.into_iter().collect();
                self.phase = RoundPhase::AwaitingDefense;
            }
        }
        Ok(self.phase)
    }

    pub fn submit_defense(&mut self, action: DefenseAction) -> Result<RoundPhase, RoundError> {
        if self.phase != RoundPhase::AwaitingDefense {
            return Err(RoundError::NotAwaitingDefense);
        }
        match action {
            DefenseAction::Surrender => {
                self.attacking.clear();
                let taken = std::mem::take(&mut self.pool);
                self.result = Some(RoundResult {
                    winner: self.attacker,
                    attacker_draw: DrawObligation::Replenish,
                    defender_draw: DrawObligation::TakePool(taken),
                    discarded: Vec::new(),
                });
                self.phase = RoundPhase::Resolved;
            }
            DefenseAction::Cover(cover) => {
                if !self.legal_defenses().contains(&cover) {
                    return Err(RoundError::IllegalDefense(cover));
                }
                let defender = self.defender().index();
                for card in &cover {
                    self.hands[defender].remove(*card);
                }
                self.pool.extend(cover.iter().copied());
                self.attacking.clear();
                self.phase = RoundPhase::AwaitingAttack;
            }
        }
        Ok(self.phase)
    }

    pub fn result(&self) -> Option<&RoundResult> {
        self.result.as_ref()
    }

    /// Tears the round down, returning the hands and the resolution.
    pub fn finish(self) -> Result<([Hand; 2], RoundResult), RoundError> {
        match self.result {
            Some(result) => Ok((self.hands, result)),
            None => Err(RoundError::NotResolved),
        }
    }
}
