use crate::model::card::Card;
use crate::model::player::Seat;
use std::collections::{BTreeSet, HashSet};

/// A single move: an unordered set of cards, so move identity does not depend
/// on the order cards were picked in.
pub type CardSet = BTreeSet<Card>;

/// A legal-move set. Membership of a submitted move is an O(1) average lookup.
pub type MoveSet = HashSet<CardSet>;

/// What an attacker may submit: a member of the legal-move set, or the pass
/// signal that ends the round (illegal on the opening attack).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttackAction {
    Play(CardSet),
    Pass,
}

/// What a defender may submit: a complete cover from the legal-move set, or
/// surrender, taking every card played this round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefenseAction {
    Cover(CardSet),
    Surrender,
}

/// A player's post-round draw obligation. `Replenish` means drawing from the
/// deck back up to full hand size; `TakePool` means receiving the listed cards
/// instead of drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawObligation {
    Replenish,
    TakePool(Vec<Card>),
}

/// Resolution of one round. `discarded` carries the pool of a successfully
/// defended round so the caller can keep it out of play without losing cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    pub winner: Seat,
    pub attacker_draw: DrawObligation,
    pub defender_draw: DrawObligation,
    pub discarded: Vec<Card>,
}
