use crate::model::card::Card;
use crate::model::deck::{Deck, DeckError};
use crate::model::hand::Hand;
use crate::model::moves::{DrawObligation, RoundResult};
use crate::model::player::Seat;
use crate::model::round::{RoundError, RoundState};
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use thiserror::Error;

pub const HAND_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchOutcome {
    /// `winner` emptied their hand with the deck dry; `durak` still holds cards.
    Winner { winner: Seat, durak: Seat },
    /// Both hands and the deck emptied at once.
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("the game is already over")]
    GameOver(MatchOutcome),
    #[error("a round is still in progress")]
    RoundInProgress,
    #[error("no round is in progress")]
    NoRoundInProgress,
    #[error(transparent)]
    Round(#[from] RoundError),
    #[error(transparent)]
    Deck(#[from] DeckError),
}

/// Multi-round orchestration: dealing, post-round replenishment, attacker
/// rotation and end-of-game detection. The hard per-round rules live in
/// [`RoundState`]; this type only moves cards between the deck, the hands and
/// the discard pile.
#[derive(Debug, Clone)]
pub struct MatchState {
    deck: Deck,
    hands: [Hand; 2],
    discard: Vec<Card>,
    attacker: Seat,
    round_number: u32,
    round_active: bool,
    seed: u64,
}

impl MatchState {
    pub fn new(starting_attacker: Seat) -> Result<Self, MatchError> {
        Self::with_seed(starting_attacker, rand::random())
    }

    pub fn with_seed(starting_attacker: Seat, seed: u64) -> Result<Self, MatchError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut deck = Deck::shuffled(&mut rng);
        let mut hands = [Hand::new(), Hand::new()];

        for _ in 0..HAND_SIZE {
            for seat in [starting_attacker, starting_attacker.other()] {
                hands[seat.index()].add(deck.draw()?);
            }
        }
        deck.choose_trump()?;

        Ok(Self {
            deck,
            hands,
            discard: Vec::new(),
            attacker: starting_attacker,
            round_number: 1,
            round_active: false,
            seed,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn trump(&self) -> Suit {
        // Designated in the constructor, so always present.
        self.deck.trump().unwrap_or(Suit::Clubs)
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn discard(&self) -> &[Card] {
        &self.discard
    }

    pub fn attacker(&self) -> Seat {
        self.attacker
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// End-of-game check, taken at the start of a round: with the deck dry, an
    /// empty hand wins by exhaustion; two empty hands is a draw.
    pub fn outcome(&self) -> Option<MatchOutcome> {
        if !self.deck.is_empty() {
            return None;
        }
        let empty_one = self.hands[Seat::One.index()].is_empty();
        let empty_two = self.hands[Seat::Two.index()].is_empty();
        match (empty_one, empty_two) {
            (true, true) => Some(MatchOutcome::Draw),
            (true, false) => Some(MatchOutcome::Winner {
                winner: Seat::One,
                durak: Seat::Two,
            }),
            (false, true) => Some(MatchOutcome::Winner {
                winner: Seat::Two,
                durak: Seat::One,
            }),
            (false, false) => None,
        }
    }

    /// Moves the hands into a fresh round. The hands return through
    /// [`MatchState::conclude_round`].
    pub fn begin_round(&mut self) -> Result<RoundState, MatchError> {
        if self.round_active {
            return Err(MatchError::RoundInProgress);
        }
        if let Some(outcome) = self.outcome() {
            return Err(MatchError::GameOver(outcome));
        }
        self.round_active = true;
        let hands = std::mem::take(&mut self.hands);
        Ok(RoundState::begin(hands, self.attacker, self.trump()))
    }

    /// Takes a resolved round back: restores the hands, applies both draw
    /// obligations (attacker first, then defender), banks the discarded pool
    /// and hands the next attack to the round winner.
    pub fn conclude_round(&mut self, round: RoundState) -> Result<RoundResult, MatchError> {
        if !self.round_active {
            return Err(MatchError::NoRoundInProgress);
        }
        let attacker = round.attacker();
        let (hands, result) = round.finish()?;
        self.hands = hands;
        self.discard.extend(result.discarded.iter().copied());

        self.apply_obligation(attacker, &result.attacker_draw);
        self.apply_obligation(attacker.other(), &result.defender_draw);

        self.attacker = result.winner;
        self.round_number += 1;
        self.round_active = false;
        Ok(result)
    }

    fn apply_obligation(&mut self, seat: Seat, obligation: &DrawObligation) {
        match obligation {
            DrawObligation::Replenish => {
                while self.hands[seat.index()].len() < HAND_SIZE {
                    match self.deck.draw() {
                        Ok(card) => self.hands[seat.index()].add(card),
                        // A dry deck simply ends replenishment.
                        Err(_) => break,
                    }
                }
            }
            DrawObligation::TakePool(cards) => {
                self.hands[seat.index()].add_all(cards.iter().copied());
            }
        }
    }

    /// Total cards across deck, hands and discard. Between rounds this is the
    /// whole 36-card set; the partition invariant tests rely on it.
    pub fn card_census(&self) -> usize {
        self.deck.len()
            + self.hands[0].len()
            + self.hands[1].len()
            + self.discard.len()
    }
}
