use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use thiserror::Error;

pub const DECK_SIZE: usize = 36;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("cannot draw from an empty deck")]
    Empty,
    #[error("trump suit has already been designated")]
    TrumpAlreadyChosen,
}

/// The 36-card talon. Cards are drawn from the back of the vector; the trump
/// indicator sits at index 0, so it is the last card anyone draws.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    trump: Option<Suit>,
}

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards, trump: None }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn draw(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Empty)
    }

    /// Designates the trump suit by flipping the top card and sliding it under
    /// the talon, face up. Callable once per game.
    pub fn choose_trump(&mut self) -> Result<Card, DeckError> {
        if self.trump.is_some() {
            return Err(DeckError::TrumpAlreadyChosen);
        }
        let indicator = self.cards.pop().ok_or(DeckError::Empty)?;
        self.trump = Some(indicator.suit);
        self.cards.insert(0, indicator);
        Ok(indicator)
    }

    pub fn trump(&self) -> Option<Suit> {
        self.trump
    }

    /// The face-up bottom card, while it has not been drawn yet.
    pub fn trump_indicator(&self) -> Option<Card> {
        self.trump?;
        self.cards.first().copied()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::{Deck, DeckError};
    use std::collections::BTreeSet;

    #[test]
    fn standard_deck_has_36_unique_cards() {
        let deck = Deck::standard();
        assert_eq!(deck.len(), 36);
        let distinct: BTreeSet<_> = deck.cards().iter().copied().collect();
        assert_eq!(distinct.len(), 36);
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let deck_a = Deck::shuffled_with_seed(42);
        let deck_b = Deck::shuffled_with_seed(42);
        assert_eq!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let deck_a = Deck::shuffled_with_seed(1);
        let deck_b = Deck::shuffled_with_seed(2);
        assert_ne!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn draw_removes_the_top_card() {
        let mut deck = Deck::standard();
        let top = *deck.cards().last().unwrap();
        assert_eq!(deck.draw(), Ok(top));
        assert_eq!(deck.len(), 35);
    }

    #[test]
    fn drawing_an_empty_deck_errors() {
        let mut deck = Deck::standard();
        for _ in 0..36 {
            deck.draw().unwrap();
        }
        assert_eq!(deck.draw(), Err(DeckError::Empty));
    }

    #[test]
    fn choose_trump_moves_indicator_to_the_bottom() {
        let mut deck = Deck::shuffled_with_seed(7);
        let top = *deck.cards().last().unwrap();
        let indicator = deck.choose_trump().unwrap();
        assert_eq!(indicator, top);
        assert_eq!(deck.trump(), Some(indicator.suit));
        assert_eq!(deck.trump_indicator(), Some(indicator));
        assert_eq!(deck.len(), 36);
    }

    #[test]
    fn trump_indicator_is_drawn_last() {
        let mut deck = Deck::shuffled_with_seed(7);
        let indicator = deck.choose_trump().unwrap();
        let mut last = None;
        while let Ok(card) = deck.draw() {
            last = Some(card);
        }
        assert_eq!(last, Some(indicator));
    }

    #[test]
    fn choosing_trump_twice_fails_and_keeps_the_suit() {
        let mut deck = Deck::shuffled_with_seed(9);
        let indicator = deck.choose_trump().unwrap();
        assert_eq!(deck.choose_trump(), Err(DeckError::TrumpAlreadyChosen));
        assert_eq!(deck.trump(), Some(indicator.suit));
    }

    #[test]
    fn no_trump_before_designation() {
        let deck = Deck::standard();
        assert_eq!(deck.trump(), None);
        assert_eq!(deck.trump_indicator(), None);
    }
}
