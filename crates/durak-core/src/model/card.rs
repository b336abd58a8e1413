use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

/// A single playing card. Trump status is never stored on the card; it is
/// derived from the game's trump suit, so a card dealt before the trump is
/// designated needs no retroactive marking.
///
/// The derived `Ord` (suit, then rank) is a canonical identity order used for
/// set storage and display sorting only. The game order is [`Card::beats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    pub fn is_trump(self, trump: Suit) -> bool {
        self.suit == trump
    }

    /// The strict partial game order: `self` beats `other` when both share a
    /// suit and `self` outranks it, or when `self` is trump and `other` is
    /// not. Cards of two different non-trump suits beat neither way.
    pub fn beats(self, other: Card, trump: Suit) -> bool {
        if self.suit == other.suit {
            self.rank > other.rank
        } else {
            self.is_trump(trump)
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, Rank, Suit};

    const TRUMP: Suit = Suit::Hearts;

    #[test]
    fn higher_rank_beats_within_suit() {
        let nine = Card::new(Rank::Nine, Suit::Clubs);
        let six = Card::new(Rank::Six, Suit::Clubs);
        assert!(nine.beats(six, TRUMP));
        assert!(!six.beats(nine, TRUMP));
    }

    #[test]
    fn trump_beats_any_non_trump() {
        let low_trump = Card::new(Rank::Six, Suit::Hearts);
        let ace_clubs = Card::new(Rank::Ace, Suit::Clubs);
        assert!(low_trump.beats(ace_clubs, TRUMP));
        assert!(!ace_clubs.beats(low_trump, TRUMP));
    }

    #[test]
    fn different_non_trump_suits_are_incomparable() {
        let spade = Card::new(Rank::Ace, Suit::Spades);
        let club = Card::new(Rank::Six, Suit::Clubs);
        assert!(!spade.beats(club, TRUMP));
        assert!(!club.beats(spade, TRUMP));
    }

    #[test]
    fn trump_ranks_compare_among_themselves() {
        let king = Card::new(Rank::King, Suit::Hearts);
        let jack = Card::new(Rank::Jack, Suit::Hearts);
        assert!(king.beats(jack, TRUMP));
        assert!(!jack.beats(king, TRUMP));
    }

    #[test]
    fn a_card_never_beats_itself() {
        let card = Card::new(Rank::Ten, Suit::Diamonds);
        assert!(!card.beats(card, TRUMP));
    }

    #[test]
    fn display_concatenates_rank_and_suit() {
        assert_eq!(Card::new(Rank::Queen, Suit::Spades).to_string(), "QS");
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_string(), "10H");
    }
}
