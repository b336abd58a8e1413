use crate::model::card::Card;
use crate::model::moves::{CardSet, MoveSet};
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::vec::Vec;

/// A player's cards. Kept sorted by suit then rank for display; the sort order
/// carries no game meaning. The 36-card deal guarantees no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        hand
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
        self.sort();
    }

    pub fn add_all<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        self.cards.extend(cards);
        self.sort();
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Cards of the hand grouped by rank.
    pub fn rank_groups(&self) -> BTreeMap<Rank, Vec<Card>> {
        let mut groups: BTreeMap<Rank, Vec<Card>> = BTreeMap::new();
        for card in &self.cards {
            groups.entry(card.rank).or_default().push(*card);
        }
        groups
    }

    /// Every legal attack move: a non-empty single-rank subset of the hand, no
    /// larger than `card_limit`. A rank is eligible when `playable_ranks`
    /// contains it, or on the opening attack (`playable_ranks` empty) where any
    /// rank may open. `card_limit == 0` yields no moves at all.
    pub fn attack_moves(&self, playable_ranks: &BTreeSet<Rank>, card_limit: usize) -> MoveSet {
        let mut moves = MoveSet::new();
        if card_limit == 0 {
            return moves;
        }
        for (rank, group) in self.rank_groups() {
            if !playable_ranks.is_empty() && !playable_ranks.contains(&rank) {
                continue;
            }
            // A rank group holds at most 4 cards, one per suit.
            for mask in 1u32..(1u32 << group.len()) {
                if mask.count_ones() as usize > card_limit {
                    continue;
                }
                let subset: CardSet = group
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << *i) != 0)
                    .map(|(_, card)| *card)
                    .collect();
                moves.insert(subset);
            }
        }
        moves
    }

    /// The beating set for one incoming card: every hand card that beats it
    /// under the given trump suit.
    pub fn beating_cards(&self, incoming: Card, trump: Suit) -> Vec<Card> {
        self.cards
            .iter()
            .copied()
            .filter(|card| card.beats(incoming, trump))
            .collect()
    }

    /// Every complete defense: each solution is the set of hand cards that
    /// covers all `attacking` cards bijectively, every cover individually
    /// beating its incoming card. An empty result means the defender has no
    /// legal defense and must surrender. Distinct pairings that spend the same
    /// cards collapse into one solution, since a move is a card set.
    pub fn defense_moves(&self, attacking: &[Card], trump: Suit) -> MoveSet {
        let mut solutions = MoveSet::new();
        if attacking.is_empty() {
            return solutions;
        }
        self.cover_remaining(attacking, &CardSet::new(), trump, &mut solutions);
        solutions
    }

    /// Backtracking step. `used` is the immutable partial solution; each level
    /// covers the incoming card with the fewest remaining candidates, which
    /// prunes dead branches early without changing the solution set.
    fn cover_remaining(
        &self,
        remaining: &[Card],
        used: &CardSet,
        trump: Suit,
        solutions: &mut MoveSet,
    ) {
        let tightest = remaining
            .iter()
            .enumerate()
            .map(|(i, &incoming)| {
                let candidates: Vec<Card> = self
                    .cards
                    .iter()
                    .copied()
                    .filter(|card| !used.contains(card) && card.beats(incoming, trump))
                    .collect();
                (i, candidates)
            })
            .min_by_key(|(_, candidates)| candidates.len());

        let Some((index, candidates)) = tightest else {
            // Every incoming card is covered.
            solutions.insert(used.clone());
            return;
        };
        if candidates.is_empty() {
            return;
        }

        let rest: Vec<Card> = remaining
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, card)| *card)
            .collect();
        for candidate in candidates {
            let mut next = used.clone();
            next.insert(candidate);
            self.cover_remaining(&rest, &next, trump, solutions);
        }
    }

    /// Placeholder for the reflection house rule (countering an attack with a
    /// matching rank instead of defending). The rule is not part of this
    /// ruleset; `None` signals the capability is unsupported.
    pub fn reflection_moves(&self, _attacking: &[Card]) -> Option<MoveSet> {
        None
    }

    fn sort(&mut self) {
        self.cards
            .sort_by(|a, b| a.suit.cmp(&b.suit).then(a.rank.cmp(&b.rank)));
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::card::Card;
    use crate::model::moves::CardSet;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;
    use std::collections::BTreeSet;

    const TRUMP: Suit = Suit::Hearts;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn set(cards: &[Card]) -> CardSet {
        cards.iter().copied().collect()
    }

    #[test]
    fn add_and_remove_cards() {
        let mut hand = Hand::new();
        let nine = card(Rank::Nine, Suit::Clubs);
        hand.add(nine);
        assert!(hand.contains(nine));
        assert!(hand.remove(nine));
        assert!(!hand.contains(nine));
        assert!(!hand.remove(nine));
    }

    #[test]
    fn cards_are_sorted_by_suit_then_rank() {
        let mut hand = Hand::new();
        hand.add(card(Rank::King, Suit::Spades));
        hand.add(card(Rank::Six, Suit::Clubs));
        hand.add(card(Rank::Ace, Suit::Clubs));
        let ordered: Vec<_> = hand.iter().copied().collect();
        assert_eq!(ordered[0], card(Rank::Six, Suit::Clubs));
        assert_eq!(ordered[1], card(Rank::Ace, Suit::Clubs));
        assert_eq!(ordered[2], card(Rank::King, Suit::Spades));
    }

    #[test]
    fn rank_groups_collect_same_rank_cards() {
        let hand = Hand::with_cards(vec![
            card(Rank::Nine, Suit::Clubs),
            card(Rank::Nine, Suit::Spades),
            card(Rank::Queen, Suit::Diamonds),
        ]);
        let groups = hand.rank_groups();
        assert_eq!(groups[&Rank::Nine].len(), 2);
        assert_eq!(groups[&Rank::Queen].len(), 1);
    }

    #[test]
    fn opening_attack_offers_single_rank_subsets_only() {
        let nine_c = card(Rank::Nine, Suit::Clubs);
        let nine_s = card(Rank::Nine, Suit::Spades);
        let queen = card(Rank::Queen, Suit::Diamonds);
        let hand = Hand::with_cards(vec![nine_c, nine_s, queen]);

        let moves = hand.attack_moves(&BTreeSet::new(), 6);
        assert_eq!(moves.len(), 4);
        assert!(moves.contains(&set(&[nine_c])));
        assert!(moves.contains(&set(&[nine_s])));
        assert!(moves.contains(&set(&[queen])));
        assert!(moves.contains(&set(&[nine_c, nine_s])));
        assert!(!moves.contains(&set(&[nine_c, queen])));
    }

    #[test]
    fn continuation_attack_restricted_to_playable_ranks() {
        let nine = card(Rank::Nine, Suit::Clubs);
        let queen = card(Rank::Queen, Suit::Diamonds);
        let hand = Hand::with_cards(vec![nine, queen]);

        let playable: BTreeSet<Rank> = [Rank::Nine].into_iter().collect();
        let moves = hand.attack_moves(&playable, 6);
        assert_eq!(moves.len(), 1);
        assert!(moves.contains(&set(&[nine])));
    }

    #[test]
    fn attack_moves_respect_card_limit() {
        let hand = Hand::with_cards(vec![
            card(Rank::Nine, Suit::Clubs),
            card(Rank::Nine, Suit::Spades),
            card(Rank::Nine, Suit::Diamonds),
        ]);
        let moves = hand.attack_moves(&BTreeSet::new(), 1);
        assert_eq!(moves.len(), 3);
        assert!(moves.iter().all(|m| m.len() == 1));
    }

    #[test]
    fn zero_card_limit_yields_no_moves() {
        let hand = Hand::with_cards(vec![card(Rank::Nine, Suit::Clubs)]);
        assert!(hand.attack_moves(&BTreeSet::new(), 0).is_empty());
    }

    #[test]
    fn attack_moves_never_mix_ranks() {
        let hand = Hand::with_cards(vec![
            card(Rank::Six, Suit::Clubs),
            card(Rank::Six, Suit::Spades),
            card(Rank::Ten, Suit::Clubs),
            card(Rank::Ten, Suit::Hearts),
        ]);
        for mv in hand.attack_moves(&BTreeSet::new(), 6) {
            let ranks: BTreeSet<Rank> = mv.iter().map(|c| c.rank).collect();
            assert_eq!(ranks.len(), 1, "move {mv:?} spans multiple ranks");
        }
    }

    #[test]
    fn beating_cards_include_suit_and_trump_covers() {
        let seven_d = card(Rank::Seven, Suit::Diamonds);
        let jack_h = card(Rank::Jack, Suit::Hearts);
        let hand = Hand::with_cards(vec![seven_d, jack_h]);
        let beating = hand.beating_cards(card(Rank::Six, Suit::Diamonds), TRUMP);
        assert_eq!(beating.len(), 2);
    }

    #[test]
    fn defense_against_one_card_lists_each_cover_separately() {
        let seven_d = card(Rank::Seven, Suit::Diamonds);
        let jack_h = card(Rank::Jack, Suit::Hearts);
        let hand = Hand::with_cards(vec![seven_d, jack_h]);

        let solutions = hand.defense_moves(&[card(Rank::Six, Suit::Diamonds)], TRUMP);
        assert_eq!(solutions.len(), 2);
        assert!(solutions.contains(&set(&[seven_d])));
        assert!(solutions.contains(&set(&[jack_h])));
    }

    #[test]
    fn partial_cover_is_not_a_defense() {
        // 9D covers 6D but nothing in hand touches 6S: no complete assignment.
        let hand = Hand::with_cards(vec![card(Rank::Nine, Suit::Diamonds)]);
        let incoming = [card(Rank::Six, Suit::Diamonds), card(Rank::Six, Suit::Spades)];
        assert!(hand.defense_moves(&incoming, TRUMP).is_empty());
    }

    #[test]
    fn defense_never_spends_a_card_twice() {
        // One jack of hearts cannot cover both sixes; the ten of spades must
        // take its own suit, freeing the trump for the diamond.
        let ten_s = card(Rank::Ten, Suit::Spades);
        let jack_h = card(Rank::Jack, Suit::Hearts);
        let hand = Hand::with_cards(vec![ten_s, jack_h]);
        let incoming = [card(Rank::Six, Suit::Spades), card(Rank::Six, Suit::Diamonds)];

        let solutions = hand.defense_moves(&incoming, TRUMP);
        assert_eq!(solutions.len(), 1);
        assert!(solutions.contains(&set(&[ten_s, jack_h])));
    }

    #[test]
    fn defense_solutions_replay_as_bijective_covers() {
        let hand = Hand::with_cards(vec![
            card(Rank::Eight, Suit::Clubs),
            card(Rank::Ten, Suit::Clubs),
            card(Rank::Seven, Suit::Hearts),
        ]);
        let incoming = [card(Rank::Six, Suit::Clubs), card(Rank::Nine, Suit::Clubs)];

        let solutions = hand.defense_moves(&incoming, TRUMP);
        assert!(!solutions.is_empty());
        for solution in &solutions {
            assert_eq!(solution.len(), incoming.len());
            assert!(solution.iter().all(|c| hand.contains(*c)));
            // A perfect matching exists inside the chosen set itself.
            let mut available: Vec<Card> = solution.iter().copied().collect();
            for &attack in &incoming {
                let pos = available.iter().position(|c| c.beats(attack, TRUMP));
                assert!(pos.is_some(), "{attack} left uncovered by {solution:?}");
                available.remove(pos.unwrap());
            }
        }
    }

    #[test]
    fn defense_search_finds_the_forced_matching() {
        // 8C beats only 6C; 10C beats both. The only complete cover spends
        // both clubs, and the search must not burn 10C on 6C first and stall.
        let eight = card(Rank::Eight, Suit::Clubs);
        let ten = card(Rank::Ten, Suit::Clubs);
        let hand = Hand::with_cards(vec![eight, ten]);
        let incoming = [card(Rank::Six, Suit::Clubs), card(Rank::Nine, Suit::Clubs)];

        let solutions = hand.defense_moves(&incoming, TRUMP);
        assert_eq!(solutions.len(), 1);
        assert!(solutions.contains(&set(&[eight, ten])));
    }

    #[test]
    fn reflection_is_unsupported() {
        let hand = Hand::with_cards(vec![card(Rank::Six, Suit::Clubs)]);
        assert!(hand.reflection_moves(&[card(Rank::Six, Suit::Spades)]).is_none());
    }
}
