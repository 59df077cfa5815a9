//! A player's hand: a sorted multiset of cards.
//!
//! Hands are kept sorted by rank so that tie-breaks (e.g. in
//! [`Hand::pick_most`]) are deterministic for a given run.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, COPIES_PER_RANK};
use super::rng::GameRng;
use crate::error::HandError;

/// A multiset of cards owned by exactly one player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Create a hand from the given cards.
    #[must_use]
    pub fn new(mut cards: Vec<Card>) -> Self {
        cards.sort_unstable();
        Self { cards }
    }

    /// The cards in the hand, ascending by rank.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Check whether at least one card of `rank` is present.
    #[must_use]
    pub fn has(&self, rank: Card) -> bool {
        self.cards.binary_search(&rank).is_ok()
    }

    /// Number of cards of `rank`.
    #[must_use]
    pub fn count(&self, rank: Card) -> usize {
        self.cards.iter().filter(|&&c| c == rank).count()
    }

    /// Rank to multiplicity mapping.
    #[must_use]
    pub fn count_all(&self) -> FxHashMap<Card, usize> {
        let mut counts = FxHashMap::default();
        for &card in &self.cards {
            *counts.entry(card).or_insert(0) += 1;
        }
        counts
    }

    /// Check whether every card has the same rank. True for an empty hand.
    #[must_use]
    pub fn all_equal(&self) -> bool {
        self.cards.windows(2).all(|w| w[0] == w[1])
    }

    /// Check whether the hand contains every card of `cards` (as a multiset).
    #[must_use]
    pub fn contains_all(&self, cards: &[Card]) -> bool {
        let mut needed: FxHashMap<Card, usize> = FxHashMap::default();
        for &card in cards {
            *needed.entry(card).or_insert(0) += 1;
        }
        needed.into_iter().all(|(rank, n)| self.count(rank) >= n)
    }

    /// Check whether any rank reaches the discard threshold.
    #[must_use]
    pub fn has_set_of(&self, threshold: usize) -> bool {
        self.count_all().values().any(|&n| n >= threshold)
    }

    /// Remove exactly `count` cards of `rank`.
    pub fn pick(&mut self, rank: Card, count: usize) -> Result<Vec<Card>, HandError> {
        let available = self.count(rank);
        if available < count {
            return Err(HandError::NotEnoughCards {
                rank,
                requested: count,
                available,
            });
        }

        let mut remaining = count;
        self.cards.retain(|&c| {
            if c == rank && remaining > 0 {
                remaining -= 1;
                false
            } else {
                true
            }
        });
        Ok(vec![rank; count])
    }

    /// Remove every card of `rank`. Returns an empty vec if there are none.
    pub fn pick_all(&mut self, rank: Card) -> Vec<Card> {
        let before = self.cards.len();
        self.cards.retain(|&c| c != rank);
        vec![rank; before - self.cards.len()]
    }

    /// Remove `min(amount, len)` cards chosen uniformly at random from
    /// distinct hand slots.
    pub fn pick_random(&mut self, amount: usize, rng: &mut GameRng) -> Vec<Card> {
        let mut indices = rng.sample_indices(self.cards.len(), amount);
        let picked: Vec<Card> = indices.iter().map(|&i| self.cards[i]).collect();

        // Remove from the back so earlier indices stay valid
        indices.sort_unstable_by(|a, b| b.cmp(a));
        for i in indices {
            self.cards.remove(i);
        }
        picked
    }

    /// Remove every card of the most common rank.
    ///
    /// Ties go to the lowest rank. Returns an empty vec for an empty hand.
    pub fn pick_most(&mut self) -> Vec<Card> {
        match self.most_common() {
            Some(rank) => self.pick_all(rank),
            None => Vec::new(),
        }
    }

    /// The most common rank, lowest rank first on ties.
    #[must_use]
    pub fn most_common(&self) -> Option<Card> {
        let mut best: Option<(Card, usize)> = None;
        let mut start = 0;
        while start < self.cards.len() {
            let rank = self.cards[start];
            let run = self.cards[start..].iter().take_while(|&&c| c == rank).count();
            if best.map_or(true, |(_, n)| run > n) {
                best = Some((rank, run));
            }
            start += run;
        }
        best.map(|(rank, _)| rank)
    }

    /// Merge cards into the hand.
    pub fn add(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
        self.cards.sort_unstable();
    }

    /// Remove the exact multiset `cards`, failing without change if any is missing.
    pub fn remove_cards(&mut self, cards: &[Card]) -> Result<(), HandError> {
        if !self.contains_all(cards) {
            return Err(HandError::MissingCards {
                cards: cards.to_vec(),
            });
        }
        for &card in cards {
            if let Ok(i) = self.cards.binary_search(&card) {
                self.cards.remove(i);
            }
        }
        Ok(())
    }

    /// Remove every rank held `threshold` or more times.
    ///
    /// Returns each removed rank once, ascending.
    pub fn discard(&mut self, threshold: usize) -> Vec<Card> {
        let mut removed: Vec<Card> = self
            .count_all()
            .into_iter()
            .filter(|&(_, n)| n >= threshold)
            .map(|(rank, _)| rank)
            .collect();
        removed.sort_unstable();

        if !removed.is_empty() {
            self.cards.retain(|c| removed.binary_search(c).is_err());
        }
        removed
    }

    /// Discard with the standard four-of-a-kind threshold.
    pub fn discard_sets(&mut self) -> Vec<Card> {
        self.discard(COPIES_PER_RANK)
    }

    /// Empty the hand.
    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{card}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(ranks: &[u8]) -> Hand {
        Hand::new(ranks.iter().copied().map(Card).collect())
    }

    #[test]
    fn test_new_sorts() {
        let h = hand(&[5, 1, 3, 1]);
        assert_eq!(h.cards(), &[Card(1), Card(1), Card(3), Card(5)]);
        assert_eq!(h.to_string(), "[1, 1, 3, 5]");
    }

    #[test]
    fn test_pick_exact_count() {
        let mut h = hand(&[2, 2, 2, 4]);
        let picked = h.pick(Card(2), 2).unwrap();
        assert_eq!(picked, vec![Card(2), Card(2)]);
        assert_eq!(h.cards(), &[Card(2), Card(4)]);
    }

    #[test]
    fn test_pick_too_many_fails_without_change() {
        let mut h = hand(&[2, 4, 4]);
        let err = h.pick(Card(2), 2).unwrap_err();
        assert_eq!(
            err,
            HandError::NotEnoughCards {
                rank: Card(2),
                requested: 2,
                available: 1
            }
        );
        assert_eq!(h.len(), 3);
    }

    #[test]
    fn test_pick_all() {
        let mut h = hand(&[1, 3, 3, 3]);
        assert_eq!(h.pick_all(Card(3)), vec![Card(3); 3]);
        assert_eq!(h.cards(), &[Card(1)]);
        assert!(h.pick_all(Card(9)).is_empty());
    }

    #[test]
    fn test_pick_random_removes_picked_cards() {
        let mut rng = GameRng::new(3);
        let mut h = hand(&[1, 2, 2, 3, 4, 5]);
        let before = h.clone();

        let picked = h.pick_random(3, &mut rng);
        assert_eq!(picked.len(), 3);
        assert_eq!(h.len(), 3);

        let mut rebuilt = h.clone();
        rebuilt.add(picked);
        assert_eq!(rebuilt, before);
    }

    #[test]
    fn test_pick_random_clamps_to_hand_size() {
        let mut rng = GameRng::new(3);
        let mut h = hand(&[6, 7]);
        assert_eq!(h.pick_random(3, &mut rng).len(), 2);
        assert!(h.is_empty());
        assert!(h.pick_random(1, &mut rng).is_empty());
    }

    #[test]
    fn test_pick_most_breaks_ties_on_lowest_rank() {
        let mut h = hand(&[5, 5, 2, 2, 9]);
        assert_eq!(h.pick_most(), vec![Card(2), Card(2)]);

        let mut h = hand(&[1, 7, 7, 7]);
        assert_eq!(h.pick_most(), vec![Card(7); 3]);

        assert!(Hand::default().pick_most().is_empty());
    }

    #[test]
    fn test_discard_removes_sets() {
        let mut h = hand(&[3, 3, 3, 3, 1, 8, 8, 8, 8, 8]);
        let removed = h.discard(4);
        assert_eq!(removed, vec![Card(3), Card(8)]);
        assert_eq!(h.cards(), &[Card(1)]);

        assert!(h.discard_sets().is_empty());
    }

    #[test]
    fn test_remove_cards_multiset() {
        let mut h = hand(&[1, 2, 2, 3]);
        assert!(h.remove_cards(&[Card(2), Card(2), Card(2)]).is_err());
        assert_eq!(h.len(), 4);

        h.remove_cards(&[Card(2), Card(3)]).unwrap();
        assert_eq!(h.cards(), &[Card(1), Card(2)]);
    }

    #[test]
    fn test_counts() {
        let h = hand(&[4, 4, 6]);
        assert_eq!(h.count(Card(4)), 2);
        assert_eq!(h.count_all().get(&Card(6)), Some(&1));
        assert!(h.has(Card(6)));
        assert!(!h.has(Card(5)));
        assert!(!h.all_equal());
        assert!(hand(&[2, 2]).all_equal());
        assert!(Hand::default().all_equal());
    }
}
