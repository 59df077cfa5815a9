//! Cards and the deck.
//!
//! A card carries nothing but its rank. Every rank in `1..deck_size` appears
//! exactly four times, so the default deck size of 14 yields the familiar
//! 52 cards with ranks 1 through 13.

use serde::{Deserialize, Serialize};

/// Number of copies of each rank in a deck.
pub const COPIES_PER_RANK: usize = 4;

/// A card, identified only by its rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card(pub u8);

impl Card {
    /// Create a card of the given rank.
    #[must_use]
    pub const fn new(rank: u8) -> Self {
        Self(rank)
    }

    /// Get the raw rank.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.0
    }

    /// Check whether this rank exists in a deck of `deck_size`.
    #[must_use]
    pub fn is_valid_for(self, deck_size: u8) -> bool {
        self.0 >= 1 && self.0 < deck_size
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// All ranks present in a deck of `deck_size`, ascending.
pub fn ranks(deck_size: u8) -> impl Iterator<Item = Card> {
    (1..deck_size).map(Card)
}

/// Build an unshuffled deck: every rank in `1..deck_size`, four copies each.
///
/// ```
/// use dubito::core::{full_deck, Card};
///
/// let deck = full_deck(5);
/// assert_eq!(deck.len(), 16);
/// assert_eq!(deck.iter().filter(|&&c| c == Card(3)).count(), 4);
/// ```
#[must_use]
pub fn full_deck(deck_size: u8) -> Vec<Card> {
    let mut deck = Vec::with_capacity(usize::from(deck_size.saturating_sub(1)) * COPIES_PER_RANK);
    for _ in 0..COPIES_PER_RANK {
        deck.extend(ranks(deck_size));
    }
    deck
}

/// Total cards in a fresh deck of `deck_size`.
#[must_use]
pub fn deck_card_count(deck_size: u8) -> usize {
    usize::from(deck_size.saturating_sub(1)) * COPIES_PER_RANK
}
