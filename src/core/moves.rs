//! Moves: the output of a decision policy.
//!
//! A move is either a doubt of the previous play or a play of cards. The
//! opening play of a round also calls the rank that later plays claim to
//! match. Whether the played cards actually match is not checked; bluffing
//! is the point of the game.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::Card;

/// Cards committed in one play. Plays are almost always 1-4 cards.
pub type PlayedCards = SmallVec<[Card; 4]>;

/// A decision returned by a strategy.
///
/// ```
/// use dubito::core::{Card, Move};
///
/// let open = Move::open(Card(7), [Card(7), Card(7)]);
/// assert_eq!(open.called_rank(), Some(Card(7)));
/// assert_eq!(open.cards().len(), 2);
///
/// assert!(Move::Doubt.is_doubt());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Move {
    /// Challenge the previous player's latest play.
    Doubt,
    /// Put cards face down on the board.
    Play {
        cards: PlayedCards,
        /// Required on the opening play of a round, ignored otherwise.
        called_rank: Option<Card>,
    },
}

impl Move {
    /// Open a round by calling `rank` and playing `cards`.
    pub fn open(rank: Card, cards: impl IntoIterator<Item = Card>) -> Self {
        Move::Play {
            cards: cards.into_iter().collect(),
            called_rank: Some(rank),
        }
    }

    /// Play onto a round already in progress.
    pub fn follow(cards: impl IntoIterator<Item = Card>) -> Self {
        Move::Play {
            cards: cards.into_iter().collect(),
            called_rank: None,
        }
    }

    #[must_use]
    pub fn is_doubt(&self) -> bool {
        matches!(self, Move::Doubt)
    }

    /// Cards played. Empty for a doubt.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        match self {
            Move::Doubt => &[],
            Move::Play { cards, .. } => cards,
        }
    }

    #[must_use]
    pub fn called_rank(&self) -> Option<Card> {
        match self {
            Move::Doubt => None,
            Move::Play { called_rank, .. } => *called_rank,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Doubt => write!(f, "doubt"),
            Move::Play {
                cards,
                called_rank: Some(rank),
            } => write!(f, "call {rank} and play {} card(s)", cards.len()),
            Move::Play { cards, .. } => write!(f, "play {} card(s)", cards.len()),
        }
    }
}
