//! Player identification, per-player storage, and seated players.
//!
//! ## PlayerId
//!
//! Registration index of a player, independent of where they sit.
//!
//! ## PlayerMap
//!
//! Dense per-player storage backed by `Vec` for O(1) access.
//!
//! ## Player
//!
//! A hand plus the strategy that plays it.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::card::Card;
use super::hand::Hand;
use super::moves::Move;
use super::rng::GameRng;
use super::snapshot::TurnSnapshot;
use crate::strategy::Strategy;

/// Player identifier.
///
/// Ids are 0-based registration indices: the first player handed to the
/// engine is `PlayerId(0)`, whatever seat it ends up in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access, indexed by `PlayerId`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> FromIterator<T> for PlayerMap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let data: Vec<T> = iter.into_iter().collect();
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// A participant: an owned hand and the strategy that decides its moves.
///
/// The engine only ever sees the [`Move`] a strategy returns; it never looks
/// inside the strategy.
pub struct Player {
    id: PlayerId,
    hand: Hand,
    strategy: Box<dyn Strategy>,
}

impl Player {
    pub fn new(id: PlayerId, strategy: impl Strategy + 'static) -> Self {
        Self::boxed(id, Box::new(strategy))
    }

    pub fn boxed(id: PlayerId, strategy: Box<dyn Strategy>) -> Self {
        Self {
            id,
            hand: Hand::default(),
            strategy,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub(crate) fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    /// Name of the strategy driving this player.
    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Empty the hand.
    pub fn reset(&mut self) {
        self.hand.clear();
    }

    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.hand.add(cards);
    }

    /// Remove every four-of-a-kind, returning the discarded ranks.
    pub fn discard_cards(&mut self) -> Vec<Card> {
        self.hand.discard_sets()
    }

    #[must_use]
    pub fn has_no_cards(&self) -> bool {
        self.hand.is_empty()
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.hand.len()
    }

    /// Ask the strategy for a move. The hand is lent read-only.
    pub fn decide(&mut self, snapshot: &TurnSnapshot, rng: &mut GameRng) -> Move {
        self.strategy.decide(snapshot, &self.hand, rng)
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("id", &self.id)
            .field("strategy", &self.strategy.name())
            .field("hand", &self.hand)
            .finish()
    }
}
