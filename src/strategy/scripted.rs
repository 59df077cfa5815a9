//! Replays a fixed sequence of moves.

use std::collections::VecDeque;

use crate::core::{GameRng, Hand, Move, TurnSnapshot};

use super::Strategy;

/// Plays the queued moves in order, without checking them.
///
/// Once the queue runs dry it falls back to the simplest legal move: open
/// with the most common rank, or doubt.
#[derive(Clone, Debug, Default)]
pub struct Scripted {
    moves: VecDeque<Move>,
}

impl Scripted {
    pub fn new(moves: impl IntoIterator<Item = Move>) -> Self {
        Self {
            moves: moves.into_iter().collect(),
        }
    }

    /// Moves not yet played.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

impl Strategy for Scripted {
    fn name(&self) -> &'static str {
        "Scripted"
    }

    fn decide(&mut self, snapshot: &TurnSnapshot, hand: &Hand, _rng: &mut GameRng) -> Move {
        if let Some(next) = self.moves.pop_front() {
            return next;
        }

        if !snapshot.is_first_hand() {
            return Move::Doubt;
        }
        let cards = hand.clone().pick_most();
        match cards.first() {
            Some(&rank) => Move::open(rank, cards),
            None => Move::Doubt,
        }
    }
}
