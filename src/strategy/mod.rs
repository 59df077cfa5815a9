//! Decision policies.
//!
//! A [`Strategy`] sees the [`TurnSnapshot`] and its own hand and returns a
//! [`Move`]. It never mutates game state: the engine validates the move and
//! applies it.
//!
//! ## Baselines
//!
//! | Name | Opening | Following |
//! |------|---------|-----------|
//! | `AlwaysTruthful` | most common rank | called rank if held, else doubt |
//! | `NoDoubt` | most common rank | called rank if held, else bluff |
//! | `AlwaysDoubt` | bluff or truthful | doubt |
//! | `JustPutCards` | bluff | bluff |
//! | `RandomStrategy` | bluff or truthful | any available tactic |
//!
//! Except for `RandomStrategy`, each baseline occasionally deviates from its
//! preferred tactic (see [`tactics::UNCERTAINTY`]).

pub mod baseline;
pub mod scripted;
pub mod tactics;

pub use baseline::{AlwaysDoubt, AlwaysTruthful, JustPutCards, NoDoubt, RandomStrategy};
pub use scripted::Scripted;
pub use tactics::Tactics;

use crate::core::{GameRng, Hand, Move, TurnSnapshot};

/// A decision policy for one seat.
pub trait Strategy: Send {
    /// Stable name used in reports and experiment tallies.
    fn name(&self) -> &'static str;

    /// Choose a move for the current turn.
    ///
    /// Doubting is illegal when `snapshot.is_first_hand()`; an opening play
    /// must carry a called rank. Played cards must come from `hand`.
    fn decide(&mut self, snapshot: &TurnSnapshot, hand: &Hand, rng: &mut GameRng) -> Move;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn decide(&mut self, snapshot: &TurnSnapshot, hand: &Hand, rng: &mut GameRng) -> Move {
        (**self).decide(snapshot, hand, rng)
    }
}

/// Names accepted by [`baseline_by_name`].
pub const BASELINE_NAMES: [&str; 5] = [
    "AlwaysTruthful",
    "NoDoubt",
    "AlwaysDoubt",
    "JustPutCards",
    "RandomStrategy",
];

/// Build a baseline strategy from its name.
pub fn baseline_by_name(name: &str) -> Option<Box<dyn Strategy>> {
    let strategy: Box<dyn Strategy> = match name {
        "AlwaysTruthful" => Box::new(AlwaysTruthful::new()),
        "NoDoubt" => Box::new(NoDoubt::new()),
        "AlwaysDoubt" => Box::new(AlwaysDoubt::new()),
        "JustPutCards" => Box::new(JustPutCards::new()),
        "RandomStrategy" => Box::new(RandomStrategy::new()),
        _ => return None,
    };
    Some(strategy)
}
