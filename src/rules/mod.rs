//! Game rules: doubt resolution and the turn engine.
//!
//! Strategies decide; the engine in here validates and applies. It never
//! looks at how a strategy reached its decision, only at the [`Move`]
//! returned.
//!
//! [`Move`]: crate::core::Move

pub mod doubt;
pub mod engine;
pub mod report;

pub use doubt::{judge, judge_board, Verdict};
pub use engine::{run_game, Game, Phase};
pub use report::{GameReport, Outcome, TurnAction, TurnEvent};
