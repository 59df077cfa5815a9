//! # dubito
//!
//! A simulation engine for Dubito, a multiplayer bluffing card game, built
//! for studying and comparing play strategies.
//!
//! ## Rules in brief
//!
//! The deck holds four copies of each rank `1..deck_size`. The player
//! opening a round calls a rank and puts cards face down; each following
//! player either plays more cards, claiming they match, or doubts the
//! previous play. A doubt reveals the last play: whoever was wrong picks up
//! the whole board. Four of a kind are discarded from any hand. Players who
//! get rid of every card leave the table as winners; the game ends when a
//! configured number of players remain.
//!
//! ## Modules
//!
//! - `core`: Cards, hands, players, moves, table state, RNG, configuration
//! - `rules`: Doubt adjudication and the turn resolution engine
//! - `strategy`: The `Strategy` trait and rule-based baselines
//! - `record`: Per-decision records labelled with the game's outcome
//! - `experiment`: Seeded bulk runs over scoped threads
//! - `error`: Error taxonomy
//!
//! ## Example
//!
//! ```
//! use dubito::{run_game, GameConfig, Player, PlayerId};
//! use dubito::strategy::{AlwaysTruthful, NoDoubt, RandomStrategy};
//!
//! let players = vec![
//!     Player::new(PlayerId::new(0), AlwaysTruthful::new()),
//!     Player::new(PlayerId::new(1), NoDoubt::new()),
//!     Player::new(PlayerId::new(2), RandomStrategy::new()),
//! ];
//! let config = GameConfig::new().with_seed(7).with_max_turns(50_000);
//! let report = run_game(config, players).unwrap();
//! assert_eq!(report.seating.len(), 3);
//! ```

pub mod core;
pub mod error;
pub mod experiment;
pub mod record;
pub mod rules;
pub mod strategy;

// Re-export commonly used types
pub use crate::core::{
    Board, Card, GameConfig, GameRng, GameRngState, GameState, Hand, Move, NeighborStats, Player,
    PlayerId, PlayerMap, PlayerStats, TurnSnapshot,
};

pub use crate::error::{ConfigError, ConstraintViolation, GameError, HandError, IllegalMove};

pub use crate::rules::{
    judge, judge_board, run_game, Game, GameReport, Outcome, Phase, TurnAction, TurnEvent, Verdict,
};

pub use crate::record::{DecisionLog, DecisionRecord};

pub use crate::strategy::Strategy;

pub use crate::experiment::{run_experiment, ExperimentConfig, ExperimentSummary, StrategyTally};
