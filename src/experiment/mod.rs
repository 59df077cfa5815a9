//! Running many games and comparing strategies.
//!
//! ```rust,ignore
//! use dubito::experiment::{run_experiment, ExperimentConfig};
//!
//! let config = ExperimentConfig::new().with_games(1_000).with_threads(8);
//! let summary = run_experiment(&config, |_, _| lineup());
//! for (name, tally) in &summary.per_strategy {
//!     println!("{name}: {:.3}", tally.win_rate());
//! }
//! ```

pub mod runner;

pub use runner::{
    play_one, run_experiment, ExperimentConfig, ExperimentSummary, StrategyTally, DEFAULT_TURN_CAP,
};
