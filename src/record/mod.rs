//! Decision stream for dataset export.
//!
//! The engine appends one [`DecisionRecord`] per turn when
//! `GameConfig::record_decisions` is set and labels them with the final
//! outcome. Writing them to CSV or JSON is left to the caller; every type
//! here is serde-serializable.

pub mod decision;

pub use decision::{DecisionLog, DecisionRecord};
