//! Core types: cards, hands, players, moves, table state, RNG, configuration.
//!
//! Nothing in here knows how a turn is resolved; that lives in
//! [`rules`](crate::rules). These are the pieces the engine moves around.

pub mod card;
pub mod hand;
pub mod player;
pub mod rng;
pub mod config;
pub mod moves;
pub mod snapshot;
pub mod stats;
pub mod state;

pub use card::{deck_card_count, full_deck, ranks, Card, COPIES_PER_RANK};
pub use hand::Hand;
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use config::GameConfig;
pub use moves::{Move, PlayedCards};
pub use snapshot::{NeighborStats, TurnSnapshot};
pub use stats::{PlayerStats, StatsTracker};
pub use state::{Board, GameState, PlayersState, Seats, Turn};
