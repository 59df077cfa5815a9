//! Game configuration.
//!
//! A `GameConfig` fully determines a game together with its lineup: the
//! same config, seed and strategies replay the same game. Loading configs
//! from files is left to callers; the type is serde-ready for that.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Smallest supported deck size (ranks 1 and 2).
pub const MIN_DECK_SIZE: u8 = 3;
/// Largest supported deck size.
pub const MAX_DECK_SIZE: u8 = u8::MAX;
/// Fewest seats the game is defined for.
pub const MIN_PLAYERS: usize = 3;
/// Most seats the game is defined for.
pub const MAX_PLAYERS: usize = 8;
/// Deals are retried at most this many times to avoid a dealt four-of-a-kind.
pub const MAX_DEAL_ATTEMPTS: usize = 10_000;

/// Settings for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Ranks are `1..deck_size`, four copies each. 14 gives 52 cards.
    pub deck_size: u8,

    /// Shuffle the seating order before dealing.
    pub shuffle_seating: bool,

    /// The game ends once this many players are still holding cards.
    ///
    /// 1 plays down to a single loser; 2 stops with two players left.
    pub stop_at_players_remaining: usize,

    /// Seat index (after any shuffle) of the player who acts first.
    pub first_player: usize,

    /// Seed for seating, dealing and every strategy decision.
    pub seed: u64,

    /// Optional safety cap on decisions. Reaching it ends the game as
    /// inconclusive instead of finished. `None` plays until the end.
    pub max_turns: Option<u32>,

    /// Collect a [`DecisionRecord`](crate::record::DecisionRecord) per turn.
    pub record_decisions: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            deck_size: 14,
            shuffle_seating: true,
            stop_at_players_remaining: 1,
            first_player: 0,
            seed: 0,
            max_turns: None,
            record_decisions: true,
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deck_size(mut self, deck_size: u8) -> Self {
        self.deck_size = deck_size;
        self
    }

    pub fn with_shuffle_seating(mut self, shuffle: bool) -> Self {
        self.shuffle_seating = shuffle;
        self
    }

    pub fn with_stop_at(mut self, players_remaining: usize) -> Self {
        self.stop_at_players_remaining = players_remaining;
        self
    }

    pub fn with_first_player(mut self, seat: usize) -> Self {
        self.first_player = seat;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = Some(max_turns);
        self
    }

    pub fn with_record_decisions(mut self, record: bool) -> Self {
        self.record_decisions = record;
        self
    }

    /// Check the settings against a lineup of `player_count` players.
    pub fn validate(&self, player_count: usize) -> Result<(), ConfigError> {
        if self.deck_size < MIN_DECK_SIZE {
            return Err(ConfigError::DeckSize {
                deck_size: self.deck_size,
                min: MIN_DECK_SIZE,
                max: MAX_DECK_SIZE,
            });
        }

        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(ConfigError::PlayerCount {
                count: player_count,
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
            });
        }

        if !(1..=2).contains(&self.stop_at_players_remaining) {
            return Err(ConfigError::StopThreshold(self.stop_at_players_remaining));
        }

        if self.first_player >= player_count {
            return Err(ConfigError::FirstPlayer {
                seat: self.first_player,
                player_count,
            });
        }

        Ok(())
    }
}
