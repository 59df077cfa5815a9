//! Per-player behaviour counters.
//!
//! Counters are written only by the engine once a turn's outcome is known
//! and are read by strategies through the turn snapshot.

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PlayerMap};

/// What the table has observed about one player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Turns played.
    pub turns: u32,
    /// Turns played that were not the opening play of a round.
    pub not_first_turns: u32,
    /// Times this player doubted someone.
    pub doubts: u32,
    /// Times this player was doubted and had told the truth.
    pub honest_times: u32,
    /// Times this player was doubted and caught bluffing.
    pub dishonest_times: u32,
}

impl PlayerStats {
    /// Times this player has been doubted.
    #[must_use]
    pub fn times_doubted(&self) -> u32 {
        self.honest_times + self.dishonest_times
    }
}

/// Counters for every player in one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsTracker {
    stats: PlayerMap<PlayerStats>,
}

impl StatsTracker {
    pub fn new(player_count: usize) -> Self {
        Self {
            stats: PlayerMap::with_default(player_count),
        }
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &PlayerStats {
        &self.stats[player]
    }

    pub fn record_turn(&mut self, player: PlayerId, first_hand: bool) {
        let s = &mut self.stats[player];
        s.turns += 1;
        if !first_hand {
            s.not_first_turns += 1;
        }
    }

    pub fn record_doubt(&mut self, player: PlayerId) {
        self.stats[player].doubts += 1;
    }

    pub fn record_honest(&mut self, player: PlayerId) {
        self.stats[player].honest_times += 1;
    }

    pub fn record_dishonest(&mut self, player: PlayerId) {
        self.stats[player].dishonest_times += 1;
    }

    /// Consume the tracker, keeping the final counters.
    #[must_use]
    pub fn into_inner(self) -> PlayerMap<PlayerStats> {
        self.stats
    }
}
