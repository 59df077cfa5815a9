//! Read-only view of the table handed to a strategy each turn.

use serde::{Deserialize, Serialize};

use super::card::Card;
use super::player::PlayerId;
use super::stats::PlayerStats;

/// Public information about a neighbouring player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborStats {
    pub id: PlayerId,
    /// Cards currently in the neighbour's hand.
    pub cards: usize,
    pub turns: u32,
    pub not_first_turns: u32,
    pub doubts: u32,
    pub honest_times: u32,
    pub dishonest_times: u32,
}

impl NeighborStats {
    pub fn new(id: PlayerId, cards: usize, stats: &PlayerStats) -> Self {
        Self {
            id,
            cards,
            turns: stats.turns,
            not_first_turns: stats.not_first_turns,
            doubts: stats.doubts,
            honest_times: stats.honest_times,
            dishonest_times: stats.dishonest_times,
        }
    }
}

/// Everything a strategy may know about the table when it is asked to move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    /// Cards accumulated on the board this round.
    pub board_card_count: usize,
    /// Ranks not yet discarded from the game.
    pub available_ranks: Vec<Card>,
    /// The round's called rank, `None` when this turn opens a round.
    pub called_rank: Option<Card>,
    /// Cards placed by the immediately preceding play.
    pub last_play_count: usize,
    /// Plays made so far this round.
    pub streak: u32,
    pub prev: NeighborStats,
    pub next: NeighborStats,
}

impl TurnSnapshot {
    /// True when this turn opens a new round (doubting is illegal).
    #[must_use]
    pub fn is_first_hand(&self) -> bool {
        self.called_rank.is_none()
    }

    /// True when the previous play was the round's opening play.
    #[must_use]
    pub fn prev_opened_round(&self) -> bool {
        self.last_play_count > 0 && self.last_play_count == self.board_card_count
    }
}
