//! What a finished game hands back to its caller.

use serde::{Deserialize, Serialize};

use crate::core::{Card, PlayerId, PlayerMap, PlayerStats};
use crate::record::DecisionLog;

use super::doubt::Verdict;

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The remaining-player threshold was reached.
    Finished,
    /// The configured turn cap was hit first.
    Inconclusive,
}

/// What happened on one turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnAction {
    Played {
        cards: usize,
        /// Set when the play opened a round.
        called_rank: Option<Card>,
    },
    Doubted {
        doubted: PlayerId,
        verdict: Verdict,
        /// Who picked up the board.
        receiver: PlayerId,
        cards: usize,
    },
}

/// Result of a single [`Game::step`](super::Game::step).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEvent {
    pub turn: u32,
    pub player: PlayerId,
    pub action: TurnAction,
    /// Ranks discarded this turn and by whom.
    pub discards: Vec<(PlayerId, Card)>,
    /// Players who emptied their hand this turn, in finishing order.
    pub new_winners: Vec<PlayerId>,
}

/// Summary of a completed game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameReport {
    pub outcome: Outcome,
    /// In finishing order.
    pub winners: Vec<PlayerId>,
    /// Players still holding cards at the end, in seating order.
    pub losers: Vec<PlayerId>,
    pub seating: Vec<PlayerId>,
    pub turns: u32,
    pub seed: u64,
    pub stats: PlayerMap<PlayerStats>,
    /// Cards left in each player's hand.
    pub hand_sizes: PlayerMap<usize>,
    /// Strategy name of each player.
    pub strategies: PlayerMap<String>,
    /// Labelled decisions; empty when recording is off.
    pub decisions: DecisionLog,
}

impl GameReport {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winners.contains(&player)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.outcome == Outcome::Finished
    }
}
