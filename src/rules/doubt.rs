//! Doubt resolution.
//!
//! A doubt challenges only the latest play. The doubted player was honest
//! iff every card of that play matches the called rank; earlier plays in
//! the round do not matter.

use serde::{Deserialize, Serialize};

use crate::core::{Board, Card};

/// Outcome of a doubt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The doubted player told the truth; the doubter takes the board.
    Honest,
    /// The doubted player bluffed; they take the board.
    Dishonest,
}

impl Verdict {
    #[must_use]
    pub fn is_honest(self) -> bool {
        self == Verdict::Honest
    }
}

/// Classify a play against the called rank.
///
/// ```
/// use dubito::core::Card;
/// use dubito::rules::{judge, Verdict};
///
/// assert_eq!(judge(&[Card(2), Card(2)], Card(2)), Verdict::Honest);
/// assert_eq!(judge(&[Card(2), Card(3)], Card(2)), Verdict::Dishonest);
/// ```
#[must_use]
pub fn judge(latest_play: &[Card], called_rank: Card) -> Verdict {
    if latest_play.iter().all(|&c| c == called_rank) {
        Verdict::Honest
    } else {
        Verdict::Dishonest
    }
}

/// Judge the board's latest play. `None` if no round is in progress.
#[must_use]
pub fn judge_board(board: &Board) -> Option<Verdict> {
    board
        .called_rank()
        .map(|rank| judge(board.latest_play(), rank))
}
