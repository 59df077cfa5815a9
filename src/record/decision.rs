//! Per-decision records for offline analysis.
//!
//! A record captures what the acting player knew (its hand and the turn
//! snapshot) and what it decided. The `won` label is unknown while the game
//! is running and is filled in for every record once the winners are known.

use serde::{Deserialize, Serialize};

use crate::core::{Card, Move, PlayerId, TurnSnapshot};

/// One decision point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// Decision counter at the time of the move (1-based).
    pub turn: u32,

    /// The player who decided.
    pub player: PlayerId,

    /// The player's hand before deciding.
    pub hand: Vec<Card>,

    /// What the player was shown.
    pub snapshot: TurnSnapshot,

    /// What the player chose.
    pub decision: Move,

    /// Whether the player ended up among the winners. `None` until labelled.
    pub won: Option<bool>,
}

/// Every decision of one game, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionLog {
    records: Vec<DecisionRecord>,
}

impl DecisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: DecisionRecord) {
        self.records.push(record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[DecisionRecord] {
        &self.records
    }

    /// Decisions made by one player.
    pub fn player_records(&self, player: PlayerId) -> impl Iterator<Item = &DecisionRecord> {
        self.records.iter().filter(move |r| r.player == player)
    }

    /// Fill in the outcome label of every record.
    pub fn label_outcome(&mut self, winners: &[PlayerId]) {
        for record in &mut self.records {
            record.won = Some(winners.contains(&record.player));
        }
    }

    /// True once every record carries an outcome label.
    #[must_use]
    pub fn is_labelled(&self) -> bool {
        self.records.iter().all(|r| r.won.is_some())
    }

    #[must_use]
    pub fn into_records(self) -> Vec<DecisionRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NeighborStats;
    use crate::core::PlayerStats;

    fn record(turn: u32, player: u8) -> DecisionRecord {
        let neighbor = NeighborStats::new(PlayerId::new(9), 3, &PlayerStats::default());
        DecisionRecord {
            turn,
            player: PlayerId::new(player),
            hand: vec![Card(1), Card(4)],
            snapshot: TurnSnapshot {
                board_card_count: 0,
                available_ranks: vec![Card(1), Card(4)],
                called_rank: None,
                last_play_count: 0,
                streak: 0,
                prev: neighbor,
                next: neighbor,
            },
            decision: Move::open(Card(4), [Card(4)]),
            won: None,
        }
    }

    #[test]
    fn test_label_outcome() {
        let mut log = DecisionLog::new();
        log.push(record(1, 0));
        log.push(record(2, 1));
        log.push(record(3, 0));
        assert!(!log.is_labelled());

        log.label_outcome(&[PlayerId::new(1)]);

        assert!(log.is_labelled());
        assert!(log.player_records(PlayerId::new(0)).all(|r| r.won == Some(false)));
        assert_eq!(log.records()[1].won, Some(true));
    }

    #[test]
    fn test_into_records_keeps_order() {
        let mut log = DecisionLog::new();
        for turn in 1..=3 {
            log.push(record(turn, 0));
        }

        let turns: Vec<u32> = log.into_records().into_iter().map(|r| r.turn).collect();
        assert_eq!(turns, vec![1, 2, 3]);
    }

    #[test]
    fn test_record_serde() {
        let original = record(4, 2);
        let json = serde_json::to_string(&original).unwrap();
        let back: DecisionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }
}
