//! Rule-based baseline strategies.
//!
//! Simple, fixed personalities useful as opponents and for exercising the
//! engine. None of them look at neighbour statistics.

use crate::core::{GameRng, Hand, Move, TurnSnapshot};

use super::tactics::Tactics;
use super::Strategy;

/// Plays truthfully whenever possible and doubts otherwise.
#[derive(Clone, Debug, Default)]
pub struct AlwaysTruthful;

impl AlwaysTruthful {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for AlwaysTruthful {
    fn name(&self) -> &'static str {
        "AlwaysTruthful"
    }

    fn decide(&mut self, snapshot: &TurnSnapshot, hand: &Hand, rng: &mut GameRng) -> Move {
        let mut t = Tactics::new(snapshot, hand, rng);
        if t.is_first_hand() || t.can_play_truthfully() {
            t.play_truthfully(true, true)
        } else {
            t.doubt(true)
        }
    }
}

/// Almost never doubts: plays the called rank if held, bluffs otherwise.
#[derive(Clone, Debug, Default)]
pub struct NoDoubt;

impl NoDoubt {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for NoDoubt {
    fn name(&self) -> &'static str {
        "NoDoubt"
    }

    fn decide(&mut self, snapshot: &TurnSnapshot, hand: &Hand, rng: &mut GameRng) -> Move {
        let mut t = Tactics::new(snapshot, hand, rng);
        if t.is_first_hand() || t.can_play_truthfully() {
            t.play_truthfully(true, true)
        } else {
            t.bluff(false, true)
        }
    }
}

/// Doubts at every opportunity.
#[derive(Clone, Debug, Default)]
pub struct AlwaysDoubt;

impl AlwaysDoubt {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for AlwaysDoubt {
    fn name(&self) -> &'static str {
        "AlwaysDoubt"
    }

    fn decide(&mut self, snapshot: &TurnSnapshot, hand: &Hand, rng: &mut GameRng) -> Move {
        let mut t = Tactics::new(snapshot, hand, rng);
        if !t.is_first_hand() {
            return t.doubt(true);
        }
        if t.coin() {
            t.bluff(true, false)
        } else {
            t.play_truthfully(true, false)
        }
    }
}

/// Dumps as many cards as a bluff allows, every turn.
#[derive(Clone, Debug, Default)]
pub struct JustPutCards;

impl JustPutCards {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for JustPutCards {
    fn name(&self) -> &'static str {
        "JustPutCards"
    }

    fn decide(&mut self, snapshot: &TurnSnapshot, hand: &Hand, rng: &mut GameRng) -> Move {
        Tactics::new(snapshot, hand, rng).bluff(true, true)
    }
}

/// Picks uniformly among whatever tactics are available.
#[derive(Clone, Debug, Default)]
pub struct RandomStrategy;

impl RandomStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &'static str {
        "RandomStrategy"
    }

    fn decide(&mut self, snapshot: &TurnSnapshot, hand: &Hand, rng: &mut GameRng) -> Move {
        let mut t = Tactics::new(snapshot, hand, rng);
        if t.is_first_hand() {
            return if t.coin() {
                t.bluff(false, false)
            } else {
                t.play_truthfully(false, false)
            };
        }

        if t.can_play_truthfully() {
            match t.pick(3) {
                0 => t.bluff(false, false),
                1 => t.play_truthfully(false, false),
                _ => t.doubt(false),
            }
        } else if t.coin() {
            t.doubt(false)
        } else {
            t.bluff(false, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, NeighborStats, PlayerId, PlayerStats};

    fn snapshot(called: Option<u8>) -> TurnSnapshot {
        let neighbor = NeighborStats::new(PlayerId::new(0), 4, &PlayerStats::default());
        TurnSnapshot {
            board_card_count: if called.is_some() { 3 } else { 0 },
            available_ranks: (1..14).map(Card).collect(),
            called_rank: called.map(Card),
            last_play_count: if called.is_some() { 1 } else { 0 },
            streak: if called.is_some() { 2 } else { 0 },
            prev: neighbor,
            next: neighbor,
        }
    }

    fn hand(ranks: &[u8]) -> Hand {
        Hand::new(ranks.iter().copied().map(Card).collect())
    }

    fn all() -> Vec<Box<dyn Strategy>> {
        vec![
            Box::new(AlwaysTruthful::new()),
            Box::new(NoDoubt::new()),
            Box::new(AlwaysDoubt::new()),
            Box::new(JustPutCards::new()),
            Box::new(RandomStrategy::new()),
        ]
    }

    #[test]
    fn test_no_baseline_doubts_on_first_hand() {
        let snap = snapshot(None);
        let h = hand(&[1, 2, 2, 5, 7, 7, 7]);

        for mut strategy in all() {
            for seed in 0..100 {
                let mut rng = GameRng::new(seed);
                let m = strategy.decide(&snap, &h, &mut rng);
                assert!(!m.is_doubt(), "{} doubted on first hand", strategy.name());
                assert!(m.called_rank().is_some());
                assert!(h.contains_all(m.cards()));
            }
        }
    }

    #[test]
    fn test_plays_only_held_cards() {
        let snap = snapshot(Some(3));
        let h = hand(&[1, 3, 9, 9]);

        for mut strategy in all() {
            for seed in 0..100 {
                let mut rng = GameRng::new(seed);
                let m = strategy.decide(&snap, &h, &mut rng);
                assert!(h.contains_all(m.cards()), "{} played unheld cards", strategy.name());
                if !m.is_doubt() {
                    assert!(!m.cards().is_empty());
                }
            }
        }
    }

    #[test]
    fn test_always_truthful_follows_with_called_rank() {
        let snap = snapshot(Some(9));
        let h = hand(&[1, 9, 9]);
        let mut doubts = 0;
        for seed in 0..100 {
            let mut rng = GameRng::new(seed);
            let m = AlwaysTruthful::new().decide(&snap, &h, &mut rng);
            if m == Move::follow([Card(9), Card(9)]) {
                continue;
            }
            doubts += 1;
        }
        // Only the small uncertainty escape deviates
        assert!(doubts < 25);
    }

    #[test]
    fn test_always_doubt_doubts() {
        let snap = snapshot(Some(4));
        let h = hand(&[1, 2]);
        let doubted = (0..100)
            .filter(|&seed| {
                let mut rng = GameRng::new(seed);
                AlwaysDoubt::new().decide(&snap, &h, &mut rng).is_doubt()
            })
            .count();
        assert!(doubted > 75);
    }
}
