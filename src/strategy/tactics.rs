//! Building blocks shared by the baseline strategies.
//!
//! Each tactic works on a scratch copy of the hand: the chosen cards end up
//! in the returned [`Move`] and the real hand is only touched by the engine.
//!
//! The `uncertain` flag gives a tactic a small chance of switching to a
//! different tactic instead, so that no baseline is perfectly predictable
//! and two stubborn strategies cannot lock each other into a loop.

use crate::core::{GameRng, Hand, Move, TurnSnapshot};

/// Chance an uncertain tactic switches to another one.
pub const UNCERTAINTY: f64 = 0.05;

/// Most cards a bluff puts down.
pub const MAX_BLUFF: usize = 3;

/// Everything a tactic needs for one decision.
pub struct Tactics<'a> {
    snapshot: &'a TurnSnapshot,
    hand: &'a Hand,
    rng: &'a mut GameRng,
}

impl<'a> Tactics<'a> {
    pub fn new(snapshot: &'a TurnSnapshot, hand: &'a Hand, rng: &'a mut GameRng) -> Self {
        Self { snapshot, hand, rng }
    }

    #[must_use]
    pub fn is_first_hand(&self) -> bool {
        self.snapshot.is_first_hand()
    }

    /// True if the hand holds at least one card of the called rank.
    #[must_use]
    pub fn can_play_truthfully(&self) -> bool {
        self.snapshot.called_rank.is_some_and(|rank| self.hand.has(rank))
    }

    /// Fair coin flip.
    pub fn coin(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    /// Uniform choice among `options` alternatives.
    pub fn pick(&mut self, options: usize) -> usize {
        self.rng.gen_range_usize(0..options)
    }

    fn switches(&mut self, uncertain: bool) -> bool {
        uncertain && self.rng.gen_bool(UNCERTAINTY)
    }

    /// Play cards that match the (called or about to be called) rank.
    ///
    /// Opening a round: `maximize` plays the most common rank in full,
    /// otherwise one random card. Following: `maximize` plays every card of
    /// the called rank, otherwise a random non-zero number of them.
    pub fn play_truthfully(&mut self, maximize: bool, uncertain: bool) -> Move {
        if self.switches(uncertain) {
            return if self.is_first_hand() || self.coin() {
                self.bluff(maximize, false)
            } else {
                self.doubt(false)
            };
        }

        let mut scratch = self.hand.clone();
        match self.snapshot.called_rank {
            None => {
                let cards = if maximize {
                    scratch.pick_most()
                } else {
                    scratch.pick_random(1, self.rng)
                };
                match cards.first() {
                    Some(&rank) => Move::open(rank, cards),
                    None => Move::follow(cards),
                }
            }
            Some(rank) => {
                let held = scratch.count(rank);
                if held == 0 {
                    return self.bluff(maximize, false);
                }
                let cards = if maximize {
                    scratch.pick_all(rank)
                } else {
                    let amount = self.rng.gen_range_usize(1..held + 1);
                    vec![rank; amount]
                };
                Move::follow(cards)
            }
        }
    }

    /// Play random cards regardless of the called rank.
    ///
    /// Opening a round calls a random rank still in circulation.
    pub fn bluff(&mut self, maximize: bool, uncertain: bool) -> Move {
        if self.switches(uncertain) {
            return if self.is_first_hand() {
                self.play_truthfully(maximize, false)
            } else {
                self.doubt(false)
            };
        }

        let amount = if maximize {
            MAX_BLUFF
        } else {
            self.rng.gen_range_usize(1..MAX_BLUFF + 1)
        };
        let mut scratch = self.hand.clone();
        let cards = scratch.pick_random(amount, self.rng);

        if self.is_first_hand() {
            let called = self
                .rng
                .choose(&self.snapshot.available_ranks)
                .copied()
                .or_else(|| cards.first().copied());
            match called {
                Some(rank) => Move::open(rank, cards),
                None => Move::follow(cards),
            }
        } else {
            Move::follow(cards)
        }
    }

    /// Doubt the previous play.
    ///
    /// Never doubts on the first hand of a round, where it is illegal; it
    /// opens the round truthfully instead.
    pub fn doubt(&mut self, uncertain: bool) -> Move {
        if self.is_first_hand() {
            return self.play_truthfully(true, false);
        }

        if self.switches(uncertain) {
            if self.can_play_truthfully() && self.coin() {
                return self.play_truthfully(false, false);
            }
            return self.bluff(false, false);
        }

        Move::Doubt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, NeighborStats, PlayerId, PlayerStats};

    fn snapshot(called: Option<u8>) -> TurnSnapshot {
        let neighbor = NeighborStats::new(PlayerId::new(1), 5, &PlayerStats::default());
        TurnSnapshot {
            board_card_count: usize::from(called.is_some()) * 2,
            available_ranks: (1..14).map(Card).collect(),
            called_rank: called.map(Card),
            last_play_count: usize::from(called.is_some()) * 2,
            streak: u32::from(called.is_some()),
            prev: neighbor,
            next: neighbor,
        }
    }

    fn hand(ranks: &[u8]) -> Hand {
        Hand::new(ranks.iter().copied().map(Card).collect())
    }

    #[test]
    fn test_truthful_open_plays_most_common_rank() {
        let snap = snapshot(None);
        let h = hand(&[1, 6, 6, 6, 9]);
        let mut rng = GameRng::new(1);

        let m = Tactics::new(&snap, &h, &mut rng).play_truthfully(true, false);
        assert_eq!(m, Move::open(Card(6), [Card(6), Card(6), Card(6)]));
        // The real hand is untouched
        assert_eq!(h.len(), 5);
    }

    #[test]
    fn test_truthful_follow_only_plays_called_rank() {
        let snap = snapshot(Some(4));
        let h = hand(&[4, 4, 7]);

        for seed in 0..20 {
            let mut rng = GameRng::new(seed);
            let m = Tactics::new(&snap, &h, &mut rng).play_truthfully(false, false);
            assert!(!m.cards().is_empty());
            assert!(m.cards().iter().all(|&c| c == Card(4)));
            assert_eq!(m.called_rank(), None);
        }
    }

    #[test]
    fn test_bluff_cards_come_from_hand() {
        let snap = snapshot(None);
        let h = hand(&[2, 3, 5, 8, 8]);

        for seed in 0..20 {
            let mut rng = GameRng::new(seed);
            let m = Tactics::new(&snap, &h, &mut rng).bluff(false, false);
            assert!((1..=MAX_BLUFF).contains(&m.cards().len()));
            assert!(h.contains_all(m.cards()));
            assert!(m.called_rank().is_some());
        }
    }

    #[test]
    fn test_doubt_never_on_first_hand() {
        let snap = snapshot(None);
        let h = hand(&[2, 3]);

        for seed in 0..50 {
            let mut rng = GameRng::new(seed);
            assert!(!Tactics::new(&snap, &h, &mut rng).doubt(true).is_doubt());
        }
    }

    #[test]
    fn test_certain_doubt() {
        let snap = snapshot(Some(2));
        let h = hand(&[2, 3]);
        let mut rng = GameRng::new(0);
        assert_eq!(Tactics::new(&snap, &h, &mut rng).doubt(false), Move::Doubt);
    }
}
