//! The turn resolution engine.
//!
//! One [`Game`] drives one table from the deal to the end:
//!
//! ```text
//! Dealing -> RoundActive <-> RoundResolving -> RoundActive | GameOver
//! ```
//!
//! Each [`Game::step`] asks the acting player's strategy for a move, applies
//! it, runs the discard pass over every remaining hand, moves any player who
//! has emptied their hand to the winners, and verifies card accounting.
//!
//! ## Turn order
//!
//! Turns rotate through the players still holding cards. A doubt that
//! catches a bluff gives the doubter the next turn as well, opening a fresh
//! round; every other outcome passes the turn on.
//!
//! ## Winning
//!
//! A player's last play can still be doubted, so emptying a hand is not a
//! win by itself. After a play, the previous player wins if their hand is
//! empty: their claim stood. After a doubt, the party who did not pick up
//! the board is checked, and so is the receiver, whose pickup may have been
//! discarded away entirely.

use tracing::{debug, info, trace};

use crate::core::config::MAX_DEAL_ATTEMPTS;
use crate::core::{
    deck_card_count, full_deck, Card, GameConfig, GameRng, GameRngState, GameState, Hand, Move,
    NeighborStats, Player, PlayerId, PlayerMap, Seats, StatsTracker, TurnSnapshot,
    COPIES_PER_RANK,
};
use crate::error::{ConfigError, ConstraintViolation, GameError, IllegalMove};
use crate::record::{DecisionLog, DecisionRecord};

use super::doubt::{judge_board, Verdict};
use super::report::{GameReport, Outcome, TurnAction, TurnEvent};

/// Where the game is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Cards are being dealt.
    Dealing,
    /// Waiting for the next decision.
    RoundActive,
    /// A doubt is being settled.
    ///
    /// Only held inside [`Game::step`] while the board changes hands; a
    /// caller between steps never sees it.
    RoundResolving,
    /// No further turns.
    GameOver,
}

/// A single game of Dubito.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    players: Vec<Player>,
    state: GameState,
    stats: StatsTracker,
    rng: GameRng,
    decisions: DecisionLog,
    phase: Phase,
    outcome: Option<Outcome>,
    /// Set when a successful doubt lets the doubter act again.
    repeat_turn: bool,
}

impl Game {
    /// Seat the players (shuffled if configured) and deal.
    ///
    /// Players must carry ids `0..n` in order. The deal is repeated until no
    /// hand holds four of a kind.
    pub fn new(config: GameConfig, players: Vec<Player>) -> Result<Self, GameError> {
        check_lineup(&config, &players)?;

        let mut rng = GameRng::new(config.seed);
        let mut seating: Vec<PlayerId> = PlayerId::all(players.len()).collect();
        if config.shuffle_seating {
            rng.shuffle(&mut seating);
        }

        let mut game = Self::assemble(config, players, seating, rng);
        game.deal()?;
        Ok(game)
    }

    /// Start from a prepared deal: `hands[i]` goes to `PlayerId(i)` and
    /// players sit in id order.
    ///
    /// The hands together must form exactly one full deck with no
    /// four-of-a-kind in any hand.
    pub fn from_deal(
        config: GameConfig,
        players: Vec<Player>,
        hands: Vec<Vec<Card>>,
    ) -> Result<Self, GameError> {
        check_lineup(&config, &players)?;

        if hands.len() != players.len() {
            return Err(ConfigError::InvalidDeal(format!(
                "{} hands for {} players",
                hands.len(),
                players.len()
            ))
            .into());
        }

        let mut dealt: Vec<Card> = hands.iter().flatten().copied().collect();
        let mut deck = full_deck(config.deck_size);
        dealt.sort_unstable();
        deck.sort_unstable();
        if dealt != deck {
            return Err(ConfigError::InvalidDeal(format!(
                "hands do not form a full deck of size {}",
                config.deck_size
            ))
            .into());
        }

        let seating = PlayerId::all(players.len()).collect();
        let rng = GameRng::new(config.seed);
        let mut game = Self::assemble(config, players, seating, rng);

        for (player, cards) in game.players.iter_mut().zip(hands) {
            player.reset();
            player.add_cards(cards);
            if player.hand().has_set_of(COPIES_PER_RANK) {
                return Err(ConfigError::InvalidDeal(format!(
                    "{} was dealt four of a kind",
                    player.id()
                ))
                .into());
            }
        }

        game.phase = Phase::RoundActive;
        game.log_start();
        Ok(game)
    }

    fn assemble(config: GameConfig, players: Vec<Player>, seating: Vec<PlayerId>, rng: GameRng) -> Self {
        let player_count = players.len();
        let state = GameState::new(config.deck_size, seating, config.first_player);
        Self {
            config,
            players,
            state,
            stats: StatsTracker::new(player_count),
            rng,
            decisions: DecisionLog::new(),
            phase: Phase::Dealing,
            outcome: None,
            repeat_turn: false,
        }
    }

    /// Deal round-robin in seating order, re-dealing while any hand holds
    /// four of a kind.
    fn deal(&mut self) -> Result<(), GameError> {
        let seating = self.state.players.seating().to_vec();

        for attempt in 1..=MAX_DEAL_ATTEMPTS {
            for player in &mut self.players {
                player.reset();
            }

            let mut deck = full_deck(self.config.deck_size);
            self.rng.shuffle(&mut deck);
            for (i, card) in deck.into_iter().enumerate() {
                let id = seating[i % seating.len()];
                self.players[id.index()].add_cards([card]);
            }

            if !self
                .players
                .iter()
                .any(|p| p.hand().has_set_of(COPIES_PER_RANK))
            {
                trace!(attempt, "deal accepted");
                self.phase = Phase::RoundActive;
                self.log_start();
                return Ok(());
            }
        }

        Err(ConfigError::DealDidNotConverge {
            attempts: MAX_DEAL_ATTEMPTS,
        }
        .into())
    }

    fn log_start(&self) {
        info!(
            seed = self.config.seed,
            players = self.players.len(),
            deck_size = self.config.deck_size,
            seating = ?self.state.players.seating(),
            "game start"
        );
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    #[must_use]
    pub fn hand(&self, id: PlayerId) -> &Hand {
        self.players[id.index()].hand()
    }

    #[must_use]
    pub fn decisions(&self) -> &DecisionLog {
        &self.decisions
    }

    /// RNG position, for replaying from this point.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Cards currently in hands plus on the board.
    #[must_use]
    pub fn cards_in_play(&self) -> usize {
        self.players.iter().map(Player::card_count).sum::<usize>() + self.state.board.card_count()
    }

    /// Cards that should be in play given what has been discarded.
    #[must_use]
    pub fn expected_cards_in_play(&self) -> usize {
        deck_card_count(self.config.deck_size) - self.state.discarded().len() * COPIES_PER_RANK
    }

    // === Turn loop ===

    /// Play the game to the end.
    pub fn run(mut self) -> Result<GameReport, GameError> {
        let span = tracing::info_span!("game", seed = self.config.seed);
        let _guard = span.enter();

        while !self.is_over() {
            self.step()?;
        }
        Ok(self.into_report())
    }

    /// Execute exactly one decision.
    pub fn step(&mut self) -> Result<TurnEvent, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }

        let seats = if self.repeat_turn {
            self.repeat_turn = false;
            self.state.seats()
        } else {
            self.state.advance()
        };
        self.state.turn.counter += 1;
        let turn = self.state.turn.counter;
        let first_hand = self.state.board.is_first_hand();

        let snapshot = self.snapshot(seats);
        let actor = &mut self.players[seats.this.index()];
        let hand_before = self.config.record_decisions.then(|| actor.hand().cards().to_vec());
        let decision = actor.decide(&snapshot, &mut self.rng);

        debug!(turn, player = %seats.this, decision = %decision, "decision");

        let action = match &decision {
            Move::Doubt => self.resolve_doubt(seats)?,
            Move::Play { cards, called_rank } => self.apply_play(seats.this, cards, *called_rank)?,
        };
        self.stats.record_turn(seats.this, first_hand);

        if let Some(hand) = hand_before {
            self.decisions.push(DecisionRecord {
                turn,
                player: seats.this,
                hand,
                snapshot,
                decision,
                won: None,
            });
        }

        let discards = self.discard_pass();
        let new_winners = self.settle_winners(seats, &action);
        self.verify()?;
        self.check_end(turn);

        Ok(TurnEvent {
            turn,
            player: seats.this,
            action,
            discards,
            new_winners,
        })
    }

    fn snapshot(&self, seats: Seats) -> TurnSnapshot {
        let board = &self.state.board;
        let neighbor = |id: PlayerId| {
            NeighborStats::new(id, self.players[id.index()].card_count(), self.stats.get(id))
        };

        TurnSnapshot {
            board_card_count: board.card_count(),
            available_ranks: board.available_ranks().to_vec(),
            called_rank: board.called_rank(),
            last_play_count: board.latest_play().len(),
            streak: self.state.turn.streak,
            prev: neighbor(seats.prev),
            next: neighbor(seats.next),
        }
    }

    fn resolve_doubt(&mut self, seats: Seats) -> Result<TurnAction, GameError> {
        let Some(verdict) = judge_board(&self.state.board) else {
            return Err(GameError::IllegalMove {
                player: seats.this,
                reason: IllegalMove::DoubtOnFirstHand,
            });
        };

        self.phase = Phase::RoundResolving;
        self.stats.record_doubt(seats.this);

        let receiver = match verdict {
            Verdict::Honest => {
                self.stats.record_honest(seats.prev);
                seats.this
            }
            Verdict::Dishonest => {
                self.stats.record_dishonest(seats.prev);
                self.repeat_turn = true;
                seats.prev
            }
        };

        let pile = self.state.reset_board();
        let cards = pile.len();
        self.players[receiver.index()].add_cards(pile);
        self.phase = Phase::RoundActive;

        debug!(
            doubter = %seats.this,
            doubted = %seats.prev,
            ?verdict,
            receiver = %receiver,
            cards,
            "doubt resolved"
        );

        Ok(TurnAction::Doubted {
            doubted: seats.prev,
            verdict,
            receiver,
            cards,
        })
    }

    fn apply_play(
        &mut self,
        player: PlayerId,
        cards: &[Card],
        called_rank: Option<Card>,
    ) -> Result<TurnAction, GameError> {
        let illegal = |reason| GameError::IllegalMove { player, reason };

        if cards.is_empty() {
            return Err(illegal(IllegalMove::EmptyPlay));
        }

        let opening = self.state.board.is_first_hand();
        let called = if opening {
            let rank = called_rank.ok_or_else(|| illegal(IllegalMove::MissingCalledRank))?;
            if !rank.is_valid_for(self.config.deck_size) {
                return Err(illegal(IllegalMove::RankOutOfRange {
                    rank,
                    deck_size: self.config.deck_size,
                }));
            }
            Some(rank)
        } else {
            None
        };

        let hand = self.players[player.index()].hand_mut();
        if !hand.contains_all(cards) {
            return Err(illegal(IllegalMove::CardsNotInHand {
                cards: cards.to_vec(),
            }));
        }
        hand.remove_cards(cards)?;

        if let Some(rank) = called {
            self.state.board.open_round(rank);
        }
        self.state.board.place(cards);
        self.state.turn.streak += 1;

        Ok(TurnAction::Played {
            cards: cards.len(),
            called_rank: called,
        })
    }

    /// Remove every four-of-a-kind from every remaining hand.
    fn discard_pass(&mut self) -> Vec<(PlayerId, Card)> {
        let mut discards = Vec::new();
        let playing = self.state.players.playing().to_vec();

        for id in playing {
            let ranks = self.players[id.index()].discard_cards();
            if ranks.is_empty() {
                continue;
            }
            trace!(player = %id, ?ranks, "discard");
            self.state.record_discards(&ranks);
            discards.extend(ranks.into_iter().map(|rank| (id, rank)));
        }

        discards
    }

    fn settle_winners(&mut self, seats: Seats, action: &TurnAction) -> Vec<PlayerId> {
        let candidates = match action {
            TurnAction::Played { .. } => vec![seats.prev],
            TurnAction::Doubted { receiver, .. } => {
                let other = if *receiver == seats.this {
                    seats.prev
                } else {
                    seats.this
                };
                vec![other, *receiver]
            }
        };

        let mut winners = Vec::new();
        for id in candidates {
            if self.state.players.playing().len() <= self.config.stop_at_players_remaining {
                break;
            }
            if self.state.players.is_playing(id) && self.players[id.index()].has_no_cards() {
                self.state.retire(id);
                info!(
                    player = %id,
                    place = self.state.players.winners().len(),
                    remaining = self.state.players.playing().len(),
                    "player out of cards"
                );
                winners.push(id);
            }
        }
        winners
    }

    fn verify(&self) -> Result<(), ConstraintViolation> {
        self.state.board.check_accounting()?;

        let expected = self.expected_cards_in_play();
        let found = self.cards_in_play();
        if expected != found {
            return Err(ConstraintViolation::CardConservation { expected, found });
        }
        Ok(())
    }

    fn check_end(&mut self, turn: u32) {
        let remaining = self.state.players.playing().len();
        if remaining <= self.config.stop_at_players_remaining {
            self.finish(Outcome::Finished);
        } else if self.config.max_turns.is_some_and(|cap| turn >= cap) {
            self.finish(Outcome::Inconclusive);
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.phase = Phase::GameOver;
        self.outcome = Some(outcome);
        self.decisions.label_outcome(self.state.players.winners());
        info!(
            ?outcome,
            turns = self.state.turn.counter,
            winners = ?self.state.players.winners(),
            losers = ?self.state.players.playing(),
            "game over"
        );
    }

    /// Build the report. Meaningful once the game is over.
    #[must_use]
    pub fn into_report(self) -> GameReport {
        let players = &self.players;
        GameReport {
            outcome: self.outcome.unwrap_or(Outcome::Inconclusive),
            winners: self.state.players.winners().to_vec(),
            losers: self.state.players.playing().to_vec(),
            seating: self.state.players.seating().to_vec(),
            turns: self.state.turn.counter,
            seed: self.config.seed,
            stats: self.stats.into_inner(),
            hand_sizes: players.iter().map(Player::card_count).collect::<PlayerMap<_>>(),
            strategies: players
                .iter()
                .map(|p| p.strategy_name().to_string())
                .collect(),
            decisions: self.decisions,
        }
    }
}

fn check_lineup(config: &GameConfig, players: &[Player]) -> Result<(), ConfigError> {
    config.validate(players.len())?;
    if players
        .iter()
        .enumerate()
        .any(|(i, p)| p.id().index() != i)
    {
        return Err(ConfigError::PlayerIds {
            player_count: players.len(),
        });
    }
    Ok(())
}

/// Play one game with the given lineup.
///
/// `players[i]` must have id `PlayerId(i)`.
pub fn run_game(config: GameConfig, players: Vec<Player>) -> Result<GameReport, GameError> {
    Game::new(config, players)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{AlwaysTruthful, RandomStrategy, Scripted};

    fn scripted_lineup(scripts: Vec<Vec<Move>>) -> Vec<Player> {
        scripts
            .into_iter()
            .enumerate()
            .map(|(i, moves)| Player::new(PlayerId::new(i as u8), Scripted::new(moves)))
            .collect()
    }

    fn cards(ranks: &[u8]) -> Vec<Card> {
        ranks.iter().copied().map(Card).collect()
    }

    /// Deck size 5: ranks 1-4, 16 cards over three players.
    fn small_deal() -> Vec<Vec<Card>> {
        vec![
            cards(&[1, 2, 2, 3, 4, 4]),
            cards(&[1, 1, 2, 3, 3]),
            cards(&[1, 2, 3, 4, 4]),
        ]
    }

    fn small_config() -> GameConfig {
        GameConfig::new()
            .with_deck_size(5)
            .with_shuffle_seating(false)
            .with_seed(1)
    }

    #[test]
    fn test_new_deals_full_deck_without_sets() {
        let players = (0..4)
            .map(|i| Player::new(PlayerId::new(i), RandomStrategy::new()))
            .collect();
        let game = Game::new(GameConfig::new().with_seed(11), players).unwrap();

        assert_eq!(game.phase(), Phase::RoundActive);
        assert_eq!(game.cards_in_play(), 52);
        for id in PlayerId::all(4) {
            assert_eq!(game.hand(id).len(), 13);
            assert!(!game.hand(id).has_set_of(4));
        }
    }

    #[test]
    fn test_seating_shuffle_is_seeded() {
        let lineup = || {
            (0..6)
                .map(|i| Player::new(PlayerId::new(i), RandomStrategy::new()))
                .collect::<Vec<_>>()
        };
        let a = Game::new(GameConfig::new().with_seed(5), lineup()).unwrap();
        let b = Game::new(GameConfig::new().with_seed(5), lineup()).unwrap();

        assert_eq!(a.state().players.seating(), b.state().players.seating());
        for id in PlayerId::all(6) {
            assert_eq!(a.hand(id), b.hand(id));
        }
    }

    #[test]
    fn test_rejects_misnumbered_players() {
        let players = vec![
            Player::new(PlayerId::new(0), RandomStrategy::new()),
            Player::new(PlayerId::new(2), RandomStrategy::new()),
            Player::new(PlayerId::new(1), RandomStrategy::new()),
        ];
        let err = Game::new(GameConfig::new(), players).unwrap_err();
        assert_eq!(err, GameError::Config(ConfigError::PlayerIds { player_count: 3 }));
    }

    #[test]
    fn test_from_deal_rejects_incomplete_deck() {
        let mut hands = small_deal();
        hands[0].pop();
        let err = Game::from_deal(small_config(), scripted_lineup(vec![vec![]; 3]), hands)
            .unwrap_err();
        assert!(matches!(err, GameError::Config(ConfigError::InvalidDeal(_))));
    }

    #[test]
    fn test_from_deal_rejects_dealt_set() {
        let hands = vec![
            cards(&[2, 2, 2, 2, 4, 4]),
            cards(&[1, 1, 1, 3, 3]),
            cards(&[1, 3, 3, 4, 4]),
        ];
        let err = Game::from_deal(small_config(), scripted_lineup(vec![vec![]; 3]), hands)
            .unwrap_err();
        assert!(matches!(err, GameError::Config(ConfigError::InvalidDeal(_))));
    }

    #[test]
    fn test_opening_play_sets_called_rank() {
        let mut game = Game::from_deal(
            small_config(),
            scripted_lineup(vec![vec![Move::open(Card(2), cards(&[2, 2]))], vec![], vec![]]),
            small_deal(),
        )
        .unwrap();

        let event = game.step().unwrap();
        assert_eq!(event.player, PlayerId::new(0));
        assert_eq!(
            event.action,
            TurnAction::Played {
                cards: 2,
                called_rank: Some(Card(2))
            }
        );
        assert_eq!(game.state().board.called_rank(), Some(Card(2)));
        assert_eq!(game.state().turn.streak, 1);
        assert_eq!(game.hand(PlayerId::new(0)).len(), 4);
    }

    #[test]
    fn test_doubt_on_first_hand_is_illegal() {
        let mut game = Game::from_deal(
            small_config(),
            scripted_lineup(vec![vec![Move::Doubt], vec![], vec![]]),
            small_deal(),
        )
        .unwrap();

        let err = game.step().unwrap_err();
        assert_eq!(
            err,
            GameError::IllegalMove {
                player: PlayerId::new(0),
                reason: IllegalMove::DoubtOnFirstHand
            }
        );
    }

    #[test]
    fn test_opening_without_rank_is_illegal() {
        let mut game = Game::from_deal(
            small_config(),
            scripted_lineup(vec![vec![Move::follow(cards(&[2]))], vec![], vec![]]),
            small_deal(),
        )
        .unwrap();

        assert!(matches!(
            game.step(),
            Err(GameError::IllegalMove {
                reason: IllegalMove::MissingCalledRank,
                ..
            })
        ));
    }

    #[test]
    fn test_playing_cards_not_held_is_illegal() {
        let mut game = Game::from_deal(
            small_config(),
            scripted_lineup(vec![vec![Move::open(Card(3), cards(&[3, 3]))], vec![], vec![]]),
            small_deal(),
        )
        .unwrap();

        assert!(matches!(
            game.step(),
            Err(GameError::IllegalMove {
                reason: IllegalMove::CardsNotInHand { .. },
                ..
            })
        ));
        // Nothing was taken from the hand
        assert_eq!(game.hand(PlayerId::new(0)).len(), 6);
    }

    #[test]
    fn test_empty_play_and_bad_rank_are_illegal() {
        let mut game = Game::from_deal(
            small_config(),
            scripted_lineup(vec![vec![Move::open(Card(1), Vec::new())], vec![], vec![]]),
            small_deal(),
        )
        .unwrap();
        assert!(matches!(
            game.step(),
            Err(GameError::IllegalMove {
                reason: IllegalMove::EmptyPlay,
                ..
            })
        ));

        let mut game = Game::from_deal(
            small_config(),
            scripted_lineup(vec![vec![Move::open(Card(5), cards(&[1]))], vec![], vec![]]),
            small_deal(),
        )
        .unwrap();
        assert!(matches!(
            game.step(),
            Err(GameError::IllegalMove {
                reason: IllegalMove::RankOutOfRange { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_step_after_game_over_fails() {
        let players = (0..3)
            .map(|i| Player::new(PlayerId::new(i), AlwaysTruthful::new()))
            .collect();
        let mut game = Game::new(small_config().with_max_turns(1), players).unwrap();

        game.step().unwrap();
        assert!(game.is_over());
        assert_eq!(game.outcome(), Some(Outcome::Inconclusive));
        assert_eq!(game.step().unwrap_err(), GameError::GameOver);
    }

    #[test]
    fn test_phase_between_steps_is_round_active() {
        let mut game = Game::from_deal(
            small_config(),
            scripted_lineup(vec![vec![Move::open(Card(2), cards(&[2, 2]))], vec![Move::Doubt], vec![]]),
            small_deal(),
        )
        .unwrap();

        game.step().unwrap();
        let event = game.step().unwrap();
        assert!(matches!(event.action, TurnAction::Doubted { .. }));
        assert_eq!(game.phase(), Phase::RoundActive);
    }

    #[test]
    fn test_rng_state_resumes_stream() {
        let players = (0..4)
            .map(|i| Player::new(PlayerId::new(i), RandomStrategy::new()))
            .collect();
        let mut game = Game::new(GameConfig::new().with_seed(21), players).unwrap();
        for _ in 0..10 {
            game.step().unwrap();
        }

        let mut resumed = GameRng::from_state(&game.rng_state());
        for _ in 0..20 {
            assert_eq!(
                resumed.gen_range_usize(0..1_000),
                game.rng.gen_range_usize(0..1_000)
            );
        }
    }

    #[test]
    fn test_decisions_recorded_and_labelled() {
        let players = (0..4)
            .map(|i| Player::new(PlayerId::new(i), RandomStrategy::new()))
            .collect();
        let report = run_game(GameConfig::new().with_seed(3).with_max_turns(5_000), players).unwrap();

        assert_eq!(report.decisions.len() as u32, report.turns);
        assert!(report.decisions.is_labelled());
        for record in report.decisions.records() {
            assert_eq!(record.won, Some(report.is_winner(record.player)));
        }
    }

    #[test]
    fn test_recording_can_be_disabled() {
        let players = (0..3)
            .map(|i| Player::new(PlayerId::new(i), RandomStrategy::new()))
            .collect();
        let report = run_game(
            GameConfig::new()
                .with_seed(8)
                .with_record_decisions(false)
                .with_max_turns(5_000),
            players,
        )
        .unwrap();

        assert!(report.decisions.is_empty());
        assert!(report.turns > 0);
    }
}
