//! Bulk game runner.
//!
//! Games are independent: each one owns its players, state and RNG, so they
//! are spread over scoped threads with nothing shared but the read-only
//! config and lineup factory. Per-thread summaries are summed at the end,
//! which makes the result independent of the thread count.

use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn};

use crate::core::{GameConfig, GameRng, Player, PlayerId};
use crate::error::GameError;
use crate::rules::{Game, GameReport};

/// Decision cap applied to experiment games unless overridden.
pub const DEFAULT_TURN_CAP: u32 = 100_000;

/// Configuration for a batch of games.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Number of games to play.
    pub games: usize,

    /// Master seed. Every game gets its own seed forked from it.
    pub seed: u64,

    /// Worker threads. Clamped to at least 1 and at most `games`.
    pub threads: usize,

    /// Template for every game. Its `seed` is replaced per game.
    pub game: GameConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            games: 100,
            seed: 0,
            threads: 1,
            game: GameConfig::default()
                .with_max_turns(DEFAULT_TURN_CAP)
                .with_record_decisions(false),
        }
    }
}

impl ExperimentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    /// Seeds for every game, in game order.
    #[must_use]
    pub fn game_seeds(&self) -> Vec<u64> {
        let mut master = GameRng::new(self.seed);
        (0..self.games).map(|_| master.fork().seed()).collect()
    }
}

/// Results for one strategy, summed over every seat it occupied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyTally {
    /// Seats taken in finished games.
    pub games: u64,
    pub wins: u64,
    pub losses: u64,
    /// Cards still held by this strategy's losing seats.
    pub cards_left: u64,
}

impl StrategyTally {
    /// Fraction of seats that won, 0 when no games were played.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }

    fn merge(&mut self, other: &StrategyTally) {
        self.games += other.games;
        self.wins += other.wins;
        self.losses += other.losses;
        self.cards_left += other.cards_left;
    }
}

/// Aggregate over a batch of games.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentSummary {
    /// Games attempted.
    pub games: usize,
    /// Games aborted by an error.
    pub failed: usize,
    /// Games stopped by the turn cap.
    pub inconclusive: usize,
    /// Keyed by strategy name. Only finished games are tallied.
    pub per_strategy: BTreeMap<String, StrategyTally>,
}

impl ExperimentSummary {
    /// Games that reached a result.
    #[must_use]
    pub fn finished(&self) -> usize {
        self.games - self.failed - self.inconclusive
    }

    #[must_use]
    pub fn tally(&self, strategy: &str) -> Option<&StrategyTally> {
        self.per_strategy.get(strategy)
    }

    /// Fold one game's result in.
    pub fn record(&mut self, result: &Result<GameReport, GameError>) {
        self.games += 1;
        let report = match result {
            Ok(report) => report,
            Err(_) => {
                self.failed += 1;
                return;
            }
        };
        if !report.is_finished() {
            self.inconclusive += 1;
            return;
        }

        for (id, name) in report.strategies.iter() {
            let tally = self.per_strategy.entry(name.clone()).or_default();
            tally.games += 1;
            if report.is_winner(id) {
                tally.wins += 1;
            } else {
                tally.losses += 1;
                tally.cards_left += report.hand_sizes[id] as u64;
            }
        }
    }

    /// Count games that produced no result at all, such as a panicking
    /// strategy.
    pub fn record_aborted(&mut self, games: usize) {
        self.games += games;
        self.failed += games;
    }

    pub fn merge(&mut self, other: ExperimentSummary) {
        self.games += other.games;
        self.failed += other.failed;
        self.inconclusive += other.inconclusive;
        for (name, tally) in &other.per_strategy {
            self.per_strategy.entry(name.clone()).or_default().merge(tally);
        }
    }
}

/// Play one experiment game, logging it if it fails.
///
/// The lineup factory receives the game index and an RNG derived from the
/// game's seed, for lineups that randomise their composition.
pub fn play_one<F>(template: &GameConfig, index: usize, seed: u64, lineup: &F) -> Result<GameReport, GameError>
where
    F: Fn(usize, &mut GameRng) -> Vec<Player>,
{
    let config = template.clone().with_seed(seed);
    let mut lineup_rng = GameRng::new(seed).fork();
    let players = lineup(index, &mut lineup_rng);
    let names: Vec<&'static str> = players.iter().map(Player::strategy_name).collect();

    let game = match Game::new(config, players) {
        Ok(game) => game,
        Err(err) => {
            warn!(game = index, seed, strategies = ?names, error = %err, "game setup failed");
            return Err(err);
        }
    };
    let seating: Vec<PlayerId> = game.state().players.seating().to_vec();

    let result = game.run();
    match &result {
        Ok(report) => debug!(
            game = index,
            seed,
            outcome = ?report.outcome,
            turns = report.turns,
            winners = ?report.winners,
            "game finished"
        ),
        Err(err) => warn!(
            game = index,
            seed,
            ?seating,
            strategies = ?names,
            error = %err,
            "game failed"
        ),
    }
    result
}

/// Play `config.games` games and summarise them.
///
/// `lineup(index, rng)` builds the players for game `index`; players must
/// carry ids `0..n` in order. Every game is seeded from
/// [`ExperimentConfig::game_seeds`], so the summary only depends on the
/// config and the factory.
pub fn run_experiment<F>(config: &ExperimentConfig, lineup: F) -> ExperimentSummary
where
    F: Fn(usize, &mut GameRng) -> Vec<Player> + Sync,
{
    let span = info_span!("experiment", seed = config.seed, games = config.games);
    let _guard = span.enter();

    let seeds = config.game_seeds();
    let threads = config.threads.clamp(1, config.games.max(1));
    info!(threads, "starting experiment");

    let lineup = &lineup;
    let seeds = &seeds;
    let summary = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|worker| {
                scope.spawn(move || {
                    let mut local = ExperimentSummary::default();
                    for index in (worker..seeds.len()).step_by(threads) {
                        let seed = seeds[index];
                        let played = panic::catch_unwind(AssertUnwindSafe(|| {
                            play_one(&config.game, index, seed, lineup)
                        }));
                        match played {
                            Ok(result) => local.record(&result),
                            Err(_) => {
                                warn!(game = index, seed, "game panicked");
                                local.record_aborted(1);
                            }
                        }
                    }
                    local
                })
            })
            .collect();

        let mut total = ExperimentSummary::default();
        for (worker, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(local) => total.merge(local),
                Err(_) => {
                    let lost = (worker..seeds.len()).step_by(threads).count();
                    warn!(worker, lost, "experiment worker panicked");
                    total.record_aborted(lost);
                }
            }
        }
        total
    });

    info!(
        games = summary.games,
        failed = summary.failed,
        inconclusive = summary.inconclusive,
        "experiment complete"
    );
    for (name, tally) in &summary.per_strategy {
        info!(strategy = %name, wins = tally.wins, games = tally.games, win_rate = tally.win_rate(), "tally");
    }

    summary
}
