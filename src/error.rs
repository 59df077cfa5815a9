//! Error types.
//!
//! Every error here is fatal for the game instance that raised it. The engine
//! never retries; a bulk experiment driver may abandon the game and start a
//! fresh one with a new seed.

use thiserror::Error;

use crate::core::{Card, PlayerId};

/// Invalid operation on a single hand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandError {
    #[error("cannot pick {requested} card(s) of rank {rank}: only {available} in hand")]
    NotEnoughCards {
        rank: Card,
        requested: usize,
        available: usize,
    },

    #[error("cards {cards:?} are not all present in hand")]
    MissingCards { cards: Vec<Card> },
}

/// A move a decision policy is not allowed to make.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("cannot doubt on the first hand of a round")]
    DoubtOnFirstHand,

    #[error("a play must contain at least one card")]
    EmptyPlay,

    #[error("the opening play of a round must call a rank")]
    MissingCalledRank,

    #[error("called rank {rank} does not exist in a deck of size {deck_size}")]
    RankOutOfRange { rank: Card, deck_size: u8 },

    #[error("played cards {cards:?} are not in the player's hand")]
    CardsNotInHand { cards: Vec<Card> },
}

/// A broken internal invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintViolation {
    #[error("hand operation failed: {0}")]
    Hand(#[from] HandError),

    #[error(
        "board accounting mismatch: {board_cards} board card(s), called rank {called_rank:?}, \
         {last_play} card(s) in last play"
    )]
    BoardAccounting {
        board_cards: usize,
        called_rank: Option<Card>,
        last_play: usize,
    },

    #[error("card conservation broken: expected {expected} cards in play, found {found}")]
    CardConservation { expected: usize, found: usize },
}

/// Invalid game setup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("deck size {deck_size} is outside the supported range {min}..={max}")]
    DeckSize { deck_size: u8, min: u8, max: u8 },

    #[error("{count} players is outside the supported range {min}..={max}")]
    PlayerCount { count: usize, min: usize, max: usize },

    #[error("player ids must be 0..{player_count} in registration order")]
    PlayerIds { player_count: usize },

    #[error("stop threshold {0} must be 1 or 2 remaining players")]
    StopThreshold(usize),

    #[error("first player seat {seat} is out of range for {player_count} players")]
    FirstPlayer { seat: usize, player_count: usize },

    #[error("no deal without a four-of-a-kind found after {attempts} attempts")]
    DealDidNotConverge { attempts: usize },

    #[error("invalid deal: {0}")]
    InvalidDeal(String),
}

/// Any error that aborts a game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("illegal move by {player}: {reason}")]
    IllegalMove { player: PlayerId, reason: IllegalMove },

    #[error("constraint violation: {0}")]
    Constraint(#[from] ConstraintViolation),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("the game is already over")]
    GameOver,
}

impl From<HandError> for GameError {
    fn from(err: HandError) -> Self {
        GameError::Constraint(ConstraintViolation::Hand(err))
    }
}

impl GameError {
    /// Check whether this error was caused by a policy's move.
    #[must_use]
    pub fn is_illegal_move(&self) -> bool {
        matches!(self, GameError::IllegalMove { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_error_display() {
        let err = HandError::NotEnoughCards {
            rank: Card(3),
            requested: 2,
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "cannot pick 2 card(s) of rank 3: only 1 in hand"
        );
    }

    #[test]
    fn test_illegal_move_display() {
        let err = GameError::IllegalMove {
            player: PlayerId::new(1),
            reason: IllegalMove::DoubtOnFirstHand,
        };
        assert_eq!(
            err.to_string(),
            "illegal move by Player 1: cannot doubt on the first hand of a round"
        );
        assert!(err.is_illegal_move());
    }

    #[test]
    fn test_hand_error_becomes_constraint_violation() {
        let err: GameError = HandError::MissingCards { cards: vec![Card(1)] }.into();
        assert!(matches!(
            err,
            GameError::Constraint(ConstraintViolation::Hand(_))
        ));
        assert!(!err.is_illegal_move());
    }
}
