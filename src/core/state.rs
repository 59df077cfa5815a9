//! Authoritative table state: board, turn counters, and seating.
//!
//! ## Board
//!
//! Cards played since the last doubt, the called rank, the latest play,
//! and the ranks still in circulation.
//!
//! ## Turn
//!
//! Monotonic decision counter, the current round's streak, and the
//! rotating position into the list of players still holding cards.
//!
//! ## PlayersState
//!
//! Seating order, who is still playing, and who has already won.
//!
//! Only the engine mutates these; strategies see a
//! [`TurnSnapshot`](super::TurnSnapshot) built from them.

use serde::{Deserialize, Serialize};

use super::card::{ranks, Card};
use super::player::PlayerId;
use crate::error::ConstraintViolation;

/// The shared pile for the current round.
///
/// Invariant: the board is empty iff no rank is called iff the latest play
/// is empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cards: Vec<Card>,
    called_rank: Option<Card>,
    latest: Vec<Card>,
    available: Vec<Card>,
}

impl Board {
    /// Create an empty board with every rank of the deck available.
    pub fn new(deck_size: u8) -> Self {
        Self {
            cards: Vec::new(),
            called_rank: None,
            latest: Vec::new(),
            available: ranks(deck_size).collect(),
        }
    }

    /// True when no round is in progress.
    #[must_use]
    pub fn is_first_hand(&self) -> bool {
        self.called_rank.is_none()
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn called_rank(&self) -> Option<Card> {
        self.called_rank
    }

    /// Cards placed by the most recent play.
    #[must_use]
    pub fn latest_play(&self) -> &[Card] {
        &self.latest
    }

    /// Ranks not yet discarded, ascending.
    #[must_use]
    pub fn available_ranks(&self) -> &[Card] {
        &self.available
    }

    /// Start a round with `rank` as the called rank.
    pub fn open_round(&mut self, rank: Card) {
        self.called_rank = Some(rank);
    }

    /// Add a play to the pile; it becomes the latest play.
    pub fn place(&mut self, cards: &[Card]) {
        self.cards.extend_from_slice(cards);
        self.latest.clear();
        self.latest.extend_from_slice(cards);
    }

    /// Clear the round, handing back every accumulated card.
    pub fn take(&mut self) -> Vec<Card> {
        self.called_rank = None;
        self.latest.clear();
        std::mem::take(&mut self.cards)
    }

    /// Drop discarded ranks from circulation.
    pub fn remove_available(&mut self, discarded: &[Card]) {
        self.available.retain(|r| !discarded.contains(r));
    }

    /// Verify the empty/called/latest accounting invariant.
    pub fn check_accounting(&self) -> Result<(), ConstraintViolation> {
        let empty = self.cards.is_empty();
        let consistent = empty == self.called_rank.is_none() && empty == self.latest.is_empty();
        let latest_fits = self.latest.len() <= self.cards.len()
            && self.cards.ends_with(&self.latest);

        if consistent && latest_fits {
            Ok(())
        } else {
            Err(ConstraintViolation::BoardAccounting {
                board_cards: self.cards.len(),
                called_rank: self.called_rank,
                last_play: self.latest.len(),
            })
        }
    }
}

/// Turn bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Decisions taken so far.
    pub counter: u32,
    /// Plays made in the current round.
    pub streak: u32,
    /// Index into the playing list of the player whose turn it is.
    pub position: usize,
}

/// The acting player and its neighbours in the playing list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seats {
    pub prev: PlayerId,
    pub this: PlayerId,
    pub next: PlayerId,
}

/// Seating, remaining players, and finishing order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayersState {
    seating: Vec<PlayerId>,
    playing: Vec<PlayerId>,
    winners: Vec<PlayerId>,
}

impl PlayersState {
    pub fn new(seating: Vec<PlayerId>) -> Self {
        Self {
            playing: seating.clone(),
            seating,
            winners: Vec::new(),
        }
    }

    /// Every seated player, in seating order.
    #[must_use]
    pub fn seating(&self) -> &[PlayerId] {
        &self.seating
    }

    /// Players still holding cards, in seating order.
    #[must_use]
    pub fn playing(&self) -> &[PlayerId] {
        &self.playing
    }

    /// Players who emptied their hand, in finishing order.
    #[must_use]
    pub fn winners(&self) -> &[PlayerId] {
        &self.winners
    }

    #[must_use]
    pub fn is_playing(&self, player: PlayerId) -> bool {
        self.playing.contains(&player)
    }
}

/// Board, turn and seating for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Turn,
    pub players: PlayersState,
    discarded: Vec<Card>,
}

impl GameState {
    /// Create the state for a fresh deal with `first_seat` acting first.
    pub fn new(deck_size: u8, seating: Vec<PlayerId>, first_seat: usize) -> Self {
        let len = seating.len().max(1);
        Self {
            board: Board::new(deck_size),
            turn: Turn {
                counter: 0,
                streak: 0,
                // One seat back, so the first advance lands on `first_seat`
                position: (first_seat + len - 1) % len,
            },
            players: PlayersState::new(seating),
            discarded: Vec::new(),
        }
    }

    /// Ranks discarded so far, in discard order.
    #[must_use]
    pub fn discarded(&self) -> &[Card] {
        &self.discarded
    }

    pub fn record_discards(&mut self, ranks: &[Card]) {
        self.discarded.extend_from_slice(ranks);
        self.board.remove_available(ranks);
    }

    /// The acting player and neighbours at the current position.
    #[must_use]
    pub fn seats(&self) -> Seats {
        let playing = &self.players.playing;
        let len = playing.len();
        let pos = self.turn.position % len;
        Seats {
            prev: playing[(pos + len - 1) % len],
            this: playing[pos],
            next: playing[(pos + 1) % len],
        }
    }

    /// Move the turn to the next player in the playing list.
    pub fn advance(&mut self) -> Seats {
        let len = self.players.playing.len();
        self.turn.position = (self.turn.position + 1) % len;
        self.seats()
    }

    /// Move `winner` from the playing list to the winners.
    ///
    /// The position is re-indexed so that the next [`advance`](Self::advance)
    /// lands on the player who would have followed, with no seat skipped or
    /// repeated.
    pub fn retire(&mut self, winner: PlayerId) {
        let Some(removed) = self.players.playing.iter().position(|&p| p == winner) else {
            return;
        };
        self.players.playing.remove(removed);
        self.players.winners.push(winner);

        let len = self.players.playing.len();
        let pos = self.turn.position;
        self.turn.position = if len == 0 {
            0
        } else if removed < pos {
            pos - 1
        } else if removed == pos {
            (removed + len - 1) % len
        } else {
            pos
        };
    }

    /// Start a new round.
    pub fn reset_board(&mut self) -> Vec<Card> {
        self.turn.streak = 0;
        self.board.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: u8) -> Vec<PlayerId> {
        (0..n).map(PlayerId).collect()
    }

    #[test]
    fn test_board_round_lifecycle() {
        let mut board = Board::new(5);
        assert!(board.is_first_hand());
        assert!(board.check_accounting().is_ok());

        board.open_round(Card(2));
        board.place(&[Card(2), Card(2)]);
        board.place(&[Card(3)]);
        assert_eq!(board.card_count(), 3);
        assert_eq!(board.latest_play(), &[Card(3)]);
        assert!(board.check_accounting().is_ok());

        let taken = board.take();
        assert_eq!(taken, vec![Card(2), Card(2), Card(3)]);
        assert!(board.is_first_hand());
        assert!(board.latest_play().is_empty());
        assert!(board.check_accounting().is_ok());
    }

    #[test]
    fn test_board_accounting_detects_half_open_round() {
        let mut board = Board::new(5);
        board.open_round(Card(4));
        assert!(matches!(
            board.check_accounting(),
            Err(ConstraintViolation::BoardAccounting { board_cards: 0, .. })
        ));
    }

    #[test]
    fn test_available_ranks_shrink() {
        let mut board = Board::new(6);
        board.remove_available(&[Card(2), Card(5)]);
        assert_eq!(board.available_ranks(), &[Card(1), Card(3), Card(4)]);
    }

    #[test]
    fn test_first_advance_lands_on_first_seat() {
        let mut state = GameState::new(14, ids(4), 0);
        let seats = state.advance();
        assert_eq!(seats.this, PlayerId(0));
        assert_eq!(seats.prev, PlayerId(3));
        assert_eq!(seats.next, PlayerId(1));

        let mut state = GameState::new(14, ids(4), 2);
        assert_eq!(state.advance().this, PlayerId(2));
    }

    #[test]
    fn test_retire_prev_keeps_rotation() {
        // 0 1 2 3, player 2 to act, player 1 (prev) wins
        let mut state = GameState::new(14, ids(4), 2);
        state.advance();
        state.retire(PlayerId(1));

        assert_eq!(state.players.playing(), &[PlayerId(0), PlayerId(2), PlayerId(3)]);
        assert_eq!(state.seats().this, PlayerId(2));
        assert_eq!(state.advance().this, PlayerId(3));
    }

    #[test]
    fn test_retire_current_player_hands_turn_to_successor() {
        let mut state = GameState::new(14, ids(4), 3);
        state.advance();
        state.retire(PlayerId(3));

        // The player after 3 wraps around to 0
        let seats = state.advance();
        assert_eq!(seats.this, PlayerId(0));
        assert_eq!(seats.prev, PlayerId(2));
    }

    #[test]
    fn test_retire_wrapped_prev() {
        // Player 0 acts, player 3 (prev, wrapped) wins
        let mut state = GameState::new(14, ids(4), 0);
        state.advance();
        state.retire(PlayerId(3));

        assert_eq!(state.seats().this, PlayerId(0));
        let seats = state.advance();
        assert_eq!(seats.this, PlayerId(1));
        assert_eq!(seats.next, PlayerId(2));
        assert_eq!(state.players.winners(), &[PlayerId(3)]);
    }
}
