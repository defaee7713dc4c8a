//! Canonical client-side board: squares, mode, turn, and round activity.

use crate::games::tictactoe::{BOARD_LEN, Board, Mark, Square};
use crate::mode::GameMode;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Display names for both marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerNames {
    /// Name shown for X.
    pub x: String,
    /// Name shown for O.
    pub o: String,
}

impl PlayerNames {
    /// Creates a name pair.
    pub fn new(x: impl Into<String>, o: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            o: o.into(),
        }
    }

    /// Name of the player holding `mark`.
    pub fn name(&self, mark: Mark) -> &str {
        match mark {
            Mark::X => &self.x,
            Mark::O => &self.o,
        }
    }
}

impl Default for PlayerNames {
    fn default() -> Self {
        Self::new("Player 1", "Player 2")
    }
}

/// Why a local move was refused.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum InvalidMoveKind {
    /// Index outside 0-8.
    #[display("index {_0} is off the board")]
    OutOfBounds(usize),
    /// Square already holds a mark.
    #[display("square {_0} is already occupied")]
    Occupied(usize),
    /// No round is accepting moves.
    #[display("round is not active")]
    RoundInactive,
}

/// A local move that the board refuses.
#[derive(Debug, Clone, Display, Error)]
#[display("Invalid move: {} at {}:{}", kind, file, line)]
pub struct InvalidMoveError {
    /// What was wrong with the move.
    pub kind: InvalidMoveKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl InvalidMoveError {
    /// Creates a new invalid move error with caller location tracking.
    #[track_caller]
    pub fn new(kind: InvalidMoveKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Why an incoming snapshot cannot replace the board.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ShapeErrorKind {
    /// Snapshot does not have exactly nine squares.
    #[display("snapshot has {_0} squares, expected 9")]
    WrongLength(usize),
    /// A marked square came back empty.
    #[display("square {_0} lost its mark")]
    Retraction(usize),
    /// A marked square came back with the other mark.
    #[display("square {_0} changed mark")]
    Overwrite(usize),
}

/// A malformed board snapshot from the resolver.
#[derive(Debug, Clone, Display, Error)]
#[display("Malformed snapshot: {} at {}:{}", kind, file, line)]
pub struct ShapeError {
    /// What was wrong with the snapshot.
    pub kind: ShapeErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ShapeError {
    /// Creates a new shape error with caller location tracking.
    #[track_caller]
    pub fn new(kind: ShapeErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// The single source of truth for the board shown to the players.
///
/// Only the move coordinator and the session controller mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    board: Board,
    mode: GameMode,
    active_mark: Mark,
    is_active: bool,
    names: PlayerNames,
}

impl BoardState {
    /// Creates an idle board: empty, no round running.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            mode: GameMode::default(),
            active_mark: Mark::X,
            is_active: false,
            names: PlayerNames::default(),
        }
    }

    /// The squares.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mode of the current round.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Whose mark is next in [`GameMode::HumanVsHuman`].
    pub fn active_mark(&self) -> Mark {
        self.active_mark
    }

    /// Whether the round accepts moves.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Display names.
    pub fn names(&self) -> &PlayerNames {
        &self.names
    }

    /// The mark a local action places: always X against the bot.
    pub fn acting_mark(&self) -> Mark {
        if self.mode.is_automated() {
            Mark::X
        } else {
            self.active_mark
        }
    }

    /// Places `mark` at `index`. Nothing else changes.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMoveError`] if the round is inactive, the index is
    /// off the board, or the square is taken.
    #[instrument(skip(self), fields(active = self.is_active))]
    pub fn apply_mark(&mut self, index: usize, mark: Mark) -> Result<(), InvalidMoveError> {
        if !self.is_active {
            return Err(InvalidMoveError::new(InvalidMoveKind::RoundInactive));
        }
        match self.board.get(index) {
            None => Err(InvalidMoveError::new(InvalidMoveKind::OutOfBounds(index))),
            Some(Square::Occupied(_)) => Err(InvalidMoveError::new(InvalidMoveKind::Occupied(index))),
            Some(Square::Empty) => {
                self.board
                    .set(index, Square::Occupied(mark))
                    .map_err(|_| InvalidMoveError::new(InvalidMoveKind::OutOfBounds(index)))?;
                debug!(index, %mark, "Mark applied");
                Ok(())
            }
        }
    }

    /// Overwrites every square from an authoritative snapshot.
    ///
    /// Marks are monotonic: a snapshot may only fill empty squares. On error
    /// the board is left exactly as it was.
    ///
    /// Returns the squares the snapshot newly filled, in index order.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError`] for a snapshot that is not nine squares long,
    /// or that clears or changes an existing mark.
    #[instrument(skip(self, snapshot), fields(len = snapshot.len()))]
    pub fn replace_from(&mut self, snapshot: &[Square]) -> Result<Vec<(usize, Mark)>, ShapeError> {
        let squares: [Square; BOARD_LEN] = snapshot
            .try_into()
            .map_err(|_| ShapeError::new(ShapeErrorKind::WrongLength(snapshot.len())))?;

        let mut filled = Vec::new();
        for (index, (old, new)) in self.board.squares().iter().zip(squares.iter()).enumerate() {
            match (*old, *new) {
                (Square::Occupied(_), Square::Empty) => {
                    return Err(ShapeError::new(ShapeErrorKind::Retraction(index)));
                }
                (Square::Occupied(before), Square::Occupied(after)) if before != after => {
                    return Err(ShapeError::new(ShapeErrorKind::Overwrite(index)));
                }
                (Square::Empty, Square::Occupied(mark)) => filled.push((index, mark)),
                _ => {}
            }
        }

        self.board = Board::from_squares(squares);
        debug!(filled = filled.len(), "Board replaced from snapshot");
        Ok(filled)
    }

    /// Clears the board and opens a new round with X to move.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.active_mark = Mark::X;
        self.is_active = true;
    }

    /// Removes an optimistic mark the resolver never confirmed.
    pub(crate) fn withdraw(&mut self, index: usize, mark: Mark) {
        if self.board.get(index) == Some(Square::Occupied(mark)) {
            // In bounds: `get` just returned the square.
            let _ = self.board.set(index, Square::Empty);
            debug!(index, %mark, "Optimistic mark withdrawn");
        }
    }

    /// Commits setup choices. Only called between rounds.
    pub(crate) fn configure(&mut self, mode: GameMode, names: PlayerNames) {
        self.mode = mode;
        self.names = names;
    }

    /// Passes the turn to the other mark.
    pub(crate) fn flip_turn(&mut self) {
        self.active_mark = self.active_mark.opponent();
    }

    /// Closes the round to further moves.
    pub(crate) fn finish(&mut self) {
        self.is_active = false;
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_state() -> BoardState {
        let mut state = BoardState::new();
        state.reset();
        state
    }

    #[test]
    fn test_apply_mark_sets_only_that_square() {
        let mut state = active_state();
        state.apply_mark(4, Mark::O).unwrap();

        assert_eq!(state.board().get(4), Some(Square::Occupied(Mark::O)));
        assert_eq!(state.board().empty_count(), 8);
        assert_eq!(state.active_mark(), Mark::X);
        assert!(state.is_active());
    }

    #[test]
    fn test_apply_mark_rejections() {
        let mut state = BoardState::new();
        let err = state.apply_mark(0, Mark::X).unwrap_err();
        assert_eq!(err.kind, InvalidMoveKind::RoundInactive);

        state.reset();
        let err = state.apply_mark(9, Mark::X).unwrap_err();
        assert_eq!(err.kind, InvalidMoveKind::OutOfBounds(9));

        state.apply_mark(2, Mark::X).unwrap();
        let err = state.apply_mark(2, Mark::O).unwrap_err();
        assert_eq!(err.kind, InvalidMoveKind::Occupied(2));
        assert_eq!(state.board().get(2), Some(Square::Occupied(Mark::X)));
    }

    #[test]
    fn test_reset_then_empty_snapshot_is_idempotent() {
        let mut state = active_state();
        let filled = state.replace_from(&[Square::Empty; 9]).unwrap();

        assert!(filled.is_empty());
        assert_eq!(state.board(), &Board::new());
        assert!(state.is_active());
    }

    #[test]
    fn test_replace_reports_filled_squares() {
        let mut state = active_state();
        state.apply_mark(0, Mark::X).unwrap();

        let mut snapshot = [Square::Empty; 9];
        snapshot[0] = Square::Occupied(Mark::X);
        snapshot[4] = Square::Occupied(Mark::O);
        let filled = state.replace_from(&snapshot).unwrap();

        assert_eq!(filled, vec![(4, Mark::O)]);
        assert_eq!(state.board().squares(), &snapshot);
    }

    #[test]
    fn test_retraction_rejected_and_board_untouched() {
        let mut state = active_state();
        state.apply_mark(3, Mark::X).unwrap();
        let before = state.clone();

        let err = state.replace_from(&[Square::Empty; 9]).unwrap_err();

        assert_eq!(err.kind, ShapeErrorKind::Retraction(3));
        assert_eq!(state, before);
    }

    #[test]
    fn test_overwrite_and_length_rejected() {
        let mut state = active_state();
        state.apply_mark(1, Mark::X).unwrap();
        let before = state.clone();

        let mut snapshot = [Square::Empty; 9];
        snapshot[1] = Square::Occupied(Mark::O);
        let err = state.replace_from(&snapshot).unwrap_err();
        assert_eq!(err.kind, ShapeErrorKind::Overwrite(1));

        let err = state.replace_from(&snapshot[..8]).unwrap_err();
        assert_eq!(err.kind, ShapeErrorKind::WrongLength(8));
        assert_eq!(state, before);
    }

    #[test]
    fn test_acting_mark_is_x_against_bot() {
        let mut state = active_state();
        state.configure(GameMode::HumanVsAutomated, PlayerNames::new("Ana", "Bot"));
        state.flip_turn();
        assert_eq!(state.acting_mark(), Mark::X);

        state.configure(GameMode::HumanVsHuman, PlayerNames::new("Ana", "Ben"));
        assert_eq!(state.acting_mark(), Mark::O);
    }
}
