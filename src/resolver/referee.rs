//! In-process resolver: terminal detection plus a placeholder bot.

use super::{MoveRequest, MoveResponse, ResolveError, Resolver};
use crate::games::tictactoe::rules::{check_winner, is_full};
use crate::games::tictactoe::{Board, Mark, Position, Square};
use crate::scoreboard::Winner;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

/// Local referee implementing the resolver contract.
///
/// The bot takes the first empty square regardless of difficulty; choosing
/// strong moves is the remote service's business.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefereeResolver;

impl RefereeResolver {
    /// Creates a referee.
    pub fn new() -> Self {
        Self
    }

    /// Judges one request.
    #[instrument(skip(self, request), fields(mode = ?request.mode))]
    pub fn judge(&self, request: &MoveRequest) -> MoveResponse {
        let mut board = request.board.clone();

        if let Some(winner) = verdict(&board) {
            info!(?winner, "Round decided by player move");
            return MoveResponse::terminal(&board, winner);
        }

        if request.mode.is_automated()
            && let Some(pos) = pick_move(&board)
        {
            // `pick_move` only returns empty squares on the board.
            let _ = board.set(pos.to_index(), Square::Occupied(Mark::O));
            debug!(position = %pos, "Bot placed O");

            if let Some(winner) = verdict(&board) {
                info!(?winner, "Round decided by bot move");
                return MoveResponse::terminal(&board, winner);
            }
        }

        MoveResponse::open(&board)
    }
}

/// Terminal verdict for `board`, if any.
fn verdict(board: &Board) -> Option<Winner> {
    match check_winner(board) {
        Some(mark) => Some(Winner::from(mark)),
        None if is_full(board) => Some(Winner::Draw),
        None => None,
    }
}

/// Returns the first empty position on the board.
fn pick_move(board: &Board) -> Option<Position> {
    Position::iter().find(|pos| board.is_empty(pos.to_index()))
}

#[async_trait::async_trait]
impl Resolver for RefereeResolver {
    async fn resolve(&self, request: &MoveRequest) -> Result<MoveResponse, ResolveError> {
        Ok(self.judge(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::{Difficulty, GameMode};

    fn request(marks: &[(usize, Mark)], mode: GameMode) -> MoveRequest {
        let mut board = Board::new();
        for (index, mark) in marks {
            board.set(*index, Square::Occupied(*mark)).unwrap();
        }
        MoveRequest {
            board,
            mode,
            level: Difficulty::Hard,
        }
    }

    #[test]
    fn test_two_player_board_returned_unchanged() {
        let req = request(&[(0, Mark::X), (4, Mark::O)], GameMode::HumanVsHuman);
        let response = RefereeResolver::new().judge(&req);

        assert_eq!(response, MoveResponse::open(&req.board));
    }

    #[test]
    fn test_bot_fills_first_empty_square() {
        let req = request(&[(0, Mark::X)], GameMode::HumanVsAutomated);
        let response = RefereeResolver::new().judge(&req);

        assert!(!response.game_over);
        assert_eq!(response.board[1], Square::Occupied(Mark::O));
        assert_eq!(response.board.iter().filter(|s| **s == Square::Empty).count(), 7);
    }

    #[test]
    fn test_level_does_not_change_bot_move() {
        let hard = request(&[(0, Mark::X)], GameMode::HumanVsAutomated);
        let easy = MoveRequest {
            level: Difficulty::Easy,
            ..hard.clone()
        };

        let referee = RefereeResolver::new();
        assert_eq!(referee.judge(&easy), referee.judge(&hard));
    }

    #[test]
    fn test_player_win_reported_before_bot_moves() {
        let req = request(
            &[(0, Mark::X), (1, Mark::X), (2, Mark::X), (3, Mark::O), (4, Mark::O)],
            GameMode::HumanVsAutomated,
        );
        let response = RefereeResolver::new().judge(&req);

        assert_eq!(response, MoveResponse::terminal(&req.board, Winner::X));
    }

    #[test]
    fn test_bot_winning_move_is_terminal() {
        // O holds 1 and 2; first empty square is 0, completing the top row.
        let req = request(
            &[(1, Mark::O), (2, Mark::O), (3, Mark::X), (4, Mark::X), (8, Mark::X)],
            GameMode::HumanVsAutomated,
        );
        let response = RefereeResolver::new().judge(&req);

        assert!(response.game_over);
        assert_eq!(response.winner, Some(Winner::O));
        assert_eq!(response.board[0], Square::Occupied(Mark::O));
    }

    #[test]
    fn test_full_board_is_draw() {
        use Mark::{O, X};
        let marks = [X, O, X, O, X, X, O, X, O];
        let indexed: Vec<_> = marks.iter().copied().enumerate().collect();
        let response = RefereeResolver::new().judge(&request(&indexed, GameMode::HumanVsHuman));

        assert!(response.game_over);
        assert_eq!(response.winner, Some(Winner::Draw));
    }
}
