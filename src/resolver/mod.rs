//! The authoritative move resolver: wire contract and implementations.

mod http;
mod referee;

pub use http::HttpResolver;
pub use referee::RefereeResolver;

use crate::games::tictactoe::{Board, Square};
use crate::mode::{Difficulty, GameMode};
use crate::scoreboard::Winner;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// Board snapshot sent for resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Full board after the optimistic placement.
    pub board: Board,
    /// Round mode.
    pub mode: GameMode,
    /// Bot strength; ignored in two-player rounds.
    pub level: Difficulty,
}

/// The resolver's verdict.
///
/// `board` is deliberately unsized here so a short or long snapshot reaches
/// reconciliation, where it is rejected as a shape error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    /// Resulting board.
    pub board: Vec<Square>,
    /// Whether the round is over.
    #[serde(rename = "gameOver")]
    pub game_over: bool,
    /// Verdict when `game_over`; absent otherwise.
    #[serde(default)]
    pub winner: Option<Winner>,
}

impl MoveResponse {
    /// Round continues with `board`.
    pub fn open(board: &Board) -> Self {
        Self {
            board: board.squares().to_vec(),
            game_over: false,
            winner: None,
        }
    }

    /// Round ended on `board` with `winner`.
    pub fn terminal(board: &Board, winner: Winner) -> Self {
        Self {
            board: board.squares().to_vec(),
            game_over: true,
            winner: Some(winner),
        }
    }
}

/// Why a resolver exchange failed.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ResolveErrorKind {
    /// Connection or I/O failure.
    #[display("transport failure: {_0}")]
    Transport(String),
    /// No answer within the configured timeout.
    #[display("no answer within {_0} ms")]
    Timeout(u64),
    /// The service answered with a non-success status.
    #[display("service answered {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },
    /// The answer was not a valid response document.
    #[display("undecodable response: {_0}")]
    Decode(String),
}

/// A failed resolver exchange. Always recoverable.
#[derive(Debug, Clone, Display, Error)]
#[display("Resolver error: {} at {}:{}", kind, file, line)]
pub struct ResolveError {
    /// What went wrong.
    pub kind: ResolveErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ResolveError {
    /// Creates a new resolver error with caller location tracking.
    #[track_caller]
    pub fn new(kind: ResolveErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Authoritative move resolution. Strictly request/response.
///
/// Implementations must never retract marks. In two-player rounds they only
/// detect terminal states; against the bot they add exactly one O while the
/// round is still open.
#[async_trait::async_trait]
pub trait Resolver: Send + Sync {
    /// Resolves one move.
    async fn resolve(&self, request: &MoveRequest) -> Result<MoveResponse, ResolveError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Mark;

    #[test]
    fn test_request_wire_shape() {
        let mut board = Board::new();
        board.set(0, Square::Occupied(Mark::X)).unwrap();
        let request = MoveRequest {
            board,
            mode: GameMode::HumanVsAutomated,
            level: Difficulty::Easy,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "board": ["X", "", "", "", "", "", "", "", ""],
                "mode": "ai",
                "level": "easy"
            })
        );
    }

    #[test]
    fn test_response_accepts_null_and_missing_winner() {
        let with_null: MoveResponse = serde_json::from_str(
            r#"{"board":["","","","","","","","",""],"winner":null,"gameOver":false}"#,
        )
        .unwrap();
        let without: MoveResponse =
            serde_json::from_str(r#"{"board":["X"],"gameOver":false}"#).unwrap();

        assert_eq!(with_null.winner, None);
        assert_eq!(without.board.len(), 1);
    }
}
