//! Tic-tac-toe grid model: marks, squares, the board, and line rules.

mod position;
pub mod rules;
mod types;

pub use position::Position;
pub use types::{BOARD_LEN, Board, Mark, Square, SquareLabelError};
