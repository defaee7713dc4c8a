//! Game models.

pub mod tictactoe;
