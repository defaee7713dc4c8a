//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](super::Board). The local referee uses
//! them to decide terminal states; the client never does, it trusts the
//! resolver's verdict.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::check_winner;
