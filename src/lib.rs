//! Strictly XO library - tic-tac-toe move lifecycle with an authoritative resolver
//!
//! A local action is placed optimistically, sent to a [`Resolver`], and the
//! answer is merged back into a single canonical board.
//!
//! # Architecture
//!
//! - **BoardState**: canonical board, turn, mode and round activity
//! - **RequestGate**: single-flight guard, one resolver exchange at a time
//! - **MoveCoordinator**: optimistic apply, resolve, reconcile
//! - **SessionController**: setup validation, scores, screens
//! - **Resolver**: HTTP client, local referee, and an axum service
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use strictly_xo::{
//!     GameSession, MoveCoordinator, NoopHooks, Pacing, RefereeResolver, SessionController,
//!     SetupForm,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut session = GameSession::new();
//! let mut controller = SessionController::new();
//! controller.start_round(&mut session, &SetupForm::new("Ana".into(), "Ben".into(), Default::default()))?;
//!
//! let coordinator = MoveCoordinator::new(Arc::new(RefereeResolver::new()), Pacing::instant());
//! coordinator.play(&mut session, 4, &NoopHooks).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board_state;
mod config;
mod coordinator;
mod games;
mod gate;
mod hooks;
mod mode;
mod pacing;
mod resolver;
mod scoreboard;
mod server;
mod session;

// Crate-level exports - Grid
pub use games::tictactoe::{BOARD_LEN, Board, Mark, Position, Square, SquareLabelError, rules};

// Crate-level exports - Board state
pub use board_state::{
    BoardState, InvalidMoveError, InvalidMoveKind, PlayerNames, ShapeError, ShapeErrorKind,
};

// Crate-level exports - Modes and scores
pub use mode::{Difficulty, GameMode};
pub use scoreboard::{RoundEnding, Scoreboard, Winner};

// Crate-level exports - Move lifecycle
pub use coordinator::{
    MoveCoordinator, MoveError, MoveOutcome, MovePhase, PendingMove, Reconciliation,
    ResponseReceived,
};
pub use gate::{GatePass, RequestGate};
pub use hooks::{GameEvent, NoopHooks, PresentationHooks};
pub use pacing::Pacing;

// Crate-level exports - Resolvers
pub use resolver::{
    HttpResolver, MoveRequest, MoveResponse, RefereeResolver, ResolveError, ResolveErrorKind,
    Resolver,
};
pub use server::{ErrorBody, referee_router, router, serve, serve_on};

// Crate-level exports - Session and configuration
pub use config::{ClientConfig, ConfigError, SERVER_URL_ENV};
pub use session::{
    BOT_NAME, GameSession, Screen, SessionController, SetupField, SetupForm, ValidationError,
};
