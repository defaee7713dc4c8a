//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use strictly_xo::{
    Difficulty, GameEvent, GameMode, GameSession, MoveCoordinator, MoveRequest, MoveResponse,
    Pacing, ResolveError, ResolveErrorKind, Resolver, SessionController, SetupForm, Square, Winner,
};
use tokio::sync::mpsc;

/// Resolver that answers from a script and records every request.
#[derive(Default)]
pub struct ScriptedResolver {
    replies: Mutex<VecDeque<Result<MoveResponse, ResolveError>>>,
    requests: Mutex<Vec<MoveRequest>>,
}

impl ScriptedResolver {
    pub fn new(replies: impl IntoIterator<Item = Result<MoveResponse, ResolveError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<MoveRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Resolver for ScriptedResolver {
    async fn resolve(&self, request: &MoveRequest) -> Result<MoveResponse, ResolveError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(ResolveError::new(ResolveErrorKind::Transport(
                "script exhausted".to_string(),
            )))
        })
    }
}

pub fn coordinator(resolver: Arc<ScriptedResolver>) -> MoveCoordinator {
    MoveCoordinator::new(resolver, Pacing::instant())
}

/// Squares from wire labels.
pub fn snapshot(cells: [&str; 9]) -> Vec<Square> {
    cells
        .iter()
        .map(|c| Square::try_from(c.to_string()).unwrap())
        .collect()
}

pub fn open(cells: [&str; 9]) -> Result<MoveResponse, ResolveError> {
    Ok(MoveResponse {
        board: snapshot(cells),
        game_over: false,
        winner: None,
    })
}

pub fn over(cells: [&str; 9], winner: Option<Winner>) -> Result<MoveResponse, ResolveError> {
    Ok(MoveResponse {
        board: snapshot(cells),
        game_over: true,
        winner,
    })
}

pub fn transport_failure() -> Result<MoveResponse, ResolveError> {
    Err(ResolveError::new(ResolveErrorKind::Transport(
        "connection refused".to_string(),
    )))
}

/// A session with a round running in `mode`.
pub fn started(mode: GameMode) -> (SessionController, GameSession) {
    let mut controller = SessionController::new();
    let mut session = GameSession::new();
    controller.select_mode(mode);
    controller
        .start_round(
            &mut session,
            &SetupForm::new("Ana".to_string(), "Ben".to_string(), Difficulty::Medium),
        )
        .unwrap();
    (controller, session)
}

pub fn drain(rx: &mut mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
