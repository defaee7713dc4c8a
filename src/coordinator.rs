//! Move lifecycle: optimistic placement, authoritative resolution, and
//! reconciliation into the session.
//!
//! The lifecycle is an explicit state machine split at its only suspension
//! point, so a UI event loop can keep handling input while a move is out:
//!
//! ```text
//! Idle --begin--> AwaitingResolution --receive--> Reconciling --reconcile--> Idle
//!                         |                                        \--> Terminal
//!                         \--(transport failure)--> Idle
//! ```
//!
//! [`MoveCoordinator::play`] chains the steps for sequential callers.

use crate::board_state::ShapeError;
use crate::games::tictactoe::Mark;
use crate::gate::GatePass;
use crate::hooks::PresentationHooks;
use crate::pacing::Pacing;
use crate::resolver::{MoveRequest, MoveResponse, ResolveError, Resolver};
use crate::scoreboard::{RoundEnding, Winner};
use crate::session::GameSession;
use derive_more::{Display, Error, From};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Where the move lifecycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovePhase {
    /// Waiting for a local action.
    #[default]
    Idle,
    /// A move is out with the resolver.
    AwaitingResolution,
    /// A response arrived and is waiting to be merged.
    Reconciling,
    /// The round ended; only a reset leaves this phase.
    Terminal,
}

/// Result of a move that reached the end of its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The action was dropped: round inactive, square taken, or a move
    /// already in flight.
    Ignored,
    /// The response belonged to an earlier round and was discarded.
    Stale,
    /// The round goes on.
    Continued {
        /// Mark whose turn it is.
        active: Mark,
    },
    /// The round ended.
    Finished(RoundEnding),
}

/// A recoverable move failure. The gate is already released and the
/// optimistic mark withdrawn when this is returned.
#[derive(Debug, Clone, Display, Error, From)]
pub enum MoveError {
    /// The exchange with the resolver failed.
    #[display("{_0}")]
    Resolve(ResolveError),
    /// The resolver answered with an unusable board.
    #[display("{_0}")]
    Shape(ShapeError),
}

/// A move placed optimistically and waiting to be resolved.
#[derive(Debug)]
pub struct PendingMove {
    pass: GatePass,
    round: u64,
    index: usize,
    mark: Mark,
    request: MoveRequest,
}

impl PendingMove {
    /// The request to send.
    pub fn request(&self) -> &MoveRequest {
        &self.request
    }

    /// Square the local action targeted.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Mark placed by the local action.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Sends the request and waits for the answer.
    ///
    /// Borrows nothing from the session, so it can run on its own task.
    #[instrument(skip_all, fields(round = self.round, index = self.index))]
    pub async fn resolve(self, resolver: &dyn Resolver) -> ResponseReceived {
        let result = resolver.resolve(&self.request).await;
        debug!(ok = result.is_ok(), "Resolver answered");
        ResponseReceived {
            pass: self.pass,
            round: self.round,
            index: self.index,
            mark: self.mark,
            result,
        }
    }
}

/// A resolver answer, not yet applied.
#[derive(Debug)]
pub struct ResponseReceived {
    pass: GatePass,
    round: u64,
    index: usize,
    mark: Mark,
    result: Result<MoveResponse, ResolveError>,
}

/// An accepted response waiting out its pacing delay.
#[derive(Debug)]
pub struct Reconciliation {
    pass: GatePass,
    round: u64,
    index: usize,
    mark: Mark,
    response: MoveResponse,
    delay: Duration,
}

impl Reconciliation {
    /// How long to wait before calling [`MoveCoordinator::reconcile`].
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Drives moves from local action to reconciled state.
#[derive(Clone)]
pub struct MoveCoordinator {
    resolver: Arc<dyn Resolver>,
    pacing: Pacing,
}

impl std::fmt::Debug for MoveCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveCoordinator")
            .field("pacing", &self.pacing)
            .finish_non_exhaustive()
    }
}

impl MoveCoordinator {
    /// Creates a coordinator around a resolver.
    pub fn new(resolver: Arc<dyn Resolver>, pacing: Pacing) -> Self {
        Self { resolver, pacing }
    }

    /// The resolver, for callers that run [`PendingMove::resolve`] on
    /// their own task.
    pub fn resolver(&self) -> Arc<dyn Resolver> {
        Arc::clone(&self.resolver)
    }

    /// Reconciliation pacing.
    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Idle → AwaitingResolution.
    ///
    /// Places the acting mark at `index` and returns the request to send.
    /// Returns `None`, changing nothing, when the round is inactive, the
    /// square is taken or off the board, or a move is already in flight.
    #[instrument(skip(self, session, hooks), fields(round = session.round()))]
    pub fn begin(
        &self,
        session: &mut GameSession,
        index: usize,
        hooks: &dyn PresentationHooks,
    ) -> Option<PendingMove> {
        if !session.board().is_active() {
            debug!("Round inactive, action ignored");
            return None;
        }
        if !session.board().board().is_empty(index) {
            debug!("Square unavailable, action ignored");
            return None;
        }
        let pass = session.gate().try_enter()?;

        let mark = session.board().acting_mark();
        if let Err(e) = session.board_mut().apply_mark(index, mark) {
            debug!(error = %e, "Optimistic placement refused, action ignored");
            return None;
        }
        session.set_phase(MovePhase::AwaitingResolution);
        hooks.on_mark_placed(index, mark);

        let request = MoveRequest {
            board: session.board().board().clone(),
            mode: session.board().mode(),
            level: session.difficulty(),
        };
        info!(index, %mark, mode = ?request.mode, "Move sent for resolution");

        Some(PendingMove {
            pass,
            round: session.round(),
            index,
            mark,
            request,
        })
    }

    /// AwaitingResolution → Reconciling, or → Idle on failure.
    ///
    /// Returns the reconciliation to run after its delay, or `None` when the
    /// response belongs to an earlier round.
    ///
    /// # Errors
    ///
    /// A failed exchange releases the gate, withdraws the optimistic mark,
    /// and returns [`MoveError::Resolve`]. The round stays active.
    #[instrument(skip(self, session, received), fields(round = received.round))]
    pub fn receive(
        &self,
        session: &mut GameSession,
        received: ResponseReceived,
    ) -> Result<Option<Reconciliation>, MoveError> {
        let ResponseReceived {
            pass,
            round,
            index,
            mark,
            result,
        } = received;

        if round != session.round() {
            debug!(current = session.round(), "Response from an earlier round discarded");
            return Ok(None);
        }

        match result {
            Ok(response) => {
                let delay = self
                    .pacing
                    .delay_for(session.board().mode(), response.game_over);
                session.set_phase(MovePhase::Reconciling);
                debug!(?delay, game_over = response.game_over, "Reconciliation scheduled");
                Ok(Some(Reconciliation {
                    pass,
                    round,
                    index,
                    mark,
                    response,
                    delay,
                }))
            }
            Err(e) => {
                warn!(error = %e, "Resolver exchange failed");
                session.board_mut().withdraw(index, mark);
                session.set_phase(MovePhase::Idle);
                pass.release();
                Err(e.into())
            }
        }
    }

    /// Reconciling → Idle, or → Terminal when the round ends.
    ///
    /// # Errors
    ///
    /// A malformed snapshot leaves the reconciled board untouched, withdraws
    /// the optimistic mark, releases the gate and returns
    /// [`MoveError::Shape`]. The round stays active.
    #[instrument(skip(self, session, reconciliation, hooks), fields(round = reconciliation.round))]
    pub fn reconcile(
        &self,
        session: &mut GameSession,
        reconciliation: Reconciliation,
        hooks: &dyn PresentationHooks,
    ) -> Result<MoveOutcome, MoveError> {
        let Reconciliation {
            pass,
            round,
            index,
            mark,
            response,
            ..
        } = reconciliation;

        if round != session.round() {
            debug!(current = session.round(), "Reconciliation from an earlier round discarded");
            return Ok(MoveOutcome::Stale);
        }

        let mode = session.board().mode();
        let previous_empty = session.board().board().empty_count();

        let filled = match session.board_mut().replace_from(&response.board) {
            Ok(filled) => filled,
            Err(e) => {
                warn!(error = %e, "Rejected resolver snapshot");
                session.board_mut().withdraw(index, mark);
                session.set_phase(MovePhase::Idle);
                pass.release();
                return Err(e.into());
            }
        };

        if !mode.is_automated() && !filled.is_empty() {
            warn!(added = filled.len(), "Resolver added marks to a two-player round");
        }

        let bot_moved = mode.is_automated()
            && !response.game_over
            && session.board().board().empty_count() < previous_empty;
        if bot_moved {
            for (square, placed) in &filled {
                hooks.on_mark_placed(*square, *placed);
            }
        }

        pass.release();

        if response.game_over {
            let winner = response.winner.unwrap_or_else(|| {
                warn!("Terminal response without a winner, scoring a draw");
                Winner::Draw
            });
            let ending = RoundEnding::new(winner, session.board().names());
            session.scoreboard_mut().record(winner);
            session.board_mut().finish();
            session.set_phase(MovePhase::Terminal);
            info!(%ending, "Round over");
            hooks.on_round_ended(&ending);
            return Ok(MoveOutcome::Finished(ending));
        }

        if !mode.is_automated() {
            session.board_mut().flip_turn();
        }
        session.set_phase(MovePhase::Idle);
        let active = session.board().acting_mark();
        debug!(%active, "Turn changed");
        hooks.on_turn_changed(active);
        Ok(MoveOutcome::Continued { active })
    }

    /// Runs one move end to end: begin, resolve, pace, reconcile.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] for a failed exchange or a malformed snapshot;
    /// the session is back in an idle, playable state either way.
    #[instrument(skip(self, session, hooks), fields(round = session.round()))]
    pub async fn play(
        &self,
        session: &mut GameSession,
        index: usize,
        hooks: &dyn PresentationHooks,
    ) -> Result<MoveOutcome, MoveError> {
        let Some(pending) = self.begin(session, index, hooks) else {
            return Ok(MoveOutcome::Ignored);
        };
        let received = pending.resolve(self.resolver.as_ref()).await;
        let Some(reconciliation) = self.receive(session, received)? else {
            return Ok(MoveOutcome::Stale);
        };
        if !reconciliation.delay().is_zero() {
            tokio::time::sleep(reconciliation.delay()).await;
        }
        self.reconcile(session, reconciliation, hooks)
    }
}
