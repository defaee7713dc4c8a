//! Presentation hooks: fire-and-forget notifications for render, audio
//! and celebration layers.

use crate::games::tictactoe::Mark;
use crate::scoreboard::RoundEnding;
use tokio::sync::mpsc;
use tracing::debug;

/// Observers of the move lifecycle. Nothing they do feeds back into the
/// coordinator.
pub trait PresentationHooks {
    /// A mark appeared on the board (local placement or bot reply).
    fn on_mark_placed(&self, index: usize, mark: Mark);

    /// The round continues; `active` moves next.
    fn on_turn_changed(&self, active: Mark);

    /// The round is over.
    fn on_round_ended(&self, ending: &RoundEnding);
}

/// Messages sent from the coordinator to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Mark placed at a board index.
    MarkPlaced {
        /// Board index (0-8).
        index: usize,
        /// The mark.
        mark: Mark,
    },
    /// Turn passed.
    TurnChanged {
        /// Mark to move next.
        active: Mark,
    },
    /// Round ended.
    RoundEnded(RoundEnding),
}

impl PresentationHooks for mpsc::UnboundedSender<GameEvent> {
    fn on_mark_placed(&self, index: usize, mark: Mark) {
        notify(self, GameEvent::MarkPlaced { index, mark });
    }

    fn on_turn_changed(&self, active: Mark) {
        notify(self, GameEvent::TurnChanged { active });
    }

    fn on_round_ended(&self, ending: &RoundEnding) {
        notify(self, GameEvent::RoundEnded(ending.clone()));
    }
}

fn notify(tx: &mpsc::UnboundedSender<GameEvent>, event: GameEvent) {
    if let Err(e) = tx.send(event) {
        debug!(event = ?e.0, "No presentation listener");
    }
}

/// Hooks that ignore every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl PresentationHooks for NoopHooks {
    fn on_mark_placed(&self, _index: usize, _mark: Mark) {}

    fn on_turn_changed(&self, _active: Mark) {}

    fn on_round_ended(&self, _ending: &RoundEnding) {}
}
