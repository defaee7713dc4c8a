//! Cosmetic delay between a resolver answer and its reconciliation.

use crate::mode::GameMode;
use derive_new::new;
use std::time::Duration;

/// How long reconciliation waits after a response arrives.
///
/// The delay is presentation only; [`Pacing::instant`] keeps every
/// functional behavior and is what tests use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Pacing {
    /// Wait before showing the bot's reply ("thinking").
    thinking: Duration,
    /// Wait for every other response.
    settle: Duration,
}

impl Pacing {
    /// No delay at all.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Delay before reconciling a response in `mode`.
    pub fn delay_for(&self, mode: GameMode, game_over: bool) -> Duration {
        if mode.is_automated() && !game_over {
            self.thinking
        } else {
            self.settle
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000), Duration::from_millis(50))
    }
}
