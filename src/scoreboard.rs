//! Session scores and round endings.

use crate::board_state::PlayerNames;
use crate::games::tictactoe::Mark;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Terminal verdict reported by the resolver.
///
/// On the wire: `"X"`, `"O"` or `"Draw"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    /// X completed a line.
    X,
    /// O completed a line.
    O,
    /// Board full, no line.
    Draw,
}

impl Winner {
    /// The winning mark, or `None` for a draw.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Winner::X => Some(Mark::X),
            Winner::O => Some(Mark::O),
            Winner::Draw => None,
        }
    }
}

impl From<Mark> for Winner {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::X => Winner::X,
            Mark::O => Winner::O,
        }
    }
}

/// How a round ended, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundEnding {
    /// A player won.
    Won {
        /// Winning mark.
        mark: Mark,
        /// Display name of the winner.
        name: String,
    },
    /// Nobody won.
    Draw,
}

impl RoundEnding {
    /// Resolves a verdict against the round's player names.
    pub fn new(winner: Winner, names: &PlayerNames) -> Self {
        match winner.mark() {
            Some(mark) => RoundEnding::Won {
                mark,
                name: names.name(mark).to_string(),
            },
            None => RoundEnding::Draw,
        }
    }

    /// Wins get the victory sound and confetti; draws do not.
    pub fn celebrates(&self) -> bool {
        matches!(self, RoundEnding::Won { .. })
    }
}

impl std::fmt::Display for RoundEnding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundEnding::Won { name, .. } => write!(f, "{} WINS!", name),
            RoundEnding::Draw => write!(f, "IT'S A DRAW!"),
        }
    }
}

/// Win and draw counters for the whole session. Never reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    wins_x: u32,
    wins_o: u32,
    draws: u32,
}

impl Scoreboard {
    /// Wins recorded for `mark`.
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.wins_x,
            Mark::O => self.wins_o,
        }
    }

    /// Draws recorded.
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Total rounds finished.
    pub fn rounds(&self) -> u32 {
        self.wins_x + self.wins_o + self.draws
    }

    /// Increments exactly one counter.
    #[instrument(skip(self))]
    pub fn record(&mut self, winner: Winner) {
        let counter = match winner {
            Winner::X => &mut self.wins_x,
            Winner::O => &mut self.wins_o,
            Winner::Draw => &mut self.draws,
        };
        *counter = counter.saturating_add(1);
        info!(x = self.wins_x, o = self.wins_o, draws = self.draws, "Score updated");
    }
}
