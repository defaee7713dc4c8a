//! Game session state and the setup/screen controller.

use crate::board_state::{BoardState, PlayerNames};
use crate::coordinator::MovePhase;
use crate::gate::RequestGate;
use crate::mode::{Difficulty, GameMode};
use crate::scoreboard::Scoreboard;
use derive_more::{Display, Error};
use derive_new::new;
use tracing::{debug, info, instrument, warn};

/// Name used for O against the bot.
pub const BOT_NAME: &str = "Bot";

/// Everything one player session owns: board, scores, the single-flight
/// gate, and the lifecycle phase.
///
/// Owned by the UI root and lent to the coordinator and the controller.
#[derive(Debug, Default)]
pub struct GameSession {
    board: BoardState,
    scoreboard: Scoreboard,
    gate: RequestGate,
    phase: MovePhase,
    difficulty: Difficulty,
    round: u64,
}

impl GameSession {
    /// Creates a session with zeroed scores and no round running.
    pub fn new() -> Self {
        Self::default()
    }

    /// The canonical board.
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Session scores.
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// The single-flight gate of the current round.
    pub fn gate(&self) -> &RequestGate {
        &self.gate
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> MovePhase {
        self.phase
    }

    /// Bot strength sent with every request.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Round counter; bumps on every reset.
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Whether a move is out with the resolver.
    pub fn is_awaiting(&self) -> bool {
        self.gate.is_busy()
    }

    pub(crate) fn board_mut(&mut self) -> &mut BoardState {
        &mut self.board
    }

    pub(crate) fn scoreboard_mut(&mut self) -> &mut Scoreboard {
        &mut self.scoreboard
    }

    pub(crate) fn set_phase(&mut self, phase: MovePhase) {
        debug!(from = ?self.phase, to = ?phase, "Phase change");
        self.phase = phase;
    }

    /// Starts a fresh round on a fresh gate. Answers still in flight for
    /// the previous round are discarded when they arrive.
    fn open_round(&mut self) {
        self.round += 1;
        self.gate = RequestGate::new();
        self.board.reset();
        self.phase = MovePhase::Idle;
        info!(round = self.round, mode = ?self.board.mode(), "Round opened");
    }
}

/// Which screen the UI shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Mode, names and difficulty.
    #[default]
    Setup,
    /// The board.
    Game,
}

/// Raw setup form input.
#[derive(Debug, Clone, PartialEq, Eq, Default, new)]
pub struct SetupForm {
    /// Name typed for X.
    pub player_x: String,
    /// Name typed for O; ignored against the bot.
    pub player_o: String,
    /// Bot strength; ignored in two-player rounds.
    pub difficulty: Difficulty,
}

/// A setup form field that can be flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetupField {
    /// Player X name.
    PlayerX,
    /// Player O name.
    PlayerO,
}

/// Setup form rejected. Lists every field that failed, not just the first.
#[derive(Debug, Clone, Display, Error)]
#[display("Setup incomplete: {:?} at {}:{}", fields, file, line)]
pub struct ValidationError {
    /// Fields to mark.
    pub fields: Vec<SetupField>,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ValidationError {
    /// Creates a new validation error with caller location tracking.
    #[track_caller]
    pub fn new(fields: Vec<SetupField>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            fields,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Whether `field` is flagged.
    pub fn flags(&self, field: SetupField) -> bool {
        self.fields.contains(&field)
    }
}

/// Setup flow: mode selection, name validation, round starts, screen
/// transitions.
#[derive(Debug, Clone, Default)]
pub struct SessionController {
    screen: Screen,
    selected_mode: GameMode,
}

impl SessionController {
    /// Creates a controller on the setup screen in two-player mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Mode chosen on the setup screen.
    pub fn selected_mode(&self) -> GameMode {
        self.selected_mode
    }

    /// Chooses the mode for the next round. No validation.
    #[instrument(skip(self))]
    pub fn select_mode(&mut self, mode: GameMode) {
        self.selected_mode = mode;
    }

    /// Validates the form and starts a round.
    ///
    /// X's name is always required; O's only in two-player mode. Against
    /// the bot O is named [`BOT_NAME`] and the form's difficulty applies.
    /// Scores carry over from earlier rounds.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] flagging every missing name. Nothing in
    /// the session or the screen changes in that case.
    #[instrument(skip(self, session, form), fields(mode = ?self.selected_mode))]
    pub fn start_round(
        &mut self,
        session: &mut GameSession,
        form: &SetupForm,
    ) -> Result<(), ValidationError> {
        let mode = self.selected_mode;
        let player_x = form.player_x.trim();
        let player_o = form.player_o.trim();

        let mut missing = Vec::new();
        if player_x.is_empty() {
            missing.push(SetupField::PlayerX);
        }
        if mode == GameMode::HumanVsHuman && player_o.is_empty() {
            missing.push(SetupField::PlayerO);
        }
        if !missing.is_empty() {
            warn!(?missing, "Setup form rejected");
            return Err(ValidationError::new(missing));
        }

        let names = match mode {
            GameMode::HumanVsHuman => PlayerNames::new(player_x, player_o),
            GameMode::HumanVsAutomated => {
                session.difficulty = form.difficulty;
                PlayerNames::new(player_x, BOT_NAME)
            }
        };
        info!(x = %names.x, o = %names.o, difficulty = %session.difficulty, "Starting round");

        session.board_mut().configure(mode, names);
        session.open_round();
        self.screen = Screen::Game;
        Ok(())
    }

    /// Plays again with the same names, mode and scores. Leaves the
    /// terminal phase.
    #[instrument(skip(self, session))]
    pub fn reset(&mut self, session: &mut GameSession) {
        session.open_round();
        self.screen = Screen::Game;
    }

    /// Back to the setup screen. Scores and names are kept.
    #[instrument(skip(self))]
    pub fn return_to_setup(&mut self) {
        self.screen = Screen::Setup;
    }
}
