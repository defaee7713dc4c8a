//! Application state and key handling.

use super::input::{digit_cell, is_quit, move_cursor};
use crossterm::event::{KeyCode, KeyEvent};
use strictly_xo::{
    Difficulty, GameEvent, GameMode, GameSession, MoveError, Position, RoundEnding, Screen,
    SessionController, SetupField, SetupForm,
};
use tracing::{debug, info};

/// Setup screen rows that take focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupFocus {
    /// Mode toggle.
    Mode,
    /// First player's name.
    PlayerX,
    /// Second player's name (two-player only).
    PlayerO,
    /// Bot strength (bot only).
    Difficulty,
}

impl SetupFocus {
    fn order(mode: GameMode) -> [SetupFocus; 3] {
        match mode {
            GameMode::HumanVsHuman => [Self::Mode, Self::PlayerX, Self::PlayerO],
            GameMode::HumanVsAutomated => [Self::Mode, Self::PlayerX, Self::Difficulty],
        }
    }

    fn step(self, mode: GameMode, forward: bool) -> Self {
        let order = Self::order(mode);
        let at = order.iter().position(|f| *f == self).unwrap_or(0);
        let next = if forward {
            (at + 1) % order.len()
        } else {
            (at + order.len() - 1) % order.len()
        };
        order[next]
    }
}

/// What the event loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing beyond redrawing.
    None,
    /// Send a move for this cell.
    Play(Position),
    /// Leave the program.
    Quit,
}

/// Main application state. Owns the session.
#[derive(Debug)]
pub struct App {
    session: GameSession,
    controller: SessionController,
    form: SetupForm,
    focus: SetupFocus,
    invalid: Vec<SetupField>,
    cursor: Position,
    status: String,
    ending: Option<RoundEnding>,
}

impl App {
    /// Creates the app on the setup screen.
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            session: GameSession::new(),
            controller: SessionController::new(),
            form: SetupForm::new(String::new(), String::new(), difficulty),
            focus: SetupFocus::PlayerX,
            invalid: Vec::new(),
            cursor: Position::Center,
            status: String::new(),
            ending: None,
        }
    }

    /// The session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Mutable session, lent to the coordinator.
    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    /// Current screen.
    pub fn screen(&self) -> Screen {
        self.controller.screen()
    }

    /// Mode selected on the setup screen.
    pub fn selected_mode(&self) -> GameMode {
        self.controller.selected_mode()
    }

    /// Setup form contents.
    pub fn form(&self) -> &SetupForm {
        &self.form
    }

    /// Focused setup row.
    pub fn focus(&self) -> SetupFocus {
        self.focus
    }

    /// Whether `field` failed the last validation.
    pub fn is_invalid(&self, field: SetupField) -> bool {
        self.invalid.contains(&field)
    }

    /// Board cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Status line text.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// How the last round ended, while its banner is up.
    pub fn ending(&self) -> Option<&RoundEnding> {
        self.ending.as_ref()
    }

    /// Updates the status line from a presentation hook.
    pub fn handle_event(&mut self, event: GameEvent) {
        debug!(?event, "Handling game event");
        let names = self.session.board().names();
        match event {
            GameEvent::MarkPlaced { index, mark } => {
                let cell = Position::from_index(index).map(Position::label).unwrap_or("?");
                self.status = format!("{} ({}) played {}", names.name(mark), mark, cell);
            }
            GameEvent::TurnChanged { active } => {
                self.status = format!("{}'s turn ({})", names.name(active), active);
            }
            GameEvent::RoundEnded(ending) => {
                self.status = "R: play again | B: back to setup | Q: quit".to_string();
                self.ending = Some(ending);
            }
        }
    }

    /// Shows a failed move. The round stays playable.
    pub fn report(&mut self, error: &MoveError) {
        self.status = match error {
            MoveError::Resolve(e) => format!("Move not confirmed ({}). Try again.", e.kind),
            MoveError::Shape(e) => format!("Server sent a bad board ({}). Try again.", e.kind),
        };
    }

    /// Handles one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if is_quit(&key) {
            return Action::Quit;
        }
        match self.controller.screen() {
            Screen::Setup => self.setup_key(key.code),
            Screen::Game => self.game_key(key.code),
        }
    }

    fn setup_key(&mut self, code: KeyCode) -> Action {
        let mode = self.controller.selected_mode();
        match (self.focus, code) {
            (_, KeyCode::Esc) => return Action::Quit,
            (_, KeyCode::Enter) => self.start(),
            (_, KeyCode::Tab | KeyCode::Down) => self.focus = self.focus.step(mode, true),
            (_, KeyCode::BackTab | KeyCode::Up) => self.focus = self.focus.step(mode, false),
            (SetupFocus::Mode, KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')) => {
                self.controller.select_mode(mode.toggle());
                self.invalid.clear();
            }
            (SetupFocus::Difficulty, KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')) => {
                self.form.difficulty = self.form.difficulty.cycle();
            }
            (SetupFocus::PlayerX, KeyCode::Char(c)) => self.form.player_x.push(c),
            (SetupFocus::PlayerX, KeyCode::Backspace) => {
                self.form.player_x.pop();
            }
            (SetupFocus::PlayerO, KeyCode::Char(c)) => self.form.player_o.push(c),
            (SetupFocus::PlayerO, KeyCode::Backspace) => {
                self.form.player_o.pop();
            }
            _ => {}
        }
        Action::None
    }

    fn start(&mut self) {
        match self.controller.start_round(&mut self.session, &self.form) {
            Ok(()) => {
                self.invalid.clear();
                self.begin_round_view();
                info!(mode = ?self.selected_mode(), "Round started from setup");
            }
            Err(e) => self.invalid = e.fields,
        }
    }

    fn begin_round_view(&mut self) {
        self.ending = None;
        self.cursor = Position::Center;
        let names = self.session.board().names();
        self.status = format!("{}'s turn (X)", names.x);
    }

    fn game_key(&mut self, code: KeyCode) -> Action {
        match code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('b') | KeyCode::Esc => {
                self.controller.return_to_setup();
                self.ending = None;
                self.focus = SetupFocus::PlayerX;
                Action::None
            }
            KeyCode::Char('r') if !self.session.board().is_active() => {
                self.controller.reset(&mut self.session);
                self.begin_round_view();
                Action::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => Action::Play(self.cursor),
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, code);
                Action::None
            }
            other => match digit_cell(other) {
                Some(cell) => {
                    self.cursor = cell;
                    Action::Play(cell)
                }
                None => Action::None,
            },
        }
    }
}
