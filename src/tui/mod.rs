//! Terminal front-end.
//!
//! Input, resolver answers and pacing timers all arrive on one loop, which
//! is the only place the session is mutated.

mod app;
mod input;
mod ui;

use anyhow::Result;
use app::{Action, App};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::path::Path;
use std::time::Duration;
use strictly_xo::{
    Difficulty, GameEvent, MoveCoordinator, Reconciliation, ResponseReceived,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

/// Work finishing off the event loop.
#[derive(Debug)]
enum Flight {
    /// The resolver answered.
    Answered(ResponseReceived),
    /// A reconciliation's pacing delay elapsed.
    Due(Reconciliation),
}

/// Logs to `log_file` so the alternate screen stays clean.
pub fn init_file_logging(log_file: &Path) -> Result<()> {
    let file = std::fs::File::create(log_file)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}

/// Runs the terminal client until the player quits.
#[instrument(skip_all)]
pub async fn run_tui(coordinator: MoveCoordinator, difficulty: Difficulty) -> Result<()> {
    info!(?coordinator, "Starting terminal client");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, &coordinator, App::new(difficulty)).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Terminal client failed");
    }
    res
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    coordinator: &MoveCoordinator,
    mut app: App,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<GameEvent>();
    let (flight_tx, mut flight_rx) = mpsc::unbounded_channel::<Flight>();

    loop {
        while let Ok(flight) = flight_rx.try_recv() {
            land(coordinator, &mut app, &event_tx, &flight_tx, flight);
        }
        while let Ok(event) = event_rx.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|f| ui::draw(f, &app))?;

        if !event::poll(Duration::from_millis(50))? {
            tokio::task::yield_now().await;
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_key(key) {
            Action::None => {}
            Action::Quit => {
                info!("Player quit");
                return Ok(());
            }
            Action::Play(cell) => {
                let Some(pending) = coordinator.begin(app.session_mut(), cell.to_index(), &event_tx)
                else {
                    debug!(%cell, "Move not started");
                    continue;
                };
                let resolver = coordinator.resolver();
                let tx = flight_tx.clone();
                tokio::spawn(async move {
                    let received = pending.resolve(resolver.as_ref()).await;
                    let _ = tx.send(Flight::Answered(received));
                });
            }
        }
    }
}

/// Advances a move that came back to the loop.
fn land(
    coordinator: &MoveCoordinator,
    app: &mut App,
    event_tx: &mpsc::UnboundedSender<GameEvent>,
    flight_tx: &mpsc::UnboundedSender<Flight>,
    flight: Flight,
) {
    match flight {
        Flight::Answered(received) => match coordinator.receive(app.session_mut(), received) {
            Ok(Some(reconciliation)) => {
                let tx = flight_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(reconciliation.delay()).await;
                    let _ = tx.send(Flight::Due(reconciliation));
                });
            }
            Ok(None) => {}
            Err(e) => app.report(&e),
        },
        Flight::Due(reconciliation) => {
            if let Err(e) = coordinator.reconcile(app.session_mut(), reconciliation, event_tx) {
                app.report(&e);
            }
        }
    }
}
