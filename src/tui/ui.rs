//! Stateless rendering for the setup and game screens.

use super::app::{App, SetupFocus};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strictly_xo::{GameMode, Mark, Position, Screen, SetupField, Square};

/// Draws whichever screen is active.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Status
            Constraint::Length(3), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Strictly XO - Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let help = match app.screen() {
        Screen::Setup => {
            draw_setup(frame, chunks[1], app);
            "Tab/Arrows: move | Space: change | Enter: start | Esc: quit"
        }
        Screen::Game => {
            draw_game(frame, chunks[1], app);
            "Arrows + Enter or 1-9: move | R: play again | B: setup | Q: quit"
        }
    };

    let status = Paragraph::new(status_line(app))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, chunks[2]);

    let help = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[3]);
}

fn status_line(app: &App) -> String {
    let session = app.session();
    if app.screen() == Screen::Game
        && session.is_awaiting()
        && session.board().mode().is_automated()
    {
        return format!("{} is thinking...", session.board().names().o);
    }
    app.status().to_string()
}

fn draw_setup(frame: &mut Frame, area: Rect, app: &App) {
    let mode = app.selected_mode();
    let form = app.form();

    let mut lines = vec![
        Line::from(""),
        setup_row(app, SetupFocus::Mode, "Mode", mode.name(), false),
        setup_row(
            app,
            SetupFocus::PlayerX,
            "Player 1 (X)",
            &form.player_x,
            app.is_invalid(SetupField::PlayerX),
        ),
    ];
    match mode {
        GameMode::HumanVsHuman => lines.push(setup_row(
            app,
            SetupFocus::PlayerO,
            "Player 2 (O)",
            &form.player_o,
            app.is_invalid(SetupField::PlayerO),
        )),
        GameMode::HumanVsAutomated => {
            let level = form.difficulty.to_string();
            lines.push(setup_row(app, SetupFocus::Difficulty, "Difficulty", &level, false));
        }
    }

    let block = Block::default().borders(Borders::ALL).title("New game");
    frame.render_widget(Paragraph::new(lines).block(block), center_rect(area, 50, 7));
}

fn setup_row(app: &App, focus: SetupFocus, label: &str, value: &str, invalid: bool) -> Line<'static> {
    let focused = app.focus() == focus;
    let marker = if focused { "> " } else { "  " };
    let value_style = if focused {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::raw(marker),
        Span::styled(format!("{:<14}", label), Style::default().fg(Color::Cyan)),
        Span::styled(value.to_string(), value_style),
    ];
    if invalid {
        spans.push(Span::styled("  * required", Style::default().fg(Color::Red)));
    }
    Line::from(spans)
}

fn draw_game(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(28)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(11), Constraint::Length(3)])
        .split(columns[0]);

    draw_board(frame, left[0], app);
    draw_banner(frame, left[1], app);
    draw_scores(frame, columns[1], app);
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) {
    let board = app.session().board().board();
    let mut lines = Vec::new();
    for row in 0..3 {
        if row > 0 {
            lines.push(Line::styled("───┼───┼───", Style::default().fg(Color::DarkGray)));
        }
        let mut spans = Vec::new();
        for col in 0..3 {
            if col > 0 {
                spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
            }
            if let Some(pos) = Position::at(row, col) {
                spans.push(cell_span(board.get(pos.to_index()), pos, pos == app.cursor()));
            }
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, center_rect(area, 13, 5));
}

fn cell_span(square: Option<Square>, pos: Position, under_cursor: bool) -> Span<'static> {
    let (symbol, style) = match square {
        Some(Square::Occupied(Mark::X)) => (
            " X ".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Some(Square::Occupied(Mark::O)) => (
            " O ".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        _ => (
            format!(" {} ", pos.to_index() + 1),
            Style::default().fg(Color::DarkGray),
        ),
    };

    let style = if under_cursor {
        style.bg(Color::White).fg(Color::Black)
    } else {
        style
    };
    Span::styled(symbol, style)
}

fn draw_banner(frame: &mut Frame, area: Rect, app: &App) {
    let Some(ending) = app.ending() else {
        return;
    };
    let mut spans = vec![Span::styled(
        ending.to_string(),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )];
    if ending.celebrates() {
        spans.insert(0, Span::styled("*** ", Style::default().fg(Color::Magenta)));
        spans.push(Span::styled(" ***", Style::default().fg(Color::Magenta)));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn draw_scores(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let board = session.board();
    let scores = session.scoreboard();
    let o_label = if board.mode().is_automated() { "BOT" } else { "P2" };
    let active = board.is_active().then(|| board.acting_mark());

    let row = |label: &str, mark: Mark| {
        let style = if active == Some(mark) {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Line::styled(
            format!("{} {} ({}): {}", label, board.names().name(mark), mark, scores.wins(mark)),
            style,
        )
    };

    let lines = vec![
        row("P1", Mark::X),
        row(o_label, Mark::O),
        Line::from(format!("Draws: {}", scores.draws())),
        Line::from(""),
        Line::from(format!("Mode: {}", board.mode().name())),
        Line::from(format!("Round {}", session.round())),
    ];

    let block = Block::default().borders(Borders::ALL).title("Score");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}
