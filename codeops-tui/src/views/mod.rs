//! View rendering dispatch.

pub mod console;
pub mod log;
pub mod staging;

use crate::notifications::NotificationLevel;
use crate::state::App;
use crate::theme::engine_color;
use crate::widgets::StatusIndicator;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const KEY_HELP: &str =
    "Enter engage • ^T engine • ^O attach • ↑/↓ select • ^X remove • ^Y copy • ^Q quit";

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, app, root[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(root[1]);

    console::render(f, app, columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(columns[1]);
    staging::render(f, app, right[0]);
    log::render(f, app, right[1]);

    render_footer(f, app, root[2]);

    if app.browse.is_some() {
        staging::render_browse_prompt(f, app, root[1]);
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(20),
            Constraint::Length(16),
        ])
        .split(area);

    let title = Line::from(vec![
        Span::styled(
            "CODE-OPS ",
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "ULTRA",
            Style::default()
                .fg(app.theme.secondary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  autonomous solver console",
            Style::default().fg(app.theme.text_dim),
        ),
    ]);
    let header = Paragraph::new(title).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(header, chunks[0]);

    let mode = app.orchestrator.engine_mode();
    StatusIndicator {
        title: "Engine",
        status: format!("{} ENGINE", mode.as_str().to_ascii_uppercase()),
        style: Style::default().fg(engine_color(mode, &app.theme)),
        border: Style::default().fg(app.theme.border),
    }
    .render(f, chunks[1]);

    let (status, color) = if app.orchestrator.is_busy() {
        ("WORKING…", app.theme.warning)
    } else {
        ("READY", app.theme.success)
    };
    StatusIndicator {
        title: "Agent",
        status: status.to_string(),
        style: Style::default().fg(color),
        border: Style::default().fg(app.theme.border),
    }
    .render(f, chunks[2]);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let (text, style) = match app.notifications.last() {
        Some(note) => {
            let color = match note.level {
                NotificationLevel::Info => app.theme.accent,
                NotificationLevel::Warning => app.theme.warning,
                NotificationLevel::Error => app.theme.error,
                NotificationLevel::Success => app.theme.success,
            };
            (
                format!("{}: {}", note.level.label(), note.message),
                Style::default().fg(color),
            )
        }
        None => (KEY_HELP.to_string(), Style::default().fg(app.theme.text_dim)),
    };
    let footer = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(footer, area);
}
