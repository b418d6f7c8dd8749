//! Transcript, solution artifact and task input.

use crate::state::App;
use crate::theme::message_color;
use codeops_core::{empty_transcript_hint, MessageAlign, MessageView};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const ARTIFACT_TITLE: &str = "SOLUTION.py";
const ARTIFACT_MAX_HEIGHT: u16 = 14;

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let artifact_height = app
        .orchestrator
        .artifact()
        .map(artifact_height)
        .unwrap_or(0);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(artifact_height),
            Constraint::Length(3),
        ])
        .split(area);

    render_transcript(f, app, chunks[0]);
    if let Some(code) = app.orchestrator.artifact() {
        render_artifact(f, app, code, chunks[1]);
    }
    render_input(f, app, chunks[2]);
}

/// Code lines plus the two border rows, capped.
fn artifact_height(code: &str) -> u16 {
    u16::try_from(code.lines().count())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(ARTIFACT_MAX_HEIGHT)
}

fn render_transcript(f: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .title("Mission")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    let transcript = app.orchestrator.transcript();
    if transcript.is_empty() {
        let hint = Paragraph::new(empty_transcript_hint())
            .style(Style::default().fg(app.theme.text_dim))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(hint, area);
        return;
    }

    let mut lines = Vec::new();
    for message in transcript {
        let view = MessageView::project(message);
        let alignment = match view.align {
            MessageAlign::Left => Alignment::Left,
            MessageAlign::Right => Alignment::Right,
        };
        let color = message_color(view.align, &app.theme);
        lines.push(
            Line::from(Span::styled(
                view.speaker,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .alignment(alignment),
        );
        for body_line in view.body.lines() {
            lines.push(
                Line::from(Span::styled(
                    body_line.to_string(),
                    Style::default().fg(app.theme.text),
                ))
                .alignment(alignment),
            );
        }
        lines.push(Line::default());
    }

    // Keep the newest entries in view.
    let visible = area.height.saturating_sub(2) as usize;
    let skip = lines.len().saturating_sub(visible);
    let paragraph = Paragraph::new(lines.split_off(skip))
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(paragraph, area);
}

fn render_artifact(f: &mut Frame<'_>, app: &App, code: &str, area: Rect) {
    let lines: Vec<Line> = code
        .lines()
        .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(app.theme.text))))
        .collect();
    let title = Line::from(vec![
        Span::styled(
            ARTIFACT_TITLE,
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ^Y copy", Style::default().fg(app.theme.text_dim)),
    ]);
    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(app.theme.card))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.primary)),
        );
    f.render_widget(paragraph, area);
}

fn render_input(f: &mut Frame<'_>, app: &App, area: Rect) {
    let busy = app.orchestrator.is_busy();
    let (title, border) = if busy {
        ("Working…", app.theme.border)
    } else {
        ("Task", app.theme.border_focus)
    };
    let mut input = app.input.clone();
    input.set_block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    if busy {
        input.set_style(Style::default().fg(app.theme.text_dim));
        input.set_cursor_style(Style::default());
    }
    f.render_widget(input.widget(), area);
}
