//! Staged files list and the browse prompt overlay.

use crate::state::App;
use crate::theme::{attachment_color, attachment_icon};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .staging
        .entries()
        .iter()
        .map(|attachment| {
            let kind = attachment.kind();
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<4}", attachment_icon(kind)),
                    Style::default().fg(attachment_color(kind, &app.theme)),
                ),
                Span::styled(
                    attachment.file_name().to_string(),
                    Style::default().fg(app.theme.text),
                ),
                Span::styled(
                    format!("  {}", attachment.size_label()),
                    Style::default().fg(app.theme.text_dim),
                ),
            ]))
        })
        .collect();

    let border = if app.staging.is_dragging() {
        app.theme.accent
    } else {
        app.theme.border
    };
    let title = format!("Staged Files ({})", app.staging.len());

    let mut state = ListState::default();
    state.select(app.selected_file);

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .highlight_style(
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("› ");
    f.render_stateful_widget(list, area, &mut state);
}

pub fn render_browse_prompt(f: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(prompt) = app.browse.as_ref() else {
        return;
    };
    let popup = centered(area, 70, 3);
    let mut input = prompt.input.clone();
    input.set_block(
        Block::default()
            .title("Attach files (Enter confirm, Esc cancel)")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.accent)),
    );
    f.render_widget(Clear, popup);
    f.render_widget(input.widget(), popup);
}

fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
