//! Execution log panel.

use crate::state::App;
use crate::theme::log_line_color;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let log = app.orchestrator.execution_log();
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = log[log.len().saturating_sub(visible)..]
        .iter()
        .map(|line| {
            Line::from(Span::styled(
                line.clone(),
                Style::default().fg(log_line_color(line, &app.theme)),
            ))
        })
        .collect();

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Execution Log")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(paragraph, area);
}
