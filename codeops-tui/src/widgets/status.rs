//! Status indicator widget.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct StatusIndicator<'a> {
    pub title: &'a str,
    pub status: String,
    pub style: Style,
    pub border: Style,
}

impl StatusIndicator<'_> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let paragraph = Paragraph::new(self.status.as_str())
            .style(self.style.add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title(self.title)
                    .borders(Borders::ALL)
                    .border_style(self.border),
            );
        f.render_widget(paragraph, area);
    }
}
