//! Ultra theme and color utilities.

use codeops_core::{AttachmentKind, EngineMode, MessageAlign};
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct UltraTheme {
    pub bg: Color,
    pub card: Color,
    pub border: Color,
    pub border_focus: Color,
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub text: Color,
    pub text_dim: Color,
}

impl UltraTheme {
    pub fn ultra() -> Self {
        Self {
            bg: Color::Rgb(2, 4, 10),
            card: Color::Rgb(15, 17, 26),
            border: Color::Rgb(30, 33, 48),
            border_focus: Color::Rgb(99, 102, 241),
            primary: Color::Rgb(99, 102, 241),
            secondary: Color::Rgb(168, 85, 247),
            accent: Color::Rgb(6, 182, 212),
            success: Color::Rgb(16, 185, 129),
            warning: Color::Rgb(245, 158, 11),
            error: Color::Rgb(239, 68, 68),
            text: Color::Rgb(226, 232, 240),
            text_dim: Color::Rgb(100, 116, 139),
        }
    }
}

impl Default for UltraTheme {
    fn default() -> Self {
        Self::ultra()
    }
}

/// Speaker color: the operator in primary, the agent in secondary.
pub fn message_color(align: MessageAlign, theme: &UltraTheme) -> Color {
    match align {
        MessageAlign::Right => theme.primary,
        MessageAlign::Left => theme.secondary,
    }
}

pub fn engine_color(mode: EngineMode, theme: &UltraTheme) -> Color {
    match mode {
        EngineMode::Cloud => theme.accent,
        EngineMode::Local => theme.success,
    }
}

pub fn attachment_icon(kind: AttachmentKind) -> &'static str {
    match kind {
        AttachmentKind::Image => "🖼",
        AttachmentKind::Document => "📄",
        AttachmentKind::Code => "</>",
    }
}

pub fn attachment_color(kind: AttachmentKind, theme: &UltraTheme) -> Color {
    match kind {
        AttachmentKind::Image => theme.secondary,
        AttachmentKind::Document => theme.error,
        AttachmentKind::Code => theme.accent,
    }
}

/// Execution log lines are colored by their leading marker.
pub fn log_line_color(line: &str, theme: &UltraTheme) -> Color {
    let lower = line.to_ascii_lowercase();
    if line.starts_with("🚀") {
        theme.primary
    } else if line.starts_with("❌") || lower.contains("error") {
        theme.error
    } else if lower.contains("success") || line.starts_with("✅") {
        theme.success
    } else {
        theme.text_dim
    }
}
