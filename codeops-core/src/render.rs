//! Transcript projection for display. Pure functions, no state.

use crate::mission::{Message, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageAlign {
    Left,
    Right,
}

/// Display form of one transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageView<'a> {
    pub speaker: &'static str,
    pub align: MessageAlign,
    pub body: &'a str,
}

impl<'a> MessageView<'a> {
    pub fn project(message: &'a Message) -> Self {
        match message.role {
            Role::User => Self {
                speaker: "COMMANDER",
                align: MessageAlign::Right,
                body: &message.content,
            },
            Role::Agent => Self {
                speaker: "SYSTEM AI",
                align: MessageAlign::Left,
                body: &message.content,
            },
        }
    }
}

/// Shown in place of the transcript before the first mission.
pub fn empty_transcript_hint() -> &'static str {
    "System Online. Select Engine & Engage."
}

pub fn input_placeholder(staged_count: usize) -> String {
    if staged_count > 0 {
        format!("Analyzing {} attached file(s)...", staged_count)
    } else {
        "Command the agent...".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_are_right_aligned_commander() {
        let message = Message::user("list files");
        let view = MessageView::project(&message);
        assert_eq!(view.speaker, "COMMANDER");
        assert_eq!(view.align, MessageAlign::Right);
        assert_eq!(view.body, "list files");
    }

    #[test]
    fn agent_messages_are_left_aligned_system() {
        let message = Message::agent("Mission Failed. Check logs.");
        let view = MessageView::project(&message);
        assert_eq!(view.speaker, "SYSTEM AI");
        assert_eq!(view.align, MessageAlign::Left);
    }

    #[test]
    fn placeholder_mentions_staged_files() {
        assert_eq!(input_placeholder(0), "Command the agent...");
        assert_eq!(input_placeholder(3), "Analyzing 3 attached file(s)...");
    }
}
