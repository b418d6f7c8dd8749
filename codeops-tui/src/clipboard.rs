//! System clipboard backed by `arboard`.

use codeops_core::{Clipboard, ClipboardError};

/// Opens the platform clipboard on first use and keeps it for the session.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            let opened = arboard::Clipboard::new()
                .map_err(|err| ClipboardError::Unavailable(err.to_string()))?;
            self.inner = Some(opened);
        }
        let Some(clipboard) = self.inner.as_mut() else {
            return Err(ClipboardError::Unavailable("clipboard not opened".to_string()));
        };
        clipboard
            .set_text(text.to_string())
            .map_err(|err| ClipboardError::Write(err.to_string()))
    }
}
