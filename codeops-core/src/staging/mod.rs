//! File Staging Area
//!
//! Ordered attachment list for the next mission. Every successful mutation
//! publishes the full list through a `watch` channel; the orchestrator side
//! holds a [`StagingSubscription`] and takes an owned snapshot at submit
//! time, so later mutations never reach a mission that is already in flight.

mod adapters;

pub use adapters::{load_paths, parse_dropped_paths, resolve_drop, BrowseOutcome};

use crate::attachment::Attachment;
use tokio::sync::watch;

#[derive(Debug)]
pub struct StagingArea {
    entries: Vec<Attachment>,
    dragging: bool,
    publisher: watch::Sender<Vec<Attachment>>,
}

/// Read side of the staging publication.
#[derive(Debug, Clone)]
pub struct StagingSubscription {
    receiver: watch::Receiver<Vec<Attachment>>,
}

impl StagingArea {
    pub fn new() -> Self {
        let (publisher, _) = watch::channel(Vec::new());
        Self {
            entries: Vec::new(),
            dragging: false,
            publisher,
        }
    }

    pub fn subscribe(&self) -> StagingSubscription {
        StagingSubscription {
            receiver: self.publisher.subscribe(),
        }
    }

    pub fn entries(&self) -> &[Attachment] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append attachments in order. No deduplication and no limits.
    pub fn add<I>(&mut self, attachments: I)
    where
        I: IntoIterator<Item = Attachment>,
    {
        let before = self.entries.len();
        self.entries.extend(attachments);
        tracing::debug!(
            added = self.entries.len() - before,
            total = self.entries.len(),
            "Attachments staged"
        );
        self.publish();
    }

    /// Remove the entry at `index`, shifting later entries down.
    /// Out-of-range indices are ignored and publish nothing.
    pub fn remove(&mut self, index: usize) -> Option<Attachment> {
        if index >= self.entries.len() {
            tracing::debug!(index, len = self.entries.len(), "Remove out of range ignored");
            return None;
        }
        let removed = self.entries.remove(index);
        self.publish();
        Some(removed)
    }

    // ------------------------------------------------------------------------
    // Drag state (visual only, never touches the list)
    // ------------------------------------------------------------------------

    pub fn drag_enter(&mut self) {
        self.dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// A drop ends the drag and stages the dropped files.
    pub fn drop_files<I>(&mut self, attachments: I)
    where
        I: IntoIterator<Item = Attachment>,
    {
        self.dragging = false;
        self.add(attachments);
    }

    fn publish(&self) {
        self.publisher.send_replace(self.entries.clone());
    }
}

impl Default for StagingArea {
    fn default() -> Self {
        Self::new()
    }
}

impl StagingSubscription {
    /// Owned copy of the most recently published list.
    pub fn snapshot(&self) -> Vec<Attachment> {
        self.receiver.borrow().clone()
    }

    /// Whether a publication arrived since the last `mark_seen`.
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    pub fn mark_seen(&mut self) -> Vec<Attachment> {
        self.receiver.borrow_and_update().clone()
    }
}
