//! Application state for the console.
//!
//! `App` is owned by the event loop and is only mutated there. The solver
//! request itself runs elsewhere; its outcome comes back as an event and is
//! applied through [`App::finish_mission`].

use crate::config::TuiConfig;
use crate::notifications::{Notification, NotificationLevel};
use crate::theme::UltraTheme;
use chrono::{DateTime, Utc};
use codeops_core::{
    input_placeholder, load_paths, parse_dropped_paths, resolve_drop, BrowseOutcome, Clipboard,
    Completion, MissionId, MissionOrchestrator, MissionOutcome, MissionRequest, StagingArea,
    StagingSubscription,
};
use crossterm::event::KeyEvent;
use tui_textarea::TextArea;

/// Path prompt opened with the browse key.
pub struct BrowsePrompt {
    pub input: TextArea<'static>,
}

impl BrowsePrompt {
    fn new() -> Self {
        let mut input = TextArea::default();
        input.set_placeholder_text("Path(s) to attach, space separated");
        Self { input }
    }

    fn text(&self) -> String {
        self.input.lines().join(" ")
    }
}

pub struct App {
    pub config: TuiConfig,
    pub theme: UltraTheme,
    pub orchestrator: MissionOrchestrator,
    pub staging: StagingArea,
    pub input: TextArea<'static>,
    pub selected_file: Option<usize>,
    pub browse: Option<BrowsePrompt>,
    pub notifications: Vec<Notification>,
    subscription: StagingSubscription,
}

impl App {
    pub fn new(config: TuiConfig) -> Self {
        let staging = StagingArea::new();
        let subscription = staging.subscribe();
        let orchestrator = MissionOrchestrator::new(config.default_mode);
        Self {
            config,
            theme: UltraTheme::ultra(),
            orchestrator,
            staging,
            input: task_input(0),
            selected_file: None,
            browse: None,
            notifications: Vec::new(),
            subscription,
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }

    pub fn prune_notifications(&mut self, now: DateTime<Utc>) {
        self.notifications.retain(|note| !note.is_expired(now));
    }

    pub fn task_text(&self) -> String {
        self.input.lines().join("\n")
    }

    // ------------------------------------------------------------------------
    // Missions
    // ------------------------------------------------------------------------

    /// Start a mission from the task input using the current engine mode and
    /// the latest published staging list.
    pub fn submit_mission(&mut self) -> Option<MissionRequest> {
        let task = self.task_text();
        let mode = self.orchestrator.engine_mode();
        let staged = self.subscription.snapshot();
        let request = self.orchestrator.submit(&task, mode, &staged)?;
        self.input = task_input(self.staging.len());
        Some(request)
    }

    pub fn finish_mission(&mut self, id: MissionId, outcome: MissionOutcome) -> Option<Completion> {
        self.orchestrator.complete(id, outcome)
    }

    pub fn toggle_engine(&mut self) {
        let next = self.orchestrator.engine_mode().toggle();
        self.orchestrator.set_engine_mode(next);
    }

    pub fn copy_artifact(&mut self, clipboard: &mut dyn Clipboard) {
        match self.orchestrator.copy_artifact(clipboard) {
            Ok(true) => self.notify(NotificationLevel::Success, "Solution copied to clipboard."),
            Ok(false) => self.notify(NotificationLevel::Info, "No solution to copy yet."),
            Err(err) => {
                tracing::warn!(error = %err, "Clipboard write failed");
                self.notify(NotificationLevel::Error, err.to_string());
            }
        }
    }

    // ------------------------------------------------------------------------
    // Text input
    // ------------------------------------------------------------------------

    /// Route a key the keymap did not claim to whichever input has focus.
    /// The task input ignores keys while a mission is in flight.
    pub fn input_key(&mut self, key: KeyEvent) {
        if let Some(prompt) = self.browse.as_mut() {
            prompt.input.input(key);
        } else if !self.orchestrator.is_busy() {
            self.input.input(key);
        }
    }

    /// A bracketed paste is a file drop when every token names a file;
    /// otherwise it is typed into the focused input.
    pub fn handle_paste(&mut self, text: &str) {
        if let Some(prompt) = self.browse.as_mut() {
            prompt.input.insert_str(text.replace('\n', " "));
            return;
        }

        self.staging.drag_enter();
        match resolve_drop(text) {
            Some(paths) => {
                let outcome = load_paths(&paths);
                tracing::debug!(
                    dropped = paths.len(),
                    loaded = outcome.attachments.len(),
                    "File drop"
                );
                self.report_load("Dropped", &outcome);
                self.staging.drop_files(outcome.attachments);
            }
            None => {
                self.staging.drag_leave();
                if !self.orchestrator.is_busy() {
                    self.input.insert_str(text.replace('\n', " "));
                }
            }
        }
        self.sync_staging();
    }

    // ------------------------------------------------------------------------
    // Browse prompt
    // ------------------------------------------------------------------------

    pub fn open_browse(&mut self) {
        if self.browse.is_none() {
            self.browse = Some(BrowsePrompt::new());
        }
    }

    /// Close the browse prompt. Returns whether one was open.
    pub fn cancel(&mut self) -> bool {
        self.browse.take().is_some()
    }

    pub fn confirm_browse(&mut self) {
        let Some(prompt) = self.browse.take() else {
            return;
        };
        let paths = parse_dropped_paths(&prompt.text());
        if paths.is_empty() {
            return;
        }
        let outcome = load_paths(&paths);
        self.report_load("Attached", &outcome);
        self.staging.add(outcome.attachments);
        self.sync_staging();
    }

    fn report_load(&mut self, verb: &str, outcome: &BrowseOutcome) {
        if !outcome.attachments.is_empty() {
            let message = format!("{} {} file(s).", verb, outcome.attachments.len());
            self.notify(NotificationLevel::Success, message);
        }
        for err in &outcome.errors {
            self.notify(NotificationLevel::Error, err.to_string());
        }
    }

    // ------------------------------------------------------------------------
    // Staging list
    // ------------------------------------------------------------------------

    pub fn select_next(&mut self) {
        let len = self.staging.len();
        if len == 0 {
            self.selected_file = None;
            return;
        }
        self.selected_file = Some(match self.selected_file {
            Some(index) if index + 1 < len => index + 1,
            Some(_) => 0,
            None => 0,
        });
    }

    pub fn select_previous(&mut self) {
        let len = self.staging.len();
        if len == 0 {
            self.selected_file = None;
            return;
        }
        self.selected_file = Some(match self.selected_file {
            Some(0) | None => len - 1,
            Some(index) => index - 1,
        });
    }

    pub fn remove_selected(&mut self) {
        let Some(index) = self.selected_file else {
            return;
        };
        if let Some(removed) = self.staging.remove(index) {
            tracing::debug!(file = removed.file_name(), "Attachment removed");
        }
        self.sync_staging();
    }

    /// Pick up the latest published staging list: clamp the selection and
    /// refresh the input placeholder.
    pub fn sync_staging(&mut self) {
        if !self.subscription.has_changed() {
            return;
        }
        let staged = self.subscription.mark_seen();
        self.selected_file = match (self.selected_file, staged.len()) {
            (_, 0) => None,
            (Some(index), len) if index >= len => Some(len - 1),
            (selected, _) => selected,
        };
        self.input
            .set_placeholder_text(input_placeholder(staged.len()));
    }
}

fn task_input(staged_count: usize) -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_placeholder_text(input_placeholder(staged_count));
    input
}
