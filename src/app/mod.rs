//! Application state and logic for the TUI.
//!
//! This module contains the core [`App`] struct and related types:
//! - [`Focus`] - Which UI component has focus
//! - [`AppMessage`] - Results delivered from spawned request tasks

mod actions;
mod handlers;
mod messages;
mod types;

pub use messages::AppMessage;
pub use types::Focus;

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::api::TutorApi;
use crate::startup::ClientConfig;
use crate::state::{ConversationWindow, FeedbackPanel};

/// Main application state
pub struct App {
    /// Conversation entries, question input, and ask lifecycle
    pub window: ConversationWindow,
    /// Feedback panels keyed by the index of the answer they review
    pub feedback: BTreeMap<usize, FeedbackPanel>,
    /// Current focus
    pub focus: Focus,
    /// Entry index whose feedback panel receives keys when focused
    pub selected_feedback: Option<usize>,
    /// Modal message; dismissed by the next key
    pub alert: Option<String>,
    /// Result of the startup health check (`None` until it answers)
    pub connection_status: Option<bool>,
    /// Flag to track if app should quit
    pub should_quit: bool,
    /// Set whenever visible state changes; cleared after a draw
    pub needs_redraw: bool,
    /// Animation tick counter (spinner)
    pub tick_count: u64,
    /// Student id sent with each question
    pub student_id: String,
    /// Backend URL shown in the header
    pub base_url: String,
    /// Backend client
    pub client: Arc<dyn TutorApi>,
    /// Receiver for async messages; taken by the event loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender handed to spawned tasks
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
}

impl App {
    /// Create a new App around `client`.
    pub fn new(client: Arc<dyn TutorApi>, config: &ClientConfig) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();

        Self {
            window: ConversationWindow::new(),
            feedback: BTreeMap::new(),
            focus: Focus::Input,
            selected_feedback: None,
            alert: None,
            connection_status: None,
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,
            student_id: config.student_id.clone(),
            base_url: config.base_url.clone(),
            client,
            message_rx: Some(message_rx),
            message_tx,
        }
    }

    /// Request a redraw on the next loop iteration.
    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Advance animations. Only redraws while something animates.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.window.is_sending() || self.feedback.values().any(|p| p.is_submitting()) {
            self.mark_dirty();
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// The panel currently selected for keyboard input.
    pub fn selected_panel(&self) -> Option<&FeedbackPanel> {
        self.selected_feedback.and_then(|i| self.feedback.get(&i))
    }

    pub fn selected_panel_mut(&mut self) -> Option<&mut FeedbackPanel> {
        let index = self.selected_feedback?;
        self.feedback.get_mut(&index)
    }

    /// Attach a panel to every entry that accepts feedback and has none yet.
    ///
    /// Panels snapshot their entry on creation; the entry list never mutates
    /// an answer after its placeholder is replaced, so the snapshot stays
    /// accurate.
    pub(crate) fn sync_feedback_panels(&mut self) {
        let mut newest = None;
        for (index, entry) in self.window.entries().iter().enumerate() {
            if !entry.source.accepts_feedback() {
                continue;
            }
            if !self.feedback.contains_key(&index) {
                self.feedback.insert(index, FeedbackPanel::new(entry));
                newest = Some(index);
            }
        }

        // Follow the newest answer unless the user is mid-way through a panel.
        if let Some(index) = newest {
            if self.focus != Focus::Feedback || self.selected_feedback.is_none() {
                self.selected_feedback = Some(index);
            }
        }
    }
}
