//! Conversation window state: the entry list, the question input, and the
//! ask request lifecycle.
//!
//! ```text
//! Idle --submit(non-blank)--> Sending{slot} --resolve(Ok)--> Idle  (slot := answer)
//!                                          \--resolve(Err)-> Idle  (slot := error entry)
//! ```
//!
//! The list changes in exactly three ways: a placeholder is appended on
//! submit, that slot is replaced on resolve, and refined answers are appended
//! through [`ConversationWindow::add_message_to_history`].

use crate::error::ApiError;
use crate::models::ConversationEntry;
use crate::widgets::input_box::InputBox;

use super::scroll::ScrollState;

/// Ordered, index-addressed conversation entries.
#[derive(Debug, Clone, Default)]
pub struct EntryList {
    entries: Vec<ConversationEntry>,
}

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its index.
    pub fn push(&mut self, entry: ConversationEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Replace the entry at `index`, returning the old one.
    pub fn replace(&mut self, index: usize, entry: ConversationEntry) -> Option<ConversationEntry> {
        self.entries
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, entry))
    }

    pub fn get(&self, index: usize) -> Option<&ConversationEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConversationEntry> {
        self.entries.iter()
    }
}

/// Lifecycle of the question currently being asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    /// Waiting on the backend; `slot` holds the placeholder.
    Sending { slot: usize },
}

/// A question handed off to the API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAsk {
    pub slot: usize,
    pub question: String,
}

/// Conversation window state machine.
#[derive(Debug, Default)]
pub struct ConversationWindow {
    entries: EntryList,
    input: InputBox,
    state: RequestState,
    scroll: ScrollState,
}

impl ConversationWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &EntryList {
        &self.entries
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.state, RequestState::Sending { .. })
    }

    /// Input and send are disabled while a question is in flight.
    pub fn input_enabled(&self) -> bool {
        !self.is_sending()
    }

    pub fn input(&self) -> &InputBox {
        &self.input
    }

    /// Mutable input access; `None` while sending so keystrokes are dropped.
    pub fn input_mut(&mut self) -> Option<&mut InputBox> {
        if self.input_enabled() {
            Some(&mut self.input)
        } else {
            None
        }
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }

    /// Submit the current input as a question.
    ///
    /// No-op when the input is blank or a question is already in flight.
    /// Otherwise clears the input, appends a placeholder, and enters
    /// `Sending`; the caller must dispatch the returned [`PendingAsk`].
    pub fn submit(&mut self) -> Option<PendingAsk> {
        if self.is_sending() || self.input.is_blank() {
            return None;
        }

        let question = self.input.take();
        let slot = self.push(ConversationEntry::placeholder(question.clone()));
        self.state = RequestState::Sending { slot };

        tracing::debug!(slot, "question submitted");
        Some(PendingAsk { slot, question })
    }

    /// Apply the outcome of the ask that owns `slot`.
    ///
    /// Returns false, changing nothing, if `slot` is not the pending one.
    pub fn resolve(&mut self, slot: usize, result: Result<ConversationEntry, ApiError>) -> bool {
        if self.state != (RequestState::Sending { slot }) {
            tracing::warn!(slot, state = ?self.state, "ignoring stale ask result");
            return false;
        }

        let question = self
            .entries
            .get(slot)
            .map(|entry| entry.question.clone())
            .unwrap_or_default();

        let entry = match result {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!(slot, category = %err.category(), error = %err, "ask failed");
                ConversationEntry::failure(question, err.detail())
            }
        };

        self.entries.replace(slot, entry);
        self.state = RequestState::Idle;
        self.scroll.scroll_to_bottom();
        true
    }

    /// Append an entry produced outside the ask lifecycle (refined answers).
    pub fn add_message_to_history(&mut self, entry: ConversationEntry) -> usize {
        self.push(entry)
    }

    fn push(&mut self, entry: ConversationEntry) -> usize {
        let index = self.entries.push(entry);
        self.scroll.scroll_to_bottom();
        index
    }
}
