//! User-triggered actions that start requests or move selection.

use crate::models::Rating;
use crate::state::FeedbackRejection;

use super::{App, AppMessage, Focus};

/// Lines moved per PageUp/PageDown.
pub const PAGE_SCROLL_LINES: u16 = 10;

impl App {
    /// Send the input as a question, if the window accepts it.
    pub fn submit_question(&mut self) {
        let Some(pending) = self.window.submit() else {
            return;
        };
        self.mark_dirty();

        let client = self.client.clone();
        let tx = self.message_tx.clone();
        let student_id = self.student_id.clone();
        tokio::spawn(async move {
            let result = client.ask(&pending.question, &student_id).await;
            let _ = tx.send(AppMessage::AskCompleted {
                slot: pending.slot,
                result,
            });
        });
    }

    /// Submit the selected feedback panel.
    pub fn submit_feedback(&mut self) {
        let Some(index) = self.selected_feedback else {
            return;
        };
        let Some(panel) = self.feedback.get_mut(&index) else {
            return;
        };

        let request = match panel.begin_submit() {
            Ok(request) => request,
            Err(rejection) => {
                if let Some(prompt) = rejection.prompt() {
                    self.alert = Some(prompt.to_string());
                }
                if rejection != FeedbackRejection::NoRating {
                    tracing::debug!(index, ?rejection, "feedback submit ignored");
                }
                self.mark_dirty();
                return;
            }
        };
        self.mark_dirty();

        let client = self.client.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = client.send_feedback(&request).await;
            let _ = tx.send(AppMessage::FeedbackCompleted {
                entry_index: index,
                result,
            });
        });
    }

    /// Rate the selected answer.
    pub fn rate_selected(&mut self, rating: Rating) {
        if let Some(panel) = self.selected_panel_mut() {
            if panel.select_rating(rating) {
                self.focus = Focus::Feedback;
                self.mark_dirty();
            }
        }
    }

    /// Move the feedback selection to the next (newer) answer still open.
    pub fn select_next_feedback(&mut self) {
        let current = self.selected_feedback;
        let next = self
            .feedback
            .iter()
            .filter(|(_, panel)| !panel.is_submitted())
            .map(|(&i, _)| i)
            .find(|&i| current.map_or(true, |c| i > c));
        if next.is_some() {
            self.selected_feedback = next;
            self.mark_dirty();
        }
    }

    /// Move the feedback selection to the previous (older) answer still open.
    pub fn select_prev_feedback(&mut self) {
        let current = self.selected_feedback;
        let prev = self
            .feedback
            .iter()
            .rev()
            .filter(|(_, panel)| !panel.is_submitted())
            .map(|(&i, _)| i)
            .find(|&i| current.map_or(true, |c| i < c));
        if prev.is_some() {
            self.selected_feedback = prev;
            self.mark_dirty();
        }
    }

    /// Move the selection off a submitted panel: to the next open answer,
    /// else the previous one. With nothing left open, focus returns to the
    /// question input.
    pub(crate) fn advance_past_submitted(&mut self) {
        if !self.selected_panel().is_some_and(|p| p.is_submitted()) {
            return;
        }
        let before = self.selected_feedback;
        self.select_next_feedback();
        if self.selected_feedback == before {
            self.select_prev_feedback();
        }
        if self.selected_feedback == before {
            self.selected_feedback = None;
            self.focus = Focus::Input;
        }
        self.mark_dirty();
    }

    /// Switch focus between the question input and the selected panel.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input if self.selected_panel().is_some() => Focus::Feedback,
            _ => Focus::Input,
        };
        self.mark_dirty();
    }

    pub fn scroll_up(&mut self, lines: u16) {
        if self.window.scroll_mut().scroll_up(lines) {
            self.mark_dirty();
        }
    }

    pub fn scroll_down(&mut self, lines: u16) {
        if self.window.scroll_mut().scroll_down(lines) {
            self.mark_dirty();
        }
    }
}
