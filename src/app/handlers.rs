//! Message and input handling for the App.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::models::Rating;
use crate::state::FeedbackState;
use crate::widgets::input_box::InputBox;

use super::actions::PAGE_SCROLL_LINES;
use super::{App, AppMessage, Focus};

impl App {
    /// Handle an incoming async message.
    /// All message handlers mark the app as dirty since they update visible state.
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        match msg {
            AppMessage::AskCompleted { slot, result } => {
                if self.window.resolve(slot, result) {
                    self.sync_feedback_panels();
                }
            }
            AppMessage::FeedbackCompleted {
                entry_index,
                result,
            } => {
                let Some(panel) = self.feedback.get_mut(&entry_index) else {
                    tracing::warn!(entry_index, "feedback result for unknown panel");
                    return;
                };
                let window = &mut self.window;
                let completed = panel.complete(result, |entry| {
                    window.add_message_to_history(entry);
                });
                match completed {
                    Ok(()) => self.advance_past_submitted(),
                    Err(alert) => self.alert = Some(alert),
                }
            }
            AppMessage::ConnectionStatus(healthy) => {
                self.connection_status = Some(healthy);
            }
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        // An open alert swallows the key that dismisses it.
        if self.alert.take().is_some() {
            self.mark_dirty();
            return;
        }

        match key.code {
            KeyCode::Char('g') if ctrl => return self.rate_selected(Rating::Good),
            KeyCode::Char('b') if ctrl => return self.rate_selected(Rating::Bad),
            KeyCode::Tab => return self.toggle_focus(),
            KeyCode::Esc => {
                self.focus = Focus::Input;
                return self.mark_dirty();
            }
            KeyCode::Up => return self.select_prev_feedback(),
            KeyCode::Down => return self.select_next_feedback(),
            KeyCode::PageUp => return self.scroll_up(PAGE_SCROLL_LINES),
            KeyCode::PageDown => return self.scroll_down(PAGE_SCROLL_LINES),
            _ => {}
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::Feedback => self.handle_feedback_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter {
            return self.submit_question();
        }
        if let Some(input) = self.window.input_mut() {
            if edit_input(input, key) {
                self.mark_dirty();
            }
        }
    }

    fn handle_feedback_key(&mut self, key: KeyEvent) {
        let Some(state) = self.selected_panel().map(|p| p.state()) else {
            self.focus = Focus::Input;
            return self.mark_dirty();
        };

        if key.code == KeyCode::Enter {
            return self.submit_feedback();
        }

        if state == FeedbackState::Unrated && key.modifiers.is_empty() {
            match key.code {
                KeyCode::Char('g') => return self.rate_selected(Rating::Good),
                KeyCode::Char('b') => return self.rate_selected(Rating::Bad),
                _ => {}
            }
        }

        let edited = self
            .selected_panel_mut()
            .and_then(|panel| panel.text_mut())
            .is_some_and(|text| edit_input(text, key));
        if edited {
            self.mark_dirty();
        }
    }

    /// Handle bracketed paste into whichever field has focus.
    pub fn handle_paste(&mut self, text: &str) {
        let target = match self.focus {
            Focus::Input => self.window.input_mut(),
            Focus::Feedback => self.selected_panel_mut().and_then(|p| p.text_mut()),
        };
        if let Some(input) = target {
            input.insert_str(text);
            self.mark_dirty();
        }
    }
}

/// Apply an editing key to `input`. Returns true if the key was consumed.
fn edit_input(input: &mut InputBox, key: KeyEvent) -> bool {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
    {
        return false;
    }
    match key.code {
        KeyCode::Char(c) => input.insert_char(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete_char(),
        KeyCode::Left => input.move_cursor_left(),
        KeyCode::Right => input.move_cursor_right(),
        KeyCode::Home => input.move_cursor_home(),
        KeyCode::End => input.move_cursor_end(),
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TutorApi;
    use crate::error::ApiError;
    use crate::models::{ConversationEntry, FeedbackOutcome, FeedbackRequest, Source};
    use crate::startup::ClientConfig;
    use crate::state::RATING_REQUIRED_PROMPT;
    use crate::traits::HttpError;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct NeverCalled;

    #[async_trait]
    impl TutorApi for NeverCalled {
        async fn ask(&self, _: &str, _: &str) -> Result<ConversationEntry, ApiError> {
            Err(ApiError::InvalidResponse("not expected".to_string()))
        }

        async fn send_feedback(&self, _: &FeedbackRequest) -> Result<FeedbackOutcome, ApiError> {
            Err(ApiError::InvalidResponse("not expected".to_string()))
        }
    }

    fn app() -> App {
        App::new(Arc::new(NeverCalled), &ClientConfig::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    /// App with one answered question and its panel selected.
    fn answered_app() -> App {
        let mut app = app();
        app.window.input_mut().unwrap().set_content("2+2".to_string());
        let pending = app.window.submit().unwrap();
        app.handle_message(AppMessage::AskCompleted {
            slot: pending.slot,
            result: Ok(ConversationEntry::new("2+2", "4", Source::DirectAnswer, "t1")),
        });
        app
    }

    #[test]
    fn test_typing_goes_to_input() {
        let mut app = app();
        type_text(&mut app, "x^2");
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.window.input().get_content(), "x^");
        assert!(app.needs_redraw);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        app.handle_key(ctrl('c'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_answer_creates_selected_panel() {
        let app = answered_app();
        assert_eq!(app.feedback.len(), 1);
        assert_eq!(app.selected_feedback, Some(0));
    }

    #[test]
    fn test_error_answer_gets_no_panel() {
        let mut app = app();
        app.window.input_mut().unwrap().set_content("q".to_string());
        let pending = app.window.submit().unwrap();
        app.handle_message(AppMessage::AskCompleted {
            slot: pending.slot,
            result: Err(HttpError::Timeout("deadline".to_string()).into()),
        });
        assert!(app.feedback.is_empty());
        assert_eq!(app.selected_feedback, None);
    }

    #[test]
    fn test_plain_g_rates_then_types() {
        let mut app = answered_app();
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Feedback);

        app.handle_key(key(KeyCode::Char('g')));
        assert_eq!(app.selected_panel().unwrap().rating(), Some(Rating::Good));

        type_text(&mut app, "good");
        assert_eq!(app.selected_panel().unwrap().text().get_content(), "good");
    }

    #[test]
    fn test_ctrl_b_rates_from_input_focus() {
        let mut app = answered_app();
        app.handle_key(ctrl('b'));
        assert_eq!(app.selected_panel().unwrap().rating(), Some(Rating::Bad));
        assert_eq!(app.focus, Focus::Feedback);
    }

    #[test]
    fn test_submit_without_rating_shows_alert_then_dismisses() {
        let mut app = answered_app();
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.alert.as_deref(), Some(RATING_REQUIRED_PROMPT));

        // The dismissing key is swallowed.
        app.handle_key(key(KeyCode::Char('g')));
        assert!(app.alert.is_none());
        assert_eq!(app.selected_panel().unwrap().rating(), None);
    }

    #[test]
    fn test_feedback_failure_sets_alert() {
        let mut app = answered_app();
        let panel = app.feedback.get_mut(&0).unwrap();
        panel.select_rating(Rating::Bad);
        panel.begin_submit().unwrap();

        app.handle_message(AppMessage::FeedbackCompleted {
            entry_index: 0,
            result: Err(HttpError::ConnectionFailed("refused".to_string()).into()),
        });
        assert_eq!(
            app.alert.as_deref(),
            Some("Failed to send feedback: Connection failed: refused")
        );
        assert_eq!(app.feedback[&0].state(), FeedbackState::Rated(Rating::Bad));
    }

    #[test]
    fn test_refined_feedback_appends_entry() {
        let mut app = answered_app();
        let panel = app.feedback.get_mut(&0).unwrap();
        panel.select_rating(Rating::Bad);
        panel.begin_submit().unwrap();

        let refined = ConversationEntry::new("2+2", "4, because 2+2=4", Source::Refined, "t1");
        app.handle_message(AppMessage::FeedbackCompleted {
            entry_index: 0,
            result: Ok(FeedbackOutcome::Refined(refined.clone())),
        });

        assert_eq!(app.window.entries().len(), 2);
        assert_eq!(app.window.entries().get(1), Some(&refined));
        assert!(app.feedback[&0].is_submitted());
        assert_eq!(app.feedback.len(), 1);
    }

    #[test]
    fn test_submit_moves_selection_to_open_panel() {
        let mut app = answered_app();
        app.window.add_message_to_history(ConversationEntry::new("a", "b", Source::WebSearch, "t2"));
        app.sync_feedback_panels();
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selected_feedback, Some(0));

        let panel = app.feedback.get_mut(&0).unwrap();
        panel.select_rating(Rating::Good);
        panel.begin_submit().unwrap();
        app.handle_message(AppMessage::FeedbackCompleted {
            entry_index: 0,
            result: Ok(FeedbackOutcome::Acknowledged(Default::default())),
        });

        assert!(app.feedback[&0].is_submitted());
        assert_eq!(app.selected_feedback, Some(1));
    }

    #[test]
    fn test_last_submit_returns_focus_to_input() {
        let mut app = answered_app();
        app.handle_key(ctrl('g'));
        assert_eq!(app.focus, Focus::Feedback);
        let panel = app.feedback.get_mut(&0).unwrap();
        panel.begin_submit().unwrap();
        app.handle_message(AppMessage::FeedbackCompleted {
            entry_index: 0,
            result: Ok(FeedbackOutcome::Acknowledged(Default::default())),
        });

        assert_eq!(app.selected_feedback, None);
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn test_up_down_cycle_open_panels() {
        let mut app = answered_app();
        app.window.add_message_to_history(ConversationEntry::new("a", "b", Source::WebSearch, "t2"));
        app.sync_feedback_panels();
        assert_eq!(app.selected_feedback, Some(1));

        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selected_feedback, Some(0));
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selected_feedback, Some(0));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected_feedback, Some(1));
    }

    #[test]
    fn test_paste_into_input() {
        let mut app = app();
        app.handle_paste("1\n+1");
        assert_eq!(app.window.input().get_content(), "1 +1");
    }

    #[test]
    fn test_connection_status() {
        let mut app = app();
        app.handle_message(AppMessage::ConnectionStatus(false));
        assert_eq!(app.connection_status, Some(false));
    }
}
