//! Common test utilities for integration tests.
//!
//! # Example
//!
//! ```ignore
//! let api = Arc::new(FakeTutorApi::new().answer(Ok(answer("2+2", "4"))));
//! let mut app = test_app(api.clone());
//! type_text(&mut app, "2+2");
//! app.handle_key(key(KeyCode::Enter));
//! pump(&mut app).await;
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mathtutor::app::App;
use mathtutor::models::{ConversationEntry, Source};
use mathtutor::startup::ClientConfig;
use std::sync::Arc;
use std::time::Duration;

/// App wired to `api` with default configuration.
pub fn test_app(api: Arc<FakeTutorApi>) -> App {
    App::new(api, &ClientConfig::default())
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
}

/// Wait for the next task result and apply it.
pub async fn pump(app: &mut App) {
    let rx = app
        .message_rx
        .as_mut()
        .expect("message receiver already taken");
    let msg = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for app message")
        .expect("channel closed");
    app.handle_message(msg);
}

/// A direct answer for `question`.
pub fn answer(question: &str, solution: &str) -> ConversationEntry {
    ConversationEntry::new(question, solution, Source::DirectAnswer, format!("t-{}", question))
}
