//! AppMessage enum for async communication within the application.

use crate::error::ApiError;
use crate::models::{ConversationEntry, FeedbackOutcome};

/// Results delivered from spawned request tasks back to the UI loop.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// An `/ask/` call finished for the placeholder at `slot`.
    AskCompleted {
        slot: usize,
        result: Result<ConversationEntry, ApiError>,
    },
    /// A `/feedback/` call finished for the panel on entry `entry_index`.
    FeedbackCompleted {
        entry_index: usize,
        result: Result<FeedbackOutcome, ApiError>,
    },
    /// Startup health check result.
    ConnectionStatus(bool),
}
