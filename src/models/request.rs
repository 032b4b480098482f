use serde::{Deserialize, Serialize};
use std::fmt;

use super::entry::ConversationEntry;
#[cfg(test)]
use super::entry::Source;

/// Default student identifier sent with every question.
pub const DEFAULT_STUDENT_ID: &str = "student1";

/// Body of `POST /ask/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AskRequest {
    pub question: String,
    pub student_id: String,
}

impl AskRequest {
    pub fn new(question: impl Into<String>, student_id: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            student_id: student_id.into(),
        }
    }
}

/// Thumbs up / thumbs down on an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Good,
    Bad,
}

impl Rating {
    pub fn as_str(self) -> &'static str {
        match self {
            Rating::Good => "good",
            Rating::Bad => "bad",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /feedback/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackRequest {
    pub question: String,
    pub original_solution: String,
    pub feedback_text: String,
    pub rating: Rating,
    pub thread_id: String,
}

impl FeedbackRequest {
    /// Build a request reviewing `entry`.
    pub fn for_entry(entry: &ConversationEntry, rating: Rating, feedback_text: impl Into<String>) -> Self {
        Self {
            question: entry.question.clone(),
            original_solution: entry.solution.clone(),
            feedback_text: feedback_text.into(),
            rating,
            thread_id: entry.thread_id.clone(),
        }
    }
}

/// Minimal acknowledgment for feedback that did not produce a refinement.
///
/// The backend either answers `{"status": "ok"}` or echoes the entry with a
/// non-refined `source` (e.g. `feedback_logged`); both are kept as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackAck {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Interpreted response of `POST /feedback/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackOutcome {
    /// A new answer to append to the conversation.
    Refined(ConversationEntry),
    Acknowledged(FeedbackAck),
}

impl FeedbackOutcome {
    /// Classify a decoded response body.
    ///
    /// Only `source == "refined"` yields a refinement, and then the body must
    /// carry a full entry. Any other shape, including non-object bodies, is
    /// treated as an acknowledgment.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let is_refined = value.get("source").and_then(|s| s.as_str()) == Some("refined");
        if is_refined {
            let entry: ConversationEntry = serde_json::from_value(value)?;
            return Ok(FeedbackOutcome::Refined(entry));
        }

        let ack = if value.is_object() {
            serde_json::from_value(value).unwrap_or_default()
        } else {
            FeedbackAck::default()
        };
        Ok(FeedbackOutcome::Acknowledged(ack))
    }

    pub fn refined(&self) -> Option<&ConversationEntry> {
        match self {
            FeedbackOutcome::Refined(entry) => Some(entry),
            FeedbackOutcome::Acknowledged(_) => None,
        }
    }
}
