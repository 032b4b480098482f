use serde::{Deserialize, Serialize};
use std::fmt;

use super::{deserialize_id, deserialize_nullable_string};

/// Solution text shown while an answer is pending.
pub const PLACEHOLDER_SOLUTION: &str = "...";

/// Detail used when a failed ask carries no server-provided message.
pub const UNKNOWN_ERROR_DETAIL: &str = "An unknown error occurred.";

/// Where a conversation entry came from.
///
/// Serialized as the backend's plain string. Anything the client does not
/// recognize is preserved verbatim in [`Source::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Source {
    User,
    KnowledgeBase,
    WebSearch,
    DirectAnswer,
    Refined,
    Error,
    Other(String),
}

impl Source {
    pub fn as_str(&self) -> &str {
        match self {
            Source::User => "user",
            Source::KnowledgeBase => "knowledge_base",
            Source::WebSearch => "web_search",
            Source::DirectAnswer => "direct_answer",
            Source::Refined => "refined",
            Source::Error => "error",
            Source::Other(other) => other,
        }
    }

    /// Agent answers that can be rated. Placeholders, errors, refined
    /// answers and unrecognized sources never accept feedback.
    pub fn accepts_feedback(&self) -> bool {
        matches!(
            self,
            Source::KnowledgeBase | Source::WebSearch | Source::DirectAnswer
        )
    }
}

impl From<String> for Source {
    fn from(value: String) -> Self {
        match value.as_str() {
            "user" => Source::User,
            "knowledge_base" => Source::KnowledgeBase,
            "web_search" => Source::WebSearch,
            "direct_answer" => Source::DirectAnswer,
            "refined" => Source::Refined,
            "error" => Source::Error,
            _ => Source::Other(value),
        }
    }
}

impl From<&str> for Source {
    fn from(value: &str) -> Self {
        Source::from(value.to_string())
    }
}

impl From<Source> for String {
    fn from(source: Source) -> Self {
        match source {
            Source::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One question/answer unit of the conversation.
///
/// This is also the wire shape of the `/ask/` response and of a refined
/// `/feedback/` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationEntry {
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub question: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub solution: String,
    pub source: Source,
    #[serde(deserialize_with = "deserialize_id")]
    pub thread_id: String,
}

impl ConversationEntry {
    pub fn new(
        question: impl Into<String>,
        solution: impl Into<String>,
        source: Source,
        thread_id: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            solution: solution.into(),
            source,
            thread_id: thread_id.into(),
        }
    }

    /// Optimistic entry appended as soon as a question is submitted.
    pub fn placeholder(question: impl Into<String>) -> Self {
        Self::new(
            question,
            PLACEHOLDER_SOLUTION,
            Source::User,
            format!("user-{}", chrono::Utc::now().timestamp_millis()),
        )
    }

    /// Entry that takes the placeholder's slot when asking failed.
    ///
    /// Falls back to [`UNKNOWN_ERROR_DETAIL`] when `detail` is absent or empty.
    /// Any other detail is shown verbatim.
    pub fn failure(question: impl Into<String>, detail: Option<&str>) -> Self {
        let detail = detail
            .filter(|d| !d.is_empty())
            .unwrap_or(UNKNOWN_ERROR_DETAIL);
        Self::new(
            question,
            format!("Error: {}", detail),
            Source::Error,
            format!("error-{}", chrono::Utc::now().timestamp_millis()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_round_trips_known_and_unknown() {
        assert_eq!(Source::from("knowledge_base"), Source::KnowledgeBase);
        assert_eq!(Source::from("direct_answer"), Source::DirectAnswer);
        assert_eq!(
            Source::from("feedback_logged"),
            Source::Other("feedback_logged".to_string())
        );
        assert_eq!(String::from(Source::WebSearch), "web_search");
        assert_eq!(Source::Other("x".to_string()).to_string(), "x");
    }

    #[test]
    fn test_accepts_feedback() {
        assert!(Source::KnowledgeBase.accepts_feedback());
        assert!(Source::WebSearch.accepts_feedback());
        assert!(Source::DirectAnswer.accepts_feedback());
        assert!(!Source::User.accepts_feedback());
        assert!(!Source::Error.accepts_feedback());
        assert!(!Source::Refined.accepts_feedback());
        assert!(!Source::Other("feedback_logged".to_string()).accepts_feedback());
    }

    #[test]
    fn test_deserialize_ask_response() {
        let json = r#"{"question":"2+2","solution":"4","source":"direct_answer","thread_id":"t1"}"#;
        let entry: ConversationEntry = serde_json::from_str(json).unwrap();
        assert_eq!(
            entry,
            ConversationEntry::new("2+2", "4", Source::DirectAnswer, "t1")
        );
    }

    #[test]
    fn test_deserialize_numeric_thread_id_and_null_solution() {
        let json = r#"{"question":"q","solution":null,"source":"web_search","thread_id":42}"#;
        let entry: ConversationEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.thread_id, "42");
        assert_eq!(entry.solution, "");
    }

    #[test]
    fn test_serialize_uses_plain_source_string() {
        let entry = ConversationEntry::new("q", "s", Source::Refined, "t");
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["source"], "refined");
    }

    #[test]
    fn test_placeholder_shape() {
        let entry = ConversationEntry::placeholder("1+1");
        assert_eq!(entry.question, "1+1");
        assert_eq!(entry.solution, PLACEHOLDER_SOLUTION);
        assert_eq!(entry.source, Source::User);
        assert!(entry.thread_id.starts_with("user-"));
    }

    #[test]
    fn test_failure_with_and_without_detail() {
        let with = ConversationEntry::failure("q", Some("Input blocked: unsafe"));
        assert_eq!(with.solution, "Error: Input blocked: unsafe");
        assert_eq!(with.source, Source::Error);
        assert!(with.thread_id.starts_with("error-"));

        let without = ConversationEntry::failure("q", None);
        assert_eq!(without.solution, "Error: An unknown error occurred.");

        let empty = ConversationEntry::failure("q", Some(""));
        assert_eq!(empty.solution, "Error: An unknown error occurred.");
    }

    #[test]
    fn test_failure_keeps_detail_verbatim() {
        let spaced = ConversationEntry::failure("q", Some(" spaced "));
        assert_eq!(spaced.solution, "Error:  spaced ");
    }
}
