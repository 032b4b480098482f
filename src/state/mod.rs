//! Application state containers
//!
//! - [`ConversationWindow`]: entry list, question input, ask lifecycle
//! - [`FeedbackPanel`]: per-answer rating and feedback lifecycle
//! - [`ScrollState`]: conversation view scroll position

pub mod conversation;
pub mod feedback;
pub mod scroll;

pub use conversation::{ConversationWindow, EntryList, PendingAsk, RequestState};
pub use feedback::{FeedbackPanel, FeedbackRejection, FeedbackState, RATING_REQUIRED_PROMPT};
pub use scroll::ScrollState;
