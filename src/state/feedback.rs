//! Per-answer feedback panel state.
//!
//! ```text
//! Unrated --select--> Rated(r) --begin_submit--> Submitting(r) --Ok--> Submitted
//!                       ^  |select                    |
//!                       |__|                          \--Err--> Rated(r)
//! ```

use crate::error::ApiError;
use crate::models::{ConversationEntry, FeedbackOutcome, FeedbackRequest, Rating};
use crate::widgets::input_box::InputBox;

/// Prompt shown when submitting before choosing a rating.
pub const RATING_REQUIRED_PROMPT: &str = "Please select 'Good' or 'Bad' before submitting.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedbackState {
    #[default]
    Unrated,
    Rated(Rating),
    Submitting(Rating),
    /// Terminal.
    Submitted,
}

/// Why a submit attempt did not start a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackRejection {
    NoRating,
    InFlight,
    AlreadySubmitted,
}

impl FeedbackRejection {
    /// Text to surface, if the user should be told.
    pub fn prompt(self) -> Option<&'static str> {
        match self {
            FeedbackRejection::NoRating => Some(RATING_REQUIRED_PROMPT),
            FeedbackRejection::InFlight | FeedbackRejection::AlreadySubmitted => None,
        }
    }
}

/// Feedback controls attached to one agent answer.
#[derive(Debug, Clone)]
pub struct FeedbackPanel {
    target: ConversationEntry,
    state: FeedbackState,
    text: InputBox,
}

impl FeedbackPanel {
    /// Create a panel reviewing a snapshot of `target`.
    pub fn new(target: &ConversationEntry) -> Self {
        Self {
            target: target.clone(),
            state: FeedbackState::Unrated,
            text: InputBox::new(),
        }
    }

    pub fn target(&self) -> &ConversationEntry {
        &self.target
    }

    pub fn state(&self) -> FeedbackState {
        self.state
    }

    pub fn rating(&self) -> Option<Rating> {
        match self.state {
            FeedbackState::Rated(r) | FeedbackState::Submitting(r) => Some(r),
            FeedbackState::Unrated | FeedbackState::Submitted => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, FeedbackState::Submitting(_))
    }

    pub fn is_submitted(&self) -> bool {
        self.state == FeedbackState::Submitted
    }

    /// Controls accept input only in `Unrated` and `Rated`.
    pub fn is_editable(&self) -> bool {
        matches!(self.state, FeedbackState::Unrated | FeedbackState::Rated(_))
    }

    /// The text field and submit control appear once a rating is chosen.
    pub fn shows_form(&self) -> bool {
        self.rating().is_some()
    }

    /// Choose or change the rating. Ignored unless editable.
    pub fn select_rating(&mut self, rating: Rating) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.state = FeedbackState::Rated(rating);
        true
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        self.rating().map(|r| match r {
            Rating::Good => "What did you like?",
            Rating::Bad => "How can we improve it?",
        })
    }

    pub fn text(&self) -> &InputBox {
        &self.text
    }

    /// Mutable text access; only while `Rated`.
    pub fn text_mut(&mut self) -> Option<&mut InputBox> {
        match self.state {
            FeedbackState::Rated(_) => Some(&mut self.text),
            _ => None,
        }
    }

    /// Start submitting. On success the panel is `Submitting` and the caller
    /// must dispatch the returned request.
    pub fn begin_submit(&mut self) -> Result<FeedbackRequest, FeedbackRejection> {
        let rating = match self.state {
            FeedbackState::Unrated => return Err(FeedbackRejection::NoRating),
            FeedbackState::Submitting(_) => return Err(FeedbackRejection::InFlight),
            FeedbackState::Submitted => return Err(FeedbackRejection::AlreadySubmitted),
            FeedbackState::Rated(r) => r,
        };

        self.state = FeedbackState::Submitting(rating);
        Ok(FeedbackRequest::for_entry(
            &self.target,
            rating,
            self.text.get_content(),
        ))
    }

    /// Apply the result of the feedback request.
    ///
    /// On success the panel becomes `Submitted` and a refined entry, if any,
    /// is handed to `on_refined`. On failure the panel returns to `Rated`
    /// with its text intact and the alert text is returned.
    pub fn complete<F>(
        &mut self,
        result: Result<FeedbackOutcome, ApiError>,
        on_refined: F,
    ) -> Result<(), String>
    where
        F: FnOnce(ConversationEntry),
    {
        let FeedbackState::Submitting(rating) = self.state else {
            tracing::warn!(state = ?self.state, "feedback result without a submission in flight");
            return Ok(());
        };

        match result {
            Ok(outcome) => {
                self.state = FeedbackState::Submitted;
                if let FeedbackOutcome::Refined(entry) = outcome {
                    on_refined(entry);
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(thread_id = %self.target.thread_id, error = %err, "feedback failed");
                self.state = FeedbackState::Rated(rating);
                Err(format!("Failed to send feedback: {}", err))
            }
        }
    }
}
