//! Mock implementations for test fixtures.
//!
//! Re-exports the transport mocks from `mathtutor::adapters::mock` and adds a
//! scripted [`FakeTutorApi`] for driving the app without HTTP.

pub use mathtutor::adapters::mock::{MockHttpClient, MockResponse};
pub use mathtutor::traits::{HttpError, Response};

use async_trait::async_trait;
use mathtutor::api::TutorApi;
use mathtutor::error::ApiError;
use mathtutor::models::{ConversationEntry, FeedbackOutcome, FeedbackRequest};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Configuration for setting up mock HTTP responses.
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Configures a JSON response for an exact URL.
    pub fn with_json_response(self, url: &str, status: u16, json: serde_json::Value) -> Self {
        self.client
            .set_response(url, MockResponse::Success(Response::json_body(status, &json)));
        self
    }

    /// Configures a transport failure for every unmatched URL.
    #[allow(dead_code)]
    pub fn with_default_error(self, error: HttpError) -> Self {
        self.client.set_default_response(MockResponse::Error(error));
        self
    }

    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

/// `TutorApi` that replays scripted results and records every call.
#[derive(Default)]
pub struct FakeTutorApi {
    answers: Mutex<VecDeque<Result<ConversationEntry, ApiError>>>,
    feedback_results: Mutex<VecDeque<Result<FeedbackOutcome, ApiError>>>,
    asked: Mutex<Vec<(String, String)>>,
    feedback_sent: Mutex<Vec<FeedbackRequest>>,
}

#[allow(dead_code)]
impl FakeTutorApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(self, result: Result<ConversationEntry, ApiError>) -> Self {
        self.answers.lock().unwrap().push_back(result);
        self
    }

    pub fn feedback(self, result: Result<FeedbackOutcome, ApiError>) -> Self {
        self.feedback_results.lock().unwrap().push_back(result);
        self
    }

    /// `(question, student_id)` pairs in call order.
    pub fn asked(&self) -> Vec<(String, String)> {
        self.asked.lock().unwrap().clone()
    }

    pub fn feedback_sent(&self) -> Vec<FeedbackRequest> {
        self.feedback_sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl TutorApi for FakeTutorApi {
    async fn ask(&self, question: &str, student_id: &str) -> Result<ConversationEntry, ApiError> {
        self.asked
            .lock()
            .unwrap()
            .push((question.to_string(), student_id.to_string()));
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::InvalidResponse("no scripted answer".to_string())))
    }

    async fn send_feedback(&self, request: &FeedbackRequest) -> Result<FeedbackOutcome, ApiError> {
        self.feedback_sent.lock().unwrap().push(request.clone());
        self.feedback_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::InvalidResponse("no scripted feedback".to_string())))
    }
}
