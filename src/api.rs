//! Tutor API client for backend communication.
//!
//! Two operations reach the math agent: `POST /ask/` and `POST /feedback/`.
//! Both go through the [`TutorApi`] trait so the application can be driven by
//! a fake in tests; [`TutorClient`] is the HTTP implementation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::adapters::ReqwestHttpClient;
use crate::error::ApiError;
use crate::models::{AskRequest, ConversationEntry, FeedbackOutcome, FeedbackRequest};
use crate::traits::{json_headers, HttpClient, Response};

/// Backend base URL used when nothing overrides it.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// The two calls the conversation makes against the backend.
#[async_trait]
pub trait TutorApi: Send + Sync {
    /// Ask a question; resolves with the backend's answer entry.
    async fn ask(&self, question: &str, student_id: &str) -> Result<ConversationEntry, ApiError>;

    /// Submit feedback on an answer; resolves with a refinement or an ack.
    async fn send_feedback(&self, request: &FeedbackRequest) -> Result<FeedbackOutcome, ApiError>;
}

/// HTTP client for the tutor backend.
///
/// The base URL is fixed at construction.
pub struct TutorClient<C: HttpClient = ReqwestHttpClient> {
    base_url: String,
    http: Arc<C>,
}

impl TutorClient<ReqwestHttpClient> {
    /// Create a client against [`DEFAULT_BASE_URL`].
    pub fn new() -> Self {
        Self::with_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL.
    pub fn with_url(base_url: &str) -> Self {
        Self::with_http(base_url, ReqwestHttpClient::new())
    }
}

impl Default for TutorClient<ReqwestHttpClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: HttpClient> TutorClient<C> {
    /// Create a client over an arbitrary transport.
    pub fn with_http(base_url: &str, http: C) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Arc::new(http),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check that the backend is reachable.
    ///
    /// # Returns
    /// `true` if `GET /` answers 2xx, `false` for any other status
    pub async fn health_check(&self) -> Result<bool, ApiError> {
        let url = self.endpoint("/");
        let response = self.http.get(&url, &json_headers()).await?;
        Ok(response.is_success())
    }

    async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Response, ApiError> {
        let url = self.endpoint(path);
        let body = serde_json::to_string(payload)?;

        tracing::debug!(url = %url, "POST");
        let response = match self.http.post(&url, &body, &json_headers()).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "request failed before a response");
                return Err(e.into());
            }
        };

        if !response.is_success() {
            let err = ApiError::from_status(response.status, &response.body);
            tracing::warn!(url = %url, status = response.status, error = %err, "server rejected request");
            return Err(err);
        }

        Ok(response)
    }
}

#[async_trait]
impl<C: HttpClient> TutorApi for TutorClient<C> {
    async fn ask(&self, question: &str, student_id: &str) -> Result<ConversationEntry, ApiError> {
        let request = AskRequest::new(question, student_id);
        let response = self.post_json("/ask/", &request).await?;
        let entry: ConversationEntry = response.json()?;

        tracing::info!(thread_id = %entry.thread_id, source = %entry.source, "answer received");
        Ok(entry)
    }

    async fn send_feedback(&self, request: &FeedbackRequest) -> Result<FeedbackOutcome, ApiError> {
        let response = self.post_json("/feedback/", request).await?;
        let value: serde_json::Value = if response.body.is_empty() {
            serde_json::Value::Null
        } else {
            response.json()?
        };
        let outcome = FeedbackOutcome::from_value(value)?;

        tracing::info!(
            thread_id = %request.thread_id,
            rating = %request.rating,
            refined = outcome.refined().is_some(),
            "feedback accepted"
        );
        Ok(outcome)
    }
}
