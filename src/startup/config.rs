//! Client configuration.
//!
//! Resolved once at startup from the environment and command-line flags and
//! fixed for the lifetime of the process.

use crate::api::DEFAULT_BASE_URL;
use crate::cli::CliArgs;
use crate::models::DEFAULT_STUDENT_ID;

/// Backend base URL override.
pub const ENV_API_URL: &str = "MATHTUTOR_API_URL";
/// Student id override.
pub const ENV_STUDENT_ID: &str = "MATHTUTOR_STUDENT_ID";
/// `tracing` filter directive.
pub const ENV_LOG: &str = "MATHTUTOR_LOG";

pub const DEFAULT_LOG_FILTER: &str = "mathtutor=info";

/// Configuration for the tutor client.
///
/// # Example
///
/// ```ignore
/// use mathtutor::startup::ClientConfig;
///
/// let config = ClientConfig::from_env().apply_cli(&cli_args);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL (default: http://localhost:8000)
    pub base_url: String,
    /// Student id sent with every question (default: student1)
    pub student_id: String,
    /// Log filter directive (default: mathtutor=info)
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            student_id: DEFAULT_STUDENT_ID.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_student_id(mut self, student_id: impl Into<String>) -> Self {
        self.student_id = student_id.into();
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup`; blank values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = Self::default();
        if let Some(url) = get(ENV_API_URL) {
            config = config.with_base_url(url);
        }
        if let Some(student_id) = get(ENV_STUDENT_ID) {
            config = config.with_student_id(student_id);
        }
        if let Some(filter) = get(ENV_LOG) {
            config = config.with_log_filter(filter);
        }
        config
    }

    /// Apply command-line overrides, which take precedence over the environment.
    pub fn apply_cli(mut self, args: &CliArgs) -> Self {
        if let Some(url) = &args.base_url {
            self.base_url = url.clone();
        }
        if let Some(student_id) = &args.student_id {
            self.student_id = student_id.clone();
        }
        self
    }
}
