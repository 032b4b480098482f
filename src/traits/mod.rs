//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - HTTP transport used by the tutor API client
//!
//! The higher-level [`crate::api::TutorApi`] seam lives next to its
//! implementation in the `api` module.

pub mod http;

pub use http::{json_headers, Headers, HttpClient, HttpError, Response};
