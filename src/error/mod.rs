//! Error types for mathtutor.
//!
//! | Type | Raised by | Surfaced as |
//! |------|-----------|-------------|
//! | [`ApiError`] | `api::TutorClient` | inline error entry (ask) or alert (feedback) |
//! | [`CliError`] | `cli::parse_args` | message on stderr, exit code 2 |
//!
//! Nothing here is fatal to a running UI.

mod api;
mod category;

pub use api::ApiError;
pub use category::ErrorCategory;
pub use crate::cli::CliError;
