//! Startup: configuration, logging, and the backend reachability check.
//!
//! # Usage
//!
//! ```ignore
//! use mathtutor::startup::{init_logging, ClientConfig};
//!
//! let config = ClientConfig::from_env().apply_cli(&args);
//! init_logging(&config.log_filter);
//! ```

pub mod config;
pub mod health;
pub mod logging;

pub use config::{ClientConfig, DEFAULT_LOG_FILTER, ENV_API_URL, ENV_LOG, ENV_STUDENT_ID};
pub use health::spawn_health_check;
pub use logging::init_logging;
