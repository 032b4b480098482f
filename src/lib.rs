//! mathtutor - A terminal client for the math routing agent
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod api;
pub mod app;
pub mod cli;
pub mod error;
pub mod markdown;
pub mod models;
pub mod startup;
pub mod state;
pub mod traits;
pub mod ui;
pub mod widgets;
