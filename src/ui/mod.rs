//! UI rendering for the tutor client
//!
//! A single conversation screen:
//! - Header with backend URL and connection status
//! - Messages, each followed by its feedback panel when it has one
//! - Question input and contextual keybind hints
//! - Alert overlay for feedback errors and prompts

mod conversation;
mod feedback;
mod messages;
mod theme;
mod wrap;

pub use conversation::{build_hints, INPUT_PLACEHOLDER};
pub use feedback::render_feedback_panel;
pub use messages::{build_message_lines, render_message_item, MessageStyle};
pub use wrap::wrap_line_with_prefix;

use ratatui::Frame;

use crate::app::App;
use conversation::render_conversation_screen;

/// Render one frame.
pub fn render(frame: &mut Frame, app: &mut App) {
    render_conversation_screen(frame, app);
}
