//! Type definitions for the application state.

/// Which part of the screen receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The question input at the bottom.
    #[default]
    Input,
    /// The feedback panel of the selected answer.
    Feedback,
}
