//! Color theme constants for the tutor UI.

use ratatui::style::Color;

// ============================================================================
// Chrome
// ============================================================================

/// Primary border color
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Header text color
pub const COLOR_HEADER: Color = Color::White;

/// Dim text for less important info (source labels, hints)
pub const COLOR_DIM: Color = Color::DarkGray;

/// Backend reachable
pub const COLOR_ONLINE: Color = Color::LightGreen;

/// Backend unreachable
pub const COLOR_OFFLINE: Color = Color::Red;

// ============================================================================
// Message Styles
// ============================================================================

/// Student's own question
pub const COLOR_USER: Color = Color::Cyan;

/// Agent answer
pub const COLOR_AGENT: Color = Color::Rgb(4, 181, 117); // green #04B575

/// Answer refined after feedback
pub const COLOR_REFINED: Color = Color::Magenta;

/// Failed request
pub const COLOR_ERROR: Color = Color::Red;

/// Message body text
pub const COLOR_TEXT: Color = Color::White;

// ============================================================================
// Feedback
// ============================================================================

pub const COLOR_GOOD: Color = Color::LightGreen;

pub const COLOR_BAD: Color = Color::LightRed;

/// Marker on the panel that receives feedback keys
pub const COLOR_SELECTED: Color = Color::Yellow;
