//! Solution text formatting for terminal rendering.
//!
//! Agent solutions use exactly two pieces of markup: line breaks separate
//! steps, and `**` toggles emphasis. Nothing else is interpreted, so an
//! unmatched `**` simply emphasizes the rest of its line.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

/// A run of text with uniform emphasis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub emphasized: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: false,
        }
    }

    pub fn emphasized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: true,
        }
    }
}

/// One display line of a solution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolutionLine {
    pub segments: Vec<Segment>,
}

impl SolutionLine {
    /// The line's text with markup removed.
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Split solution text into lines of plain and emphasized segments.
///
/// Pieces between `**` delimiters alternate plain/emphasized starting with
/// plain, so odd-indexed pieces are emphasized. Empty pieces are dropped.
/// Empty input yields no lines; any other input yields one line per `\n`.
pub fn render_solution(text: &str) -> Vec<SolutionLine> {
    if text.is_empty() {
        return Vec::new();
    }

    text.split('\n')
        .map(|raw| {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            let segments = line
                .split("**")
                .enumerate()
                .filter(|(_, part)| !part.is_empty())
                .map(|(i, part)| Segment {
                    text: part.to_string(),
                    emphasized: i % 2 == 1,
                })
                .collect();
            SolutionLine { segments }
        })
        .collect()
}

/// Convert rendered solution lines into ratatui lines.
///
/// Emphasized segments get `BOLD` on top of `base`.
pub fn to_lines(lines: &[SolutionLine], base: Style) -> Vec<Line<'static>> {
    lines
        .iter()
        .map(|line| {
            let spans: Vec<Span<'static>> = line
                .segments
                .iter()
                .map(|segment| {
                    let style = if segment.emphasized {
                        base.add_modifier(Modifier::BOLD)
                    } else {
                        base
                    };
                    Span::styled(segment.text.clone(), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Convenience: format `text` straight to ratatui lines.
pub fn solution_lines(text: &str, base: Style) -> Vec<Line<'static>> {
    to_lines(&render_solution(text), base)
}
