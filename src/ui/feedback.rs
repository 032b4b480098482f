//! Feedback panel rendering.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use crate::models::Rating;
use crate::state::{FeedbackPanel, FeedbackState};

use super::messages::SPINNER_FRAMES;
use super::theme::{COLOR_BAD, COLOR_DIM, COLOR_GOOD, COLOR_SELECTED, COLOR_TEXT};

fn rating_button(label: &'static str, color: Color, chosen: bool, enabled: bool) -> Span<'static> {
    let style = match (chosen, enabled) {
        (true, true) => Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(COLOR_DIM).add_modifier(Modifier::REVERSED),
        (false, true) => Style::default().fg(color),
        (false, false) => Style::default().fg(COLOR_DIM),
    };
    Span::styled(label, style)
}

const GOOD_LABEL: &str = "[ Good ]";
const BAD_LABEL: &str = "[ Bad ]";
const INDENT: &str = "  ";
const TEXT_PREFIX: &str = "  > ";

/// Lines for the panel under an answer, fitted to `width` columns.
///
/// `selected` marks the panel keyboard actions apply to; `focused` draws the
/// text cursor. The feedback text scrolls horizontally to keep the cursor in
/// view.
pub fn render_feedback_panel(
    panel: &FeedbackPanel,
    selected: bool,
    focused: bool,
    tick_count: u64,
    width: usize,
) -> Vec<Line<'static>> {
    let marker = if selected {
        Span::styled("\u{25B8} ", Style::default().fg(COLOR_SELECTED))
    } else {
        Span::raw(INDENT)
    };

    if panel.is_submitted() {
        return vec![Line::from(vec![
            marker,
            Span::styled(
                "\u{2713} Thank you for your feedback!",
                Style::default().fg(COLOR_GOOD),
            ),
        ])];
    }

    let enabled = panel.is_editable();
    let rating = panel.rating();
    let good = rating_button(GOOD_LABEL, COLOR_GOOD, rating == Some(Rating::Good), enabled);
    let bad = rating_button(BAD_LABEL, COLOR_BAD, rating == Some(Rating::Bad), enabled);

    let mut lines = vec![Line::from(vec![
        marker,
        Span::styled("Was this solution helpful?", Style::default().fg(COLOR_DIM)),
    ])];
    if INDENT.width() + GOOD_LABEL.width() + 1 + BAD_LABEL.width() <= width {
        lines.push(Line::from(vec![Span::raw(INDENT), good, Span::raw(" "), bad]));
    } else {
        lines.push(Line::from(vec![Span::raw(INDENT), good]));
        lines.push(Line::from(vec![Span::raw(INDENT), bad]));
    }

    if !panel.shows_form() {
        return lines;
    }

    let input = panel.text();
    let text_width = width.saturating_sub(TEXT_PREFIX.width());
    let show_cursor = focused && enabled;
    let mut text_line = vec![Span::styled(TEXT_PREFIX, Style::default().fg(COLOR_DIM))];
    if input.is_empty() {
        if show_cursor {
            text_line.push(Span::styled(" ", Style::default().bg(Color::Magenta)));
        }
        let placeholder: String = panel
            .placeholder()
            .unwrap_or_default()
            .chars()
            .take(text_width.saturating_sub(usize::from(show_cursor)))
            .collect();
        text_line.push(Span::styled(
            placeholder,
            Style::default().fg(COLOR_DIM).add_modifier(Modifier::ITALIC),
        ));
    } else {
        let text_style = if enabled {
            Style::default().fg(COLOR_TEXT)
        } else {
            Style::default().fg(COLOR_DIM)
        };
        text_line.extend(input.visible_spans(text_width, text_style, show_cursor));
    }
    lines.push(Line::from(text_line));

    lines.push(match panel.state() {
        FeedbackState::Submitting(_) => {
            let frame = SPINNER_FRAMES[(tick_count / 5) as usize % SPINNER_FRAMES.len()];
            Line::from(Span::styled(
                format!("  {} Submitting...", frame),
                Style::default().fg(COLOR_DIM).add_modifier(Modifier::ITALIC),
            ))
        }
        _ => Line::from(Span::styled(
            "  [Enter] Submit Feedback",
            Style::default().fg(if focused { COLOR_TEXT } else { COLOR_DIM }),
        )),
    });
    lines
}
