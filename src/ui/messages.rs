//! Conversation message rendering.
//!
//! Each entry renders according to its [`Source`]:
//!
//! | source                                       | question | style   | feedback |
//! |----------------------------------------------|----------|---------|----------|
//! | `user`                                       | only     | user    | no       |
//! | `error`                                      | yes      | error   | no       |
//! | `refined`                                    | yes      | refined | no       |
//! | `knowledge_base`, `web_search`, `direct_answer` | no    | agent   | yes      |
//! | anything else                                | no       | agent   | no       |

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::app::{App, Focus};
use crate::markdown::solution_lines;
use crate::models::{ConversationEntry, Source};

use super::feedback::render_feedback_panel;
use super::theme::{
    COLOR_AGENT, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_REFINED, COLOR_TEXT, COLOR_USER,
};
use super::wrap::{wrap_line_with_prefix, wrap_lines_with_prefix};

/// Braille spinner frames for the thinking indicator.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const BAR: &str = "\u{2502} ";

/// Visual treatment of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    User,
    Agent,
    Refined,
    Error,
}

impl MessageStyle {
    pub fn for_source(source: &Source) -> Self {
        match source {
            Source::User => MessageStyle::User,
            Source::Error => MessageStyle::Error,
            Source::Refined => MessageStyle::Refined,
            Source::KnowledgeBase
            | Source::WebSearch
            | Source::DirectAnswer
            | Source::Other(_) => MessageStyle::Agent,
        }
    }

    pub fn color(self) -> Color {
        match self {
            MessageStyle::User => COLOR_USER,
            MessageStyle::Agent => COLOR_AGENT,
            MessageStyle::Refined => COLOR_REFINED,
            MessageStyle::Error => COLOR_ERROR,
        }
    }

    /// Speaker label on the first line of the message.
    pub fn label(self) -> &'static str {
        match self {
            MessageStyle::User => "You",
            MessageStyle::Agent => "Tutor",
            MessageStyle::Refined => "Tutor (refined)",
            MessageStyle::Error => "Error",
        }
    }

    /// Whether the question is repeated above the solution.
    pub fn shows_question(self) -> bool {
        !matches!(self, MessageStyle::Agent)
    }
}

/// Render one entry (without its feedback panel).
pub fn render_message_item(entry: &ConversationEntry, width: usize) -> Vec<Line<'static>> {
    let style = MessageStyle::for_source(&entry.source);
    let bar_style = Style::default().fg(style.color());
    let mut lines = vec![Line::from(vec![
        Span::styled(BAR, bar_style),
        Span::styled(
            style.label(),
            Style::default().fg(style.color()).add_modifier(Modifier::BOLD),
        ),
    ])];

    if style == MessageStyle::User {
        let question = Line::from(Span::styled(
            entry.question.clone(),
            Style::default().fg(COLOR_TEXT),
        ));
        lines.extend(wrap_line_with_prefix(question, BAR, bar_style, width));
        return lines;
    }

    if style.shows_question() {
        let question = Line::from(vec![
            Span::styled("Q: ", Style::default().fg(COLOR_DIM)),
            Span::styled(
                entry.question.clone(),
                Style::default().fg(COLOR_DIM).add_modifier(Modifier::ITALIC),
            ),
        ]);
        lines.extend(wrap_line_with_prefix(question, BAR, bar_style, width));
    }

    let body_style = if style == MessageStyle::Error {
        Style::default().fg(COLOR_ERROR)
    } else {
        Style::default().fg(COLOR_TEXT)
    };
    lines.extend(wrap_lines_with_prefix(
        solution_lines(&entry.solution, body_style),
        BAR,
        bar_style,
        width,
    ));

    lines.push(Line::from(vec![
        Span::styled(BAR, bar_style),
        Span::styled(
            format!("Source: {}", entry.source),
            Style::default().fg(COLOR_DIM),
        ),
    ]));
    lines
}

/// Greeting shown while the conversation is empty.
pub fn welcome_lines() -> Vec<Line<'static>> {
    let bar_style = Style::default().fg(COLOR_AGENT);
    vec![
        Line::from(vec![
            Span::styled(BAR, bar_style),
            Span::styled(
                "Hello!",
                Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(BAR, bar_style),
            Span::styled(
                "I am your Math Routing Agent. How can I help you today?",
                Style::default().fg(COLOR_TEXT),
            ),
        ]),
    ]
}

pub fn thinking_line(tick_count: u64) -> Line<'static> {
    let frame = SPINNER_FRAMES[(tick_count / 5) as usize % SPINNER_FRAMES.len()];
    Line::from(vec![
        Span::styled(format!("{} ", frame), Style::default().fg(COLOR_AGENT)),
        Span::styled(
            "Thinking...",
            Style::default().fg(COLOR_DIM).add_modifier(Modifier::ITALIC),
        ),
    ])
}

/// Build every line of the conversation view at `width`.
pub fn build_message_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    let entries = app.window.entries();
    if entries.is_empty() {
        return welcome_lines();
    }

    let mut lines = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        lines.extend(render_message_item(entry, width));

        if let Some(panel) = app.feedback.get(&index) {
            let selected = app.selected_feedback == Some(index);
            lines.extend(render_feedback_panel(
                panel,
                selected,
                selected && app.focus == Focus::Feedback,
                app.tick_count,
                width,
            ));
        }
    }

    if app.window.is_sending() {
        lines.push(Line::default());
        lines.push(thinking_line(app.tick_count));
    }
    lines
}
