//! Conversation screen layout: header, messages, input, keybind hints, and
//! the alert overlay.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus};
use crate::state::FeedbackState;
use crate::widgets::input_box::InputBoxWidget;

use super::messages::build_message_lines;
use super::theme::{
    COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_OFFLINE, COLOR_ONLINE,
};

pub const INPUT_PLACEHOLDER: &str = "Ask a math question...";

/// Render the whole conversation screen.
pub fn render_conversation_screen(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(3),    // Messages
            Constraint::Length(3), // Input
            Constraint::Length(1), // Keybind hints
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_messages_area(frame, chunks[1], app);
    render_input(frame, chunks[2], app);
    frame.render_widget(Paragraph::new(build_hints(app)), chunks[3]);

    if let Some(alert) = &app.alert {
        render_alert(frame, alert);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(COLOR_BORDER));

    let status = match app.connection_status {
        Some(true) => Span::styled("\u{25CF} online", Style::default().fg(COLOR_ONLINE)),
        Some(false) => Span::styled("\u{25CF} offline", Style::default().fg(COLOR_OFFLINE)),
        None => Span::styled("\u{25CB} connecting", Style::default().fg(COLOR_DIM)),
    };

    let line = Line::from(vec![
        Span::styled(
            " Math Routing Agent",
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}  ", app.base_url),
            Style::default().fg(COLOR_DIM),
        ),
        status,
        Span::styled(
            format!("  student: {}", app.student_id),
            Style::default().fg(COLOR_DIM),
        ),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Render messages with the scroll offset clamped to the content.
fn render_messages_area(frame: &mut Frame, area: Rect, app: &mut App) {
    let inner = Rect {
        x: area.x + 1,
        width: area.width.saturating_sub(2),
        ..area
    };

    let lines = build_message_lines(app, inner.width as usize);
    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let scroll = app.window.scroll_mut();
    scroll.set_max_scroll(total.saturating_sub(inner.height));
    let top = scroll.top_line();

    frame.render_widget(Paragraph::new(lines).scroll((top, 0)), inner);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let enabled = app.window.input_enabled();
    let title = if enabled { " Ask " } else { " Waiting for answer... " };
    let widget = InputBoxWidget::new(app.window.input(), title)
        .placeholder(INPUT_PLACEHOLDER)
        .focused(app.focus == Focus::Input)
        .enabled(enabled);
    frame.render_widget(widget, area);
}

/// Keybind hints for the current focus and state.
pub fn build_hints(app: &App) -> Line<'static> {
    let hints: &[(&str, &str)] = match app.focus {
        Focus::Feedback => match app.selected_panel().map(|p| p.state()) {
            Some(FeedbackState::Unrated) => &[
                ("g", "Good"),
                ("b", "Bad"),
                ("\u{2191}/\u{2193}", "Select answer"),
                ("Esc", "Back"),
            ],
            Some(FeedbackState::Rated(_)) => &[
                ("Enter", "Submit"),
                ("Ctrl+G/Ctrl+B", "Change rating"),
                ("Esc", "Back"),
            ],
            _ => &[("\u{2191}/\u{2193}", "Select answer"), ("Esc", "Back")],
        },
        Focus::Input if app.window.is_sending() => &[("PgUp/PgDn", "Scroll"), ("Ctrl+C", "Quit")],
        Focus::Input if app.selected_panel().is_some() => &[
            ("Enter", "Send"),
            ("Tab", "Feedback"),
            ("PgUp/PgDn", "Scroll"),
            ("Ctrl+C", "Quit"),
        ],
        Focus::Input => &[("Enter", "Send"), ("PgUp/PgDn", "Scroll"), ("Ctrl+C", "Quit")],
    };

    let mut spans = vec![Span::raw(" ")];
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(COLOR_HEADER),
        ));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(COLOR_DIM),
        ));
    }
    Line::from(spans)
}

fn render_alert(frame: &mut Frame, message: &str) {
    let area = frame.area();
    let width = area.width.saturating_sub(4).clamp(20, 60).min(area.width);
    let height = 5.min(area.height);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_ERROR))
        .title(" Notice ");
    let body = vec![
        Line::from(message.to_string()),
        Line::from(Span::styled(
            "Press any key to dismiss",
            Style::default().fg(COLOR_DIM),
        )),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(body)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        popup,
    );
}
