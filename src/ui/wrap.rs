//! Text wrapping for message rendering.
//!
//! Lines are pre-wrapped so every visual line keeps the message's prefix bar,
//! which ratatui's own `Wrap` does not do for continuation lines.

use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wrap a styled line to `max_width`, prepending `prefix` to every visual line.
///
/// Breaks at spaces where possible; a word wider than the content width is
/// split by character. Styles of the original spans are preserved.
pub fn wrap_line_with_prefix(
    line: Line<'static>,
    prefix: &'static str,
    prefix_style: Style,
    max_width: usize,
) -> Vec<Line<'static>> {
    let content_width = max_width.saturating_sub(prefix.width());

    let segments: Vec<(String, Style)> = line
        .spans
        .into_iter()
        .filter(|span| !span.content.is_empty())
        .map(|span| (span.content.into_owned(), span.style))
        .collect();

    let total_width: usize = segments.iter().map(|(s, _)| s.width()).sum();
    if content_width < 5 || total_width <= content_width {
        let mut spans = vec![Span::styled(prefix, prefix_style)];
        spans.extend(segments.into_iter().map(|(text, style)| Span::styled(text, style)));
        return vec![Line::from(spans)];
    }

    let mut builder = LineBuilder::new(prefix, prefix_style, content_width);
    for (text, style) in segments {
        let mut word = String::new();
        for c in text.chars() {
            if c == ' ' {
                builder.push_word(std::mem::take(&mut word), style);
                builder.push_space(style);
            } else {
                word.push(c);
            }
        }
        builder.push_word(word, style);
    }
    builder.finish()
}

/// Wrap each line in turn.
pub fn wrap_lines_with_prefix(
    lines: Vec<Line<'static>>,
    prefix: &'static str,
    prefix_style: Style,
    max_width: usize,
) -> Vec<Line<'static>> {
    lines
        .into_iter()
        .flat_map(|line| wrap_line_with_prefix(line, prefix, prefix_style, max_width))
        .collect()
}

struct LineBuilder {
    prefix: &'static str,
    prefix_style: Style,
    content_width: usize,
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    width: usize,
}

impl LineBuilder {
    fn new(prefix: &'static str, prefix_style: Style, content_width: usize) -> Self {
        Self {
            prefix,
            prefix_style,
            content_width,
            lines: Vec::new(),
            current: vec![Span::styled(prefix, prefix_style)],
            width: 0,
        }
    }

    fn break_line(&mut self) {
        if self.current.len() > 1 && self.current.last().is_some_and(|s| s.content == " ") {
            self.current.pop();
        }
        let done = std::mem::replace(
            &mut self.current,
            vec![Span::styled(self.prefix, self.prefix_style)],
        );
        self.lines.push(Line::from(done));
        self.width = 0;
    }

    fn push_space(&mut self, style: Style) {
        // Leading spaces on a continuation line are dropped.
        if self.width == 0 && !self.lines.is_empty() {
            return;
        }
        if self.width + 1 > self.content_width {
            self.break_line();
            return;
        }
        self.current.push(Span::styled(" ", style));
        self.width += 1;
    }

    fn push_word(&mut self, word: String, style: Style) {
        if word.is_empty() {
            return;
        }
        let word_width = word.width();
        if self.width + word_width <= self.content_width {
            self.current.push(Span::styled(word, style));
            self.width += word_width;
            return;
        }
        if self.width > 0 && word_width <= self.content_width {
            self.break_line();
            self.current.push(Span::styled(word, style));
            self.width = word_width;
            return;
        }

        // Longer than a whole line: split by character.
        let mut chunk = String::new();
        for c in word.chars() {
            let w = c.width().unwrap_or(0);
            if self.width + w > self.content_width {
                if !chunk.is_empty() {
                    self.current.push(Span::styled(std::mem::take(&mut chunk), style));
                }
                self.break_line();
            }
            chunk.push(c);
            self.width += w;
        }
        if !chunk.is_empty() {
            self.current.push(Span::styled(chunk, style));
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        if self.current.len() > 1 || self.lines.is_empty() {
            self.lines.push(Line::from(self.current));
        }
        self.lines
    }
}
