use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthChar;

/// A single-line text input with cursor handling and horizontal scrolling.
///
/// The cursor is a character index, so math symbols like `√` or `π` edit as
/// one unit.
#[derive(Debug, Clone, Default)]
pub struct InputBox {
    content: String,
    /// Cursor position (character index)
    cursor_position: usize,
}

impl InputBox {
    pub fn new() -> Self {
        Self::default()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Insert a character at the cursor
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor_position);
        self.content.insert(at, c);
        self.cursor_position += 1;
    }

    /// Insert a string at the cursor (bracketed paste)
    pub fn insert_str(&mut self, s: &str) {
        // Single-line input: pasted newlines become spaces.
        for c in s.chars() {
            self.insert_char(if c == '\n' || c == '\r' { ' ' } else { c });
        }
    }

    /// Delete the character under the cursor (Delete key)
    pub fn delete_char(&mut self) {
        if self.cursor_position < self.char_count() {
            let at = self.byte_index(self.cursor_position);
            self.content.remove(at);
        }
    }

    /// Delete the character before the cursor (Backspace key)
    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let at = self.byte_index(self.cursor_position);
            self.content.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.char_count() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.char_count();
    }

    pub fn get_content(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Replace the content and move the cursor to the end
    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.cursor_position = self.char_count();
    }

    /// Take the content out, leaving the box empty
    pub fn take(&mut self) -> String {
        self.cursor_position = 0;
        std::mem::take(&mut self.content)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// True when the content is empty or only whitespace
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Render into `area` with a bordered title.
    ///
    /// Shows `placeholder` dimmed when empty. The cursor block is drawn only
    /// when `focused`; a disabled box is drawn dim regardless.
    pub fn render_with_title(
        &self,
        area: Rect,
        buf: &mut Buffer,
        title: &str,
        placeholder: &str,
        focused: bool,
        enabled: bool,
    ) {
        let inner_width = area.width.saturating_sub(2) as usize;

        let border_color = match (enabled, focused) {
            (false, _) => Color::DarkGray,
            (true, true) => Color::Cyan,
            (true, false) => Color::Gray,
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(title)
            .render(area, buf);

        if inner_width == 0 || area.height < 3 {
            return;
        }
        let (x, y) = (area.x + 1, area.y + 1);

        if self.content.is_empty() {
            let style = Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC);
            let shown: String = placeholder.chars().take(inner_width).collect();
            buf.set_string(x, y, shown, style);
            if focused && enabled {
                buf.set_string(x, y, " ", Style::default().bg(Color::Magenta));
            }
            return;
        }

        let text_style = if enabled {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let line = Line::from(self.visible_spans(inner_width, text_style, focused && enabled));
        buf.set_line(x, y, &line, inner_width as u16);
    }

    /// Spans for the slice of content that fits in `width` columns.
    ///
    /// The window shows as much of the tail as fits without hiding the
    /// cursor. With `show_cursor` the character under the cursor is
    /// highlighted, or a block is drawn after the last character.
    pub fn visible_spans(&self, width: usize, text_style: Style, show_cursor: bool) -> Vec<Span<'static>> {
        if width == 0 {
            return Vec::new();
        }
        let chars: Vec<char> = self.content.chars().collect();
        let cursor = self.cursor_position.min(chars.len());

        // Smallest start whose tail, plus the end-of-text block, fits.
        let mut tail_start = chars.len();
        let mut tail_width = 1;
        while tail_start > 0 {
            let w = chars[tail_start - 1].width().unwrap_or(0);
            if tail_width + w > width {
                break;
            }
            tail_width += w;
            tail_start -= 1;
        }
        let start = tail_start.min(cursor);

        let cursor_style = Style::default().fg(Color::Black).bg(Color::Magenta);
        let mut spans = Vec::new();
        let mut run = String::new();
        let mut col = 0usize;
        for (i, c) in chars.iter().enumerate().skip(start) {
            let w = c.width().unwrap_or(0);
            if col + w > width {
                break;
            }
            if show_cursor && i == cursor {
                if !run.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut run), text_style));
                }
                spans.push(Span::styled(c.to_string(), cursor_style));
            } else {
                run.push(*c);
            }
            col += w;
        }
        if !run.is_empty() {
            spans.push(Span::styled(run, text_style));
        }
        if show_cursor && cursor == chars.len() && col < width {
            spans.push(Span::styled(" ", Style::default().bg(Color::Magenta)));
        }
        spans
    }
}

/// A renderable wrapper for InputBox that implements the Widget trait
pub struct InputBoxWidget<'a> {
    input_box: &'a InputBox,
    title: &'a str,
    placeholder: &'a str,
    focused: bool,
    enabled: bool,
}

impl<'a> InputBoxWidget<'a> {
    pub fn new(input_box: &'a InputBox, title: &'a str) -> Self {
        Self {
            input_box,
            title,
            placeholder: "",
            focused: false,
            enabled: true,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Widget for InputBoxWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.input_box.render_with_title(
            area,
            buf,
            self.title,
            self.placeholder,
            self.focused,
            self.enabled,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_input_box() {
        let input = InputBox::new();
        assert!(input.is_empty());
        assert!(input.is_blank());
        assert_eq!(input.cursor_position(), 0);
    }

    #[test]
    fn test_insert_and_backspace_multibyte() {
        let mut input = InputBox::new();
        for c in "√9=3".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.get_content(), "√9=3");
        assert_eq!(input.cursor_position(), 4);

        input.move_cursor_home();
        input.move_cursor_right();
        input.backspace();
        assert_eq!(input.get_content(), "9=3");
        assert_eq!(input.cursor_position(), 0);
    }

    #[test]
    fn test_delete_char() {
        let mut input = InputBox::new();
        input.set_content("πr".to_string());
        input.move_cursor_home();
        input.delete_char();
        assert_eq!(input.get_content(), "r");
    }

    #[test]
    fn test_cursor_bounds() {
        let mut input = InputBox::new();
        input.insert_char('X');
        input.move_cursor_home();
        input.move_cursor_left();
        assert_eq!(input.cursor_position(), 0);
        input.move_cursor_end();
        input.move_cursor_right();
        assert_eq!(input.cursor_position(), 1);
    }

    #[test]
    fn test_whitespace_is_blank() {
        let mut input = InputBox::new();
        input.set_content("   \t".to_string());
        assert!(!input.is_empty());
        assert!(input.is_blank());
    }

    #[test]
    fn test_take_clears() {
        let mut input = InputBox::new();
        input.set_content("2+2".to_string());
        assert_eq!(input.take(), "2+2");
        assert!(input.is_empty());
        assert_eq!(input.cursor_position(), 0);
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = InputBox::new();
        input.insert_str("a\nb");
        assert_eq!(input.get_content(), "a b");
    }

    fn spans_text(spans: &[Span]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_visible_spans_keep_tail_and_cursor() {
        let mut input = InputBox::new();
        input.set_content(format!("{}ENDMARK", "x".repeat(40)));
        for _ in 0..5 {
            input.move_cursor_left();
        }

        let spans = input.visible_spans(10, Style::default(), true);
        let text = spans_text(&spans);
        assert_eq!(text.chars().count(), 9);
        assert!(text.ends_with("ENDMARK"));
        let cursor = spans.iter().find(|s| s.style.bg == Some(Color::Magenta)).unwrap();
        assert_eq!(cursor.content, "D");
    }

    #[test]
    fn test_visible_spans_follow_cursor_home() {
        let mut input = InputBox::new();
        input.set_content("abcdefghijklmnop".to_string());
        input.move_cursor_home();

        let spans = input.visible_spans(5, Style::default(), true);
        assert_eq!(spans_text(&spans), "abcde");
        assert_eq!(spans[0].content, "a");
        assert_eq!(spans[0].style.bg, Some(Color::Magenta));
    }

    #[test]
    fn test_visible_spans_end_block() {
        let mut input = InputBox::new();
        input.set_content("2+2".to_string());
        let spans = input.visible_spans(10, Style::default(), true);
        assert_eq!(spans_text(&spans), "2+2 ");
        assert_eq!(spans.last().unwrap().style.bg, Some(Color::Magenta));
    }

    #[test]
    fn test_render_placeholder_when_empty() {
        let input = InputBox::new();
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        InputBoxWidget::new(&input, " Ask ")
            .placeholder("Ask a math question...")
            .render(area, &mut buf);

        let row: String = (1..29).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.starts_with("Ask a math question..."));
    }
}
