//! Scroll position of the conversation view.

/// Scroll offset measured upward from the newest content.
///
/// `0` means pinned to the end. The render pass reports how far the content
/// can scroll through [`ScrollState::set_max_scroll`], which re-clamps the
/// offset.
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    offset: u16,
    max_scroll: u16,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn max_scroll(&self) -> u16 {
        self.max_scroll
    }

    /// Called by the renderer once the content height is known.
    pub fn set_max_scroll(&mut self, max_scroll: u16) {
        self.max_scroll = max_scroll;
        self.offset = self.offset.min(max_scroll);
    }

    /// Scroll toward older content. Returns true if the position changed.
    pub fn scroll_up(&mut self, lines: u16) -> bool {
        let old = self.offset;
        self.offset = self.offset.saturating_add(lines).min(self.max_scroll);
        old != self.offset
    }

    /// Scroll toward newer content. Returns true if the position changed.
    pub fn scroll_down(&mut self, lines: u16) -> bool {
        let old = self.offset;
        self.offset = self.offset.saturating_sub(lines);
        old != self.offset
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = 0;
    }

    pub fn is_at_bottom(&self) -> bool {
        self.offset == 0
    }

    /// Top line to display given the total scrollable height.
    pub fn top_line(&self) -> u16 {
        self.max_scroll.saturating_sub(self.offset)
    }
}
