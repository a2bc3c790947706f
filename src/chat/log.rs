// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! The visible message log
//!
//! Bubbles are only ever appended at the end or removed by id; existing
//! bubbles are never edited. Every append pins the view to the bottom.

use unicode_width::UnicodeWidthChar;

use super::escape::sanitize_for_terminal;
use super::message::{Bubble, BubbleId, Message, Sender};

/// Ordered list of rendered bubbles plus the scroll position of the view
#[derive(Debug, Clone)]
pub struct MessageLog {
    bubbles: Vec<Bubble>,
    next_id: u64,
    user_label: String,
    bot_name: String,
    scroll: ScrollState,
}

impl MessageLog {
    pub fn new(user_label: impl Into<String>, bot_name: impl Into<String>) -> Self {
        Self {
            bubbles: Vec::new(),
            next_id: 1,
            user_label: user_label.into(),
            bot_name: bot_name.into(),
            scroll: ScrollState::new(),
        }
    }

    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    fn allocate_id(&mut self) -> BubbleId {
        let id = BubbleId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a bubble and scroll to the bottom.
    fn append(&mut self, bubble: Bubble) -> BubbleId {
        let id = bubble.id();
        tracing::trace!(%id, typing = bubble.is_typing(), "append bubble");
        self.bubbles.push(bubble);
        self.scroll.scroll_to_bottom();
        id
    }

    /// Render a message from the user.
    pub fn append_user(&mut self, text: impl Into<String>) -> BubbleId {
        let id = self.allocate_id();
        let bubble = Bubble::message(id, Message::new(Sender::User, text), &self.user_label);
        self.append(bubble)
    }

    /// Render a message from the bot.
    pub fn append_bot(&mut self, text: impl Into<String>) -> BubbleId {
        let id = self.allocate_id();
        let bubble = Bubble::message(id, Message::new(Sender::Bot, text), &self.bot_name);
        self.append(bubble)
    }

    /// Render a typing indicator and return its id.
    pub fn append_typing(&mut self) -> BubbleId {
        let id = self.allocate_id();
        let bubble = Bubble::typing(id, &self.bot_name);
        self.append(bubble)
    }

    /// Remove a bubble. Returns false if no bubble had that id.
    pub fn remove(&mut self, id: BubbleId) -> bool {
        match self.bubbles.iter().position(|b| b.id() == id) {
            Some(index) => {
                self.bubbles.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: BubbleId) -> Option<&Bubble> {
        self.bubbles.iter().find(|b| b.id() == id)
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn last(&self) -> Option<&Bubble> {
        self.bubbles.last()
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    /// Number of typing indicators currently shown
    pub fn typing_count(&self) -> usize {
        self.bubbles.iter().filter(|b| b.is_typing()).count()
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }

    /// Total height in terminal lines of all bubbles at the given width
    pub fn total_height(&self, width: u16) -> usize {
        self.bubbles
            .iter()
            .map(|b| ScrollState::bubble_height(b, width))
            .sum()
    }
}

/// Scroll position of the message view
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Current scroll position in lines from the top
    pub scroll_offset: usize,
    /// Height of the viewport in lines
    pub viewport_height: u16,
    /// Follow the bottom of the log on the next draw
    pinned: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollState {
    pub fn new() -> Self {
        Self {
            scroll_offset: 0,
            viewport_height: 20,
            pinned: true,
        }
    }

    /// Update the viewport height (called when the terminal is resized)
    pub fn update_viewport_height(&mut self, height: u16) {
        self.viewport_height = height;
    }

    /// Height of one bubble: text lines wrapped to width, a footer line, and a
    /// blank separator.
    pub fn bubble_height(bubble: &Bubble, width: u16) -> usize {
        let content_width = width.saturating_sub(4).max(1) as usize;
        let text = sanitize_for_terminal(&bubble.raw_text());

        let content_height = text
            .lines()
            .map(|line| wrap_line(line, content_width).len())
            .sum::<usize>()
            .max(1);

        let meta_height = usize::from(bubble.meta().is_some());
        content_height + meta_height + 1
    }

    pub fn max_offset(&self, total_height: usize) -> usize {
        total_height.saturating_sub(self.viewport_height as usize)
    }

    /// Pin the view to the bottom of the log.
    pub fn scroll_to_bottom(&mut self) {
        self.pinned = true;
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Resolve the offset for the current content height and return it.
    pub fn sync(&mut self, total_height: usize) -> usize {
        let max = self.max_offset(total_height);
        self.scroll_offset = if self.pinned {
            max
        } else {
            self.scroll_offset.min(max)
        };
        self.scroll_offset
    }

    /// Scroll up by the specified number of lines
    pub fn scroll_up(&mut self, lines: usize, total_height: usize) {
        self.sync(total_height);
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
        if lines > 0 && self.scroll_offset < self.max_offset(total_height) {
            self.pinned = false;
        }
    }

    /// Scroll down by the specified number of lines
    pub fn scroll_down(&mut self, lines: usize, total_height: usize) {
        self.sync(total_height);
        let max = self.max_offset(total_height);
        self.scroll_offset = (self.scroll_offset + lines).min(max);
        if self.scroll_offset >= max {
            self.pinned = true;
        }
    }

    /// Page size used by PageUp/PageDown
    pub fn page(&self) -> usize {
        (self.viewport_height as usize).saturating_sub(2).max(1)
    }
}

/// Split a line into rows of at most `width` terminal cells.
///
/// A character wider than `width` gets a row of its own. An empty line is one
/// empty row.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut used = 0;

    for c in line.chars() {
        let cells = c.width().unwrap_or(0);
        if used + cells > width && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push(c);
        used += cells;
    }

    if !current.is_empty() || rows.is_empty() {
        rows.push(current);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> MessageLog {
        MessageLog::new("You", "RuleCraft")
    }

    #[test]
    fn test_append_allocates_increasing_ids() {
        let mut log = log();
        let a = log.append_user("one");
        let b = log.append_typing();
        let c = log.append_bot("two");
        assert!(a < b && b < c);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_ids_never_reused_after_remove() {
        let mut log = log();
        let first = log.append_typing();
        assert!(log.remove(first));
        let second = log.append_typing();
        assert_ne!(first, second);
    }

    #[test]
    fn test_remove_only_once() {
        let mut log = log();
        let typing = log.append_typing();
        assert_eq!(log.typing_count(), 1);
        assert!(log.remove(typing));
        assert!(!log.remove(typing));
        assert_eq!(log.typing_count(), 0);
    }

    #[test]
    fn test_append_order_preserved() {
        let mut log = log();
        log.append_user("hello");
        log.append_bot("hi");
        let senders: Vec<Sender> = log.bubbles().iter().map(|b| b.sender()).collect();
        assert_eq!(senders, vec![Sender::User, Sender::Bot]);
        assert_eq!(log.last().unwrap().body(), "hi");
    }

    #[test]
    fn test_append_pins_scroll_even_after_manual_scroll() {
        let mut log = log();
        for i in 0..30 {
            log.append_bot(format!("line {}", i));
        }
        let total = log.total_height(80);
        log.scroll_mut().update_viewport_height(10);
        log.scroll_mut().scroll_up(5, total);
        assert!(!log.scroll().is_pinned());

        log.append_user("new");
        assert!(log.scroll().is_pinned());
        let total = log.total_height(80);
        let offset = log.scroll_mut().sync(total);
        assert_eq!(offset, total - 10);
    }

    #[test]
    fn test_bubble_height_wraps() {
        let mut log = log();
        let id = log.append_bot("a".repeat(30));
        let bubble = log.get(id).unwrap();
        // 30 chars in a 10-wide content area: 3 lines + meta + separator
        assert_eq!(ScrollState::bubble_height(bubble, 14), 5);
    }

    #[test]
    fn test_wide_characters_take_two_cells() {
        let mut log = log();
        let id = log.append_bot("一二三四五六七八九十");
        // 10 double-width chars in a 10-cell content area: 2 rows + meta + separator
        assert_eq!(ScrollState::bubble_height(log.get(id).unwrap(), 14), 4);
    }

    #[test]
    fn test_wrap_line_by_cells() {
        assert_eq!(wrap_line("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(wrap_line("", 4), vec![""]);
        assert_eq!(wrap_line("héllo", 2), vec!["hé", "ll", "o"]);
        assert_eq!(wrap_line("一二三", 4), vec!["一二", "三"]);
        assert_eq!(wrap_line("a一b", 2), vec!["a", "一", "b"]);
        // Wider than the row: alone on its own row
        assert_eq!(wrap_line("一二", 1), vec!["一", "二"]);
    }

    #[test]
    fn test_typing_bubble_height_has_no_meta() {
        let mut log = log();
        let id = log.append_typing();
        assert_eq!(ScrollState::bubble_height(log.get(id).unwrap(), 80), 2);
    }

    #[test]
    fn test_scroll_down_to_bottom_repins() {
        let mut scroll = ScrollState::new();
        scroll.update_viewport_height(10);
        scroll.scroll_up(3, 50);
        assert!(!scroll.is_pinned());
        assert_eq!(scroll.scroll_offset, 37);

        scroll.scroll_down(100, 50);
        assert!(scroll.is_pinned());
        assert_eq!(scroll.scroll_offset, 40);
    }

    #[test]
    fn test_sync_clamps_when_content_shrinks() {
        let mut scroll = ScrollState::new();
        scroll.update_viewport_height(10);
        scroll.scroll_up(1, 100);
        assert_eq!(scroll.sync(20), 10);
    }

    #[test]
    fn test_short_content_has_zero_offset() {
        let mut scroll = ScrollState::new();
        scroll.update_viewport_height(20);
        assert_eq!(scroll.sync(5), 0);
        scroll.scroll_up(3, 5);
        // Nothing to scroll, stays pinned
        assert!(scroll.is_pinned());
    }
}
