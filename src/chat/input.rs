// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Input buffer of the chat controller
//!
//! Manages the input text, cursor position, and history navigation.
//! The cursor is a byte offset that always sits on a character boundary.

/// Input state for the text input field
#[derive(Debug, Clone)]
pub struct InputState {
    buffer: String,
    cursor: usize,
    history: Vec<String>,
    /// None = editing new input, Some(i) = browsing history
    history_index: Option<usize>,
    /// Saved buffer when browsing history
    saved_buffer: Option<String>,
    max_history: usize,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::with_history_size(100)
    }

    pub fn with_history_size(max_history: usize) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            history: Vec::new(),
            history_index: None,
            saved_buffer: None,
            max_history,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor position in characters, for placing the terminal cursor
    pub fn cursor_column(&self) -> usize {
        self.buffer[..self.cursor].chars().count()
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Insert a character at the cursor position
    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert a string at the cursor position
    pub fn insert_str(&mut self, s: &str) {
        self.buffer.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }

    /// Delete the character before the cursor (backspace)
    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.buffer.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    /// Delete the character at the cursor (delete)
    pub fn delete(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.buffer.replace_range(self.cursor..next, "");
        }
    }

    /// Delete the word before the cursor
    pub fn delete_word(&mut self) {
        let before = &self.buffer[..self.cursor];
        let trimmed = before.trim_end_matches(' ');
        let start = trimmed.rfind(' ').map(|i| i + 1).unwrap_or(0);
        self.buffer.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    /// Clear the input buffer
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.history_index = None;
        self.saved_buffer = None;
    }

    /// Clear the buffer and record `sent` in history.
    /// Consecutive duplicates are stored once.
    pub fn submit(&mut self, sent: &str) {
        self.clear();

        if !sent.is_empty() && self.history.last().map(|s| s.as_str()) != Some(sent) {
            self.history.push(sent.to_string());
            if self.history.len() > self.max_history {
                self.history.remove(0);
            }
        }
    }

    /// Navigate to previous history entry
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }

        match self.history_index {
            None => {
                self.saved_buffer = Some(self.buffer.clone());
                self.history_index = Some(self.history.len() - 1);
                self.buffer = self.history[self.history.len() - 1].clone();
                self.cursor = self.buffer.len();
            }
            Some(0) => {}
            Some(i) => {
                self.history_index = Some(i - 1);
                self.buffer = self.history[i - 1].clone();
                self.cursor = self.buffer.len();
            }
        }
    }

    /// Navigate to next history entry
    pub fn history_next(&mut self) {
        match self.history_index {
            None => {}
            Some(i) if i + 1 >= self.history.len() => {
                // Past the newest entry: restore what was being typed
                self.history_index = None;
                if let Some(saved) = self.saved_buffer.take() {
                    self.buffer = saved;
                    self.cursor = self.buffer.len();
                }
            }
            Some(i) => {
                self.history_index = Some(i + 1);
                self.buffer = self.history[i + 1].clone();
                self.cursor = self.buffer.len();
            }
        }
    }

    /// Set the buffer content directly
    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.cursor = self.buffer.len();
        self.history_index = None;
    }
}
