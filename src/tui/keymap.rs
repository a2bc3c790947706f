// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Key bindings for the chat TUI

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Submit,
    ToggleTheme,
    Quit,
    Insert(char),
    Backspace,
    Delete,
    DeleteWord,
    ClearInput,
    Left,
    Right,
    Home,
    End,
    HistoryPrev,
    HistoryNext,
    PageUp,
    PageDown,
    LineUp,
    LineDown,
    None,
}

/// Map a key press to an action.
pub fn action_for(key: KeyEvent) -> KeyAction {
    match (key.modifiers, key.code) {
        (_, KeyCode::Enter) => KeyAction::Submit,
        (KeyModifiers::NONE, KeyCode::Esc) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            KeyAction::Quit
        }
        (KeyModifiers::CONTROL, KeyCode::Char('t')) => KeyAction::ToggleTheme,
        (KeyModifiers::CONTROL, KeyCode::Char('w')) => KeyAction::DeleteWord,
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => KeyAction::ClearInput,
        (KeyModifiers::NONE, KeyCode::Home) | (KeyModifiers::CONTROL, KeyCode::Char('a')) => {
            KeyAction::Home
        }
        (KeyModifiers::NONE, KeyCode::End) | (KeyModifiers::CONTROL, KeyCode::Char('e')) => {
            KeyAction::End
        }
        (KeyModifiers::CONTROL, KeyCode::Up) => KeyAction::LineUp,
        (KeyModifiers::CONTROL, KeyCode::Down) => KeyAction::LineDown,
        (_, KeyCode::Up) => KeyAction::HistoryPrev,
        (_, KeyCode::Down) => KeyAction::HistoryNext,
        (_, KeyCode::Left) => KeyAction::Left,
        (_, KeyCode::Right) => KeyAction::Right,
        (_, KeyCode::PageUp) => KeyAction::PageUp,
        (_, KeyCode::PageDown) => KeyAction::PageDown,
        (_, KeyCode::Backspace) => KeyAction::Backspace,
        (_, KeyCode::Delete) => KeyAction::Delete,
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => KeyAction::Insert(c),
        _ => KeyAction::None,
    }
}

/// Help line shown under the input
pub const KEY_HINTS: &str =
    "Enter send · Ctrl+T theme · ↑/↓ history · PgUp/PgDn scroll · Esc quit";
