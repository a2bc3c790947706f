// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Text safety for rendered bubbles
//!
//! User input and server replies are both untrusted. Bubble bodies are
//! HTML-escaped before they enter the log, and raw text is stripped of
//! terminal control sequences before it is drawn.

/// Escape `&`, `<`, `>`, `"` and `'` so the text can never be read as markup.
pub fn escape_html(unsafe_text: &str) -> String {
    let mut escaped = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Remove control characters (including ANSI escape sequences) that would
/// let a reply move the cursor or recolour the terminal. Newlines and tabs
/// are kept; tabs become spaces.
pub fn sanitize_for_terminal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\n' => out.push('\n'),
            '\t' => out.push_str("    "),
            '\u{1b}' => {
                // CSI: ESC [ params final-byte
                if chars.peek() == Some(&'[') {
                    chars.next();
                    for next in chars.by_ref() {
                        if ('\u{40}'..='\u{7e}').contains(&next) {
                            break;
                        }
                    }
                }
            }
            c if c.is_control() => {}
            c => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_escape_html_all_special_chars() {
        assert_eq!(
            escape_html(r#"& < > " '"#),
            "&amp; &lt; &gt; &quot; &#039;"
        );
    }

    #[test]
    fn test_escape_html_script_tag() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_escape_html_ampersand_first() {
        // Already-escaped text must be escaped again, not passed through.
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_escape_html_plain_text_unchanged() {
        assert_eq!(escape_html("Hi there"), "Hi there");
        assert_eq!(escape_html("héllo 👋"), "héllo 👋");
    }

    #[test]
    fn test_sanitize_strips_ansi_colour() {
        assert_eq!(sanitize_for_terminal("\u{1b}[31mred\u{1b}[0m"), "red");
    }

    #[test]
    fn test_sanitize_strips_cursor_movement() {
        assert_eq!(sanitize_for_terminal("a\u{1b}[2Jb\u{7}c"), "abc");
    }

    #[test]
    fn test_sanitize_keeps_newlines() {
        assert_eq!(sanitize_for_terminal("1. one\n2. two"), "1. one\n2. two");
        assert_eq!(sanitize_for_terminal("a\tb"), "a    b");
        assert_eq!(sanitize_for_terminal("a\r\nb"), "a\nb");
    }

    proptest! {
        #[test]
        fn prop_escaped_text_has_no_markup(s in ".*") {
            let escaped = escape_html(&s);
            prop_assert!(!escaped.contains('<'));
            prop_assert!(!escaped.contains('>'));
            prop_assert!(!escaped.contains('"'));
            prop_assert!(!escaped.contains('\''));
        }

        #[test]
        fn prop_sanitized_text_has_no_controls(s in ".*") {
            let clean = sanitize_for_terminal(&s);
            prop_assert!(clean.chars().all(|c| c == '\n' || !c.is_control()));
        }
    }
}
