// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Messages and the bubbles that display them

use std::fmt;

use chrono::{DateTime, Local};

use super::escape::escape_html;

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// CSS class used for the bubble in HTML output
    pub fn css_class(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// A chat message. Immutable once rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    sender: Sender,
    text: String,
    timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: Local::now(),
        }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// Raw, unescaped text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Local wall-clock time of the message, e.g. `14:03:27`
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

/// Identity of a bubble within one log. Allocated from a monotonic counter,
/// so two bubbles created in the same instant still differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BubbleId(pub(crate) u64);

impl fmt::Display for BubbleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bubble-{}", self.0)
    }
}

/// What a bubble shows
#[derive(Debug, Clone, PartialEq)]
pub enum BubbleKind {
    /// A real message
    Message(Message),
    /// "<bot> is typing..." placeholder while a reply is awaited
    Typing,
}

/// A single rendered entry in the message log
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    id: BubbleId,
    kind: BubbleKind,
    /// HTML-escaped body, fixed at insertion
    body: String,
    /// Footer such as `You • 14:03:27`; typing bubbles have none
    meta: Option<String>,
}

impl Bubble {
    pub(crate) fn message(id: BubbleId, message: Message, author: &str) -> Self {
        let body = escape_html(message.text());
        let meta = Some(format!("{} • {}", author, message.time_label()));
        Self {
            id,
            kind: BubbleKind::Message(message),
            body,
            meta,
        }
    }

    pub(crate) fn typing(id: BubbleId, bot_name: &str) -> Self {
        Self {
            id,
            kind: BubbleKind::Typing,
            body: escape_html(&format!("{} is typing...", bot_name)),
            meta: None,
        }
    }

    pub fn id(&self) -> BubbleId {
        self.id
    }

    /// Escaped body, safe to embed in HTML
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn meta(&self) -> Option<&str> {
        self.meta.as_deref()
    }

    pub fn is_typing(&self) -> bool {
        matches!(self.kind, BubbleKind::Typing)
    }

    /// Sender of the bubble. Typing indicators belong to the bot.
    pub fn sender(&self) -> Sender {
        match &self.kind {
            BubbleKind::Message(message) => message.sender(),
            BubbleKind::Typing => Sender::Bot,
        }
    }

    /// Raw text for surfaces that do not interpret markup
    pub fn raw_text(&self) -> String {
        match &self.kind {
            BubbleKind::Message(message) => message.text().to_string(),
            BubbleKind::Typing => unescape_minimal(&self.body),
        }
    }

    /// HTML fragment for this bubble
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        if self.is_typing() {
            html.push_str(&format!(
                r#"<div id="{}" class="msg bot typing"><div>{}</div></div>"#,
                self.id, self.body
            ));
        } else {
            html.push_str(&format!(
                r#"<div class="msg {}"><div>{}</div>"#,
                self.sender().css_class(),
                self.body
            ));
            if let Some(meta) = &self.meta {
                html.push_str(&format!(r#"<div class="meta">{}</div>"#, escape_html(meta)));
            }
            html.push_str("</div>");
        }
        html
    }
}

fn unescape_minimal(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_keeps_raw_text() {
        let msg = Message::new(Sender::User, "<b>hi</b>");
        assert_eq!(msg.text(), "<b>hi</b>");
        assert_eq!(msg.sender(), Sender::User);
    }

    #[test]
    fn test_time_label_format() {
        let msg = Message::new(Sender::Bot, "x");
        let label = msg.time_label();
        assert_eq!(label.len(), 8);
        assert_eq!(label.chars().filter(|c| *c == ':').count(), 2);
    }

    #[test]
    fn test_message_bubble_escapes_body() {
        let bubble = Bubble::message(
            BubbleId(1),
            Message::new(Sender::User, "<script>alert(1)</script>"),
            "You",
        );
        assert_eq!(bubble.body(), "&lt;script&gt;alert(1)&lt;/script&gt;");
        assert_eq!(bubble.raw_text(), "<script>alert(1)</script>");
        assert!(bubble.meta().unwrap().starts_with("You • "));
    }

    #[test]
    fn test_typing_bubble() {
        let bubble = Bubble::typing(BubbleId(7), "RuleCraft");
        assert!(bubble.is_typing());
        assert_eq!(bubble.sender(), Sender::Bot);
        assert_eq!(bubble.body(), "RuleCraft is typing...");
        assert!(bubble.meta().is_none());
        assert!(bubble.to_html().contains(r#"id="bubble-7""#));
    }

    #[test]
    fn test_typing_bubble_raw_text_round_trips_name() {
        let bubble = Bubble::typing(BubbleId(1), "R&D <bot>");
        assert_eq!(bubble.body(), "R&amp;D &lt;bot&gt; is typing...");
        assert_eq!(bubble.raw_text(), "R&D <bot> is typing...");
    }

    #[test]
    fn test_bubble_html_classes() {
        let user = Bubble::message(BubbleId(1), Message::new(Sender::User, "hi"), "You");
        let bot = Bubble::message(BubbleId(2), Message::new(Sender::Bot, "hey"), "RuleCraft");
        assert!(user.to_html().starts_with(r#"<div class="msg user"><div>hi</div>"#));
        assert!(bot.to_html().starts_with(r#"<div class="msg bot"><div>hey</div>"#));
        assert!(bot.to_html().contains(r#"<div class="meta">RuleCraft • "#));
    }

    #[test]
    fn test_bubble_id_display() {
        assert_eq!(BubbleId(42).to_string(), "bubble-42");
        assert!(BubbleId(1) < BubbleId(2));
    }
}
