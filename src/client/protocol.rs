// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! JSON bodies exchanged with `POST /chat`

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body: `{"message": "<trimmed user text>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body: `{"reply": "<string>"}`.
///
/// Decoding is lenient: any JSON body except `null` is accepted. A body that
/// is not an object, or a `reply` that is absent or falsy (`null`, `false`,
/// `0`, `""`), decodes to no reply. Other scalars are shown as text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct ChatReply {
    pub reply: Option<String>,
}

impl TryFrom<Value> for ChatReply {
    type Error = String;

    fn try_from(body: Value) -> Result<Self, Self::Error> {
        let reply = match body {
            Value::Null => return Err("response body is null".to_string()),
            Value::Object(mut fields) => fields.remove("reply"),
            _ => None,
        };
        Ok(Self {
            reply: reply.and_then(reply_text),
        })
    }
}

fn reply_text(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) => (n.as_f64() != Some(0.0)).then(|| n.to_string()),
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

impl ChatReply {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
        }
    }

    /// An empty body, `{}`
    pub fn empty() -> Self {
        Self { reply: None }
    }

    /// The reply text, unless it is missing or blank.
    pub fn text(&self) -> Option<&str> {
        self.reply.as_deref().filter(|r| !r.trim().is_empty())
    }

    /// The reply text, or `fallback` when it is missing or blank.
    pub fn text_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.text().unwrap_or(fallback)
    }
}
