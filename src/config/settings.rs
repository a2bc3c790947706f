// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings management for RuleCraft
//!
//! Handles loading and saving settings from ~/.rulecraft/settings.json

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::chat::{PendingPolicy, ReplyDelay, ThemeState};

mod io;
mod validation;

/// Main settings structure, stored in ~/.rulecraft/settings.json
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Settings {
    /// Chat endpoint settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Conversation behaviour and wording
    #[serde(default)]
    pub chat: ChatConfig,

    /// Appearance settings
    #[serde(default)]
    pub appearance: AppearanceConfig,
}

/// Where the RuleCraft server lives
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Base URL of the server, without the chat path
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the chat endpoint
    #[serde(default = "default_chat_path")]
    pub chat_path: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            chat_path: default_chat_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServerConfig {
    /// Full URL of the chat endpoint.
    pub fn chat_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.chat_path.starts_with('/') {
            format!("{}{}", base, self.chat_path)
        } else {
            format!("{}/{}", base, self.chat_path)
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Conversation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatConfig {
    /// Name shown on bot bubbles and the typing indicator
    #[serde(default = "default_bot_name")]
    pub bot_name: String,

    /// Name shown on user bubbles
    #[serde(default = "default_user_label")]
    pub user_label: String,

    /// Bot bubble rendered when a session starts (None or empty = no greeting)
    #[serde(default = "default_welcome_message")]
    pub welcome_message: Option<String>,

    /// Text shown when the server reply is missing or blank
    #[serde(default = "default_fallback_reply")]
    pub fallback_reply: String,

    /// Text shown when a send fails
    #[serde(default = "default_error_reply")]
    pub error_reply: String,

    /// Lower bound of the cosmetic delay before a reply is shown (inclusive)
    #[serde(default = "default_reply_delay_min_ms")]
    pub reply_delay_min_ms: u64,

    /// Upper bound of the cosmetic delay before a reply is shown (exclusive)
    #[serde(default = "default_reply_delay_max_ms")]
    pub reply_delay_max_ms: u64,

    /// What to do with a submission while another send is in flight
    #[serde(default)]
    pub pending_policy: PendingPolicy,

    /// Maximum number of input history entries
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            bot_name: default_bot_name(),
            user_label: default_user_label(),
            welcome_message: default_welcome_message(),
            fallback_reply: default_fallback_reply(),
            error_reply: default_error_reply(),
            reply_delay_min_ms: default_reply_delay_min_ms(),
            reply_delay_max_ms: default_reply_delay_max_ms(),
            pending_policy: PendingPolicy::default(),
            history_size: default_history_size(),
        }
    }
}

impl ChatConfig {
    pub fn reply_delay(&self) -> ReplyDelay {
        ReplyDelay::new(
            Duration::from_millis(self.reply_delay_min_ms),
            Duration::from_millis(self.reply_delay_max_ms),
        )
    }
}

/// Appearance settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppearanceConfig {
    /// Theme used when a session starts. Toggling during a session is not saved.
    #[serde(default)]
    pub theme: ThemeState,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_chat_path() -> String {
    "/chat".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_bot_name() -> String {
    "RuleCraft".to_string()
}

fn default_user_label() -> String {
    "You".to_string()
}

fn default_welcome_message() -> Option<String> {
    Some(
        "Hello! I'm RuleCraft — a rule-based assistant. Try: 'weather in Delhi', \
         'tell me a joke', 'what is AI'."
            .to_string(),
    )
}

fn default_fallback_reply() -> String {
    "No response.".to_string()
}

fn default_error_reply() -> String {
    "Error contacting server. Try again later.".to_string()
}

fn default_reply_delay_min_ms() -> u64 {
    350
}

fn default_reply_delay_max_ms() -> u64 {
    600
}

fn default_history_size() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.base_url, "http://127.0.0.1:5000");
        assert_eq!(settings.server.chat_path, "/chat");
        assert_eq!(settings.server.timeout_secs, 30);
        assert_eq!(settings.chat.bot_name, "RuleCraft");
        assert_eq!(settings.chat.fallback_reply, "No response.");
        assert_eq!(
            settings.chat.error_reply,
            "Error contacting server. Try again later."
        );
        assert_eq!(settings.chat.pending_policy, PendingPolicy::Queue);
        assert_eq!(settings.appearance.theme, ThemeState::Dark);
    }

    #[test]
    fn test_chat_url_joins_slashes() {
        let mut server = ServerConfig::default();
        assert_eq!(server.chat_url(), "http://127.0.0.1:5000/chat");

        server.base_url = "http://example.com/".to_string();
        assert_eq!(server.chat_url(), "http://example.com/chat");

        server.chat_path = "api/chat".to_string();
        assert_eq!(server.chat_url(), "http://example.com/api/chat");
    }

    #[test]
    fn test_reply_delay_from_config() {
        let chat = ChatConfig::default();
        let delay = chat.reply_delay();
        assert_eq!(delay.min(), Duration::from_millis(350));
        assert_eq!(delay.max(), Duration::from_millis(600));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{ "server": { "base_url": "http://bot.local:8080" } }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.server.base_url, "http://bot.local:8080");
        assert_eq!(settings.server.chat_path, "/chat");
        assert_eq!(settings.chat, ChatConfig::default());
    }

    #[test]
    fn test_pending_policy_and_theme_deserialize() {
        let json = r#"{
            "chat": { "pending_policy": "reject" },
            "appearance": { "theme": "light" }
        }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.chat.pending_policy, PendingPolicy::Reject);
        assert_eq!(settings.appearance.theme, ThemeState::Light);
    }

    #[test]
    fn test_welcome_message_can_be_disabled() {
        let json = r#"{ "chat": { "welcome_message": null } }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert!(settings.chat.welcome_message.is_none());
    }
}
