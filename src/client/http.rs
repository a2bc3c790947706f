// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! HTTP transport for `POST /chat`

use async_trait::async_trait;
use reqwest::Client;

use super::protocol::{ChatReply, ChatRequest};
use super::transport::ChatTransport;
use crate::config::ServerConfig;
use crate::error::{Result, SendError};

/// Longest error body kept in a `SendError::Status`
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Talks to a RuleCraft server over HTTP
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    /// Build a transport for the configured endpoint.
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            url: config.chat_url(),
        })
    }

    /// Create with a full endpoint URL and default client
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, message: &str) -> std::result::Result<ChatReply, SendError> {
        tracing::debug!(url = %self.url, chars = message.chars().count(), "POST chat message");

        let response = self
            .client
            .post(&self.url)
            .json(&ChatRequest::new(message))
            .send()
            .await
            .map_err(SendError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            return Err(SendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(SendError::from)?;
        serde_json::from_slice::<ChatReply>(&bytes)
            .map_err(|e| SendError::InvalidResponse(e.to_string()))
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
