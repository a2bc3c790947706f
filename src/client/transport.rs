// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Transport abstraction for the chat endpoint

use async_trait::async_trait;

use super::protocol::ChatReply;
use crate::error::SendError;

/// Sends one user message and returns the server's reply.
///
/// Implementations must not retry: a failure is final for that send.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, message: &str) -> Result<ChatReply, SendError>;

    /// Where messages go, for logs and the status bar
    fn endpoint(&self) -> &str;
}
