// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Mock transport for testing
//!
//! Returns scripted replies in order and records every message it was asked
//! to send, without touching the network.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::protocol::ChatReply;
use super::transport::ChatTransport;
use crate::error::SendError;

type Scripted = Result<ChatReply, SendError>;

/// A scripted chat transport
#[derive(Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    sent: Arc<Mutex<Vec<String>>>,
    call_count: Arc<AtomicUsize>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply with the given text
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.push(Ok(ChatReply::new(text)))
    }

    /// Queue an arbitrary reply body
    pub fn with_body(self, reply: ChatReply) -> Self {
        self.push(Ok(reply))
    }

    /// Queue a failure
    pub fn with_error(self, error: SendError) -> Self {
        self.push(Err(error))
    }

    fn push(self, entry: Scripted) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(entry);
        }
        self
    }

    /// Messages sent so far, in order
    pub fn sent_messages(&self) -> Vec<String> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn send(&self, message: &str) -> Result<ChatReply, SendError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(message.to_string());
        }

        let next = self.script.lock().ok().and_then(|mut s| s.pop_front());
        // An exhausted script behaves like a server that answers `{}`.
        next.unwrap_or_else(|| Ok(ChatReply::empty()))
    }

    fn endpoint(&self) -> &str {
        "mock://chat"
    }
}
