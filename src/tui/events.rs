// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Event system for the chat TUI
//!
//! Requests and reply delays run on their own tasks and report back through
//! a tokio mpsc channel, so the UI loop never blocks on the network.

use tokio::sync::mpsc;

use crate::client::ChatReply;
use crate::error::SendError;

/// Events sent from background tasks to the UI loop
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    /// The request for send `seq` finished
    ReplyArrived {
        seq: u64,
        result: Result<ChatReply, SendError>,
    },
    /// The cosmetic delay for send `seq` elapsed
    DeliveryDue { seq: u64 },
}

/// Type alias for the event sender
pub type EventSender = mpsc::UnboundedSender<ChatEvent>;

/// Type alias for the event receiver
pub type EventReceiver = mpsc::UnboundedReceiver<ChatEvent>;

/// Create a new event channel
pub fn create_event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Wrapper that can be cloned and passed to async tasks
#[derive(Clone)]
pub struct EventEmitter {
    tx: EventSender,
}

impl EventEmitter {
    pub fn new(tx: EventSender) -> Self {
        Self { tx }
    }

    /// Send an event, ignoring errors if the receiver is dropped
    pub fn emit(&self, event: ChatEvent) {
        let _ = self.tx.send(event);
    }

    pub fn reply_arrived(&self, seq: u64, result: Result<ChatReply, SendError>) {
        self.emit(ChatEvent::ReplyArrived { seq, result });
    }

    pub fn delivery_due(&self, seq: u64) {
        self.emit(ChatEvent::DeliveryDue { seq });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emitter_delivers_in_order() {
        let (tx, mut rx) = create_event_channel();
        let emitter = EventEmitter::new(tx);

        emitter.reply_arrived(1, Ok(ChatReply::new("hi")));
        emitter.delivery_due(1);

        assert_eq!(
            rx.recv().await,
            Some(ChatEvent::ReplyArrived {
                seq: 1,
                result: Ok(ChatReply::new("hi"))
            })
        );
        assert_eq!(rx.recv().await, Some(ChatEvent::DeliveryDue { seq: 1 }));
    }

    #[test]
    fn test_emit_after_receiver_dropped_is_silent() {
        let (tx, rx) = create_event_channel();
        drop(rx);
        EventEmitter::new(tx).delivery_due(3);
    }
}
