// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Lifecycle of a single send
//!
//! Only one send is in flight at a time. Submissions made while a send is
//! pending are queued or rejected according to [`PendingPolicy`].

use serde::{Deserialize, Serialize};

use super::message::BubbleId;

/// What to do with a submission while another send is pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PendingPolicy {
    /// Clear the input and send the text once the current send finishes
    #[default]
    Queue,
    /// Leave the input untouched and do nothing
    Reject,
}

/// Handle for one in-flight send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendTicket {
    seq: u64,
    message: String,
    typing: BubbleId,
}

impl SendTicket {
    pub(crate) fn new(seq: u64, message: String, typing: BubbleId) -> Self {
        Self {
            seq,
            message,
            typing,
        }
    }

    /// Sequence number of the send within the session
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Trimmed text to send
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Typing indicator shown for this send
    pub fn typing_id(&self) -> BubbleId {
        self.typing
    }
}

/// Where a pending send is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendPhase {
    /// Request is on the wire; typing indicator is shown
    AwaitingReply,
    /// Reply arrived and the indicator is gone; waiting out the cosmetic delay
    Delivering { reply: String },
}

/// How a finished send ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Replied,
    Failed,
}

/// Send state of the controller
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SendState {
    /// Nothing sent yet
    #[default]
    Idle,
    Pending {
        ticket: SendTicket,
        phase: SendPhase,
    },
    /// Last send finished; a new one may start
    Done { seq: u64, outcome: SendOutcome },
}

impl SendState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SendState::Pending { .. })
    }

    /// Sequence number of the pending send, if any
    pub fn pending_seq(&self) -> Option<u64> {
        match self {
            SendState::Pending { ticket, .. } => Some(ticket.seq()),
            _ => None,
        }
    }

    /// Short label for the status bar
    pub fn label(&self) -> &'static str {
        match self {
            SendState::Idle => "idle",
            SendState::Pending {
                phase: SendPhase::AwaitingReply,
                ..
            } => "waiting",
            SendState::Pending {
                phase: SendPhase::Delivering { .. },
                ..
            } => "replying",
            SendState::Done {
                outcome: SendOutcome::Replied,
                ..
            } => "ready",
            SendState::Done {
                outcome: SendOutcome::Failed,
                ..
            } => "failed",
        }
    }
}
