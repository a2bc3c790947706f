// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Chat client controller
//!
//! Mediates between the input field, the chat endpoint, and the message log.
//! A send moves through these steps:
//!
//! 1. [`ChatController::submit`] renders the user bubble, clears the input and
//!    shows a typing indicator, returning a [`SendTicket`].
//! 2. The caller performs the request (on its own task, so the event loop stays
//!    free) and hands the result to [`ChatController::resolve`], which removes
//!    the indicator. A failure is rendered immediately; a reply comes back as
//!    [`Resolution::Deliver`] with the cosmetic delay to wait out.
//! 3. After the delay, [`ChatController::deliver`] renders the bot bubble.
//!
//! [`ChatController::send`] runs all three steps in order for headless use.

use std::collections::VecDeque;
use std::time::Duration;

use uuid::Uuid;

use super::delay::ReplyDelay;
use super::input::InputState;
use super::log::MessageLog;
use super::send_state::{PendingPolicy, SendOutcome, SendPhase, SendState, SendTicket};
use super::theme::ThemeState;
use crate::client::{ChatReply, ChatTransport};
use crate::config::{ChatConfig, Settings};
use crate::error::SendError;

/// Everything the front end draws. Created when a session starts and dropped
/// when it ends; nothing here is persisted.
#[derive(Debug, Clone)]
pub struct UiState {
    pub log: MessageLog,
    pub input: InputState,
    theme: ThemeState,
    send: SendState,
    queue: VecDeque<String>,
}

impl UiState {
    pub fn theme(&self) -> ThemeState {
        self.theme
    }

    pub fn send_state(&self) -> &SendState {
        &self.send
    }

    /// Messages waiting for the in-flight send to finish
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }
}

/// Result of a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was empty after trimming; nothing happened
    Ignored,
    /// A send started; the caller must perform the request for this ticket
    Started(SendTicket),
    /// Another send is pending; the text will be sent after it (1-based position)
    Queued { position: usize },
    /// Another send is pending and the policy refuses overlapping sends
    Rejected,
}

/// What to do after a response arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Wait `delay`, then call `deliver(seq)`
    Deliver { seq: u64, delay: Duration },
    /// The error bubble is already rendered; the send is finished
    Failed,
    /// The response did not belong to the pending send and was ignored
    Stale,
}

/// Trim whitespace and byte-order marks from both ends.
fn trim_input(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Controller for one chat session
#[derive(Debug, Clone)]
pub struct ChatController {
    session_id: Uuid,
    ui: UiState,
    policy: PendingPolicy,
    delay: ReplyDelay,
    fallback_reply: String,
    error_reply: String,
    next_seq: u64,
    last_error: Option<SendError>,
}

impl ChatController {
    /// Start a session, rendering the welcome message if one is configured.
    pub fn new(config: &ChatConfig, theme: ThemeState) -> Self {
        let mut ui = UiState {
            log: MessageLog::new(&config.user_label, &config.bot_name),
            input: InputState::with_history_size(config.history_size),
            theme,
            send: SendState::Idle,
            queue: VecDeque::new(),
        };

        if let Some(welcome) = config
            .welcome_message
            .as_deref()
            .filter(|w| !w.trim().is_empty())
        {
            ui.log.append_bot(welcome);
        }

        let session_id = Uuid::new_v4();
        tracing::debug!(%session_id, policy = ?config.pending_policy, "chat session started");

        Self {
            session_id,
            ui,
            policy: config.pending_policy,
            delay: config.reply_delay(),
            fallback_reply: config.fallback_reply.clone(),
            error_reply: config.error_reply.clone(),
            next_seq: 0,
            last_error: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.chat, settings.appearance.theme)
    }

    /// Replace the cosmetic reply delay.
    pub fn with_reply_delay(mut self, delay: ReplyDelay) -> Self {
        self.delay = delay;
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UiState {
        &mut self.ui
    }

    pub fn send_state(&self) -> &SendState {
        &self.ui.send
    }

    pub fn theme(&self) -> ThemeState {
        self.ui.theme
    }

    /// Most recent send failure, kept for diagnostics
    pub fn last_error(&self) -> Option<&SendError> {
        self.last_error.as_ref()
    }

    /// Submit whatever is in the input field.
    pub fn submit(&mut self) -> SubmitOutcome {
        let text = trim_input(self.ui.input.text()).to_string();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }

        if self.ui.send.is_pending() {
            return match self.policy {
                PendingPolicy::Reject => {
                    tracing::debug!(session_id = %self.session_id, "send pending, submission rejected");
                    SubmitOutcome::Rejected
                }
                PendingPolicy::Queue => {
                    self.ui.input.submit(&text);
                    self.ui.queue.push_back(text);
                    let position = self.ui.queue.len();
                    tracing::debug!(session_id = %self.session_id, position, "send pending, submission queued");
                    SubmitOutcome::Queued { position }
                }
            };
        }

        SubmitOutcome::Started(self.begin(text, true))
    }

    /// Put `raw` in the input field and submit it.
    pub fn submit_text(&mut self, raw: &str) -> SubmitOutcome {
        self.ui.input.set_buffer(raw);
        self.submit()
    }

    fn begin(&mut self, text: String, from_input: bool) -> SendTicket {
        self.ui.log.append_user(text.clone());
        if from_input {
            self.ui.input.submit(&text);
        }
        let typing = self.ui.log.append_typing();

        self.next_seq += 1;
        let ticket = SendTicket::new(self.next_seq, text, typing);
        tracing::debug!(session_id = %self.session_id, seq = ticket.seq(), typing = %typing, "send started");

        self.ui.send = SendState::Pending {
            ticket: ticket.clone(),
            phase: SendPhase::AwaitingReply,
        };
        ticket
    }

    /// Apply the outcome of the request for send `seq`.
    ///
    /// Removes the typing indicator exactly once. Failures render the error
    /// bubble at once, without the cosmetic delay.
    pub fn resolve(&mut self, seq: u64, result: Result<ChatReply, SendError>) -> Resolution {
        let ticket = match &self.ui.send {
            SendState::Pending {
                ticket,
                phase: SendPhase::AwaitingReply,
            } if ticket.seq() == seq => ticket.clone(),
            _ => {
                tracing::warn!(session_id = %self.session_id, seq, "response for a send that is not awaiting one");
                return Resolution::Stale;
            }
        };

        if !self.ui.log.remove(ticket.typing_id()) {
            tracing::warn!(seq, typing = %ticket.typing_id(), "typing indicator already gone");
        }

        match result {
            Ok(reply) => {
                if reply.text().is_none() {
                    tracing::debug!(seq, "empty reply, using fallback text");
                }
                let text = reply.text_or(&self.fallback_reply).to_string();
                self.ui.send = SendState::Pending {
                    ticket,
                    phase: SendPhase::Delivering { reply: text },
                };
                Resolution::Deliver {
                    seq,
                    delay: self.delay.sample(),
                }
            }
            Err(error) => {
                tracing::error!(session_id = %self.session_id, seq, %error, "chat request failed");
                self.ui.log.append_bot(self.error_reply.clone());
                self.ui.send = SendState::Done {
                    seq,
                    outcome: SendOutcome::Failed,
                };
                self.last_error = Some(error);
                Resolution::Failed
            }
        }
    }

    /// Render the reply of send `seq` once its delay has elapsed.
    pub fn deliver(&mut self, seq: u64) -> bool {
        match std::mem::take(&mut self.ui.send) {
            SendState::Pending {
                ticket,
                phase: SendPhase::Delivering { reply },
            } if ticket.seq() == seq => {
                self.ui.log.append_bot(reply);
                self.ui.send = SendState::Done {
                    seq,
                    outcome: SendOutcome::Replied,
                };
                tracing::debug!(session_id = %self.session_id, seq, "reply delivered");
                true
            }
            other => {
                self.ui.send = other;
                tracing::warn!(session_id = %self.session_id, seq, "deliver for a send that has no reply waiting");
                false
            }
        }
    }

    /// Start the oldest queued message if no send is pending.
    pub fn start_next_queued(&mut self) -> Option<SendTicket> {
        if self.ui.send.is_pending() {
            return None;
        }
        let text = self.ui.queue.pop_front()?;
        Some(self.begin(text, false))
    }

    /// Flip between light and dark. Purely presentational.
    pub fn toggle_theme(&mut self) -> ThemeState {
        self.ui.theme = self.ui.theme.toggled();
        tracing::debug!(theme = self.ui.theme.label(), "theme toggled");
        self.ui.theme
    }

    /// Submit the input field and run the send to completion, including any
    /// messages queued meanwhile.
    pub async fn send(&mut self, transport: &dyn ChatTransport) -> SubmitOutcome {
        let outcome = self.submit();
        if let SubmitOutcome::Started(ticket) = &outcome {
            self.drive(transport, ticket.clone()).await;
        }
        outcome
    }

    /// Perform the request for `ticket`, wait out the delay and render the
    /// result, then continue with the queue.
    pub async fn drive(&mut self, transport: &dyn ChatTransport, ticket: SendTicket) {
        let mut next = Some(ticket);
        while let Some(ticket) = next {
            let result = transport.send(ticket.message()).await;
            if let Resolution::Deliver { seq, delay } = self.resolve(ticket.seq(), result) {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                self.deliver(seq);
            }
            next = self.start_next_queued();
        }
    }
}
