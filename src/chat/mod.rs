// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Chat client controller and the state it owns
//!
//! This module mediates between user input, the remote chat endpoint, and the
//! rendered message log. It is front-end agnostic: the TUI and the one-shot
//! `ask` command both drive the same [`ChatController`].

pub mod controller;
pub mod delay;
pub mod escape;
pub mod input;
pub mod log;
pub mod message;
pub mod send_state;
pub mod theme;
pub mod transcript;

pub use controller::{ChatController, Resolution, SubmitOutcome, UiState};
pub use delay::ReplyDelay;
pub use escape::{escape_html, sanitize_for_terminal};
pub use input::InputState;
pub use log::{MessageLog, ScrollState};
pub use message::{Bubble, BubbleId, BubbleKind, Message, Sender};
pub use send_state::{PendingPolicy, SendOutcome, SendPhase, SendState, SendTicket};
pub use theme::ThemeState;
