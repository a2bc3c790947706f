// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! RuleCraft - terminal chat client for the RuleCraft rule-based assistant.
//!
//! This crate exposes the pieces used by the `rulecraft` CLI (`src/main.rs`):
//! - `chat`: the chat controller, message log, input field and send state
//! - `client`: the `/chat` wire protocol and its HTTP transport
//! - `config`: settings stored in `~/.rulecraft/settings.json`
//! - `tui`: the ratatui front end that drives the controller
//! - `cli`: command-line arguments

pub mod chat;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod tui;

pub use error::{Result, RuleCraftError};
