// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Client side of the RuleCraft chat endpoint
//!
//! - `protocol`: request/response bodies
//! - `transport`: the `ChatTransport` seam used by the controller
//! - `http`: reqwest implementation
//! - `mock_transport`: scripted transport for tests

pub mod http;
pub mod mock_transport;
pub mod protocol;
pub mod transport;

pub use http::HttpTransport;
pub use mock_transport::MockTransport;
pub use protocol::{ChatReply, ChatRequest};
pub use transport::ChatTransport;
