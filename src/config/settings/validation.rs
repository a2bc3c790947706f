// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use crate::error::{Result, RuleCraftError};

use super::Settings;

impl Settings {
    /// Check values that serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.server.chat_url()).map_err(|e| {
            RuleCraftError::Config(format!(
                "server.base_url '{}' is not a valid URL: {}",
                self.server.base_url, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(RuleCraftError::Config(format!(
                "server.base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.server.timeout_secs == 0 {
            return Err(RuleCraftError::Config(
                "server.timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.chat.reply_delay_min_ms > self.chat.reply_delay_max_ms {
            return Err(RuleCraftError::Config(format!(
                "chat.reply_delay_min_ms ({}) exceeds chat.reply_delay_max_ms ({})",
                self.chat.reply_delay_min_ms, self.chat.reply_delay_max_ms
            )));
        }

        Ok(())
    }

    /// Apply a `--server` override from the command line.
    pub fn with_server_override(mut self, base_url: Option<&str>) -> Result<Self> {
        if let Some(url) = base_url {
            self.server.base_url = url.to_string();
            self.validate()?;
        }
        Ok(self)
    }
}
