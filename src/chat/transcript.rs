// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! HTML transcript of a session

use std::path::Path;

use super::escape::escape_html;
use super::log::MessageLog;
use super::theme::ThemeState;
use crate::error::Result;

const STYLE: &str = "body{font-family:sans-serif;max-width:720px;margin:2em auto;background:#111;color:#eee}\
html.light body{background:#fafafa;color:#222}\
.msg{margin:.5em 0;padding:.6em .9em;border-radius:10px;white-space:pre-wrap}\
.msg.user{background:#2b5dab;margin-left:20%}\
.msg.bot{background:#333;margin-right:20%}\
html.light .msg.bot{background:#e6e6e6}\
.meta{font-size:.75em;opacity:.7;margin-top:.3em}";

impl MessageLog {
    /// Render the log as a standalone HTML document. Bubble bodies are the
    /// escaped text stored at insertion.
    pub fn to_html(&self, theme: ThemeState) -> String {
        let class = if theme.is_light() { r#" class="light""# } else { "" };
        let mut html = format!(
            "<!DOCTYPE html>\n<html{}>\n<head>\n<meta charset=\"utf-8\">\n<title>{} transcript</title>\n<style>{}</style>\n</head>\n<body>\n<div id=\"messages\">\n",
            class,
            escape_html(self.bot_name()),
            STYLE
        );
        for bubble in self.bubbles() {
            html.push_str(&bubble.to_html());
            html.push('\n');
        }
        html.push_str("</div>\n</body>\n</html>\n");
        html
    }

    /// Write the HTML transcript to `path`.
    pub fn write_transcript(&self, path: &Path, theme: ThemeState) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_html(theme))?;
        tracing::info!(path = %path.display(), bubbles = self.len(), "transcript written");
        Ok(())
    }
}
