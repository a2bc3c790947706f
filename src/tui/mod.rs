// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Terminal chat interface
//!
//! Renders the message log with ratatui and reads keys through crossterm.
//! Requests run on background tasks and report back over an event channel,
//! so the screen keeps redrawing while a reply is outstanding.

pub mod app;
pub mod events;
pub mod keymap;
pub mod ui;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::chat::ChatController;
use crate::client::ChatTransport;
use crate::error::{Result, RuleCraftError};

pub use app::{ChatApp, TickResult};
pub use events::{ChatEvent, EventEmitter};
pub use keymap::{action_for, KeyAction};

fn tui_err(e: impl std::fmt::Display) -> RuleCraftError {
    RuleCraftError::Tui(e.to_string())
}

/// Run the interactive chat until the user quits.
///
/// When `transcript` is set, the log is written there as HTML on exit.
pub async fn run_chat_tui(
    controller: ChatController,
    transport: Arc<dyn ChatTransport>,
    transcript: Option<PathBuf>,
) -> Result<()> {
    // Restore the terminal if anything panics while it is in raw mode
    let original_panic_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_panic_hook(panic_info);
    }));

    enable_raw_mode().map_err(tui_err)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste).map_err(tui_err)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(tui_err)?;

    tracing::info!(
        session = %controller.session_id(),
        endpoint = transport.endpoint(),
        "chat session started"
    );
    let mut app = ChatApp::new(controller, transport);
    let result = run_app(&mut terminal, &mut app).await;

    let _ = std::panic::take_hook();
    disable_raw_mode().map_err(tui_err)?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )
    .map_err(tui_err)?;
    terminal.show_cursor().map_err(tui_err)?;

    if let Some(path) = transcript {
        let ui = app.controller.ui();
        ui.log.write_transcript(&path, ui.theme())?;
        eprintln!("Transcript saved to {}", path.display());
    }

    result
}

/// Main application loop
async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut ChatApp) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app)).map_err(tui_err)?;

        match app.tick().await? {
            TickResult::Continue => {}
            TickResult::Quit => return Ok(()),
        }
    }
}
