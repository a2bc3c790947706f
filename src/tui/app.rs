// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Chat TUI application state and event loop

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, KeyEvent, KeyEventKind};

use super::events::{create_event_channel, ChatEvent, EventEmitter, EventReceiver};
use super::keymap::{action_for, KeyAction};
use crate::chat::{ChatController, Resolution, SendTicket, SubmitOutcome};
use crate::client::ChatTransport;
use crate::error::Result;

/// Result of one tick of the event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    Continue,
    Quit,
}

/// Front end around one [`ChatController`]
pub struct ChatApp {
    pub controller: ChatController,
    transport: Arc<dyn ChatTransport>,
    emitter: EventEmitter,
    event_rx: EventReceiver,
    /// Transient note shown in the status bar
    pub status_message: Option<String>,
    /// Width of the message area at the last draw
    pub message_area_width: u16,
    should_quit: bool,
}

impl ChatApp {
    pub fn new(controller: ChatController, transport: Arc<dyn ChatTransport>) -> Self {
        let (event_tx, event_rx) = create_event_channel();
        Self {
            controller,
            transport,
            emitter: EventEmitter::new(event_tx),
            event_rx,
            status_message: None,
            message_area_width: 80,
            should_quit: false,
        }
    }

    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Process one tick of the event loop
    pub async fn tick(&mut self) -> Result<TickResult> {
        if self.should_quit {
            return Ok(TickResult::Quit);
        }

        tokio::select! {
            Some(event) = self.event_rx.recv() => {
                self.handle_event(event);
            }
            _ = tokio::time::sleep(Duration::from_millis(50)) => {}
        }

        // Drain terminal input without blocking
        while crossterm::event::poll(Duration::from_millis(0))? {
            match crossterm::event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                Event::Paste(text) => self.handle_paste(&text),
                _ => {}
            }
        }

        Ok(if self.should_quit {
            TickResult::Quit
        } else {
            TickResult::Continue
        })
    }

    /// Wait for the next background event and apply it.
    pub async fn next_event(&mut self) -> Option<ChatEvent> {
        let event = self.event_rx.recv().await?;
        self.handle_event(event.clone());
        Some(event)
    }

    /// Apply an event from a background task
    pub fn handle_event(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::ReplyArrived { seq, result } => {
                match self.controller.resolve(seq, result) {
                    Resolution::Deliver { seq, delay } => self.schedule_delivery(seq, delay),
                    Resolution::Failed => {
                        self.status_message = self
                            .controller
                            .last_error()
                            .map(|e| e.to_string());
                        self.start_next_queued();
                    }
                    Resolution::Stale => {}
                }
            }
            ChatEvent::DeliveryDue { seq } => {
                if self.controller.deliver(seq) {
                    self.status_message = None;
                }
                self.start_next_queued();
            }
        }
    }

    /// Apply a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = action_for(key);
        match action {
            KeyAction::Submit => return self.submit(),
            KeyAction::ToggleTheme => {
                self.controller.toggle_theme();
                return;
            }
            KeyAction::Quit => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        let width = self.message_area_width;
        let ui = self.controller.ui_mut();
        let total = ui.log.total_height(width);
        let page = ui.log.scroll().page();

        match action {
            KeyAction::Insert(c) => ui.input.insert_char(c),
            KeyAction::Backspace => ui.input.backspace(),
            KeyAction::Delete => ui.input.delete(),
            KeyAction::DeleteWord => ui.input.delete_word(),
            KeyAction::ClearInput => ui.input.clear(),
            KeyAction::Left => ui.input.move_left(),
            KeyAction::Right => ui.input.move_right(),
            KeyAction::Home => ui.input.move_home(),
            KeyAction::End => ui.input.move_end(),
            KeyAction::HistoryPrev => ui.input.history_prev(),
            KeyAction::HistoryNext => ui.input.history_next(),
            KeyAction::PageUp => ui.log.scroll_mut().scroll_up(page, total),
            KeyAction::PageDown => ui.log.scroll_mut().scroll_down(page, total),
            KeyAction::LineUp => ui.log.scroll_mut().scroll_up(1, total),
            KeyAction::LineDown => ui.log.scroll_mut().scroll_down(1, total),
            KeyAction::Submit | KeyAction::ToggleTheme | KeyAction::Quit | KeyAction::None => {}
        }
    }

    /// Insert pasted text at the cursor. Line breaks become spaces since the
    /// input is a single line.
    pub fn handle_paste(&mut self, text: &str) {
        let flattened = text.replace("\r\n", " ").replace(['\r', '\n'], " ");
        self.controller.ui_mut().input.insert_str(&flattened);
    }

    /// Submit the input field
    pub fn submit(&mut self) {
        match self.controller.submit() {
            SubmitOutcome::Started(ticket) => self.dispatch(ticket),
            SubmitOutcome::Queued { position } => {
                self.status_message = Some(format!("Queued ({} waiting)", position));
            }
            SubmitOutcome::Rejected => {
                self.status_message = Some("Still waiting for the last reply".to_string());
            }
            SubmitOutcome::Ignored => {}
        }
    }

    fn start_next_queued(&mut self) {
        if let Some(ticket) = self.controller.start_next_queued() {
            self.dispatch(ticket);
        }
    }

    /// Perform the request on its own task.
    fn dispatch(&self, ticket: SendTicket) {
        let transport = Arc::clone(&self.transport);
        let emitter = self.emitter.clone();
        tokio::spawn(async move {
            let result = transport.send(ticket.message()).await;
            emitter.reply_arrived(ticket.seq(), result);
        });
    }

    fn schedule_delivery(&self, seq: u64, delay: Duration) {
        if delay.is_zero() {
            self.emitter.delivery_due(seq);
            return;
        }
        let emitter = self.emitter.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            emitter.delivery_due(seq);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ReplyDelay, SendState, ThemeState};
    use crate::client::MockTransport;
    use crate::config::ChatConfig;
    use crate::error::SendError;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn app(mock: MockTransport) -> ChatApp {
        let config = ChatConfig {
            welcome_message: None,
            ..ChatConfig::default()
        };
        let controller =
            ChatController::new(&config, ThemeState::Dark).with_reply_delay(ReplyDelay::none());
        ChatApp::new(controller, Arc::new(mock))
    }

    fn type_text(app: &mut ChatApp, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    fn press(app: &mut ChatApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn bodies(app: &ChatApp) -> Vec<String> {
        app.controller
            .ui()
            .log
            .bubbles()
            .iter()
            .map(|b| b.body().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_typed_message_round_trip() {
        let mock = MockTransport::new().with_reply("Hi there");
        let mut app = app(mock.clone());

        type_text(&mut app, "hello");
        press(&mut app, KeyCode::Enter);

        // Rendered synchronously, before any I/O completes
        assert_eq!(app.controller.ui().log.len(), 2);
        assert_eq!(app.controller.ui().log.typing_count(), 1);

        app.next_event().await; // reply arrived
        app.next_event().await; // delivery due
        assert_eq!(bodies(&app), vec!["hello", "Hi there"]);
        assert_eq!(mock.sent_messages(), vec!["hello"]);
    }

    #[tokio::test]
    async fn test_failure_sets_status() {
        let mock = MockTransport::new().with_error(SendError::Timeout);
        let mut app = app(mock);

        type_text(&mut app, "hello");
        press(&mut app, KeyCode::Enter);
        app.next_event().await;

        assert_eq!(
            app.controller.ui().log.last().unwrap().body(),
            "Error contacting server. Try again later."
        );
        assert_eq!(app.status_message.as_deref(), Some("Request timed out"));
    }

    #[tokio::test]
    async fn test_queued_message_sent_after_first() {
        let mock = MockTransport::new().with_reply("one").with_reply("two");
        let mut app = app(mock.clone());

        type_text(&mut app, "first");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "second");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.status_message.as_deref(), Some("Queued (1 waiting)"));

        while app.controller.send_state().is_pending()
            || app.controller.ui().queued_count() > 0
        {
            app.next_event().await;
        }

        assert_eq!(bodies(&app), vec!["first", "one", "second", "two"]);
        assert_eq!(mock.sent_messages(), vec!["first", "second"]);
        assert!(matches!(
            app.controller.send_state(),
            SendState::Done { seq: 2, .. }
        ));
    }

    #[test]
    fn test_theme_toggle_key_makes_no_request() {
        let mock = MockTransport::new();
        let mut app = app(mock.clone());
        app.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL));
        assert_eq!(app.controller.theme(), ThemeState::Light);
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn test_enter_on_empty_input_does_nothing() {
        let mut app = app(MockTransport::new());
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert!(app.controller.ui().log.is_empty());
        assert_eq!(app.controller.ui().input.text(), "   ");
    }

    #[test]
    fn test_paste_inserts_at_cursor_without_sending() {
        let mock = MockTransport::new();
        let mut app = app(mock.clone());
        type_text(&mut app, "ask: ");
        app.handle_paste("weather\r\nin Delhi\n");

        assert_eq!(app.controller.ui().input.text(), "ask: weather in Delhi ");
        assert!(app.controller.ui().log.is_empty());
        assert_eq!(mock.call_count(), 0);

        press(&mut app, KeyCode::Home);
        app.handle_paste("Q ");
        assert_eq!(app.controller.ui().input.text(), "Q ask: weather in Delhi ");
    }

    #[test]
    fn test_escape_quits() {
        let mut app = app(MockTransport::new());
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit());
    }
}
