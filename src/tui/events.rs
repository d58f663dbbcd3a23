//! TUI Event System
//!
//! Handles user input and application events for the terminal interface.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

/// Events that can occur in the TUI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    /// User pressed a key
    Key(KeyEvent),

    /// Bracketed paste. Files dropped on the terminal arrive this way.
    Paste(String),

    /// Terminal was resized
    Resize(u16, u16),

    /// Tick event for transient UI feedback
    Tick,

    /// Request to quit
    Quit,
}

/// Which screen has input focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Landing hero with the call-to-action
    Landing,
    /// Wizard modal open over the landing view
    Wizard,
    /// File browser opened from the upload step
    FilePicker,
}

/// Event handler for the TUI
pub struct EventHandler {
    tx: mpsc::UnboundedSender<TuiEvent>,
    rx: mpsc::UnboundedReceiver<TuiEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// Get a sender for sending events
    pub fn sender(&self) -> mpsc::UnboundedSender<TuiEvent> {
        self.tx.clone()
    }

    /// Receive the next event (waits until one is available)
    pub async fn next(&mut self) -> Option<TuiEvent> {
        self.rx.recv().await
    }

    /// Try to receive the next event without blocking
    pub fn try_next(&mut self) -> Option<TuiEvent> {
        self.rx.try_recv().ok()
    }

    /// Start listening for terminal events
    ///
    /// Forwards crossterm's async `EventStream` into the channel and emits a
    /// `Tick` every `tick_rate` of inactivity. State is never touched here;
    /// the dispatch loop owns it.
    pub fn start_terminal_listener(tx: mpsc::UnboundedSender<TuiEvent>, tick_rate: Duration) {
        use crossterm::event::{Event, EventStream, KeyEventKind};
        use futures::StreamExt;

        tokio::spawn(async move {
            let mut reader = EventStream::new();

            loop {
                let event = tokio::select! {
                    maybe_event = reader.next() => {
                        match maybe_event {
                            Some(Ok(event)) => Some(event),
                            Some(Err(e)) => {
                                tracing::warn!("Terminal event error: {}", e);
                                None
                            }
                            None => break,
                        }
                    }
                    _ = tokio::time::sleep(tick_rate) => None,
                };

                let forwarded = match event {
                    Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        Some(TuiEvent::Key(key))
                    }
                    Some(Event::Paste(text)) => Some(TuiEvent::Paste(text)),
                    Some(Event::Resize(w, h)) => Some(TuiEvent::Resize(w, h)),
                    Some(_) => None,
                    None => Some(TuiEvent::Tick),
                };

                if let Some(ev) = forwarded
                    && tx.send(ev).is_err()
                {
                    break;
                }
            }
        });
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper function to check if a key event matches
pub fn key_matches(event: &KeyEvent, code: KeyCode, modifiers: KeyModifiers) -> bool {
    event.code == code && event.modifiers == modifiers
}

/// Common key bindings
pub mod keys {
    use super::*;

    /// Ctrl+C - Quit
    pub fn is_quit(event: &KeyEvent) -> bool {
        key_matches(event, KeyCode::Char('c'), KeyModifiers::CONTROL)
    }

    /// Ctrl+S - Submit the details step
    pub fn is_submit(event: &KeyEvent) -> bool {
        key_matches(event, KeyCode::Char('s'), KeyModifiers::CONTROL)
    }

    /// Escape - Cancel/Back
    pub fn is_cancel(event: &KeyEvent) -> bool {
        event.code == KeyCode::Esc
    }

    /// Enter - Select/Confirm
    pub fn is_enter(event: &KeyEvent) -> bool {
        event.code == KeyCode::Enter && event.modifiers.is_empty()
    }

    /// Up arrow
    pub fn is_up(event: &KeyEvent) -> bool {
        event.code == KeyCode::Up && event.modifiers.is_empty()
    }

    /// Down arrow
    pub fn is_down(event: &KeyEvent) -> bool {
        event.code == KeyCode::Down && event.modifiers.is_empty()
    }

    /// Tab - Next field
    pub fn is_next_field(event: &KeyEvent) -> bool {
        event.code == KeyCode::Tab
    }

    /// Shift+Tab - Previous field
    pub fn is_prev_field(event: &KeyEvent) -> bool {
        event.code == KeyCode::BackTab
    }

    /// Space - Toggle mark
    pub fn is_toggle(event: &KeyEvent) -> bool {
        event.code == KeyCode::Char(' ') && event.modifiers.is_empty()
    }

    /// Plain or shifted printable character (no Ctrl/Alt)
    pub fn typed_char(event: &KeyEvent) -> Option<char> {
        match event.code {
            KeyCode::Char(c)
                if !event
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(c)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_handler_creation() {
        let mut handler = EventHandler::new();
        let sender = handler.sender();
        assert!(sender.send(TuiEvent::Quit).is_ok());
        assert_eq!(handler.try_next(), Some(TuiEvent::Quit));
        assert_eq!(handler.try_next(), None);
    }

    #[test]
    fn test_key_matches() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(key_matches(&event, KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!key_matches(&event, KeyCode::Char('c'), KeyModifiers::empty()));
    }

    #[test]
    fn test_quit_key() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(keys::is_quit(&event));

        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::empty());
        assert!(!keys::is_quit(&event));
    }

    #[test]
    fn test_submit_key() {
        let event = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(keys::is_submit(&event));

        let event = KeyEvent::new(KeyCode::Enter, KeyModifiers::empty());
        assert!(!keys::is_submit(&event));
    }

    #[test]
    fn test_typed_char() {
        let event = KeyEvent::new(KeyCode::Char('P'), KeyModifiers::SHIFT);
        assert_eq!(keys::typed_char(&event), Some('P'));

        let event = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(keys::typed_char(&event), None);

        let event = KeyEvent::new(KeyCode::Enter, KeyModifiers::empty());
        assert_eq!(keys::typed_char(&event), None);
    }

    #[tokio::test]
    async fn test_next_receives_sent_event() {
        let mut handler = EventHandler::new();
        handler.sender().send(TuiEvent::Tick).unwrap();
        assert_eq!(handler.next().await, Some(TuiEvent::Tick));
    }
}
