//! Event handling for the TUI.
//!
//! This module provides:
//! - `Event`: The unified event type (keyboard, paste, tick)
//! - `EventHandler`: Async event stream from the terminal and tick timer

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use eyre::Result;
use std::time::Duration;

/// Unified event type for the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard input event
    Key(KeyEvent),
    /// Bracketed paste
    Paste(String),
    /// Periodic tick for timers and async completions
    Tick,
    /// Terminal resize
    Resize(u16, u16),
}

/// Handles terminal and tick events.
///
/// The blocking poll runs off-thread so tasks on the local set keep
/// progressing while the user is idle.
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate.
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Get the next event, or `Event::Tick` once the tick interval passes.
    pub async fn next(&self) -> Result<Event> {
        let tick_rate = self.tick_rate;

        let event = tokio::task::spawn_blocking(move || -> Result<Event> {
            if !event::poll(tick_rate)? {
                return Ok(Event::Tick);
            }
            Ok(match event::read()? {
                // Only key presses; releases and repeats are ignored
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
                CrosstermEvent::Paste(text) => Event::Paste(text),
                CrosstermEvent::Resize(w, h) => Event::Resize(w, h),
                _ => Event::Tick,
            })
        })
        .await??;

        Ok(event)
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(250)
    }
}
