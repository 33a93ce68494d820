//! TUI Runner - main event loop.
//!
//! The `TuiRunner` owns the terminal, app, and event handler. It runs the
//! main loop: render → handle events → fire timers → repeat.
//!
//! Must run inside a `tokio::task::LocalSet` so tool handlers can spawn
//! their async work.

use std::time::Instant;

use eyre::Result;
use log::{debug, info};

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views::render;

/// Main TUI runner that owns the event loop.
pub struct TuiRunner {
    terminal: Tui,
    app: App,
    event_handler: EventHandler,
}

impl TuiRunner {
    /// Create a new TUI runner polling at `tick_rate_ms`.
    pub fn new(terminal: Tui, app: App, tick_rate_ms: u64) -> Self {
        Self {
            terminal,
            app,
            event_handler: EventHandler::new(tick_rate_ms),
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Run the main TUI loop until the user quits, then tear the dashboard down.
    pub async fn run(mut self) -> Result<()> {
        info!("Starting TUI main loop");

        loop {
            self.terminal.draw(|f| render(&self.app, f))?;

            match self.event_handler.next().await? {
                Event::Key(key) => {
                    if self.app.handle_key(key) {
                        break;
                    }
                }
                Event::Paste(text) => self.app.handle_paste(&text),
                Event::Resize(w, h) => debug!("Resized to {}x{}", w, h),
                Event::Tick => {}
            }

            // Copy feedback restores and async completions land here
            self.app.tick(Instant::now());

            if self.app.state().should_quit {
                break;
            }
        }

        self.app.teardown();
        info!("TUI main loop ended");
        Ok(())
    }
}
