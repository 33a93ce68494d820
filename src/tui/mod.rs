//! Terminal User Interface for devdash.
//!
//! Cards are laid out in a grid, one bordered block per open tool. The
//! focused card's controls are driven from the keyboard, and key presses
//! become DOM events on the underlying elements, so tools behave exactly as
//! they do headless.

mod app;
mod controls;
mod events;
mod input;
mod runner;
mod state;
mod views;

pub use app::App;
pub use controls::{Control, ControlKind, card_controls, card_outputs};
pub use events::{Event, EventHandler};
pub use input::EditBuffer;
pub use runner::TuiRunner;
pub use state::{AppState, InteractionMode};

use crossterm::{
    ExecutableCommand,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use eyre::Result;
use ratatui::prelude::*;
use std::io::{Stdout, stdout};

/// Type alias for our terminal backend.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode.
///
/// Enables raw mode and bracketed paste, and switches to the alternate screen.
pub fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
pub fn restore_terminal() -> Result<()> {
    stdout().execute(DisableBracketedPaste)?;
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Theme palettes.
pub mod colors {
    use ratatui::style::Color;

    use crate::config::Theme;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Palette {
        pub fg: Color,
        pub bg: Color,
        pub accent: Color,
        pub border: Color,
        pub focus: Color,
        pub dim: Color,
        pub error: Color,
    }

    pub const DARK: Palette = Palette {
        fg: Color::Rgb(229, 231, 235),   // gray-200
        bg: Color::Rgb(17, 24, 39),      // gray-900
        accent: Color::Rgb(96, 165, 250), // blue-400
        border: Color::Rgb(75, 85, 99),   // gray-600
        focus: Color::Rgb(0, 255, 255),
        dim: Color::DarkGray,
        error: Color::Rgb(220, 20, 60),
    };

    pub const LIGHT: Palette = Palette {
        fg: Color::Rgb(31, 41, 55),      // gray-800
        bg: Color::Rgb(243, 244, 246),   // gray-100
        accent: Color::Rgb(37, 99, 235), // blue-600
        border: Color::Rgb(209, 213, 219),
        focus: Color::Rgb(79, 70, 229),
        dim: Color::Gray,
        error: Color::Rgb(185, 28, 28),
    };

    pub fn palette(theme: Theme) -> &'static Palette {
        match theme {
            Theme::Dark => &DARK,
            Theme::Light => &LIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;

    #[test]
    fn test_palette_per_theme() {
        assert_eq!(colors::palette(Theme::Dark), &colors::DARK);
        assert_eq!(colors::palette(Theme::Light), &colors::LIGHT);
        assert_ne!(colors::DARK.bg, colors::LIGHT.bg);
    }
}
