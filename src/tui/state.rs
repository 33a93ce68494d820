//! Application state for the TUI.
//!
//! - `AppState`: focus, mode, theme and status for the dashboard screen
//! - `InteractionMode`: what the keyboard currently drives

use crate::config::Theme;
use crate::dom::Element;

use super::input::EditBuffer;

/// The primary application state.
///
/// Owned by `App` and updated in response to key events and ticks.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current interaction mode
    pub interaction_mode: InteractionMode,
    /// Index of the focused card in visual order
    pub focused_card: usize,
    /// Index of the focused control within the focused card
    pub focused_control: usize,
    /// Highlighted row of the tool selector
    pub selector_index: usize,
    /// Color scheme
    pub theme: Theme,
    /// One-line status shown in the footer
    pub status_message: Option<String>,
    /// Whether the application should quit
    pub should_quit: bool,
}

impl AppState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    /// Keep focus within `cards` cards and `controls` controls
    pub fn clamp_focus(&mut self, cards: usize, controls: usize) {
        self.focused_card = if cards == 0 { 0 } else { self.focused_card.min(cards - 1) };
        self.focused_control = if controls == 0 { 0 } else { self.focused_control.min(controls - 1) };
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.interaction_mode, InteractionMode::Editing { .. })
    }
}

/// Current interaction mode.
#[derive(Debug, Clone, Default)]
pub enum InteractionMode {
    /// Card and control navigation
    #[default]
    Normal,
    /// Typing into a text control; every change fires an input event
    Editing { target: Element, buffer: EditBuffer },
    /// Tool selector popup
    Selector,
    /// A notification is being shown
    Notice,
    /// Help overlay visible
    Help,
}

impl InteractionMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Editing { .. } => "EDIT",
            Self::Selector => "SELECT",
            Self::Notice => "NOTICE",
            Self::Help => "HELP",
        }
    }
}
