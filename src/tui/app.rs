//! TUI Application
//!
//! Owns the dashboard and translates key presses into DOM events on the
//! focused card.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, error, info};

use crate::config::Config;
use crate::dom::{Dom, EventKind};
use crate::shell::{Dashboard, ToolInstance};
use crate::tools::ToolCatalog;

use super::controls::{Control, ControlKind, card_controls};
use super::input::EditBuffer;
use super::state::{AppState, InteractionMode};

/// Main TUI application
pub struct App {
    dom: Dom,
    dashboard: Dashboard,
    catalog: ToolCatalog,
    state: AppState,
    columns: u16,
}

impl App {
    /// Create the app with an empty dashboard mounted at the document root
    pub fn new(dom: &Dom, catalog: ToolCatalog, config: &Config) -> Self {
        let dashboard = Dashboard::new(dom);
        dom.root().append_child(dashboard.render());
        Self {
            dom: dom.clone(),
            dashboard,
            catalog,
            state: AppState::new(config.theme),
            columns: config.tui.columns.max(1),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Cards per grid row
    pub fn columns(&self) -> u16 {
        self.columns
    }

    /// Open cards in visual order
    pub fn cards(&self) -> Vec<ToolInstance> {
        self.dashboard
            .instances()
            .iter()
            .filter_map(|key| self.dashboard.get(key))
            .collect()
    }

    pub fn focused_card(&self) -> Option<ToolInstance> {
        self.cards().into_iter().nth(self.state.focused_card)
    }

    pub fn focused_control(&self) -> Option<Control> {
        let card = self.focused_card()?;
        card_controls(&card.root).into_iter().nth(self.state.focused_control)
    }

    /// Open a tool by kind and focus it
    pub fn open(&mut self, kind: &str) -> Option<String> {
        match self.dashboard.select(kind, &self.catalog) {
            Ok(Some(key)) => {
                self.state.focused_card = self.dashboard.len().saturating_sub(1);
                self.state.focused_control = 0;
                self.state.status_message = Some(format!("Opened {}", key));
                self.sync();
                Some(key)
            }
            Ok(None) => {
                self.state.status_message = Some(format!("Unknown tool '{}'", kind));
                None
            }
            Err(e) => {
                error!("Failed to open {}: {}", kind, e);
                self.state.status_message = Some(e.to_string());
                None
            }
        }
    }

    /// Open each of `kinds`, skipping unknown ones
    pub fn open_all(&mut self, kinds: &[String]) {
        for kind in kinds {
            self.open(kind);
        }
        self.state.focused_card = 0;
        self.state.focused_control = 0;
    }

    /// Fire due timers and refresh focus and mode
    pub fn tick(&mut self, now: Instant) {
        let fired = self.dom.run_timers(now);
        if fired > 0 {
            debug!("Fired {} timers", fired);
        }
        // Drops handles of finished requests
        self.dom.pending_tasks();
        self.sync();
    }

    /// Close every open card and unmount the dashboard
    pub fn teardown(self) {
        self.dashboard.teardown();
    }

    /// Handle a key press; returns true when the app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.state.interaction_mode {
            InteractionMode::Normal => self.handle_normal_key(key),
            InteractionMode::Editing { .. } => self.handle_editing_key(key),
            InteractionMode::Selector => self.handle_selector_key(key),
            InteractionMode::Notice => self.handle_notice_key(key),
            InteractionMode::Help => self.state.interaction_mode = InteractionMode::Normal,
        }
        self.sync();
        self.state.should_quit
    }

    /// Insert pasted text into the control being edited
    pub fn handle_paste(&mut self, text: &str) {
        if let InteractionMode::Editing { target, buffer } = &mut self.state.interaction_mode {
            buffer.insert_str(text);
            target.type_text(buffer.content());
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('n') => {
                self.state.selector_index = 0;
                self.state.interaction_mode = InteractionMode::Selector;
            }
            KeyCode::Char('?') => self.state.interaction_mode = InteractionMode::Help,
            KeyCode::Char('t') => self.state.theme = self.state.theme.toggled(),
            KeyCode::Char('x') => self.close_focused(),
            KeyCode::Tab => self.focus_card(1),
            KeyCode::BackTab => self.focus_card(-1),
            KeyCode::Down | KeyCode::Char('j') => self.focus_control(1),
            KeyCode::Up | KeyCode::Char('k') => self.focus_control(-1),
            KeyCode::Enter => self.activate(),
            _ => {}
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        let InteractionMode::Editing { target, buffer } = &mut self.state.interaction_mode else {
            return;
        };
        let leave = match key.code {
            KeyCode::Esc | KeyCode::Tab => true,
            KeyCode::Enter => !buffer.is_multiline(),
            _ => false,
        };
        if leave {
            target.dispatch(EventKind::Change);
            self.state.interaction_mode = InteractionMode::Normal;
        } else if buffer.handle_key(&key) {
            target.type_text(buffer.content());
        }
    }

    fn handle_selector_key(&mut self, key: KeyEvent) {
        let count = self.catalog.len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.state.interaction_mode = InteractionMode::Normal,
            KeyCode::Down | KeyCode::Char('j') if count > 0 => {
                self.state.selector_index = (self.state.selector_index + 1) % count;
            }
            KeyCode::Up | KeyCode::Char('k') if count > 0 => {
                self.state.selector_index = (self.state.selector_index + count - 1) % count;
            }
            KeyCode::Enter => {
                self.state.interaction_mode = InteractionMode::Normal;
                let kind = self.catalog.list().get(self.state.selector_index).map(|k| k.to_string());
                if let Some(kind) = kind {
                    self.open(&kind);
                }
            }
            _ => {}
        }
    }

    fn handle_notice_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            self.dom.dismiss_notice();
        }
    }

    fn quit(&mut self) {
        info!("Quit requested");
        self.state.should_quit = true;
    }

    fn focus_card(&mut self, step: isize) {
        let count = self.dashboard.len();
        if count == 0 {
            return;
        }
        self.state.focused_card = (self.state.focused_card as isize + step).rem_euclid(count as isize) as usize;
        self.state.focused_control = 0;
    }

    fn focus_control(&mut self, step: isize) {
        let count = self.focused_card().map(|c| card_controls(&c.root).len()).unwrap_or(0);
        if count == 0 {
            return;
        }
        self.state.focused_control = (self.state.focused_control as isize + step).rem_euclid(count as isize) as usize;
    }

    fn activate(&mut self) {
        let Some(control) = self.focused_control() else {
            return;
        };
        match control.kind {
            ControlKind::Button => {
                control.element.click();
            }
            ControlKind::Select => {
                if control.cycle_option().is_some() {
                    control.element.dispatch(EventKind::Change);
                }
            }
            ControlKind::Input | ControlKind::TextArea if control.is_editable() => {
                let buffer = EditBuffer::new(&control.element.value(), control.kind == ControlKind::TextArea);
                self.state.interaction_mode = InteractionMode::Editing {
                    target: control.element,
                    buffer,
                };
            }
            _ => {}
        }
    }

    fn close_focused(&mut self) {
        if let Some(card) = self.focused_card() {
            self.dashboard.close(&card.instance_key);
            self.state.status_message = Some(format!("Closed {}", card.instance_key));
        }
    }

    fn sync(&mut self) {
        let cards = self.cards();
        let card_count = cards.len();
        let card_index = if card_count == 0 { 0 } else { self.state.focused_card.min(card_count - 1) };
        let controls = cards.get(card_index).map(|c| card_controls(&c.root).len()).unwrap_or(0);
        self.state.clamp_focus(card_count, controls);

        let next = match &self.state.interaction_mode {
            InteractionMode::Editing { target, .. } if !target.exists() => Some(InteractionMode::Normal),
            InteractionMode::Normal if self.dom.peek_notice().is_some() => Some(InteractionMode::Notice),
            InteractionMode::Notice if self.dom.peek_notice().is_none() => Some(InteractionMode::Normal),
            _ => None,
        };
        if let Some(mode) = next {
            self.state.interaction_mode = mode;
        }
    }
}
