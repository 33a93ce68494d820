//! TUI Views
//!
//! Header, card grid, footer, and the selector / notice / help overlays.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::shell::ToolInstance;

use super::app::App;
use super::colors::{Palette, palette};
use super::controls::{Control, ControlKind, card_controls, card_outputs};
use super::input::EditBuffer;
use super::state::InteractionMode;

/// Lines of a text area shown before eliding the rest
const TEXTAREA_LINES: usize = 8;

const CURSOR: char = '█';

/// Render the whole screen
pub fn render(app: &App, frame: &mut Frame) {
    let p = palette(app.state().theme);
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(p.bg).fg(p.fg)), area);

    let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)]).split(area);
    render_header(app, frame, chunks[0], p);
    render_grid(app, frame, chunks[1], p);
    render_footer(app, frame, chunks[2], p);

    match &app.state().interaction_mode {
        InteractionMode::Selector => render_selector(app, frame, area, p),
        InteractionMode::Notice => render_notice(app, frame, area, p),
        InteractionMode::Help => render_help(frame, area, p),
        _ => {}
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect, p: &Palette) {
    let mut line = Line::from(vec![
        Span::styled(" Dev Tools Aggregator ", Style::default().fg(p.accent).add_modifier(Modifier::BOLD)),
        Span::styled(format!("│ {} open ", app.cards().len()), Style::default().fg(p.dim)),
        Span::styled(format!("│ {:?} ", app.state().theme), Style::default().fg(p.dim)),
    ]);
    if let Some(clip) = app.dom().clipboard() {
        line.push_span(Span::styled(format!("│ clipboard: {} ", clip_preview(&clip)), Style::default().fg(p.dim)));
    }
    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(p.border)));
    frame.render_widget(header, area);
}

/// First line of the clipboard, shortened for the header
fn clip_preview(text: &str) -> String {
    const MAX: usize = 24;
    let first = text.lines().next().unwrap_or_default();
    if first.chars().count() > MAX || text.lines().nth(1).is_some() {
        format!("{}…", first.chars().take(MAX).collect::<String>())
    } else {
        first.to_string()
    }
}

fn render_grid(app: &App, frame: &mut Frame, area: Rect, p: &Palette) {
    let cards = app.cards();
    if cards.is_empty() {
        let hint = Paragraph::new("No tools open. Press 'n' to add one.").style(Style::default().fg(p.dim));
        frame.render_widget(hint, area);
        return;
    }

    let columns = usize::from(app.columns());
    let rows = cards.len().div_ceil(columns);
    let row_areas = Layout::vertical(vec![Constraint::Ratio(1, rows as u32); rows]).split(area);

    let state = app.state();
    for (row, chunk) in cards.chunks(columns).enumerate() {
        let cell_areas = Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns]).split(row_areas[row]);
        for (col, card) in chunk.iter().enumerate() {
            let index = row * columns + col;
            let focused = index == state.focused_card;
            let focus = focused.then_some(state.focused_control);
            let editing = match &state.interaction_mode {
                InteractionMode::Editing { buffer, .. } if focused => Some(buffer),
                _ => None,
            };
            render_card(card, frame, cell_areas[col], p, focus, editing);
        }
    }
}

fn render_card(
    card: &ToolInstance,
    frame: &mut Frame,
    area: Rect,
    p: &Palette,
    focus: Option<usize>,
    editing: Option<&EditBuffer>,
) {
    let border = if focus.is_some() { p.focus } else { p.border };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" {} ", card.descriptor.title),
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Span::styled(format!(" {} ", card.instance_key), Style::default().fg(p.dim)));
    let body = Paragraph::new(Text::from(card_lines(card, p, focus, editing)))
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(body, area);
}

/// Text lines for a card body
pub fn card_lines(card: &ToolInstance, p: &Palette, focus: Option<usize>, editing: Option<&EditBuffer>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, control) in card_controls(&card.root).iter().enumerate() {
        let focused = focus == Some(i);
        let marker = if focused { "▶ " } else { "  " };
        let edit = editing.filter(|_| focused);
        lines.extend(control_lines(control, marker, p, focused, edit));
    }
    for output in card_outputs(&card.root) {
        lines.push(Line::from(""));
        lines.extend(output.inner_text().lines().map(|l| Line::from(l.to_string())));
    }
    lines
}

fn control_lines(control: &Control, marker: &str, p: &Palette, focused: bool, editing: Option<&EditBuffer>) -> Vec<Line<'static>> {
    let label_style = if focused {
        Style::default().fg(p.focus).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(p.fg)
    };
    let value = match editing {
        Some(buffer) => with_cursor(buffer),
        None => control.element.value(),
    };

    match control.kind {
        ControlKind::Button => vec![Line::from(vec![
            Span::raw(marker.to_string()),
            Span::styled(format!("[ {} ]", control.label()), label_style),
        ])],
        ControlKind::Select => vec![Line::from(vec![
            Span::raw(marker.to_string()),
            Span::styled(format!("◂ {} ▸", value), label_style),
        ])],
        ControlKind::Input => {
            let shown = if value.is_empty() {
                Span::styled(control.label(), Style::default().fg(p.dim))
            } else {
                Span::styled(value, label_style)
            };
            vec![Line::from(vec![Span::raw(marker.to_string()), Span::raw("› "), shown])]
        }
        ControlKind::TextArea => {
            let mut lines = vec![Line::from(vec![
                Span::raw(marker.to_string()),
                Span::styled(control.label(), Style::default().fg(p.dim)),
            ])];
            let total = value.lines().count();
            lines.extend(
                value
                    .lines()
                    .take(TEXTAREA_LINES)
                    .map(|l| Line::from(Span::styled(format!("  │ {}", l), label_style))),
            );
            if total > TEXTAREA_LINES {
                lines.push(Line::from(Span::styled(
                    format!("  │ … {} more lines", total - TEXTAREA_LINES),
                    Style::default().fg(p.dim),
                )));
            }
            lines
        }
    }
}

fn with_cursor(buffer: &EditBuffer) -> String {
    let mut shown = buffer.content().to_string();
    shown.insert(buffer.cursor(), CURSOR);
    shown
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect, p: &Palette) {
    let state = app.state();
    let keys = match state.interaction_mode {
        InteractionMode::Normal => "n add │ Tab card │ ↑↓ control │ Enter activate │ x close │ t theme │ ? help │ q quit",
        InteractionMode::Editing { .. } => "type to edit │ Esc done",
        InteractionMode::Selector => "↑↓ choose │ Enter open │ Esc cancel",
        InteractionMode::Notice => "Enter dismiss",
        InteractionMode::Help => "any key to close",
    };
    let mut spans = vec![
        Span::styled(
            format!(" {} ", state.interaction_mode.name()),
            Style::default().fg(p.bg).bg(p.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {}", keys), Style::default().fg(p.dim)),
    ];
    if let Some(status) = &state.status_message {
        spans.push(Span::styled(format!("  {}", status), Style::default().fg(p.fg)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_selector(app: &App, frame: &mut Frame, area: Rect, p: &Palette) {
    let items: Vec<ListItem> = app.catalog().all().map(|t| ListItem::new(t.title.clone())).collect();
    let height = items.len() as u16 + 2;
    let popup = centered(area, 40, height);

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(p.focus))
                .title(" Select a tool... "),
        )
        .highlight_style(Style::default().fg(p.bg).bg(p.focus).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");
    let mut list_state = ListState::default();
    list_state.select(Some(app.state().selector_index));

    frame.render_widget(Clear, popup);
    frame.render_stateful_widget(list, popup, &mut list_state);
}

fn render_notice(app: &App, frame: &mut Frame, area: Rect, p: &Palette) {
    let Some(notice) = app.dom().peek_notice() else {
        return;
    };
    let title = match &notice.source {
        Some(source) => format!(" {} ", source),
        None => " Notice ".to_string(),
    };
    let popup = centered(area, 50, 5);
    let body = Paragraph::new(notice.message)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(p.error))
                .title(title),
        );
    frame.render_widget(Clear, popup);
    frame.render_widget(body, popup);
}

fn render_help(frame: &mut Frame, area: Rect, p: &Palette) {
    let rows = [
        ("n", "open the tool selector"),
        ("Tab / Shift-Tab", "next / previous card"),
        ("↑ ↓  j k", "move between controls"),
        ("Enter", "press button, cycle select, edit field"),
        ("Esc", "stop editing"),
        ("x", "close the focused card"),
        ("t", "toggle theme"),
        ("q", "quit"),
    ];
    let lines: Vec<Line> = rows
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!("{:>16}  ", key), Style::default().fg(p.accent)),
                Span::raw(*what),
            ])
        })
        .collect();
    let popup = centered(area, 60, lines.len() as u16 + 2);
    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.border))
            .title(" Help "),
    );
    frame.render_widget(Clear, popup);
    frame.render_widget(help, popup);
}

/// Rect of `percent_x` width and `height` rows, centered in `area`
fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let width = (area.width * percent_x / 100).max(20).min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
