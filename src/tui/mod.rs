// TUI module for rendering the terminal interface
pub mod colors;
pub mod input;

// Re-exports
pub use colors::*;
pub use input::{handle_key_event, handle_overlay_input, KeyAction};

use crate::app::{App, Panel, ViewState};
use crate::domain::Item;
use crate::preview::tree_lines;
use crate::tree::TreeLine;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

const KEY_HINTS: &str = " [1-2] panels  [j/k] navigate  [J/K] scroll preview  [space/enter] toggle  [/] tabs  [t] tree  [?] help  [q] quit";

/// Renders the main view and any open overlay
pub fn render(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Lists and preview
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)])
        .split(rows[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .split(columns[0]);

    render_tab_bar(frame, left[0], app);
    render_item_list(frame, left[1], app, Panel::Available);
    render_item_list(frame, left[2], app, Panel::Applied);
    render_preview(frame, columns[1], app);
    render_status_bar(frame, rows[1], app);

    if app.view == ViewState::Help {
        render_help_overlay(frame);
    } else if let Some((item, rows)) = app.overlay_tree() {
        render_tree_overlay(frame, item, rows, app.tree_scroll);
    }
}

fn render_tab_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();
    for (index, category) in app.categories.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled("│", Style::default().fg(TEXT_SECONDARY)));
        }
        let style = if index == app.active_tab {
            Style::default()
                .fg(ACCENT_APPLIED)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_SECONDARY)
        };
        spans.push(Span::styled(format!(" {} ", category.title()), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn item_line(item: &Item, applied: bool) -> Line<'static> {
    let mut spans = Vec::new();
    if applied {
        spans.push(Span::styled("+", Style::default().fg(ACCENT_APPLIED)));
    } else {
        spans.push(Span::raw(" "));
    }
    if item.is_directory {
        spans.push(Span::styled("d ", Style::default().fg(ACCENT_DIRECTORY)));
    } else {
        spans.push(Span::raw("  "));
    }
    spans.push(Span::raw(item.name.clone()));
    Line::from(spans)
}

fn render_item_list(frame: &mut Frame, area: Rect, app: &App, panel: Panel) {
    let (number, label, items, cursor) = match panel {
        Panel::Available => ("1", "Available", &app.catalog.available, app.available_cursor),
        Panel::Applied => ("2", "Applied", &app.catalog.applied, app.applied_cursor),
    };
    let focused = app.focus == panel && app.view == ViewState::Browsing;
    let category = app
        .active_category()
        .map(|c| c.title())
        .unwrap_or_default();

    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| ListItem::new(item_line(item, panel == Panel::Applied)))
        .collect();

    let border = if focused { FOCUS_BORDER } else { BORDER_COLOR };
    let highlight = if focused {
        Style::default().bg(SELECTION_BG).fg(SELECTION_FG)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    let list = List::new(list_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border))
                .title(format!(" [{}] {} {} ", number, label, category)),
        )
        .style(Style::default().fg(TEXT_PRIMARY))
        .highlight_style(highlight);

    let mut state = ListState::default();
    if !items.is_empty() {
        state.select(Some(cursor));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_preview(frame: &mut Frame, area: Rect, app: &App) {
    let paragraph = Paragraph::new(app.preview.lines.clone())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR))
                .title(" Preview "),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.preview_scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status {
        Some(message) => Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(ACCENT_ERROR),
        )),
        None => Line::from(Span::styled(KEY_HINTS, Style::default().fg(TEXT_SECONDARY))),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn overlay_block(title: String) -> Block<'static> {
    Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(FOCUS_BORDER))
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(title, Style::default().fg(ACCENT_APPLIED)))
}

fn binding(keys: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<14}", keys), Style::default().fg(ACCENT_HIGHLIGHT)),
        Span::raw(description),
    ])
}

/// Renders the help overlay
pub fn render_help_overlay(frame: &mut Frame) {
    let area = fixed_centered_rect(55, 24, frame.area());

    // Clear background
    frame.render_widget(Clear, area);

    let help_lines = vec![
        Line::from(Span::styled(
            "LazyClaude - Help",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section("Navigation:"),
        binding("1, 2", "Jump to panel"),
        binding("Tab / S-Tab", "Cycle panels"),
        binding("h / l", "Prev / Next panel"),
        binding("j / k", "Move cursor"),
        binding("J / K", "Scroll preview"),
        Line::from(""),
        section("Tabs:"),
        binding("[ / ]", "Prev / Next category"),
        Line::from(""),
        section("Actions:"),
        binding("Space / Enter", "Apply or remove item"),
        binding("", "(Available: apply, Applied: remove)"),
        binding("t", "Show folder tree (directories)"),
        Line::from(""),
        section("Meta:"),
        binding("q / Esc", "Quit"),
        binding("?", "This help"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Escape or q to close",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(help_lines)
        .block(overlay_block(" Help ".to_string()))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Renders the folder tree overlay for a directory item, scrolled by `scroll`
pub fn render_tree_overlay(frame: &mut Frame, item: &Item, rows: &[TreeLine], scroll: u16) {
    let area = fixed_centered_rect(60, 25, frame.area());

    // Clear background
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("{}/", item.name),
            Style::default()
                .fg(ACCENT_DIRECTORY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(tree_lines(rows));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "j/k to scroll, Escape or q to close",
        Style::default().fg(TEXT_SECONDARY),
    )));

    let paragraph = Paragraph::new(lines)
        .block(overlay_block(format!(" {} - Tree ", item.name)))
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

/// Helper to create a centered rect of a fixed size, shrunk to fit `r`
fn fixed_centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}
