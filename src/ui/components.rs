//! Shared UI components (status bar, toasts, modals, home screen).
//!
use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::confirm::ConfirmDialog;
use crate::app::keymap::KeyAction;
use crate::app::notify::Level;
use crate::app::{AppState, InputMode};

/// Render the bottom status bar with mode, route, and counts.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Form => "FORM",
        InputMode::Modal => "MODAL",
    };
    let activity = match app.busy {
        Some(label) => format!("  {label}"),
        None if app.controller.is_loading() => "  loading...".to_string(),
        None => String::new(),
    };
    let query = if app.search_query.is_empty() {
        String::new()
    } else {
        format!("  search:\"{}\"", app.search_query)
    };
    let msg = format!(
        "mode: {mode}  route: {}  users:{}  shown:{}{query}{activity}",
        app.route.path(),
        app.controller.users().len(),
        app.visible.len(),
    );
    let p = Paragraph::new(msg).style(Style::default().fg(app.theme.status_fg).bg(app.theme.status_bg));
    f.render_widget(p, area);
}

/// Stack live toasts in the top-right corner, newest on top.
pub fn render_toasts(f: &mut Frame, area: Rect, app: &AppState) {
    let toasts = app.controller.notices.visible(Instant::now());
    let width = 48u16.min(area.width);
    let mut y = area.y + 1;
    for toast in toasts {
        let lines = (toast.message.chars().count() as u16 / width.saturating_sub(4).max(1)) + 1;
        let height = lines + 2;
        if y + height > area.y + area.height {
            break;
        }
        let rect = Rect { x: area.x + area.width - width, y, width, height };
        let (title, color) = match toast.level {
            Level::Info => ("Info", app.theme.accent),
            Level::Success => ("Success", app.theme.success),
            Level::Warning => ("Warning", app.theme.warning),
            Level::Error => ("Error", app.theme.danger),
        };
        let p = Paragraph::new(toast.message.as_str())
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(app.theme.text))
            .block(Block::default().title(title).borders(Borders::ALL).border_style(Style::default().fg(color)));
        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
        y += height;
    }
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

pub fn render_confirm_modal(f: &mut Frame, area: Rect, app: &AppState, dialog: &ConfirmDialog) {
    let width = 56u16.min(area.width.saturating_sub(4)).max(36);
    let rect = centered_rect(width, 9, area);
    let button = |label: &str, active: bool| {
        if active {
            Span::styled(
                format!("[{label}]"),
                Style::default().fg(app.theme.highlight_fg).bg(app.theme.danger).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw(format!(" {label} "))
        }
    };
    let mut lines: Vec<Line> = dialog.prompt.lines().map(|l| Line::raw(l.to_string())).collect();
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw("  "),
        button(&dialog.confirm_label, dialog.selected == 0),
        Span::raw("    "),
        button("Cancel", dialog.selected == 1),
    ]));
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(dialog.title.as_str())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.danger)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Keybindings overview built from the live keymap.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let width = 64u16.min(area.width.saturating_sub(4)).max(40);
    let height = 24u16.min(area.height.saturating_sub(2)).max(10);
    let rect = centered_rect(width, height, area);

    let row = |label: &str, keys: String| {
        Line::from(vec![
            Span::raw(format!("  {label:>22} │ ")),
            Span::styled(keys, Style::default().add_modifier(Modifier::ITALIC)),
        ])
    };
    let section = |title: &'static str| Line::from(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)));

    let mut lines = vec![section("General:")];
    for (label, action) in [
        ("Home", KeyAction::GoHome),
        ("View users", KeyAction::GoUsers),
        ("Add user", KeyAction::NewUser),
        ("Download PDF", KeyAction::ExportPdf),
        ("Refresh", KeyAction::Refresh),
        ("Help", KeyAction::ToggleHelp),
        ("Quit", KeyAction::Quit),
    ] {
        lines.push(row(label, app.keymap.keys_for(action).join(", ")));
    }
    lines.push(Line::raw(""));
    lines.push(section("Users:"));
    for (label, action) in [
        ("Search", KeyAction::StartSearch),
        ("Open details", KeyAction::OpenDetail),
        ("Edit", KeyAction::EditSelection),
        ("Delete", KeyAction::DeleteSelection),
        ("Back", KeyAction::Back),
        ("Move up", KeyAction::MoveUp),
        ("Move down", KeyAction::MoveDown),
        ("Page up", KeyAction::PageUp),
        ("Page down", KeyAction::PageDown),
    ] {
        lines.push(row(label, app.keymap.keys_for(action).join(", ")));
    }
    lines.push(Line::raw(""));
    lines.push(section("Form:"));
    lines.push(row("Next / previous field", "Tab, Down / BackTab, Up".to_string()));
    lines.push(row("Submit", "Enter on button, Ctrl+s".to_string()));
    lines.push(row("Cancel", "Esc".to_string()));

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Keybindings (any key closes)")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

pub fn render_home(f: &mut Frame, area: Rect, app: &AppState) {
    let bold = Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD);
    let key = |action: KeyAction| app.keymap.keys_for(action).first().cloned().unwrap_or_default();
    let lines = vec![
        Line::from(Span::styled("Welcome to UserVault!", bold)),
        Line::raw(""),
        Line::raw(
            "Manage user information: add new users, view details of all registered users, \
             edit existing entries, and delete records as needed.",
        ),
        Line::raw(""),
        Line::from(Span::styled("Get Started:", bold)),
        Line::raw(format!("  Press {} to view registered users.", key(KeyAction::GoUsers))),
        Line::raw(format!("  Press {} to add a new user.", key(KeyAction::NewUser))),
        Line::raw(format!("  Press {} to download user data as a PDF.", key(KeyAction::ExportPdf))),
        Line::raw(format!("  Press {} for all keybindings.", key(KeyAction::ToggleHelp))),
    ];
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(app.theme.text))
        .block(Block::default().title("Home").borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)));
    f.render_widget(p, area);
}
