pub mod components;
pub mod form;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, ModalState, Route};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(f.area());

    render_navbar(f, root[0], app);

    match app.route.clone() {
        Route::Home => components::render_home(f, root[1], app),
        Route::Users => {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(65), Constraint::Percentage(35)].as_ref())
                .split(root[1]);
            let left = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(3)].as_ref())
                .split(body[0]);
            users::render_search_bar(f, left[0], app);
            users::render_users_table(f, left[1], app);
            users::render_selection_preview(f, body[1], app);
        }
        Route::AddUser | Route::EditUser(_) => {
            if let Some(state) = app.form.as_ref() {
                let rect = components::centered_rect(72, root[1].height, root[1]);
                form::render_user_form(f, rect, app, state);
            }
        }
        Route::UserDetail(_) => users::render_user_detail(f, root[1], app),
    }

    components::render_status_bar(f, root[2], app);
    components::render_toasts(f, root[1], app);

    let full = f.area();
    match app.modal.as_ref() {
        Some(ModalState::Confirm(dialog)) => components::render_confirm_modal(f, full, app, dialog),
        Some(ModalState::Help) => components::render_help_modal(f, full, app),
        None => {}
    }
}

/// Top bar: brand, route links, export hint.
fn render_navbar(f: &mut Frame, area: Rect, app: &AppState) {
    let links = [
        (Route::Home, "1"),
        (Route::Users, "2"),
        (Route::AddUser, "n"),
    ];
    let mut spans = vec![Span::styled(
        "UserVault  ",
        Style::default().fg(app.theme.header_fg).add_modifier(Modifier::BOLD),
    )];
    for (route, key) in links {
        let active = app.route == route
            || (route == Route::Users && matches!(app.route, Route::UserDetail(_)))
            || (route == Route::AddUser && matches!(app.route, Route::EditUser(_)));
        let style = if active {
            Style::default().fg(app.theme.highlight_fg).bg(app.theme.highlight_bg)
        } else {
            Style::default().fg(app.theme.text)
        };
        spans.push(Span::styled(format!(" {} ({key}) ", route.title()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("  Download PDF (p)   Help (?)   Quit (q)", Style::default().fg(app.theme.muted)));

    let p = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .title(app.route.path())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .style(Style::default().bg(app.theme.header_bg));
    f.render_widget(p, area);
}
