//! Event loop, key handling, and command execution.
//!
//! Key handling is synchronous and only decides *what* to do, returning a
//! [`Command`]. Commands that reach the backend are awaited one at a time by
//! [`execute`], so a single user action never has two requests in flight.
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::Backend;
use tracing::{debug, info};

use crate::app::confirm::ConfirmDialog;
use crate::app::form::{FormKey, FormOutcome, UserForm};
use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode, ModalState, PendingAction, Route};
use crate::controller::RemoveOutcome;
use crate::search::apply_search;
use crate::ui;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Navigate(Route),
    Refresh,
    Export,
    SubmitForm,
    /// Run the action waiting on a just-answered confirmation.
    ResolvePending,
    Quit,
}

impl Command {
    /// Status text while the command waits on the backend.
    fn busy_label(&self) -> Option<&'static str> {
        match self {
            Command::Refresh => Some("Loading users..."),
            Command::SubmitForm => Some("Saving..."),
            Command::ResolvePending => Some("Deleting..."),
            Command::Navigate(Route::UserDetail(_) | Route::EditUser(_)) => Some("Loading user..."),
            _ => None,
        }
    }
}

/// Run the TUI until the user quits. Loads the list, then opens `initial`.
pub async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState, initial: Route) -> Result<()> {
    run_command(terminal, app, Command::Refresh).await?;
    run_command(terminal, app, Command::Navigate(initial)).await?;

    while !app.should_quit {
        app.controller.notices.prune(Instant::now());
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(cmd) = handle_key(app, key) {
                        run_command(terminal, app, cmd).await?;
                    }
                }
            }
        }
    }
    Ok(())
}

async fn run_command<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState, cmd: Command) -> Result<()> {
    if let Some(label) = cmd.busy_label() {
        app.busy = Some(label);
        terminal.draw(|f| ui::render(f, app))?;
    }
    execute(app, cmd).await;
    app.busy = None;
    Ok(())
}

/// Translate a key press into state changes and, possibly, a command.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Option<Command> {
    match app.input_mode {
        InputMode::Modal => handle_modal_key(app, key),
        InputMode::Form => handle_form_key(app, key),
        InputMode::Search => {
            handle_search_key(app, key);
            None
        }
        InputMode::Normal => handle_normal_key(app, key),
    }
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent) -> Option<Command> {
    let action = app.keymap.resolve(&key)?;
    debug!(?action, route = %app.route.path(), "key action");
    match action {
        KeyAction::Quit => Some(Command::Quit),
        KeyAction::GoHome => Some(Command::Navigate(Route::Home)),
        KeyAction::GoUsers => Some(Command::Navigate(Route::Users)),
        KeyAction::NewUser => Some(Command::Navigate(Route::AddUser)),
        KeyAction::Refresh => Some(Command::Refresh),
        KeyAction::ExportPdf => Some(Command::Export),
        KeyAction::ToggleHelp => {
            app.modal = Some(ModalState::Help);
            app.input_mode = InputMode::Modal;
            None
        }
        KeyAction::StartSearch => {
            if app.route == Route::Users {
                app.input_mode = InputMode::Search;
            }
            None
        }
        KeyAction::Back => match app.route {
            Route::UserDetail(_) => Some(Command::Navigate(Route::Users)),
            Route::Users if !app.search_query.is_empty() => {
                app.search_query.clear();
                apply_search(app);
                None
            }
            Route::Users => Some(Command::Navigate(Route::Home)),
            _ => None,
        },
        KeyAction::OpenDetail => match app.route {
            Route::Home => Some(Command::Navigate(Route::Users)),
            Route::Users => app
                .selected_user()
                .map(|u| Command::Navigate(Route::UserDetail(u.id.clone()))),
            _ => None,
        },
        KeyAction::EditSelection => current_target(app).map(|id| Command::Navigate(Route::EditUser(id))),
        KeyAction::DeleteSelection => {
            let id = current_target(app)?;
            let return_to_list = matches!(app.route, Route::UserDetail(_));
            open_delete_confirm(app, id, return_to_list);
            None
        }
        KeyAction::MoveUp => {
            app.selected_user_index = app.selected_user_index.saturating_sub(1);
            None
        }
        KeyAction::MoveDown => {
            if app.selected_user_index + 1 < app.visible.len() {
                app.selected_user_index += 1;
            }
            None
        }
        KeyAction::PageUp => {
            app.selected_user_index = app.selected_user_index.saturating_sub(app.rows_per_page.max(1));
            None
        }
        KeyAction::PageDown => {
            let next = app.selected_user_index.saturating_add(app.rows_per_page.max(1));
            app.selected_user_index = next.min(app.visible.len().saturating_sub(1));
            None
        }
        KeyAction::Ignore => None,
    }
}

/// The user an edit/delete applies to: the detail record, or the list selection.
fn current_target(app: &AppState) -> Option<String> {
    match &app.route {
        Route::UserDetail(id) => Some(id.clone()),
        Route::Users => app.selected_user().map(|u| u.id.clone()),
        _ => None,
    }
}

fn open_delete_confirm(app: &mut AppState, id: String, return_to_list: bool) {
    let name = app
        .controller
        .find(&id)
        .or(app.detail.as_ref())
        .map(|u| u.name().to_string())
        .unwrap_or_else(|| id.clone());
    let (dialog, decision) = ConfirmDialog::open(
        "Confirm delete",
        format!("Are you sure you want to delete this user?\n\n{name}"),
    );
    app.pending = Some((PendingAction::DeleteUser { id, return_to_list }, decision));
    app.modal = Some(ModalState::Confirm(dialog));
    app.input_mode = InputMode::Modal;
}

fn close_modal(app: &mut AppState) {
    app.modal = None;
    app.input_mode = InputMode::Normal;
}

fn handle_modal_key(app: &mut AppState, key: KeyEvent) -> Option<Command> {
    match &mut app.modal {
        Some(ModalState::Confirm(dialog)) => {
            match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') | KeyCode::Tab => {
                    dialog.select_next();
                }
                KeyCode::Enter => dialog.resolve_selected(),
                KeyCode::Char('y') | KeyCode::Char('Y') => dialog.resolve(true),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => dialog.resolve(false),
                _ => {}
            }
            if dialog.is_resolved() {
                close_modal(app);
                return Some(Command::ResolvePending);
            }
            None
        }
        Some(ModalState::Help) => {
            close_modal(app);
            None
        }
        None => {
            app.input_mode = InputMode::Normal;
            None
        }
    }
}

fn handle_form_key(app: &mut AppState, key: KeyEvent) -> Option<Command> {
    let form = app.form.as_mut()?;
    if form.submitting {
        return None;
    }
    match form.handle_key(key) {
        FormKey::Edited => None,
        FormKey::Submit => {
            // Set before the busy redraw so the button shows the in-flight label.
            form.submitting = true;
            Some(Command::SubmitForm)
        }
        FormKey::Cancel => Some(Command::Navigate(Route::Users)),
    }
}

fn handle_search_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.search_query.clear();
        }
        KeyCode::Backspace => {
            app.search_query.pop();
        }
        KeyCode::Char(c) => app.search_query.push(c),
        _ => return,
    }
    app.selected_user_index = 0;
    apply_search(app);
}

/// Carry out a command, awaiting any backend calls it needs.
pub async fn execute(app: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => app.should_quit = true,
        Command::Refresh => {
            app.controller.refresh().await;
            apply_search(app);
        }
        Command::Export => {
            let users = app.controller.users().to_vec();
            app.exporter.export(&users, &mut app.controller.notices);
        }
        Command::Navigate(route) => navigate(app, route).await,
        Command::SubmitForm => {
            let Some(mut form) = app.form.take() else { return };
            let outcome = form.submit(&mut app.controller).await;
            if outcome == FormOutcome::Saved {
                show_list(app);
            } else {
                app.form = Some(form);
            }
        }
        Command::ResolvePending => {
            let Some((action, decision)) = app.pending.take() else { return };
            match action {
                PendingAction::DeleteUser { id, return_to_list } => {
                    let outcome = app.controller.remove(&id, decision).await;
                    if outcome == RemoveOutcome::Deleted && return_to_list {
                        show_list(app);
                    }
                    apply_search(app);
                }
            }
        }
    }
}

/// Switch screens, loading whatever the target screen needs.
///
/// A record that can't be loaded sends the user back to the list.
pub async fn navigate(app: &mut AppState, route: Route) {
    info!(to = %route.path(), "navigate");
    app.detail = None;
    app.form = None;
    app.modal = None;
    app.input_mode = InputMode::Normal;
    match route {
        Route::Home => app.route = Route::Home,
        Route::Users => show_list(app),
        Route::AddUser => {
            app.form = Some(UserForm::new_user());
            app.input_mode = InputMode::Form;
            app.route = Route::AddUser;
        }
        Route::EditUser(id) => match app.controller.load_user(&id, "Failed to fetch user details for editing.").await {
            Ok(user) => {
                app.form = Some(UserForm::edit(&user));
                app.input_mode = InputMode::Form;
                app.route = Route::EditUser(id);
            }
            Err(_) => show_list(app),
        },
        Route::UserDetail(id) => match app.controller.load_user(&id, "Failed to fetch user details.").await {
            Ok(user) => {
                app.detail = Some(user);
                app.route = Route::UserDetail(id);
            }
            Err(_) => show_list(app),
        },
    }
}

fn show_list(app: &mut AppState) {
    app.detail = None;
    app.form = None;
    app.input_mode = InputMode::Normal;
    app.route = Route::Users;
    apply_search(app);
}
