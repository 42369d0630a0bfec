//! Application state types and entry glue.
//!
//! Defines the route model, the TUI state, theming, and config-file lookup,
//! and re-exports the event loop as `run`.
//!
pub mod confirm;
pub mod form;
pub mod keymap;
pub mod notify;
pub mod update;

use std::path::{Path, PathBuf};

use ratatui::style::Color;

use crate::controller::Controller;
use crate::export::Exporter;
use crate::model::User;
use confirm::{ConfirmDialog, Decision};
use form::UserForm;
use keymap::Keymap;

/// Client routes. `parse` and `path` are inverses for well-formed paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Home,
    /// `/users`
    Users,
    /// `/users/add`
    AddUser,
    /// `/users/edit/{id}`
    EditUser(String),
    /// `/users/{id}`
    UserDetail(String),
}

impl Route {
    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Some(Route::Home),
            ["users"] => Some(Route::Users),
            ["users", "add"] => Some(Route::AddUser),
            ["users", "edit", id] => Some(Route::EditUser((*id).to_string())),
            ["users", id] => Some(Route::UserDetail((*id).to_string())),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Users => "/users".to_string(),
            Route::AddUser => "/users/add".to_string(),
            Route::EditUser(id) => format!("/users/edit/{id}"),
            Route::UserDetail(id) => format!("/users/{id}"),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Users => "View Users",
            Route::AddUser => "Add User",
            Route::EditUser(_) => "Edit User",
            Route::UserDetail(_) => "User Details",
        }
    }
}

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Form,
    Modal,
}

/// What the list screen should show.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ListView {
    /// Backend has no users: show the add-user call to action.
    Empty,
    /// Users exist but none match the search.
    NoMatches,
    Rows,
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
}

impl Theme {
    /// Slate and sky palette.
    pub fn slate() -> Self {
        Self {
            text: Color::Rgb(0xf1, 0xf5, 0xf9),         // slate-100
            muted: Color::Rgb(0x94, 0xa3, 0xb8),        // slate-400
            title: Color::Rgb(0x38, 0xbd, 0xf8),        // sky-400
            border: Color::Rgb(0x47, 0x55, 0x69),       // slate-600
            header_bg: Color::Rgb(0x1e, 0x29, 0x3b),    // slate-800
            header_fg: Color::Rgb(0x38, 0xbd, 0xf8),
            status_bg: Color::Rgb(0x33, 0x41, 0x55),    // slate-700
            status_fg: Color::Rgb(0xcb, 0xd5, 0xe1),    // slate-300
            highlight_fg: Color::Rgb(0x0f, 0x17, 0x2a), // slate-900
            highlight_bg: Color::Rgb(0x0e, 0xa5, 0xe9), // sky-500
            accent: Color::Rgb(0x0e, 0xa5, 0xe9),
            success: Color::Rgb(0x22, 0xc5, 0x5e),
            warning: Color::Rgb(0xea, 0xb3, 0x08),
            danger: Color::Rgb(0xef, 0x44, 0x44),
        }
    }

    /// Config keys paired with their slots, in file order.
    fn slots(&mut self) -> [(&'static str, &mut Color); 14] {
        [
            ("text", &mut self.text),
            ("muted", &mut self.muted),
            ("title", &mut self.title),
            ("border", &mut self.border),
            ("header_bg", &mut self.header_bg),
            ("header_fg", &mut self.header_fg),
            ("status_bg", &mut self.status_bg),
            ("status_fg", &mut self.status_fg),
            ("highlight_fg", &mut self.highlight_fg),
            ("highlight_bg", &mut self.highlight_bg),
            ("accent", &mut self.accent),
            ("success", &mut self.success),
            ("warning", &mut self.warning),
            ("danger", &mut self.danger),
        ]
    }

    /// Parse `key = value` lines over the `slate` defaults. Unknown keys are ignored.
    pub fn parse(contents: &str) -> Self {
        let mut theme = Self::slate();
        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else { continue };
            let Some(color) = Self::parse_color(val) else { continue };
            let key = key.trim();
            if let Some((_, slot)) = theme.slots().into_iter().find(|(k, _)| *k == key) {
                *slot = color;
            }
        }
        theme
    }

    pub fn from_file(path: &Path) -> Option<Self> {
        std::fs::read_to_string(path).ok().map(|c| Self::parse(&c))
    }

    /// Parse `#RRGGBB`, `RRGGBB`, or `reset`.
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = lower.strip_prefix('#').unwrap_or(&lower);
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    fn color_to_str(c: Color) -> String {
        match c {
            Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
            Color::Black => "#000000".to_string(),
            Color::White => "#FFFFFF".to_string(),
            Color::Gray => "#B3B3B3".to_string(),
            Color::DarkGray => "#4D4D4D".to_string(),
            _ => "reset".to_string(),
        }
    }

    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# uservault theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");
        let mut copy = *self;
        for (key, color) in copy.slots() {
            let _ = writeln!(&mut buf, "{} = {}", key, Self::color_to_str(*color));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, buf)
    }

    /// Load `path`, or write the defaults there if it doesn't exist yet.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_else(Self::slate);
        }
        let t = Self::slate();
        if let Err(e) = t.write_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not write default theme");
        }
        t
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::slate()
    }
}

/// Directory holding `theme.conf` and `keybinds.conf`.
///
/// Order: explicit override, `$XDG_CONFIG_HOME/uservault`,
/// `$HOME/.config/uservault`, then the working directory.
pub fn config_dir(explicit: Option<&Path>) -> PathBuf {
    let dir = explicit
        .map(Path::to_path_buf)
        .or_else(|| {
            std::env::var_os("XDG_CONFIG_HOME")
                .filter(|v| !v.is_empty())
                .map(|v| PathBuf::from(v).join("uservault"))
        })
        .or_else(|| {
            std::env::var_os("HOME")
                .filter(|v| !v.is_empty())
                .map(|v| PathBuf::from(v).join(".config").join("uservault"))
        })
        .unwrap_or_else(|| PathBuf::from("."));
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!(dir = %dir.display(), error = %e, "falling back to working directory for config");
        return PathBuf::from(".");
    }
    dir
}

/// Modal overlays.
#[derive(Debug)]
pub enum ModalState {
    Confirm(ConfirmDialog),
    Help,
}

/// Work deferred until a confirmation dialog resolves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingAction {
    DeleteUser {
        id: String,
        /// Go to the list afterwards (delete started from the detail screen).
        return_to_list: bool,
    },
}

pub struct AppState {
    pub controller: Controller,
    pub exporter: Exporter,
    pub route: Route,
    /// Indices into the controller's list that pass the current search.
    pub visible: Vec<usize>,
    /// Index into `visible`.
    pub selected_user_index: usize,
    pub rows_per_page: usize,
    pub input_mode: InputMode,
    pub search_query: String,
    pub theme: Theme,
    pub keymap: Keymap,
    pub modal: Option<ModalState>,
    pub form: Option<UserForm>,
    pub detail: Option<User>,
    pub pending: Option<(PendingAction, Decision)>,
    /// Label shown while a command is awaiting the backend.
    pub busy: Option<&'static str>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(controller: Controller, exporter: Exporter, theme: Theme, keymap: Keymap) -> Self {
        Self {
            controller,
            exporter,
            route: Route::Home,
            visible: Vec::new(),
            selected_user_index: 0,
            rows_per_page: 10,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            theme,
            keymap,
            modal: None,
            form: None,
            detail: None,
            pending: None,
            busy: None,
            should_quit: false,
        }
    }

    /// The user under the list cursor, after search filtering.
    pub fn selected_user(&self) -> Option<&User> {
        self.visible
            .get(self.selected_user_index)
            .and_then(|i| self.controller.users().get(*i))
    }

    pub fn visible_users(&self) -> impl Iterator<Item = &User> {
        let users = self.controller.users();
        self.visible.iter().filter_map(move |i| users.get(*i))
    }

    pub fn list_view(&self) -> ListView {
        if self.controller.users().is_empty() {
            ListView::Empty
        } else if self.visible.is_empty() {
            ListView::NoMatches
        } else {
            ListView::Rows
        }
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_parse_and_print() {
        for path in ["/", "/users", "/users/add", "/users/edit/abc", "/users/abc"] {
            let route = Route::parse(path).unwrap();
            assert_eq!(route.path(), path);
        }
        assert_eq!(Route::parse("/users/"), Some(Route::Users));
        assert_eq!(Route::parse("/users/add"), Some(Route::AddUser));
        assert_eq!(Route::parse("/users/42"), Some(Route::UserDetail("42".into())));
        assert_eq!(Route::parse("/groups"), None);
        assert_eq!(Route::parse("/users/edit/1/x"), None);
    }

    #[test]
    fn theme_parses_known_keys_and_skips_junk() {
        let t = Theme::parse("# c\naccent = #112233\ndanger=reset\nbogus = #000000\ntext = nothex\n");
        assert_eq!(t.accent, Color::Rgb(0x11, 0x22, 0x33));
        assert_eq!(t.danger, Color::Reset);
        assert_eq!(t.text, Theme::slate().text);
    }
}
