//! Add/edit form state and submission.
//!
//! The form is the only place field values are edited. Submission validates
//! first; a failed check produces a warning and no request.
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::controller::Controller;
use crate::model::{Field, User, UserFields};
use crate::validate::validate;

/// Row index of the submit button, after the eight fields.
pub const SUBMIT_ROW: usize = Field::ALL.len();

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormOutcome {
    /// Validation failed; nothing was sent.
    Invalid,
    /// The backend rejected the save.
    Rejected,
    /// Saved and the list refreshed.
    Saved,
}

/// What a key press did to the form.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormKey {
    Edited,
    Submit,
    Cancel,
}

#[derive(Clone, Debug, Default)]
pub struct UserForm {
    pub fields: UserFields,
    /// 0..8 are fields, [`SUBMIT_ROW`] is the submit button.
    pub selected: usize,
    /// Set when editing an existing record.
    pub editing: Option<String>,
    pub submitting: bool,
}

impl UserForm {
    pub fn new_user() -> Self {
        Self::default()
    }

    pub fn edit(user: &User) -> Self {
        Self {
            fields: user.fields.clone(),
            selected: 0,
            editing: Some(user.id.clone()),
            submitting: false,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() { "Edit User Details" } else { "Add New User" }
    }

    pub fn submit_label(&self) -> &'static str {
        match (self.is_edit(), self.submitting) {
            (true, true) => "Updating...",
            (false, true) => "Submitting...",
            (true, false) => "Update Details",
            (false, false) => "Submit Details",
        }
    }

    pub fn selected_field(&self) -> Option<Field> {
        Field::ALL.get(self.selected).copied()
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % (SUBMIT_ROW + 1);
    }

    pub fn prev(&mut self) {
        self.selected = self.selected.checked_sub(1).unwrap_or(SUBMIT_ROW);
    }

    /// Apply a key press. Enter on a field moves on; Enter on the button submits.
    pub fn handle_key(&mut self, key: KeyEvent) -> FormKey {
        match key.code {
            KeyCode::Esc => return FormKey::Cancel,
            KeyCode::Tab | KeyCode::Down => self.next(),
            KeyCode::BackTab | KeyCode::Up => self.prev(),
            KeyCode::Enter => {
                if self.selected == SUBMIT_ROW || key.modifiers.contains(KeyModifiers::CONTROL) {
                    return FormKey::Submit;
                }
                self.next();
            }
            KeyCode::Backspace => {
                if let Some(f) = self.selected_field() {
                    self.fields.get_mut(f).pop();
                }
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return FormKey::Submit;
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(f) = self.selected_field() {
                    self.fields.get_mut(f).push(c);
                }
            }
            _ => {}
        }
        FormKey::Edited
    }

    /// Validate, then create or update through the controller.
    pub async fn submit(&mut self, controller: &mut Controller) -> FormOutcome {
        if let Err(e) = validate(&self.fields) {
            self.submitting = false;
            tracing::debug!(error = %e, "form rejected before submit");
            controller.notices.warn(e.to_string());
            return FormOutcome::Invalid;
        }
        self.submitting = true;
        let ok = controller.submit(&self.fields, self.editing.as_deref()).await;
        self.submitting = false;
        if ok { FormOutcome::Saved } else { FormOutcome::Rejected }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_goes_to_selected_field() {
        let mut form = UserForm::new_user();
        for c in "Ali".chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Char('R')));
        form.handle_key(key(KeyCode::Char('x')));
        form.handle_key(key(KeyCode::Backspace));
        assert_eq!(form.fields.name, "Ali");
        assert_eq!(form.fields.father_name, "R");
    }

    #[test]
    fn enter_submits_only_on_button() {
        let mut form = UserForm::new_user();
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormKey::Edited);
        assert_eq!(form.selected, 1);
        form.handle_key(key(KeyCode::Up));
        form.handle_key(key(KeyCode::Up));
        assert_eq!(form.selected, SUBMIT_ROW);
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormKey::Submit);
    }

    #[tokio::test]
    async fn failed_validation_clears_submitting() {
        struct Unreachable;
        #[async_trait::async_trait]
        impl crate::api::UserGateway for Unreachable {
            async fn list_users(&self) -> crate::Result<Vec<User>> {
                unreachable!()
            }
            async fn get_user(&self, _: &str) -> crate::Result<User> {
                unreachable!()
            }
            async fn create_user(&self, _: &UserFields) -> crate::Result<Option<User>> {
                unreachable!()
            }
            async fn update_user(&self, _: &str, _: &UserFields) -> crate::Result<Option<User>> {
                unreachable!()
            }
            async fn delete_user(&self, _: &str) -> crate::Result<bool> {
                unreachable!()
            }
        }
        let mut controller = Controller::new(Box::new(Unreachable));
        let mut form = UserForm::new_user();
        form.submitting = true;
        assert_eq!(form.submit(&mut controller).await, FormOutcome::Invalid);
        assert!(!form.submitting);
        assert_eq!(form.submit_label(), "Submit Details");
    }

    #[test]
    fn labels_follow_mode() {
        let user = User { id: "1".into(), fields: UserFields::default() };
        let mut form = UserForm::edit(&user);
        assert_eq!(form.title(), "Edit User Details");
        form.submitting = true;
        assert_eq!(form.submit_label(), "Updating...");
        assert_eq!(UserForm::new_user().submit_label(), "Submit Details");
    }
}
