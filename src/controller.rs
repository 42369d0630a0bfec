//! Application state controller: the in-memory user list and the operations
//! that change it.
//!
//! After every mutation the list is reloaded from the backend in full, so the
//! list on screen is always the server's view as of the last successful
//! refresh, never a locally patched one.
use std::future::Future;

use tracing::{info, instrument};

use crate::api::UserGateway;
use crate::app::notify::Notifications;
use crate::error::Result;
use crate::model::{User, UserFields};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RemoveOutcome {
    Cancelled,
    Deleted,
    Failed,
}

pub struct Controller {
    gateway: Box<dyn UserGateway>,
    users: Vec<User>,
    is_loading: bool,
    pub notices: Notifications,
}

impl Controller {
    pub fn new(gateway: Box<dyn UserGateway>) -> Self {
        Self {
            gateway,
            users: Vec::new(),
            is_loading: false,
            notices: Notifications::new(),
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn find(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Reload the full list. Loading is cleared whether or not the fetch succeeds.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) {
        self.is_loading = true;
        self.reload().await;
        self.is_loading = false;
    }

    async fn reload(&mut self) {
        match self.gateway.list_users().await {
            Ok(users) => {
                info!(count = users.len(), "user list refreshed");
                self.users = users;
            }
            Err(e) => self.notices.error(e.user_message("Failed to fetch users.")),
        }
    }

    /// Create a user, or replace `existing_id` in full. Returns `true` on success.
    ///
    /// The follow-up refresh runs inside the loading bracket, so loading only
    /// clears once the reloaded list is in place.
    #[instrument(skip(self, fields))]
    pub async fn submit(&mut self, fields: &UserFields, existing_id: Option<&str>) -> bool {
        self.is_loading = true;
        let result = match existing_id {
            Some(id) => self.gateway.update_user(id, fields).await,
            None => self.gateway.create_user(fields).await,
        };
        let ok = match result {
            Ok(saved) => {
                let id = saved.as_ref().map(|u| u.id.as_str()).or(existing_id).unwrap_or("-");
                info!(id, updated = existing_id.is_some(), "user saved");
                if existing_id.is_some() {
                    self.notices.success("User details updated successfully!");
                } else {
                    self.notices.success("User data submitted successfully!");
                }
                self.reload().await;
                true
            }
            Err(e) => {
                let fallback = if existing_id.is_some() {
                    "Failed to update user."
                } else {
                    "Failed to add user."
                };
                self.notices.error(e.user_message(fallback));
                false
            }
        };
        self.is_loading = false;
        ok
    }

    /// Delete `id` once `decision` resolves to `true`.
    ///
    /// A cancelled decision issues no request and leaves the list as is.
    #[instrument(skip(self, decision))]
    pub async fn remove<D>(&mut self, id: &str, decision: D) -> RemoveOutcome
    where
        D: Future<Output = bool>,
    {
        if !decision.await {
            info!(id, "delete cancelled");
            return RemoveOutcome::Cancelled;
        }
        self.is_loading = true;
        let outcome = match self.gateway.delete_user(id).await {
            Ok(_) => {
                info!(id, "user deleted");
                self.notices.success("User deleted successfully!");
                self.reload().await;
                RemoveOutcome::Deleted
            }
            Err(e) => {
                self.notices.error(e.user_message("Failed to delete user."));
                RemoveOutcome::Failed
            }
        };
        self.is_loading = false;
        outcome
    }

    /// Fetch a single record for the detail and edit screens.
    ///
    /// Failures are surfaced here with `fallback` when the error has no text
    /// of its own; the caller decides where to navigate.
    #[instrument(skip(self, fallback))]
    pub async fn load_user(&mut self, id: &str, fallback: &str) -> Result<User> {
        self.is_loading = true;
        let result = self.gateway.get_user(id).await;
        self.is_loading = false;
        if let Err(e) = &result {
            self.notices.error(e.user_message(fallback));
        }
        result
    }
}
