//! Remote data gateway for the users REST API.
//!
//! One request per call, no retries, no timeouts. Non-2xx responses become
//! [`AppError::Http`] with the status and whatever body the backend sent.
//!
pub mod wire;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::model::{User, UserFields};
use wire::{DeleteAck, WireUser};

/// Operations the controller needs from the backend.
#[async_trait]
pub trait UserGateway: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>>;
    async fn get_user(&self, id: &str) -> Result<User>;
    /// `None` when the backend acknowledged the save without echoing a record.
    async fn create_user(&self, fields: &UserFields) -> Result<Option<User>>;
    async fn update_user(&self, id: &str, fields: &UserFields) -> Result<Option<User>>;
    async fn delete_user(&self, id: &str) -> Result<bool>;
}

/// `reqwest`-backed gateway rooted at the configured server URL.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/api/users", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/api/users/{}", self.base_url, id)
    }
}

#[async_trait]
impl UserGateway for HttpGateway {
    async fn list_users(&self) -> Result<Vec<User>> {
        // Trailing slash matches the backend's list route.
        let url = format!("{}/", self.collection_url());
        debug!(%url, "GET users");
        let resp = self.client.get(&url).send().await.inspect_err(|e| {
            warn!(error = %e, "list_users request failed");
        })?;
        let users: Vec<WireUser> = read_json(resp, "list_users").await?;
        Ok(users.into_iter().map(User::from).collect())
    }

    async fn get_user(&self, id: &str) -> Result<User> {
        let url = self.item_url(id);
        debug!(%url, "GET user");
        let resp = self.client.get(&url).send().await.inspect_err(|e| {
            warn!(error = %e, id, "get_user request failed");
        })?;
        let user: WireUser = read_json(resp, "get_user").await?;
        Ok(user.into())
    }

    async fn create_user(&self, fields: &UserFields) -> Result<Option<User>> {
        let url = self.collection_url();
        debug!(%url, "POST user");
        let resp = self.client.post(&url).json(fields).send().await.inspect_err(|e| {
            warn!(error = %e, "create_user request failed");
        })?;
        read_saved(resp, "create_user").await
    }

    async fn update_user(&self, id: &str, fields: &UserFields) -> Result<Option<User>> {
        let url = self.item_url(id);
        debug!(%url, "PUT user");
        let resp = self.client.put(&url).json(fields).send().await.inspect_err(|e| {
            warn!(error = %e, id, "update_user request failed");
        })?;
        read_saved(resp, "update_user").await
    }

    async fn delete_user(&self, id: &str) -> Result<bool> {
        let url = self.item_url(id);
        debug!(%url, "DELETE user");
        let resp = self.client.delete(&url).send().await.inspect_err(|e| {
            warn!(error = %e, id, "delete_user request failed");
        })?;
        let resp = check_status(resp, "delete_user").await?;
        if resp.status() == StatusCode::NO_CONTENT {
            return Ok(true);
        }
        let body = resp.text().await?;
        if body.trim().is_empty() {
            return Ok(true);
        }
        let ack: DeleteAck = serde_json::from_str(&body).unwrap_or_default();
        Ok(ack.success.unwrap_or(true))
    }
}

/// Turn a non-2xx response into [`AppError::Http`]; pass successes through.
async fn check_status(resp: Response, op: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    let err = http_error(status, &text);
    warn!(op, status = status.as_u16(), error = %err, "backend returned an error");
    Err(err)
}

/// Build the error for a failed response body.
///
/// A JSON body supplies `message` when it has one; a JSON body without it
/// gets the generic status text. A non-JSON body falls back to the reason
/// phrase.
pub(crate) fn http_error(status: StatusCode, body: &str) -> AppError {
    let generic = format!("HTTP error! status: {}", status.as_u16());
    let data = serde_json::from_str::<serde_json::Value>(body).ok();
    let message = match &data {
        Some(v) => v
            .get("message")
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or(generic),
        None => status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or(generic),
    };
    AppError::Http { status: status.as_u16(), message, data }
}

async fn read_json<T: DeserializeOwned>(resp: Response, op: &str) -> Result<T> {
    let resp = check_status(resp, op).await?;
    if resp.status() == StatusCode::NO_CONTENT {
        return Err(AppError::Decode(format!("{op}: empty response")));
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| {
        warn!(op, error = %e, "response body did not decode");
        AppError::Decode(format!("{op}: {e}"))
    })
}

/// Body of a successful create or update.
///
/// Any 2xx means the record was saved. A 204, an empty body, or a body that
/// isn't a user (`{"message": "..."}`) is an acknowledgement without a record.
async fn read_saved(resp: Response, op: &str) -> Result<Option<User>> {
    let resp = check_status(resp, op).await?;
    if resp.status() == StatusCode::NO_CONTENT {
        return Ok(None);
    }
    let bytes = resp.bytes().await?;
    Ok(saved_user(&bytes, op))
}

fn saved_user(body: &[u8], op: &str) -> Option<User> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice::<WireUser>(body) {
        Ok(user) => Some(user.into()),
        Err(e) => {
            debug!(op, error = %e, "save acknowledged without a user record");
            None
        }
    }
}
