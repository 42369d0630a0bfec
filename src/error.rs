//! Error and result types shared across the crate.
//!
//! Every failure the client can hit is one of these variants. None of them is
//! fatal: the controller turns them into notifications and the UI returns to
//! a stable screen.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Backend answered with a non-2xx status.
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        /// Parsed JSON body, when the backend sent one.
        data: Option<serde_json::Value>,
    },
    /// The request could not complete (DNS, refused connection, broken body).
    #[error("network error: {0}")]
    Network(String),
    /// Client-side check failed before any request was made.
    #[error("{0}")]
    Validation(#[from] crate::validate::ValidationError),
    /// A success response whose body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// The document renderer failed while building the report.
    #[error("render failed: {0}")]
    Render(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// HTTP status carried by the error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `message` field of the response payload, if any.
    ///
    /// This is the most specific text the backend can give us, so callers
    /// prefer it over the error's own display string.
    pub fn payload_message(&self) -> Option<&str> {
        match self {
            AppError::Http { data: Some(data), .. } => data
                .get("message")
                .and_then(|m| m.as_str())
                .filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// Best user-facing message: payload message, then the error text, then `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        if let Some(m) = self.payload_message() {
            return m.to_string();
        }
        let own = self.to_string();
        if own.trim().is_empty() { fallback.to_string() } else { own }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AppError::Decode(e.to_string())
        } else {
            AppError::Network(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_message_wins_over_status_text() {
        let err = AppError::Http {
            status: 409,
            message: "Conflict".into(),
            data: Some(serde_json::json!({ "message": "CNIC already registered" })),
        };
        assert_eq!(err.user_message("Failed to add user."), "CNIC already registered");
    }

    #[test]
    fn empty_message_falls_back() {
        let err = AppError::Http { status: 500, message: String::new(), data: None };
        assert_eq!(err.user_message("Failed to add user."), "Failed to add user.");
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_not_found());
    }
}
