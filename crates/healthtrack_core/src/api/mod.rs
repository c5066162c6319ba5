//! Backend API client for account flows.
//!
//! # Responsibility
//! - Talk to the HealthyCheck backend over blocking HTTP.
//! - Map transport, status, and decode failures into [`ApiError`].
//!
//! # Invariants
//! - Request and response payloads keep the backend's camelCase key names.
//! - Log lines carry endpoint paths and status codes, never credentials.
//!
//! # See also
//! - docs/architecture/persistence.md

pub mod auth;
pub mod profile;
pub mod upload;

use std::fmt;
use std::time::Instant;

use log::{debug, warn};
use serde::Deserialize;

pub use auth::{RegisterOutcome, UsernameStatus};
pub use upload::{public_id_from_url, ImageUploader, UploadedImage};

/// Fallback backend base used when no override is configured.
pub const DEFAULT_API_BASE: &str = "https://api.healthycheck.vn";

/// Environment variable overriding the backend base URL.
pub const API_BASE_ENV: &str = "HEALTHTRACK_API_BASE";

/// Result alias for backend calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the backend client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Input rejected locally before any request was sent.
    Validation(String),
    /// Server answered with a non-success status.
    Status { code: u16, message: String },
    /// Request never produced an HTTP response.
    Transport(String),
    /// Response arrived but the body was not the expected shape.
    InvalidResponse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(message) => write!(f, "invalid request: {message}"),
            ApiError::Status { code, message } => {
                write!(f, "server returned {code}: {message}")
            }
            ApiError::Transport(message) => write!(f, "request failed: {message}"),
            ApiError::InvalidResponse(message) => {
                write!(f, "unexpected response: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Envelope the backend uses for human-readable outcomes.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ServerMessage {
    #[serde(default)]
    pub message: Option<String>,
}

/// Blocking client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: String,
}

impl ApiClient {
    /// Builds a client from the environment, falling back to the default base.
    pub fn from_env() -> Self {
        let base = std::env::var(API_BASE_ENV)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Self::with_base(base)
    }

    /// Builds a client against an explicit base URL.
    pub fn with_base(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// POSTs a JSON payload and maps every failure mode into [`ApiError`].
    pub(crate) fn post_json(
        &self,
        path: &str,
        payload: serde_json::Value,
    ) -> ApiResult<ureq::Response> {
        let url = self.endpoint(path);
        let started_at = Instant::now();

        match ureq::post(&url).send_json(payload) {
            Ok(response) => {
                debug!(
                    "event=api_call module=api status=ok path={} code={} duration_ms={}",
                    path,
                    response.status(),
                    started_at.elapsed().as_millis()
                );
                Ok(response)
            }
            Err(ureq::Error::Status(code, response)) => {
                let message = status_message(response);
                warn!(
                    "event=api_call module=api status=error path={} code={} duration_ms={}",
                    path,
                    code,
                    started_at.elapsed().as_millis()
                );
                Err(ApiError::Status { code, message })
            }
            Err(err) => {
                warn!(
                    "event=api_call module=api status=error path={} error=transport duration_ms={}",
                    path,
                    started_at.elapsed().as_millis()
                );
                Err(ApiError::Transport(err.to_string()))
            }
        }
    }
}

/// Pulls the server's `message` field out of an error response body.
///
/// Bodies that are not JSON, or carry no message, fall back to a generic text.
pub(crate) fn status_message(response: ureq::Response) -> String {
    let code = response.status();
    response
        .into_json::<ServerMessage>()
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| format!("request rejected with status {code}"))
}
