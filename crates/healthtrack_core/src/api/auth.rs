//! Registration and password-reset flows.
//!
//! # Responsibility
//! - Drive the email-code sign-up handshake against `/auth/*`.
//! - Enforce local input guards before any request leaves the device.

use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;

use super::{ApiClient, ApiError, ApiResult, ServerMessage};
use crate::model::account::Account;

static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{6}$").expect("valid code regex"));

/// Whether a username is free to register.
///
/// The backend signals "taken" with HTTP 409 rather than a body flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameStatus {
    Available,
    Taken { message: String },
}

impl UsernameStatus {
    pub fn is_taken(&self) -> bool {
        matches!(self, UsernameStatus::Taken { .. })
    }
}

impl ApiClient {
    /// Asks the backend whether `username` is already registered.
    ///
    /// # Contract
    /// - HTTP 2xx means the name is available.
    /// - HTTP 409 means it is taken; the body message is preserved.
    /// - Any other status is an [`ApiError::Status`].
    pub fn check_username(&self, username: &str) -> ApiResult<UsernameStatus> {
        let username = non_empty(username, "username")?;

        match self.post_json("/auth/check-username", json!({ "username": username })) {
            Ok(_) => Ok(UsernameStatus::Available),
            Err(ApiError::Status { code: 409, message }) => {
                Ok(UsernameStatus::Taken { message })
            }
            Err(err) => Err(err),
        }
    }

    /// Requests a six-digit confirmation code for a new registration.
    pub fn send_code(&self, email: &str) -> ApiResult<String> {
        let email = non_empty(email, "email")?;
        let response = self.post_json("/auth/send-code", json!({ "email": email }))?;
        info!("event=auth_send_code module=api status=ok");
        Ok(ack_message(response, "Code sent."))
    }

    /// Confirms the emailed code and creates the account.
    ///
    /// # Contract
    /// - `code` must be exactly six digits; anything else fails locally.
    /// - The backend may or may not echo the created account in the body;
    ///   callers persist it through the session store only when present.
    pub fn verify_register(
        &self,
        email: &str,
        password: &str,
        code: &str,
    ) -> ApiResult<RegisterOutcome> {
        let email = non_empty(email, "email")?;
        let password = non_empty(password, "password")?;
        let code = code.trim();
        if !CODE_RE.is_match(code) {
            return Err(ApiError::Validation(
                "confirmation code must be 6 digits".to_string(),
            ));
        }

        let response = self.post_json(
            "/auth/verify-register",
            json!({ "email": email, "password": password, "code": code }),
        )?;

        let body = response
            .into_json::<RegisterResponse>()
            .map_err(|err| ApiError::InvalidResponse(err.to_string()))?;
        info!("event=auth_register module=api status=ok");
        Ok(RegisterOutcome {
            message: body
                .message
                .unwrap_or_else(|| "Registration successful.".to_string()),
            account: body.account,
        })
    }

    /// Requests a password-reset code for an existing account.
    ///
    /// # Contract
    /// - The account must exist; `check_username` reporting 409 is the
    ///   existence signal callers use before invoking this.
    pub fn forgot_password(&self, email: &str) -> ApiResult<String> {
        let email = non_empty(email, "email")?;
        let response = self.post_json("/auth/forgot-password", json!({ "email": email }))?;
        info!("event=auth_forgot_password module=api status=ok");
        Ok(ack_message(response, "Reset code sent."))
    }

    /// Sets a new password, verified by the emailed reset code.
    pub fn reset_password(
        &self,
        email: &str,
        new_password: &str,
        code: &str,
    ) -> ApiResult<String> {
        let email = non_empty(email, "email")?;
        let new_password = non_empty(new_password, "newPassword")?;
        let code = code.trim();
        if !CODE_RE.is_match(code) {
            return Err(ApiError::Validation(
                "reset code must be 6 digits".to_string(),
            ));
        }

        let response = self.post_json(
            "/auth/reset-password",
            json!({ "email": email, "newPassword": new_password, "code": code }),
        )?;
        info!("event=auth_reset_password module=api status=ok");
        Ok(ack_message(response, "Password reset successful."))
    }
}

/// What a successful registration produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterOutcome {
    /// Human-readable acknowledgement from the backend.
    pub message: String,
    /// Created account, when the backend echoes it back.
    pub account: Option<Account>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct RegisterResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    account: Option<Account>,
}

fn non_empty<'a>(value: &'a str, field: &str) -> ApiResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed)
}

fn ack_message(response: ureq::Response, fallback: &str) -> String {
    response
        .into_json::<ServerMessage>()
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| fallback.to_string())
}
