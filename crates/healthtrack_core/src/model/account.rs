//! Logged-in account record.
//!
//! Mirrors the session object the app keeps on device after login. The
//! backend owns the canonical account; this record only carries what local
//! screens need between launches.

use serde::{Deserialize, Serialize};

/// Locally persisted account session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Backend account id, used in profile endpoint paths.
    #[serde(rename = "accountId")]
    pub account_id: String,
    pub username: String,
    pub email: String,
    /// Hosted avatar URL when one has been uploaded.
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
}

impl Account {
    pub fn new(
        account_id: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            username: username.into(),
            email: email.into(),
            image_url: None,
        }
    }
}
