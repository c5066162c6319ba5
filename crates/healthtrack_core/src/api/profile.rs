//! Profile picture endpoints under `/file-update/{accountId}/*`.

use log::info;
use serde::Deserialize;
use serde_json::json;

use super::{ApiClient, ApiError, ApiResult};

/// Payload for swapping the stored avatar reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUpdate {
    /// CDN URL of the freshly uploaded image.
    pub image_url: String,
    /// CDN asset id the backend may delete after the swap.
    pub old_public_id: Option<String>,
    /// CDN asset id of the new image.
    pub new_public_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AvatarResponse {
    #[serde(rename = "imageUrl", default)]
    image_url: Option<String>,
}

impl ApiClient {
    /// Records a new avatar URL for the account.
    ///
    /// Returns the URL the backend settled on, which falls back to the
    /// submitted one when the response omits `imageUrl`.
    pub fn update_avatar(&self, account_id: &str, update: &AvatarUpdate) -> ApiResult<String> {
        let account_id = require_account_id(account_id)?;

        let mut payload = json!({ "imageUrl": update.image_url });
        if let Some(old) = &update.old_public_id {
            payload["oldPublicId"] = json!(old);
        }
        if let Some(new) = &update.new_public_id {
            payload["newPublicId"] = json!(new);
        }

        let response =
            self.post_json(&format!("/file-update/{account_id}/update-avatar"), payload)?;
        let body = response
            .into_json::<AvatarResponse>()
            .map_err(|err| ApiError::InvalidResponse(err.to_string()))?;
        info!(
            "event=avatar_update module=api status=ok account_id={}",
            account_id
        );
        Ok(body.image_url.unwrap_or_else(|| update.image_url.clone()))
    }

    /// Asks the backend to drop a CDN asset that is no longer referenced.
    pub fn delete_avatar(&self, account_id: &str, public_id: &str) -> ApiResult<()> {
        let account_id = require_account_id(account_id)?;
        let public_id = public_id.trim();
        if public_id.is_empty() {
            return Err(ApiError::Validation("publicId cannot be empty".to_string()));
        }

        self.post_json(
            &format!("/file-update/{account_id}/delete-avatar"),
            json!({ "publicId": public_id }),
        )?;
        info!(
            "event=avatar_delete module=api status=ok account_id={}",
            account_id
        );
        Ok(())
    }
}

fn require_account_id(account_id: &str) -> ApiResult<&str> {
    let trimmed = account_id.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(
            "accountId cannot be empty".to_string(),
        ));
    }
    Ok(trimmed)
}
