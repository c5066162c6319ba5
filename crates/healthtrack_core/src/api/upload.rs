//! Direct-to-CDN image upload.
//!
//! # Responsibility
//! - Push avatar images to the Cloudinary unsigned-upload endpoint.
//! - Recover asset ids from previously stored CDN URLs.

use std::time::Instant;

use log::{info, warn};
use serde::Deserialize;
use uuid::Uuid;

use super::{ApiError, ApiResult};

const DEFAULT_CLOUD_NAME: &str = "dpujkjzzh";
const DEFAULT_UPLOAD_PRESET: &str = "healthy-check-image";
const DEFAULT_FOLDER: &str = "healthy-check-image/avatar";

/// What the CDN reports back for a stored image.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadedImage {
    #[serde(default)]
    pub secure_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub public_id: Option<String>,
    #[serde(default)]
    pub version: Option<u64>,
}

impl UploadedImage {
    /// Preferred display URL, favoring the TLS variant.
    pub fn best_url(&self) -> Option<&str> {
        self.secure_url.as_deref().or(self.url.as_deref())
    }
}

/// Unsigned uploader bound to one cloud, preset, and target folder.
#[derive(Debug, Clone)]
pub struct ImageUploader {
    cloud_name: String,
    upload_preset: String,
    folder: String,
}

impl Default for ImageUploader {
    fn default() -> Self {
        Self {
            cloud_name: DEFAULT_CLOUD_NAME.to_string(),
            upload_preset: DEFAULT_UPLOAD_PRESET.to_string(),
            folder: DEFAULT_FOLDER.to_string(),
        }
    }
}

impl ImageUploader {
    pub fn new(
        cloud_name: impl Into<String>,
        upload_preset: impl Into<String>,
        folder: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            upload_preset: upload_preset.into(),
            folder: folder.into(),
        }
    }

    /// Uploads one image and returns the CDN's record of it.
    ///
    /// # Contract
    /// - `file_name` must be non-empty; its extension drives the content type.
    /// - The upload preset must allow unsigned uploads, the endpoint takes no
    ///   credentials.
    pub fn upload(&self, file_name: &str, bytes: &[u8]) -> ApiResult<UploadedImage> {
        let file_name = file_name.trim();
        if file_name.is_empty() {
            return Err(ApiError::Validation("file name cannot be empty".to_string()));
        }
        if bytes.is_empty() {
            return Err(ApiError::Validation("image payload is empty".to_string()));
        }

        let url = format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.cloud_name
        );
        let boundary = format!("healthtrack-{}", Uuid::new_v4().simple());
        let body = build_multipart(
            &boundary,
            file_name,
            &content_type_for(file_name),
            bytes,
            &self.upload_preset,
            &self.folder,
        );

        let started_at = Instant::now();
        let response = match ureq::post(&url)
            .set(
                "Content-Type",
                &format!("multipart/form-data; boundary={boundary}"),
            )
            .set("Accept", "application/json")
            .send_bytes(&body)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                warn!(
                    "event=image_upload module=api status=error code={} duration_ms={}",
                    code,
                    started_at.elapsed().as_millis()
                );
                let message = super::status_message(response);
                return Err(ApiError::Status { code, message });
            }
            Err(err) => {
                warn!("event=image_upload module=api status=error error=transport");
                return Err(ApiError::Transport(err.to_string()));
            }
        };

        let uploaded = response
            .into_json::<UploadedImage>()
            .map_err(|err| ApiError::InvalidResponse(err.to_string()))?;
        info!(
            "event=image_upload module=api status=ok bytes={} duration_ms={}",
            bytes.len(),
            started_at.elapsed().as_millis()
        );
        Ok(uploaded)
    }
}

/// Recovers the CDN asset id from a delivery URL.
///
/// Delivery URLs look like
/// `https://res.cloudinary.com/<cloud>/image/upload/v<version>/<folder>/<id>.<ext>`.
/// The optional version segment and the extension are dropped; only the final
/// path segment is treated as the id.
pub fn public_id_from_url(url: &str) -> Option<String> {
    let mut segments = url.split('/');
    segments.by_ref().find(|segment| *segment == "upload")?;

    let mut rest: Vec<&str> = segments.collect();
    if rest.first().is_some_and(|seg| is_version_segment(seg)) {
        rest.remove(0);
    }

    let last = rest.last()?;
    let without_ext = match last.rfind('.') {
        Some(dot) if dot > 0 => &last[..dot],
        _ => last,
    };
    if without_ext.is_empty() {
        return None;
    }
    Some(without_ext.to_string())
}

fn is_version_segment(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .and_then(|rest| rest.chars().next())
        .is_some_and(|first| first.is_ascii_digit())
}

fn content_type_for(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!("image/{}", ext.to_ascii_lowercase()),
        _ => "application/octet-stream".to_string(),
    }
}

fn build_multipart(
    boundary: &str,
    file_name: &str,
    content_type: &str,
    bytes: &[u8],
    upload_preset: &str,
    folder: &str,
) -> Vec<u8> {
    let mut body = Vec::with_capacity(bytes.len() + 512);
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(
        format!(
            "\r\n--{boundary}\r\nContent-Disposition: form-data; \
             name=\"upload_preset\"\r\n\r\n{upload_preset}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; \
             name=\"folder\"\r\n\r\n{folder}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}
