//! # Media
//!
//! Upload and fetch of binary attachments. No size limit, no content type
//! validation, no deduplication.

use chrono::Utc;

use super::errors::{ServiceError, ServiceResult};
use super::SocialService;
use crate::store::{media, Media, MediaId};

/// Uploaded file as received from the client
#[derive(Debug, Clone)]
pub struct NewMedia {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl NewMedia {
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data,
        }
    }
}

impl SocialService {
    /// Stores an upload and returns its id.
    pub fn upload_media(&self, api_key: &str, upload: NewMedia) -> ServiceResult<MediaId> {
        self.authorized(api_key, |conn, user| {
            let id = media::insert(
                conn,
                &upload.filename,
                &upload.content_type,
                &upload.data,
                Utc::now(),
            )?;
            tracing::info!(
                media_id = id,
                user_id = user.id,
                size = upload.data.len(),
                content_type = %upload.content_type,
                "media uploaded"
            );
            Ok(id)
        })
    }

    /// Loads a media row. No API key is needed.
    pub fn fetch_media(&self, id: MediaId) -> ServiceResult<Media> {
        self.store().transaction(|tx| {
            media::find(tx, id)?.ok_or_else(|| ServiceError::not_found("Media"))
        })
    }
}
