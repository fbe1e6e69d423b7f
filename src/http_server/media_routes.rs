//! Media HTTP Routes
//!
//! Multipart upload and raw download of attachments.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Json, Multipart, State},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        HeaderMap, HeaderValue, StatusCode,
    },
    routing::{get, post},
    Router,
};

use super::errors::{ApiError, ApiResult};
use super::extract::{ApiKey, PathId};
use super::response::MediaCreatedResponse;
use super::state::AppState;
use crate::service::NewMedia;

/// Multipart field name clients are expected to use
pub const FILE_FIELD: &str = "file";

const DEFAULT_FILENAME: &str = "unnamed";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Media routes with shared state
pub fn media_routes(state: Arc<AppState>) -> Router {
    Router::new()
        // uploads are not size limited
        .route(
            "/medias",
            post(upload_media_handler).layer(DefaultBodyLimit::disable()),
        )
        .route("/medias/:id", get(download_media_handler))
        .with_state(state)
}

/// Stores the first field named `file`, or the first field carrying a
/// filename.
async fn upload_media_handler(
    State(state): State<Arc<AppState>>,
    ApiKey(key): ApiKey,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<(StatusCode, Json<MediaCreatedResponse>)> {
    let mut multipart = multipart.map_err(|e| ApiError::InvalidBody(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidBody(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) && field.file_name().is_none() {
            continue;
        }

        let filename = field.file_name().unwrap_or(DEFAULT_FILENAME).to_string();
        let content_type = field.content_type().unwrap_or(DEFAULT_CONTENT_TYPE).to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidBody(e.body_text()))?;

        let upload = NewMedia::new(filename, content_type, data.to_vec());
        let media_id = state
            .run(move |service| service.upload_media(&key, upload))
            .await?;
        return Ok((StatusCode::CREATED, Json(MediaCreatedResponse::new(media_id))));
    }

    Err(ApiError::InvalidBody("No file provided".to_string()))
}

async fn download_media_handler(
    State(state): State<Arc<AppState>>,
    PathId(media_id): PathId,
) -> ApiResult<(StatusCode, HeaderMap, Bytes)> {
    let media = state.run(move |service| service.fetch_media(media_id)).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_str(&media.content_type)
            .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CONTENT_TYPE)),
    );
    if let Ok(value) = HeaderValue::from_str(&content_disposition(&media.filename)) {
        headers.insert(CONTENT_DISPOSITION, value);
    }

    Ok((StatusCode::OK, headers, Bytes::from(media.data)))
}

fn content_disposition(filename: &str) -> String {
    let cleaned: String = filename.chars().filter(|c| *c != '"' && *c != '\\').collect();
    format!("inline; filename=\"{}\"", cleaned)
}
