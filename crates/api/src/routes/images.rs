use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use chrono::Utc;
use reservas_core::storage::{object_name, validate_upload, PROPERTY_IMAGES};
use serde::Serialize;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const FILE_FIELD: &str = "file";

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/images", post(upload))
}

#[derive(Debug, Serialize)]
struct UploadResponse {
    bucket: &'static str,
    name: String,
    url: String,
}

/// Store one listing photo and return its public URL.
async fn upload(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<UploadResponse>)> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field.bytes().await?;

        validate_upload(&content_type, bytes.len(), state.config().max_upload_bytes)?;

        let name = object_name(&file_name, Utc::now());
        state.store().put(PROPERTY_IMAGES, &name, &bytes).await?;
        let url = state.store().public_url(PROPERTY_IMAGES, &name);

        tracing::info!(account = %user.id(), object = %name, size = bytes.len(), "image uploaded");
        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                bucket: PROPERTY_IMAGES,
                name,
                url,
            }),
        ));
    }

    Err(ApiError::BadRequest(format!("multipart field '{FILE_FIELD}' is required")))
}
