use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use reservas_core::favorites;
use reservas_core::property::Property;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/favorites", get(list))
        .route("/v1/favorites/{id}/toggle", post(toggle))
        .route("/v1/favorites/{id}", delete(remove))
}

async fn list(State(state): State<AppState>, user: AuthUser) -> ApiResult<Json<Vec<Property>>> {
    Ok(Json(favorites::list_favorites(state.pool(), user.id()).await?))
}

async fn toggle(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> ApiResult<Json<Value>> {
    let favorite = favorites::toggle_favorite(state.pool(), user.id(), id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("listing {id} not found")))?;
    Ok(Json(json!({ "propertyId": id, "favorite": favorite })))
}

async fn remove(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> ApiResult<StatusCode> {
    favorites::remove_favorite(state.pool(), user.id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
