use axum::{extract::State, routing::get, Json, Router};
use reservas_core::property::{store, ManagerStats, Property};

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;

/// Manager dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/manager/properties", get(own_listings))
        .route("/v1/manager/stats", get(stats))
}

async fn own_listings(State(state): State<AppState>, user: AuthUser) -> ApiResult<Json<Vec<Property>>> {
    Ok(Json(store::list_by_manager(state.pool(), user.id()).await?))
}

async fn stats(State(state): State<AppState>, user: AuthUser) -> ApiResult<Json<ManagerStats>> {
    Ok(Json(store::manager_stats(state.pool(), user.id()).await?))
}
