use axum::{extract::State, http::StatusCode, routing::get, routing::post, Json, Router};
use axum_extra::extract::WithRejection;
use chrono::Duration;
use reservas_core::account::{
    self, model::normalize_email, password, store, token, Account, Credentials,
    Registration, Role,
};
use serde::Serialize;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/auth/register", post(register))
        .route("/v1/auth/login", post(login))
        .route("/v1/auth/me", get(me))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    token: String,
    token_type: &'static str,
    expires_in: i64,
    account: Account,
}

/// Create a manager account.
async fn register(
    State(state): State<AppState>,
    WithRejection(Json(registration), _): WithRejection<Json<Registration>, ApiError>,
) -> ApiResult<(StatusCode, Json<Account>)> {
    let registration = registration.normalized();
    registration.validate()?;

    let hash = password::hash_password(&registration.password)?;
    let account = store::insert_account(state.pool(), &registration, &hash, Role::Manager)
        .await?
        .ok_or_else(|| ApiError::Conflict("email already registered".to_string()))?;

    tracing::info!(account = %account.id, "manager account registered");
    Ok((StatusCode::CREATED, Json(account)))
}

/// Exchange email and password for a session token.
async fn login(
    State(state): State<AppState>,
    WithRejection(Json(credentials), _): WithRejection<Json<Credentials>, ApiError>,
) -> ApiResult<Json<LoginResponse>> {
    let email = normalize_email(&credentials.email);
    let row = store::find_by_email(state.pool(), &email).await?;

    let account = account::authenticate(row, &credentials.password).inspect_err(|e| {
        tracing::warn!(error = %e, "login rejected");
    })?;

    let ttl = Duration::hours(state.config().jwt_ttl_hours);
    let token = token::issue_token(&state.config().jwt_secret, &account, ttl)?;

    tracing::info!(account = %account.id, "login succeeded");
    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer",
        expires_in: ttl.num_seconds(),
        account,
    }))
}

/// The account behind the presented token.
async fn me(State(state): State<AppState>, user: AuthUser) -> ApiResult<Json<Account>> {
    store::find_by_id(state.pool(), user.id())
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::Unauthorized("account no longer exists".to_string()))
}
