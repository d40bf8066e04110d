use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Redirect,
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use reservas_core::contact;
use reservas_core::property::{
    amenity, store,
    validate::{normalize_new, validate_new, validate_patch},
    NewProperty, Property, PropertyPatch,
};
use reservas_search::{filter, RawQuery, SearchCriteria};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/properties", get(search).post(create))
        .route(
            "/v1/properties/{id}",
            get(detail).patch(update).delete(remove),
        )
        .route("/v1/properties/{id}/whatsapp", get(whatsapp))
}

#[derive(Debug, Serialize)]
struct SearchResponse {
    count: usize,
    properties: Vec<Property>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PropertyDetail {
    #[serde(flatten)]
    property: Property,
    whatsapp_url: String,
    share_text: String,
}

#[derive(Debug, Default, Deserialize)]
struct ContactQuery {
    /// `card` uses the short browse-grid message.
    from: Option<String>,
}

async fn find(state: &AppState, id: Uuid) -> ApiResult<Property> {
    store::get_property(state.pool(), id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("listing {id} not found")))
}

/// Browse listings, newest first, narrowed by the query-string criteria.
async fn search(
    State(state): State<AppState>,
    WithRejection(Query(raw), _): WithRejection<Query<RawQuery>, ApiError>,
) -> ApiResult<Json<SearchResponse>> {
    let criteria = SearchCriteria::from_query(&raw);
    let all = store::list_properties(state.pool()).await?;
    let total = all.len();
    let properties = filter(all, &criteria);

    tracing::debug!(total, matched = properties.len(), ?criteria, "search");
    Ok(Json(SearchResponse {
        count: properties.len(),
        properties,
    }))
}

async fn detail(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> ApiResult<Json<PropertyDetail>> {
    let property = find(&state, id).await?;

    if let Err(e) = store::record_view(state.pool(), id).await {
        tracing::warn!(listing = %id, error = %e, "failed to record view");
    }

    let message = contact::detail_message(&property.title, property.id);
    let whatsapp_url = contact::whatsapp_link(&property.whatsapp, &message)
        .map_err(|e| ApiError::Internal(format!("whatsapp link: {e}")))?
        .to_string();
    let share_text = contact::share_text(&property.title);

    Ok(Json(PropertyDetail {
        property,
        whatsapp_url,
        share_text,
    }))
}

/// Count the click and hand the visitor over to WhatsApp.
async fn whatsapp(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Query(query), _): WithRejection<Query<ContactQuery>, ApiError>,
) -> ApiResult<Redirect> {
    let property = find(&state, id).await?;

    let message = match query.from.as_deref() {
        Some("card") => contact::card_message(&property.title),
        _ => contact::detail_message(&property.title, property.id),
    };
    let url = contact::whatsapp_link(&property.whatsapp, &message)
        .map_err(|e| ApiError::Internal(format!("whatsapp link: {e}")))?;

    if let Err(e) = store::record_whatsapp_click(state.pool(), id).await {
        tracing::warn!(listing = %id, error = %e, "failed to record whatsapp click");
    }

    Ok(Redirect::temporary(url.as_str()))
}

async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Json(input), _): WithRejection<Json<NewProperty>, ApiError>,
) -> ApiResult<(StatusCode, Json<Property>)> {
    user.require_manager()?;

    let input = normalize_new(input);
    validate_new(&input)?;
    for label in input.amenities.iter().filter(|a| !amenity::is_catalogued(a)) {
        tracing::debug!(amenity = %label, "listing uses an uncatalogued amenity");
    }

    let property = store::insert_property(state.pool(), user.id(), &input).await?;
    tracing::info!(listing = %property.id, manager = %user.id(), "listing created");
    Ok((StatusCode::CREATED, Json(property)))
}

async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(patch), _): WithRejection<Json<PropertyPatch>, ApiError>,
) -> ApiResult<Json<Property>> {
    validate_patch(&patch)?;

    let mut property = find(&state, id).await?;
    user.require_owner(&property)?;

    property.apply(patch, Utc::now());
    let updated = store::update_property(state.pool(), &property)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("listing {id} not found")))?;

    tracing::info!(listing = %id, "listing updated");
    Ok(Json(updated))
}

async fn remove(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> ApiResult<StatusCode> {
    let property = find(&state, id).await?;
    user.require_owner(&property)?;

    if !store::delete_property(state.pool(), id).await? {
        return Err(ApiError::NotFound(format!("listing {id} not found")));
    }

    tracing::info!(listing = %id, "listing deleted");
    Ok(StatusCode::NO_CONTENT)
}
