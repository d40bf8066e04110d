use axum::{routing::get, Json, Router};
use reservas_core::property::{amenity::AMENITIES, PropertyType};
use reservas_search::Category;
use serde_json::{json, Value};

use crate::state::AppState;

/// Static lists the listing editor and browse page render from.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/amenities", get(amenities))
        .route("/v1/categories", get(categories))
        .route("/v1/property-types", get(property_types))
}

async fn amenities() -> Json<Value> {
    Json(json!(AMENITIES))
}

async fn categories() -> Json<Value> {
    let items: Vec<Value> = Category::ALL
        .iter()
        .map(|c| json!({ "id": c.id(), "label": c.label() }))
        .collect();
    Json(Value::Array(items))
}

async fn property_types() -> Json<Value> {
    let items: Vec<Value> = [PropertyType::Pousada, PropertyType::Sitio, PropertyType::Fazenda]
        .iter()
        .map(|t| json!({ "id": t.as_str(), "label": t.label() }))
        .collect();
    Json(Value::Array(items))
}
