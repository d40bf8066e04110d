pub mod auth;
pub mod catalog;
pub mod favorites;
pub mod health;
pub mod images;
pub mod manager;
pub mod properties;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 16 * 1024;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config().max_upload_bytes + MULTIPART_OVERHEAD;
    let objects = ServeDir::new(state.store().root());

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(properties::routes())
        .merge(manager::routes())
        .merge(favorites::routes())
        .merge(catalog::routes())
        .merge(images::routes().layer(DefaultBodyLimit::max(upload_limit)))
        .nest_service("/storage", objects)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use chrono::{Duration, Utc};
    use reservas_core::account::{token::issue_token, Account, Role};
    use reservas_core::storage::PROPERTY_IMAGES;
    use serde_json::{json, Value};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::config::AppConfig;

    const BOUNDARY: &str = "reservas-test-boundary";

    /// Router over a pool that never connects; only routes that answer
    /// before touching the database are exercised here.
    fn app(storage_dir: &str) -> (Router, AppConfig) {
        let config = AppConfig::for_tests(storage_dir);
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_lazy(&config.database_url)
            .unwrap();
        (build_router(AppState::new(pool, config.clone())), config)
    }

    fn token(config: &AppConfig, role: Role, ttl: Duration) -> String {
        let account = Account {
            id: Uuid::now_v7(),
            name: "Gestor".into(),
            email: "gestor@example.com".into(),
            phone: None,
            property_name: None,
            role,
            created_at: Utc::now(),
        };
        issue_token(&config.jwt_secret, &account, ttl).unwrap()
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn multipart_body(content_type: &str, file_name: &str, data: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn multipart_request(token: &str, content_type: &str, file_name: &str, data: &[u8]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/images")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(multipart_body(content_type, file_name, data)))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn valid_listing() -> Value {
        json!({
            "title": "Pousada Recanto da Serra",
            "description": "Chalés com lareira",
            "location": { "city": "Campos do Jordão", "state": "SP" },
            "price": 450,
            "type": "pousada",
            "maxGuests": 6,
            "whatsapp": "5512999990000",
            "amenities": ["Wi-Fi", "Lareira"]
        })
    }

    #[tokio::test]
    async fn ping_answers_ok() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app(dir.path().to_str().unwrap());

        let response = app
            .oneshot(Request::builder().uri("/v1/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn catalogue_routes() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app(dir.path().to_str().unwrap());

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/v1/amenities").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let amenities = body_json(response).await;
        assert_eq!(amenities.as_array().unwrap().len(), 15);
        assert_eq!(amenities[0], "Wi-Fi");

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/v1/categories").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let categories = body_json(response).await;
        assert_eq!(categories[0], json!({ "id": "all", "label": "Todos" }));

        let response = app
            .oneshot(Request::builder().uri("/v1/property-types").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let types = body_json(response).await;
        assert_eq!(types[1], json!({ "id": "sitio", "label": "Sítio" }));
    }

    #[tokio::test]
    async fn protected_routes_require_a_token() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app(dir.path().to_str().unwrap());

        for uri in ["/v1/auth/me", "/v1/manager/properties", "/v1/manager/stats", "/v1/favorites"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
            assert_eq!(body_json(response).await["error"]["type"], "unauthorized");
        }
    }

    #[tokio::test]
    async fn bad_and_expired_tokens_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (app, config) = app(dir.path().to_str().unwrap());

        let expired = token(&config, Role::Manager, Duration::hours(-2));
        for bearer in ["garbage", expired.as_str()] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .uri("/v1/manager/stats")
                        .header(header::AUTHORIZATION, format!("Bearer {bearer}"))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn register_rejects_mismatched_passwords() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app(dir.path().to_str().unwrap());

        let response = app
            .oneshot(json_request(
                "POST",
                "/v1/auth/register",
                None,
                json!({
                    "name": "Maria",
                    "email": "maria@example.com",
                    "password": "segredo123",
                    "confirmPassword": "segredo321"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "passwords do not match"
        );
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app(dir.path().to_str().unwrap());

        let request = Request::builder()
            .method("POST")
            .uri("/v1/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["type"], "badRequest");
    }

    #[tokio::test]
    async fn plain_users_cannot_create_listings() {
        let dir = tempfile::tempdir().unwrap();
        let (app, config) = app(dir.path().to_str().unwrap());
        let token = token(&config, Role::User, Duration::hours(1));

        let response = app
            .oneshot(json_request("POST", "/v1/properties", Some(&token), valid_listing()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn invalid_listing_is_rejected_before_storage() {
        let dir = tempfile::tempdir().unwrap();
        let (app, config) = app(dir.path().to_str().unwrap());
        let token = token(&config, Role::Manager, Duration::hours(1));

        let mut listing = valid_listing();
        listing["title"] = json!("   ");
        let response = app
            .clone()
            .oneshot(json_request("POST", "/v1/properties", Some(&token), listing))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["message"], "title cannot be empty");

        let mut listing = valid_listing();
        listing["type"] = json!("hotel");
        let response = app
            .oneshot(json_request("POST", "/v1/properties", Some(&token), listing))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_patch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (app, config) = app(dir.path().to_str().unwrap());
        let token = token(&config, Role::Manager, Duration::hours(1));

        let uri = format!("/v1/properties/{}", Uuid::now_v7());
        let response = app
            .oneshot(json_request("PATCH", &uri, Some(&token), json!({ "price": -10 })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_patch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (app, config) = app(dir.path().to_str().unwrap());
        let token = token(&config, Role::Manager, Duration::hours(1));

        let uri = format!("/v1/properties/{}", Uuid::now_v7());
        let response = app
            .oneshot(json_request("PATCH", &uri, Some(&token), json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "update contains no fields"
        );
    }

    #[tokio::test]
    async fn non_uuid_listing_id_is_a_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app(dir.path().to_str().unwrap());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/properties/pousada-do-lago")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn image_upload_is_stored_and_served() {
        let dir = tempfile::tempdir().unwrap();
        let (app, config) = app(dir.path().to_str().unwrap());
        let token = token(&config, Role::Manager, Duration::hours(1));

        let response = app
            .clone()
            .oneshot(multipart_request(&token, "image/png", "vista.png", b"fake-png"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        let name = body["name"].as_str().unwrap().to_string();
        assert!(name.ends_with(".png"));
        assert_eq!(
            body["url"],
            format!("http://localhost:3030/storage/property-images/{name}")
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/storage/property-images/{name}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"fake-png");
    }

    #[tokio::test]
    async fn image_upload_rejects_non_images_and_oversize() {
        let dir = tempfile::tempdir().unwrap();
        let (app, config) = app(dir.path().to_str().unwrap());
        let token = token(&config, Role::Manager, Duration::hours(1));

        let response = app
            .clone()
            .oneshot(multipart_request(&token, "application/pdf", "contrato.pdf", b"%PDF"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let big = vec![0u8; config.max_upload_bytes + 1];
        let response = app
            .oneshot(multipart_request(&token, "image/jpeg", "grande.jpg", &big))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_json(response).await["error"]["type"], "payloadTooLarge");
    }

    #[tokio::test]
    async fn upload_over_body_limit_uses_error_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let (app, config) = app(dir.path().to_str().unwrap());
        let token = token(&config, Role::Manager, Duration::hours(1));

        let big = vec![0u8; config.max_upload_bytes + MULTIPART_OVERHEAD + 1];
        let body = multipart_body("image/jpeg", "enorme.jpg", &big);
        let request = Request::builder()
            .method("POST")
            .uri("/v1/images")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::CONTENT_LENGTH, body.len())
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_json(response).await["error"]["type"], "payloadTooLarge");
        assert!(!dir.path().join(PROPERTY_IMAGES).exists());
    }
}
