pub mod ask;
pub mod health;
pub mod users;

use crate::state::AppState;
use axum::http::{header, Method};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;

pub fn build_router(state: AppState) -> Router {
    // The browser UI lives on another origin, so CORS stays permissive.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/init_user", axum::routing::post(users::init_user))
        .route("/ask", axum::routing::post(ask::ask))
        .route("/health", axum::routing::get(health::health_check))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(256 * 1024)) // 256KB body limit
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::logs::LogStore;
    use crate::db::users::UserStore;
    use crate::services::gemini::GeminiClient;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    // The driver connects lazily, so handlers that reject a request before
    // touching storage can be exercised without a running MongoDB.
    async fn test_state() -> AppState {
        let client = mongodb::Client::with_uri_str("mongodb://localhost:27017")
            .await
            .expect("parse test mongodb uri");
        let db = client.database("prompt_gateway_test");
        AppState {
            users: UserStore::new(&db),
            logs: LogStore::new(&db),
            gemini: GeminiClient::new("test-key".into()).expect("build gemini client"),
        }
    }

    async fn post_json(
        app: Router,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn init_user_rejects_empty_name() {
        let app = build_router(test_state().await);
        let (status, body) = post_json(
            app,
            "/init_user",
            serde_json::json!({"name": "   ", "email": "a@b.com"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "name must not be empty");
    }

    #[tokio::test]
    async fn init_user_rejects_malformed_email() {
        let app = build_router(test_state().await);
        let (status, body) = post_json(
            app,
            "/init_user",
            serde_json::json!({"name": "Anurag", "email": "not-an-email"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "invalid email address");
    }

    #[tokio::test]
    async fn ask_rejects_unknown_model_before_anything_else() {
        let app = build_router(test_state().await);
        let (status, body) = post_json(
            app,
            "/ask",
            serde_json::json!({
                "email": "a@b.com",
                "prompt": "hello",
                "model_name": "gemini-1.0-ultra"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "invalid model name");
    }

    #[tokio::test]
    async fn ask_rejects_unknown_model_even_with_bad_email() {
        let app = build_router(test_state().await);
        let (status, body) = post_json(
            app,
            "/ask",
            serde_json::json!({
                "email": "not-an-email",
                "prompt": "hello",
                "model_name": "no-such-model"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "invalid model name");
    }

    #[tokio::test]
    async fn ask_rejects_empty_prompt() {
        let app = build_router(test_state().await);
        let (status, body) = post_json(
            app,
            "/ask",
            serde_json::json!({
                "email": "a@b.com",
                "prompt": "",
                "model_name": "gemini-2.5-flash"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "prompt must not be empty");
    }

    #[tokio::test]
    async fn missing_fields_are_a_client_error() {
        let app = build_router(test_state().await);
        let (status, _) = post_json(app, "/ask", serde_json::json!({"email": "a@b.com"})).await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    #[ignore = "requires a local MongoDB on 27017"]
    async fn registering_twice_reports_created_then_exists() {
        let state = test_state().await;
        let email = format!(
            "probe-{}@example.com",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        );

        let (status, body) = post_json(
            build_router(state.clone()),
            "/init_user",
            serde_json::json!({"name": "Probe", "email": &email}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "New user created");

        let (status, body) = post_json(
            build_router(state),
            "/init_user",
            serde_json::json!({"name": "Probe", "email": &email}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User already exists");
    }

    #[tokio::test]
    #[ignore = "requires a local MongoDB on 27017"]
    async fn ask_with_unregistered_email_is_not_found() {
        let app = build_router(test_state().await);
        let (status, body) = post_json(
            app,
            "/ask",
            serde_json::json!({
                "email": "nobody-registered@example.com",
                "prompt": "hello",
                "model_name": "gemini-2.5-flash"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Not found: user not found");
    }
}
