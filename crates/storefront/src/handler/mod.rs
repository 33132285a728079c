mod order;
mod product;
mod user;

use crate::state::AppState;
use anyhow::{Context, Result};
use axum::Router;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use prometheus_client::encoding::text::encode;
use shared::utils::shutdown_signal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::order::order_routes;
pub use self::product::product_routes;
pub use self::user::user_routes;

const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        user::create_user,
        user::get_users,
        user::get_user,
        user::update_user,
        user::delete_user,

        product::create_product,
        product::get_products,
        product::get_product,
        product::update_product,
        product::delete_product,

        order::create_order,
        order::add_product,
        order::get_user_orders,
        order::get_order_products,
        order::remove_product,
        order::remove_products,
    ),
    tags(
        (name = "User", description = "User endpoints"),
        (name = "Product", description = "Product endpoints"),
        (name = "Order", description = "Order endpoints"),
    )
)]
struct ApiDoc;

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let mut buffer = String::new();

    let registry = state.registry.lock().await;

    if let Err(e) = encode(&mut buffer, &registry) {
        error!("💥 Failed to encode metrics: {e}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {e}"),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
        .into_response()
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(app_state: AppState) -> Router {
        let shared_state = Arc::new(app_state);

        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/metrics", get(metrics_handler))
            .with_state(shared_state.clone())
            .merge(user_routes(shared_state.clone()))
            .merge(product_routes(shared_state.clone()))
            .merge(order_routes(shared_state));

        let router_with_layers = api_router
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(TraceLayer::new_for_http());

        let (app_router, api) = router_with_layers.split_for_parts();

        app_router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(app_state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        let local_addr = listener.local_addr()?;
        info!("🚀 Server running on http://{local_addr}");
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use prometheus_client::registry::Registry;
    use serde_json::{Value, json};
    use shared::testing::InMemoryStore;
    use tokio::sync::Mutex;
    use tower::ServiceExt;

    async fn app() -> Router {
        let registry = Arc::new(Mutex::new(Registry::default()));
        let di = InMemoryStore::new().dependencies_with(registry.clone()).await;
        AppRouter::build(AppState::with_container(di, registry).await)
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn seed(app: &Router) -> (i64, i64, i64) {
        let (_, user) = call(
            app,
            "POST",
            "/users",
            Some(json!({"name": "Dana", "address": "4 Oak Ave", "email": "dana@example.com"})),
        )
        .await;
        let (_, order) = call(
            app,
            "POST",
            "/orders",
            Some(json!({"order_date": "2024-05-01T14:30:00", "user_id": user["data"]["id"]})),
        )
        .await;
        let (_, product) = call(
            app,
            "POST",
            "/products",
            Some(json!({"product_name": "Lamp", "price": "19.99"})),
        )
        .await;

        (
            user["data"]["id"].as_i64().unwrap(),
            order["data"]["id"].as_i64().unwrap(),
            product["data"]["id"].as_i64().unwrap(),
        )
    }

    #[tokio::test]
    async fn user_create_and_fetch() {
        let app = app().await;

        let (status, created) = call(
            &app,
            "POST",
            "/users",
            Some(json!({"name": "Eve", "address": "5 Pine Rd", "email": "eve@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], "success");

        let id = created["data"]["id"].as_i64().unwrap();
        let (status, fetched) = call(&app, "GET", &format!("/users/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["data"], created["data"]);
    }

    #[tokio::test]
    async fn duplicate_email_returns_bad_request() {
        let app = app().await;
        let body = json!({"name": "Eve", "address": "5 Pine Rd", "email": "eve@example.com"});

        call(&app, "POST", "/users", Some(body.clone())).await;
        let (status, err) = call(&app, "POST", "/users", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["status"], "error");
        assert_eq!(err["message"], "A user with this email already exists");

        let (_, users) = call(&app, "GET", "/users", None).await;
        assert_eq!(users["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_payloads_are_rejected() {
        let app = app().await;

        let long_email = format!("{}@example.com", "e".repeat(200));
        let (status, err) = call(
            &app,
            "POST",
            "/users",
            Some(json!({"name": "Eve", "address": "5 Pine Rd", "email": long_email})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(err["details"]["email"].is_array());

        let (status, _) = call(&app, "POST", "/products", Some(json!({"product_name": "Lamp"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(
            &app,
            "POST",
            "/products",
            Some(json!({"product_name": "Lamp", "price": "-1.00"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_entities_return_bad_request() {
        let app = app().await;

        let (status, err) = call(&app, "GET", "/users/9", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["message"], "User does not exist");

        let (status, err) = call(&app, "GET", "/products/9", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["message"], "Product does not exist");

        let (status, err) = call(&app, "DELETE", "/products/9", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["message"], "Invalid product id");

        let (status, err) = call(
            &app,
            "POST",
            "/orders",
            Some(json!({"order_date": "2024-05-01T14:30:00", "user_id": 9})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["message"], "Invalid user id");
    }

    #[tokio::test]
    async fn order_date_accepts_common_iso_forms() {
        let app = app().await;
        let (uid, _, _) = seed(&app).await;

        for (raw, stored) in [
            ("2024-05-01T14:30:00Z", "2024-05-01T14:30:00"),
            ("2024-05-01T16:30:00+02:00", "2024-05-01T14:30:00"),
            ("2024-05-01T14:30", "2024-05-01T14:30:00"),
            ("2024-05-01 14:30:00", "2024-05-01T14:30:00"),
        ] {
            let (status, created) = call(
                &app,
                "POST",
                "/orders",
                Some(json!({"order_date": raw, "user_id": uid})),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED, "order_date {raw}");
            assert_eq!(created["data"]["order_date"], stored);
        }

        let (status, _) = call(
            &app,
            "POST",
            "/orders",
            Some(json!({"order_date": "not a date", "user_id": uid})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn order_for_user_zero_reports_invalid_user() {
        let app = app().await;

        let (status, err) = call(
            &app,
            "POST",
            "/orders",
            Some(json!({"order_date": "2024-05-01T14:30:00", "user_id": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["message"], "Invalid user id");
    }

    #[tokio::test]
    async fn order_product_links() {
        let app = app().await;
        let (_, oid, pid) = seed(&app).await;
        let add = format!("/orders/{oid}/add_product/{pid}");

        let (status, ok) = call(&app, "PUT", &add, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ok["message"], format!("Product {pid} added to order {oid}"));

        let (status, err) = call(&app, "PUT", &add, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["message"], "Product already exists in the order");

        let (_, listed) = call(&app, "GET", &format!("/orders/{oid}/products"), None).await;
        assert_eq!(listed["data"].as_array().unwrap().len(), 1);

        let remove = format!("/orders/{oid}/remove_product/{pid}");
        let (status, _) = call(&app, "DELETE", &remove, None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, err) = call(&app, "DELETE", &remove, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["message"], "Product not found in the order");
    }

    #[tokio::test]
    async fn bulk_remove_lists_removed_ids() {
        let app = app().await;
        let (_, oid, pid) = seed(&app).await;
        call(&app, "PUT", &format!("/orders/{oid}/add_product/{pid}"), None).await;

        let uri = format!("/orders/{oid}/remove_product");
        let (status, res) = call(&app, "DELETE", &uri, Some(json!({"product_ids": [pid, 999]}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(res["message"], format!("Products removed from order {oid}"));
        assert_eq!(res["data"]["removed_product_ids"], json!([pid]));

        let (status, err) = call(&app, "DELETE", &uri, Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["message"], "No product IDs provided");
    }

    #[tokio::test]
    async fn deleting_user_drops_their_orders() {
        let app = app().await;
        let (uid, oid, pid) = seed(&app).await;
        call(&app, "PUT", &format!("/orders/{oid}/add_product/{pid}"), None).await;

        let (status, res) = call(&app, "DELETE", &format!("/users/{uid}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(res["message"], format!("Successfully deleted user {uid}"));

        let (status, err) = call(&app, "GET", &format!("/orders/{oid}/products"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["message"], "Invalid order id");
    }

    #[tokio::test]
    async fn metrics_endpoint_exposes_service_counters() {
        let app = app().await;
        call(&app, "GET", "/users", None).await;

        let response = app
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("user_service"));
    }
}
