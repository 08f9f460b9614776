//! Router configuration for the web API.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{create_chat, delete_chat, get_chat, list_chats, update_chat, AppState};
use super::middleware::create_cors_layer;
use super::openapi::ApiDoc;

/// Create the main router: chat API, health check and API docs.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let api_routes = Router::new()
        .route("/api/chat", get(list_chats).post(create_chat))
        .route("/api/chat/", get(list_chats).post(create_chat))
        .route(
            "/api/chat/:id",
            get(get_chat).put(update_chat).delete(delete_chat),
        )
        .with_state(app_state);

    Router::new()
        .merge(api_routes)
        .merge(create_health_router())
        .merge(create_swagger_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Serve the OpenAPI document and Swagger UI.
pub fn create_swagger_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
