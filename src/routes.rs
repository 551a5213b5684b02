use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use crate::common::response::ApiError;
use crate::config::settings::SERVICE_NAME;
use crate::docs::ApiDoc;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json, Router};
use crate::state::AppState;
use serde::Serialize;
use utoipa::ToSchema;

use tower_http::cors::{Any, CorsLayer};

pub fn configure_routes() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_routes())
        .merge(crate::modules::render::router())
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(cors)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::get(root))
        .route("/health", axum::routing::get(health))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub env: String,
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "System"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        env: state.config.app_env.clone(),
    })
}

async fn root() -> &'static str {
    "✅ Channel 4 branding backend is running!"
}

async fn not_found() -> impl IntoResponse {
    ApiError::new("Not found", StatusCode::NOT_FOUND)
}
