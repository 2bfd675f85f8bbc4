//! HTTP surface: routes, CORS, static image serving, and error responses.

use crate::app::App;
use crate::models::{
    HealthResponse, ImageGenerationRequest, ImageGenerationResponse, TextGenerationRequest,
    TextGenerationResponse,
};
use crate::Error;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Front-end dev server origins allowed to call the API.
pub const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://127.0.0.1:5173"];

/// Error body returned to clients as `{"detail": ...}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    /// Map a domain error from one of the generation endpoints. Validation
    /// failures keep their message; everything else is reported as a 500
    /// prefixed with `context`.
    fn from_generation(context: &str, err: Error) -> Self {
        match err {
            Error::Validation(detail) => Self {
                status: StatusCode::BAD_REQUEST,
                detail,
            },
            other => {
                tracing::error!("{} failed: {}", context, other);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    detail: format!("{} failed: {}", context, other),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "detail": self.detail })),
        )
            .into_response()
    }
}

pub fn cors_layer() -> CorsLayer {
    let origins = ALLOWED_ORIGINS.map(HeaderValue::from_static);
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Build the router. Files under `static_dir` are served at `/static`.
pub fn router(app: Arc<App>, static_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/generate-text", post(generate_text))
        .route("/generate-image", post(generate_image))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(app)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn generate_text(
    State(app): State<Arc<App>>,
    Json(req): Json<TextGenerationRequest>,
) -> Result<Json<TextGenerationResponse>, ApiError> {
    app.generate_text(&req)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_generation("Text generation", e))
}

async fn generate_image(
    State(app): State<Arc<App>>,
    Json(req): Json<ImageGenerationRequest>,
) -> Result<Json<ImageGenerationResponse>, ApiError> {
    app.generate_image(&req)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_generation("Image generation", e))
}
