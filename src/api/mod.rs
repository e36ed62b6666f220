//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Routes are mounted at the root, matching the paths the mobile client
//! already calls. Uploaded files are served read-only under `/uploads`.

pub mod doc;
pub mod dto;
pub mod extract;
pub mod handlers;


use std::any::Any;
use std::path::Path;

use axum::Router;
use axum::http::header::{CONTENT_TYPE, InvalidHeaderValue};
use axum::http::{HeaderValue, Method};
use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::error::ApiError;

/// Builds the API router with every REST endpoint.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(handlers::routes())
        .fallback(|| async { ApiError::RouteNotFound })
}

/// Builds the complete application: API routes, `/uploads` file serving,
/// optional Swagger UI, and the tracing, CORS and panic layers.
///
/// # Errors
///
/// Returns an error if `allowed_origin` is not a valid header value.
pub fn build_app(
    state: AppState,
    uploads_dir: &Path,
    allowed_origin: &str,
) -> Result<Router, InvalidHeaderValue> {
    let router = build_router().nest_service("/uploads", ServeDir::new(uploads_dir));

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", doc::ApiDoc::openapi()),
        )
    };

    Ok(router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origin)?)
        .with_state(state))
}

/// CORS policy admitting a single origin.
///
/// Requests from any other origin get no `Access-Control-Allow-Origin`
/// header at all.
///
/// # Errors
///
/// Returns an error if `origin` is not a valid header value.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([HeaderValue::from_str(origin)?]))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]))
}

/// Last-resort responder for panics escaping a handler.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(%detail, "unhandled error in request handler");
    ApiError::Internal(detail).into_response()
}
