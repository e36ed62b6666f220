//! Venue handlers: list, get, cover charge, popularity.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::CoverRequest;
use crate::api::extract::ApiJson;
use crate::app_state::AppState;
use crate::domain::{Venue, VenueId};
use crate::error::{ApiError, ErrorResponse};

/// Coerces a path segment into a venue id. Non-integers match no venue.
pub(crate) fn venue_id_from_path(raw: &str) -> Result<VenueId, ApiError> {
    VenueId::coerce(raw).ok_or(ApiError::VenueNotFound)
}

/// `GET /venues` — List every venue.
///
/// # Errors
///
/// Returns [`ApiError::Store`] if the store query fails.
#[utoipa::path(
    get,
    path = "/venues",
    tag = "Venues",
    summary = "List venues",
    description = "Returns every venue, ordered by id.",
    responses(
        (status = 200, description = "All venues", body = Vec<Venue>),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn list_venues(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let venues = state.venue_service.list_venues().await?;
    Ok(Json(venues))
}

/// `GET /venues/:id` — Get a single venue.
///
/// # Errors
///
/// Returns [`ApiError::VenueNotFound`] if no venue has this id.
#[utoipa::path(
    get,
    path = "/venues/{id}",
    tag = "Venues",
    summary = "Get venue",
    params(
        ("id" = i64, Path, description = "Venue id"),
    ),
    responses(
        (status = 200, description = "Venue", body = Venue),
        (status = 404, description = "Venue not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn get_venue(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = venue_id_from_path(&id)?;
    let venue = state.venue_service.get_venue(id).await?;
    Ok(Json(venue))
}

/// `POST /venues/:id/cover` — Overwrite the cover charge.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] on an undecodable body,
/// [`ApiError::VenueNotFound`] if the venue is absent, or
/// [`ApiError::Store`] on store failure.
#[utoipa::path(
    post,
    path = "/venues/{id}/cover",
    tag = "Venues",
    summary = "Set cover charge",
    description = "Overwrites the cover charge without range checks and returns the updated venue.",
    params(
        ("id" = i64, Path, description = "Venue id"),
    ),
    request_body = CoverRequest,
    responses(
        (status = 200, description = "Updated venue", body = Venue),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 404, description = "Venue not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn update_cover(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<CoverRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = venue_id_from_path(&id)?;
    let venue = state.venue_service.set_cover(id, req.cover).await?;
    Ok(Json(venue))
}

/// `POST /venues/:id/pop` — Add one to the venue's popularity.
///
/// # Errors
///
/// Returns [`ApiError::VenueNotFound`] if the venue is absent, or
/// [`ApiError::Store`] on store failure.
#[utoipa::path(
    post,
    path = "/venues/{id}/pop",
    tag = "Venues",
    summary = "Record a pop",
    params(
        ("id" = i64, Path, description = "Venue id"),
    ),
    responses(
        (status = 200, description = "Updated venue", body = Venue),
        (status = 404, description = "Venue not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn record_pop(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = venue_id_from_path(&id)?;
    let venue = state.venue_service.record_pop(id).await?;
    Ok(Json(venue))
}

/// Venue routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/{id}", get(get_venue))
        .route("/venues/{id}/cover", post(update_cover))
        .route("/venues/{id}/pop", post(record_pop))
}
