//! Vote handler.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::VoteRequest;
use crate::api::extract::ApiJson;
use crate::app_state::AppState;
use crate::domain::{Venue, VoteType};
use crate::error::{ApiError, ErrorResponse};

/// `POST /vote` — Up- or downvote a venue.
///
/// The vote type is checked before the store is touched.
///
/// # Errors
///
/// Returns [`ApiError::InvalidVoteType`] for anything but `upvote` or
/// `downvote`, [`ApiError::VenueNotFound`] if the venue is absent, or
/// [`ApiError::Store`] on store failure.
#[utoipa::path(
    post,
    path = "/vote",
    tag = "Votes",
    summary = "Vote on a venue",
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Updated venue", body = Venue),
        (status = 400, description = "Invalid vote type", body = ErrorResponse),
        (status = 404, description = "Venue not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn cast_vote(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<VoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let vote: VoteType = req
        .vote_type
        .as_deref()
        .and_then(|raw| raw.parse().ok())
        .ok_or(ApiError::InvalidVoteType)?;
    let venue_id = req.venue_id.ok_or(ApiError::VenueNotFound)?;

    let venue = state.venue_service.vote(venue_id, vote).await?;
    Ok(Json(venue))
}

/// Vote routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/vote", post(cast_vote))
}
