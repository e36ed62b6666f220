//! Photo handlers: multipart upload and per-venue listing.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use super::venue::venue_id_from_path;
use crate::api::dto::PhotoUploadResponse;
use crate::app_state::AppState;
use crate::domain::{VenueId, VenuePhoto};
use crate::error::{ApiError, ErrorResponse};

/// Multipart field carrying the image.
const PHOTO_FIELD: &str = "photo";

/// `POST /venues/:id/photos` — Upload a photo for a venue.
///
/// Takes the first `photo` part that carries a filename; other parts are
/// drained and ignored. A request that is not multipart at all counts as
/// having no file. A non-integer venue id answers 404.
///
/// # Errors
///
/// Returns [`ApiError::MissingPhoto`] if no `photo` part was sent, or
/// [`ApiError::Store`] (with details) if storing the file or recording
/// its URL fails.
#[utoipa::path(
    post,
    path = "/venues/{id}/photos",
    tag = "Photos",
    summary = "Upload a venue photo",
    description = "Stores the `photo` multipart file and records its public URL. The venue id is not checked.",
    params(
        ("id" = i64, Path, description = "Venue id"),
    ),
    request_body(content_type = "multipart/form-data", description = "Single file part named `photo`"),
    responses(
        (status = 200, description = "Photo stored", body = PhotoUploadResponse),
        (status = 400, description = "No file uploaded", body = ErrorResponse),
        (status = 404, description = "Venue id is not an integer", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn upload_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Ok(mut multipart) = multipart else {
        return Err(ApiError::MissingPhoto);
    };

    let mut photo: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("Multipart error: {e}")))?
    {
        if photo.is_some() || field.name() != Some(PHOTO_FIELD) {
            continue;
        }
        // Only a part with a filename is a file; a plain `photo` text field is not.
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidRequest(format!("Upload read error: {e}")))?;
        photo = Some((original_name, bytes.to_vec()));
    }

    let (original_name, data) = photo.ok_or(ApiError::MissingPhoto)?;
    // Unlike the listing route, an id that cannot be coerced is rejected here
    // rather than handed to the store, which could never accept the row.
    let venue_id = venue_id_from_path(&id)?;

    let uploaded = state
        .venue_service
        .upload_photo(venue_id, Some(&original_name), &data)
        .await?;

    Ok(Json(PhotoUploadResponse {
        message: "Photo uploaded successfully".to_string(),
        photo_url: uploaded.photo_url,
    }))
}

/// `GET /venues/:id/photos` — List a venue's photos.
///
/// Does not check that the venue exists; an unknown id yields `[]`.
///
/// # Errors
///
/// Returns [`ApiError::Store`] (with details) if the query fails.
#[utoipa::path(
    get,
    path = "/venues/{id}/photos",
    tag = "Photos",
    summary = "List venue photos",
    params(
        ("id" = i64, Path, description = "Venue id"),
    ),
    responses(
        (status = 200, description = "Photos for the venue", body = Vec<VenuePhoto>),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn list_photos(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let photos: Vec<VenuePhoto> = match VenueId::coerce(&id) {
        Some(venue_id) => state.venue_service.list_photos(venue_id).await?,
        None => Vec::new(),
    };
    Ok(Json(photos))
}

/// Photo routes. Uploads have no body size limit.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/venues/{id}/photos",
        get(list_photos)
            .post(upload_photo)
            .layer(DefaultBodyLimit::disable()),
    )
}
