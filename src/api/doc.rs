//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use super::dto::{CoverRequest, PhotoUploadResponse, VoteRequest};
use super::handlers::{photo, system, venue, vote};
use crate::domain::{Venue, VenuePhoto};
use crate::error::ErrorResponse;

/// Generated OpenAPI description, served by Swagger UI when the
/// `swagger-ui` feature is enabled.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "popin-venues", description = "Venue discovery backend"),
    paths(
        venue::list_venues,
        venue::get_venue,
        venue::update_cover,
        venue::record_pop,
        vote::cast_vote,
        photo::upload_photo,
        photo::list_photos,
        system::health_handler,
    ),
    components(schemas(
        Venue,
        VenuePhoto,
        VoteRequest,
        CoverRequest,
        PhotoUploadResponse,
        ErrorResponse,
        system::HealthResponse,
    )),
    tags(
        (name = "Venues", description = "Venue records, cover charge and popularity"),
        (name = "Votes", description = "Up- and downvotes"),
        (name = "Photos", description = "Photo uploads and listings"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/venues",
            "/venues/{id}",
            "/venues/{id}/cover",
            "/venues/{id}/pop",
            "/vote",
            "/venues/{id}/photos",
            "/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
