//! Request and response bodies for venue and photo endpoints.
//!
//! Field names follow the mobile client's camelCase contract.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::VenueId;

/// Request body for `POST /vote`.
///
/// Both fields are optional at decode time: a missing `voteType` is
/// reported as an invalid vote type and a missing `venueId` matches no
/// venue.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    /// Venue to vote on, as a number or numeric string.
    #[serde(default, deserialize_with = "lenient_venue_id")]
    #[schema(value_type = Option<i64>)]
    pub venue_id: Option<VenueId>,
    /// `"upvote"` or `"downvote"`.
    #[serde(default)]
    pub vote_type: Option<String>,
}

/// Request body for `POST /venues/{id}/cover`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CoverRequest {
    /// New cover charge, as a number or numeric string.
    #[serde(deserialize_with = "lenient_f64")]
    #[schema(value_type = f64)]
    pub cover: f64,
}

/// Response body for `POST /venues/{id}/photos`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoUploadResponse {
    /// Always `"Photo uploaded successfully"`.
    pub message: String,
    /// Public URL of the stored photo.
    pub photo_url: String,
}

/// Treats an id that is present but not an integer like an absent one.
fn lenient_venue_id<'de, D>(deserializer: D) -> Result<Option<VenueId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| serde_json::from_value(v).ok()))
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn vote_request_reads_camel_case() {
        let Ok(req) =
            serde_json::from_str::<VoteRequest>(r#"{"venueId": "7", "voteType": "upvote"}"#)
        else {
            panic!("decode failed");
        };
        assert_eq!(req.venue_id, Some(VenueId::new(7)));
        assert_eq!(req.vote_type.as_deref(), Some("upvote"));
    }

    #[test]
    fn vote_request_tolerates_missing_and_garbage_fields() {
        let Ok(req) = serde_json::from_str::<VoteRequest>(r#"{"venueId": "abc"}"#) else {
            panic!("decode failed");
        };
        assert_eq!(req.venue_id, None);
        assert_eq!(req.vote_type, None);
    }

    #[test]
    fn cover_accepts_number_or_numeric_string() {
        let Ok(a) = serde_json::from_str::<CoverRequest>(r#"{"cover": 12.5}"#) else {
            panic!("decode failed");
        };
        let Ok(b) = serde_json::from_str::<CoverRequest>(r#"{"cover": "12.5"}"#) else {
            panic!("decode failed");
        };
        assert!((a.cover - b.cover).abs() < f64::EPSILON);
        assert!(serde_json::from_str::<CoverRequest>(r#"{"cover": "cheap"}"#).is_err());
        assert!(serde_json::from_str::<CoverRequest>("{}").is_err());
    }

    #[test]
    fn upload_response_is_camel_case() {
        let body = PhotoUploadResponse {
            message: "Photo uploaded successfully".to_string(),
            photo_url: "http://localhost:3000/uploads/1.png".to_string(),
        };
        let Ok(json) = serde_json::to_value(&body) else {
            panic!("encode failed");
        };
        assert_eq!(json["photoUrl"], "http://localhost:3000/uploads/1.png");
    }
}
