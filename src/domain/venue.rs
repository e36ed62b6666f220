//! Venue and venue photo records as stored in the relational tables.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::VenueId;

/// A row of the `venues` table.
///
/// `upvotes`, `downvotes` and `pop` only ever grow by one or (for `pop`)
/// drop back to zero, so they never go negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Venue {
    /// Store-assigned identifier.
    #[schema(value_type = i64)]
    pub id: VenueId,
    /// Display name.
    pub name: String,
    /// Number of upvotes received.
    pub upvotes: i64,
    /// Number of downvotes received.
    pub downvotes: i64,
    /// Cover charge. Client-settable, no bounds enforced.
    pub cover: f64,
    /// Popularity counter, zeroed daily.
    pub pop: i64,
}

impl Venue {
    /// Creates a venue with zeroed counters and no cover charge.
    #[must_use]
    pub fn new(id: VenueId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            upvotes: 0,
            downvotes: 0,
            cover: 0.0,
            pop: 0,
        }
    }
}

/// A row of the `venue_photos` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VenuePhoto {
    /// Store-assigned identifier.
    pub id: i64,
    /// Venue the photo belongs to. Not checked against `venues`.
    #[schema(value_type = i64)]
    pub venue_id: VenueId,
    /// Fully-qualified URL under the public `/uploads` prefix.
    pub photo_url: String,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn venue_serializes_flat_with_numeric_id() {
        let venue = Venue {
            cover: 12.5,
            ..Venue::new(VenueId::new(7), "The Loft")
        };
        let Ok(json) = serde_json::to_value(&venue) else {
            panic!("serialization failed");
        };
        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "The Loft");
        assert_eq!(json["cover"], 12.5);
        assert_eq!(json["upvotes"], 0);
    }

    #[test]
    fn photo_uses_snake_case_columns() {
        let photo = VenuePhoto {
            id: 1,
            venue_id: VenueId::new(7),
            photo_url: "http://localhost:3000/uploads/1.png".to_string(),
        };
        let Ok(json) = serde_json::to_value(&photo) else {
            panic!("serialization failed");
        };
        assert_eq!(json["venue_id"], 7);
        assert_eq!(json["photo_url"], "http://localhost:3000/uploads/1.png");
    }
}
