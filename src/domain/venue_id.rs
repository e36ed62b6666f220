//! Type-safe venue identifier.
//!
//! [`VenueId`] wraps the store's `BIGINT` key. Clients send it either as a
//! path segment or as a JSON number or string, so parsing is lenient about
//! representation but strict about the value being an integer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a row in the `venues` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VenueId(i64);

impl VenueId {
    /// Wraps a raw store key.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw store key.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Coerces a boundary string into a venue id.
    ///
    /// Returns `None` when the string is not an integer, in which case no
    /// venue can match it.
    #[must_use]
    pub fn coerce(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

/// Error returned when a string is not a valid venue id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a venue id: {0:?}")]
pub struct ParseVenueIdError(String);

impl FromStr for VenueId {
    type Err = ParseVenueIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ParseVenueIdError(s.to_string()))
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for VenueId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<VenueId> for i64 {
    fn from(id: VenueId) -> Self {
        id.0
    }
}

impl<'de> Deserialize<'de> for VenueId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(n)),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn coerce_accepts_integers_only() {
        assert_eq!(VenueId::coerce("42"), Some(VenueId::new(42)));
        assert_eq!(VenueId::coerce(" 42 "), Some(VenueId::new(42)));
        assert_eq!(VenueId::coerce("abc"), None);
        assert_eq!(VenueId::coerce("4.2"), None);
        assert_eq!(VenueId::coerce(""), None);
    }

    #[test]
    fn deserializes_from_number_or_string() {
        let Ok(from_number) = serde_json::from_str::<VenueId>("7") else {
            panic!("number should parse");
        };
        let Ok(from_text) = serde_json::from_str::<VenueId>("\"7\"") else {
            panic!("string should parse");
        };
        assert_eq!(from_number, from_text);
        assert!(serde_json::from_str::<VenueId>("\"seven\"").is_err());
        assert!(serde_json::from_str::<VenueId>("null").is_err());
    }

    #[test]
    fn serializes_as_bare_number() {
        let Ok(json) = serde_json::to_string(&VenueId::new(9)) else {
            panic!("serialization failed");
        };
        assert_eq!(json, "9");
    }

    #[test]
    fn display_matches_raw_value() {
        assert_eq!(VenueId::new(-3).to_string(), "-3");
    }
}
