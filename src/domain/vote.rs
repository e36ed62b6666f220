//! Vote kinds accepted by `POST /vote`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Which counter a vote increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    /// Increments `upvotes`.
    Upvote,
    /// Increments `downvotes`.
    Downvote,
}

impl VoteType {
    /// Wire name of the vote kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upvote => "upvote",
            Self::Downvote => "downvote",
        }
    }

    /// Column incremented by this vote kind.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Upvote => "upvotes",
            Self::Downvote => "downvotes",
        }
    }
}

/// Error returned for any vote type other than `upvote` or `downvote`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid vote type: {0:?}")]
pub struct InvalidVoteType(String);

impl FromStr for VoteType {
    type Err = InvalidVoteType;

    /// Matching is exact: `"Upvote"` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upvote" => Ok(Self::Upvote),
            "downvote" => Ok(Self::Downvote),
            other => Err(InvalidVoteType(other.to_string())),
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_kinds() {
        assert_eq!("upvote".parse::<VoteType>(), Ok(VoteType::Upvote));
        assert_eq!("downvote".parse::<VoteType>(), Ok(VoteType::Downvote));
    }

    #[test]
    fn rejects_everything_else() {
        for bad in ["", "Upvote", "up", "sidevote", " upvote"] {
            assert!(bad.parse::<VoteType>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn column_matches_counter() {
        assert_eq!(VoteType::Upvote.column(), "upvotes");
        assert_eq!(VoteType::Downvote.column(), "downvotes");
    }
}
