//! Data Transfer Objects for REST request/response serialization.
//!
//! Venue and photo rows are returned as-is from [`crate::domain`]; only
//! request bodies and the upload acknowledgement need their own types.

pub mod venue_dto;

pub use venue_dto::*;
