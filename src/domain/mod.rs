//! Domain layer: venue records, photo records, identifiers and vote kinds.
//!
//! These types are shared by the store, the service layer and the HTTP
//! surface. They carry no behaviour beyond parsing and formatting.

pub mod venue;
pub mod venue_id;
pub mod vote;

pub use venue::{Venue, VenuePhoto};
pub use venue_id::VenueId;
pub use vote::VoteType;
