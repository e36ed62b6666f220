//! Persistence layer: the relational `venues` / `venue_photos` tables.
//!
//! Provides the [`VenueStore`] trait, injected into the service layer as
//! `Arc<dyn VenueStore>`. The concrete implementations are
//! [`PostgresVenueStore`] (async PostgreSQL via `sqlx::PgPool`) and
//! [`InMemoryVenueStore`] (tests and local development).
//!
//! Every method is a single statement. Callers that need update-then-read
//! issue two calls and accept that another writer may run in between.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::{Venue, VenueId, VenuePhoto, VoteType};

pub use memory::InMemoryVenueStore;
pub use postgres::PostgresVenueStore;

/// Failure reported by a [`VenueStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database driver returned an error.
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// The store cannot be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Access to venue and venue photo rows.
///
/// Updates report how many rows they touched; a venue id that matches
/// nothing is not an error at this layer.
#[async_trait]
pub trait VenueStore: Send + Sync + std::fmt::Debug {
    /// Returns every venue ordered by id.
    async fn list_venues(&self) -> Result<Vec<Venue>, StoreError>;

    /// Returns the venue with the given id, if any.
    async fn find_venue(&self, id: VenueId) -> Result<Option<Venue>, StoreError>;

    /// Adds one to the counter selected by `vote`.
    async fn increment_vote(&self, id: VenueId, vote: VoteType) -> Result<u64, StoreError>;

    /// Overwrites the cover charge.
    async fn set_cover(&self, id: VenueId, cover: f64) -> Result<u64, StoreError>;

    /// Adds one to `pop`.
    async fn increment_pop(&self, id: VenueId) -> Result<u64, StoreError>;

    /// Sets `pop` to zero on every venue in one statement.
    async fn reset_pop(&self) -> Result<u64, StoreError>;

    /// Records a photo URL for a venue and returns the new row.
    async fn insert_photo(&self, venue_id: VenueId, photo_url: &str)
    -> Result<VenuePhoto, StoreError>;

    /// Returns every photo recorded for a venue, ordered by id.
    async fn list_photos(&self, venue_id: VenueId) -> Result<Vec<VenuePhoto>, StoreError>;
}
