//! In-memory venue store.
//!
//! Backs the test suites and `PERSISTENCE_ENABLED=false` runs. State lives
//! behind a single [`tokio::sync::RwLock`], so each method is atomic the
//! same way a single SQL statement is.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, VenueStore};
use crate::domain::{Venue, VenueId, VenuePhoto, VoteType};

#[derive(Debug, Default)]
struct Tables {
    venues: Vec<Venue>,
    photos: Vec<VenuePhoto>,
    next_photo_id: i64,
}

impl Tables {
    fn venue_mut(&mut self, id: VenueId) -> Option<&mut Venue> {
        self.venues.iter_mut().find(|v| v.id == id)
    }
}

/// Venue store held entirely in process memory.
///
/// [`InMemoryVenueStore::set_unavailable`] makes every subsequent call fail
/// with [`StoreError::Unavailable`], which lets callers exercise their
/// failure paths.
#[derive(Debug, Default)]
pub struct InMemoryVenueStore {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
}

impl InMemoryVenueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with venues, kept in id order.
    #[must_use]
    pub fn with_venues(mut venues: Vec<Venue>) -> Self {
        venues.sort_by_key(|v| v.id);
        Self {
            tables: RwLock::new(Tables {
                venues,
                photos: Vec::new(),
                next_photo_id: 0,
            }),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Toggles simulated store failure.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl VenueStore for InMemoryVenueStore {
    async fn list_venues(&self) -> Result<Vec<Venue>, StoreError> {
        self.check()?;
        Ok(self.tables.read().await.venues.clone())
    }

    async fn find_venue(&self, id: VenueId) -> Result<Option<Venue>, StoreError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.venues.iter().find(|v| v.id == id).cloned())
    }

    async fn increment_vote(&self, id: VenueId, vote: VoteType) -> Result<u64, StoreError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let Some(venue) = tables.venue_mut(id) else {
            return Ok(0);
        };
        match vote {
            VoteType::Upvote => venue.upvotes = venue.upvotes.saturating_add(1),
            VoteType::Downvote => venue.downvotes = venue.downvotes.saturating_add(1),
        }
        Ok(1)
    }

    async fn set_cover(&self, id: VenueId, cover: f64) -> Result<u64, StoreError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let Some(venue) = tables.venue_mut(id) else {
            return Ok(0);
        };
        venue.cover = cover;
        Ok(1)
    }

    async fn increment_pop(&self, id: VenueId) -> Result<u64, StoreError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let Some(venue) = tables.venue_mut(id) else {
            return Ok(0);
        };
        venue.pop = venue.pop.saturating_add(1);
        Ok(1)
    }

    async fn reset_pop(&self) -> Result<u64, StoreError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        for venue in &mut tables.venues {
            venue.pop = 0;
        }
        Ok(tables.venues.len() as u64)
    }

    async fn insert_photo(
        &self,
        venue_id: VenueId,
        photo_url: &str,
    ) -> Result<VenuePhoto, StoreError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        tables.next_photo_id = tables.next_photo_id.saturating_add(1);
        let photo = VenuePhoto {
            id: tables.next_photo_id,
            venue_id,
            photo_url: photo_url.to_string(),
        };
        tables.photos.push(photo.clone());
        Ok(photo)
    }

    async fn list_photos(&self, venue_id: VenueId) -> Result<Vec<VenuePhoto>, StoreError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .photos
            .iter()
            .filter(|p| p.venue_id == venue_id)
            .cloned()
            .collect())
    }
}
