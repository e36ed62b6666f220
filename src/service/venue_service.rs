//! Venue service: orchestrates store calls for every endpoint.

use std::sync::Arc;

use crate::domain::{Venue, VenueId, VenuePhoto, VoteType};
use crate::error::ApiError;
use crate::persistence::{StoreError, VenueStore};
use crate::storage::PhotoStorage;

/// Result of a successful photo upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedPhoto {
    /// Generated filename inside the file store.
    pub filename: String,
    /// Public URL recorded in `venue_photos`.
    pub photo_url: String,
}

/// Orchestration layer for venue and photo operations.
///
/// Stateless coordinator over an injected [`VenueStore`] and
/// [`PhotoStorage`]. Mutations follow the pattern: one update statement,
/// then one select of the same row. The two are not isolated from other
/// writers.
#[derive(Debug, Clone)]
pub struct VenueService {
    store: Arc<dyn VenueStore>,
    photos: Arc<dyn PhotoStorage>,
    public_base_url: String,
}

impl VenueService {
    /// Creates a new `VenueService`.
    ///
    /// `public_base_url` is the scheme and authority clients use to reach
    /// `/uploads`; a trailing slash is ignored.
    #[must_use]
    pub fn new(
        store: Arc<dyn VenueStore>,
        photos: Arc<dyn PhotoStorage>,
        public_base_url: &str,
    ) -> Self {
        Self {
            store,
            photos,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns every venue in store order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Store`] if the query fails.
    pub async fn list_venues(&self) -> Result<Vec<Venue>, ApiError> {
        self.store
            .list_venues()
            .await
            .map_err(|e| store_failure("Error fetching venues", &e))
    }

    /// Returns a single venue.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::VenueNotFound`] if no venue has this id, or
    /// [`ApiError::Store`] if the query fails.
    pub async fn get_venue(&self, id: VenueId) -> Result<Venue, ApiError> {
        self.store
            .find_venue(id)
            .await
            .map_err(|e| store_failure("Error fetching venue", &e))?
            .ok_or(ApiError::VenueNotFound)
    }

    /// Counts one vote and returns the updated venue.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Store`] if either statement fails, or
    /// [`ApiError::VenueNotFound`] if the venue does not exist.
    pub async fn vote(&self, id: VenueId, vote: VoteType) -> Result<Venue, ApiError> {
        self.store
            .increment_vote(id, vote)
            .await
            .map_err(|e| store_failure("Error updating vote", &e))?;
        tracing::debug!(venue_id = %id, %vote, "vote recorded");
        self.reselect(id).await
    }

    /// Overwrites the cover charge and returns the updated venue.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Store`] if either statement fails, or
    /// [`ApiError::VenueNotFound`] if the venue does not exist.
    pub async fn set_cover(&self, id: VenueId, cover: f64) -> Result<Venue, ApiError> {
        self.store
            .set_cover(id, cover)
            .await
            .map_err(|e| store_failure("Error updating cover charge", &e))?;
        self.reselect(id).await
    }

    /// Adds one to the venue's popularity and returns the updated venue.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Store`] if either statement fails, or
    /// [`ApiError::VenueNotFound`] if the venue does not exist.
    pub async fn record_pop(&self, id: VenueId) -> Result<Venue, ApiError> {
        self.store
            .increment_pop(id)
            .await
            .map_err(|e| store_failure("Error updating pop", &e))?;
        self.reselect(id).await
    }

    /// Zeroes `pop` on every venue and returns how many rows changed.
    ///
    /// # Errors
    ///
    /// Returns the raw [`StoreError`]; the scheduler only logs it.
    pub async fn reset_pop_counts(&self) -> Result<u64, StoreError> {
        self.store.reset_pop().await
    }

    /// Stores a photo file and records its public URL against the venue.
    ///
    /// The venue is not checked for existence. If recording the URL fails
    /// the stored file stays on disk.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Store`] with details attached if either the file
    /// store or the database fails.
    pub async fn upload_photo(
        &self,
        venue_id: VenueId,
        original_name: Option<&str>,
        data: &[u8],
    ) -> Result<UploadedPhoto, ApiError> {
        let filename = self.photos.put(original_name, data).await.map_err(|e| {
            tracing::error!(%venue_id, error = %e, "photo write failed");
            ApiError::store_with_details("Error uploading photo", &e)
        })?;

        let photo_url = self.photo_url(&filename);
        self.store
            .insert_photo(venue_id, &photo_url)
            .await
            .map_err(|e| {
                tracing::error!(%venue_id, error = %e, "photo row insert failed");
                ApiError::store_with_details("Error uploading photo", &e)
            })?;

        tracing::info!(%venue_id, %photo_url, "photo uploaded");
        Ok(UploadedPhoto {
            filename,
            photo_url,
        })
    }

    /// Returns every photo recorded for the venue.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Store`] with details attached if the query fails.
    pub async fn list_photos(&self, venue_id: VenueId) -> Result<Vec<VenuePhoto>, ApiError> {
        self.store.list_photos(venue_id).await.map_err(|e| {
            tracing::error!(%venue_id, error = %e, "photo query failed");
            ApiError::store_with_details("Error fetching photos", &e)
        })
    }

    /// Builds the public URL for a stored filename.
    #[must_use]
    pub fn photo_url(&self, filename: &str) -> String {
        format!("{}/uploads/{filename}", self.public_base_url)
    }

    async fn reselect(&self, id: VenueId) -> Result<Venue, ApiError> {
        self.store
            .find_venue(id)
            .await
            .map_err(|e| store_failure("Error fetching updated venue", &e))?
            .ok_or(ApiError::VenueNotFound)
    }
}

/// Logs a store failure and hides it behind a fixed message.
fn store_failure(message: &'static str, err: &StoreError) -> ApiError {
    tracing::error!(error = %err, "{message}");
    ApiError::store(message)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::InMemoryVenueStore;
    use crate::storage::StorageError;

    #[derive(Debug)]
    struct FailingStorage;

    #[async_trait::async_trait]
    impl PhotoStorage for FailingStorage {
        async fn put(&self, _: Option<&str>, _: &[u8]) -> Result<String, StorageError> {
            Err(StorageError::Io(std::io::Error::other("disk full")))
        }
    }

    #[derive(Debug)]
    struct FixedNameStorage;

    #[async_trait::async_trait]
    impl PhotoStorage for FixedNameStorage {
        async fn put(&self, _: Option<&str>, _: &[u8]) -> Result<String, StorageError> {
            Ok("1700000000000.png".to_string())
        }
    }

    fn make_service(photos: Arc<dyn PhotoStorage>) -> (VenueService, Arc<InMemoryVenueStore>) {
        let store = Arc::new(InMemoryVenueStore::with_venues(vec![
            Venue::new(VenueId::new(1), "Blue Room"),
            Venue::new(VenueId::new(2), "Cellar"),
        ]));
        let service = VenueService::new(
            Arc::clone(&store) as Arc<dyn VenueStore>,
            photos,
            "http://localhost:3000/",
        );
        (service, store)
    }

    #[tokio::test]
    async fn vote_increments_only_selected_counter() {
        let (service, _) = make_service(Arc::new(FixedNameStorage));
        let id = VenueId::new(1);

        let Ok(venue) = service.vote(id, VoteType::Upvote).await else {
            panic!("vote failed");
        };
        assert_eq!((venue.upvotes, venue.downvotes), (1, 0));

        let Ok(venue) = service.vote(id, VoteType::Downvote).await else {
            panic!("vote failed");
        };
        assert_eq!((venue.upvotes, venue.downvotes), (1, 1));
    }

    #[tokio::test]
    async fn record_pop_k_times_adds_k() {
        let (service, _) = make_service(Arc::new(FixedNameStorage));
        let id = VenueId::new(2);
        for _ in 0..5 {
            let _ = service.record_pop(id).await;
        }
        let Ok(venue) = service.get_venue(id).await else {
            panic!("venue missing");
        };
        assert_eq!(venue.pop, 5);
    }

    #[tokio::test]
    async fn updates_on_missing_venue_are_not_found() {
        let (service, _) = make_service(Arc::new(FixedNameStorage));
        let missing = VenueId::new(404);
        assert!(matches!(
            service.record_pop(missing).await,
            Err(ApiError::VenueNotFound)
        ));
        assert!(matches!(
            service.set_cover(missing, 5.0).await,
            Err(ApiError::VenueNotFound)
        ));
    }

    #[tokio::test]
    async fn store_failures_use_fixed_messages() {
        let (service, store) = make_service(Arc::new(FixedNameStorage));
        store.set_unavailable(true);

        let Err(err) = service.list_venues().await else {
            panic!("expected failure");
        };
        assert_eq!(err.to_string(), "Error fetching venues");

        let Err(ApiError::Store { message, details }) = service.record_pop(VenueId::new(1)).await
        else {
            panic!("expected store failure");
        };
        assert_eq!(message, "Error updating pop");
        assert!(details.is_none());
    }

    #[tokio::test]
    async fn upload_records_url_under_public_base() {
        let (service, _) = make_service(Arc::new(FixedNameStorage));
        let Ok(uploaded) = service
            .upload_photo(VenueId::new(7), Some("a.png"), b"bytes")
            .await
        else {
            panic!("upload failed");
        };
        assert_eq!(
            uploaded.photo_url,
            "http://localhost:3000/uploads/1700000000000.png"
        );

        let Ok(photos) = service.list_photos(VenueId::new(7)).await else {
            panic!("list failed");
        };
        assert_eq!(photos.len(), 1);
        assert!(photos.iter().any(|p| p.photo_url == uploaded.photo_url));
    }

    #[tokio::test]
    async fn upload_failure_attaches_details() {
        let (service, store) = make_service(Arc::new(FailingStorage));
        let Err(ApiError::Store { message, details }) =
            service.upload_photo(VenueId::new(1), None, b"x").await
        else {
            panic!("expected store failure");
        };
        assert_eq!(message, "Error uploading photo");
        assert_eq!(details.as_deref(), Some("storage I/O error: disk full"));

        let Ok(photos) = store.list_photos(VenueId::new(1)).await else {
            panic!("list failed");
        };
        assert!(photos.is_empty());
    }

    #[tokio::test]
    async fn reset_pop_counts_zeroes_all() {
        let (service, _) = make_service(Arc::new(FixedNameStorage));
        let _ = service.record_pop(VenueId::new(1)).await;
        let _ = service.record_pop(VenueId::new(2)).await;

        tokio_test::assert_ok!(service.reset_pop_counts().await);

        let Ok(venues) = service.list_venues().await else {
            panic!("list failed");
        };
        assert!(venues.iter().all(|v| v.pop == 0));
    }
}
