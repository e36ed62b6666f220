//! PostgreSQL implementation of the venue store.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::{StoreError, VenueStore};
use crate::config::AppConfig;
use crate::domain::{Venue, VenueId, VenuePhoto, VoteType};

type VenueRow = (i64, String, i64, i64, f64, i64);
type PhotoRow = (i64, i64, String);

const SELECT_VENUE: &str = "SELECT id, name, upvotes, downvotes, cover, pop FROM venues";

/// PostgreSQL-backed venue store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresVenueStore {
    pool: PgPool,
}

impl PostgresVenueStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized from the configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError::Database`] if the first connection cannot be
    /// established.
    pub async fn connect(config: &AppConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;
        Ok(Self::new(pool))
    }
}

fn venue_from_row((id, name, upvotes, downvotes, cover, pop): VenueRow) -> Venue {
    Venue {
        id: VenueId::new(id),
        name,
        upvotes,
        downvotes,
        cover,
        pop,
    }
}

fn photo_from_row((id, venue_id, photo_url): PhotoRow) -> VenuePhoto {
    VenuePhoto {
        id,
        venue_id: VenueId::new(venue_id),
        photo_url,
    }
}

#[async_trait]
impl VenueStore for PostgresVenueStore {
    async fn list_venues(&self) -> Result<Vec<Venue>, StoreError> {
        let rows = sqlx::query_as::<_, VenueRow>(&format!("{SELECT_VENUE} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(venue_from_row).collect())
    }

    async fn find_venue(&self, id: VenueId) -> Result<Option<Venue>, StoreError> {
        let row = sqlx::query_as::<_, VenueRow>(&format!("{SELECT_VENUE} WHERE id = $1"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(venue_from_row))
    }

    async fn increment_vote(&self, id: VenueId, vote: VoteType) -> Result<u64, StoreError> {
        // The column name comes from a closed enum, never from the request.
        let column = vote.column();
        let result = sqlx::query(&format!(
            "UPDATE venues SET {column} = {column} + 1 WHERE id = $1"
        ))
        .bind(id.get())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn set_cover(&self, id: VenueId, cover: f64) -> Result<u64, StoreError> {
        let result = sqlx::query("UPDATE venues SET cover = $1 WHERE id = $2")
            .bind(cover)
            .bind(id.get())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn increment_pop(&self, id: VenueId) -> Result<u64, StoreError> {
        let result = sqlx::query("UPDATE venues SET pop = pop + 1 WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn reset_pop(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("UPDATE venues SET pop = 0")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert_photo(
        &self,
        venue_id: VenueId,
        photo_url: &str,
    ) -> Result<VenuePhoto, StoreError> {
        let row = sqlx::query_as::<_, PhotoRow>(
            "INSERT INTO venue_photos (venue_id, photo_url) VALUES ($1, $2) \
             RETURNING id, venue_id, photo_url",
        )
        .bind(venue_id.get())
        .bind(photo_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(photo_from_row(row))
    }

    async fn list_photos(&self, venue_id: VenueId) -> Result<Vec<VenuePhoto>, StoreError> {
        let rows = sqlx::query_as::<_, PhotoRow>(
            "SELECT id, venue_id, photo_url FROM venue_photos WHERE venue_id = $1 ORDER BY id",
        )
        .bind(venue_id.get())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(photo_from_row).collect())
    }
}
