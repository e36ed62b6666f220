//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::VenueService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Venue service for all business logic.
    pub venue_service: Arc<VenueService>,
}
