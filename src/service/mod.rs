//! Service layer: business logic orchestration.
//!
//! [`VenueService`] coordinates venue reads and updates, photo uploads and
//! the pop reset. It owns the injected store and file store capabilities
//! and turns their failures into [`crate::error::ApiError`] values.

pub mod venue_service;

pub use venue_service::VenueService;
