//! REST endpoint handlers organized by resource.

pub mod photo;
pub mod system;
pub mod venue;
pub mod vote;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes at the root.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(venue::routes())
        .merge(vote::routes())
        .merge(photo::routes())
        .merge(system::routes())
}
