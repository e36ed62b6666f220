//! # popin-venues
//!
//! REST backend for the Popin venue-discovery app.
//!
//! Clients list venues, vote on them, set cover charges, record "pops"
//! (intent-to-visit taps) and attach photos. A background task zeroes every
//! venue's pop counter once a day at local midnight.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)          /uploads ── ServeDir
//!     │                                      │
//!     ├── VenueService (service/) ◄── Pop-reset task (scheduler/)
//!     │
//!     ├── VenueStore (persistence/)     PhotoStorage (storage/)
//!     │
//!     └── PostgreSQL                    uploads directory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod scheduler;
pub mod service;
pub mod storage;
