//! Background tasks that run for the lifetime of the process.

pub mod pop_reset;

pub use pop_reset::{spawn_pop_reset, spawn_pop_reset_with};
