//! Domain model for MBTA transit data.

pub mod types;

pub use types::*;
