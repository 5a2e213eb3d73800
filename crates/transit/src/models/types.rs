//! Core data types and enums for MBTA transit data.
//!
//! Everything here is immutable once fetched: the API is the single source
//! of truth and a run never writes back.

use chrono::{DateTime, FixedOffset};

use crate::identifiers::*;

// ============================================================================
// Enums
// ============================================================================

/// GTFS route classes, as the MBTA V3 API numbers them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RouteType {
    LightRail = 0,
    HeavyRail = 1,
    CommuterRail = 2,
    Bus = 3,
    Ferry = 4,
}

impl RouteType {
    /// Numeric value used in `filter[type]` query parameters.
    pub fn filter_value(self) -> u8 {
        self as u8
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// A transit route (e.g., "Red Line").
///
/// The per-direction arrays are parallel: index 0 and 1 are direction ids,
/// `direction_names[i]` is the label (e.g., "South") and
/// `direction_destinations[i]` the terminus (e.g., "Ashmont/Braintree").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub id: RouteIdentifier,
    pub long_name: String,
    pub direction_names: Vec<String>,
    pub direction_destinations: Vec<String>,
}

/// A stop served by a route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stop {
    pub id: StopIdentifier,
    pub name: String,
    /// Street address, when the MBTA publishes one for the stop.
    pub address: Option<String>,
}

/// A live arrival/departure prediction at a stop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prediction {
    /// Absent when the vehicle makes no further stop on this run
    /// (end of the line).
    pub departure_time: Option<DateTime<FixedOffset>>,
    pub status: Option<String>,
}

// ============================================================================
// Errors
// ============================================================================

/// A failed fetch. One logical meaning for the application (the run is
/// over); the variants only shape the message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("MBTA API returned status {0}")]
    Status(u16),
}

pub type Result<T> = std::result::Result<T, ApiError>;
