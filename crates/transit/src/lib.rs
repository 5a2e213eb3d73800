//! # mbta-transit
//!
//! Typed access to the MBTA V3 API for the timetable browser.
//!
//! - [`models`]: owned domain structs (routes, stops, predictions),
//!   immutable once fetched
//! - [`identifiers`]: cheap-to-clone typed ids threaded through selections
//! - [`client`]: the [`TransitApi`] fetch seam and its reqwest-backed
//!   [`MbtaClient`] implementation

pub mod client;
pub mod identifiers;
pub mod models;

pub use client::{MbtaClient, TransitApi};
pub use identifiers::{DirectionId, RouteIdentifier, StopIdentifier};
pub use models::types::{ApiError, Prediction, Result, Route, RouteType, Stop};
