//! API access: the fetch seam and its reqwest-backed implementation.

use std::future::Future;
use std::pin::Pin;

use crate::identifiers::{DirectionId, RouteIdentifier, StopIdentifier};
use crate::models::types::{Prediction, Result, Route, RouteType, Stop};

pub mod http;

pub use http::MbtaClient;

/// The three read operations the application issues, each scoped by the
/// selections made so far. Implementations other than [`MbtaClient`] exist
/// only for driving the step controller in tests.
pub trait TransitApi: Send + Sync {
    /// All routes whose type is in `types`.
    fn routes<'a>(
        &'a self,
        types: &'a [RouteType],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Route>>> + Send + 'a>>;

    /// All stops served by `route`.
    fn stops<'a>(
        &'a self,
        route: &'a RouteIdentifier,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Stop>>> + Send + 'a>>;

    /// Predictions for `stop` on `route` in `direction`, ascending by
    /// departure time.
    fn predictions<'a>(
        &'a self,
        stop: &'a StopIdentifier,
        route: &'a RouteIdentifier,
        direction: DirectionId,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Prediction>>> + Send + 'a>>;
}
