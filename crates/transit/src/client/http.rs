//! Reqwest-backed [`TransitApi`] against the MBTA V3 API.
//!
//! The V3 API speaks JSON:API: every response wraps its records in a
//! `data` array of `{id, attributes}` resources. The envelope structs stay
//! private to this module; callers only ever see the domain model.

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, FixedOffset};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::client::TransitApi;
use crate::identifiers::{DirectionId, RouteIdentifier, StopIdentifier};
use crate::models::types::{ApiError, Prediction, Result, Route, RouteType, Stop};

const DEFAULT_BASE_URL: &str = "https://api-v3.mbta.com";

/// HTTP client for the MBTA V3 API.
///
/// The API serves anonymous requests (rate-limited); a key registered at
/// api-v3.mbta.com raises the limit and is sent as the `x-api-key` header.
pub struct MbtaClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl MbtaClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Point the client at a different host. Used by tests.
    pub fn with_base_url(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    async fn get_json<A: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Document<A>> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, ?query, "fetching");

        let mut request = self.http.get(&url).query(query);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(response.json().await?)
    }

    async fn fetch_routes(&self, types: &[RouteType]) -> Result<Vec<Route>> {
        let type_filter = types
            .iter()
            .map(|t| t.filter_value().to_string())
            .collect::<Vec<_>>()
            .join(",");
        let document: Document<RouteAttributes> = self
            .get_json("/routes", &[("filter[type]", type_filter)])
            .await?;
        Ok(document.data.into_iter().map(Route::from).collect())
    }

    async fn fetch_stops(&self, route: &RouteIdentifier) -> Result<Vec<Stop>> {
        let document: Document<StopAttributes> = self
            .get_json("/stops", &[("filter[route]", route.to_string())])
            .await?;
        Ok(document.data.into_iter().map(Stop::from).collect())
    }

    async fn fetch_predictions(
        &self,
        stop: &StopIdentifier,
        route: &RouteIdentifier,
        direction: DirectionId,
    ) -> Result<Vec<Prediction>> {
        let document: Document<PredictionAttributes> = self
            .get_json(
                "/predictions",
                &[
                    ("filter[stop]", stop.to_string()),
                    ("filter[route]", route.to_string()),
                    ("filter[direction_id]", direction.to_string()),
                    ("sort", "departure_time".to_string()),
                ],
            )
            .await?;
        Ok(document.data.into_iter().map(Prediction::from).collect())
    }
}

impl TransitApi for MbtaClient {
    fn routes<'a>(
        &'a self,
        types: &'a [RouteType],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Route>>> + Send + 'a>> {
        Box::pin(self.fetch_routes(types))
    }

    fn stops<'a>(
        &'a self,
        route: &'a RouteIdentifier,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Stop>>> + Send + 'a>> {
        Box::pin(self.fetch_stops(route))
    }

    fn predictions<'a>(
        &'a self,
        stop: &'a StopIdentifier,
        route: &'a RouteIdentifier,
        direction: DirectionId,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Prediction>>> + Send + 'a>> {
        Box::pin(self.fetch_predictions(stop, route, direction))
    }
}

// ============================================================================
// JSON:API envelope
// ============================================================================

#[derive(Debug, Deserialize)]
struct Document<A> {
    data: Vec<Resource<A>>,
}

#[derive(Debug, Deserialize)]
struct Resource<A> {
    id: String,
    attributes: A,
}

#[derive(Debug, Deserialize)]
struct RouteAttributes {
    long_name: String,
    #[serde(default)]
    direction_names: Option<Vec<String>>,
    #[serde(default)]
    direction_destinations: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct StopAttributes {
    name: String,
    #[serde(default)]
    address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PredictionAttributes {
    #[serde(default)]
    departure_time: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    status: Option<String>,
}

impl From<Resource<RouteAttributes>> for Route {
    fn from(resource: Resource<RouteAttributes>) -> Self {
        Route {
            id: RouteIdentifier::new(resource.id),
            long_name: resource.attributes.long_name,
            direction_names: resource.attributes.direction_names.unwrap_or_default(),
            direction_destinations: resource
                .attributes
                .direction_destinations
                .unwrap_or_default(),
        }
    }
}

impl From<Resource<StopAttributes>> for Stop {
    fn from(resource: Resource<StopAttributes>) -> Self {
        Stop {
            id: StopIdentifier::new(resource.id),
            name: resource.attributes.name,
            address: resource.attributes.address,
        }
    }
}

impl From<Resource<PredictionAttributes>> for Prediction {
    fn from(resource: Resource<PredictionAttributes>) -> Self {
        Prediction {
            departure_time: resource.attributes.departure_time,
            status: resource.attributes.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_route_document() {
        let body = r#"{
            "data": [{
                "id": "Red",
                "type": "route",
                "attributes": {
                    "long_name": "Red Line",
                    "direction_names": ["South", "North"],
                    "direction_destinations": ["Ashmont/Braintree", "Alewife"]
                }
            }]
        }"#;

        let document: Document<RouteAttributes> = serde_json::from_str(body).unwrap();
        let routes: Vec<Route> = document.data.into_iter().map(Route::from).collect();

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].id, RouteIdentifier::new("Red"));
        assert_eq!(routes[0].long_name, "Red Line");
        assert_eq!(routes[0].direction_names, ["South", "North"]);
        assert_eq!(
            routes[0].direction_destinations,
            ["Ashmont/Braintree", "Alewife"]
        );
    }

    #[test]
    fn decodes_stop_without_address() {
        let body = r#"{
            "data": [
                {"id": "70061", "type": "stop", "attributes": {"name": "Alewife", "address": null}},
                {"id": "place-davis", "type": "stop", "attributes": {"name": "Davis", "address": "College Ave, Somerville, MA"}}
            ]
        }"#;

        let document: Document<StopAttributes> = serde_json::from_str(body).unwrap();
        let stops: Vec<Stop> = document.data.into_iter().map(Stop::from).collect();

        assert_eq!(stops[0].address, None);
        assert_eq!(
            stops[1].address.as_deref(),
            Some("College Ave, Somerville, MA")
        );
    }

    #[test]
    fn decodes_prediction_with_missing_departure() {
        let body = r#"{
            "data": [
                {"id": "p1", "type": "prediction", "attributes": {"departure_time": "2024-03-01T14:32:00-05:00", "status": null}},
                {"id": "p2", "type": "prediction", "attributes": {"departure_time": null, "status": "End of line"}}
            ]
        }"#;

        let document: Document<PredictionAttributes> = serde_json::from_str(body).unwrap();
        let predictions: Vec<Prediction> =
            document.data.into_iter().map(Prediction::from).collect();

        assert!(predictions[0].departure_time.is_some());
        assert_eq!(predictions[1].departure_time, None);
        assert_eq!(predictions[1].status.as_deref(), Some("End of line"));
    }

    #[test]
    fn tolerates_routes_without_direction_arrays() {
        let body = r#"{
            "data": [{
                "id": "shuttle",
                "type": "route",
                "attributes": {"long_name": "Shuttle"}
            }]
        }"#;

        let document: Document<RouteAttributes> = serde_json::from_str(body).unwrap();
        let route = Route::from(document.data.into_iter().next().unwrap());

        assert!(route.direction_names.is_empty());
        assert!(route.direction_destinations.is_empty());
    }
}
