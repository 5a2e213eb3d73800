//! Normalization of fetched entities into list entries.
//!
//! Every list on screen displays the same shape regardless of what was
//! fetched; these pure functions do the shaping. Missing optional fields
//! become empty descriptions, never placeholders.

use mbta_transit::{Prediction, Route, Stop};

/// The uniform record every list entry is normalized into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectableItem {
    /// Entity id carried through to the next fetch. Empty for timetable
    /// rows, which are never selected.
    pub id: String,
    /// Position in the source collection, where a later stage needs to
    /// index back into it (routes, directions).
    pub index: Option<usize>,
    pub title: String,
    pub description: String,
}

pub fn route_items(routes: &[Route]) -> Vec<SelectableItem> {
    routes
        .iter()
        .enumerate()
        .map(|(i, route)| SelectableItem {
            id: route.id.to_string(),
            index: Some(i),
            title: route.long_name.clone(),
            description: match route.direction_destinations.as_slice() {
                [first, second, ..] => format!("{second} <--> {first}"),
                _ => String::new(),
            },
        })
        .collect()
}

pub fn stop_items(stops: &[Stop]) -> Vec<SelectableItem> {
    stops
        .iter()
        .map(|stop| SelectableItem {
            id: stop.id.to_string(),
            index: None,
            title: stop.name.clone(),
            description: stop.address.clone().unwrap_or_default(),
        })
        .collect()
}

/// Direction options come from the already-fetched route, not a fetch: the
/// list index doubles as the direction id.
pub fn direction_items(route: &Route) -> Vec<SelectableItem> {
    route
        .direction_names
        .iter()
        .enumerate()
        .map(|(i, name)| SelectableItem {
            id: i.to_string(),
            index: Some(i),
            title: name.clone(),
            description: route
                .direction_destinations
                .get(i)
                .cloned()
                .unwrap_or_default(),
        })
        .collect()
}

/// Predictions without a departure time mean the vehicle makes no further
/// stop on this run; they are dropped rather than shown blank.
pub fn timetable_items(predictions: &[Prediction]) -> Vec<SelectableItem> {
    predictions
        .iter()
        .filter_map(|prediction| {
            let departure = prediction.departure_time?;
            Some(SelectableItem {
                id: String::new(),
                index: None,
                title: departure.format("%H:%M:%S").to_string(),
                description: prediction.status.clone().unwrap_or_default(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use mbta_transit::{RouteIdentifier, StopIdentifier};

    fn red_line() -> Route {
        Route {
            id: RouteIdentifier::new("Red"),
            long_name: "Red Line".to_string(),
            direction_names: vec!["Outbound".to_string(), "Inbound".to_string()],
            direction_destinations: vec!["Alewife".to_string(), "Braintree".to_string()],
        }
    }

    #[test]
    fn route_description_joins_destinations_second_first() {
        let items = route_items(&[red_line()]);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "Red");
        assert_eq!(items[0].index, Some(0));
        assert_eq!(items[0].title, "Red Line");
        assert_eq!(items[0].description, "Braintree <--> Alewife");
    }

    #[test]
    fn route_without_two_destinations_gets_empty_description() {
        let mut route = red_line();
        route.direction_destinations.truncate(1);

        assert_eq!(route_items(&[route])[0].description, "");
    }

    #[test]
    fn stop_description_is_address_or_empty() {
        let stops = vec![
            Stop {
                id: StopIdentifier::new("70061"),
                name: "Alewife".to_string(),
                address: None,
            },
            Stop {
                id: StopIdentifier::new("place-davis"),
                name: "Davis".to_string(),
                address: Some("College Ave, Somerville, MA".to_string()),
            },
        ];

        let items = stop_items(&stops);

        assert_eq!(items[0].description, "");
        assert_eq!(items[1].description, "College Ave, Somerville, MA");
    }

    #[test]
    fn direction_items_pair_names_with_destinations() {
        let items = direction_items(&red_line());

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "0");
        assert_eq!(items[0].title, "Outbound");
        assert_eq!(items[0].description, "Alewife");
        assert_eq!(items[1].id, "1");
        assert_eq!(items[1].title, "Inbound");
        assert_eq!(items[1].description, "Braintree");
    }

    #[test]
    fn predictions_without_departure_are_dropped() {
        let predictions = vec![
            Prediction {
                departure_time: DateTime::parse_from_rfc3339("2024-03-01T14:32:00-05:00").ok(),
                status: None,
            },
            Prediction {
                departure_time: None,
                status: Some("End of line".to_string()),
            },
            Prediction {
                departure_time: DateTime::parse_from_rfc3339("2024-03-01T14:41:00-05:00").ok(),
                status: Some("On time".to_string()),
            },
        ];

        let items = timetable_items(&predictions);

        assert!(items.len() <= predictions.len());
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "14:32:00");
        assert_eq!(items[0].description, "");
        assert_eq!(items[1].title, "14:41:00");
        assert_eq!(items[1].description, "On time");
    }
}
