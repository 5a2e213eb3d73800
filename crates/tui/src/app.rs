//! The step controller: a forward-only state machine over the four
//! selection screens, plus the fetch dispatch that feeds it.
//!
//! Route -> Stop -> Direction -> Timetable. Each confirmation records the
//! selection, advances the stage, and (except for Direction, which is
//! derived from data already in hand) spawns the next fetch. Results come
//! back as [`Message`]s on the channel drained by the main loop, so at most
//! one fetch is ever in flight.

use std::sync::Arc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use mbta_transit::{
    ApiError, DirectionId, Prediction, Route, RouteIdentifier, RouteType, Stop, StopIdentifier,
    TransitApi,
};

use crate::items;
use crate::list::ItemList;

/// Which selection screen is on display. Transitions only ever move to the
/// next variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Routes,
    Stops,
    Directions,
    Timetable,
}

/// Outcome of a fetch, delivered to the main loop.
#[derive(Debug)]
pub enum Message {
    Routes(Vec<Route>),
    Stops(Vec<Stop>),
    Predictions(Vec<Prediction>),
    FetchFailed(ApiError),
}

#[derive(Clone, Debug)]
struct SelectedRoute {
    index: usize,
    id: RouteIdentifier,
}

pub struct App {
    client: Arc<dyn TransitApi>,
    tx: mpsc::UnboundedSender<Message>,
    stage: Stage,
    /// Fetched routes are retained: the Direction stage reads its options
    /// out of the selected route's direction arrays.
    routes: Vec<Route>,
    route_list: ItemList,
    stop_list: ItemList,
    direction_list: ItemList,
    timetable_list: ItemList,
    selected_route: Option<SelectedRoute>,
    selected_stop: Option<StopIdentifier>,
    selected_direction: Option<DirectionId>,
    /// A failed fetch ends the run; only the message is kept for display.
    error: Option<ApiError>,
    quit: bool,
}

impl App {
    pub fn new(client: Arc<dyn TransitApi>, tx: mpsc::UnboundedSender<Message>) -> Self {
        Self {
            client,
            tx,
            stage: Stage::Routes,
            routes: Vec::new(),
            route_list: ItemList::new("Select a Route"),
            stop_list: ItemList::new("Select a Stop"),
            direction_list: ItemList::new("Select a Direction"),
            timetable_list: ItemList::new("Timetable"),
            selected_route: None,
            selected_stop: None,
            selected_direction: None,
            error: None,
            quit: false,
        }
    }

    /// Kick off the initial route fetch. Subway only: light and heavy rail.
    pub fn start(&self) {
        let client = Arc::clone(&self.client);
        self.dispatch(async move {
            match client
                .routes(&[RouteType::LightRail, RouteType::HeavyRail])
                .await
            {
                Ok(routes) => Message::Routes(routes),
                Err(err) => Message::FetchFailed(err),
            }
        });
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub fn current_list_mut(&mut self) -> &mut ItemList {
        match self.stage {
            Stage::Routes => &mut self.route_list,
            Stage::Stops => &mut self.stop_list,
            Stage::Directions => &mut self.direction_list,
            Stage::Timetable => &mut self.timetable_list,
        }
    }

    pub fn on_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            // Resize is handled implicitly: every pass re-renders into the
            // current frame area.
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.on_key(key);
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }

        // The filter prompt owns every other key while it is active,
        // including Enter, so no stage can advance mid-filter.
        if self.current_list_mut().is_filtering() {
            self.current_list_mut().on_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Enter => self.confirm(),
            _ => self.current_list_mut().on_key(key),
        }
    }

    /// Advance to the next stage off the highlighted item.
    fn confirm(&mut self) {
        match self.stage {
            Stage::Routes => {
                let Some(item) = self.route_list.selected() else {
                    return;
                };
                let selected = SelectedRoute {
                    index: item.index.unwrap_or(0),
                    id: RouteIdentifier::new(&item.id),
                };
                let route_id = selected.id.clone();
                self.selected_route = Some(selected);
                self.stage = Stage::Stops;
                self.fetch_stops(route_id);
            }
            Stage::Stops => {
                let Some(item) = self.stop_list.selected() else {
                    return;
                };
                self.selected_stop = Some(StopIdentifier::new(&item.id));
                self.stage = Stage::Directions;
                // No fetch: direction options live on the route we already
                // hold, at the index recorded when it was confirmed.
                let route = self
                    .selected_route
                    .as_ref()
                    .and_then(|selected| self.routes.get(selected.index));
                if let Some(route) = route {
                    self.direction_list.set_items(items::direction_items(route));
                }
            }
            Stage::Directions => {
                let Some(direction) = self
                    .direction_list
                    .selected()
                    .and_then(|item| item.index)
                    .and_then(DirectionId::from_index)
                else {
                    return;
                };
                self.selected_direction = Some(direction);
                self.stage = Stage::Timetable;
                self.fetch_predictions();
            }
            // Final screen; the traversal is linear and done.
            Stage::Timetable => {}
        }
    }

    pub fn on_message(&mut self, message: Message) {
        match message {
            Message::Routes(routes) => {
                self.route_list.set_items(items::route_items(&routes));
                self.routes = routes;
            }
            Message::Stops(stops) => {
                self.stop_list.set_items(items::stop_items(&stops));
            }
            Message::Predictions(predictions) => {
                self.timetable_list
                    .set_items(items::timetable_items(&predictions));
            }
            Message::FetchFailed(err) => {
                tracing::error!(%err, "fetch failed");
                self.error = Some(err);
            }
        }
    }

    fn fetch_stops(&self, route: RouteIdentifier) {
        let client = Arc::clone(&self.client);
        self.dispatch(async move {
            match client.stops(&route).await {
                Ok(stops) => Message::Stops(stops),
                Err(err) => Message::FetchFailed(err),
            }
        });
    }

    fn fetch_predictions(&self) {
        let (Some(route), Some(stop), Some(direction)) = (
            &self.selected_route,
            &self.selected_stop,
            self.selected_direction,
        ) else {
            return;
        };
        let (route, stop) = (route.id.clone(), stop.clone());
        let client = Arc::clone(&self.client);
        self.dispatch(async move {
            match client.predictions(&stop, &route, direction).await {
                Ok(predictions) => Message::Predictions(predictions),
                Err(err) => Message::FetchFailed(err),
            }
        });
    }

    fn dispatch(&self, fetch: impl std::future::Future<Output = Message> + Send + 'static) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            // The receiver only closes on shutdown; a dropped result is fine.
            let _ = tx.send(fetch.await);
        });
    }
}
