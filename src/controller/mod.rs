//! The map interaction controller
//!
//! One [`MapController`] drives a whole page: it owns the map widget and the
//! page surface, talks to the geocoder and the prediction backend, and turns
//! every answer (or failure) into something visible on the page.
//!
//! Operations take `&self`, so several requests can be in flight at once.
//! Each request family numbers its requests and a response is only rendered
//! while it is the latest of its family; older ones come back as
//! [`MapError::Superseded`]. Widget and page locks are never held across an
//! `.await`.

pub mod sequence;

use crate::{
    core::{config::ControllerOptions, constants::*, geo::Coordinate},
    data::{
        alert::{AlertRequest, AlertResponse},
        geocoding::Suggestion,
        prediction::{Channel, ImageUpload, PredictionReport, PredictionResult, SatelliteRequest},
    },
    input::{
        events::{ControllerEvent, ControllerEventKind, EventHandled, UiEvent},
        handler::EventManager,
    },
    services::{
        backend::{HttpBackend, PredictionBackend},
        client::build_client,
        geocoding::{Geocoder, MapboxGeocoder},
    },
    ui::{elements::MessageTone, render, traits::MapWidget, traits::UiSurface},
    MapError, Result,
};
use sequence::{RequestSequence, Ticket};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Per-page interaction state that outlives a single request
#[derive(Debug, Clone, Default)]
struct Session {
    suggestions: Vec<Suggestion>,
    selected: Option<Coordinate>,
    last_report: Option<PredictionReport>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct MapController<M, U> {
    options: ControllerOptions,
    map: Mutex<M>,
    ui: Mutex<U>,
    geocoder: Arc<dyn Geocoder>,
    backend: Arc<dyn PredictionBackend>,
    session: Mutex<Session>,
    events: Mutex<EventManager>,
    search_requests: RequestSequence,
    prediction_requests: RequestSequence,
    camera_requests: RequestSequence,
    alert_requests: RequestSequence,
}

impl<M: MapWidget, U: UiSurface> MapController<M, U> {
    /// Puts the map at the default view with the marker on the default center
    pub fn initialize(
        mut map: M,
        ui: U,
        options: ControllerOptions,
        geocoder: Arc<dyn Geocoder>,
        backend: Arc<dyn PredictionBackend>,
    ) -> Result<Self> {
        options.validate()?;
        let view = &options.map;
        map.focus(view.default_center, view.default_zoom);
        log::debug!(
            "Map initialized in #{} at {} zoom {}",
            view.container,
            view.default_center,
            view.default_zoom
        );

        Ok(Self {
            options,
            map: Mutex::new(map),
            ui: Mutex::new(ui),
            geocoder,
            backend,
            session: Mutex::new(Session::default()),
            events: Mutex::new(EventManager::new()),
            search_requests: RequestSequence::new(),
            prediction_requests: RequestSequence::new(),
            camera_requests: RequestSequence::new(),
            alert_requests: RequestSequence::new(),
        })
    }

    /// Wires the Mapbox geocoder and the HTTP backend from `options.endpoints`
    pub fn with_http(map: M, ui: U, options: ControllerOptions) -> Result<Self> {
        let endpoints = &options.endpoints;
        let geocoder = if options.features.search {
            MapboxGeocoder::from_endpoints(endpoints)?
        } else {
            // Pages without a search box run without a token
            MapboxGeocoder::new(endpoints.token().unwrap_or_default())
                .with_base_url(endpoints.geocoding_url.clone())
                .with_client(build_client(endpoints)?)
        };
        let backend = HttpBackend::from_endpoints(endpoints)?;
        Self::initialize(map, ui, options, Arc::new(geocoder), Arc::new(backend))
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    /// Runs `f` with exclusive access to the map widget
    pub fn with_map<R>(&self, f: impl FnOnce(&mut M) -> R) -> R {
        f(&mut lock(&self.map))
    }

    /// Runs `f` with exclusive access to the page surface
    pub fn with_ui<R>(&self, f: impl FnOnce(&mut U) -> R) -> R {
        f(&mut lock(&self.ui))
    }

    /// Location picked by drag, suggestion or search, if any
    pub fn selected_location(&self) -> Option<Coordinate> {
        lock(&self.session).selected
    }

    /// Suggestions currently listed
    pub fn suggestions(&self) -> Vec<Suggestion> {
        lock(&self.session).suggestions.clone()
    }

    pub fn last_report(&self) -> Option<PredictionReport> {
        lock(&self.session).last_report.clone()
    }

    /// Registers a listener for controller events.
    ///
    /// Listeners run synchronously and must not call back into the controller.
    pub fn on<F>(&self, kind: ControllerEventKind, callback: F)
    where
        F: Fn(&ControllerEvent) + Send + Sync + 'static,
    {
        let mut events = lock(&self.events);
        events.on(kind, callback);
        log::debug!(
            "{} listener(s) registered for {:?}",
            events.listener_count(kind),
            kind
        );
    }

    /// Routes one user interaction to its operation.
    ///
    /// Failures are already on screen when this returns `Err`; superseded
    /// responses count as handled.
    pub async fn dispatch(&self, event: UiEvent) -> Result<EventHandled> {
        let features = self.options.features;
        if event.is_network_bound() {
            log::debug!("Dispatching {} (remote call)", event.name());
        } else {
            log::debug!("Dispatching {}", event.name());
        }

        let outcome = match event {
            UiEvent::SearchInput { query } if features.search => {
                self.on_search_input(&query).await.map(drop)
            }
            UiEvent::SearchSubmit { query } if features.search => {
                self.search_submit(&query).await.map(drop)
            }
            UiEvent::SuggestionClicked { index } if features.search => {
                self.select_suggestion_at(index).map(drop)
            }
            UiEvent::MarkerDragEnd if features.has_map() => {
                self.on_marker_drag_end();
                Ok(())
            }
            UiEvent::PredictClicked if features.satellite => {
                self.predict_from_center().await.map(drop)
            }
            UiEvent::AlertSubmitted { email } if features.alert => {
                self.submit_alert(&email).await.map(drop)
            }
            UiEvent::ImageSubmitted { image } if features.camera => {
                self.submit_image_for_prediction(&image).await.map(drop)
            }
            other => {
                log::debug!("{} ignored, feature disabled on this page", other.name());
                return Ok(EventHandled::NotHandled);
            }
        };

        match outcome {
            Ok(()) => Ok(EventHandled::Handled),
            Err(err) if err.is_superseded() => Ok(EventHandled::Handled),
            Err(err) => Err(err),
        }
    }

    /// Recenters the map on the marker after a drag, at the focused zoom
    pub fn on_marker_drag_end(&self) -> Coordinate {
        let position = self.with_map(|map| map.marker_position());
        self.move_to(position);
        position
    }

    /// Geocodes `query`; short queries yield nothing and send no request
    pub async fn search_suggestions(&self, query: &str) -> Result<Vec<Suggestion>> {
        if query.chars().count() <= self.options.map.min_query_chars {
            return Ok(Vec::new());
        }
        self.geocoder.geocode(query).await
    }

    /// Search box handler: refreshes the suggestion list for `query`
    pub async fn on_search_input(&self, query: &str) -> Result<Vec<Suggestion>> {
        let ticket = self.search_requests.issue();
        if query.chars().count() <= self.options.map.min_query_chars {
            self.clear_suggestions();
            return Ok(Vec::new());
        }

        let outcome = self.search_suggestions(query).await;
        self.ensure_current(&self.search_requests, ticket, "search")?;

        match outcome {
            Ok(suggestions) => {
                self.show_suggestions(&suggestions);
                self.emit(ControllerEvent::SuggestionsShown {
                    query: query.to_string(),
                    suggestions: suggestions.clone(),
                });
                Ok(suggestions)
            }
            Err(err) => {
                self.clear_suggestions();
                Err(self.fail("search", err))
            }
        }
    }

    /// Fills the search box, moves to the suggestion and closes the list
    pub fn select_suggestion(&self, suggestion: &Suggestion) {
        // A list still in flight must not reopen after the pick
        self.search_requests.issue();
        let search_input = &self.options.elements.search_input;
        self.with_ui(|ui| ui.set_input_value(search_input, &suggestion.label));
        self.clear_suggestions();
        self.move_to(suggestion.value);
    }

    pub fn select_suggestion_at(&self, index: usize) -> Result<Suggestion> {
        let suggestion = lock(&self.session)
            .suggestions
            .get(index)
            .cloned()
            .ok_or_else(|| MapError::Validation(format!("no suggestion at index {}", index)))?;
        self.select_suggestion(&suggestion);
        Ok(suggestion)
    }

    /// Search button / Enter: jumps to the first match
    pub async fn search_submit(&self, query: &str) -> Result<Option<Suggestion>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(self.fail("search", MapError::Validation(MSG_EMPTY_QUERY.to_string())));
        }

        let ticket = self.search_requests.issue();
        let outcome = self.geocoder.geocode(query).await;
        self.ensure_current(&self.search_requests, ticket, "search")?;

        match outcome {
            Ok(suggestions) => match suggestions.into_iter().next() {
                Some(first) => {
                    self.clear_suggestions();
                    self.move_to(first.value);
                    Ok(Some(first))
                }
                None => {
                    self.show_message(MSG_NO_RESULTS, MessageTone::Neutral);
                    Ok(None)
                }
            },
            Err(err) => Err(self.fail("search", err)),
        }
    }

    /// Predict button: submits the current map center
    pub async fn predict_from_center(&self) -> Result<PredictionReport> {
        let center = self.with_map(|map| map.center());
        self.submit_prediction(center).await
    }

    /// Requests the satellite, weather and combined prediction for `location`
    pub async fn submit_prediction(&self, location: Coordinate) -> Result<PredictionReport> {
        if !location.is_valid() {
            return Err(self.fail(
                "predict",
                MapError::InvalidCoordinates(location.to_string()),
            ));
        }

        let ticket = self.prediction_requests.issue();
        self.move_to(location);
        let request = SatelliteRequest::new(location, self.options.map.focused_zoom);
        log::debug!(
            "Submitting prediction #{} for {} at zoom {}",
            ticket.value(),
            request.location,
            request.zoom
        );

        let outcome = self.backend.predict_satellite(&request).await;
        self.ensure_current(&self.prediction_requests, ticket, "prediction")?;

        match outcome {
            Ok(response) => {
                let report = PredictionReport::from(response);
                self.show_report(&report);
                Ok(report)
            }
            Err(err) => Err(self.fail("predict", err)),
        }
    }

    /// Alert form submit, for the selected location or else the map center
    pub async fn submit_alert(&self, email: &str) -> Result<AlertResponse> {
        let location = self
            .selected_location()
            .unwrap_or_else(|| self.with_map(|map| map.center()));
        self.submit_alert_subscription(email, Some(location)).await
    }

    pub async fn submit_alert_subscription(
        &self,
        email: &str,
        location: Option<Coordinate>,
    ) -> Result<AlertResponse> {
        let email = email.trim();
        let location = match location {
            Some(location) if !email.is_empty() => location,
            _ => {
                let err = MapError::Validation(MSG_MISSING_ALERT_FIELDS.to_string());
                return Err(self.fail_alert(err));
            }
        };
        if !location.is_valid() {
            return Err(self.fail_alert(MapError::InvalidCoordinates(location.to_string())));
        }

        let ticket = self.alert_requests.issue();
        let request = AlertRequest::new(email, location);
        log::debug!("Alert request #{} for {}", ticket.value(), location);
        let outcome = self.backend.subscribe_alert(&request).await;
        self.ensure_current(&self.alert_requests, ticket, "alert")?;

        match outcome {
            Ok(answer) => {
                log::info!("Alert subscription registered for {}", location);
                self.show_message(MSG_ALERT_SUCCESS, MessageTone::Positive);
                self.emit(ControllerEvent::AlertCompleted {
                    success: true,
                    message: MSG_ALERT_SUCCESS.to_string(),
                });
                Ok(answer)
            }
            Err(err) => Err(self.fail_alert(err)),
        }
    }

    /// Camera form submit: classifies one image
    pub async fn submit_image_for_prediction(
        &self,
        image: &ImageUpload,
    ) -> Result<PredictionResult> {
        if image.is_empty() {
            return Err(self.fail(
                "camera",
                MapError::Validation(MSG_MISSING_IMAGE.to_string()),
            ));
        }

        let ticket = self.camera_requests.issue();
        let outcome = self.backend.predict_camera(image).await;
        self.ensure_current(&self.camera_requests, ticket, "camera")?;

        match outcome {
            Ok(response) => {
                let result = PredictionResult::from(response);
                self.show_report(&PredictionReport::single(Channel::Camera, result));
                Ok(result)
            }
            Err(err) => Err(self.fail("camera", err)),
        }
    }

    fn move_to(&self, location: Coordinate) {
        let zoom = self.options.map.focused_zoom;
        self.with_map(|map| map.focus(location, zoom));
        lock(&self.session).selected = Some(location);
        log::debug!("Location set to {} zoom {}", location, zoom);
        self.emit(ControllerEvent::LocationChanged { location, zoom });
    }

    fn show_suggestions(&self, suggestions: &[Suggestion]) {
        lock(&self.session).suggestions = suggestions.to_vec();
        let list = &self.options.elements.suggestions;
        self.with_ui(|ui| ui.show_suggestions(list, suggestions));
    }

    fn clear_suggestions(&self) {
        lock(&self.session).suggestions.clear();
        let list = &self.options.elements.suggestions;
        self.with_ui(|ui| ui.clear_suggestions(list));
    }

    fn show_report(&self, report: &PredictionReport) {
        let ids = &self.options.elements;
        self.with_ui(|ui| render::render_report(ui, ids, report));
        lock(&self.session).last_report = Some(report.clone());
        self.emit(ControllerEvent::PredictionRendered {
            report: report.clone(),
        });
    }

    fn show_message(&self, text: &str, tone: MessageTone) {
        let message = &self.options.elements.message;
        self.with_ui(|ui| ui.set_message(message, text, tone));
    }

    fn ensure_current(
        &self,
        requests: &RequestSequence,
        ticket: Ticket,
        operation: &str,
    ) -> Result<()> {
        requests.check(ticket).map_err(|err| {
            log::debug!("Discarding stale {} response: {}", operation, err);
            err
        })
    }

    /// Puts the failure on screen and notifies listeners
    fn fail(&self, operation: &'static str, err: MapError) -> MapError {
        let message = err.user_message();
        log::warn!("{} failed: {}", operation, err);
        self.show_message(&message, MessageTone::Negative);
        self.emit(ControllerEvent::Failed { operation, message });
        err
    }

    fn fail_alert(&self, err: MapError) -> MapError {
        let err = self.fail("alert", err);
        self.emit(ControllerEvent::AlertCompleted {
            success: false,
            message: err.user_message(),
        });
        err
    }

    fn emit(&self, event: ControllerEvent) {
        let mut events = lock(&self.events);
        events.emit(event);
        events.process_events();
    }
}
