use chrono::{DateTime, Utc};
use tracing::debug;

use crate::{
    context::weather_context_at,
    error::BackendError,
    model::{FoodItem, Location, RecommendRequest, RecommendResponse, WeatherPayload},
    sort::{SortKey, sort_items},
    theme::Theme,
};

/// A recommendation request issued for one location change.
///
/// Completions are matched back to state through the ticket; only the most
/// recently issued ticket may change what is displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestTicket {
    id: u64,
    request: RecommendRequest,
}

impl RequestTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn request(&self) -> &RecommendRequest {
        &self.request
    }
}

/// Session state of the client, driven by discrete events.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    location: Option<Location>,
    recommendations: Vec<FoodItem>,
    weather_context: String,
    weather_summary: Option<String>,
    mealtime: Option<String>,
    loading: bool,
    error: Option<String>,
    sort_key: SortKey,
    theme: Theme,
    last_issued: u64,
}

impl AppState {
    pub fn new(theme: Theme) -> Self {
        Self { theme, ..Self::default() }
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn recommendations(&self) -> &[FoodItem] {
        &self.recommendations
    }

    pub fn weather_context(&self) -> &str {
        &self.weather_context
    }

    /// Place and condition reported with the last response.
    pub fn weather_summary(&self) -> Option<&str> {
        self.weather_summary.as_deref()
    }

    pub fn mealtime(&self) -> Option<&str> {
        self.mealtime.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Replace the location. Returns a ticket when the new location can be
    /// sent to the backend.
    pub fn location_changed(&mut self, location: Location) -> Option<RequestTicket> {
        let resolvable = location.is_resolved();
        let request = RecommendRequest::from(&location);
        self.location = Some(location);

        if !resolvable {
            return None;
        }

        self.last_issued += 1;
        self.loading = true;
        self.error = None;

        debug!(id = self.last_issued, location = %request.location, "recommendation request issued");
        Some(RequestTicket { id: self.last_issued, request })
    }

    pub fn fetch_succeeded(&mut self, ticket: &RequestTicket, response: RecommendResponse) -> bool {
        self.fetch_succeeded_at(ticket, response, Utc::now())
    }

    /// Apply a successful response. Returns `false` when the ticket is stale
    /// and the response was discarded.
    pub fn fetch_succeeded_at(
        &mut self,
        ticket: &RequestTicket,
        response: RecommendResponse,
        now: DateTime<Utc>,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        self.weather_context = weather_context_at(response.weather.as_ref(), now);
        self.weather_summary = response.weather.as_ref().and_then(WeatherPayload::summary);
        self.recommendations = response.recommendations;
        self.mealtime = response.mealtime;
        self.loading = false;
        true
    }

    /// Apply a failed fetch: previous results are cleared and one generic
    /// message is shown. Returns `false` for stale tickets.
    pub fn fetch_failed(&mut self, ticket: &RequestTicket, error: &BackendError) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        debug!(id = ticket.id, reason = ?error, "recommendation request failed");
        self.recommendations.clear();
        self.weather_context.clear();
        self.weather_summary = None;
        self.mealtime = None;
        self.error = Some(error.to_string());
        self.loading = false;
        true
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
    }

    /// Recommendations in the current display order.
    pub fn sorted_recommendations(&self) -> Vec<FoodItem> {
        sort_items(&self.recommendations, self.sort_key)
    }

    fn is_current(&self, ticket: &RequestTicket) -> bool {
        let current = ticket.id == self.last_issued;
        if !current {
            debug!(id = ticket.id, latest = self.last_issued, "discarding stale recommendation response");
        }
        current
    }
}
