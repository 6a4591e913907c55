//! The weather store: single source of truth for the dashboard.
//!
//! State changes only through [`reduce`]. [`WeatherStore`] wraps the state
//! with an injected [`WeatherProvider`] and exposes the read accessors plus
//! the three mutation entry points the presentation layer may use.

use parking_lot::Mutex;

use crate::{
    FetchError,
    model::{CurrentWeather, FetchStatus, Forecast, WeatherReport},
    provider::WeatherProvider,
};

/// Identifies one fetch cycle. Later requests get larger ids.
pub type RequestId = u64;

/// Single result of a fetch cycle: both payloads, or a message.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Loaded(WeatherReport),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Starts a new fetch cycle and makes it the latest.
    FetchRequested,
    FetchSettled {
        request: RequestId,
        outcome: FetchOutcome,
    },
    AddFavorite(String),
    RemoveFavorite(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherState {
    pub current: Option<CurrentWeather>,
    pub forecast: Option<Forecast>,
    /// Unique city names in insertion order.
    pub favorites: Vec<String>,
    pub status: FetchStatus,
    pub error: Option<String>,
    latest_request: RequestId,
}

impl WeatherState {
    /// Id of the most recently requested fetch cycle, 0 before the first one.
    pub fn latest_request(&self) -> RequestId {
        self.latest_request
    }

    /// Current weather and forecast, present only together.
    pub fn report(&self) -> Option<WeatherReport> {
        match (&self.current, &self.forecast) {
            (Some(current), Some(forecast)) => Some(WeatherReport {
                current: current.clone(),
                forecast: forecast.clone(),
            }),
            _ => None,
        }
    }
}

/// Apply `action` to `state`. Returns whether the action took effect.
pub fn reduce(state: &mut WeatherState, action: Action) -> bool {
    match action {
        Action::FetchRequested => {
            state.latest_request += 1;
            state.status = FetchStatus::Loading;
            state.error = None;
            true
        }

        Action::FetchSettled { request, outcome } => {
            if request != state.latest_request {
                return false;
            }
            match outcome {
                FetchOutcome::Loaded(report) => {
                    state.status = FetchStatus::Succeeded;
                    state.current = Some(report.current);
                    state.forecast = Some(report.forecast);
                }
                FetchOutcome::Failed(message) => {
                    state.status = FetchStatus::Failed;
                    state.error = Some(message);
                }
            }
            true
        }

        Action::AddFavorite(city) => {
            if state.favorites.contains(&city) {
                return false;
            }
            state.favorites.push(city);
            true
        }

        Action::RemoveFavorite(city) => {
            let before = state.favorites.len();
            state.favorites.retain(|c| *c != city);
            state.favorites.len() != before
        }
    }
}

/// Fetch current weather, then the forecast, stopping at the first failure.
pub async fn load_report(provider: &dyn WeatherProvider, city: &str) -> FetchOutcome {
    match fetch_report(provider, city).await {
        Ok(report) => FetchOutcome::Loaded(report),
        Err(err) => {
            tracing::warn!(city, error = %err, "fetch cycle failed");
            FetchOutcome::Failed(err.user_message().to_string())
        }
    }
}

async fn fetch_report(
    provider: &dyn WeatherProvider,
    city: &str,
) -> Result<WeatherReport, FetchError> {
    let current = provider.current_weather(city).await?;
    let forecast = provider.forecast(city).await?;
    Ok(WeatherReport { current, forecast })
}

/// What happened to a `fetch_weather` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchDisposition {
    /// Blank city name; nothing was requested.
    Skipped,
    /// Result was written to the store.
    Applied,
    /// A newer fetch started meanwhile; the result was dropped.
    Superseded,
}

#[derive(Debug)]
pub struct WeatherStore {
    provider: Box<dyn WeatherProvider>,
    state: Mutex<WeatherState>,
}

impl WeatherStore {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            state: Mutex::new(WeatherState::default()),
        }
    }

    /// Seed favorites, skipping duplicates.
    pub fn with_favorites<I>(self, favorites: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        {
            let mut state = self.state.lock();
            for city in favorites {
                reduce(&mut state, Action::AddFavorite(city));
            }
        }
        self
    }

    fn dispatch(&self, action: Action) -> bool {
        reduce(&mut self.state.lock(), action)
    }

    pub fn snapshot(&self) -> WeatherState {
        self.state.lock().clone()
    }

    pub fn current(&self) -> Option<CurrentWeather> {
        self.state.lock().current.clone()
    }

    pub fn forecast(&self) -> Option<Forecast> {
        self.state.lock().forecast.clone()
    }

    pub fn favorites(&self) -> Vec<String> {
        self.state.lock().favorites.clone()
    }

    pub fn status(&self) -> FetchStatus {
        self.state.lock().status
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    /// Run one fetch cycle for `city`.
    ///
    /// Blank input is ignored. Only the latest cycle's result is ever applied.
    pub async fn fetch_weather(&self, city: &str) -> FetchDisposition {
        let city = city.trim();
        if city.is_empty() {
            return FetchDisposition::Skipped;
        }

        let request = {
            let mut state = self.state.lock();
            reduce(&mut state, Action::FetchRequested);
            state.latest_request
        };
        tracing::info!(city, request, "fetching weather");

        let outcome = load_report(self.provider.as_ref(), city).await;

        if self.dispatch(Action::FetchSettled { request, outcome }) {
            FetchDisposition::Applied
        } else {
            tracing::debug!(city, request, "discarding stale fetch result");
            FetchDisposition::Superseded
        }
    }

    /// Returns `false` if the city was already a favorite.
    pub fn add_favorite(&self, city: &str) -> bool {
        let added = self.dispatch(Action::AddFavorite(city.to_string()));
        if added {
            tracing::debug!(city, "added favorite");
        }
        added
    }

    /// Returns `false` if the city was not a favorite.
    pub fn remove_favorite(&self, city: &str) -> bool {
        let removed = self.dispatch(Action::RemoveFavorite(city.to_string()));
        if removed {
            tracing::debug!(city, "removed favorite");
        }
        removed
    }
}
