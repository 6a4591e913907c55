use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    FetchError,
    model::{CurrentWeather, Forecast, ForecastSample},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// The two OpenWeather endpoints a fetch cycle touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Current,
    Forecast,
}

impl Endpoint {
    fn path(self) -> &'static str {
        match self {
            Endpoint::Current => "/data/2.5/weather",
            Endpoint::Forecast => "/data/2.5/forecast",
        }
    }

    /// Shown when a rejection carries no usable `message`.
    fn fallback_message(self) -> &'static str {
        match self {
            Endpoint::Current => "City not found",
            Endpoint::Forecast => "Forecast not available",
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Point the provider at another host, e.g. a proxy or a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        city: &str,
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        tracing::debug!(%url, city, "requesting OpenWeather data");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(network_error)?;

        let status = res.status();
        let body = res.text().await.map_err(network_error)?;

        if !status.is_success() {
            let message = rejection_message(&body, endpoint.fallback_message());
            tracing::warn!(
                status = status.as_u16(),
                city,
                body = %truncate_body(&body),
                "OpenWeather rejected request"
            );
            return Err(FetchError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    feels_like: f64,
    #[serde(default)]
    humidity: u8,
    #[serde(default)]
    pressure: u32,
}

#[derive(Debug, Default, Deserialize)]
struct OwWind {
    #[serde(default)]
    speed: f64,
    #[serde(default)]
    deg: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwClouds {
    #[serde(default)]
    all: u8,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    #[serde(default)]
    timezone: i32,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwCondition>,
    #[serde(default)]
    wind: OwWind,
    #[serde(default)]
    clouds: OwClouds,
    #[serde(default)]
    visibility: u32,
    #[serde(default)]
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwCondition>,
    pop: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

impl From<OwCurrentResponse> for CurrentWeather {
    fn from(parsed: OwCurrentResponse) -> Self {
        let condition = parsed.weather.into_iter().next();
        let (condition_main, condition_description, icon_id) = match condition {
            Some(c) => (c.main, c.description, c.icon),
            None => ("Unknown".to_string(), "Unknown".to_string(), String::new()),
        };

        CurrentWeather {
            city_name: parsed.name,
            country_code: parsed.sys.country,
            observed_at_unix: parsed.dt,
            timezone_offset_seconds: parsed.timezone,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure,
            wind_speed_ms: parsed.wind.speed,
            wind_bearing_deg: parsed.wind.deg,
            clouds_pct: parsed.clouds.all,
            visibility_meters: parsed.visibility,
            sunrise_unix: parsed.sys.sunrise,
            sunset_unix: parsed.sys.sunset,
            condition_main,
            condition_description,
            icon_id,
        }
    }
}

impl From<OwForecastEntry> for ForecastSample {
    fn from(entry: OwForecastEntry) -> Self {
        let (icon_id, description) = entry
            .weather
            .into_iter()
            .next()
            .map(|w| (w.icon, w.description))
            .unwrap_or_else(|| (String::new(), "Unknown".to_string()));

        ForecastSample {
            timestamp_unix: entry.dt,
            temperature_c: entry.main.temp,
            icon_id,
            description,
            precipitation_probability: entry.pop,
        }
    }
}

impl From<OwForecastResponse> for Forecast {
    fn from(parsed: OwForecastResponse) -> Self {
        Forecast {
            city_name: parsed.city.name,
            country_code: parsed.city.country,
            timezone_offset_seconds: parsed.city.timezone,
            samples: parsed.list.into_iter().map(ForecastSample::from).collect(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, city: &str) -> Result<CurrentWeather, FetchError> {
        let parsed: OwCurrentResponse = self.get_json(Endpoint::Current, city).await?;
        Ok(parsed.into())
    }

    async fn forecast(&self, city: &str) -> Result<Forecast, FetchError> {
        let parsed: OwForecastResponse = self.get_json(Endpoint::Forecast, city).await?;
        Ok(parsed.into())
    }
}

/// Transport failure as a user-facing message. The URL is stripped because
/// its query string carries the API key.
fn network_error(err: reqwest::Error) -> FetchError {
    network_failure(err.without_url().to_string())
}

fn network_failure(message: String) -> FetchError {
    if message.is_empty() {
        FetchError::Network("Network error".to_string())
    } else {
        FetchError::Network(message)
    }
}

/// The provider's own `message`, or `fallback` when the body has none.
fn rejection_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<OwErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
