use serde::{Deserialize, Serialize};

/// Observed conditions for a city, as of `observed_at_unix`.
///
/// Replaced wholesale on every successful fetch cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub city_name: String,
    pub country_code: String,
    pub observed_at_unix: i64,
    /// Shift from UTC in seconds, as reported by the provider.
    pub timezone_offset_seconds: i32,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_ms: f64,
    pub wind_bearing_deg: f64,
    pub clouds_pct: u8,
    pub visibility_meters: u32,
    pub sunrise_unix: Option<i64>,
    pub sunset_unix: Option<i64>,
    pub condition_main: String,
    pub condition_description: String,
    pub icon_id: String,
}

/// One 3-hour forecast slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp_unix: i64,
    pub temperature_c: f64,
    pub icon_id: String,
    pub description: String,
    /// Probability of precipitation in 0..=1, when the provider reports it.
    pub precipitation_probability: Option<f64>,
}

/// The 5-day/3-hour forecast, samples in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub city_name: String,
    pub country_code: String,
    pub timezone_offset_seconds: i32,
    pub samples: Vec<ForecastSample>,
}

/// Per-day aggregate derived from forecast samples. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date_label: String,
    pub min_temperature_c: f64,
    pub max_temperature_c: f64,
    pub icon_id: String,
    pub precipitation_probability: Option<f64>,
}

/// Result of a complete fetch cycle: both payloads or nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentWeather,
    pub forecast: Forecast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}
