use crate::{
    Config, FetchError,
    model::{CurrentWeather, Forecast},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of weather data for a city name.
///
/// The store only talks to this trait, so tests and alternative backends can
/// be injected in place of the HTTP client.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, city: &str) -> Result<CurrentWeather, FetchError>;

    async fn forecast(&self, city: &str) -> Result<Forecast, FetchError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `weatherdash configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    let mut provider = OpenWeatherProvider::new(api_key);
    if let Some(base_url) = config.base_url.as_deref() {
        provider = provider.with_base_url(base_url);
    }

    Ok(Box::new(provider))
}
