//! Core library for the `weatherdash` terminal dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider abstraction and its OpenWeather client
//! - Pure helpers for compass points, local time, UV risk and forecast buckets
//! - The weather store that the presentation layer reads from and dispatches to
//!
//! It is used by `weatherdash-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod forecast;
pub mod metrics;
pub mod model;
pub mod provider;
pub mod store;
pub mod view;

pub use config::Config;
pub use error::FetchError;
pub use model::{CurrentWeather, DailySummary, FetchStatus, Forecast, ForecastSample, WeatherReport};
pub use provider::{WeatherProvider, provider_from_config};
pub use store::{FetchDisposition, WeatherState, WeatherStore};
pub use view::DashboardView;
