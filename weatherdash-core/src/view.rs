//! Render-ready view of a weather report.
//!
//! Everything here is derived on demand from a [`WeatherReport`]; nothing is
//! stored back into the store.

use serde::Serialize;

use crate::{
    forecast::{daily_summaries, hourly_view},
    metrics::{
        TimeFormat, UvRisk, compass_point, day_progress_pct, format_local_time,
        precipitation_pct, uv_risk,
    },
    model::WeatherReport,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRow {
    pub time: String,
    pub icon_id: String,
    pub description: String,
    pub temperature_c: i64,
    pub precipitation_pct: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRow {
    pub day: String,
    pub icon_id: String,
    pub max_temperature_c: i64,
    pub min_temperature_c: i64,
    pub precipitation_pct: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// "City, CC"
    pub heading: String,
    pub city_name: String,
    pub local_time: String,
    pub icon_id: String,
    pub temperature_c: i64,
    pub feels_like_c: i64,
    pub condition_main: String,
    pub condition_description: String,
    pub humidity_pct: u8,
    pub wind_speed_ms: f64,
    pub wind_direction: &'static str,
    pub wind_bearing_deg: f64,
    pub clouds_pct: u8,
    pub pressure_hpa: u32,
    pub visibility_km: f64,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub day_progress_pct: f64,
    /// The free API tier has no UV data, so this is always unknown for now.
    pub uv: UvRisk,
    pub hourly: Vec<HourlyRow>,
    pub daily: Vec<DailyRow>,
}

impl DashboardView {
    pub fn from_report(report: &WeatherReport) -> Self {
        let current = &report.current;
        let tz = current.timezone_offset_seconds;

        let day_progress = match (current.sunrise_unix, current.sunset_unix) {
            (Some(rise), Some(set)) => day_progress_pct(current.observed_at_unix, rise, set),
            _ => 0.0,
        };

        let hourly = hourly_view(&report.forecast.samples)
            .iter()
            .map(|s| HourlyRow {
                time: format_local_time(s.timestamp_unix, tz, TimeFormat::Time),
                icon_id: s.icon_id.clone(),
                description: s.description.clone(),
                temperature_c: round_temp(s.temperature_c),
                precipitation_pct: precipitation_pct(s.precipitation_probability),
            })
            .collect();

        let daily = daily_summaries(&report.forecast.samples, tz)
            .into_iter()
            .map(|d| DailyRow {
                day: d.date_label,
                icon_id: d.icon_id,
                max_temperature_c: round_temp(d.max_temperature_c),
                min_temperature_c: round_temp(d.min_temperature_c),
                precipitation_pct: precipitation_pct(d.precipitation_probability),
            })
            .collect();

        let heading = if current.country_code.is_empty() {
            current.city_name.clone()
        } else {
            format!("{}, {}", current.city_name, current.country_code)
        };

        DashboardView {
            heading,
            city_name: current.city_name.clone(),
            local_time: format_local_time(current.observed_at_unix, tz, TimeFormat::DateTime),
            icon_id: current.icon_id.clone(),
            temperature_c: round_temp(current.temperature_c),
            feels_like_c: round_temp(current.feels_like_c),
            condition_main: current.condition_main.clone(),
            condition_description: current.condition_description.clone(),
            humidity_pct: current.humidity_pct,
            wind_speed_ms: current.wind_speed_ms,
            wind_direction: compass_point(current.wind_bearing_deg),
            wind_bearing_deg: current.wind_bearing_deg,
            clouds_pct: current.clouds_pct,
            pressure_hpa: current.pressure_hpa,
            visibility_km: f64::from(current.visibility_meters) / 1000.0,
            sunrise: current
                .sunrise_unix
                .map(|t| format_local_time(t, tz, TimeFormat::Time)),
            sunset: current
                .sunset_unix
                .map(|t| format_local_time(t, tz, TimeFormat::Time)),
            day_progress_pct: day_progress,
            uv: uv_risk(None),
            hourly,
            daily,
        }
    }
}

/// Whole degrees, halves rounded up.
fn round_temp(celsius: f64) -> i64 {
    (celsius + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CurrentWeather, Forecast, ForecastSample};

    // 2024-03-01T00:00:00Z
    const MARCH_1: i64 = 1_709_251_200;

    fn report(samples: usize) -> WeatherReport {
        WeatherReport {
            current: CurrentWeather {
                city_name: "Lahore".into(),
                country_code: "PK".into(),
                observed_at_unix: MARCH_1 + 7 * 3600,
                timezone_offset_seconds: 5 * 3600,
                temperature_c: 21.5,
                feels_like_c: -0.5,
                humidity_pct: 55,
                pressure_hpa: 1015,
                wind_speed_ms: 4.1,
                wind_bearing_deg: 225.0,
                clouds_pct: 20,
                visibility_meters: 8500,
                sunrise_unix: Some(MARCH_1 + 3600),
                sunset_unix: Some(MARCH_1 + 13 * 3600),
                condition_main: "Clouds".into(),
                condition_description: "few clouds".into(),
                icon_id: "02d".into(),
            },
            forecast: Forecast {
                city_name: "Lahore".into(),
                country_code: "PK".into(),
                timezone_offset_seconds: 5 * 3600,
                samples: (0..samples)
                    .map(|i| ForecastSample {
                        timestamp_unix: MARCH_1 + i as i64 * 3 * 3600,
                        temperature_c: 10.0 + i as f64,
                        icon_id: "01d".into(),
                        description: "clear sky".into(),
                        precipitation_probability: Some(0.25),
                    })
                    .collect(),
            },
        }
    }

    #[test]
    fn derives_detail_metrics() {
        let view = DashboardView::from_report(&report(40));

        assert_eq!(view.heading, "Lahore, PK");
        assert_eq!(view.local_time, "01/03 12:00");
        assert_eq!(view.temperature_c, 22);
        assert_eq!(view.feels_like_c, 0);
        assert_eq!(view.wind_direction, "SW");
        assert_eq!(view.visibility_km, 8.5);
        assert_eq!(view.sunrise.as_deref(), Some("06:00"));
        assert_eq!(view.sunset.as_deref(), Some("18:00"));
        assert_eq!(view.day_progress_pct, 50.0);
        assert_eq!(view.uv, UvRisk::Unknown);
    }

    #[test]
    fn hourly_and_daily_rows_are_bounded() {
        let view = DashboardView::from_report(&report(40));

        assert_eq!(view.hourly.len(), 12);
        assert_eq!(view.hourly[0].time, "05:00");
        assert_eq!(view.hourly[0].precipitation_pct, Some(25));

        // 40 samples at UTC+5 start at 05:00 and span six local days.
        assert_eq!(view.daily.len(), 6);
        assert_eq!(view.daily[0].day, "01/03");
        assert_eq!(view.daily[0].min_temperature_c, 10);
        assert_eq!(view.daily[0].max_temperature_c, 16);
    }

    #[test]
    fn missing_sun_times_mean_no_progress() {
        let mut report = report(0);
        report.current.sunrise_unix = None;
        report.current.country_code.clear();

        let view = DashboardView::from_report(&report);
        assert_eq!(view.heading, "Lahore");
        assert_eq!(view.sunrise, None);
        assert_eq!(view.day_progress_pct, 0.0);
        assert!(view.hourly.is_empty());
        assert!(view.daily.is_empty());
    }
}
