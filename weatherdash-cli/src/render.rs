//! Plain-text rendering of store state.

use weatherdash_core::{DashboardView, FetchStatus, WeatherState};

pub const LOADING: &str = "Loading…";
const NO_DATA: &str = "Search for a city to see details";

/// Glyph for an OpenWeather icon id such as "10d".
pub fn icon_glyph(icon_id: &str) -> &'static str {
    let night = icon_id.ends_with('n');
    match icon_id.get(..2) {
        Some("01") if night => "🌙",
        Some("01") => "☀",
        Some("02") => "🌤",
        Some("03") | Some("04") => "☁",
        Some("09") => "🌧",
        Some("10") => "🌦",
        Some("11") => "⛈",
        Some("13") => "❄",
        Some("50") => "🌫",
        _ => "·",
    }
}

fn pct_or_dash(pct: Option<u8>) -> String {
    pct.map_or_else(|| "-".to_string(), |p| format!("{p}%"))
}

/// A 20-cell bar for a percentage.
fn bar(pct: f64) -> String {
    let filled = (pct.clamp(0.0, 100.0) / 5.0).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(20 - filled))
}

/// Whole screen for the current state: status or details, then favorites.
pub fn screen(state: &WeatherState) -> String {
    let body = match (state.status, state.report()) {
        (FetchStatus::Loading, _) => LOADING.to_string(),
        (FetchStatus::Failed, _) => {
            format!("Error: {}", state.error.as_deref().unwrap_or("Unknown error"))
        }
        (_, Some(report)) => dashboard(&DashboardView::from_report(&report)),
        (_, None) => NO_DATA.to_string(),
    };

    format!("{body}\n\n{}", favorites(&state.favorites))
}

pub fn favorites(list: &[String]) -> String {
    let mut lines = vec!["Favorites".to_string()];
    if list.is_empty() {
        lines.push("  No favorites yet".to_string());
    }
    lines.extend(list.iter().map(|city| format!("  * {city}")));
    lines.push(String::new());
    lines.join("\n")
}

pub fn dashboard(view: &DashboardView) -> String {
    let mut lines = vec![
        format!("{}  (local {})", view.heading, view.local_time),
        format!(
            "{} {}°C  {} - {}  (feels like {}°C)",
            icon_glyph(&view.icon_id),
            view.temperature_c,
            view.condition_main,
            view.condition_description,
            view.feels_like_c,
        ),
        String::new(),
        format!(
            "Humidity    {:>3}% {}",
            view.humidity_pct,
            bar(f64::from(view.humidity_pct))
        ),
        format!(
            "Wind        {} m/s {} ({:.0}°)",
            view.wind_speed_ms, view.wind_direction, view.wind_bearing_deg
        ),
        format!("Clouds      {}%", view.clouds_pct),
        format!("Pressure    {} hPa", view.pressure_hpa),
        format!("Visibility  {} km", view.visibility_km),
        "Dew point   N/A (not in free API)".to_string(),
        format!(
            "Sun         {} · {} {}",
            view.sunrise.as_deref().unwrap_or("--:--"),
            view.sunset.as_deref().unwrap_or("--:--"),
            bar(view.day_progress_pct),
        ),
        format!("UV index    {} (not in free API)", view.uv.label()),
        "Precip 1h   N/A (only in paid API)".to_string(),
    ];

    if !view.hourly.is_empty() {
        lines.push(String::new());
        lines.push("Hourly".to_string());
        lines.extend(view.hourly.iter().map(|h| {
            format!(
                "  {}  {}  {:>4}°  {:>4}",
                h.time,
                icon_glyph(&h.icon_id),
                h.temperature_c,
                pct_or_dash(h.precipitation_pct),
            )
        }));
    }

    if !view.daily.is_empty() {
        lines.push(String::new());
        lines.push("Daily".to_string());
        lines.extend(view.daily.iter().map(|d| {
            format!(
                "  {}  {}  {:>4}° / {:>4}°  {:>4}",
                d.day,
                icon_glyph(&d.icon_id),
                d.max_temperature_c,
                d.min_temperature_c,
                pct_or_dash(d.precipitation_pct),
            )
        }));
    }

    lines.push(String::new());
    lines.join("\n")
}
