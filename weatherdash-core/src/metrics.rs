//! Small pure helpers for deriving display metrics from raw provider values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

const SECTOR_DEG: f64 = 22.5;

/// Map a wind bearing to one of the 16 compass points.
///
/// Any real bearing is accepted: the sector index wraps with Euclidean
/// modulo, so `-90.0` is "W" and `450.0` is "E". A bearing exactly halfway
/// between two sectors rounds clockwise. Non-finite input maps to "N".
pub fn compass_point(bearing_deg: f64) -> &'static str {
    if !bearing_deg.is_finite() {
        return COMPASS_POINTS[0];
    }

    let sector = (bearing_deg / SECTOR_DEG + 0.5).floor() as i64;
    COMPASS_POINTS[sector.rem_euclid(16) as usize]
}

/// Output shape for [`format_local_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
    /// `HH:MM`
    Time,
    /// `DD/MM HH:MM`
    DateTime,
}

/// Render a UTC timestamp as wall-clock time at a fixed offset from UTC.
///
/// The offset alone decides the result; the host timezone is never consulted.
pub fn format_local_time(unix: i64, offset_secs: i32, format: TimeFormat) -> String {
    let Some(local) = shifted(unix, offset_secs) else {
        return "--:--".to_string();
    };

    match format {
        TimeFormat::Time => local.format("%H:%M").to_string(),
        TimeFormat::DateTime => local.format("%d/%m %H:%M").to_string(),
    }
}

/// The date-only part (`DD/MM`) of the local time, used to bucket samples by day.
pub fn day_key(unix: i64, offset_secs: i32) -> String {
    let formatted = format_local_time(unix, offset_secs, TimeFormat::DateTime);
    match formatted.split_once(' ') {
        Some((date, _)) => date.to_string(),
        None => formatted,
    }
}

fn shifted(unix: i64, offset_secs: i32) -> Option<DateTime<Utc>> {
    let secs = unix.checked_add(i64::from(offset_secs))?;
    DateTime::<Utc>::from_timestamp(secs, 0)
}

/// Risk tier for a UV index reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UvRisk {
    Unknown,
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvRisk {
    pub fn label(&self) -> &'static str {
        match self {
            UvRisk::Unknown => "N/A",
            UvRisk::Low => "Low",
            UvRisk::Moderate => "Moderate",
            UvRisk::High => "High",
            UvRisk::VeryHigh => "Very High",
            UvRisk::Extreme => "Extreme",
        }
    }

    pub fn level(&self) -> &'static str {
        match self {
            UvRisk::Unknown => "unknown",
            UvRisk::Low => "low",
            UvRisk::Moderate => "moderate",
            UvRisk::High => "high",
            UvRisk::VeryHigh => "very-high",
            UvRisk::Extreme => "extreme",
        }
    }
}

/// Classify a UV index. Each tier includes its lower bound.
pub fn uv_risk(index: Option<f64>) -> UvRisk {
    match index {
        None => UvRisk::Unknown,
        Some(i) if i < 3.0 => UvRisk::Low,
        Some(i) if i < 6.0 => UvRisk::Moderate,
        Some(i) if i < 8.0 => UvRisk::High,
        Some(i) if i < 11.0 => UvRisk::VeryHigh,
        Some(_) => UvRisk::Extreme,
    }
}

/// How far `observed` sits between sunrise and sunset, as a percentage in `0..=100`.
pub fn day_progress_pct(observed: i64, sunrise: i64, sunset: i64) -> f64 {
    if sunset <= sunrise {
        return 0.0;
    }

    let pct = (observed - sunrise) as f64 / (sunset - sunrise) as f64 * 100.0;
    pct.clamp(0.0, 100.0)
}

/// Precipitation probability (0..=1) as a whole percentage.
pub fn precipitation_pct(probability: Option<f64>) -> Option<u8> {
    probability.map(|p| (p * 100.0).round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2021-01-01T23:00:00Z
    const NEW_YEAR_EVE_23H: i64 = 1_609_542_000;

    #[test]
    fn cardinal_points() {
        assert_eq!(compass_point(0.0), "N");
        assert_eq!(compass_point(90.0), "E");
        assert_eq!(compass_point(180.0), "S");
        assert_eq!(compass_point(270.0), "W");
        assert_eq!(compass_point(22.5), "NNE");
        assert_eq!(compass_point(350.0), "N");
    }

    #[test]
    fn compass_is_periodic() {
        for bearing in [0.0, 13.0, 45.0, 101.0, 200.0, 315.0, 359.0] {
            for k in -3..=3 {
                let wrapped = bearing + 360.0 * f64::from(k);
                assert_eq!(compass_point(bearing), compass_point(wrapped), "bearing {wrapped}");
            }
        }
    }

    #[test]
    fn compass_negative_and_large_bearings_wrap() {
        assert_eq!(compass_point(-90.0), "W");
        assert_eq!(compass_point(-22.5), "NNW");
        assert_eq!(compass_point(450.0), "E");
        assert_eq!(compass_point(f64::NAN), "N");
    }

    #[test]
    fn compass_tie_rounds_clockwise() {
        assert_eq!(compass_point(11.25), "NNE");
        assert_eq!(compass_point(-11.25), "N");
    }

    #[test]
    fn utc_midnight_is_zero_hour() {
        assert_eq!(format_local_time(1_609_459_200, 0, TimeFormat::Time), "00:00");
    }

    #[test]
    fn positive_offset_rolls_date_forward() {
        assert_eq!(format_local_time(NEW_YEAR_EVE_23H, 3600, TimeFormat::Time), "00:00");
        assert_eq!(
            format_local_time(NEW_YEAR_EVE_23H, 3600, TimeFormat::DateTime),
            "02/01 00:00"
        );
    }

    #[test]
    fn negative_offset_shifts_back() {
        assert_eq!(
            format_local_time(NEW_YEAR_EVE_23H, -5 * 3600, TimeFormat::DateTime),
            "01/01 18:00"
        );
    }

    #[test]
    fn unrepresentable_timestamp_is_placeholder() {
        assert_eq!(format_local_time(i64::MAX, 3600, TimeFormat::Time), "--:--");
    }

    #[test]
    fn day_key_drops_time() {
        assert_eq!(day_key(NEW_YEAR_EVE_23H, 0), "01/01");
        assert_eq!(day_key(NEW_YEAR_EVE_23H, 3600), "02/01");
    }

    #[test]
    fn uv_tiers_include_lower_bound() {
        assert_eq!(uv_risk(None), UvRisk::Unknown);
        assert_eq!(uv_risk(Some(2.0)), UvRisk::Low);
        assert_eq!(uv_risk(Some(2.9)), UvRisk::Low);
        assert_eq!(uv_risk(Some(3.0)), UvRisk::Moderate);
        assert_eq!(uv_risk(Some(6.0)), UvRisk::High);
        assert_eq!(uv_risk(Some(8.0)), UvRisk::VeryHigh);
        assert_eq!(uv_risk(Some(10.99)), UvRisk::VeryHigh);
        assert_eq!(uv_risk(Some(11.0)), UvRisk::Extreme);
    }

    #[test]
    fn uv_labels() {
        assert_eq!(UvRisk::Unknown.label(), "N/A");
        assert_eq!(UvRisk::Unknown.level(), "unknown");
        assert_eq!(UvRisk::VeryHigh.label(), "Very High");
        assert_eq!(UvRisk::VeryHigh.level(), "very-high");
    }

    #[test]
    fn day_progress_is_clamped() {
        assert_eq!(day_progress_pct(150, 100, 200), 50.0);
        assert_eq!(day_progress_pct(50, 100, 200), 0.0);
        assert_eq!(day_progress_pct(300, 100, 200), 100.0);
        assert_eq!(day_progress_pct(150, 200, 200), 0.0);
    }

    #[test]
    fn precipitation_as_percent() {
        assert_eq!(precipitation_pct(None), None);
        assert_eq!(precipitation_pct(Some(0.0)), Some(0));
        assert_eq!(precipitation_pct(Some(0.456)), Some(46));
        assert_eq!(precipitation_pct(Some(1.0)), Some(100));
    }
}
