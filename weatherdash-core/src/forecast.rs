//! Derived views over the 3-hour forecast sequence.

use crate::metrics::day_key;
use crate::model::{DailySummary, ForecastSample};

/// Samples shown in the hourly strip (about 36 hours at a 3-hour cadence).
pub const HOURLY_LIMIT: usize = 12;

/// Maximum number of day buckets returned by [`daily_summaries`].
pub const DAILY_LIMIT: usize = 7;

/// The leading samples, unchanged and in order.
pub fn hourly_view(samples: &[ForecastSample]) -> &[ForecastSample] {
    &samples[..samples.len().min(HOURLY_LIMIT)]
}

/// Bucket samples by local calendar day.
///
/// Days appear in first-seen order. Temperatures aggregate over every
/// sample of the day, while the icon and precipitation probability come
/// from the first sample of the day only.
pub fn daily_summaries(samples: &[ForecastSample], offset_secs: i32) -> Vec<DailySummary> {
    let mut days: Vec<DailySummary> = Vec::new();

    for sample in samples {
        let key = day_key(sample.timestamp_unix, offset_secs);

        match days.iter_mut().find(|d| d.date_label == key) {
            Some(day) => {
                day.min_temperature_c = day.min_temperature_c.min(sample.temperature_c);
                day.max_temperature_c = day.max_temperature_c.max(sample.temperature_c);
            }
            None => days.push(DailySummary {
                date_label: key,
                min_temperature_c: sample.temperature_c,
                max_temperature_c: sample.temperature_c,
                icon_id: sample.icon_id.clone(),
                precipitation_probability: sample.precipitation_probability,
            }),
        }
    }

    days.truncate(DAILY_LIMIT);
    days
}
