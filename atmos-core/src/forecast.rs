//! Reduction of the 3-hourly forecast feed into daily summaries.

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use tracing::warn;

use crate::model::{DailySummary, WeatherSample};

pub const MAX_DAYS: usize = 5;

const NOON: i64 = 12;

/// `dt` shifted by the offset, read as a UTC wall clock.
pub fn local_datetime(dt: i64, timezone_offset: i32) -> Option<DateTime<Utc>> {
    dt.checked_add(i64::from(timezone_offset)).and_then(|t| DateTime::from_timestamp(t, 0))
}

/// Calendar day of `dt` at the given UTC offset.
pub fn local_date(dt: i64, timezone_offset: i32) -> Option<NaiveDate> {
    local_datetime(dt, timezone_offset).map(|t| t.date_naive())
}

/// Hour of day (0-23) of `dt` at the given UTC offset.
pub fn local_hour(dt: i64, timezone_offset: i32) -> Option<u32> {
    local_datetime(dt, timezone_offset).map(|t| t.hour())
}

struct DayGroup<'a> {
    date: NaiveDate,
    representative: &'a WeatherSample,
    distance_to_noon: i64,
    min_temp: f64,
    max_temp: f64,
    max_precip_chance: f64,
}

impl<'a> DayGroup<'a> {
    fn new(date: NaiveDate, sample: &'a WeatherSample, distance_to_noon: i64) -> Self {
        Self {
            date,
            representative: sample,
            distance_to_noon,
            min_temp: sample.temp_min,
            max_temp: sample.temp_max,
            max_precip_chance: sample.pop.unwrap_or(0.0),
        }
    }

    fn push(&mut self, sample: &'a WeatherSample, distance_to_noon: i64) {
        self.min_temp = self.min_temp.min(sample.temp_min);
        self.max_temp = self.max_temp.max(sample.temp_max);
        self.max_precip_chance = self.max_precip_chance.max(sample.pop.unwrap_or(0.0));

        // Strictly closer only, so the earlier sample keeps a tie.
        if distance_to_noon < self.distance_to_noon {
            self.representative = sample;
            self.distance_to_noon = distance_to_noon;
        }
    }

    fn into_summary(self) -> DailySummary {
        DailySummary {
            date: self.date,
            representative: self.representative.clone(),
            min_temp: self.min_temp,
            max_temp: self.max_temp,
            max_precip_chance: self.max_precip_chance,
        }
    }
}

/// Buckets forecast samples into at most [`MAX_DAYS`] daily summaries.
///
/// Samples are keyed by the calendar date of `dt + timezone_offset`. Within a
/// day the representative is the sample whose local hour is closest to noon,
/// the first one seen winning a tie. Days come out in ascending date order and
/// are never padded, so a short feed yields fewer summaries and an empty feed
/// yields none.
pub fn daily_summaries(samples: &[WeatherSample], timezone_offset: i32) -> Vec<DailySummary> {
    // Insertion-ordered: tie-breaking depends on first-seen order.
    let mut groups: Vec<DayGroup<'_>> = Vec::new();

    for sample in samples {
        let Some(local) = local_datetime(sample.dt, timezone_offset) else {
            warn!(dt = sample.dt, "skipping forecast sample with out-of-range timestamp");
            continue;
        };

        let date = local.date_naive();
        let distance = (i64::from(local.hour()) - NOON).abs();

        match groups.iter_mut().find(|g| g.date == date) {
            Some(group) => group.push(sample, distance),
            None => groups.push(DayGroup::new(date, sample, distance)),
        }
    }

    groups.sort_by_key(|g| g.date);

    groups.into_iter().take(MAX_DAYS).map(DayGroup::into_summary).collect()
}
