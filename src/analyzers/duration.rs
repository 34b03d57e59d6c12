use tracing::debug;

use crate::analyzers::types::{DurationStats, HoursMinutesSeconds, MinutesSeconds};
use crate::error::{BikeshareError, Result};
use crate::filter::FilteredSet;

/// Total and truncated-mean trip duration, in seconds.
#[tracing::instrument(skip(filtered), fields(trips = filtered.len()))]
pub fn duration_stats(filtered: &FilteredSet<'_>) -> Result<DurationStats> {
    if filtered.is_empty() {
        return Err(BikeshareError::EmptyData("trip duration"));
    }

    let total_seconds = filtered
        .iter()
        .try_fold(0u64, |acc, t| acc.checked_add(t.trip_duration_seconds))
        .ok_or(BikeshareError::DurationOverflow)?;
    let trip_count = filtered.len() as u64;
    let average_seconds = total_seconds / trip_count;

    debug!(total_seconds, average_seconds, "Trip durations computed");

    Ok(DurationStats {
        trip_count,
        total_seconds,
        average_seconds,
    })
}

/// Splits `seconds` into whole hours, minutes and seconds.
pub fn split_hms(seconds: u64) -> HoursMinutesSeconds {
    HoursMinutesSeconds {
        hours: seconds / 3600,
        minutes: (seconds % 3600) / 60,
        seconds: seconds % 60,
    }
}

/// Splits `seconds` into whole minutes and seconds.
pub fn split_ms(seconds: u64) -> MinutesSeconds {
    MinutesSeconds {
        minutes: seconds / 60,
        seconds: seconds % 60,
    }
}

impl DurationStats {
    pub fn total(&self) -> HoursMinutesSeconds {
        split_hms(self.total_seconds)
    }

    pub fn average(&self) -> MinutesSeconds {
        split_ms(self.average_seconds)
    }
}
