use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::analyzers::duration::duration_stats;
use crate::analyzers::station::station_stats;
use crate::analyzers::time::time_stats;
use crate::analyzers::types::{DurationStats, StationStats, TimeStats, UserStats};
use crate::analyzers::user::user_stats;
use crate::config::City;
use crate::error::{BikeshareError, Result};
use crate::filter::{FilteredSet, TripFilter};
use crate::records::Schema;

/// Every statistic for one city and filter selection.
///
/// A section is `None` when the filtered set holds no data for it. User
/// counts are always present and simply empty for an empty selection.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub generated_at: DateTime<Utc>,
    pub city: String,
    pub month: String,
    pub day: String,
    pub trip_count: usize,
    pub schema: Schema,
    pub time: Option<TimeStats>,
    pub stations: Option<StationStats>,
    pub duration: Option<DurationStats>,
    pub users: UserStats,
}

impl Summary {
    /// Runs all four aggregators over `filtered`.
    ///
    /// Empty-data failures become `None` sections; any other error is returned.
    pub fn build(city: City, filter: &TripFilter, filtered: &FilteredSet<'_>) -> Result<Self> {
        let summary = Summary {
            generated_at: Utc::now(),
            city: city.to_string(),
            month: filter.month.to_string(),
            day: filter.day.to_string(),
            trip_count: filtered.len(),
            schema: filtered.schema(),
            time: non_empty(time_stats(filtered))?,
            stations: non_empty(station_stats(filtered))?,
            duration: non_empty(duration_stats(filtered))?,
            users: user_stats(filtered),
        };

        info!(
            city = %summary.city,
            month = %summary.month,
            day = %summary.day,
            trips = summary.trip_count,
            "Summary built"
        );
        Ok(summary)
    }
}

/// Maps [`BikeshareError::EmptyData`] to `Ok(None)`.
pub fn non_empty<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(BikeshareError::EmptyData(what)) => {
            tracing::debug!(what, "No data for section");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Flat, CSV-friendly view of a [`Summary`].
#[derive(Debug, Serialize)]
pub struct SummaryRow {
    pub generated_at: DateTime<Utc>,
    pub city: String,
    pub month: String,
    pub day: String,
    pub trip_count: usize,
    pub popular_month: Option<String>,
    pub popular_day: Option<String>,
    pub popular_hour: Option<u32>,
    pub popular_start_station: Option<String>,
    pub popular_end_station: Option<String>,
    pub popular_trip: Option<String>,
    pub total_seconds: Option<u64>,
    pub average_seconds: Option<u64>,
    pub top_user_type: Option<String>,
    pub earliest_birth_year: Option<i32>,
    pub latest_birth_year: Option<i32>,
    pub most_common_birth_year: Option<i32>,
}

impl From<&Summary> for SummaryRow {
    fn from(s: &Summary) -> Self {
        let birth = s.users.birth_year_stats.and_then(|b| b.stats());
        SummaryRow {
            generated_at: s.generated_at,
            city: s.city.clone(),
            month: s.month.clone(),
            day: s.day.clone(),
            trip_count: s.trip_count,
            popular_month: s.time.as_ref().map(|t| t.popular_month.clone()),
            popular_day: s.time.as_ref().map(|t| t.popular_day.clone()),
            popular_hour: s.time.as_ref().map(|t| t.popular_hour),
            popular_start_station: s.stations.as_ref().map(|st| st.popular_start.station.clone()),
            popular_end_station: s.stations.as_ref().map(|st| st.popular_end.station.clone()),
            popular_trip: s.stations.as_ref().map(|st| {
                format!(
                    "{} -> {}",
                    st.popular_trip.start_station, st.popular_trip.end_station
                )
            }),
            total_seconds: s.duration.map(|d| d.total_seconds),
            average_seconds: s.duration.map(|d| d.average_seconds),
            top_user_type: s.users.user_type_counts.first().map(|(t, _)| t.clone()),
            earliest_birth_year: birth.map(|b| b.earliest),
            latest_birth_year: birth.map(|b| b.latest),
            most_common_birth_year: birth.map(|b| b.most_common),
        }
    }
}
