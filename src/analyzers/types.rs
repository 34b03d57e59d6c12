//! Result types returned by the aggregators.

use serde::Serialize;

/// Most frequent travel times among the filtered trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    /// Month name, e.g. `"March"`.
    pub popular_month: String,
    pub popular_month_count: usize,
    /// Title-cased weekday, e.g. `"Friday"`.
    pub popular_day: String,
    pub popular_day_count: usize,
    /// Start hour in `0..=23`.
    pub popular_hour: u32,
    pub popular_hour_count: usize,
}

/// A station together with how many filtered trips used it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationCount {
    pub station: String,
    pub count: usize,
}

/// A start → end station pair and its trip count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripCount {
    pub start_station: String,
    pub end_station: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub popular_start: StationCount,
    pub popular_end: StationCount,
    pub popular_trip: TripCount,
}

/// Whole hours, minutes and seconds of a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HoursMinutesSeconds {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

/// Whole minutes and seconds of a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MinutesSeconds {
    pub minutes: u64,
    pub seconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationStats {
    pub trip_count: u64,
    pub total_seconds: u64,
    /// `total_seconds / trip_count`, truncated.
    pub average_seconds: u64,
}

/// Earliest, latest and most common birth year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub latest: i32,
    pub most_common: i32,
}

/// Birth-year outcome for a city that records birth years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BirthYears {
    Recorded(BirthYearStats),
    /// The column exists but no filtered trip has a known year.
    NoneRecorded,
}

impl BirthYears {
    pub fn stats(&self) -> Option<BirthYearStats> {
        match self {
            BirthYears::Recorded(stats) => Some(*stats),
            BirthYears::NoneRecorded => None,
        }
    }
}

/// Rider breakdown. Optional sections are `None` when the city's source has
/// no such column, and only then.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub user_type_counts: Vec<(String, usize)>,
    pub gender_counts: Option<Vec<(String, usize)>>,
    pub birth_year_stats: Option<BirthYears>,
}
