//! Month/day filtering of a city's trips.
//!
//! Filtering only narrows a view: a [`FilteredSet`] borrows records from the
//! [`RecordStore`] and keeps their original relative order.

use chrono::Weekday;
use std::fmt;
use std::str::FromStr;

use crate::calendar::{ALL, month_name, month_number, weekday_from_name, weekday_name};
use crate::error::{BikeshareError, Result};
use crate::records::{RecordStore, Schema, TripRecord};

/// Month restriction: everything, or a single month in `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Month(u32),
}

impl MonthFilter {
    pub fn matches(&self, trip: &TripRecord) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(m) => trip.month() == *m,
        }
    }
}

impl FromStr for MonthFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase();
        if name == ALL {
            return Ok(MonthFilter::All);
        }
        month_number(&name)
            .map(MonthFilter::Month)
            .ok_or_else(|| BikeshareError::InvalidMonth(s.to_string()))
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str(ALL),
            MonthFilter::Month(m) => match month_name(*m) {
                Some(name) => f.write_str(&name.to_lowercase()),
                None => write!(f, "month {m}"),
            },
        }
    }
}

/// Weekday restriction: everything, or a single weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    #[default]
    All,
    Day(Weekday),
}

impl DayFilter {
    pub fn matches(&self, trip: &TripRecord) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Day(d) => trip.day_of_week() == *d,
        }
    }
}

impl FromStr for DayFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase();
        if name == ALL {
            return Ok(DayFilter::All);
        }
        weekday_from_name(&name)
            .map(DayFilter::Day)
            .ok_or_else(|| BikeshareError::InvalidDay(s.to_string()))
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str(ALL),
            DayFilter::Day(d) => f.write_str(weekday_name(*d)),
        }
    }
}

/// Conjunction of a month and a day restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TripFilter {
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl TripFilter {
    pub fn new(month: MonthFilter, day: DayFilter) -> Self {
        Self { month, day }
    }

    /// Parses the user-facing `month` and `day` strings.
    pub fn parse(month: &str, day: &str) -> Result<Self> {
        Ok(Self::new(month.parse()?, day.parse()?))
    }

    pub fn matches(&self, trip: &TripRecord) -> bool {
        self.month.matches(trip) && self.day.matches(trip)
    }
}

/// Ordered subsequence of a city's trips matching a [`TripFilter`].
#[derive(Debug, Clone)]
pub struct FilteredSet<'a> {
    schema: Schema,
    records: Vec<&'a TripRecord>,
}

impl<'a> FilteredSet<'a> {
    /// Unfiltered view over every record in `store`.
    pub fn all(store: &'a RecordStore) -> Self {
        Self {
            schema: store.schema(),
            records: store.records().iter().collect(),
        }
    }

    /// Builds a view over arbitrary records sharing one `schema`.
    pub fn from_records(schema: Schema, records: Vec<&'a TripRecord>) -> Self {
        Self { schema, records }
    }

    /// Narrows this view further; the result is always a subsequence.
    pub fn refine(&self, filter: &TripFilter) -> FilteredSet<'a> {
        FilteredSet {
            schema: self.schema,
            records: self
                .records
                .iter()
                .copied()
                .filter(|trip| filter.matches(trip))
                .collect(),
        }
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn records(&self) -> &[&'a TripRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a TripRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore {
    /// Returns the trips matching `filter`, in load order.
    pub fn filter(&self, filter: &TripFilter) -> FilteredSet<'_> {
        FilteredSet::all(self).refine(filter)
    }
}

/// Filters `records` by the lowercase `month` and `day` names (or `"all"`).
///
/// # Errors
///
/// [`BikeshareError::InvalidMonth`] or [`BikeshareError::InvalidDay`] when a
/// value is outside the supported names.
#[tracing::instrument(skip(records), fields(trips = records.len()))]
pub fn filter<'a>(records: &FilteredSet<'a>, month: &str, day: &str) -> Result<FilteredSet<'a>> {
    let filter = TripFilter::parse(month, day)?;
    let filtered = records.refine(&filter);
    tracing::debug!(matched = filtered.len(), "Trips filtered");
    Ok(filtered)
}
