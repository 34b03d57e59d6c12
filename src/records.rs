//! Trip records and the per-city record store.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;

use crate::calendar::{MONTHS, weekday_name};
use crate::error::{BikeshareError, Result};

/// One bikeshare trip with its derived temporal fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub start_station: String,
    pub end_station: String,
    pub trip_duration_seconds: u64,
    pub user_type: String,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,

    // derived from start_time
    month: u32,
    #[serde(serialize_with = "serialize_weekday")]
    day_of_week: Weekday,
    hour: u32,
}

fn serialize_weekday<S: serde::Serializer>(
    day: &Weekday,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(weekday_name(*day))
}

impl TripRecord {
    /// Builds a record and derives month, weekday and hour from `start_time`.
    ///
    /// # Errors
    ///
    /// Returns [`BikeshareError::MonthOutOfRange`] when `start_time` is not in
    /// January through June.
    pub fn new(
        start_time: NaiveDateTime,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        trip_duration_seconds: u64,
        user_type: impl Into<String>,
    ) -> Result<Self> {
        let month = start_time.month();
        if month as usize > MONTHS.len() {
            return Err(BikeshareError::MonthOutOfRange(start_time));
        }

        Ok(Self {
            start_time,
            start_station: start_station.into(),
            end_station: end_station.into(),
            trip_duration_seconds,
            user_type: user_type.into(),
            gender: None,
            birth_year: None,
            month,
            day_of_week: start_time.weekday(),
            hour: start_time.hour(),
        })
    }

    pub fn with_gender(mut self, gender: Option<String>) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_birth_year(mut self, birth_year: Option<i32>) -> Self {
        self.birth_year = birth_year;
        self
    }

    /// Calendar month of `start_time`, in `1..=6`.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day_of_week(&self) -> Weekday {
        self.day_of_week
    }

    /// Lowercase weekday name of `start_time`.
    pub fn day_name(&self) -> &'static str {
        weekday_name(self.day_of_week)
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }
}

/// Which optional columns a city's source provides.
///
/// Presence is decided once per city, never per row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

/// Read-only, ordered collection of every trip loaded for one city.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    schema: Schema,
    records: Vec<TripRecord>,
}

impl RecordStore {
    pub fn new(schema: Schema, records: Vec<TripRecord>) -> Self {
        Self { schema, records }
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 15, 0)
            .unwrap()
    }

    #[test]
    fn test_derived_fields() {
        // 2017-03-15 was a Wednesday
        let trip = TripRecord::new(at(2017, 3, 15, 17), "A", "B", 300, "Subscriber").unwrap();
        assert_eq!(trip.month(), 3);
        assert_eq!(trip.day_of_week(), Weekday::Wed);
        assert_eq!(trip.day_name(), "wednesday");
        assert_eq!(trip.hour(), 17);
    }

    #[test]
    fn test_month_outside_range_rejected() {
        let start = at(2017, 7, 1, 8);
        let err = TripRecord::new(start, "A", "B", 60, "Customer").unwrap_err();
        assert_eq!(err, BikeshareError::MonthOutOfRange(start));
    }

    #[test]
    fn test_optional_fields_default_to_absent() {
        let trip = TripRecord::new(at(2017, 1, 2, 0), "A", "B", 60, "Customer").unwrap();
        assert!(trip.gender.is_none());
        assert!(trip.birth_year.is_none());

        let trip = trip
            .with_gender(Some("Female".into()))
            .with_birth_year(Some(1989));
        assert_eq!(trip.gender.as_deref(), Some("Female"));
        assert_eq!(trip.birth_year, Some(1989));
    }

    #[test]
    fn test_store_exposes_schema() {
        let schema = Schema {
            has_gender: true,
            has_birth_year: false,
        };
        let store = RecordStore::new(schema, Vec::new());
        assert_eq!(store.schema(), schema);
        assert!(store.is_empty());
    }
}
