//! CSV loader for city trip files.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::{City, CityFiles};
use crate::error::BikeshareError;
use crate::records::{RecordStore, Schema, TripRecord};

const USER_TYPE_COLUMN: &str = "User Type";
const GENDER_COLUMN: &str = "Gender";
const BIRTH_YEAR_COLUMN: &str = "Birth Year";
const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// One CSV row as written by the bikeshare operators.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: String,
    // blank cells only; a missing column is rejected from the header
    #[serde(rename = "User Type")]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<String>,
}

/// Loads every trip for `city` from the file configured in `files`.
#[tracing::instrument(skip(files), fields(city = %city))]
pub fn load_city(files: &CityFiles, city: City) -> Result<RecordStore> {
    let path = files.path_for(city);
    load_path(&path)
}

/// Loads trips from the CSV file at `path`.
pub fn load_path(path: &Path) -> Result<RecordStore> {
    let file =
        File::open(path).with_context(|| format!("failed to open trip file {}", path.display()))?;
    let store =
        parse_trips(file).with_context(|| format!("failed to load trips from {}", path.display()))?;
    info!(path = %path.display(), trips = store.len(), "Trip file loaded");
    Ok(store)
}

/// Parses trip rows from any CSV source with a header row.
///
/// Gender and birth-year presence is read from the header. Rows starting
/// outside January through June are skipped.
///
/// # Errors
///
/// CSV errors, [`BikeshareError::MissingColumn`] when the header has no
/// `User Type`, and [`BikeshareError::MalformedRow`] for rows whose start
/// time, duration or birth year cannot be parsed.
pub fn parse_trips<R: Read>(reader: R) -> Result<RecordStore> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();

    if !headers.iter().any(|h| h.trim() == USER_TYPE_COLUMN) {
        return Err(BikeshareError::MissingColumn(USER_TYPE_COLUMN).into());
    }

    let schema = Schema {
        has_gender: headers.iter().any(|h| h.trim() == GENDER_COLUMN),
        has_birth_year: headers.iter().any(|h| h.trim() == BIRTH_YEAR_COLUMN),
    };
    debug!(?schema, "Trip file schema detected");

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for result in rdr.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let raw: RawTrip = row.deserialize(Some(&headers))?;

        match to_record(raw, schema, line) {
            Ok(trip) => records.push(trip),
            Err(BikeshareError::MonthOutOfRange(start)) => {
                skipped += 1;
                debug!(line, %start, "Skipping trip outside January-June");
            }
            Err(e) => return Err(e.into()),
        }
    }

    if skipped > 0 {
        warn!(skipped, "Skipped trips starting outside January-June");
    }

    Ok(RecordStore::new(schema, records))
}

fn to_record(raw: RawTrip, schema: Schema, line: u64) -> Result<TripRecord, BikeshareError> {
    let malformed = |reason: String| BikeshareError::MalformedRow { line, reason };

    let start_time = parse_start_time(&raw.start_time)
        .ok_or_else(|| malformed(format!("invalid start time {:?}", raw.start_time)))?;
    let duration = parse_duration(&raw.trip_duration)
        .ok_or_else(|| malformed(format!("invalid trip duration {:?}", raw.trip_duration)))?;

    let birth_year = match non_blank(raw.birth_year) {
        Some(text) if schema.has_birth_year => Some(
            parse_year(&text).ok_or_else(|| malformed(format!("invalid birth year {text:?}")))?,
        ),
        _ => None,
    };
    let gender = if schema.has_gender {
        non_blank(raw.gender)
    } else {
        None
    };

    Ok(TripRecord::new(
        start_time,
        raw.start_station,
        raw.end_station,
        duration,
        raw.user_type.unwrap_or_default(),
    )?
    .with_gender(gender)
    .with_birth_year(birth_year))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_start_time(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), START_TIME_FORMAT).ok()
}

/// Whole seconds; decimal text is truncated toward zero.
fn parse_duration(s: &str) -> Option<u64> {
    let s = s.trim();
    if let Ok(secs) = s.parse::<u64>() {
        return Some(secs);
    }
    let secs: f64 = s.parse().ok()?;
    // `u64::MAX as f64` rounds up to 2^64, which is itself out of range
    (secs.is_finite() && secs >= 0.0 && secs < u64::MAX as f64).then(|| secs.trunc() as u64)
}

/// Accepts `1992` as well as `1992.0`.
fn parse_year(s: &str) -> Option<i32> {
    let s = s.trim();
    if let Ok(year) = s.parse::<i32>() {
        return Some(year);
    }
    let year: f64 = s.parse().ok()?;
    (year.is_finite() && year.fract() == 0.0 && year.abs() < i32::MAX as f64)
        .then_some(year as i32)
}
