use tracing::debug;

use crate::analyzers::types::{StationCount, StationStats, TripCount};
use crate::analyzers::utility::mode_first_seen;
use crate::error::{BikeshareError, Result};
use crate::filter::FilteredSet;

/// Most used start station, end station and start → end pair.
///
/// Station names have no natural order, so ties go to whichever value
/// appears first in the filtered sequence.
#[tracing::instrument(skip(filtered), fields(trips = filtered.len()))]
pub fn station_stats(filtered: &FilteredSet<'_>) -> Result<StationStats> {
    let (start, start_count) =
        mode_first_seen(filtered.iter().map(|t| t.start_station.as_str()))
            .ok_or(BikeshareError::EmptyData("popular start station"))?;
    let (end, end_count) = mode_first_seen(filtered.iter().map(|t| t.end_station.as_str()))
        .ok_or(BikeshareError::EmptyData("popular end station"))?;
    let ((trip_start, trip_end), trip_count) = mode_first_seen(
        filtered
            .iter()
            .map(|t| (t.start_station.as_str(), t.end_station.as_str())),
    )
    .ok_or(BikeshareError::EmptyData("popular trip"))?;

    debug!(start, end, trip_count, "Popular stations computed");

    Ok(StationStats {
        popular_start: StationCount {
            station: start.to_string(),
            count: start_count,
        },
        popular_end: StationCount {
            station: end.to_string(),
            count: end_count,
        },
        popular_trip: TripCount {
            start_station: trip_start.to_string(),
            end_station: trip_end.to_string(),
            count: trip_count,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{RecordStore, Schema, TripRecord};
    use chrono::NaiveDate;

    fn store(pairs: &[(&str, &str)]) -> RecordStore {
        let start = NaiveDate::from_ymd_opt(2017, 5, 1)
            .unwrap()
            .and_hms_opt(7, 0, 0)
            .unwrap();
        let records = pairs
            .iter()
            .map(|(s, e)| TripRecord::new(start, *s, *e, 90, "Customer").unwrap())
            .collect();
        RecordStore::new(Schema::default(), records)
    }

    #[test]
    fn test_empty_set_fails() {
        let store = store(&[]);
        let err = station_stats(&FilteredSet::all(&store)).unwrap_err();
        assert!(err.is_empty_data());
    }

    #[test]
    fn test_majority_start_station() {
        let store = store(&[("A", "X"), ("B", "Y"), ("A", "Z")]);
        let stats = station_stats(&FilteredSet::all(&store)).unwrap();
        assert_eq!(stats.popular_start.station, "A");
        assert_eq!(stats.popular_start.count, 2);
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        let store = store(&[("A", "Y"), ("B", "X")]);
        let stats = station_stats(&FilteredSet::all(&store)).unwrap();
        assert_eq!(stats.popular_start.station, "A");
        assert_eq!(stats.popular_end.station, "Y");
        assert_eq!(stats.popular_trip.start_station, "A");
        assert_eq!(stats.popular_trip.end_station, "Y");
    }

    #[test]
    fn test_popular_trip_counts_pairs() {
        let store = store(&[
            ("A", "B"),
            ("B", "A"),
            ("B", "A"),
            ("A", "A"),
            ("A", "B"),
            ("B", "A"),
        ]);
        let stats = station_stats(&FilteredSet::all(&store)).unwrap();
        assert_eq!(
            stats.popular_trip,
            TripCount {
                start_station: "B".into(),
                end_station: "A".into(),
                count: 3,
            }
        );
        // A and B both start three trips; A comes first
        assert_eq!(stats.popular_start.station, "A");
        assert_eq!(stats.popular_end.station, "A");
        assert_eq!(stats.popular_end.count, 4);
    }
}
