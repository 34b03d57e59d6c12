use tracing::debug;

use crate::analyzers::types::TimeStats;
use crate::analyzers::utility::mode_lowest;
use crate::calendar::{month_name, title_case};
use crate::error::{BikeshareError, Result};
use crate::filter::FilteredSet;

/// Most popular month, weekday and start hour.
///
/// Ties resolve to the lowest month number, the alphabetically first weekday
/// name, and the lowest hour.
#[tracing::instrument(skip(filtered), fields(trips = filtered.len()))]
pub fn time_stats(filtered: &FilteredSet<'_>) -> Result<TimeStats> {
    let (month, month_count) = mode_lowest(filtered.iter().map(|t| t.month()))
        .ok_or(BikeshareError::EmptyData("popular month"))?;
    let (day, day_count) = mode_lowest(filtered.iter().map(|t| t.day_name()))
        .ok_or(BikeshareError::EmptyData("popular day"))?;
    let (hour, hour_count) = mode_lowest(filtered.iter().map(|t| t.hour()))
        .ok_or(BikeshareError::EmptyData("popular hour"))?;

    // the record store only admits January through June
    let popular_month = month_name(month).ok_or(BikeshareError::UnnamedMonth(month))?;

    debug!(month, day, hour, "Popular times computed");

    Ok(TimeStats {
        popular_month,
        popular_month_count: month_count,
        popular_day: title_case(day),
        popular_day_count: day_count,
        popular_hour: hour,
        popular_hour_count: hour_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter;
    use crate::records::{RecordStore, Schema, TripRecord};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, m, d)
            .unwrap()
            .and_hms_opt(h, 30, 0)
            .unwrap()
    }

    fn store(starts: &[NaiveDateTime]) -> RecordStore {
        let records = starts
            .iter()
            .map(|s| TripRecord::new(*s, "A", "B", 120, "Subscriber").unwrap())
            .collect();
        RecordStore::new(Schema::default(), records)
    }

    #[test]
    fn test_empty_set_fails() {
        let store = store(&[]);
        let set = FilteredSet::all(&store);
        assert!(time_stats(&set).unwrap_err().is_empty_data());
    }

    #[test]
    fn test_popular_values() {
        // Jan 2 Mon, Mar 6 Mon, Mar 7 Tue, Mar 8 Wed
        let store = store(&[at(1, 2, 8), at(3, 6, 17), at(3, 7, 17), at(3, 8, 9)]);
        let stats = time_stats(&FilteredSet::all(&store)).unwrap();

        assert_eq!(stats.popular_month, "March");
        assert_eq!(stats.popular_month_count, 3);
        assert_eq!(stats.popular_day, "Monday");
        assert_eq!(stats.popular_day_count, 2);
        assert_eq!(stats.popular_hour, 17);
        assert_eq!(stats.popular_hour_count, 2);
    }

    #[test]
    fn test_ties_break_toward_lowest() {
        // Jan 6 Fri 14h, Feb 7 Tue 9h: every field ties
        let store = store(&[at(2, 7, 14), at(1, 6, 9)]);
        let stats = time_stats(&FilteredSet::all(&store)).unwrap();

        assert_eq!(stats.popular_month, "January");
        assert_eq!(stats.popular_day, "Friday");
        assert_eq!(stats.popular_hour, 9);
    }

    #[test]
    fn test_month_filter_restricts_popular_month() {
        let store = store(&[at(1, 2, 8), at(1, 3, 8), at(3, 6, 9)]);
        let all = FilteredSet::all(&store);

        let stats = time_stats(&filter(&all, "all", "all").unwrap()).unwrap();
        assert_eq!(stats.popular_month, "January");

        let march = filter(&all, "march", "all").unwrap();
        let stats = time_stats(&march).unwrap();
        assert_eq!(stats.popular_month, "March");
        assert_eq!(stats.popular_month_count, 1);
    }

    #[test]
    fn test_deterministic() {
        let store = store(&[at(2, 7, 14), at(1, 6, 9), at(4, 4, 22)]);
        let set = FilteredSet::all(&store);
        assert_eq!(time_stats(&set).unwrap(), time_stats(&set).unwrap());
    }
}
