use tracing::debug;

use crate::analyzers::types::{BirthYearStats, BirthYears, UserStats};
use crate::analyzers::utility::{mode_lowest, value_counts};
use crate::error::{BikeshareError, Result};
use crate::filter::FilteredSet;

/// Rider breakdown by user type, and by gender and birth year where the
/// city's source records them.
///
/// Blank category cells are not counted. An empty set yields empty count
/// mappings; a birth-year column with no known years in the set is reported
/// as [`BirthYears::NoneRecorded`].
#[tracing::instrument(skip(filtered), fields(trips = filtered.len()))]
pub fn user_stats(filtered: &FilteredSet<'_>) -> UserStats {
    let schema = filtered.schema();

    let user_type_counts = owned_counts(filtered.iter().map(|t| t.user_type.as_str()));

    let gender_counts = schema
        .has_gender
        .then(|| owned_counts(filtered.iter().filter_map(|t| t.gender.as_deref())));

    let birth_year_stats = schema
        .has_birth_year
        .then(|| match birth_year_stats(filtered) {
            Ok(stats) => BirthYears::Recorded(stats),
            Err(_) => BirthYears::NoneRecorded,
        });

    debug!(
        user_types = user_type_counts.len(),
        has_gender = schema.has_gender,
        has_birth_year = schema.has_birth_year,
        "User stats computed"
    );

    UserStats {
        user_type_counts,
        gender_counts,
        birth_year_stats,
    }
}

/// Earliest, latest and most common (lowest on ties) known birth year.
pub fn birth_year_stats(filtered: &FilteredSet<'_>) -> Result<BirthYearStats> {
    let years = || filtered.iter().filter_map(|t| t.birth_year);

    let earliest = years()
        .min()
        .ok_or(BikeshareError::EmptyData("earliest birth year"))?;
    let latest = years()
        .max()
        .ok_or(BikeshareError::EmptyData("latest birth year"))?;
    let (most_common, _) =
        mode_lowest(years()).ok_or(BikeshareError::EmptyData("most common birth year"))?;

    Ok(BirthYearStats {
        earliest,
        latest,
        most_common,
    })
}

fn owned_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    value_counts(values.filter(|v| !v.trim().is_empty()))
        .into_iter()
        .map(|(v, n)| (v.to_string(), n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{RecordStore, Schema, TripRecord};
    use chrono::NaiveDate;

    fn trip(user_type: &str, gender: Option<&str>, birth_year: Option<i32>) -> TripRecord {
        let start = NaiveDate::from_ymd_opt(2017, 6, 1)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        TripRecord::new(start, "A", "B", 400, user_type)
            .unwrap()
            .with_gender(gender.map(str::to_string))
            .with_birth_year(birth_year)
    }

    const FULL: Schema = Schema {
        has_gender: true,
        has_birth_year: true,
    };

    #[test]
    fn test_empty_set_without_optional_columns() {
        let store = RecordStore::new(Schema::default(), Vec::new());
        let stats = user_stats(&FilteredSet::all(&store));
        assert!(stats.user_type_counts.is_empty());
        assert!(stats.gender_counts.is_none());
        assert!(stats.birth_year_stats.is_none());
    }

    #[test]
    fn test_empty_set_with_birth_year_column() {
        let store = RecordStore::new(FULL, Vec::new());
        let stats = user_stats(&FilteredSet::all(&store));
        assert!(stats.user_type_counts.is_empty());
        assert_eq!(stats.gender_counts, Some(Vec::new()));
        assert_eq!(stats.birth_year_stats, Some(BirthYears::NoneRecorded));

        let err = birth_year_stats(&FilteredSet::all(&store)).unwrap_err();
        assert!(err.is_empty_data());
    }

    #[test]
    fn test_blank_birth_years_keep_counts() {
        let store = RecordStore::new(
            FULL,
            vec![trip("Customer", None, None), trip("Customer", Some("Male"), None)],
        );
        let stats = user_stats(&FilteredSet::all(&store));
        assert_eq!(stats.user_type_counts, vec![("Customer".to_string(), 2)]);
        assert_eq!(stats.gender_counts, Some(vec![("Male".to_string(), 1)]));
        assert_eq!(stats.birth_year_stats, Some(BirthYears::NoneRecorded));
    }

    #[test]
    fn test_counts_descending_with_first_seen_ties() {
        let store = RecordStore::new(
            Schema::default(),
            vec![
                trip("Customer", None, None),
                trip("Subscriber", None, None),
                trip("Subscriber", None, None),
                trip("Dependent", None, None),
                trip("", None, None),
            ],
        );
        let stats = user_stats(&FilteredSet::all(&store));
        assert_eq!(
            stats.user_type_counts,
            vec![
                ("Subscriber".to_string(), 2),
                ("Customer".to_string(), 1),
                ("Dependent".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_gender_and_birth_year() {
        let store = RecordStore::new(
            FULL,
            vec![
                trip("Subscriber", Some("Male"), Some(1985)),
                trip("Subscriber", Some("Female"), Some(1992)),
                trip("Customer", None, None),
                trip("Subscriber", Some("Female"), Some(1985)),
                trip("Subscriber", Some("Male"), Some(1992)),
                trip("Subscriber", Some("Male"), Some(1960)),
            ],
        );
        let stats = user_stats(&FilteredSet::all(&store));

        assert_eq!(
            stats.gender_counts,
            Some(vec![("Male".to_string(), 3), ("Female".to_string(), 2)])
        );
        assert_eq!(
            stats.birth_year_stats,
            Some(BirthYears::Recorded(BirthYearStats {
                earliest: 1960,
                latest: 1992,
                most_common: 1985,
            }))
        );
    }

    #[test]
    fn test_gender_absent_is_not_zero_filled() {
        let schema = Schema {
            has_gender: false,
            has_birth_year: true,
        };
        let store = RecordStore::new(schema, vec![trip("Subscriber", None, Some(1990))]);
        let stats = user_stats(&FilteredSet::all(&store));
        assert!(stats.gender_counts.is_none());
        let birth = stats.birth_year_stats.and_then(|b| b.stats());
        assert_eq!(birth.map(|b| b.most_common), Some(1990));
    }
}
