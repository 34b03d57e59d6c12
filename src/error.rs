//! Error types raised by the filtering and aggregation pipeline.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors produced by the in-memory trip pipeline.
///
/// Absence of an optional column (gender, birth year) is not an error; it is
/// reported through [`crate::records::Schema`] presence flags.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BikeshareError {
    /// A mode, mean, min or max was requested over zero records.
    #[error("no trips to compute {0} over")]
    EmptyData(&'static str),

    #[error("unknown city: {0:?}")]
    UnknownCity(String),

    #[error("invalid month filter: {0:?} (expected \"all\" or january through june)")]
    InvalidMonth(String),

    #[error("invalid day filter: {0:?} (expected \"all\" or monday through sunday)")]
    InvalidDay(String),

    #[error("start time {0} falls outside January through June")]
    MonthOutOfRange(NaiveDateTime),

    /// A month number with no January through June name.
    #[error("month number {0} has no name in January through June")]
    UnnamedMonth(u32),

    #[error("trip file has no {0:?} column")]
    MissingColumn(&'static str),

    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("total trip duration overflowed")]
    DurationOverflow,
}

impl BikeshareError {
    /// Returns `true` when the error only reflects an empty filtered set.
    pub fn is_empty_data(&self) -> bool {
        matches!(self, BikeshareError::EmptyData(_))
    }
}

pub type Result<T> = std::result::Result<T, BikeshareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_data_classification() {
        assert!(BikeshareError::EmptyData("popular month").is_empty_data());
        assert!(!BikeshareError::InvalidDay("funday".into()).is_empty_data());
    }

    #[test]
    fn test_messages_name_the_offending_value() {
        let err = BikeshareError::InvalidMonth("july".into());
        assert!(err.to_string().contains("\"july\""));

        let err = BikeshareError::MalformedRow {
            line: 7,
            reason: "bad timestamp".into(),
        };
        assert_eq!(err.to_string(), "malformed row at line 7: bad timestamp");

        let err = BikeshareError::MissingColumn("User Type");
        assert_eq!(err.to_string(), "trip file has no \"User Type\" column");
    }

    #[test]
    fn test_lookup_failures_are_not_empty_data() {
        assert!(!BikeshareError::UnnamedMonth(7).is_empty_data());
        assert!(!BikeshareError::MissingColumn("User Type").is_empty_data());
    }
}
