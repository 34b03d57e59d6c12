//! Trip statistics over a filtered set.
//!
//! Each aggregator is a pure function of a [`crate::filter::FilteredSet`]:
//! popular travel times, popular stations, trip durations and rider
//! demographics. [`summary::Summary`] bundles all four for reporting.
//! Mode computations use explicit tie-break rules from [`utility`].

pub mod duration;
pub mod station;
pub mod summary;
pub mod time;
pub mod types;
pub mod user;
pub mod utility;

pub use duration::{duration_stats, split_hms, split_ms};
pub use station::station_stats;
pub use summary::{Summary, SummaryRow};
pub use time::time_stats;
pub use user::user_stats;
