//! Fixed month and weekday lookup tables.

use chrono::Weekday;

/// Months covered by the trip data, in calendar order.
pub const MONTHS: [&str; 6] = ["january", "february", "march", "april", "may", "june"];

/// Weekday names in calendar order, Monday first.
pub const DAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Keyword that disables a month or day filter.
pub const ALL: &str = "all";

/// Returns the 1-based month number for a lowercase month name in [`MONTHS`].
pub fn month_number(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|m| *m == name)
        .map(|idx| idx as u32 + 1)
}

/// Returns the title-cased name of a month number in `1..=6`.
pub fn month_name(number: u32) -> Option<String> {
    let idx = usize::try_from(number).ok()?.checked_sub(1)?;
    MONTHS.get(idx).map(|m| title_case(m))
}

/// Lowercase weekday name, e.g. `"monday"`.
pub fn weekday_name(day: Weekday) -> &'static str {
    DAYS[day.num_days_from_monday() as usize]
}

/// Parses a lowercase weekday name from [`DAYS`].
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    let idx = DAYS.iter().position(|d| *d == name)?;
    Some(match idx {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    })
}

/// Upper-cases the first letter of each space-separated word.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
