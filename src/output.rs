//! Output formatting and persistence for trip statistics.
//!
//! Supports console text, pretty-printing, JSON serialization, and CSV append.

use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::analyzers::summary::{Summary, SummaryRow};
use crate::analyzers::types::{BirthYears, DurationStats, StationStats, TimeStats, UserStats};
use crate::paginator::Page;
use crate::records::Schema;
use csv::WriterBuilder;

const RULE_WIDTH: usize = 50;

/// Logs a summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &Summary) {
    debug!("{:#?}", summary);
}

/// Writes a summary as pretty-printed JSON.
pub fn write_json(out: &mut impl Write, summary: &Summary) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, summary)?;
    writeln!(out)?;
    Ok(())
}

/// Appends a summary as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &Path, summary: &Summary) -> Result<()> {
    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    writer.serialize(SummaryRow::from(summary))?;
    writer.flush()?;

    Ok(())
}

pub fn write_rule(out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    Ok(())
}

pub fn write_heading(out: &mut impl Write, title: &str) -> Result<()> {
    writeln!(out, "\n{title}...")?;
    Ok(())
}

pub fn write_elapsed(out: &mut impl Write, elapsed: Duration) -> Result<()> {
    writeln!(out, "\nThis took {:.2} seconds.", elapsed.as_secs_f64())?;
    write_rule(out)
}

/// Shown in place of a section whose statistic is undefined.
pub fn write_no_data(out: &mut impl Write) -> Result<()> {
    writeln!(out, "  No trips match the selected filters.")?;
    Ok(())
}

pub fn write_time_stats(out: &mut impl Write, stats: &TimeStats) -> Result<()> {
    writeln!(out, "  Most Popular Month: {}", stats.popular_month)?;
    writeln!(out, "  Most Popular Day of Week: {}", stats.popular_day)?;
    writeln!(out, "  Most Popular Start Hour: {}:00", stats.popular_hour)?;
    Ok(())
}

pub fn write_station_stats(out: &mut impl Write, stats: &StationStats) -> Result<()> {
    writeln!(
        out,
        "  Most Popular Start Station: {}",
        stats.popular_start.station
    )?;
    writeln!(out, "  Most Popular End Station: {}", stats.popular_end.station)?;
    writeln!(
        out,
        "  Most Frequent Trip: {} → {}",
        stats.popular_trip.start_station, stats.popular_trip.end_station
    )?;
    Ok(())
}

pub fn write_duration_stats(out: &mut impl Write, stats: &DurationStats) -> Result<()> {
    let total = stats.total();
    let avg = stats.average();
    writeln!(
        out,
        "  Total Trip Duration: {} hours, {} minutes, {} seconds",
        total.hours, total.minutes, total.seconds
    )?;
    writeln!(
        out,
        "  Average Trip Duration: {} minutes, {} seconds",
        avg.minutes, avg.seconds
    )?;
    Ok(())
}

pub fn write_user_stats(out: &mut impl Write, stats: &UserStats) -> Result<()> {
    writeln!(out, "  User Types:")?;
    for (user_type, count) in &stats.user_type_counts {
        writeln!(out, "    {user_type}: {count}")?;
    }

    match &stats.gender_counts {
        Some(counts) => {
            writeln!(out, "\n  Gender Distribution:")?;
            for (gender, count) in counts {
                writeln!(out, "    {gender}: {count}")?;
            }
        }
        None => writeln!(out, "\n  Gender data not available for this city.")?,
    }

    match &stats.birth_year_stats {
        Some(BirthYears::Recorded(years)) => {
            writeln!(out, "\n  Birth Year Statistics:")?;
            writeln!(out, "    Earliest Birth Year: {}", years.earliest)?;
            writeln!(out, "    Most Recent Birth Year: {}", years.latest)?;
            writeln!(out, "    Most Common Birth Year: {}", years.most_common)?;
        }
        Some(BirthYears::NoneRecorded) => {
            writeln!(out, "\n  No birth years recorded for the selected trips.")?
        }
        None => writeln!(out, "\n  Birth Year data not available for this city.")?,
    }
    Ok(())
}

/// Writes every section of a summary, without timings.
pub fn write_summary(out: &mut impl Write, summary: &Summary) -> Result<()> {
    writeln!(
        out,
        "{} trips in {} (month: {}, day: {})",
        summary.trip_count, summary.city, summary.month, summary.day
    )?;
    write_rule(out)?;

    write_heading(out, "Most Frequent Times of Travel")?;
    match &summary.time {
        Some(stats) => write_time_stats(out, stats)?,
        None => write_no_data(out)?,
    }

    write_heading(out, "Most Popular Stations and Trip")?;
    match &summary.stations {
        Some(stats) => write_station_stats(out, stats)?,
        None => write_no_data(out)?,
    }

    write_heading(out, "Trip Duration")?;
    match &summary.duration {
        Some(stats) => write_duration_stats(out, stats)?,
        None => write_no_data(out)?,
    }

    write_heading(out, "User Stats")?;
    write_user_stats(out, &summary.users)?;
    write_rule(out)
}

/// Writes one page of raw trip rows.
pub fn write_page(out: &mut impl Write, page: &Page<'_, '_>, schema: Schema) -> Result<()> {
    let mut header = vec![
        "#",
        "Start Time",
        "Start Station",
        "End Station",
        "Trip Duration",
        "User Type",
    ];
    if schema.has_gender {
        header.push("Gender");
    }
    if schema.has_birth_year {
        header.push("Birth Year");
    }
    writeln!(out, "{}", header.join(" | "))?;

    for (i, trip) in page.rows.iter().enumerate() {
        let mut cells = vec![
            (page.offset + i).to_string(),
            trip.start_time.to_string(),
            trip.start_station.clone(),
            trip.end_station.clone(),
            trip.trip_duration_seconds.to_string(),
            trip.user_type.clone(),
        ];
        if schema.has_gender {
            cells.push(trip.gender.clone().unwrap_or_default());
        }
        if schema.has_birth_year {
            cells.push(trip.birth_year.map(|y| y.to_string()).unwrap_or_default());
        }
        writeln!(out, "{}", cells.join(" | "))?;
    }
    Ok(())
}
