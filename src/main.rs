//! CLI entry point for the bikeshare statistics explorer.
//!
//! Provides an interactive `explore` session and a scriptable `report`
//! subcommand over the per-city trip files.

mod prompt;

use crate::prompt::Prompter;
use anyhow::{Context, Result};
use bikeshare_stats::analyzers::summary::{Summary, non_empty};
use bikeshare_stats::analyzers::{duration_stats, station_stats, time_stats, user_stats};
use bikeshare_stats::config::{City, CityFiles};
use bikeshare_stats::filter::{FilteredSet, TripFilter};
use bikeshare_stats::output::{self, append_record, print_pretty, write_json, write_summary};
use bikeshare_stats::paginator::{DEFAULT_PAGE_SIZE, RawDataPaginator};
use bikeshare_stats::parser::load_city;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DataArgs {
    /// Directory holding the city CSV files [env: BIKESHARE_DATA_DIR]
    #[arg(short = 'd', long)]
    data_dir: Option<PathBuf>,

    /// JSON file mapping city names to CSV paths [env: BIKESHARE_CITY_FILES]
    #[arg(long)]
    city_files: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively pick a city and filters, then browse the statistics
    Explore {
        #[command(flatten)]
        data: DataArgs,
    },
    /// Print statistics for one city and filter selection
    Report {
        #[command(flatten)]
        data: DataArgs,

        /// Chicago, "New York City" or Washington
        #[arg(short, long)]
        city: String,

        /// January through June, or "all"
        #[arg(short, long, default_value = "all")]
        month: String,

        /// Monday through Sunday, or "all"
        #[arg(long, default_value = "all")]
        day: String,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// CSV file to append a summary row to
        #[arg(long)]
        append_csv: Option<PathBuf>,

        /// Number of raw data pages to print after the statistics
        #[arg(long, default_value_t = 0)]
        raw_pages: usize,

        /// Rows per raw data page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Explore { data } => {
            let files = city_files(&data)?;
            let stdin = io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), io::stdout());
            run_session(&mut prompter, &files)?;
        }
        Commands::Report {
            data,
            city,
            month,
            day,
            format,
            append_csv,
            raw_pages,
            page_size,
        } => {
            let files = city_files(&data)?;
            let city: City = city.parse()?;
            let filter = TripFilter::parse(&month, &day)?;

            let store = load_city(&files, city)?;
            let filtered = store.filter(&filter);
            let summary = Summary::build(city, &filter, &filtered)?;
            print_pretty(&summary);

            let stdout = io::stdout();
            let mut out = stdout.lock();
            match format {
                Format::Text => write_summary(&mut out, &summary)?,
                Format::Json => write_json(&mut out, &summary)?,
            }

            if let Some(path) = append_csv {
                append_record(&path, &summary)
                    .with_context(|| format!("failed to append to {}", path.display()))?;
                info!(path = %path.display(), "Summary row appended");
            }

            if raw_pages > 0 {
                let mut pager = RawDataPaginator::with_page_size(&filtered, page_size);
                for _ in 0..raw_pages {
                    let page = pager.next_page();
                    if page.is_empty() {
                        writeln!(out, "No more data to display.")?;
                        break;
                    }
                    output::write_page(&mut out, &page, filtered.schema())?;
                    if !page.has_more {
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}

/// Resolves the city file table from flags, falling back to the environment.
fn city_files(data: &DataArgs) -> Result<CityFiles> {
    let data_dir = data
        .data_dir
        .clone()
        .or_else(|| std::env::var_os("BIKESHARE_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    let overrides = data
        .city_files
        .clone()
        .or_else(|| std::env::var_os("BIKESHARE_CITY_FILES").map(PathBuf::from));

    let files = CityFiles::new(&data_dir);
    match overrides {
        Some(path) => files.with_overrides_from(&path),
        None => Ok(files),
    }
}

/// Runs select → statistics → raw data → restart until the user stops or
/// input ends.
fn run_session<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    files: &CityFiles,
) -> Result<()> {
    loop {
        writeln!(prompter.output(), "Hello! Let's explore some US bikeshare data!")?;
        let Some((city, filter)) = prompter.get_filters()? else {
            return Ok(());
        };
        output::write_rule(prompter.output())?;

        match load_city(files, city) {
            Ok(store) => {
                let filtered = store.filter(&filter);
                info!(
                    city = %city,
                    month = %filter.month,
                    day = %filter.day,
                    trips = filtered.len(),
                    "Selection filtered"
                );

                show_stats(prompter.output(), &filtered)?;
                if !display_raw_data(prompter, &filtered)? {
                    return Ok(());
                }
            }
            Err(e) => {
                error!(city = %city, error = %e, "Failed to load city data");
                writeln!(prompter.output(), "Could not load data for {city}: {e:#}")?;
            }
        }

        match prompter.ask("\nWould you like to restart? Enter yes or no.\n")? {
            Some(answer) if answer == "yes" => continue,
            _ => return Ok(()),
        }
    }
}

/// Prints each statistic section with the time it took.
fn show_stats(out: &mut impl Write, filtered: &FilteredSet<'_>) -> Result<()> {
    timed_section(
        out,
        "Calculating The Most Frequent Times of Travel",
        || time_stats(filtered),
        output::write_time_stats,
    )?;
    timed_section(
        out,
        "Calculating The Most Popular Stations and Trip",
        || station_stats(filtered),
        output::write_station_stats,
    )?;
    timed_section(
        out,
        "Calculating Trip Duration",
        || duration_stats(filtered),
        output::write_duration_stats,
    )?;
    timed_section(
        out,
        "Calculating User Stats",
        || Ok(user_stats(filtered)),
        output::write_user_stats,
    )
}

fn timed_section<W: Write, T>(
    out: &mut W,
    title: &str,
    compute: impl FnOnce() -> bikeshare_stats::Result<T>,
    render: impl FnOnce(&mut W, &T) -> Result<()>,
) -> Result<()> {
    output::write_heading(out, title)?;
    let started = Instant::now();
    match non_empty(compute())? {
        Some(stats) => render(out, &stats)?,
        None => output::write_no_data(out)?,
    }
    output::write_elapsed(out, started.elapsed())
}

/// Offers raw rows a page at a time. Returns `false` if input ended.
fn display_raw_data<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    filtered: &FilteredSet<'_>,
) -> Result<bool> {
    let mut pager = RawDataPaginator::new(filtered);
    loop {
        let Some(show) =
            prompter.confirm("Would you like to see 5 lines of raw data? Enter 'yes' or 'no': ")?
        else {
            return Ok(false);
        };
        if !show {
            return Ok(true);
        }

        let page = pager.next_page();
        if page.is_empty() {
            writeln!(prompter.output(), "No more data to display.")?;
            return Ok(true);
        }
        output::write_page(prompter.output(), &page, filtered.schema())?;
    }
}
