//! City selection and the city → CSV source table.
//!
//! The built-in table can be overridden by a JSON object on disk:
//! ```json
//! {
//!   "chicago": "/data/bikeshare/chicago.csv",
//!   "washington": "washington_2017.csv"
//! }
//! ```
//! Relative paths are resolved against the data directory.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::calendar::title_case;
use crate::error::BikeshareError;

/// Cities with bikeshare data available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lowercase lookup key, as typed by the user.
    pub fn key(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// File name of the city's CSV inside the data directory.
    pub fn default_file(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&title_case(self.key()))
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|c| c.key() == key)
            .ok_or_else(|| BikeshareError::UnknownCity(s.to_string()))
    }
}

/// Resolves each [`City`] to the CSV file holding its trips.
#[derive(Debug, Clone)]
pub struct CityFiles {
    data_dir: PathBuf,
    overrides: HashMap<City, PathBuf>,
}

impl CityFiles {
    /// Uses the built-in file names inside `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            overrides: HashMap::new(),
        }
    }

    /// Loads per-city path overrides from the JSON file at `path`.
    pub fn with_overrides_from(mut self, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read city file table {}", path.display()))?;
        let entries: HashMap<String, String> = serde_json::from_str(&content)
            .with_context(|| format!("invalid city file table {}", path.display()))?;

        for (key, file) in entries {
            let city: City = key.parse()?;
            self.overrides.insert(city, PathBuf::from(file));
        }
        Ok(self)
    }

    /// Returns the CSV path for `city`.
    pub fn path_for(&self, city: City) -> PathBuf {
        match self.overrides.get(&city) {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => self.data_dir.join(p),
            None => self.data_dir.join(city.default_file()),
        }
    }
}
