pub mod analyzers;
pub mod calendar;
pub mod config;
pub mod error;
pub mod filter;
pub mod output;
pub mod paginator;
pub mod parser;
pub mod records;

pub use error::{BikeshareError, Result};
