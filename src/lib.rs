//! # Tide Scout Core Library
//!
//! This library turns tide-forecast.com location pages into structured forecast
//! records and picks out the low tides that happen while the sun is up.
//!
//! ## Data Flow
//! 1. **Fetch**: download `<base-url>/locations/<location>/tides/latest`
//! 2. **Split**: one `div.tide-day` fragment per calendar day
//! 3. **Classify**: every table cell is recognized as a [`fields::Field`]
//! 4. **Convert**: the cell text becomes a height, a tide kind or a full datetime
//! 5. **Assemble**: rows are folded into a [`DayForecast`]
//! 6. **Filter**: only low tides strictly between sunrise and sunset survive
//! 7. **Export**: surviving tides are flattened into CSV rows
//!
//! Every step is a plain function over small values. The run is a single batch:
//! the first error aborts it.
//!
//! ## Core Types
//! - [`Tide`]: one high or low water event
//! - [`DayForecast`]: sunrise, sunset and the tides of one calendar day

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod config;
pub mod export;
pub mod fields;
pub mod forecast;
pub mod pipeline;
pub mod tide_data;
pub mod time_parse;

#[cfg(test)]
mod tests;

/// Errors raised anywhere in the scrape → classify → convert → export pipeline.
///
/// None of these are recovered from. The batch aborts on the first one.
#[derive(Error, Debug)]
pub enum ForecastError {
    /// A table cell matched none of the known field patterns
    #[error("Element {0:?} not found as an option")]
    UnrecognizedField(String),

    /// Clock time could not be read from a cell
    #[error("invalid time: {0:?}")]
    InvalidTime(String),

    /// Calendar date could not be read from a header or parenthetical
    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    /// Height cell did not start with a number followed by " ft"
    #[error("invalid height: {0:?}")]
    InvalidHeight(String),

    /// Tide type cell was neither "Low Tide" nor "High Tide"
    #[error("invalid tide type: {0:?}")]
    InvalidTideKind(String),

    /// A record was finalized without all of its mandatory attributes
    #[error("missing required field(s): {}", .0.join(", "))]
    MissingField(Vec<&'static str>),

    /// Day fragment had no `h4.tide-day__date` header
    #[error("day fragment has no date header")]
    MissingDateHeader,

    /// HTTP request failed (network, server, or protocol error)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Writing the export file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ForecastError>;

/// Whether a tide event is a high or a low water.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TideKind {
    Low,
    High,
}

impl TideKind {
    /// Text used on the forecast pages and in the export.
    pub fn label(self) -> &'static str {
        match self {
            TideKind::Low => "Low Tide",
            TideKind::High => "High Tide",
        }
    }
}

impl FromStr for TideKind {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "Low Tide" => Ok(TideKind::Low),
            "High Tide" => Ok(TideKind::High),
            other => Err(ForecastError::InvalidTideKind(other.to_string())),
        }
    }
}

impl fmt::Display for TideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single high or low water event.
///
/// Heights are signed feet relative to chart datum; negative values are
/// ordinary for spring lows.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use tide_scout_lib::{Tide, TideKind};
///
/// let tide = Tide {
///     feet_height: 1.05,
///     kind: TideKind::Low,
///     time: NaiveDate::from_ymd_opt(2022, 10, 19)
///         .unwrap()
///         .and_hms_opt(15, 0, 0)
///         .unwrap(),
/// };
/// assert_eq!(tide.kind.label(), "Low Tide");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Tide {
    /// Height in feet
    pub feet_height: f64,
    /// High or low water
    pub kind: TideKind,
    /// Local time of the event
    pub time: NaiveDateTime,
}

/// Everything a day fragment says about one calendar day.
///
/// Tides keep the order of the source rows. Construction goes through
/// [`forecast::ForecastBuilder`], which rejects a day without a date,
/// sunrise or sunset.
#[derive(Clone, Debug, PartialEq)]
pub struct DayForecast {
    pub date: NaiveDate,
    pub sunrise_time: NaiveDateTime,
    pub sunset_time: NaiveDateTime,
    pub tides: Vec<Tide>,
}
