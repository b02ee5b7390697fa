//! # CSV Export
//!
//! One row per daylight low tide, written as a flat comma-separated table with
//! a header row and no index column.

use crate::{DayForecast, Result, Tide};
use chrono::NaiveDateTime;
use std::fs;
use std::io::Write;
use std::path::Path;

pub const HEADERS: [&str; 6] = [
    "feet_height",
    "tide_type",
    "tide_time",
    "sunrise_time",
    "sunset_time",
    "location",
];

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One exported tide with the sun times of its day and the location slug.
#[derive(Clone, Debug, PartialEq)]
pub struct LowTideRow {
    pub feet_height: f64,
    pub tide_type: String,
    pub tide_time: NaiveDateTime,
    pub sunrise_time: NaiveDateTime,
    pub sunset_time: NaiveDateTime,
    pub location: String,
}

impl LowTideRow {
    pub fn new(tide: &Tide, forecast: &DayForecast, location: &str) -> Self {
        Self {
            feet_height: tide.feet_height,
            tide_type: tide.kind.label().to_string(),
            tide_time: tide.time,
            sunrise_time: forecast.sunrise_time,
            sunset_time: forecast.sunset_time,
            location: location_slug(location),
        }
    }

    fn cells(&self) -> [String; 6] {
        [
            self.feet_height.to_string(),
            self.tide_type.clone(),
            self.tide_time.format(DATETIME_FORMAT).to_string(),
            self.sunrise_time.format(DATETIME_FORMAT).to_string(),
            self.sunset_time.format(DATETIME_FORMAT).to_string(),
            self.location.clone(),
        ]
    }
}

/// Lower-case a location identifier and turn `-` into `_`.
pub fn location_slug(location: &str) -> String {
    location.to_lowercase().replace('-', "_")
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(w: &mut W, row: &[S]) -> std::io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            w.write_all(b",")?;
        }
        let cell = cell.as_ref();
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    w.write_all(b"\n")
}

/// Write the header and all rows.
pub fn write_rows<W: Write>(w: &mut W, rows: &[LowTideRow]) -> std::io::Result<()> {
    write_row(w, &HEADERS)?;
    for row in rows {
        write_row(w, &row.cells())?;
    }
    Ok(())
}

/// Write rows to `path`, creating parent directories as needed.
pub fn write_csv(path: &Path, rows: &[LowTideRow]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut out = Vec::new();
    write_rows(&mut out, rows)?;
    fs::write(path, out)?;
    Ok(())
}
