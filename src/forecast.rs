//! # Day Forecast Assembly
//!
//! A `div.tide-day` fragment holds a date header and a handful of table rows.
//! Rows are folded into a [`DayForecast`] with two small builders: a
//! [`TideBuilder`] that collects the cells of one row and is flushed when the
//! row ends, and a [`ForecastBuilder`] that collects day-level attributes and
//! the finished tides.
//!
//! ```html
//! <div class="tide-day">
//!   <h4 class="tide-day__date">Tide Times for Half Moon Bay: Wednesday 19 October 2022</h4>
//!   <table>
//!     <tr><td>Low Tide</td><td><b>3:21 AM</b>(Wed 19 October)</td><td><b>2.47 ft</b> (0.75 m)</td></tr>
//!     ...
//!   </table>
//!   <table>
//!     <tr><td>Sunrise: 7:19AM</td><td>Sunset: 6:31PM</td></tr>
//!   </table>
//! </div>
//! ```

use crate::fields::{convert, CellValue, DayField, Field, TideValue};
use crate::time_parse::parse_forecast_date;
use crate::{DayForecast, ForecastError, Result, Tide, TideKind};
use chrono::{NaiveDate, NaiveDateTime};
use scraper::{ElementRef, Selector};
use tracing::debug;

pub(crate) fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("CSS selector should be valid")
}

/// Cells of one table row that describe a tide.
#[derive(Debug, Default)]
pub struct TideBuilder {
    feet_height: Option<f64>,
    kind: Option<TideKind>,
    time: Option<NaiveDateTime>,
}

impl TideBuilder {
    pub fn set(&mut self, value: TideValue) {
        match value {
            TideValue::Height(feet) => self.feet_height = Some(feet),
            TideValue::Kind(kind) => self.kind = Some(kind),
            TideValue::Time(time) => self.time = Some(time),
        }
    }

    /// True until the first tide cell of the row has been seen.
    pub fn is_empty(&self) -> bool {
        self.feet_height.is_none() && self.kind.is_none() && self.time.is_none()
    }

    /// Build the tide, naming every attribute the row never supplied.
    pub fn finalize(self) -> Result<Tide> {
        match (self.feet_height, self.kind, self.time) {
            (Some(feet_height), Some(kind), Some(time)) => Ok(Tide {
                feet_height,
                kind,
                time,
            }),
            (feet_height, kind, time) => {
                let mut missing = Vec::new();
                if feet_height.is_none() {
                    missing.push(Field::FeetHeight.name());
                }
                if kind.is_none() {
                    missing.push(Field::TideType.name());
                }
                if time.is_none() {
                    missing.push(Field::TideTime.name());
                }
                Err(ForecastError::MissingField(missing))
            }
        }
    }
}

/// Day-level attributes plus the tides finished so far.
#[derive(Debug, Default)]
pub struct ForecastBuilder {
    date: Option<NaiveDate>,
    sunrise_time: Option<NaiveDateTime>,
    sunset_time: Option<NaiveDateTime>,
    tides: Vec<Tide>,
}

impl ForecastBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(&mut self, date: NaiveDate) {
        self.date = Some(date);
    }

    /// Record a day-level time. Moonrise and moonset are accepted but not kept.
    pub fn set(&mut self, field: DayField, time: NaiveDateTime) {
        match field {
            DayField::Sunrise => self.sunrise_time = Some(time),
            DayField::Sunset => self.sunset_time = Some(time),
            DayField::Moonrise | DayField::Moonset => {}
        }
    }

    /// Close a row: a row that produced tide cells becomes a tide.
    pub fn end_row(&mut self, row: TideBuilder) -> Result<()> {
        if !row.is_empty() {
            self.tides.push(row.finalize()?);
        }
        Ok(())
    }

    /// Build the forecast, naming every mandatory attribute still missing.
    pub fn finalize(self) -> Result<DayForecast> {
        match (self.date, self.sunrise_time, self.sunset_time) {
            (Some(date), Some(sunrise_time), Some(sunset_time)) => Ok(DayForecast {
                date,
                sunrise_time,
                sunset_time,
                tides: self.tides,
            }),
            (date, sunrise_time, sunset_time) => {
                let mut missing = Vec::new();
                if date.is_none() {
                    missing.push("date");
                }
                if sunrise_time.is_none() {
                    missing.push(Field::SunriseTime.name());
                }
                if sunset_time.is_none() {
                    missing.push(Field::SunsetTime.name());
                }
                Err(ForecastError::MissingField(missing))
            }
        }
    }
}

/// Assemble one `div.tide-day` fragment into a [`DayForecast`].
///
/// # Errors
/// Fails on the first cell that cannot be classified or converted, when the
/// date header is absent, or when the day lacks a sunrise or sunset.
pub fn assemble_day(fragment: ElementRef<'_>) -> Result<DayForecast> {
    let header = fragment
        .select(&selector("h4.tide-day__date"))
        .next()
        .ok_or(ForecastError::MissingDateHeader)?;
    let forecast_date = parse_forecast_date(header.text().collect::<String>().trim())?;

    let mut forecast = ForecastBuilder::new();
    forecast.date(forecast_date);

    let cell_selector = selector("td");
    for row in fragment.select(&selector("tr")) {
        let mut tide = TideBuilder::default();
        for cell in row.select(&cell_selector) {
            let text = cell.text().collect::<String>();
            let text = text.trim();
            if text.is_empty() {
                continue;
            }

            let field = Field::classify(text)?;
            match convert(text, field, forecast_date)? {
                CellValue::Day(day, time) => forecast.set(day, time),
                CellValue::Tide(value) => tide.set(value),
            }
        }
        forecast.end_row(tide)?;
    }

    let forecast = forecast.finalize()?;
    debug!(
        date = %forecast.date,
        tides = forecast.tides.len(),
        "assembled day forecast"
    );
    Ok(forecast)
}

/// True when `time` falls strictly between sunrise and sunset.
pub fn is_daylight(sunrise: NaiveDateTime, sunset: NaiveDateTime, time: NaiveDateTime) -> bool {
    sunrise < time && time < sunset
}

/// Low tides that happen while the sun is up, in source order.
pub fn daylight_low_tides(forecast: &DayForecast) -> Vec<&Tide> {
    forecast
        .tides
        .iter()
        .filter(|tide| {
            tide.kind == TideKind::Low
                && is_daylight(forecast.sunrise_time, forecast.sunset_time, tide.time)
        })
        .collect()
}
