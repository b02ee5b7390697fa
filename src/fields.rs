//! # Cell Classification and Conversion
//!
//! Forecast tables carry no column labels the parser can rely on, so each
//! cell is recognized from its own text. Rules are checked in a fixed order
//! and the first match wins; the order matters because the patterns overlap
//! (`"Low Tide"` would otherwise be fine as free text, `"Sunrise: 7:19AM"`
//! also contains `AM`).

use crate::time_parse::parse_time;
use crate::{ForecastError, Result, TideKind};
use chrono::{NaiveDate, NaiveDateTime};

/// Day-level attribute a cell fills in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayField {
    Sunrise,
    Sunset,
    Moonrise,
    Moonset,
}

/// Attribute of the tide described by the current row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TideField {
    Kind,
    Time,
    Height,
}

/// Which record a classified value is routed to, and which slot of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Day(DayField),
    Tide(TideField),
}

/// Coarse value type of a classified cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueType {
    Text,
    DateTime,
}

/// Semantic meaning of a table cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    TideType,
    SunriseTime,
    SunsetTime,
    MoonriseTime,
    MoonsetTime,
    TideTime,
    FeetHeight,
}

impl Field {
    /// Classify a trimmed cell text.
    ///
    /// # Errors
    /// [`ForecastError::UnrecognizedField`] when no rule matches, including
    /// for the empty string.
    ///
    /// # Example
    /// ```
    /// use tide_scout_lib::fields::{Field, ValueType};
    ///
    /// let field = Field::classify("1.05 ft (0.32 m)").unwrap();
    /// assert_eq!(field, Field::FeetHeight);
    /// assert_eq!(field.value_type(), ValueType::Text);
    /// ```
    pub fn classify(text: &str) -> Result<Self> {
        let field = if text.contains("Tide") {
            Field::TideType
        } else if text.contains("Sunrise") {
            Field::SunriseTime
        } else if text.contains("Sunset") {
            Field::SunsetTime
        } else if text.contains("Moonrise") {
            Field::MoonriseTime
        } else if text.contains("Moonset") {
            Field::MoonsetTime
        } else if text.contains("AM") || text.contains("PM") {
            Field::TideTime
        } else if text.contains("ft") {
            Field::FeetHeight
        } else {
            return Err(ForecastError::UnrecognizedField(text.to_string()));
        };
        Ok(field)
    }

    pub fn value_type(self) -> ValueType {
        match self {
            Field::TideType | Field::FeetHeight => ValueType::Text,
            Field::SunriseTime
            | Field::SunsetTime
            | Field::MoonriseTime
            | Field::MoonsetTime
            | Field::TideTime => ValueType::DateTime,
        }
    }

    pub fn target(self) -> Target {
        match self {
            Field::SunriseTime => Target::Day(DayField::Sunrise),
            Field::SunsetTime => Target::Day(DayField::Sunset),
            Field::MoonriseTime => Target::Day(DayField::Moonrise),
            Field::MoonsetTime => Target::Day(DayField::Moonset),
            Field::TideType => Target::Tide(TideField::Kind),
            Field::TideTime => Target::Tide(TideField::Time),
            Field::FeetHeight => Target::Tide(TideField::Height),
        }
    }

    /// Column-style name, used in validation errors.
    pub fn name(self) -> &'static str {
        match self {
            Field::TideType => "tide_type",
            Field::SunriseTime => "sunrise_time",
            Field::SunsetTime => "sunset_time",
            Field::MoonriseTime => "moonrise_time",
            Field::MoonsetTime => "moonset_time",
            Field::TideTime => "tide_time",
            Field::FeetHeight => "feet_height",
        }
    }
}

/// Typed value of a tide cell.
#[derive(Clone, Debug, PartialEq)]
pub enum TideValue {
    Kind(TideKind),
    Height(f64),
    Time(NaiveDateTime),
}

/// A converted cell, already bound to the slot it fills.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Day(DayField, NaiveDateTime),
    Tide(TideValue),
}

/// Convert a classified cell into its typed value.
///
/// Datetime fields go through [`parse_time`] with `forecast_date` as context,
/// heights keep the number in front of `" ft"`, and the tide type is read as a
/// [`TideKind`].
pub fn convert(raw: &str, field: Field, forecast_date: NaiveDate) -> Result<CellValue> {
    let value = match field.target() {
        Target::Day(day) => CellValue::Day(day, parse_time(raw, forecast_date)?),
        Target::Tide(TideField::Time) => {
            CellValue::Tide(TideValue::Time(parse_time(raw, forecast_date)?))
        }
        Target::Tide(TideField::Height) => CellValue::Tide(TideValue::Height(parse_height(raw)?)),
        Target::Tide(TideField::Kind) => CellValue::Tide(TideValue::Kind(raw.trim().parse()?)),
    };
    Ok(value)
}

/// Read the feet value from a dual-unit height such as `1.05 ft (0.32 m)`.
pub fn parse_height(raw: &str) -> Result<f64> {
    let invalid = || ForecastError::InvalidHeight(raw.to_string());
    let (feet, _) = raw.split_once(" ft").ok_or_else(invalid)?;
    feet.trim().parse::<f64>().map_err(|_| invalid())
}
