//! # Date and Time Parsing
//!
//! Forecast pages never print a full timestamp in one place. A cell carries
//! either a clock time with a bracketed day and month, e.g.
//! `3:00 PM(Wed 19 October)`, or a labelled clock time such as
//! `Sunrise: 7:19AM` that belongs to the day named in the fragment header.
//!
//! ## Year Inference
//! The bracketed form has no year. Candidates are the context year and its
//! neighbours; the one whose weekday agrees with the printed weekday and lies
//! closest to the context date is used. Without a usable weekday the closest
//! candidate wins. This keeps a page that runs from late December into January
//! on the right side of New Year.

use crate::{ForecastError, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

/// Formats accepted for the day header, tried in order.
const HEADER_DATE_FORMATS: [&str; 3] = ["%A %d %B %Y", "%d %B %Y", "%A %B %d %Y"];

/// Parse a time cell into a full datetime.
///
/// `context` is the fragment's calendar date and is used both as the date for
/// labelled times and as the anchor for year inference.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use tide_scout_lib::time_parse::parse_time;
///
/// let day = NaiveDate::from_ymd_opt(2022, 10, 19).unwrap();
/// let sunrise = parse_time("Sunrise: 7:19AM", day).unwrap();
/// assert_eq!(sunrise, day.and_hms_opt(7, 19, 0).unwrap());
/// ```
pub fn parse_time(raw: &str, context: NaiveDate) -> Result<NaiveDateTime> {
    if let Some((clock, bracketed)) = raw.split_once('(') {
        let date_text = bracketed.split(')').next().unwrap_or_default();
        let date = parse_day_month(date_text, context)?;
        let time = parse_clock(clock)?;
        return Ok(date.and_time(time));
    }

    let time = parse_clock(strip_label(raw))?;
    Ok(context.and_time(time))
}

/// Parse the `h4.tide-day__date` header text into a calendar date.
///
/// The header reads `<label>: <date>`; only the part after `": "` is parsed.
pub fn parse_forecast_date(header: &str) -> Result<NaiveDate> {
    let date_text = header
        .split(": ")
        .nth(1)
        .ok_or_else(|| ForecastError::InvalidDate(header.to_string()))?
        .trim();

    HEADER_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_text, fmt).ok())
        .ok_or_else(|| ForecastError::InvalidDate(date_text.to_string()))
}

/// Parse a clock time such as `7:19AM`, `3:00 PM` or `19:19`.
pub fn parse_clock(raw: &str) -> Result<NaiveTime> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();

    NaiveTime::parse_from_str(&compact, "%I:%M%p")
        .or_else(|_| NaiveTime::parse_from_str(&compact, "%H:%M"))
        .map_err(|_| ForecastError::InvalidTime(raw.trim().to_string()))
}

/// Drop a leading `Label:` when the text before the first colon is a word.
fn strip_label(raw: &str) -> &str {
    match raw.split_once(':') {
        Some((label, rest)) if label.chars().any(char::is_alphabetic) => rest.trim(),
        _ => raw.trim(),
    }
}

/// Resolve `Wed 19 October` (weekday optional) to a date near `context`.
fn parse_day_month(raw: &str, context: NaiveDate) -> Result<NaiveDate> {
    let invalid = || ForecastError::InvalidDate(raw.trim().to_string());

    let mut tokens: Vec<&str> = raw.split_whitespace().collect();
    let weekday = match tokens.first() {
        Some(first) if first.parse::<u32>().is_err() => {
            let weekday = first.parse::<Weekday>().ok();
            tokens.remove(0);
            weekday
        }
        _ => None,
    };

    let [day, month] = tokens[..] else {
        return Err(invalid());
    };

    let candidates: Vec<NaiveDate> = [context.year() - 1, context.year(), context.year() + 1]
        .into_iter()
        .filter_map(|year| {
            NaiveDate::parse_from_str(&format!("{day} {month} {year}"), "%d %B %Y").ok()
        })
        .collect();

    let distance = |date: &NaiveDate| (*date - context).num_days().abs();

    let matching_weekday = candidates
        .iter()
        .filter(|date| Some(date.weekday()) == weekday)
        .min_by_key(|date| distance(date));

    matching_weekday
        .or_else(|| candidates.iter().min_by_key(|date| distance(date)))
        .copied()
        .ok_or_else(invalid)
}
