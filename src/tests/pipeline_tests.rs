//! # Forecast Page Pipeline Tests
//!
//! Runs a saved 28-day Half Moon Bay page through fragment splitting, day
//! assembly, the daylight filter and CSV export.

use crate::export::{write_csv, write_rows, HEADERS};
use crate::forecast::daylight_low_tides;
use crate::pipeline::location_rows;
use crate::tide_data::parse_page;
use crate::{ForecastError, TideKind};
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use tempfile::tempdir;

const HALF_MOON_BAY: &str = include_str!("../../tests/fixtures/half_moon_bay.html");

fn at(m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2022, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

#[test]
fn page_has_28_day_fragments() {
    assert_eq!(parse_page(HALF_MOON_BAY).unwrap().len(), 28);
}

#[test]
fn every_day_assembles_with_three_or_four_tides() {
    let days = parse_page(HALF_MOON_BAY).unwrap();
    assert_eq!(days.len(), 28);

    for forecast in &days {
        assert!(
            (3..=4).contains(&forecast.tides.len()),
            "{} has {} tides",
            forecast.date,
            forecast.tides.len()
        );
        assert_eq!(forecast.sunrise_time.date(), forecast.date);
        assert_eq!(forecast.sunset_time.date(), forecast.date);
        assert!(forecast.sunrise_time < forecast.sunset_time);

        let lows = daylight_low_tides(forecast);
        assert!(lows.len() <= 2, "{} has {} daylight lows", forecast.date, lows.len());
        for tide in lows {
            assert_eq!(tide.kind, TideKind::Low);
            assert_eq!(tide.time.date(), forecast.date);
        }
    }
}

#[test]
fn days_follow_page_order_across_month_boundary() {
    let days = parse_page(HALF_MOON_BAY).unwrap();
    assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2022, 9, 22).unwrap());
    assert_eq!(days[27].date, NaiveDate::from_ymd_opt(2022, 10, 19).unwrap());
    for pair in days.windows(2) {
        assert_eq!(pair[1].date, pair[0].date.succ_opt().unwrap());
    }
}

#[test]
fn first_day_matches_page() {
    let days = parse_page(HALF_MOON_BAY).unwrap();
    let first = &days[0];

    assert_eq!(first.sunrise_time, at(9, 22, 6, 59));
    assert_eq!(first.sunset_time, at(9, 22, 19, 10));
    assert_eq!(first.tides.len(), 4);
    assert_eq!(first.tides[0].kind, TideKind::High);
    assert_eq!(first.tides[0].feet_height, 6.0);
    assert_eq!(first.tides[0].time, at(9, 22, 3, 10));

    let lows = daylight_low_tides(first);
    assert_eq!(lows.len(), 1);
    assert_eq!(lows[0].time, at(9, 22, 9, 29));
    assert_eq!(lows[0].feet_height, 0.5);
}

#[test]
fn location_rows_flatten_all_days() {
    let rows = location_rows("Half-Moon-Bay-California", HALF_MOON_BAY).unwrap();
    assert_eq!(rows.len(), 26);

    for row in &rows {
        assert_eq!(row.location, "half_moon_bay_california");
        assert_eq!(row.tide_type, "Low Tide");
        assert!(row.sunrise_time < row.tide_time && row.tide_time < row.sunset_time);
    }

    assert_eq!(rows[0].tide_time, at(9, 22, 9, 29));
    assert_eq!(rows[0].sunrise_time, at(9, 22, 6, 59));
}

#[test]
fn exported_csv_has_one_line_per_row() {
    let rows = location_rows("Half-Moon-Bay-California", HALF_MOON_BAY).unwrap();
    let dir = tempdir().unwrap();
    let path = dir.path().join("low_daylight_forecast.csv");
    write_csv(&path, &rows).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next().unwrap(), HEADERS.join(","));
    assert_eq!(
        lines.next().unwrap(),
        "0.5,Low Tide,2022-09-22 09:29:00,2022-09-22 06:59:00,2022-09-22 19:10:00,half_moon_bay_california"
    );
    assert_eq!(lines.count(), 25);

    let mut buffer = Vec::new();
    write_rows(&mut buffer, &rows).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), text);
}

#[test]
fn unrecognized_cell_aborts_page() {
    let broken = HALF_MOON_BAY.replacen("<td>Low Tide</td>", "<td>Slack water</td>", 1);
    match location_rows("Half-Moon-Bay-California", &broken) {
        Err(ForecastError::UnrecognizedField(text)) => assert_eq!(text, "Slack water"),
        other => panic!("expected UnrecognizedField, got {other:?}"),
    }
}

#[test]
fn missing_sunrise_aborts_page() {
    let broken = HALF_MOON_BAY.replacen(
        r#"<td><span class="tide-day__sun-label">Sunrise: </span>6:59AM</td>"#,
        "",
        1,
    );
    match parse_page(&broken) {
        Err(ForecastError::MissingField(missing)) => assert_eq!(missing, ["sunrise_time"]),
        other => panic!("expected MissingField, got {other:?}"),
    }
}
