use std::fs;
use std::path::{Path, PathBuf};

use assert_matches::assert_matches;
use bpchart::clump::{clump, default_window, runs};
use bpchart::loader::load_readings;
use bpchart::reading::Reading;
use bpchart::ChartError;
use chrono::{Duration, TimeZone, Utc};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

#[test]
fn fixtures_load_merged_and_sorted() {
    let readings = load_readings(&fixtures(), "csv").unwrap();
    assert_eq!(readings.len(), 8);
    assert!(readings
        .windows(2)
        .all(|w| w[0].timestamp <= w[1].timestamp));
    assert_eq!(
        readings[0].timestamp,
        Utc.with_ymd_and_hms(2022, 6, 1, 7, 0, 0).unwrap()
    );
}

#[test]
fn fixtures_clump_into_three_points() {
    let readings = load_readings(&fixtures(), "csv").unwrap();
    let points = clump(&readings, default_window());
    assert_eq!(points.len(), 3);

    let morning = points[0];
    assert_eq!(
        morning.timestamp,
        Utc.with_ymd_and_hms(2022, 6, 1, 7, 5, 0).unwrap()
    );
    assert_eq!(morning.systolic, 122.0);
    assert_eq!(morning.count, 3);

    // one isolated reading passes through untouched
    assert_eq!(points[1].systolic, 131.0);
    assert_eq!(points[1].count, 1);

    // 50 minute gaps chain across two and a half hours
    let evening = points[2];
    assert_eq!(evening.count, 4);
    assert_eq!(
        evening.timestamp,
        Utc.with_ymd_and_hms(2022, 7, 1, 22, 15, 0).unwrap()
    );
    assert_eq!(
        (evening.systolic, evening.diastolic, evening.heart_rate),
        (134.0, 89.0, 75.0)
    );
}

#[test]
fn clumping_is_idempotent_on_fixtures() {
    let readings = load_readings(&fixtures(), "csv").unwrap();
    let once = clump(&readings, default_window());
    assert_eq!(clump(&once, default_window()), once);
}

#[test]
fn narrower_window_breaks_the_evening_chain() {
    let readings = load_readings(&fixtures(), "csv").unwrap();
    let points = clump(&readings, Duration::minutes(30));
    // the three morning readings still chain, the evening ones split
    assert_eq!(points.len(), 6);
}

#[test]
fn run_count_matches_gaps_over_window() {
    let base = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let minutes = [0, 45, 90, 200, 201, 400, 461, 470, 1000];
    let readings: Vec<Reading> = minutes
        .iter()
        .map(|&m| Reading::new(base + Duration::minutes(m), 120, 80, 70))
        .collect();

    let window = default_window();
    let gaps_over = readings
        .windows(2)
        .filter(|w| w[1].timestamp - w[0].timestamp > window)
        .count();

    assert_eq!(runs(&readings, window).len(), gaps_over + 1);
    assert_eq!(clump(&readings, window).len(), gaps_over + 1);
}

#[test]
fn malformed_time_aborts_the_load() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("bad.csv"),
        "Date,Time,Systolic,Diastolic,Heart Rate\n6/1/2022,7:00,118,78,60\n",
    )
    .unwrap();

    assert_matches!(
        load_readings(dir.path(), "csv"),
        Err(ChartError::TimestampParse(s)) if s == "6/1/2022 7:00"
    );
}
