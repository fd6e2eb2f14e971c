use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use itertools::{Itertools, MinMaxResult};
use ratatui::style::Color;

/// Padding added above and below the data on the y axis.
pub const Y_PADDING: f64 = 5.0;

const HOUR: f64 = 3600.0;
const DAY: f64 = 24.0 * HOUR;

/// Compute padded Y bounds covering `lows` and `highs`.
///
/// The pressure panel passes diastolic values as `lows` and systolic values
/// as `highs`; the heart rate panel passes the same values for both.
pub fn y_bounds(lows: &[f64], highs: &[f64]) -> [f64; 2] {
    let low = match lows.iter().copied().minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => 0.0,
        MinMaxResult::OneElement(v) => v,
        MinMaxResult::MinMax(min, _) => min,
    };
    let high = match highs.iter().copied().minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => low,
        MinMaxResult::OneElement(v) => v,
        MinMaxResult::MinMax(_, max) => max,
    };
    [low - Y_PADDING, high + Y_PADDING]
}

/// strftime pattern for x axis labels, coarser as the visible span grows.
pub fn tick_format(span_secs: f64) -> &'static str {
    if span_secs >= 2.0 * 365.0 * DAY {
        "%Y"
    } else if span_secs >= 60.0 * DAY {
        "%Y %b"
    } else if span_secs >= 2.0 * DAY {
        "%y %b %d"
    } else if span_secs >= 12.0 * HOUR {
        "%b %d %H:00"
    } else {
        "%d %H:%M"
    }
}

pub fn to_datetime(x: f64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt((x * 1000.0).round() as i64).single()
}

/// `count` evenly spaced labels across `bounds`, ends included.
pub fn time_labels(bounds: [f64; 2], count: usize) -> Vec<String> {
    let [start, end] = bounds;
    let fmt = tick_format(end - start);
    let steps = count.saturating_sub(1).max(1) as f64;

    (0..count)
        .map(|i| start + (end - start) * i as f64 / steps)
        .map(|x| {
            to_datetime(x)
                .map(|t| t.format(fmt).to_string())
                .unwrap_or_default()
        })
        .collect()
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

/// Resolve a marker color name.
///
/// Accepts anything ratatui understands (`blue`, `lightred`, `#8a2be2`, ...)
/// plus the CSS names `purple` and `orange`, which it has no name for.
pub fn parse_color(name: &str) -> Option<Color> {
    match name.trim().to_lowercase().as_str() {
        "purple" => Some(Color::Rgb(128, 0, 128)),
        "orange" => Some(ORANGE),
        other => Color::from_str(other).ok(),
    }
}

pub const ORANGE: Color = Color::Rgb(255, 165, 0);
pub const RAW_GREY: Color = Color::Rgb(0xCC, 0xCC, 0xCC);
