//! Time-window clumping of readings.
//!
//! Readings are chained into runs: a reading joins the current run when it
//! is within `window` of the reading immediately before it. Because the
//! comparison is against the predecessor and not the first member, a run can
//! span much more than `window` as long as no single gap exceeds it. Each run
//! collapses to one [`ClumpedPoint`] holding the mean of its members.

use std::ops::Range;

use chrono::Duration;
use tracing::debug;

use crate::time_series::{ClumpedPoint, Sample};
use crate::util::{mean, mean_timestamp};

/// Window used when nothing else is configured.
pub const DEFAULT_WINDOW_MINUTES: i64 = 60;

pub fn default_window() -> Duration {
    Duration::minutes(DEFAULT_WINDOW_MINUTES)
}

/// Index ranges of the maximal chained runs in `samples`.
///
/// `samples` must be sorted ascending by timestamp.
pub fn runs<S: Sample>(samples: &[S], window: Duration) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;

    for (i, sample) in samples.iter().enumerate() {
        let prev = i.checked_sub(1).map(|p| &samples[p]);
        let next = samples.get(i + 1);

        let joins_run = start.is_none()
            || prev.is_some_and(|p| sample.timestamp() - p.timestamp() <= window);
        if !joins_run {
            // unsorted input only
            if let Some(s) = start.take() {
                runs.push(s..i);
            }
        }
        let run_start = *start.get_or_insert(i);

        let closes_run = next.map_or(true, |n| n.timestamp() - sample.timestamp() > window);
        if closes_run {
            runs.push(run_start..i + 1);
            start = None;
        }
    }

    runs
}

/// Collapse each chained run of `samples` into its mean point.
///
/// Single-sample runs come through unchanged. The output is sorted by
/// timestamp and never longer than the input.
pub fn clump<S: Sample>(samples: &[S], window: Duration) -> Vec<ClumpedPoint> {
    let mut points: Vec<ClumpedPoint> = runs(samples, window)
        .into_iter()
        .map(|run| average(&samples[run]))
        .collect();

    points.sort_by_key(|p| p.timestamp);

    debug!(
        "Clumped {} samples into {} points (window {} min)",
        samples.len(),
        points.len(),
        window.num_minutes()
    );

    points
}

fn average<S: Sample>(run: &[S]) -> ClumpedPoint {
    if let [only] = run {
        return ClumpedPoint::new(
            only.timestamp(),
            only.systolic(),
            only.diastolic(),
            only.heart_rate(),
            only.count(),
        );
    }

    let timestamps: Vec<_> = run.iter().map(|s| s.timestamp()).collect();
    let field = |f: fn(&S) -> f64| -> f64 {
        let values: Vec<f64> = run.iter().map(f).collect();
        mean(&values).unwrap_or_default()
    };

    ClumpedPoint {
        // run is never empty, so the mean always exists
        timestamp: mean_timestamp(&timestamps).unwrap_or(timestamps[0]),
        systolic: field(S::systolic),
        diastolic: field(S::diastolic),
        heart_rate: field(S::heart_rate),
        count: run.iter().map(|s| s.count()).sum(),
    }
}
