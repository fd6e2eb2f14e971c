use chrono::{DateTime, Utc};

use crate::reading::Reading;

/// Anything with a timestamp and the three charted values.
pub trait Sample {
    fn timestamp(&self) -> DateTime<Utc>;
    fn systolic(&self) -> f64;
    fn diastolic(&self) -> f64;
    fn heart_rate(&self) -> f64;

    /// Number of underlying readings this sample stands for.
    fn count(&self) -> usize {
        1
    }
}

impl Sample for Reading {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn systolic(&self) -> f64 {
        self.systolic as f64
    }

    fn diastolic(&self) -> f64 {
        self.diastolic as f64
    }

    fn heart_rate(&self) -> f64 {
        self.heart_rate as f64
    }
}

/// The averaged representative of one run of nearby readings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClumpedPoint {
    pub timestamp: DateTime<Utc>,
    pub systolic: f64,
    pub diastolic: f64,
    pub heart_rate: f64,
    /// Number of readings averaged into this point.
    pub count: usize,
}

impl ClumpedPoint {
    pub fn new(
        timestamp: DateTime<Utc>,
        systolic: f64,
        diastolic: f64,
        heart_rate: f64,
        count: usize,
    ) -> Self {
        Self {
            timestamp,
            systolic,
            diastolic,
            heart_rate,
            count,
        }
    }

    /// Seconds since the epoch, as plotted on the chart's x axis.
    pub fn x(&self) -> f64 {
        epoch_secs(self.timestamp)
    }
}

impl Sample for ClumpedPoint {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn systolic(&self) -> f64 {
        self.systolic
    }

    fn diastolic(&self) -> f64 {
        self.diastolic
    }

    fn heart_rate(&self) -> f64 {
        self.heart_rate
    }

    fn count(&self) -> usize {
        self.count
    }
}

impl From<&Reading> for ClumpedPoint {
    fn from(r: &Reading) -> Self {
        ClumpedPoint {
            timestamp: r.timestamp,
            systolic: r.systolic as f64,
            diastolic: r.diastolic as f64,
            heart_rate: r.heart_rate as f64,
            count: 1,
        }
    }
}

/// Seconds since the epoch with millisecond precision.
pub fn epoch_secs(t: DateTime<Utc>) -> f64 {
    t.timestamp_millis() as f64 / 1000.0
}
