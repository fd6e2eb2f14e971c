use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::time_series::ClumpedPoint;

#[derive(Debug, Serialize)]
struct ExportRow {
    datetime: String,
    systolic: String,
    diastolic: String,
    heart_rate: String,
    count: usize,
}

impl From<&ClumpedPoint> for ExportRow {
    fn from(p: &ClumpedPoint) -> Self {
        Self {
            datetime: p.timestamp.to_rfc3339(),
            systolic: format!("{:.2}", p.systolic),
            diastolic: format!("{:.2}", p.diastolic),
            heart_rate: format!("{:.2}", p.heart_rate),
            count: p.count,
        }
    }
}

/// Write the clumped series as CSV. The header is written even when there
/// are no points.
pub fn write_points<W: Write>(points: &[ClumpedPoint], out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(["datetime", "systolic", "diastolic", "heart_rate", "count"])?;
    for p in points {
        writer.serialize(ExportRow::from(p))?;
    }
    writer.flush()?;
    Ok(())
}
