use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ChartError, Result};

/// Dates worth flagging on the chart, e.g. when a medication was started.
///
/// Every date becomes a vertical line on both panels; the label appears once
/// in the legend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateMarkerGroup {
    pub label: String,
    pub color: String,
    #[serde(default)]
    pub dates: Vec<NaiveDate>,
}

impl DateMarkerGroup {
    pub fn new(label: impl Into<String>, color: impl Into<String>, dates: Vec<NaiveDate>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
            dates,
        }
    }
}

/// Read a JSON array of marker groups.
pub fn load_markers(path: &Path) -> Result<Vec<DateMarkerGroup>> {
    let bytes = std::fs::read(path).map_err(|source| ChartError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}
