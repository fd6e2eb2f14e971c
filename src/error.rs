use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading, aggregating or charting readings.
#[derive(Error, Debug)]
pub enum ChartError {
    /// The directory holding the CSV exports does not exist.
    #[error("Data directory not found: {0}")]
    DataDirNotFound(PathBuf),

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV file had a missing column or a row that did not deserialize.
    #[error("Failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The clumped series could not be written out.
    #[error("Failed to write CSV: {0}")]
    CsvWrite(#[from] csv::Error),

    /// A Date/Time pair did not match `%m/%d/%Y %I:%M %p`.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// A configuration value is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The configuration or markers file is not valid JSON.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// An error originating from the terminal layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;
