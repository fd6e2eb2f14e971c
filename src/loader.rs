//! CSV discovery and loading.
//!
//! Every file with the configured extension directly inside the data
//! directory is read and the rows are concatenated in file-path order.

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use tracing::{debug, info, warn};

use crate::error::{ChartError, Result};
use crate::reading::{normalize, RawRecord, Reading};

/// Files directly inside `dir` whose extension equals `extension`, sorted by path.
pub fn find_data_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ChartError::DataDirNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    let walker = walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => match err.path().map(Path::to_path_buf) {
                Some(path) if has_extension(&path, extension) => {
                    return Err(ChartError::FileRead {
                        path,
                        source: err.into(),
                    });
                }
                Some(path) => {
                    warn!("Skipping {}: {}", path.display(), err);
                    continue;
                }
                None => return Err(ChartError::Io(err.into())),
            },
        };
        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            files.push(entry.into_path());
        }
    }

    files.sort();

    if files.is_empty() {
        warn!("No .{} files found in {}", extension, dir.display());
    }

    Ok(files)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

/// Read the rows of a single export.
pub fn read_records(path: &Path) -> Result<Vec<RawRecord>> {
    let csv_err = |source| ChartError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::open(path).map_err(|source| ChartError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(file);
    reader
        .deserialize::<RawRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(csv_err)
}

/// Concatenate the rows of all `files`, in order.
pub fn load_records(files: &[PathBuf]) -> Result<Vec<RawRecord>> {
    let mut records = Vec::new();

    for path in files {
        let file_records = read_records(path)?;
        info!("{} ... [done] ({} rows)", path.display(), file_records.len());
        records.extend(file_records);
    }

    Ok(records)
}

/// Load every export in `dir` and return the readings sorted by time.
pub fn load_readings(dir: &Path, extension: &str) -> Result<Vec<Reading>> {
    let files = find_data_files(dir, extension)?;
    let records = load_records(&files)?;
    let readings = normalize(records)?;

    debug!(
        "Loaded {} readings from {} files in {}",
        readings.len(),
        files.len(),
        dir.display()
    );

    Ok(readings)
}
