// Library surface for the binary and for integration tests.
pub mod app;
pub mod app_dirs;
pub mod clump;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod logging;
pub mod markers;
pub mod reading;
pub mod runtime;
pub mod time_series;
pub mod ui;
pub mod util;
pub mod viewport;

pub use error::{ChartError, Result};
