#![forbid(unsafe_code)]

pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod settings;

pub mod util {
    pub mod sanitize;
}

pub mod text;

pub mod validate;

pub mod read;

pub mod chart;
pub mod series;

pub mod pipeline;
pub mod uploads;

// Re-exports: stable API surface
pub use chart::{ChartData, project};
pub use diagnostics::Diagnostics;
pub use domain::{PercentRow, RawRow, Upload, UploadMeta, compare_by_date};
pub use pipeline::{UploadOutcome, process_text, process_upload};
pub use settings::{AppSettings, ProcessingConfig};
pub use validate::validate_upload;
