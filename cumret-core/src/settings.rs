use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CumretError, Result};
use crate::text::date_pattern::DatePattern;

pub const DEFAULT_DELIMITER: u8 = b';';
pub const DEFAULT_MAX_FILE_NAME_LENGTH: usize = 150;
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 25 * 1024 * 1024;
/// Head-room the web host keeps for the rest of a multipart request.
pub const REQUEST_OVERHEAD_BYTES: u64 = 5 * 1024 * 1024;
pub const DEFAULT_ALLOWED_EXTENSIONS: &str = ".csv,.txt";

/// Raw key/value settings as they appear in the settings file. Every value is
/// text; [`AppSettings::resolve`] turns them into a [`ProcessingConfig`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppSettings {
    #[serde(alias = "SupportedUploadingDocFileExtensions")]
    pub allowed_file_extensions: Option<String>,
    pub max_file_name_length: Option<String>,
    pub uploads_folder_path: Option<String>,
    pub delimiter: Option<String>,
    pub date_format: Option<String>,
    pub short_date_format: Option<String>,
    pub header0: Option<String>,
    pub header1: Option<String>,
    /// In KB, like the host's request limit.
    pub max_request_length: Option<String>,
}

impl AppSettings {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn resolve(&self) -> Result<ProcessingConfig> {
        let allowed_extensions = split_extensions(
            self.allowed_file_extensions
                .as_deref()
                .unwrap_or(DEFAULT_ALLOWED_EXTENSIONS),
        );

        let max_file_name_length = self
            .max_file_name_length
            .as_deref()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_MAX_FILE_NAME_LENGTH);

        let delimiter = resolve_delimiter(self.delimiter.as_deref());

        let date_pattern = match self.date_format.as_deref().filter(|s| !s.is_empty()) {
            Some(p) => DatePattern::compile(p)?,
            None => DatePattern::default_date(),
        };
        let short_date_pattern = match self.short_date_format.as_deref().filter(|s| !s.is_empty()) {
            Some(p) => DatePattern::compile(p)?,
            None => DatePattern::invariant_short_date(),
        };

        let max_upload_bytes = match self.max_request_length.as_deref() {
            Some(kb) => {
                let kb: u64 = kb.trim().parse().map_err(|_| {
                    CumretError::Config(format!("MaxRequestLength is not a number: {kb}"))
                })?;
                kb.saturating_mul(1024).saturating_sub(REQUEST_OVERHEAD_BYTES)
            }
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(ProcessingConfig {
            allowed_extensions,
            max_file_name_length,
            uploads_folder: self.uploads_folder_path.as_ref().map(PathBuf::from),
            delimiter,
            date_pattern,
            short_date_pattern,
            header0: self.header0.clone().unwrap_or_default(),
            header1: self.header1.clone().unwrap_or_default(),
            max_upload_bytes,
        })
    }
}

fn split_extensions(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

/// A single byte-sized character, otherwise `;`.
fn resolve_delimiter(raw: Option<&str>) -> u8 {
    let Some(raw) = raw else {
        return DEFAULT_DELIMITER;
    };
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => c as u8,
        _ => {
            tracing::warn!(delimiter = raw, "unusable delimiter setting, falling back to ';'");
            DEFAULT_DELIMITER
        }
    }
}

/// Typed configuration, built once per process and passed to every stage.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessingConfig {
    pub allowed_extensions: Vec<String>,
    pub max_file_name_length: usize,
    pub uploads_folder: Option<PathBuf>,
    pub delimiter: u8,
    pub date_pattern: DatePattern,
    pub short_date_pattern: DatePattern,
    pub header0: String,
    pub header1: String,
    pub max_upload_bytes: u64,
}

impl Default for ProcessingConfig {
    /// Same values `AppSettings::default().resolve()` produces. Header names
    /// are empty, so any real header mismatches until they are configured.
    fn default() -> Self {
        Self {
            allowed_extensions: split_extensions(DEFAULT_ALLOWED_EXTENSIONS),
            max_file_name_length: DEFAULT_MAX_FILE_NAME_LENGTH,
            uploads_folder: None,
            delimiter: DEFAULT_DELIMITER,
            date_pattern: DatePattern::default_date(),
            short_date_pattern: DatePattern::invariant_short_date(),
            header0: String::new(),
            header1: String::new(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
