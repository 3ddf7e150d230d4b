use std::cmp::Ordering;

use time::Date;

/// One data line as read from the file, before any parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based position among the data rows.
    pub id: usize,
    pub date_text: String,
    pub value_text: String,
}

/// A parsed period return. `cumulative_percent` is filled by the series
/// assembler once the rows are in date order.
#[derive(Clone, Debug, PartialEq)]
pub struct PercentRow {
    pub id: Option<usize>,
    pub date: Date,
    pub return_value: f64,
    pub cumulative_percent: Option<f64>,
}

/// Rows order by date only; equal dates compare equal whatever the other
/// fields hold.
pub fn compare_by_date(a: &PercentRow, b: &PercentRow) -> Ordering {
    a.date.cmp(&b.date)
}

/// What the structural validator needs to know about an upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadMeta {
    pub file_name: String,
    pub content_length: u64,
}

/// An uploaded file fully read into memory.
#[derive(Clone, Debug)]
pub struct Upload {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    pub fn meta(&self) -> UploadMeta {
        UploadMeta {
            file_name: self.file_name.clone(),
            content_length: self.content.len() as u64,
        }
    }
}
