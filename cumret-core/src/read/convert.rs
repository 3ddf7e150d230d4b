use rayon::prelude::*;

use crate::diagnostics::Diagnostics;
use crate::domain::{PercentRow, RawRow};
use crate::settings::ProcessingConfig;
use crate::text::number::parse_invariant;

/// Batches at least this large are converted on the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Result of converting one row: the typed row when both fields parsed, and
/// the messages for the fields that did not.
#[derive(Debug)]
pub struct Converted {
    pub row: Option<PercentRow>,
    pub errors: Vec<String>,
}

/// Parses date and value independently so a bad date does not hide a bad
/// value on the same row.
pub fn convert_row(raw: &RawRow, config: &ProcessingConfig) -> Converted {
    let mut errors = Vec::new();

    let date = config.date_pattern.parse(&raw.date_text);
    if date.is_none() {
        errors.push(format!("Incorrect date {} on row {}", raw.date_text, raw.id));
    }
    let value = parse_invariant(&raw.value_text);
    if value.is_none() {
        errors.push(format!("Incorrect value {} on row {}", raw.value_text, raw.id));
    }

    let row = match (date, value) {
        (Some(date), Some(return_value)) => Some(PercentRow {
            id: Some(raw.id),
            date,
            return_value,
            cumulative_percent: None,
        }),
        _ => None,
    };
    Converted { row, errors }
}

/// Converts every raw row, dropping the ones that fail to parse. Messages
/// land in `diags` in row order whether or not the batch ran in parallel.
pub fn convert_rows(
    rows: &[RawRow],
    config: &ProcessingConfig,
    diags: &mut Diagnostics,
) -> Vec<PercentRow> {
    let converted: Vec<Converted> = if rows.len() >= PARALLEL_THRESHOLD {
        rows.par_iter().map(|r| convert_row(r, config)).collect()
    } else {
        rows.iter().map(|r| convert_row(r, config)).collect()
    };

    let mut out = Vec::with_capacity(converted.len());
    for c in converted {
        diags.extend(c.errors);
        if let Some(row) = c.row {
            out.push(row);
        }
    }
    tracing::debug!(kept = out.len(), dropped = rows.len() - out.len(), "rows converted");
    out
}
