use serde::{Deserialize, Serialize};

use crate::domain::PercentRow;
use crate::error::Result;
use crate::settings::ProcessingConfig;
use crate::text::number::format_invariant;

/// The two aligned sequences a chart view consumes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData {
    /// `'date','date',...` in short-date form.
    pub categories: String,
    /// `value,value,...` with invariant number formatting.
    pub data: String,
}

pub fn project(rows: &[PercentRow], config: &ProcessingConfig) -> Result<ChartData> {
    let mut categories = String::new();
    let mut data = String::new();
    for row in rows {
        categories.push('\'');
        categories.push_str(&config.short_date_pattern.format(row.date)?);
        categories.push_str("',");

        if let Some(p) = row.cumulative_percent {
            data.push_str(&format_invariant(p));
        }
        data.push(',');
    }
    Ok(ChartData {
        categories: categories.trim_end_matches(',').to_string(),
        data: data.trim_end_matches(',').to_string(),
    })
}
