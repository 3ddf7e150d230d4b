use std::collections::HashMap;
use std::hash::Hash;

use crate::diagnostics::Diagnostics;
use crate::domain::{PercentRow, compare_by_date};
use crate::error::Result;
use crate::settings::ProcessingConfig;

/// Sorts the rows by date, reports duplicate dates and fills in the
/// cumulative compounded percentage. Duplicates stay in the series.
pub fn assemble(
    mut rows: Vec<PercentRow>,
    config: &ProcessingConfig,
    diags: &mut Diagnostics,
) -> Result<Vec<PercentRow>> {
    // stable: equal dates keep input order
    rows.sort_by(compare_by_date);

    for date in duplicate_keys(&rows, |r| r.date) {
        let short = config.short_date_pattern.format(date)?;
        diags.push(format!(
            "The list contains duplicates for BeginDate column {short}"
        ));
    }

    compound(&mut rows);
    Ok(rows)
}

/// Keys that occur more than once, in order of first appearance.
pub fn duplicate_keys<T, K, F>(items: &[T], key: F) -> Vec<K>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut order: Vec<K> = Vec::new();
    let mut counts: HashMap<K, usize> = HashMap::new();
    for item in items {
        let k = key(item);
        let n = counts.entry(k.clone()).or_insert(0);
        if *n == 0 {
            order.push(k);
        }
        *n += 1;
    }
    order.retain(|k| counts.get(k).is_some_and(|&n| n > 1));
    order
}

/// `k` starts at 1.0; each row gets `(k * (1 + r/100) - 1) * 100` computed
/// with the pre-update `k`, then `k *= 1 + r/100`.
pub fn compound(rows: &mut [PercentRow]) {
    let mut k = 1.0_f64;
    for row in rows.iter_mut() {
        row.cumulative_percent = Some((k * (1.0 + row.return_value / 100.0) - 1.0) * 100.0);
        k *= 1.0 + row.return_value / 100.0;
    }
}
