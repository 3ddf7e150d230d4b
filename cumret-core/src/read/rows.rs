use csv::{ReaderBuilder, StringRecord, Trim};

use crate::diagnostics::Diagnostics;
use crate::domain::RawRow;
use crate::error::Result;
use crate::settings::ProcessingConfig;

pub const EXPECTED_COLUMNS: usize = 2;

/// Reads the header line and every data line of `content`.
///
/// Structural problems (column count, header names, ragged rows) go to
/// `diags`; reading carries on after them. Only a failure of the underlying
/// reader is returned as an error.
pub fn read_rows(
    content: &str,
    config: &ProcessingConfig,
    diags: &mut Diagnostics,
) -> Result<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    validate_headers(&headers, config, diags);

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    let mut id = 0usize;
    while reader.read_record(&mut record)? {
        id += 1;
        if record.len() != headers.len() {
            diags.push(format!(
                "Row {id} contains {} columns but the header has {}.",
                record.len(),
                headers.len()
            ));
            continue;
        }
        rows.push(RawRow {
            id,
            date_text: record.get(0).unwrap_or_default().to_string(),
            value_text: record.get(1).unwrap_or_default().to_string(),
        });
    }

    tracing::debug!(rows = rows.len(), read = id, "rows read");
    Ok(rows)
}

/// Emits at most one message: column count first, then the first header,
/// then the second.
fn validate_headers(headers: &StringRecord, config: &ProcessingConfig, diags: &mut Diagnostics) {
    if headers.len() != EXPECTED_COLUMNS {
        diags.push("The file contains more than 2 columns.");
    } else if !eq_ignore_case(&headers[0], &config.header0) {
        diags.push(format!("The first header is not equal to {}", config.header0));
    } else if !eq_ignore_case(&headers[1], &config.header1) {
        diags.push(format!("The second header is not equal to {}", config.header1));
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ProcessingConfig {
        ProcessingConfig {
            header0: "BeginDate".into(),
            header1: "IRR_ACB".into(),
            ..Default::default()
        }
    }

    fn read(content: &str) -> (Vec<RawRow>, Vec<String>) {
        let c = config();
        let mut d = Diagnostics::new();
        let rows = read_rows(content, &c, &mut d).unwrap();
        (rows, d.into_vec())
    }

    fn raw(id: usize, date: &str, value: &str) -> RawRow {
        RawRow {
            id,
            date_text: date.into(),
            value_text: value.into(),
        }
    }

    #[test]
    fn reads_rows_with_ascending_ids() {
        let (rows, errs) = read("BeginDate;IRR_ACB\n01.01.2020;10\n\n01.02.2020; -5 \n");
        assert!(errs.is_empty());
        assert_eq!(
            rows,
            vec![raw(1, "01.01.2020", "10"), raw(2, "01.02.2020", "-5")]
        );
    }

    #[test]
    fn headers_compare_case_insensitively() {
        let (_, errs) = read("begindate;irr_acb\n01.01.2020;1\n");
        assert!(errs.is_empty());
    }

    #[test]
    fn column_count_error_wins_over_header_names() {
        let (rows, errs) = read("A;B;C\n01.01.2020;1;x\n");
        assert_eq!(errs, vec!["The file contains more than 2 columns."]);
        assert_eq!(rows, vec![raw(1, "01.01.2020", "1")]);
    }

    #[test]
    fn first_header_checked_before_second() {
        let (_, errs) = read("Date;Value\n");
        assert_eq!(errs, vec!["The first header is not equal to BeginDate"]);
        let (_, errs) = read("BeginDate;Value\n");
        assert_eq!(errs, vec!["The second header is not equal to IRR_ACB"]);
    }

    #[test]
    fn unconfigured_headers_never_match() {
        let mut d = Diagnostics::new();
        read_rows("BeginDate;IRR_ACB\n", &ProcessingConfig::default(), &mut d).unwrap();
        assert_eq!(d.messages(), &["The first header is not equal to "]);
    }

    #[test]
    fn empty_content_reports_column_count() {
        let (rows, errs) = read("");
        assert!(rows.is_empty());
        assert_eq!(errs, vec!["The file contains more than 2 columns."]);
    }

    #[test]
    fn ragged_row_is_skipped_but_keeps_its_id() {
        let (rows, errs) = read("BeginDate;IRR_ACB\n01.01.2020;1\n01.02.2020\n01.03.2020;3\n");
        assert_eq!(errs, vec!["Row 2 contains 1 columns but the header has 2."]);
        assert_eq!(
            rows,
            vec![raw(1, "01.01.2020", "1"), raw(3, "01.03.2020", "3")]
        );
    }

    #[test]
    fn honours_configured_delimiter() {
        let c = ProcessingConfig {
            delimiter: b',',
            ..config()
        };
        let mut d = Diagnostics::new();
        let rows = read_rows("BeginDate,IRR_ACB\n\"01.01.2020\",\"1.5\"\n", &c, &mut d).unwrap();
        assert!(d.is_empty());
        assert_eq!(rows, vec![raw(1, "01.01.2020", "1.5")]);
    }
}
