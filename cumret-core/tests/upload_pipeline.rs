use cumret_core::pipeline::MSG_UPLOAD_FAILED;
use cumret_core::{
    AppSettings, Diagnostics, ProcessingConfig, Upload, UploadOutcome, process_text,
    process_upload,
};
use time::macros::date;

fn config() -> ProcessingConfig {
    AppSettings {
        header0: Some("BeginDate".into()),
        header1: Some("IRR_ACB".into()),
        ..Default::default()
    }
    .resolve()
    .unwrap()
}

fn rejected(out: UploadOutcome) -> Vec<String> {
    match out {
        UploadOutcome::Rejected(d) => d.into_vec(),
        UploadOutcome::Chart { chart, .. } => panic!("expected rejection, got chart {chart:?}"),
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn two_rows_end_to_end() {
    let upload = Upload::new(
        "returns.csv",
        "BeginDate;IRR_ACB\n01.01.2020;10\n01.02.2020;-5\n",
    );
    let out = process_upload(Some(&upload), &config());
    let UploadOutcome::Chart { series, chart } = out else {
        panic!("expected chart");
    };
    assert_eq!(series.len(), 2);
    assert!(close(series[0].cumulative_percent.unwrap(), 10.0));
    assert!(close(series[1].cumulative_percent.unwrap(), 4.5));
    assert_eq!(chart.categories, "'01/01/2020','02/01/2020'");
    assert_eq!(chart.data, "10,4.5");
}

#[test]
fn out_of_order_rows_come_back_sorted() {
    let text = "BeginDate;IRR_ACB\n\
                01.06.2020;1\n\
                01.01.2020;2\n\
                15.03.2020;3\n\
                01.01.2019;4\n";
    let mut d = Diagnostics::new();
    let series = process_text(text, &config(), &mut d).unwrap();
    assert!(d.is_empty());
    assert!(series.windows(2).all(|w| w[0].date <= w[1].date));
    assert_eq!(series[0].date, date!(2019 - 01 - 01));
    assert_eq!(series[0].id, Some(4));
}

#[test]
fn three_columns_only_report_column_count() {
    let upload = Upload::new("r.csv", "Foo;Bar;Baz\n01.01.2020;1;2\n");
    assert_eq!(
        rejected(process_upload(Some(&upload), &config())),
        vec!["The file contains more than 2 columns."]
    );
}

#[test]
fn bad_date_drops_only_that_row() {
    let text = "BeginDate;IRR_ACB\n01.01.2020;1\n2020.02.01;2\n01.03.2020;3\n";
    let mut d = Diagnostics::new();
    let series = process_text(text, &config(), &mut d).unwrap();
    assert_eq!(d.messages(), &["Incorrect date 2020.02.01 on row 2"]);
    let ids: Vec<_> = series.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![Some(1), Some(3)]);
}

#[test]
fn duplicates_reject_the_chart_but_stay_in_the_series() {
    let text = "BeginDate;IRR_ACB\n01.02.2020;10\n01.01.2020;1\n01.02.2020;-5\n";
    let mut d = Diagnostics::new();
    let series = process_text(text, &config(), &mut d).unwrap();
    assert_eq!(
        d.messages(),
        &["The list contains duplicates for BeginDate column 02/01/2020"]
    );
    assert_eq!(series.len(), 3);
    assert_eq!(series[1].id, Some(1));
    assert_eq!(series[2].id, Some(3));
    let k1 = 1.01;
    assert!(close(series[1].cumulative_percent.unwrap(), (k1 * 1.10 - 1.0) * 100.0));
    assert!(close(series[2].cumulative_percent.unwrap(), (k1 * 1.10 * 0.95 - 1.0) * 100.0));

    let upload = Upload::new("r.csv", text);
    assert_eq!(
        rejected(process_upload(Some(&upload), &config())),
        vec!["The list contains duplicates for BeginDate column 02/01/2020"]
    );
}

#[test]
fn structural_errors_stop_before_parsing() {
    let upload = Upload::new("returns.xls", "not even read");
    assert_eq!(
        rejected(process_upload(Some(&upload), &config())),
        vec!["You have not selected an accepted file format to upload. Please upload: .csv,.txt."]
    );

    let empty = Upload::new("returns.csv", Vec::<u8>::new());
    assert_eq!(
        rejected(process_upload(Some(&empty), &config())),
        vec!["The file is of 0 kb size."]
    );
}

#[test]
fn size_boundary() {
    let body = "BeginDate;IRR_ACB\n01.01.2020;10\n";
    let limit = body.len() as u64 + 1;
    let cfg = ProcessingConfig {
        max_upload_bytes: limit,
        ..config()
    };
    assert!(process_upload(Some(&Upload::new("r.csv", body)), &cfg).is_chart());

    let over = format!("{body}\n");
    assert_eq!(
        rejected(process_upload(Some(&Upload::new("r.csv", over)), &cfg)),
        vec![format!(
            "Invalid file size. Please upload a file less than {} MB.",
            limit / 1024
        )]
    );
}

#[test]
fn header_and_row_errors_accumulate() {
    let upload = Upload::new(
        "r.csv",
        "Date;IRR_ACB\n01.01.2020;x\nbad;2\n01.03.2020;3\n",
    );
    assert_eq!(
        rejected(process_upload(Some(&upload), &config())),
        vec![
            "The first header is not equal to BeginDate",
            "Incorrect value x on row 1",
            "Incorrect date bad on row 2",
        ]
    );
}

#[test]
fn stores_accepted_upload_when_folder_configured() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = ProcessingConfig {
        uploads_folder: Some(dir.path().join("up")),
        ..config()
    };
    let upload = Upload::new("q1 returns.csv", "BeginDate;IRR_ACB\n01.01.2020;1\n");
    assert!(process_upload(Some(&upload), &cfg).is_chart());
    let stored: Vec<_> = std::fs::read_dir(dir.path().join("up"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].ends_with("q1_returns.csv"));
}

#[test]
fn unwritable_upload_folder_is_a_generic_failure() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, b"").unwrap();
    let cfg = ProcessingConfig {
        uploads_folder: Some(blocker.join("nested")),
        ..config()
    };
    let upload = Upload::new("r.csv", "BeginDate;IRR_ACB\n01.01.2020;1\n");
    let errs = rejected(process_upload(Some(&upload), &cfg));
    assert_eq!(errs.len(), 2);
    assert_eq!(errs[0], MSG_UPLOAD_FAILED);
    assert!(errs[1].starts_with("I/O error"));
}
