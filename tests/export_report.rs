// tests/export_report.rs
use std::fs;

use lot_scrape::config::options::{ExportFormat, ExportOptions};
use lot_scrape::file::DelimitedReport;
use lot_scrape::report::{DataSet, ReportWriter};
use lot_scrape::specs::fields::{LotRecord, headers};

fn records() -> Vec<LotRecord> {
    vec![
        LotRecord {
            lot_number: Some("100".into()),
            title: Some("Квартира, 45 м²".into()),
            start_price: Some("1 000 000 ₽".into()),
            documents: Some("https://bankrotbaza.ru/a.pdf\nhttps://bankrotbaza.ru/b.zip".into()),
            url: "https://bankrotbaza.ru/lot/100".into(),
            ..Default::default()
        },
        LotRecord { url: "https://bankrotbaza.ru/lot/200".into(), ..Default::default() },
    ]
}

fn options(dir: &std::path::Path, format: ExportFormat) -> ExportOptions {
    ExportOptions { format, out_dir: dir.to_path_buf(), file_stem: "report".into() }
}

#[test]
fn csv_report_has_headers_and_quoted_cells() {
    let dir = tempfile::tempdir().unwrap();
    let report = DelimitedReport::new(options(dir.path(), ExportFormat::Csv));

    let path = report
        .write_dataset(&DataSet::from_records(&records()), "2025-01-02_03-04-05")
        .unwrap();
    assert_eq!(path, dir.path().join("report_2025-01-02_03-04-05.csv"));

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next().unwrap(), headers().join(","));
    assert_eq!(
        lines.next().unwrap(),
        "100,\"Квартира, 45 м²\",,1 000 000 ₽,,,,,,,\"https://bankrotbaza.ru/a.pdf"
    );
    assert_eq!(
        lines.next().unwrap(),
        "https://bankrotbaza.ru/b.zip\",,https://bankrotbaza.ru/lot/100"
    );
    assert_eq!(lines.next().unwrap(), ",,,,,,,,,,,,https://bankrotbaza.ru/lot/200");
    assert_eq!(lines.next(), None);
}

#[test]
fn tsv_report_keeps_commas_bare() {
    let dir = tempfile::tempdir().unwrap();
    let report = DelimitedReport::new(options(dir.path(), ExportFormat::Tsv));

    let path = report.write_dataset(&DataSet::from_records(&records()[..1]), "t").unwrap();
    assert!(path.ends_with("report_t.tsv"));

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with(&headers().join("\t")));
    assert!(text.contains("\tКвартира, 45 м²\t"));
}

#[test]
fn same_stamp_does_not_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let report = DelimitedReport::new(options(dir.path(), ExportFormat::Csv));
    let ds = DataSet::from_records(&records());

    let a = report.write_dataset(&ds, "same").unwrap();
    let b = report.write_dataset(&ds, "same").unwrap();
    assert_ne!(a, b);
    assert!(b.ends_with("report_same (2).csv"));
}

#[test]
fn writer_creates_missing_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("reports");
    let mut report = DelimitedReport::new(options(&out, ExportFormat::Csv));

    let path = report.write(&records()).unwrap();
    assert!(path.starts_with(&out));
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("report_"));
    assert!(name.ends_with(".csv"));
    assert!(fs::metadata(&path).unwrap().len() > 0);
}
