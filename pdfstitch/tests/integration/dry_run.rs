//! Integration tests for dry-run mode.

use pdfstitch::{StitchError, stitch_pdfs};
use tempfile::TempDir;

use crate::common::{files_config, quiet, write_encrypted_pdf, write_pdf};

#[tokio::test]
async fn test_dry_run_reports_without_writing() {
    let dir = TempDir::new().unwrap();
    let files = vec![
        write_pdf(dir.path(), "a.pdf", 2),
        write_pdf(dir.path(), "b.pdf", 1),
    ];
    let output = dir.path().join("out.pdf");

    let mut config = files_config(files, output.clone());
    config.dry_run = true;

    let report = stitch_pdfs(&config, &quiet()).await.unwrap();

    assert!(report.dry_run);
    assert_eq!(report.summary.total_pages, 5);
    assert_eq!(report.output_size, None);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_dry_run_ignores_missing_output_directory() {
    let dir = TempDir::new().unwrap();
    let file = write_pdf(dir.path(), "a.pdf", 1);

    let mut config = files_config(vec![file], dir.path().join("missing").join("out.pdf"));
    config.dry_run = true;

    assert!(stitch_pdfs(&config, &quiet()).await.is_ok());
}

#[tokio::test]
async fn test_dry_run_still_fails_when_nothing_usable() {
    let dir = TempDir::new().unwrap();
    let file = write_encrypted_pdf(dir.path(), "locked.pdf");

    let mut config = files_config(vec![file], dir.path().join("out.pdf"));
    config.dry_run = true;

    let err = stitch_pdfs(&config, &quiet()).await.unwrap_err();
    assert!(matches!(err, StitchError::NothingToWrite { .. }));
}

#[tokio::test]
async fn test_dry_run_report_serializes() {
    let dir = TempDir::new().unwrap();
    let file = write_pdf(dir.path(), "a.pdf", 1);

    let mut config = files_config(vec![file], dir.path().join("out.pdf"));
    config.dry_run = true;

    let report = stitch_pdfs(&config, &quiet()).await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(json["dryRun"], true);
    assert_eq!(json["summary"]["succeeded"], 1);
    assert_eq!(json["files"][0]["outcome"]["status"], "success");
}
