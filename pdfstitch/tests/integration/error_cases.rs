//! Integration tests for per-file failures and run-wide errors.

use std::path::PathBuf;

use pdfstitch::{FailureReason, ProcessingOutcome, StitchError, stitch_pdfs};
use tempfile::TempDir;

use crate::common::{
    dir_config, files_config, page_texts, quiet, write_corrupt_pdf, write_encrypted_pdf,
    write_password_pdf, write_pdf,
};

#[tokio::test]
async fn test_one_corrupt_file_among_valid_ones() {
    let dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    write_pdf(dir.path(), "a.pdf", 1);
    write_corrupt_pdf(dir.path(), "b.pdf");
    write_pdf(dir.path(), "c.pdf", 2);
    let output = out_dir.path().join("out.pdf");

    let report = stitch_pdfs(&dir_config(dir.path(), "*.pdf", output.clone()), &quiet())
        .await
        .unwrap();

    assert_eq!(report.summary.succeeded, 2);
    assert_eq!(report.summary.failed, 1);
    assert!(matches!(
        report.files[1].outcome,
        ProcessingOutcome::Failed {
            reason: FailureReason::Corrupt,
            ..
        }
    ));
    assert_eq!(
        page_texts(&output),
        vec!["Source: a.pdf", "a-p1", "Source: c.pdf", "c-p1", "c-p2"]
    );
}

#[tokio::test]
async fn test_all_encrypted_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    for name in ["one.pdf", "two.pdf", "three.pdf"] {
        write_encrypted_pdf(dir.path(), name);
    }
    let output = out_dir.path().join("out.pdf");

    let err = stitch_pdfs(&dir_config(dir.path(), "*.pdf", output.clone()), &quiet())
        .await
        .unwrap_err();

    match &err {
        StitchError::NothingToWrite { summary } => {
            assert_eq!(summary.skipped_encrypted, 3);
            assert_eq!(summary.succeeded, 0);
            assert_eq!(summary.total_pages, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_ne!(err.exit_code(), 0);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_encrypted_file_is_skipped_without_divider() {
    let dir = TempDir::new().unwrap();
    let files = vec![
        write_encrypted_pdf(dir.path(), "locked.pdf"),
        write_pdf(dir.path(), "open.pdf", 1),
    ];
    let output = dir.path().join("out.pdf");

    let report = stitch_pdfs(&files_config(files, output.clone()), &quiet())
        .await
        .unwrap();

    assert_eq!(report.files[0].outcome, ProcessingOutcome::SkippedEncrypted);
    assert!(!report.files[0].divider);
    assert_eq!(page_texts(&output), vec!["Source: open.pdf", "open-p1"]);
}

#[tokio::test]
async fn test_empty_password_file_is_stitched_readable() {
    let dir = TempDir::new().unwrap();
    let files = vec![
        write_pdf(dir.path(), "plain.pdf", 1),
        write_password_pdf(dir.path(), "open.pdf", 2, ""),
    ];
    let output = dir.path().join("out.pdf");

    let report = stitch_pdfs(&files_config(files, output.clone()), &quiet())
        .await
        .unwrap();

    assert_eq!(report.files[1].outcome, ProcessingOutcome::Success { page_count: 2 });
    assert_eq!(
        page_texts(&output),
        vec!["Source: plain.pdf", "plain-p1", "Source: open.pdf", "open-p1", "open-p2"]
    );
}

#[tokio::test]
async fn test_user_password_file_is_skipped() {
    let dir = TempDir::new().unwrap();
    let files = vec![
        write_password_pdf(dir.path(), "locked.pdf", 1, "hunter2"),
        write_pdf(dir.path(), "plain.pdf", 1),
    ];
    let output = dir.path().join("out.pdf");

    let report = stitch_pdfs(&files_config(files, output.clone()), &quiet())
        .await
        .unwrap();

    assert_eq!(report.files[0].outcome, ProcessingOutcome::SkippedEncrypted);
    assert_eq!(page_texts(&output), vec!["Source: plain.pdf", "plain-p1"]);
}

#[tokio::test]
async fn test_missing_explicit_file_is_reported_not_fatal() {
    let dir = TempDir::new().unwrap();
    let files = vec![
        dir.path().join("missing.pdf"),
        write_pdf(dir.path(), "present.pdf", 1),
    ];
    let output = dir.path().join("out.pdf");

    let report = stitch_pdfs(&files_config(files, output), &quiet())
        .await
        .unwrap();

    assert!(matches!(
        report.files[0].outcome,
        ProcessingOutcome::Failed {
            reason: FailureReason::NotFound,
            ..
        }
    ));
    assert_eq!(report.summary.succeeded, 1);
}

#[tokio::test]
async fn test_missing_input_directory() {
    let out_dir = TempDir::new().unwrap();
    let config = dir_config(
        &PathBuf::from("/nonexistent/pdfstitch/input"),
        "*.pdf",
        out_dir.path().join("out.pdf"),
    );

    let err = stitch_pdfs(&config, &quiet()).await.unwrap_err();
    assert!(matches!(err, StitchError::InputDirNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn test_no_matching_files() {
    let dir = TempDir::new().unwrap();
    write_pdf(dir.path(), "appendix.pdf", 1);
    let output = dir.path().join("out.pdf");

    let err = stitch_pdfs(&dir_config(dir.path(), "chapter_*.pdf", output.clone()), &quiet())
        .await
        .unwrap_err();

    assert!(matches!(err, StitchError::NoMatchingFiles { .. }));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_missing_output_directory() {
    let dir = TempDir::new().unwrap();
    let file = write_pdf(dir.path(), "a.pdf", 1);
    let output = dir.path().join("missing").join("out.pdf");

    let err = stitch_pdfs(&files_config(vec![file], output.clone()), &quiet())
        .await
        .unwrap_err();

    assert!(matches!(err, StitchError::OutputDirNotFound { .. }));
    assert_eq!(err.exit_code(), 5);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_output_equal_to_input_is_rejected() {
    let dir = TempDir::new().unwrap();
    let file = write_pdf(dir.path(), "a.pdf", 1);

    let err = stitch_pdfs(&files_config(vec![file.clone()], file), &quiet())
        .await
        .unwrap_err();

    assert!(matches!(err, StitchError::InvalidConfig { .. }));
}

#[tokio::test]
async fn test_explicit_files_win_over_directory() {
    let dir = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    let file = write_pdf(dir.path(), "chosen.pdf", 1);
    write_pdf(other.path(), "ignored.pdf", 1);
    let output = dir.path().join("out.pdf");

    let mut config = files_config(vec![file], output.clone());
    config.input_dir = Some(other.path().to_path_buf());

    let report = stitch_pdfs(&config, &quiet()).await.unwrap();

    assert_eq!(report.files.len(), 1);
    assert_eq!(report.files[0].source.display_name(), "chosen.pdf");
}
