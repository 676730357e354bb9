//! Integration tests for stitching valid documents.

use pdfstitch::stitch_pdfs;
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{dir_config, files_config, page_count, page_texts, quiet, write_pdf};

#[tokio::test]
async fn test_chapters_with_dividers() {
    let input = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    write_pdf(input.path(), "chapter_2.pdf", 3);
    write_pdf(input.path(), "chapter_1.pdf", 2);
    write_pdf(input.path(), "appendix.pdf", 4);
    let output = out_dir.path().join("book.pdf");

    let config = dir_config(input.path(), "chapter_*.pdf", output.clone());
    let report = stitch_pdfs(&config, &quiet()).await.unwrap();

    assert_eq!(report.summary.succeeded, 2);
    assert_eq!(report.summary.total_pages, 7);
    assert_eq!(report.summary.divider_pages, 2);
    assert_eq!(report.output_size, Some(std::fs::metadata(&output).unwrap().len()));

    assert_eq!(
        page_texts(&output),
        vec![
            "Source: chapter_1.pdf",
            "chapter_1-p1",
            "chapter_1-p2",
            "Source: chapter_2.pdf",
            "chapter_2-p1",
            "chapter_2-p2",
            "chapter_2-p3",
        ]
    );
}

#[tokio::test]
async fn test_no_source_skips_dividers() {
    let input = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    write_pdf(input.path(), "chapter_1.pdf", 2);
    write_pdf(input.path(), "chapter_2.pdf", 3);
    let output = out_dir.path().join("book.pdf");

    let mut config = dir_config(input.path(), "chapter_*.pdf", output.clone());
    config.dividers = false;

    let report = stitch_pdfs(&config, &quiet()).await.unwrap();

    assert_eq!(report.summary.total_pages, 5);
    assert_eq!(report.summary.divider_pages, 0);
    assert!(report.files.iter().all(|file| !file.divider));
    assert_eq!(
        page_texts(&output),
        vec![
            "chapter_1-p1",
            "chapter_1-p2",
            "chapter_2-p1",
            "chapter_2-p2",
            "chapter_2-p3",
        ]
    );
}

#[tokio::test]
async fn test_explicit_files_keep_given_order() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", 1);
    let b = write_pdf(dir.path(), "b.pdf", 1);
    let output = dir.path().join("out.pdf");

    let config = files_config(vec![b, a], output.clone());
    stitch_pdfs(&config, &quiet()).await.unwrap();

    assert_eq!(
        page_texts(&output),
        vec!["Source: b.pdf", "b-p1", "Source: a.pdf", "a-p1"]
    );
}

#[tokio::test]
async fn test_directory_order_ignores_case() {
    let dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    write_pdf(dir.path(), "b.pdf", 1);
    write_pdf(dir.path(), "C.pdf", 1);
    write_pdf(dir.path(), "a.pdf", 1);
    let output = out_dir.path().join("out.pdf");

    let mut config = dir_config(dir.path(), "*.pdf", output.clone());
    config.dividers = false;
    stitch_pdfs(&config, &quiet()).await.unwrap();

    assert_eq!(page_texts(&output), vec!["a-p1", "b-p1", "C-p1"]);
}

#[tokio::test]
async fn test_repeated_runs_produce_same_order() {
    let dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    for name in ["delta.pdf", "alpha.pdf", "charlie.pdf", "Bravo.pdf"] {
        write_pdf(dir.path(), name, 1);
    }

    let first = out_dir.path().join("first.pdf");
    let second = out_dir.path().join("second.pdf");

    stitch_pdfs(&dir_config(dir.path(), "*.pdf", first.clone()), &quiet())
        .await
        .unwrap();
    stitch_pdfs(&dir_config(dir.path(), "*.pdf", second.clone()), &quiet())
        .await
        .unwrap();

    assert_eq!(page_texts(&first), page_texts(&second));
}

#[tokio::test]
async fn test_rerun_in_place_does_not_include_previous_output() {
    let dir = TempDir::new().unwrap();
    write_pdf(dir.path(), "a.pdf", 2);
    let output = dir.path().join("stitched_document.pdf");
    let config = dir_config(dir.path(), "*.pdf", output.clone());

    stitch_pdfs(&config, &quiet()).await.unwrap();
    let report = stitch_pdfs(&config, &quiet()).await.unwrap();

    assert_eq!(report.files.len(), 1);
    assert_eq!(page_count(&output), 3);
}

#[rstest]
#[case::with_dividers(true, 1 + 2 + 1 + 4 + 1 + 1)]
#[case::without_dividers(false, 2 + 4 + 1)]
#[tokio::test]
async fn test_page_count_is_sum_of_sources(#[case] dividers: bool, #[case] expected: usize) {
    let dir = TempDir::new().unwrap();
    let files = vec![
        write_pdf(dir.path(), "one.pdf", 2),
        write_pdf(dir.path(), "two.pdf", 4),
        write_pdf(dir.path(), "three.pdf", 1),
    ];
    let output = dir.path().join("out.pdf");

    let mut config = files_config(files, output.clone());
    config.dividers = dividers;

    let report = stitch_pdfs(&config, &quiet()).await.unwrap();

    assert_eq!(report.summary.total_pages, expected);
    assert_eq!(page_count(&output), expected);
}

#[tokio::test]
async fn test_existing_output_is_overwritten() {
    let dir = TempDir::new().unwrap();
    let file = write_pdf(dir.path(), "a.pdf", 1);
    let output = dir.path().join("out.pdf");
    std::fs::write(&output, b"stale").unwrap();

    stitch_pdfs(&files_config(vec![file], output.clone()), &quiet())
        .await
        .unwrap();

    assert_eq!(page_count(&output), 2);
}
