use std::fs;

use bookstats::data::record::{BookDataset, TitlePages, Year};
use bookstats::error::DataError;
use bookstats::report::results_file::save_results;
use bookstats::state::session::AnalysisSession;

fn session() -> AnalysisSession {
    let title_pages: TitlePages = [("A", "100"), ("B", "300"), ("C", "300")]
        .into_iter()
        .map(|(t, p)| (t.to_string(), p.to_string()))
        .collect();
    AnalysisSession::new(BookDataset {
        pages: vec![100.0, 300.0, 300.0],
        years: vec![Year::Known(2001); 3],
        average_ratings: vec![4.0, 3.5, 3.5],
        ratings_counts: vec![10.0, 20.0, 20.0],
        title_pages,
        skipped_rows: 0,
    })
    .expect("session")
}

#[test]
fn writes_report_to_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("7kBooks_Results.txt");
    save_results(&path, &session()).expect("save results");

    let text = fs::read_to_string(&path).expect("read results");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "          Statistical Analysis Results");
    assert!(lines.contains(&"Book Page Number Statistics:"));
    assert!(lines.contains(&"Mean of book pages: 233"));
    assert!(lines.contains(&"Mode of book pages: 300"));
    assert!(lines.contains(&"Median of book pages: 300"));
    assert!(lines.contains(&"Mean of average rating: 3.67"));
    assert!(lines.contains(&"Mode of number of ratings: 20"));
    assert_eq!(
        lines.last().copied(),
        Some("https://www.kaggle.com/dylanjcastillo/7k-books-with-metadata")
    );
}

#[test]
fn overwrites_previous_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("results.txt");
    fs::write(&path, "stale contents that are longer than nothing at all\n".repeat(200))
        .expect("seed file");
    save_results(&path, &session()).expect("save results");
    let text = fs::read_to_string(&path).expect("read results");
    assert!(!text.contains("stale"));
}

#[test]
fn directory_target_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = save_results(dir.path(), &session()).expect_err("directory");
    assert!(matches!(err, DataError::IsADirectory { .. }));
}

#[test]
fn missing_parent_directory_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing").join("results.txt");
    let err = save_results(&path, &session()).expect_err("missing parent");
    assert!(matches!(err, DataError::NotFound { .. }));
}
