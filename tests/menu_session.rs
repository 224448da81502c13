use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use bookstats::render::chart::Chart;
use bookstats::state::settings::Settings;
use bookstats::ui::menu::{ChartPresenter, Menu};

/// Records what the menu asked it to show instead of opening a window.
#[derive(Default)]
struct RecordingPresenter {
    shown: Vec<Vec<&'static str>>,
}

impl ChartPresenter for RecordingPresenter {
    fn present(&mut self, charts: Vec<Chart>, settings: &Settings) -> Result<Vec<PathBuf>, String> {
        self.shown.push(charts.iter().map(|c| c.file_name).collect());
        Ok(charts.iter().map(|c| settings.chart_dir.join(c.file_name)).collect())
    }
}

fn write_books(dir: &Path) -> PathBuf {
    let path = dir.join("7kBooks.csv");
    let mut file = fs::File::create(&path).expect("create csv");
    writeln!(file, "isbn13,isbn10,title,subtitle,authors,categories,thumbnail,description,published_year,average_rating,num_pages,ratings_count").unwrap();
    writeln!(file, "1,1,Gilead,,A,F,t,d,2004,3.85,247,361").unwrap();
    writeln!(file, "2,2,Rage of Angels,,A,F,t,d,1993,3.93,512,29532").unwrap();
    writeln!(file, "3,3,The One Tree,,A,F,t,d,1982,3.97,479,172").unwrap();
    writeln!(file, "4,4,Untitled,,A,F,t,d,,,,").unwrap();
    path
}

fn run(script: &str, settings: Settings) -> (String, RecordingPresenter) {
    let mut menu = Menu::new(
        Cursor::new(script.to_string()),
        Vec::new(),
        RecordingPresenter::default(),
        settings,
    );
    menu.run().expect("in-memory io");
    let (out, presenter) = menu.into_parts();
    (String::from_utf8(out).expect("utf8"), presenter)
}

#[test]
fn full_analysis_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = Settings {
        data_path: write_books(dir.path()),
        results_path: dir.path().join("results.txt"),
        chart_dir: dir.path().join("charts"),
        top_n: 2,
        ..Settings::default()
    };

    let (out, presenter) = run("A\nb\ns\na\nv\nf\nz\nm\nq\n", settings);

    assert!(out.contains("Initializing data for analysis...please wait..."));
    assert!(out.contains("1. Total number of books in list: 4"));
    assert!(out.contains("3. Number of books in file with no page count: 1"));
    assert!(out.contains("Statistics for Page Numbers per Book:"));
    assert!(out.contains("2. Book with fewest pages:\n   -  Gilead"));
    assert!(out.contains("4. Top 2 longest books:"));
    assert!(out.contains("   -  512    Rage of Angels"));
    assert!(out.contains("***LOADING VISUALIZATIONS...***"));
    assert!(out.contains("\"M\" - to return to the main menu"));
    assert!(out.contains("Returning to main menu..."));
    assert!(out.ends_with("Closing application, goodbye!\n"));

    assert_eq!(presenter.shown.len(), 1);
    assert_eq!(presenter.shown[0].len(), 6);

    let results = fs::read_to_string(dir.path().join("results.txt")).expect("results file");
    assert!(results.contains("Mean of book pages: 309"));
}

#[test]
fn unreadable_data_path_reports_and_continues() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = Settings {
        data_path: dir.path().to_path_buf(),
        ..Settings::default()
    };

    let (out, presenter) = run("a\nh\nq\n", settings);

    assert!(out.contains(
        "ERROR: The name entered is a directory. Please ensure a valid file is entered"
    ));
    assert!(out.contains("***HELP SECTION***"));
    assert!(presenter.shown.is_empty());
}

#[test]
fn results_written_into_a_directory_fail_cleanly() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = Settings {
        data_path: write_books(dir.path()),
        results_path: dir.path().to_path_buf(),
        ..Settings::default()
    };

    let (out, _) = run("a\nf\nm\nq\n", settings);
    assert!(out.contains(
        "ERROR: The name entered is a directory. Please ensure a valid file is entered"
    ));
    assert!(out.contains("***MAIN MENU***"));
}

#[test]
fn malformed_data_file_reports_line_and_continues() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("7kBooks.csv");
    fs::write(&path, "header\n1,1,Gilead,,A,F,t,d,2004,3.85,247\n").expect("write csv");
    let settings = Settings {
        data_path: path,
        ..Settings::default()
    };

    let (out, _) = run("a\nq\n", settings);
    assert!(out.contains("ERROR: line 2: expected 12 fields, found 11"));
    assert!(!out.contains("***ANALYSIS SECTION***"));
    assert!(out.ends_with("Closing application, goodbye!\n"));
}
