use std::io::{self, Write};

use bookstats::data::loader::{load_books, ParseOptions};
use bookstats::data::record::Year;
use bookstats::error::DataError;
use bookstats::state::session::AnalysisSession;
use tempfile::NamedTempFile;

const HEADER: &str = "isbn13,isbn10,title,subtitle,authors,categories,thumbnail,description,published_year,average_rating,num_pages,ratings_count";

/// (title, year, rating, pages, count) rows written to the sample file.
const ROWS: [(&str, &str, &str, &str, &str); 6] = [
    ("Gilead", "2004", "3.85", "247", "361"),
    ("Spider's Web", "2000", "3.83", "241", "5164"),
    ("Rage of Angels", "1993", "3.93", "512", "29532"),
    ("Gilead", "2006", "4.10", "300", "12"),
    ("War+Peace", "", "", "", ""),
    ("The One Tree", "1982", "3.97", "479", "172"),
];

fn write_sample_csv() -> NamedTempFile {
    let mut tmp = NamedTempFile::new().expect("create tmp csv");
    writeln!(tmp, "{HEADER}").unwrap();
    for (title, year, rating, pages, count) in ROWS {
        // Windows line endings, as the published file has them.
        write!(
            tmp,
            "9780000000000,0000000000,{title},,Author,Fiction,http://img,Text,{year},{rating},{pages},{count}\r\n"
        )
        .unwrap();
    }
    tmp.flush().unwrap();
    tmp
}

#[test]
fn loads_every_row_in_order() {
    let file = write_sample_csv();
    let data = load_books(file.path(), &ParseOptions::default()).expect("load sample");

    assert_eq!(data.row_count(), 6);
    assert_eq!(data.pages, vec![247.0, 241.0, 512.0, 300.0, 0.0, 479.0]);
    assert_eq!(data.ratings_counts, vec![361.0, 5164.0, 29532.0, 12.0, 0.0, 172.0]);
    assert_eq!(data.average_ratings[4], 0.0);
    assert_eq!(data.years[0], Year::Known(2004));
    assert_eq!(data.years[4], Year::Unknown);
    assert_eq!(data.pages.len(), data.years.len());
    assert_eq!(data.pages.len(), data.average_ratings.len());
}

#[test]
fn title_pages_keep_first_occurrence() {
    let file = write_sample_csv();
    let data = load_books(file.path(), &ParseOptions::default()).expect("load sample");
    let session = AnalysisSession::new(data).expect("page counts");

    assert_eq!(session.dataset.title_pages.len(), 5);
    assert_eq!(session.dataset.title_pages.get("War,Peace").map(String::as_str), Some(""));

    // Every title maps to the page count of the first row carrying it.
    let mut seen = Vec::new();
    for (i, (title, ..)) in ROWS.iter().enumerate() {
        let cleaned = title.replace('+', ",");
        if seen.contains(&cleaned) {
            continue;
        }
        let pages = session.dataset.pages[i] as i64;
        assert_eq!(session.page_counts().get(&cleaned), Some(&pages), "{cleaned}");
        seen.push(cleaned);
    }
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_books(&dir.path().join("7kBooks.csv"), &ParseOptions::default())
        .expect_err("no such file");
    assert!(matches!(err, DataError::NotFound { .. }));
    assert!(err.is_file_access());
}

#[test]
fn directory_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_books(dir.path(), &ParseOptions::default()).expect_err("directory");
    assert!(matches!(err, DataError::IsADirectory { .. }));
    assert_eq!(
        err.user_message(),
        "ERROR: The name entered is a directory. Please ensure a valid file is entered"
    );
}

#[test]
fn permission_errors_map_to_their_own_kind() {
    let path = std::path::Path::new("7kBooks.csv");
    let err = DataError::from_io(path, io::Error::from(io::ErrorKind::PermissionDenied));
    assert!(matches!(err, DataError::PermissionDenied { .. }));
    assert_eq!(
        err.user_message(),
        "ERROR: Permission denied. Please ensure the correct file is being used."
    );
}

#[test]
fn short_row_fails_unless_skipped() {
    let mut tmp = NamedTempFile::new().expect("create tmp csv");
    writeln!(tmp, "{HEADER}").unwrap();
    writeln!(tmp, "1,2,Good,,A,F,t,d,2001,4.0,100,10").unwrap();
    writeln!(tmp, "1,2,Short,,A,F,t,d,2001,4.0,100").unwrap();
    tmp.flush().unwrap();

    let err = load_books(tmp.path(), &ParseOptions::default()).expect_err("short row");
    assert!(matches!(
        err,
        DataError::FieldCount {
            line: 3,
            expected: 12,
            found: 11
        }
    ));

    let options = ParseOptions {
        skip_malformed_rows: true,
    };
    let data = load_books(tmp.path(), &options).expect("skipping parse");
    assert_eq!(data.row_count(), 1);
    assert_eq!(data.skipped_rows, 1);
}
