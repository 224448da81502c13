use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

use crate::data::parser::{
    self, clean_title, convert_blank_to_zero, convert_strings_to_floats, parse_year, FIELD_COUNT,
};
use crate::data::record::{BookDataset, TitlePages};
use crate::error::DataError;

/// How the loader treats rows that do not have exactly twelve fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Drop such rows with a warning instead of failing the whole parse.
    pub skip_malformed_rows: bool,
}

/// Load the book file at `path`.
///
/// Missing files, directories and unreadable files are reported as their own
/// error kinds before any row is read, so a failure never yields partial data.
pub fn load_books(path: &Path, options: &ParseOptions) -> Result<BookDataset, DataError> {
    let meta = fs::metadata(path).map_err(|e| DataError::from_io(path, e))?;
    if meta.is_dir() {
        return Err(DataError::IsADirectory {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|e| DataError::from_io(path, e))?;

    let dataset = parse_books(BufReader::new(file), options)?;
    tracing::info!(
        rows = dataset.row_count(),
        titles = dataset.title_pages.len(),
        skipped = dataset.skipped_rows,
        "Loaded book file {:?}",
        path
    );
    Ok(dataset)
}

/// Parse book rows from any reader. The first line is a header and is discarded.
///
/// Fields are split on every comma; the file carries no quoting. Rows are
/// collected in one pass and the numeric columns are cleaned once at the end.
pub fn parse_books<R: Read>(source: R, options: &ParseOptions) -> Result<BookDataset, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(source);

    let mut records = reader.records();
    match records.next() {
        Some(header) => {
            header?;
        }
        None => return Err(DataError::MissingHeader),
    }

    let mut raw_pages: Vec<String> = Vec::new();
    let mut raw_ratings: Vec<String> = Vec::new();
    let mut raw_counts: Vec<String> = Vec::new();
    let mut lines: Vec<u64> = Vec::new();
    let mut years = Vec::new();
    let mut title_pages = TitlePages::new();
    let mut skipped_rows = 0usize;

    for result in records {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() != FIELD_COUNT {
            if options.skip_malformed_rows {
                tracing::warn!(line, fields = record.len(), "Skipping malformed row");
                skipped_rows += 1;
                continue;
            }
            return Err(DataError::FieldCount {
                line,
                expected: FIELD_COUNT,
                found: record.len(),
            });
        }

        let year_field = &record[parser::YEAR];
        let year = parse_year(year_field).ok_or_else(|| DataError::InvalidYear {
            line,
            value: year_field.to_string(),
        })?;

        let pages = &record[parser::PAGES];
        raw_pages.push(pages.to_string());
        raw_ratings.push(record[parser::AVERAGE_RATING].to_string());
        raw_counts.push(
            record[parser::RATINGS_COUNT]
                .trim_end_matches(&['\r', '\n'][..])
                .to_string(),
        );
        years.push(year);
        lines.push(line);

        // The map keeps the page text exactly as read, before blank cleaning.
        title_pages.insert_first(clean_title(&record[parser::TITLE]), pages.to_string());
    }

    Ok(BookDataset {
        pages: clean_column(&raw_pages, "pages", &lines)?,
        years,
        average_ratings: clean_column(&raw_ratings, "average_rating", &lines)?,
        ratings_counts: clean_column(&raw_counts, "ratings_count", &lines)?,
        title_pages,
        skipped_rows,
    })
}

fn clean_column(raw: &[String], column: &'static str, lines: &[u64]) -> Result<Vec<f64>, DataError> {
    convert_strings_to_floats(&convert_blank_to_zero(raw)).map_err(|failure| {
        DataError::InvalidNumber {
            line: lines.get(failure.index).copied().unwrap_or(0),
            column,
            value: failure.value,
        }
    })
}
