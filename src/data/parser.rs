use thiserror::Error;

use crate::data::record::{TitlePageCounts, TitlePages, Year};
use crate::error::DataError;

/// Number of comma-separated fields in every row of the book file.
pub const FIELD_COUNT: usize = 12;

pub const TITLE: usize = 2;
pub const YEAR: usize = 8;
pub const AVERAGE_RATING: usize = 9;
pub const PAGES: usize = 10;
pub const RATINGS_COUNT: usize = 11;

/// A value in a numeric column that could not be read as a finite number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("value {value:?} at position {index} is not a number")]
pub struct ConversionFailure {
    pub index: usize,
    pub value: String,
}

/// Replace every empty entry with `"0"`. Applying it twice changes nothing.
pub fn convert_blank_to_zero<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .map(|v| {
            let v = v.as_ref();
            if v.is_empty() {
                "0".to_string()
            } else {
                v.to_string()
            }
        })
        .collect()
}

/// Convert a whole column of numeric text to floats.
///
/// Surrounding whitespace is ignored. Empty text, non-numeric text and the
/// non-finite spellings (`inf`, `NaN`) are rejected with the failing index.
pub fn convert_strings_to_floats<S: AsRef<str>>(
    values: &[S],
) -> Result<Vec<f64>, ConversionFailure> {
    values
        .iter()
        .enumerate()
        .map(|(index, v)| {
            let text = v.as_ref();
            match text.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(n),
                _ => Err(ConversionFailure {
                    index,
                    value: text.to_string(),
                }),
            }
        })
        .collect()
}

/// Read a year field: empty is `Unknown`, otherwise a whole number.
pub fn parse_year(field: &str) -> Option<Year> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Some(Year::Unknown);
    }
    trimmed.parse::<i32>().ok().map(Year::Known)
}

/// Titles carry `+` where the source had commas.
pub fn clean_title(title: &str) -> String {
    title.replace('+', ",")
}

/// Convert the raw page text of every title to an integer; empty text is `0`.
pub fn convert_dict_values_to_int(title_pages: &TitlePages) -> Result<TitlePageCounts, DataError> {
    title_pages.try_map_values(|title, raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(0);
        }
        trimmed
            .parse::<i64>()
            .map_err(|_| DataError::InvalidPageCount {
                title: title.to_string(),
                value: raw.clone(),
            })
    })
}
