pub mod results_file;
pub mod summary;

use crate::error::StatsError;

/// Source of the 7k books dataset, quoted in every report.
pub const DATASET_URL: &str = "https://www.kaggle.com/dylanjcastillo/7k-books-with-metadata";

/// Truncate a statistic to a whole number, or "n/a" if it is undefined.
pub(crate) fn whole(value: Result<f64, StatsError>) -> String {
    match value {
        Ok(v) => format!("{}", v.trunc() as i64),
        Err(_) => "n/a".to_string(),
    }
}

/// Round a statistic to the nearest whole number, halves to even, or "n/a"
/// if it is undefined.
pub(crate) fn rounded(value: Result<f64, StatsError>) -> String {
    match value {
        Ok(v) => format!("{}", v.round_ties_even() as i64),
        Err(_) => "n/a".to_string(),
    }
}

/// Two decimal places, or "n/a" if the statistic is undefined.
pub(crate) fn two_places(value: Result<f64, StatsError>) -> String {
    match value {
        Ok(v) => format!("{v:.2}"),
        Err(_) => "n/a".to_string(),
    }
}

pub(crate) fn or_na<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}
