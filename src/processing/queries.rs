//! Extremal, ranking and counting queries over the cleaned book columns.
//!
//! Zero in a numeric column means the value was missing from the file.
//! Queries that need a real value skip it and answer `None` when nothing is left.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::data::record::{TitlePageCounts, Year};

fn count_by_key<T: Clone, K: Eq + Hash>(items: &[T], key: impl Fn(&T) -> K) -> Vec<(T, usize)> {
    let mut counts: IndexMap<K, (T, usize)> = IndexMap::new();
    for item in items {
        counts.entry(key(item)).or_insert_with(|| (item.clone(), 0)).1 += 1;
    }
    counts.into_values().collect()
}

/// Occurrences of each distinct value, in order of first occurrence.
pub fn count_of_unique(values: &[f64]) -> Vec<(f64, usize)> {
    // -0.0 and 0.0 count as the same value.
    count_by_key(values, |v| if *v == 0.0 { 0u64 } else { v.to_bits() })
}

/// Occurrences of each distinct year (including `Unknown`), in order of first occurrence.
pub fn count_of_unique_years(years: &[Year]) -> Vec<(Year, usize)> {
    count_by_key(years, |y| *y)
}

/// The `n` most common years, most common first; ties keep first-seen order.
pub fn top_years(years: &[Year], n: usize) -> Vec<(Year, usize)> {
    let mut counts = count_of_unique_years(years);
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);
    counts
}

/// Largest value, truncated towards zero.
pub fn max_value(values: &[f64]) -> Option<i64> {
    values
        .iter()
        .copied()
        .reduce(f64::max)
        .map(|v| v.trunc() as i64)
}

/// Smallest value above zero, truncated towards zero.
pub fn fewest_pages_excluding_zero(values: &[f64]) -> Option<i64> {
    values
        .iter()
        .copied()
        .filter(|v| *v > 0.0)
        .reduce(f64::min)
        .map(|v| v.trunc() as i64)
}

pub fn most_recent_year(years: &[Year]) -> Option<i32> {
    years.iter().filter_map(Year::known).max()
}

pub fn oldest_year(years: &[Year]) -> Option<i32> {
    years.iter().filter_map(Year::known).min()
}

/// Number of entries that are exactly zero.
pub fn missing_information_count(values: &[f64]) -> usize {
    values.iter().filter(|v| **v == 0.0).count()
}

/// The `n` titles with the most pages, longest first.
/// Equal page counts keep the map's insertion order.
pub fn top_longest(title_pages: &TitlePageCounts, n: usize) -> Vec<(String, i64)> {
    let mut ranked: Vec<(String, i64)> = title_pages
        .iter()
        .map(|(title, pages)| (title.to_string(), *pages))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}

/// Title with the smallest page count above zero. On a tie the title
/// inserted last wins.
pub fn book_with_fewest_pages(title_pages: &TitlePageCounts) -> Option<&str> {
    let mut best: Option<(&str, i64)> = None;
    for (title, &pages) in title_pages.iter() {
        if pages <= 0 {
            continue;
        }
        match best {
            Some((_, fewest)) if pages > fewest => {}
            _ => best = Some((title, pages)),
        }
    }
    best.map(|(title, _)| title)
}

/// Title with the largest page count. On a tie the title inserted first wins.
pub fn book_with_most_pages(title_pages: &TitlePageCounts) -> Option<&str> {
    let mut best: Option<(&str, i64)> = None;
    for (title, &pages) in title_pages.iter() {
        match best {
            Some((_, most)) if pages <= most => {}
            _ => best = Some((title, pages)),
        }
    }
    best.map(|(title, _)| title)
}

/// Titles whose page count equals `pages`, in insertion order.
pub fn books_with_page_count(title_pages: &TitlePageCounts, pages: i64) -> Vec<&str> {
    title_pages
        .iter()
        .filter(|(_, p)| **p == pages)
        .map(|(title, _)| title)
        .collect()
}
