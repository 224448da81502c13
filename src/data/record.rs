use std::fmt;

use indexmap::map::{Entry, IndexMap};

/// Published year of a book. Rows with an empty year field are `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Year {
    Known(i32),
    Unknown,
}

impl Year {
    pub fn known(&self) -> Option<i32> {
        match self {
            Year::Known(y) => Some(*y),
            Year::Unknown => None,
        }
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Known(y) => write!(f, "{y}"),
            Year::Unknown => f.write_str("Unknown"),
        }
    }
}

/// Title-keyed map that remembers insertion order.
///
/// Insertion is first-wins: inserting a title that is already present is a
/// no-op. Iteration yields titles in the order they were first inserted,
/// which is the tie-break order for every ranking query over the map.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleMap<V> {
    entries: IndexMap<String, V>,
}

/// Title to the raw page-count text of its first row.
pub type TitlePages = TitleMap<String>;

/// Title to page count after string-to-integer conversion.
pub type TitlePageCounts = TitleMap<i64>;

impl<V> TitleMap<V> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Insert `value` under `title` unless the title is already present.
    /// Returns whether the entry was inserted.
    pub fn insert_first(&mut self, title: String, value: V) -> bool {
        match self.entries.entry(title) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    pub fn get(&self, title: &str) -> Option<&V> {
        self.entries.get(title)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.entries.contains_key(title)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(t, v)| (t.as_str(), v))
    }

    /// Build a new map with every value converted, keeping order.
    /// Stops at the first conversion failure.
    pub fn try_map_values<U, E>(
        &self,
        mut f: impl FnMut(&str, &V) -> Result<U, E>,
    ) -> Result<TitleMap<U>, E> {
        let entries = self
            .entries
            .iter()
            .map(|(title, value)| Ok((title.clone(), f(title, value)?)))
            .collect::<Result<IndexMap<_, _>, E>>()?;
        Ok(TitleMap { entries })
    }
}

impl<V> Default for TitleMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<(String, V)> for TitleMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut map = TitleMap::new();
        for (title, value) in iter {
            map.insert_first(title, value);
        }
        map
    }
}

/// The cleaned collections produced by one parse of the book file.
///
/// Every sequence holds one entry per accepted data row, in file order.
/// Empty numeric fields are `0.0` in the sequences; the title map keeps the
/// raw page text of each title's first row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookDataset {
    pub pages: Vec<f64>,
    pub years: Vec<Year>,
    pub average_ratings: Vec<f64>,
    pub ratings_counts: Vec<f64>,
    pub title_pages: TitlePages,
    /// Rows dropped because their field count was wrong (only when skipping is enabled).
    pub skipped_rows: usize,
}

impl BookDataset {
    pub fn row_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
