use crate::data::loader;
use crate::data::parser::convert_dict_values_to_int;
use crate::data::record::{BookDataset, TitlePageCounts};
use crate::error::DataError;
use crate::state::settings::Settings;

/// One analysis session: the books parsed from the data file, plus the
/// title page counts converted once for the ranking queries.
///
/// The session is rebuilt every time the user enters the analysis menu and
/// dropped when they return to the main menu.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    pub dataset: BookDataset,
    page_counts: TitlePageCounts,
}

impl AnalysisSession {
    pub fn new(dataset: BookDataset) -> Result<Self, DataError> {
        let page_counts = convert_dict_values_to_int(&dataset.title_pages)?;
        Ok(Self {
            dataset,
            page_counts,
        })
    }

    /// Parse the configured data file and start a session over it.
    pub fn load(settings: &Settings) -> Result<Self, DataError> {
        let dataset = loader::load_books(&settings.data_path, &settings.parse_options())?;
        Self::new(dataset)
    }

    pub fn page_counts(&self) -> &TitlePageCounts {
        &self.page_counts
    }
}
