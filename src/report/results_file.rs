use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{DataError, StatsError};
use crate::processing::statistics::{mean, median, mode, standard_deviation};
use crate::report::{two_places, whole, DATASET_URL};
use crate::state::session::AnalysisSession;

const RULE: &str = "------------------------------------------------";

struct Section<'a> {
    heading: &'a str,
    subject: &'a str,
    values: &'a [f64],
    format: fn(Result<f64, StatsError>) -> String,
}

/// Write the statistical results report for `session` to `out`.
pub fn write_results<W: Write>(out: &mut W, session: &AnalysisSession) -> io::Result<()> {
    let data = &session.dataset;
    let sections = [
        Section {
            heading: "Book Page Number Statistics:",
            subject: "book pages",
            values: &data.pages,
            format: whole,
        },
        Section {
            heading: "Book Average Rating Statistics:",
            subject: "average rating",
            values: &data.average_ratings,
            format: two_places,
        },
        Section {
            heading: "Book Number of Ratings Statistics:",
            subject: "number of ratings",
            values: &data.ratings_counts,
            format: whole,
        },
    ];

    writeln!(out, "          Statistical Analysis Results")?;
    writeln!(out, "================================================")?;
    writeln!(out)?;
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        let fmt = section.format;
        writeln!(out, "{}", section.heading)?;
        writeln!(out, "{}", "=".repeat(section.heading.len()))?;
        writeln!(out, "Mean of {}: {}", section.subject, fmt(mean(section.values)))?;
        writeln!(out, "Mode of {}: {}", section.subject, fmt(mode(section.values)))?;
        writeln!(out, "Median of {}: {}", section.subject, fmt(median(section.values)))?;
        writeln!(
            out,
            "Standard Deviation of {}: {}",
            section.subject,
            fmt(standard_deviation(section.values))
        )?;
        writeln!(out, "{RULE}")?;
    }
    writeln!(out, "The original source file can be found here:")?;
    writeln!(out)?;
    writeln!(out, "{DATASET_URL}")?;
    Ok(())
}

/// Write the results report to `path`, replacing any existing file.
pub fn save_results(path: &Path, session: &AnalysisSession) -> Result<(), DataError> {
    if path.is_dir() {
        return Err(DataError::IsADirectory {
            path: path.to_path_buf(),
        });
    }
    let file = File::create(path).map_err(|e| DataError::from_io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_results(&mut writer, session)
        .and_then(|_| writer.flush())
        .map_err(|e| DataError::from_io(path, e))?;
    tracing::info!("Saved results to {:?}", path);
    Ok(())
}
