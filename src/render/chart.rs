use std::f32::consts::{FRAC_PI_2, TAU};

use crate::data::record::{TitlePageCounts, Year};
use crate::error::StatsError;
use crate::processing::queries::{top_longest, top_years};
use crate::processing::statistics::SeriesStats;
use crate::state::session::AnalysisSession;

/// Fill colours, cycled by slice or bar index.
pub const COLOR_PALETTE: [[u8; 4]; 12] = [
    [31, 119, 180, 255],  // Blue
    [255, 127, 14, 255],  // Orange
    [44, 160, 44, 255],   // Green
    [214, 39, 40, 255],   // Red
    [148, 103, 189, 255], // Purple
    [140, 86, 75, 255],   // Brown
    [227, 119, 194, 255], // Pink
    [127, 127, 127, 255], // Grey
    [188, 189, 34, 255],  // Olive
    [23, 190, 207, 255],  // Cyan
    [0, 0, 128, 255],     // Navy
    [255, 192, 203, 255], // Light pink
];

pub fn color_for_index(index: usize) -> [u8; 4] {
    COLOR_PALETTE[index % COLOR_PALETTE.len()]
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    /// Labelled shares of a whole.
    Pie { slices: Vec<(String, f64)> },
    /// One bar per label, first label drawn at the top.
    HorizontalBar { bars: Vec<(String, f64)> },
    Scatter { points: Vec<[f64; 2]> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// File name used when the chart is exported as a PNG.
    pub file_name: &'static str,
    pub kind: ChartKind,
}

/// Pie of the `top_n` most common publication years.
pub fn published_years_chart(years: &[Year], top_n: usize) -> Chart {
    let slices = top_years(years, top_n)
        .into_iter()
        .map(|(year, count)| (year.to_string(), count as f64))
        .collect();
    Chart {
        title: format!("Top {top_n} Years for Published Books"),
        x_label: String::new(),
        y_label: String::new(),
        file_name: "top_ten_published_years.png",
        kind: ChartKind::Pie { slices },
    }
}

/// Bars for the mean, standard deviation, mode and median of one column.
pub fn statistics_chart(
    title: &str,
    x_label: &str,
    y_label: &str,
    file_name: &'static str,
    values: &[f64],
) -> Result<Chart, StatsError> {
    let stats = SeriesStats::compute(values)?;
    let bars = stats
        .labelled()
        .iter()
        .map(|(label, value)| (label.to_string(), *value))
        .collect();
    Ok(Chart {
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        file_name,
        kind: ChartKind::HorizontalBar { bars },
    })
}

pub fn page_rating_scatter(pages: &[f64], ratings: &[f64]) -> Chart {
    let points = pages
        .iter()
        .zip(ratings)
        .map(|(&p, &r)| [p, r])
        .collect();
    Chart {
        title: "Average Rating & Number of Pages".to_string(),
        x_label: "Number of Pages in Book".to_string(),
        y_label: "Average Rating of Book".to_string(),
        file_name: "page_number_v_average_rating.png",
        kind: ChartKind::Scatter { points },
    }
}

pub fn longest_books_chart(page_counts: &TitlePageCounts, top_n: usize) -> Chart {
    let bars = top_longest(page_counts, top_n)
        .into_iter()
        .map(|(title, pages)| (title, pages as f64))
        .collect();
    Chart {
        title: format!("Top {top_n} Longest Books"),
        x_label: "Number of Pages".to_string(),
        y_label: "Book Title".to_string(),
        file_name: "top_ten_longest_books.png",
        kind: ChartKind::HorizontalBar { bars },
    }
}

/// Every chart the visualizations screen shows, in display order.
/// Statistics charts for columns with undefined statistics are left out.
pub fn analysis_charts(session: &AnalysisSession, top_n: usize) -> Vec<Chart> {
    let data = &session.dataset;
    let mut charts = vec![published_years_chart(&data.years, top_n)];

    let stats_charts = [
        statistics_chart(
            "Page Number Analysis",
            "Number of pages",
            "Type of Analysis",
            "page_number_statistics.png",
            &data.pages,
        ),
        statistics_chart(
            "Average Rating Analysis",
            "Average Rating",
            "Type of Analysis",
            "average_rating_statistics.png",
            &data.average_ratings,
        ),
        statistics_chart(
            "Number of Ratings Analysis",
            "Result",
            "Analysis",
            "number_of_reviews_statistics.png",
            &data.ratings_counts,
        ),
    ];
    for chart in stats_charts {
        match chart {
            Ok(chart) => charts.push(chart),
            Err(e) => tracing::warn!("Skipping statistics chart: {e}"),
        }
    }

    charts.push(page_rating_scatter(&data.pages, &data.average_ratings));
    charts.push(longest_books_chart(session.page_counts(), top_n));
    charts
}

/// Angular extent of one pie slice, in radians. Slices start at twelve
/// o'clock and run clockwise in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSlice {
    pub start: f32,
    pub sweep: f32,
    pub percent: f64,
}

impl PieSlice {
    pub fn mid_angle(&self) -> f32 {
        self.start + self.sweep / 2.0
    }
}

/// Split a full turn in proportion to `values`. Empty when the total is not positive.
pub fn pie_slices(values: &[f64]) -> Vec<PieSlice> {
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let mut start = -FRAC_PI_2;
    values
        .iter()
        .map(|&v| {
            let share = v.max(0.0) / total;
            let slice = PieSlice {
                start,
                sweep: share as f32 * TAU,
                percent: share * 100.0,
            };
            start += slice.sweep;
            slice
        })
        .collect()
}

pub fn percent_label(percent: f64) -> String {
    format!("{percent:.0}%")
}
