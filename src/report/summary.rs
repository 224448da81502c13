//! The text screens printed by the analysis menu.

use std::fmt::{self, Write};

use crate::processing::queries::{
    book_with_fewest_pages, book_with_most_pages, books_with_page_count, count_of_unique_years,
    fewest_pages_excluding_zero, max_value, missing_information_count, most_recent_year,
    oldest_year, top_longest,
};
use crate::processing::statistics::{
    correlation, describe_correlation, mean, median, mode, standard_deviation,
};
use crate::report::{or_na, rounded, two_places, whole};
use crate::state::session::AnalysisSession;

fn render(screen: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = screen(&mut out);
    out
}

/// Counts, extremes and missing-value tallies for the loaded books.
pub fn book_information(session: &AnalysisSession) -> String {
    render(|out| write_book_information(out, session))
}

fn write_book_information(out: &mut String, session: &AnalysisSession) -> fmt::Result {
    let data = &session.dataset;

    writeln!(out, "Book Information:")?;
    writeln!(out, "-----------------")?;
    writeln!(out)?;
    writeln!(out, "Books and Pages:")?;
    writeln!(out, "1. Total number of books in list: {}", data.row_count())?;
    writeln!(
        out,
        "2. Total pages in all books combined: {}",
        data.pages.iter().sum::<f64>() as i64
    )?;
    writeln!(out)?;
    writeln!(out, "Page Numbers:")?;
    writeln!(out, "1. Most pages in a book: {} pages", or_na(max_value(&data.pages)))?;
    writeln!(
        out,
        "2. Fewest pages in a book: {} pages",
        or_na(fewest_pages_excluding_zero(&data.pages))
    )?;
    writeln!(
        out,
        "3. Number of books in file with no page count: {}",
        missing_information_count(&data.pages)
    )?;
    writeln!(out)?;
    writeln!(out, "Published Year:")?;
    writeln!(
        out,
        "1. Number of unique years a book was published: {}",
        count_of_unique_years(&data.years).len()
    )?;
    writeln!(
        out,
        "2. The most recent year a book was published: {}",
        or_na(most_recent_year(&data.years))
    )?;
    writeln!(
        out,
        "3. The oldest year a book was published: {}",
        or_na(oldest_year(&data.years))
    )?;
    writeln!(out)?;
    writeln!(out, "Number of Ratings:")?;
    writeln!(
        out,
        "1. Total number of book reviews: {}",
        data.ratings_counts.iter().sum::<f64>() as i64
    )?;
    writeln!(
        out,
        "2. Number of books on file with no reviews: {}",
        missing_information_count(&data.ratings_counts)
    )?;
    Ok(())
}

/// Mean, standard deviation, mode and median of each numeric column, plus
/// the correlation between page count and average rating.
pub fn statistical_analysis(session: &AnalysisSession) -> String {
    render(|out| write_statistical_analysis(out, session))
}

fn write_statistical_analysis(out: &mut String, session: &AnalysisSession) -> fmt::Result {
    let data = &session.dataset;
    let pages = &data.pages;
    let ratings = &data.average_ratings;
    let counts = &data.ratings_counts;

    writeln!(out, "Mean, Mode, Median & Standard Deviation:")?;
    writeln!(out, "----------------------------------------")?;
    writeln!(out)?;
    writeln!(out, "Statistics for Page Numbers per Book:")?;
    writeln!(out, "1.1. Mean number of pages per book: {}", rounded(mean(pages)))?;
    writeln!(
        out,
        "1.2. Standard deviation of book pages: {}",
        whole(standard_deviation(pages))
    )?;
    writeln!(out, "1.3. Mode of book pages: {}", whole(mode(pages)))?;
    writeln!(out, "1.4. Median number of book pages: {}", whole(median(pages)))?;
    writeln!(out)?;
    writeln!(out, "Statistics for Average Rating out of 5 per Book:")?;
    writeln!(
        out,
        "2.1. Mean average rating for all books: {}",
        two_places(mean(ratings))
    )?;
    writeln!(
        out,
        "2.2. Standard deviation of average ratings: {}",
        two_places(standard_deviation(ratings))
    )?;
    writeln!(out, "2.3. Mode of average ratings: {}", two_places(mode(ratings)))?;
    writeln!(out, "2.4. Median average rating: {}", two_places(median(ratings)))?;
    writeln!(out)?;
    writeln!(out, "Statistics for Number of Ratings per Book:")?;
    writeln!(out, "3.1. Mean number of ratings per book: {}", whole(mean(counts)))?;
    writeln!(
        out,
        "3.2. Standard deviation of ratings per book: {}",
        whole(standard_deviation(counts))
    )?;
    writeln!(out, "3.3. Mode of ratings per book: {}", whole(mode(counts)))?;
    writeln!(out, "3.4. Median number ratings per book: {}", whole(median(counts)))?;
    writeln!(out)?;
    writeln!(out, "Correlation between Number of Pages and Average Rating:")?;
    let r = correlation(pages, ratings);
    writeln!(
        out,
        "4.1 Correlation between number of pages and average rating: {}",
        two_places(r)
    )?;
    match r {
        Ok(r) => {
            writeln!(out, "    - This suggests {}", describe_correlation(r))?;
        }
        Err(e) => {
            tracing::debug!("Correlation unavailable: {e}");
            writeln!(out, "    - Not available: {e}")?;
        }
    }
    Ok(())
}

/// Longest and shortest titles, titles at the mean length and the top-N ranking.
pub fn additional_analysis(session: &AnalysisSession, top_n: usize) -> String {
    render(|out| write_additional_analysis(out, session, top_n))
}

fn write_additional_analysis(out: &mut String, session: &AnalysisSession, top_n: usize) -> fmt::Result {
    let counts = session.page_counts();

    writeln!(out, "Additional Analysis:")?;
    writeln!(out, "--------------------")?;
    writeln!(out, "1. Book with most pages:")?;
    writeln!(out, "   -  {}", or_na(book_with_most_pages(counts)))?;
    writeln!(out)?;
    writeln!(out, "2. Book with fewest pages:")?;
    writeln!(out, "   -  {}", or_na(book_with_fewest_pages(counts)))?;
    writeln!(out)?;
    writeln!(out, "3. Titles with the same number of pages as the mean:")?;
    writeln!(out, "    {:>5}{:>10}", " Pages", "Title")?;
    if let Ok(m) = mean(&session.dataset.pages) {
        let target = m.round_ties_even() as i64;
        for title in books_with_page_count(counts, target) {
            writeln!(out, "   -  {target}    {title}")?;
        }
    }
    writeln!(out)?;
    writeln!(out, "4. Top {top_n} longest books:")?;
    writeln!(out, "    {:>5}{:>10}", " Pages", "Title")?;
    for (title, pages) in top_longest(counts, top_n) {
        writeln!(out, "   -  {pages}    {title}")?;
    }
    Ok(())
}
