use crate::error::StatsError;
use crate::processing::queries::count_of_unique;

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divisor N).
pub fn standard_deviation(values: &[f64]) -> Result<f64, StatsError> {
    let mean = mean(values)?;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Ok(variance.sqrt())
}

/// Median of a sorted copy; even lengths average the two central values.
pub fn median(values: &[f64]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let count = sorted.len();
    Ok(if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    })
}

/// Most frequent value, skipping the missing-value zero.
///
/// Ties go to the value seen first. When zero is the most frequent value the
/// runner-up is returned instead.
pub fn mode(values: &[f64]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let mut counts = count_of_unique(values);
    // Stable, so equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    match counts.as_slice() {
        [(first, _), rest @ ..] if *first == 0.0 => match rest.first() {
            Some((second, _)) => Ok(*second),
            None => {
                tracing::debug!("Mode requested on a column of missing values");
                Err(StatsError::OnlyMissingValues)
            }
        },
        [(first, _), ..] => Ok(*first),
        [] => Err(StatsError::EmptyInput),
    }
}

/// Pearson correlation coefficient of two equal-length sequences.
pub fn correlation(xs: &[f64], ys: &[f64]) -> Result<f64, StatsError> {
    if xs.len() != ys.len() {
        return Err(StatsError::LengthMismatch {
            left: xs.len(),
            right: ys.len(),
        });
    }
    let mean_x = mean(xs)?;
    let mean_y = mean(ys)?;

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sum_xy += dx * dy;
        sum_xx += dx * dx;
        sum_yy += dy * dy;
    }

    let denominator = sum_xx.sqrt() * sum_yy.sqrt();
    if denominator == 0.0 {
        return Err(StatsError::ZeroVariance);
    }
    Ok(sum_xy / denominator)
}

/// Describe a correlation coefficient in words, e.g. "a weak positive correlation".
pub fn describe_correlation(r: f64) -> &'static str {
    let strength = r.abs();
    match (strength, r >= 0.0) {
        (s, _) if s < 0.1 => "no meaningful correlation",
        (s, true) if s < 0.4 => "a weak positive correlation",
        (s, false) if s < 0.4 => "a weak negative correlation",
        (s, true) if s < 0.7 => "a moderate positive correlation",
        (s, false) if s < 0.7 => "a moderate negative correlation",
        (_, true) => "a strong positive correlation",
        (_, false) => "a strong negative correlation",
    }
}

/// Summary statistics for one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub mode: f64,
    pub median: f64,
}

impl SeriesStats {
    pub fn compute(values: &[f64]) -> Result<Self, StatsError> {
        Ok(SeriesStats {
            count: values.len(),
            mean: mean(values)?,
            std_dev: standard_deviation(values)?,
            mode: mode(values)?,
            median: median(values)?,
        })
    }

    /// The four headline figures in display order, labelled.
    pub fn labelled(&self) -> [(&'static str, f64); 4] {
        [
            ("Mean", self.mean),
            ("Standard Deviation", self.std_dev),
            ("Mode", self.mode),
            ("Median", self.median),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: f64, expected: f64, tolerance: f64) -> bool {
        (actual - expected).abs() <= tolerance
    }

    #[test]
    fn mean_of_samples() {
        assert_eq!(mean(&[1.0, 3.0, 5.0, 7.0, 9.0]), Ok(5.0));
        let m = mean(&[2.0, 4.0, 6.0, 8.0, 10.0, 13.0]).unwrap();
        assert!(close(m, 7.1666, 0.001));
    }

    #[test]
    fn population_standard_deviation() {
        let sd = standard_deviation(&[1.0, 3.0, 5.0, 7.0, 9.0]).unwrap();
        assert!(close(sd, 2.828, 0.001));
    }

    #[test]
    fn median_odd_and_even() {
        assert_eq!(median(&[1.0, 2.0, 3.0]), Ok(2.0));
        assert_eq!(median(&[1.0, 2.0, 4.0, 3.0]), Ok(2.5));
    }

    #[test]
    fn median_leaves_input_untouched() {
        let values = vec![9.0, 1.0, 5.0];
        median(&values).unwrap();
        assert_eq!(values, vec![9.0, 1.0, 5.0]);
    }

    #[test]
    fn mode_picks_most_frequent() {
        let values = [23.0, 67.0, 54.0, 54.0, 90.0, 6.0, 32.0, 54.0, 1.0, 2.0, 3.0, 67.0];
        assert_eq!(mode(&values), Ok(54.0));
    }

    #[test]
    fn mode_ties_go_to_first_seen() {
        assert_eq!(mode(&[4.0, 7.0, 7.0, 4.0]), Ok(4.0));
    }

    #[test]
    fn mode_skips_missing_zero() {
        assert_eq!(mode(&[0.0, 0.0, 0.0, 5.0, 5.0, 3.0]), Ok(5.0));
        assert_eq!(mode(&[0.0, 0.0]), Err(StatsError::OnlyMissingValues));
    }

    #[test]
    fn correlation_of_samples() {
        let r = correlation(&[1.0, 4.0, 6.0, 3.0, 16.0], &[31.0, 24.0, 4.0, 14.0, 36.0]).unwrap();
        assert!(close(r, 0.3785, 0.001));
    }

    #[test]
    fn degenerate_inputs_are_errors() {
        assert_eq!(mean(&[]), Err(StatsError::EmptyInput));
        assert_eq!(standard_deviation(&[]), Err(StatsError::EmptyInput));
        assert_eq!(median(&[]), Err(StatsError::EmptyInput));
        assert_eq!(mode(&[]), Err(StatsError::EmptyInput));
        assert_eq!(
            correlation(&[1.0, 1.0], &[2.0, 3.0]),
            Err(StatsError::ZeroVariance)
        );
        assert_eq!(
            correlation(&[1.0], &[2.0, 3.0]),
            Err(StatsError::LengthMismatch { left: 1, right: 2 })
        );
    }

    #[test]
    fn correlation_wording() {
        assert_eq!(describe_correlation(0.12), "a weak positive correlation");
        assert_eq!(describe_correlation(-0.85), "a strong negative correlation");
        assert_eq!(describe_correlation(0.05), "no meaningful correlation");
    }

    #[test]
    fn series_stats_bundle() {
        let stats = SeriesStats::compute(&[1.0, 3.0, 3.0, 9.0]).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 4.0);
        assert_eq!(stats.mode, 3.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.labelled()[1].0, "Standard Deviation");
    }
}
