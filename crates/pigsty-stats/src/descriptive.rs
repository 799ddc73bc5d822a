/// Descriptive statistics of a set of non-negative integer samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Number of samples.
    pub count: usize,
    pub min: u32,
    pub max: u32,
    pub mean: f64,
    /// The lower median for even-sized inputs.
    pub median: u32,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl Summary {
    /// Summarizes unsorted values.
    ///
    /// Returns `None` when `values` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pigsty_stats::descriptive::Summary;
    /// let summary = Summary::new([4, 1, 3, 2]).unwrap();
    /// assert_eq!(summary.count, 4);
    /// assert_eq!(summary.min, 1);
    /// assert_eq!(summary.max, 4);
    /// assert_eq!(summary.mean, 2.5);
    /// assert_eq!(summary.median, 2);
    ///
    /// assert!(Summary::new([]).is_none());
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_unstable();
        Self::from_sorted(&values)
    }

    /// Summarizes values already sorted in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[u32]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted(),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let n = count as f64;
        let sum = sorted_values.iter().map(|&v| u64::from(v)).sum::<u64>();
        let mean = sum as f64 / n;
        let median = sorted_values[(count - 1) / 2];
        let variance = sorted_values
            .iter()
            .map(|&v| (f64::from(v) - mean).powi(2))
            .sum::<f64>()
            / n;

        Some(Self {
            count,
            min,
            max,
            mean,
            median,
            std_dev: variance.sqrt(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value() {
        let summary = Summary::new([7]).unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.min, 7);
        assert_eq!(summary.max, 7);
        assert!((summary.mean - 7.0).abs() < f64::EPSILON);
        assert_eq!(summary.median, 7);
        assert!(summary.std_dev.abs() < f64::EPSILON);
    }

    #[test]
    fn test_odd_count_median() {
        let summary = Summary::new([9, 1, 5]).unwrap();
        assert_eq!(summary.median, 5);
    }

    #[test]
    fn test_std_dev() {
        let summary = Summary::new([2, 4, 4, 4, 5, 5, 7, 9]).unwrap();
        assert!((summary.mean - 5.0).abs() < 1e-12);
        assert!((summary.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_large_values_do_not_overflow() {
        let summary = Summary::new([u32::MAX, u32::MAX]).unwrap();
        assert!((summary.mean - f64::from(u32::MAX)).abs() < 1.0);
    }

    #[test]
    #[should_panic(expected = "sorted")]
    fn test_from_sorted_rejects_unsorted() {
        let _ = Summary::from_sorted(&[3, 1]);
    }
}
