pub struct Statistics;

impl Statistics {
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let sum: f64 = values.iter().sum();
        Some(sum / values.len() as f64)
    }

    /// Rounds half away from zero to `decimals` places.
    pub fn round_to(value: f64, decimals: i32) -> f64 {
        let factor = 10f64.powi(decimals);
        (value * factor).round() / factor
    }

    /// Smallest and largest of a set of counts.
    pub fn count_range<I>(counts: I) -> Option<(usize, usize)>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut iter = counts.into_iter();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), c| (lo.min(c), hi.max(c))))
    }
}

#[cfg(test)]
mod tests {
    use super::Statistics;

    #[test]
    fn mean_works() {
        let m = Statistics::mean(&[1.0, 2.0, 3.0]).unwrap();
        assert!((m - 2.0).abs() < 1e-9);
        assert!(Statistics::mean(&[]).is_none());
    }

    #[test]
    fn rounds_to_two_places() {
        assert_eq!(Statistics::round_to(2.0 / 3.0, 2), 0.67);
        assert_eq!(Statistics::round_to(20.0, 2), 20.0);
    }

    #[test]
    fn count_range_of_groups() {
        assert_eq!(Statistics::count_range([4, 1, 9, 3]), Some((1, 9)));
        assert_eq!(Statistics::count_range(Vec::new()), None);
    }
}
