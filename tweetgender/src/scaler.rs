use crate::feature::FeatureVector;

/// Mean and population standard deviation of a feature column.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColumnStats {
    pub mean: f64,
    pub std: f64,
}

impl ColumnStats {
    fn from_column<I>(column: I, n: usize) -> Self
    where
        I: Iterator<Item = f64> + Clone,
    {
        if n == 0 {
            return Self::default();
        }
        let n_f = n as f64;
        let mean = column.clone().sum::<f64>() / n_f;
        let var = column.map(|x| (x - mean) * (x - mean)).sum::<f64>() / n_f;
        // Rounding errors of the mean leave a tiny variance on constant columns.
        let bound = n_f * f64::EPSILON * var + (n_f * mean * f64::EPSILON).powi(2);
        let std = if var <= bound { 0.0 } else { var.sqrt() };
        Self { mean, std }
    }

    fn standardize(&self, x: f64) -> f64 {
        if self.std == 0.0 {
            0.0
        } else {
            (x - self.mean) / self.std
        }
    }
}

/// Computes the statistics of each feature column.
pub fn column_stats(matrix: &[FeatureVector]) -> [ColumnStats; FeatureVector::DIMENSION] {
    let rows: Vec<_> = matrix.iter().map(|v| v.to_array()).collect();
    let mut stats = [ColumnStats::default(); FeatureVector::DIMENSION];
    for (j, s) in stats.iter_mut().enumerate() {
        *s = ColumnStats::from_column(rows.iter().map(|row| row[j]), rows.len());
    }
    stats
}

/// Standardizes each feature column to zero mean and unit population variance.
///
/// A column with zero variance becomes all zeros.
///
/// # Examples
///
/// ```
/// use tweetgender::{scale, FeatureVector};
///
/// let scaled = scale(&[
///     FeatureVector::new(1.0, 0.5, 4.0),
///     FeatureVector::new(3.0, 0.5, 2.0),
/// ]);
/// assert_eq!([-1.0, 0.0, 1.0], scaled[0].to_array());
/// assert_eq!([1.0, 0.0, -1.0], scaled[1].to_array());
/// ```
pub fn scale(matrix: &[FeatureVector]) -> Vec<FeatureVector> {
    let stats = column_stats(matrix);
    matrix
        .iter()
        .map(|v| {
            let row = v.to_array();
            FeatureVector::from([
                stats[0].standardize(row[0]),
                stats[1].standardize(row[1]),
                stats[2].standardize(row[2]),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_scale_mean_and_std() {
        let matrix = vec![
            FeatureVector::new(0.12, 0.08, 0.30),
            FeatureVector::new(0.05, 0.11, 0.21),
            FeatureVector::new(0.09, 0.15, 0.18),
            FeatureVector::new(0.20, 0.02, 0.25),
            FeatureVector::new(0.07, 0.09, 0.40),
        ];
        let scaled = scale(&matrix);
        assert_eq!(matrix.len(), scaled.len());
        for s in column_stats(&scaled) {
            assert!(s.mean.abs() < TOLERANCE, "mean = {}", s.mean);
            assert!((s.std - 1.0).abs() < TOLERANCE, "std = {}", s.std);
        }
    }

    #[test]
    fn test_scale_population_std() {
        let stats = column_stats(&[
            FeatureVector::new(2.0, 0.0, 0.0),
            FeatureVector::new(4.0, 0.0, 0.0),
            FeatureVector::new(4.0, 0.0, 0.0),
            FeatureVector::new(4.0, 0.0, 0.0),
            FeatureVector::new(5.0, 0.0, 0.0),
            FeatureVector::new(5.0, 0.0, 0.0),
            FeatureVector::new(7.0, 0.0, 0.0),
            FeatureVector::new(9.0, 0.0, 0.0),
        ]);
        assert!((stats[0].mean - 5.0).abs() < TOLERANCE);
        assert!((stats[0].std - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_scale_constant_column() {
        let matrix = vec![
            FeatureVector::new(0.1, 1.0, 0.3),
            FeatureVector::new(0.1, 2.0, 0.3),
            FeatureVector::new(0.1, 3.0, 0.3),
        ];
        let scaled = scale(&matrix);
        for v in &scaled {
            assert_eq!(0.0, v.determiner_ratio);
            assert_eq!(0.0, v.pronoun_ratio);
        }
        assert!(scaled[1].preposition_ratio.abs() < TOLERANCE);
    }

    #[test]
    fn test_scale_single_row() {
        let scaled = scale(&[FeatureVector::new(0.3, 0.2, 0.1)]);
        assert_eq!(vec![FeatureVector::new(0.0, 0.0, 0.0)], scaled);
    }

    #[test]
    fn test_scale_empty() {
        assert!(scale(&[]).is_empty());
    }
}
