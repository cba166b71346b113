//! Column statistics for feature standardization.

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divisor `n`, not `n - 1`).
pub fn population_std(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Z-score standardization over one column. A zero-variance column maps to
/// all zeros instead of dividing by zero.
pub fn standardize(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let m = mean(values);
    let sd = population_std(values, m);
    if sd == 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v - m) / sd).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_population_std_hand_checked() {
        // mean 3, squared deviations 4+1+0+1+4 = 10, variance 2
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let sd = population_std(&values, mean(&values));
        assert!((sd - 2.0_f64.sqrt()).abs() < 1e-12, "std was {sd}");
    }

    #[test]
    fn test_standardized_column_has_zero_mean_unit_variance() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let standardized = standardize(&values);

        let m = mean(&standardized);
        let sd = population_std(&standardized, m);
        assert!(m.abs() < 1e-12, "mean was {m}");
        assert!((sd - 1.0).abs() < 1e-12, "std was {sd}");
    }

    #[test]
    fn test_zero_variance_column_standardizes_to_zeros() {
        assert_eq!(standardize(&[3.0, 3.0, 3.0]), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_standardize_empty_is_empty() {
        assert!(standardize(&[]).is_empty());
    }

    #[test]
    fn test_standardize_is_scale_invariant() {
        let values = [1.0, 2.0, 3.0, 4.0];
        let doubled: Vec<f64> = values.iter().map(|v| v * 2.0).collect();
        let a = standardize(&values);
        let b = standardize(&doubled);
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < 1e-12);
        }
    }
}
