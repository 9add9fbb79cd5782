//! See [super].

use super::types::{BigOAlgorithmComplexity, ClassificationThresholds, ModelFit};
use std::cmp::Reverse;


/// Picks the simplest complexity that explains the fitted costs.\
/// Candidates are walked from the most to the least complex and the first one satisfying both conditions below is chosen:
///   1. its `leading_coefficient` is greater than `thresholds.coefficient_threshold`;
///   2. its `residual_error * (1 + thresholds.error_threshold)` is less than the smallest residual error of every simpler candidate.
///
/// `O(1)` is returned when no other candidate qualifies -- including when some simpler candidate already explains the data perfectly
/// (a zero residual error can't be improved upon).
pub fn classify(fits: &[ModelFit], thresholds: &ClassificationThresholds) -> BigOAlgorithmComplexity {
    let mut ordered: Vec<&ModelFit> = fits.iter().collect();
    ordered.sort_by_key(|fit| Reverse(fit.complexity));

    for (index, fit) in ordered.iter().enumerate() {
        if fit.complexity == BigOAlgorithmComplexity::O1 {
            break
        }
        if fit.leading_coefficient <= thresholds.coefficient_threshold {
            continue
        }
        let simpler_min_error = ordered[index+1..].iter()
            .map(|simpler| simpler.residual_error)
            .fold(f64::INFINITY, f64::min);
        if !simpler_min_error.is_finite() || simpler_min_error <= 0.0 {
            continue
        }
        if fit.residual_error * (1.0 + thresholds.error_threshold) < simpler_min_error {
            return fit.complexity
        }
    }
    BigOAlgorithmComplexity::O1
}
