//! Least-squares fitting of every [CANDIDATE_MODELS] entry to a [CostSeries].
//!
//! For the 1-based run indexes `x = 1..=n`, each candidate's transform is applied to `x`, the result is scaled
//! to `[0, 1]` (keeping the Vandermonde matrix well conditioned for large run counts) and a polynomial of the
//! candidate's degree is solved by SVD. Coefficients are then rescaled back, so they relate to the unscaled
//! transformed index.

use crate::{
    error::BigOError,
    low_level_analysis::types::{CandidateModel, CostSeries, ModelFit, CANDIDATE_MODELS},
};
use nalgebra::{DMatrix, DVector};


/// Fits all [CANDIDATE_MODELS] to `series`, returning their fits in the same order.\
/// Fails if there are less than 2 samples or if any of them is not finite.
pub fn fit_models(series: &CostSeries) -> Result<Vec<ModelFit>, BigOError> {
    if series.len() < 2 {
        return Err(BigOError::invalid_configuration(format!("at least 2 cost samples are needed for fitting, {} given", series.len())));
    }
    if let Some(index) = series.as_slice().iter().position(|sample| !sample.is_finite()) {
        return Err(BigOError::NonFiniteMeasurement { run: index as u32 + 1 });
    }
    let y = DVector::from_column_slice(series.as_slice());
    Ok(CANDIDATE_MODELS.iter()
        .map(|candidate| fit_model(candidate, &y))
        .collect())
}

/// Fits a single `candidate` to the costs `y`, where `y[i]` is the cost of run `i+1`
fn fit_model(candidate: &CandidateModel, y: &DVector<f64>) -> ModelFit {
    let n = y.len();
    if candidate.degree == 0 {
        let mean = y.mean();
        return ModelFit {
            complexity:          candidate.complexity,
            residual_error:      rms(y.iter().map(|sample| sample - mean)),
            leading_coefficient: 0.0,
            coefficients:        vec![mean],
        }
    }

    let transformed: Vec<f64> = (1..=n).map(|x| (candidate.transform)(x as f64)).collect();
    let scale = transformed.iter().fold(0.0_f64, |max, t| max.max(t.abs()));
    let scale = if scale > 0.0 { scale } else { 1.0 };
    let vandermonde = DMatrix::from_fn(n, candidate.degree + 1, |row, power| (transformed[row] / scale).powi(power as i32));

    match solve_least_squares(&vandermonde, y) {
        Some(scaled_coefficients) => {
            let predicted = &vandermonde * &scaled_coefficients;
            let coefficients: Vec<f64> = scaled_coefficients.iter().enumerate()
                .map(|(power, coefficient)| coefficient / scale.powi(power as i32))
                .collect();
            ModelFit {
                complexity:          candidate.complexity,
                residual_error:      rms(y.iter().zip(predicted.iter()).map(|(observed, predicted)| observed - predicted)),
                leading_coefficient: coefficients[candidate.degree].abs(),
                coefficients,
            }
        },
        // unsolvable: reported as a model that explains nothing, so it is never selected
        None => ModelFit {
            complexity:          candidate.complexity,
            residual_error:      f64::INFINITY,
            leading_coefficient: 0.0,
            coefficients:        vec![],
        },
    }
}

/// Solves `x * beta = y` in the least squares sense, trying progressively looser tolerances for near-singular systems
fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);
    for &tolerance in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tolerance) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }
    None
}

/// root-mean-square of the given residuals
fn rms(residuals: impl Iterator<Item=f64>) -> f64 {
    let (n, sum_of_squares) = residuals.fold((0_usize, 0.0_f64), |(n, sum), residual| (n + 1, sum + residual * residual));
    if n == 0 {
        return 0.0
    }
    (sum_of_squares / n as f64).sqrt()
}
