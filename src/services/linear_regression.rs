use ndarray::{Array1, Array2, Axis};

use crate::error::FitError;
use crate::models::FallbackModel;

/// Relative pivot size below which the normal equations count as singular.
const PIVOT_TOLERANCE: f64 = 1e-10;

/// Ordinary least squares with a fitted intercept.
///
/// Features and target are centered and each feature column is scaled to
/// unit norm, the normal equations `(XᵀX) w = Xᵀy` are solved for the
/// weights, and the intercept is recovered from the means.
pub fn fit_ols(features: &[Vec<f64>], target: &[f64]) -> Result<FallbackModel, FitError> {
    let n_samples = target.len();
    if features.len() != n_samples {
        return Err(FitError::LengthMismatch {
            features: features.len(),
            target: n_samples,
        });
    }

    let Some(first_row) = features.first() else {
        return Err(FitError::EmptyDataset);
    };

    let n_features = first_row.len();
    if n_features == 0 {
        return Err(FitError::NoFeatures);
    }

    if let Some((row, found)) = features
        .iter()
        .map(Vec::len)
        .enumerate()
        .find(|(_, width)| *width != n_features)
    {
        return Err(FitError::RaggedFeatures {
            row,
            expected: n_features,
            found,
        });
    }

    if n_samples < 2 {
        return Err(FitError::InsufficientSamples {
            samples: n_samples,
            required: 2,
        });
    }

    if let Some(row) = features
        .iter()
        .position(|row| row.iter().any(|v| !v.is_finite()))
    {
        return Err(FitError::NonFinite {
            location: format!("feature row {row}"),
        });
    }
    if let Some(index) = target.iter().position(|v| !v.is_finite()) {
        return Err(FitError::NonFinite {
            location: format!("target value {index}"),
        });
    }

    let x = Array2::from_shape_fn((n_samples, n_features), |(i, j)| features[i][j]);
    let y = Array1::from(target.to_vec());

    let x_mean = x.mean_axis(Axis(0)).ok_or(FitError::EmptyDataset)?;
    let y_mean = y.mean().ok_or(FitError::EmptyDataset)?;

    let x_centered = &x - &x_mean;
    let y_centered = &y - y_mean;

    // Unit-norm columns keep the pivot tolerance independent of feature scale
    let column_norms = x_centered.map_axis(Axis(0), |column| column.dot(&column).sqrt());
    if column_norms.iter().any(|norm| *norm == 0.0) {
        return Err(FitError::SingularMatrix);
    }
    let x_scaled = &x_centered / &column_norms;

    let gram = x_scaled.t().dot(&x_scaled);
    let moments = x_scaled.t().dot(&y_centered);

    let weights = solve(gram, moments)? / &column_norms;
    let intercept = y_mean - x_mean.dot(&weights);

    let predictions = x.dot(&weights) + intercept;
    let r_squared = coefficient_of_determination(&y, &predictions, y_mean);

    Ok(FallbackModel {
        coefficients: weights.to_vec(),
        intercept,
        r_squared,
        n_samples,
    })
}

/// Gaussian elimination with partial pivoting.
fn solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Result<Array1<f64>, FitError> {
    let n = b.len();
    let scale = a.diag().iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 {
        return Err(FitError::SingularMatrix);
    }
    let tolerance = scale * PIVOT_TOLERANCE;

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&r1, &r2| a[[r1, col]].abs().total_cmp(&a[[r2, col]].abs()))
            .unwrap_or(col);

        if a[[pivot_row, col]].abs() <= tolerance {
            return Err(FitError::SingularMatrix);
        }

        if pivot_row != col {
            for k in 0..n {
                a.swap([col, k], [pivot_row, k]);
            }
            b.swap(col, pivot_row);
        }

        for row in (col + 1)..n {
            let factor = a[[row, col]] / a[[col, col]];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                let delta = factor * a[[col, k]];
                a[[row, k]] -= delta;
            }
            let delta = factor * b[col];
            b[row] -= delta;
        }
    }

    let mut solution = Array1::<f64>::zeros(n);
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|k| a[[row, k]] * solution[k]).sum();
        solution[row] = (b[row] - tail) / a[[row, row]];
    }

    Ok(solution)
}

fn coefficient_of_determination(y: &Array1<f64>, predictions: &Array1<f64>, y_mean: f64) -> f64 {
    let ss_res: f64 = y
        .iter()
        .zip(predictions.iter())
        .map(|(actual, predicted)| (actual - predicted).powi(2))
        .sum();
    let ss_tot: f64 = y.iter().map(|actual| (actual - y_mean).powi(2)).sum();

    // Constant target: a perfect fit scores 1, anything else 0
    if ss_tot == 0.0 {
        return if ss_res <= f64::EPSILON { 1.0 } else { 0.0 };
    }

    1.0 - ss_res / ss_tot
}
