//! Polynomial baseline correction.
//!
//! Fits a polynomial of the requested order to the signal over its time
//! axis by least squares and subtracts the fitted trend, removing
//! instrument drift before further processing.

use crate::error::{MotionError, MotionResult};

/// Remove a polynomial baseline of the given order from `signal`.
///
/// # Arguments
///
/// * `signal` - Samples to correct.
/// * `times` - Time value per sample; must match `signal` in length.
/// * `order` - Polynomial order of the trend (at least 1).
///
/// # Errors
///
/// [`MotionError::InvalidInput`] for mismatched lengths, an empty signal,
/// or a zero order; [`MotionError::NumericDegeneracy`] if the normal
/// equations are singular (e.g. all time values identical).
pub fn baseline_correction(signal: &[f64], times: &[f64], order: usize) -> MotionResult<Vec<f64>> {
    if signal.len() != times.len() {
        return Err(MotionError::invalid(
            "signal/times",
            "signal and time vectors must be of equal length",
        ));
    }
    if signal.is_empty() {
        return Err(MotionError::invalid("signal", "signal is empty"));
    }
    if order < 1 {
        return Err(MotionError::invalid("order", "order must be at least 1"));
    }

    let coeffs = polyfit(times, signal, order)?;
    let corrected = signal
        .iter()
        .zip(times.iter())
        .map(|(&y, &t)| y - polyval(&coeffs, t))
        .collect();
    Ok(corrected)
}

/// Least-squares polynomial fit, lowest power first.
///
/// Solves the normal equations of the Vandermonde system by Gaussian
/// elimination with partial pivoting; the system is small (`order + 1`
/// unknowns), so dense elimination is appropriate.
fn polyfit(x: &[f64], y: &[f64], order: usize) -> MotionResult<Vec<f64>> {
    let terms = order + 1;

    // Normal equations: (VᵀV)·c = Vᵀy with V the Vandermonde matrix.
    let mut matrix = vec![vec![0.0_f64; terms]; terms];
    let mut rhs = vec![0.0_f64; terms];
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let mut power_i = 1.0;
        for row in 0..terms {
            rhs[row] += power_i * yi;
            let mut power_j = power_i;
            for col in 0..terms {
                matrix[row][col] += power_j;
                power_j *= xi;
            }
            power_i *= xi;
        }
    }

    solve(matrix, rhs)
}

/// Evaluate a polynomial given lowest-power-first coefficients.
fn polyval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Gaussian elimination with partial pivoting.
fn solve(mut matrix: Vec<Vec<f64>>, mut rhs: Vec<f64>) -> MotionResult<Vec<f64>> {
    let n = rhs.len();

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&r1, &r2| {
                matrix[r1][col]
                    .abs()
                    .partial_cmp(&matrix[r2][col].abs())
                    .unwrap()
            })
            .unwrap();
        if matrix[pivot_row][col].abs() < 1e-12 {
            return Err(MotionError::NumericDegeneracy(
                "baseline fit is singular; time axis lacks independent values".into(),
            ));
        }
        matrix.swap(col, pivot_row);
        rhs.swap(col, pivot_row);

        for row in col + 1..n {
            let ratio = matrix[row][col] / matrix[col][col];
            for k in col..n {
                matrix[row][k] -= ratio * matrix[col][k];
            }
            rhs[row] -= ratio * rhs[col];
        }
    }

    let mut solution = vec![0.0_f64; n];
    for row in (0..n).rev() {
        let mut acc = rhs[row];
        for col in row + 1..n {
            acc -= matrix[row][col] * solution[col];
        }
        solution[row] = acc / matrix[row][row];
    }
    Ok(solution)
}
