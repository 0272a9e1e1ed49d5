//! Scale factors matching response spectra to a target spectrum.
//!
//! Three conventions: least-squares over a period range, envelope over a
//! period range (every ordinate ends up at or above the target), and exact
//! match at a single period. Each takes a set of candidate spectra and
//! returns one factor per spectrum.

use crate::error::{MotionError, MotionResult};
use crate::series::{nearest_index, round_to};

/// Check that `period` matches a grid entry to three decimals.
fn period_on_grid(periods: &[f64], period: f64) -> bool {
    let target = round_to(period, 3);
    periods.iter().any(|&p| round_to(p, 3) == target)
}

/// Least-squares scale factors over `[min_period, max_period]`.
///
/// Minimizes the squared error between the scaled spectrum and the target:
/// `factor = Σ(target·response) / Σ(response²)` over the window.
///
/// # Errors
///
/// [`MotionError::InvalidInput`] when either window bound is not on the
/// period grid.
pub fn scale_by_mse(
    periods: &[f64],
    target_spectrum: &[f64],
    spectral_accelerations: &[Vec<f64>],
    min_period: f64,
    max_period: f64,
) -> MotionResult<Vec<f64>> {
    let (lo, hi) = scaling_window(periods, min_period, max_period)?;
    let factors = spectral_accelerations
        .iter()
        .map(|response| {
            let mut cross = 0.0;
            let mut power = 0.0;
            for i in lo..=hi {
                cross += target_spectrum[i] * response[i];
                power += response[i] * response[i];
            }
            cross / power
        })
        .collect();
    Ok(factors)
}

/// Envelope scale factors over `[min_period, max_period]`: the smallest
/// factor putting every windowed ordinate at or above the target.
pub fn scale_by_period_range(
    periods: &[f64],
    target_spectrum: &[f64],
    spectral_accelerations: &[Vec<f64>],
    min_period: f64,
    max_period: f64,
) -> MotionResult<Vec<f64>> {
    let (lo, hi) = scaling_window(periods, min_period, max_period)?;
    let factors = spectral_accelerations
        .iter()
        .map(|response| {
            (lo..=hi)
                .map(|i| target_spectrum[i] / response[i])
                .fold(f64::NEG_INFINITY, f64::max)
        })
        .collect();
    Ok(factors)
}

/// Scale factors matching the target exactly at one period.
pub fn scale_by_single_period(
    periods: &[f64],
    target_spectrum: &[f64],
    spectral_accelerations: &[Vec<f64>],
    scaling_period: f64,
) -> MotionResult<Vec<f64>> {
    if !period_on_grid(periods, scaling_period) {
        return Err(MotionError::invalid(
            "scaling_period",
            "scaling period must be in the period list",
        ));
    }
    let index = nearest_index(periods, scaling_period);
    let factors = spectral_accelerations
        .iter()
        .map(|response| target_spectrum[index] / response[index])
        .collect();
    Ok(factors)
}

/// Resolve a `[min_period, max_period]` window to grid indices.
fn scaling_window(
    periods: &[f64],
    min_period: f64,
    max_period: f64,
) -> MotionResult<(usize, usize)> {
    if !period_on_grid(periods, min_period) || !period_on_grid(periods, max_period) {
        return Err(MotionError::invalid(
            "scaling_period",
            "scaling periods must be in the period list",
        ));
    }
    Ok((
        nearest_index(periods, min_period),
        nearest_index(periods, max_period),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Vec<f64> {
        (1..=10).map(|i| i as f64 * 0.1).collect()
    }

    #[test]
    fn test_scale_by_mse_uniform_spectra() {
        let periods = grid();
        let target = vec![2.0; 10];
        let responses = vec![vec![1.0; 10], vec![4.0; 10]];
        let factors = scale_by_mse(&periods, &target, &responses, 0.2, 0.8).unwrap();
        assert!((factors[0] - 2.0).abs() < 1e-12);
        assert!((factors[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_scale_by_period_range_envelopes_target() {
        let periods = grid();
        let target = vec![1.0; 10];
        // Response dips to 0.25 at one period inside the window.
        let mut response = vec![0.5; 10];
        response[4] = 0.25;
        let factors =
            scale_by_period_range(&periods, &target, &[response.clone()], 0.2, 0.8).unwrap();
        assert!((factors[0] - 4.0).abs() < 1e-12);
        for (i, &r) in response.iter().enumerate().take(9).skip(1) {
            assert!(r * factors[0] >= target[i] - 1e-12);
        }
    }

    #[test]
    fn test_scale_by_single_period() {
        let periods = grid();
        let target = vec![3.0; 10];
        let responses = vec![vec![1.5; 10]];
        let factors = scale_by_single_period(&periods, &target, &responses, 0.5).unwrap();
        assert!((factors[0] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_off_grid_period_rejected() {
        let periods = grid();
        let target = vec![1.0; 10];
        let responses = vec![vec![1.0; 10]];
        assert!(scale_by_single_period(&periods, &target, &responses, 0.123).is_err());
        assert!(scale_by_mse(&periods, &target, &responses, 0.05, 0.8).is_err());
        assert!(scale_by_period_range(&periods, &target, &responses, 0.2, 1.7).is_err());
    }

    #[test]
    fn test_rounded_membership_tolerates_grid_noise() {
        // 0.30000000000000004-style accumulation still counts as 0.3.
        let periods: Vec<f64> = (1..=10).map(|i| i as f64 * 0.1 + 1e-14).collect();
        let target = vec![1.0; 10];
        let responses = vec![vec![2.0; 10]];
        let factors = scale_by_single_period(&periods, &target, &responses, 0.3).unwrap();
        assert!((factors[0] - 0.5).abs() < 1e-12);
    }
}
