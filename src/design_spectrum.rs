//! Code-defined horizontal elastic design spectrum (TBDY 2018).
//!
//! Piecewise algebraic spectrum from the short-period and one-second
//! spectral design accelerations `SDS`/`SD1`, with the plateau between the
//! corner periods `TA = 0.2·SD1/SDS` and `TB = SD1/SDS`, a `1/T` branch up
//! to `TL = 6 s`, and a `1/T²` branch beyond.

use crate::error::{MotionError, MotionResult};
use serde::{Deserialize, Serialize};

/// Long-period transition, in s.
const TL: f64 = 6.0;

/// A design spectrum sampled over a period grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSpectrum {
    /// Period grid, in s.
    pub periods: Vec<f64>,
    /// Spectral acceleration per period, in g.
    pub spectrum: Vec<f64>,
}

/// Uniform period grid from `period_step` to `max_period` inclusive (the
/// final point is clamped onto `max_period`).
fn period_grid(period_step: f64, max_period: f64) -> Vec<f64> {
    let mut periods = Vec::new();
    let mut t = period_step;
    while t < max_period {
        periods.push(t);
        t += period_step;
    }
    if let Some(last) = periods.last_mut() {
        *last = max_period;
    }
    periods
}

/// Insert a period into an ascending grid if it is not already present,
/// directly after the last smaller entry.
fn insert_period(periods: &mut Vec<f64>, period: f64) {
    if periods.iter().any(|&p| p == period) {
        return;
    }
    let position = periods.iter().filter(|&&p| p < period).count();
    periods.insert(position, period);
}

/// Evaluate the TBDY 2018 design spectrum.
///
/// # Arguments
///
/// * `period_step` - Grid spacing, in s.
/// * `max_period` - Largest period of the grid, in s.
/// * `sds` - Short-period design spectral acceleration, in g.
/// * `sd1` - One-second design spectral acceleration, in g.
/// * `insert_corner_periods` - Add `TA` and `TB` to the grid when absent,
///   so the plateau corners are sampled exactly.
///
/// # Errors
///
/// [`MotionError::InvalidInput`] for non-positive step, a maximum period
/// not above the step, or non-positive design accelerations.
pub fn tbdy_2018(
    period_step: f64,
    max_period: f64,
    sds: f64,
    sd1: f64,
    insert_corner_periods: bool,
) -> MotionResult<DesignSpectrum> {
    if period_step <= 0.0 || !period_step.is_finite() {
        return Err(MotionError::invalid("period_step", "period step must be a positive number"));
    }
    if max_period <= period_step {
        return Err(MotionError::invalid(
            "max_period",
            "maximum period must exceed the period step",
        ));
    }
    if sds <= 0.0 || sd1 <= 0.0 {
        return Err(MotionError::invalid(
            "sds/sd1",
            "design spectral accelerations must be positive",
        ));
    }

    let ta = 0.2 * sd1 / sds;
    let tb = sd1 / sds;

    let mut periods = period_grid(period_step, max_period);
    if insert_corner_periods {
        insert_period(&mut periods, ta);
        insert_period(&mut periods, tb);
    }

    let spectrum = periods
        .iter()
        .map(|&t| {
            if t <= ta {
                (0.4 + 0.6 * t / ta) * sds
            } else if t <= tb {
                sds
            } else if t <= TL {
                sd1 / t
            } else {
                sd1 * TL / t.powi(2)
            }
        })
        .collect();

    Ok(DesignSpectrum { periods, spectrum })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plateau_level_and_corners() {
        let ds = tbdy_2018(0.01, 4.0, 1.0, 0.5, true).unwrap();
        // TA = 0.1, TB = 0.5 for SDS = 1, SD1 = 0.5.
        let at = |target: f64| {
            let i = crate::series::nearest_index(&ds.periods, target);
            (ds.periods[i], ds.spectrum[i])
        };
        let (ta, sa_ta) = at(0.1);
        assert_eq!(ta, 0.1);
        assert!((sa_ta - 1.0).abs() < 1e-12, "Sa(TA) = {}", sa_ta);

        let (tb, sa_tb) = at(0.5);
        assert_eq!(tb, 0.5);
        assert!((sa_tb - 1.0).abs() < 1e-12, "Sa(TB) = {}", sa_tb);

        let (_, sa_mid) = at(0.3);
        assert!((sa_mid - 1.0).abs() < 1e-12, "plateau {}", sa_mid);
    }

    #[test]
    fn test_descending_branch() {
        let ds = tbdy_2018(0.01, 4.0, 1.0, 0.5, false).unwrap();
        let i = crate::series::nearest_index(&ds.periods, 1.0);
        assert!((ds.spectrum[i] - 0.5).abs() < 0.01, "Sa(1.0) = {}", ds.spectrum[i]);
        let j = crate::series::nearest_index(&ds.periods, 2.0);
        assert!((ds.spectrum[j] - 0.25).abs() < 0.01, "Sa(2.0) = {}", ds.spectrum[j]);
    }

    #[test]
    fn test_long_period_branch() {
        let ds = tbdy_2018(0.1, 8.0, 1.0, 0.5, false).unwrap();
        let i = crate::series::nearest_index(&ds.periods, 8.0);
        let expected = 0.5 * 6.0 / 64.0;
        assert!(
            (ds.spectrum[i] - expected).abs() < 1e-6,
            "Sa(8.0) = {}",
            ds.spectrum[i]
        );
    }

    #[test]
    fn test_grid_ends_at_max_period() {
        let ds = tbdy_2018(0.03, 2.0, 1.0, 0.4, false).unwrap();
        assert_eq!(*ds.periods.last().unwrap(), 2.0);
        assert_eq!(ds.periods.len(), ds.spectrum.len());
    }

    #[test]
    fn test_corner_insertion() {
        // Step 0.3 never lands on TA = 0.08 or TB = 0.4.
        let ds = tbdy_2018(0.3, 3.0, 1.0, 0.4, true).unwrap();
        assert!(ds.periods.contains(&0.08000000000000002) || ds.periods.contains(&0.08));
        assert!(ds.periods.contains(&0.4));
        for w in ds.periods.windows(2) {
            assert!(w[0] < w[1], "grid not ascending: {:?}", w);
        }
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(tbdy_2018(0.0, 4.0, 1.0, 0.5, false).is_err());
        assert!(tbdy_2018(0.1, 0.05, 1.0, 0.5, false).is_err());
        assert!(tbdy_2018(0.1, 4.0, 0.0, 0.5, false).is_err());
        assert!(tbdy_2018(0.1, 4.0, 1.0, -0.5, false).is_err());
    }
}
