//! Fourier amplitude and power spectra of a motion record.
//!
//! One-sided spectrum over the first `n/2` bins: frequencies at `k·fs/n`,
//! amplitudes `|X(k)|·2/n`, and a power normalization against the record's
//! RMS level, `fa² / (π·T·a_rms²)`.

use crate::error::{MotionError, MotionResult};
use crate::series::cumtrapz;
use rustfft::{num_complex::Complex64, FftPlanner};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// One-sided Fourier spectrum of a uniformly sampled record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FourierSpectrum {
    /// Bin frequencies, in the reciprocal unit of the time step.
    pub frequencies: Vec<f64>,
    /// Fourier amplitudes per bin.
    pub amplitudes: Vec<f64>,
    /// Amplitudes normalized to power density, `fa² / (π·T·a_rms²)`.
    pub power_amplitudes: Vec<f64>,
}

/// Compute the one-sided Fourier spectrum of `data` sampled every
/// `time_step`.
///
/// # Errors
///
/// [`MotionError::InvalidInput`] for a record shorter than two samples or a
/// non-positive time step.
pub fn fourier_spectrum(data: &[f64], time_step: f64) -> MotionResult<FourierSpectrum> {
    if data.len() < 2 {
        return Err(MotionError::invalid(
            "data",
            "record must contain at least two samples",
        ));
    }
    if time_step <= 0.0 || !time_step.is_finite() {
        return Err(MotionError::invalid("time_step", "time step must be a positive number"));
    }

    let n = data.len();
    let mut buffer: Vec<Complex64> = data.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(n).process(&mut buffer);

    let half = n / 2;
    let sample_rate = 1.0 / time_step;
    let frequencies: Vec<f64> = (0..half).map(|k| k as f64 * sample_rate / n as f64).collect();
    let amplitudes: Vec<f64> = buffer[..half]
        .iter()
        .map(|c| c.norm() * 2.0 / n as f64)
        .collect();

    let total_time = n as f64 * time_step;
    let squared: Vec<f64> = data.iter().map(|&x| x * x).collect();
    let energy = cumtrapz(&squared, time_step, 0.0)
        .last()
        .copied()
        .unwrap_or(0.0);
    let rms = (energy / total_time).sqrt();
    let power_scale = PI * total_time * rms * rms;
    let power_amplitudes: Vec<f64> = amplitudes
        .iter()
        .map(|&fa| fa * fa / power_scale)
        .collect();

    Ok(FourierSpectrum {
        frequencies,
        amplitudes,
        power_amplitudes,
    })
}
