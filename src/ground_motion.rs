//! Scalar ground-motion parameters of a processed record.
//!
//! Reduces a prepared [`MotionData`] and its [`ResponseSpectra`] to the
//! standard engineering intensity measures: peak values and their times,
//! energy integrals (Arias intensity, specific energy density, cumulative
//! absolute velocity), spectrum intensities (Housner, ASI, VSI), duration
//! measures (uniform, bracketed, significant), RMS levels, and the
//! period-domain descriptors (predominant and mean period).
//!
//! The effective design acceleration runs the record through the filter
//! pipeline; its corner frequency and order are configurable via
//! [`GmpConfig`] rather than fixed constants.

use crate::error::{MotionError, MotionResult};
use crate::filter::{apply, BandType, FilterFamily, FilterSpec};
use crate::fourier::fourier_spectrum;
use crate::motion::MotionData;
use crate::response_spectrum::ResponseSpectra;
use crate::series::{argmax, argmax_abs, cumtrapz, max_abs, round_to};
use serde::{Deserialize, Serialize};

/// Standard gravity, in m/s².
const GRAVITY: f64 = 9.81;

/// Configuration for the parameters that run a filter design internally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GmpConfig {
    /// Low-pass corner for the effective design acceleration, in Hz.
    pub eda_corner_frequency: f64,
    /// Filter order for the effective design acceleration.
    pub eda_filter_order: usize,
}

impl Default for GmpConfig {
    fn default() -> Self {
        Self {
            eda_corner_frequency: 9.0,
            eda_filter_order: 1,
        }
    }
}

/// The full set of scalar ground-motion parameters.
///
/// Peak values carry the units of the underlying history (g, cm/s, cm);
/// energy and intensity measures follow the conventional mixed units noted
/// per field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundMotionSummary {
    /// Peak ground acceleration, in g, and its time of occurrence, in s.
    pub pga: f64,
    pub pga_time: f64,
    /// Peak ground velocity, in cm/s, and its time, in s.
    pub pgv: f64,
    pub pgv_time: f64,
    /// Peak ground displacement, in cm, and its time, in s.
    pub pgd: f64,
    pub pgd_time: f64,
    /// Integral of pseudo-velocity over periods 0.1-2.5 s, in cm.
    pub housner_intensity: f64,
    /// Third-largest absolute acceleration, in g.
    pub sustained_max_acceleration: f64,
    /// Third-largest absolute velocity, in cm/s.
    pub sustained_max_velocity: f64,
    /// Peak of the low-pass filtered absolute acceleration, in g.
    pub effective_design_acceleration: f64,
    /// Integral of spectral acceleration over periods 0.1-0.5 s, in g·s.
    pub acceleration_spectrum_intensity: f64,
    /// Integral of spectral velocity over periods 0.1-2.5 s, in cm.
    pub velocity_spectrum_intensity: f64,
    /// Acceleration level exceeded by 5 % of the record energy, in g.
    pub a95: f64,
    /// Period of the spectral-acceleration peak, in s.
    pub predominant_period: f64,
    /// Fourier-weighted mean period over 0.25-20 Hz, in s.
    pub mean_period: f64,
    /// Total time the squared acceleration exceeds (0.05·PGA)², in s.
    pub uniform_duration: f64,
    /// Span between the first and last threshold exceedance, in s.
    pub bracketed_duration: f64,
    /// Span between 5 % and 95 % of the normalized Arias build-up, in s.
    pub significant_duration: f64,
    /// Arias intensity, in m/s, and its running build-up.
    pub arias_intensity: f64,
    pub arias_intensity_series: Vec<f64>,
    /// RMS levels over the full duration.
    pub rms_acceleration: f64,
    pub rms_velocity: f64,
    pub rms_displacement: f64,
    /// `a_rms^1.5 · sqrt(duration)`.
    pub characteristic_intensity: f64,
    /// Integral of squared velocity, in cm²/s, and its running build-up.
    pub specific_energy_density: f64,
    pub specific_energy_density_series: Vec<f64>,
    /// Integral of absolute acceleration, converted to cm/s.
    pub cumulative_absolute_velocity: f64,
}

impl GroundMotionSummary {
    /// Compute every parameter from a prepared motion record and its
    /// response spectra.
    ///
    /// # Errors
    ///
    /// [`MotionError::InvalidInput`] when the record is too short for the
    /// order statistics (fewer than three samples) or when a period/
    /// frequency window required by a spectrum intensity is absent from the
    /// inputs; any filter-pipeline error from the effective design
    /// acceleration.
    pub fn compute(
        motion: &MotionData,
        spectra: &ResponseSpectra,
        config: &GmpConfig,
    ) -> MotionResult<Self> {
        if motion.len() < 3 {
            return Err(MotionError::invalid(
                "motion",
                "record must contain at least three samples",
            ));
        }

        let (arias_intensity, arias_intensity_series) = arias(motion);
        let (pga, pga_time) = peak_with_time(&motion.accelerations, &motion.times);
        let (pgv, pgv_time) = peak_with_time(&motion.velocities, &motion.times);
        let (pgd, pgd_time) = peak_with_time(&motion.displacements, &motion.times);

        let rms_acceleration = rms(&motion.accelerations, motion.time_step, motion.duration());
        let rms_velocity = rms(&motion.velocities, motion.time_step, motion.duration());
        let rms_displacement = rms(&motion.displacements, motion.time_step, motion.duration());

        let sed_series = cumtrapz(
            &motion.velocities.iter().map(|&v| v * v).collect::<Vec<_>>(),
            motion.time_step,
            0.0,
        );
        let specific_energy_density = *sed_series.last().unwrap_or(&0.0);

        Ok(Self {
            pga,
            pga_time,
            pgv,
            pgv_time,
            pgd,
            pgd_time,
            housner_intensity: spectrum_intensity(
                &spectra.periods,
                &spectra.pseudo_velocities,
                0.1,
                2.5,
            )?,
            sustained_max_acceleration: sustained_max(&motion.accelerations)?,
            sustained_max_velocity: sustained_max(&motion.velocities)?,
            effective_design_acceleration: effective_design_acceleration(motion, config)?,
            acceleration_spectrum_intensity: spectrum_intensity(
                &spectra.periods,
                &spectra.spectral_accelerations,
                0.1,
                0.5,
            )?,
            velocity_spectrum_intensity: spectrum_intensity(
                &spectra.periods,
                &spectra.spectral_velocities,
                0.1,
                2.5,
            )?,
            a95: a95(&motion.accelerations, motion.time_step),
            predominant_period: spectra.periods[argmax(&spectra.spectral_accelerations)],
            mean_period: mean_period(motion)?,
            uniform_duration: uniform_duration(&motion.accelerations, motion.time_step),
            bracketed_duration: bracketed_duration(motion)?,
            significant_duration: significant_duration(&arias_intensity_series, &motion.times)?,
            arias_intensity,
            arias_intensity_series,
            rms_acceleration,
            rms_velocity,
            rms_displacement,
            characteristic_intensity: rms_acceleration.powf(1.5) * motion.duration().sqrt(),
            specific_energy_density,
            specific_energy_density_series: sed_series,
            cumulative_absolute_velocity: cav(&motion.accelerations, motion.time_step),
        })
    }
}

/// Peak absolute value and the time it occurs.
fn peak_with_time(values: &[f64], times: &[f64]) -> (f64, f64) {
    let index = argmax_abs(values);
    (max_abs(values), times[index])
}

/// RMS over the full duration: `sqrt(∫x²dt / duration)`.
fn rms(values: &[f64], dt: f64, duration: f64) -> f64 {
    let squared: Vec<f64> = values.iter().map(|&x| x * x).collect();
    let energy = cumtrapz(&squared, dt, 0.0).last().copied().unwrap_or(0.0);
    (energy / duration).sqrt()
}

/// Third-largest absolute value of the record.
fn sustained_max(values: &[f64]) -> MotionResult<f64> {
    if values.len() < 3 {
        return Err(MotionError::invalid(
            "record",
            "sustained maxima need at least three samples",
        ));
    }
    let mut sorted: Vec<f64> = values.iter().map(|v| v.abs()).collect();
    sorted.sort_by(|x, y| x.partial_cmp(y).unwrap());
    Ok(sorted[sorted.len() - 3])
}

/// Peak of the low-pass filtered absolute acceleration.
fn effective_design_acceleration(motion: &MotionData, config: &GmpConfig) -> MotionResult<f64> {
    let rectified: Vec<f64> = motion.accelerations.iter().map(|a| a.abs()).collect();
    let spec = FilterSpec {
        family: FilterFamily::Butterworth,
        band: BandType::Lowpass,
        order: config.eda_filter_order,
        corner_freqs: vec![config.eda_corner_frequency],
        time_step: motion.time_step,
    };
    let filtered = apply(&rectified, &spec)?;
    Ok(max_abs(&filtered))
}

/// Trapezoidal integral of a spectral quantity between two periods
/// (inclusive of the window start, exclusive of the final matching sample,
/// using the period grid's own spacing).
fn spectrum_intensity(periods: &[f64], values: &[f64], lo: f64, hi: f64) -> MotionResult<f64> {
    if periods.len() < 3 {
        return Err(MotionError::invalid(
            "periods",
            "spectrum intensities need at least three periods",
        ));
    }
    let dx = periods[2] - periods[1];
    let matching: Vec<usize> = (0..periods.len())
        .filter(|&i| {
            let p = round_to(periods[i], 2);
            p >= lo && p <= hi
        })
        .collect();
    let (first, last) = match (matching.first(), matching.last()) {
        (Some(&first), Some(&last)) if first < last => (first, last),
        _ => {
            return Err(MotionError::invalid(
                "periods",
                "period grid does not cover the intensity window",
            ))
        }
    };
    let window = &values[first..last];
    Ok(cumtrapz(window, dx, 0.0).last().copied().unwrap_or(0.0))
}

/// Arias intensity: `(π/2g)·∫a(t)²dt` with acceleration in m/s².
fn arias(motion: &MotionData) -> (f64, Vec<f64>) {
    let squared: Vec<f64> = motion
        .accelerations
        .iter()
        .map(|&a| (a * GRAVITY).powi(2))
        .collect();
    let series: Vec<f64> = cumtrapz(&squared, motion.time_step, 0.0)
        .iter()
        .map(|&v| v * (std::f64::consts::PI * 0.5 / GRAVITY))
        .collect();
    let total = series.last().copied().unwrap_or(0.0);
    (total, series)
}

/// Acceleration level below which 95 % of the record energy accumulates.
///
/// Bisects on the clipping level until the excluded energy fraction is
/// within 0.01 of 5 %, with at least 100 halvings so the bracket is fully
/// resolved.
fn a95(accelerations: &[f64], dt: f64) -> f64 {
    let squared: Vec<f64> = accelerations.iter().map(|&a| a * a).collect();
    let total = cumtrapz(&squared, dt, 0.0).last().copied().unwrap_or(0.0);
    if total == 0.0 {
        return 0.0;
    }

    let residual = |level: f64| -> f64 {
        let clipped: Vec<f64> = squared.iter().map(|&x| x.min(level).max(0.0)).collect();
        let kept = cumtrapz(&clipped, dt, 0.0).last().copied().unwrap_or(0.0);
        (total - kept) / total - 0.05
    };

    let mut lo = 0.0_f64;
    let mut hi = squared.iter().fold(0.0_f64, |m, &x| m.max(x));
    let mut level = (lo + hi) / 2.0;
    let mut n = 0;
    while (residual(level).abs() > 0.01 || n < 100) && n < 10_000 {
        n += 1;
        if residual(level) > 0.0 {
            lo = level;
        } else {
            hi = level;
        }
        level = (lo + hi) / 2.0;
    }
    level.sqrt()
}

/// Fourier-amplitude-weighted mean period over 0.25-20 Hz.
fn mean_period(motion: &MotionData) -> MotionResult<f64> {
    let spectrum = fourier_spectrum(&motion.accelerations, motion.time_step)?;
    let mut weighted = 0.0;
    let mut total = 0.0;
    for (i, &f) in spectrum.frequencies.iter().enumerate() {
        if (0.25..=20.0).contains(&f) {
            let fa2 = spectrum.amplitudes[i] * spectrum.amplitudes[i];
            weighted += fa2 / f;
            total += fa2;
        }
    }
    if total == 0.0 {
        return Err(MotionError::invalid(
            "motion",
            "record has no Fourier content between 0.25 and 20 Hz",
        ));
    }
    Ok(weighted / total)
}

/// Total time the squared acceleration exceeds (0.05·PGA)².
fn uniform_duration(accelerations: &[f64], dt: f64) -> f64 {
    let threshold = max_abs(accelerations) * 0.05;
    let threshold2 = threshold * threshold;
    let count = accelerations.iter().filter(|a| *a * *a > threshold2).count();
    dt * count as f64
}

/// Span between first and last exceedance of the 5 % PGA threshold, plus
/// one sample interval.
fn bracketed_duration(motion: &MotionData) -> MotionResult<f64> {
    let threshold = max_abs(&motion.accelerations) * 0.05;
    let threshold2 = threshold * threshold;
    let matching: Vec<usize> = (0..motion.accelerations.len())
        .filter(|&i| motion.accelerations[i] * motion.accelerations[i] >= threshold2)
        .collect();
    match (matching.first(), matching.last()) {
        (Some(&first), Some(&last)) => {
            Ok(motion.time_step + motion.times[last] - motion.times[first])
        }
        _ => Err(MotionError::invalid(
            "motion",
            "record never exceeds the bracketed-duration threshold",
        )),
    }
}

/// Span between the 5 % and 95 % points of the normalized Arias build-up.
fn significant_duration(arias_series: &[f64], times: &[f64]) -> MotionResult<f64> {
    let peak = arias_series.iter().fold(0.0_f64, |m, &v| m.max(v));
    if peak == 0.0 {
        return Err(MotionError::invalid(
            "motion",
            "record carries no energy; significant duration undefined",
        ));
    }
    let matching: Vec<usize> = (0..arias_series.len())
        .filter(|&i| {
            let pct = round_to(arias_series[i] * 100.0 / peak, 2);
            (5.0..=95.0).contains(&pct)
        })
        .collect();
    match (matching.first(), matching.last()) {
        (Some(&first), Some(&last)) => Ok(times[last] - times[first]),
        _ => Err(MotionError::invalid(
            "motion",
            "Arias build-up never crosses the 5-95 % window",
        )),
    }
}

/// Cumulative absolute velocity: `∫|a(t)|dt` converted to cm/s.
fn cav(accelerations: &[f64], dt: f64) -> f64 {
    let rectified: Vec<f64> = accelerations.iter().map(|a| a.abs()).collect();
    let integral = cumtrapz(&rectified, dt, 0.0).last().copied().unwrap_or(0.0);
    integral * 100.0 * GRAVITY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::AccelerationUnit;
    use crate::response_spectrum::ResponseSpectrumEngine;
    use std::f64::consts::PI;

    /// A tapered two-tone record long enough for every parameter.
    fn test_motion() -> MotionData {
        let dt = 0.01;
        let n = 2000;
        let raw: Vec<f64> = (0..n)
            .map(|i| {
                let t = i as f64 * dt;
                let envelope = (-((t - 10.0) / 5.0).powi(2)).exp();
                envelope * (0.15 * (2.0 * PI * 1.5 * t).sin() + 0.05 * (2.0 * PI * 6.0 * t).sin())
            })
            .collect();
        MotionData::from_acceleration(&raw, AccelerationUnit::G, dt).unwrap()
    }

    fn test_spectra(motion: &MotionData) -> ResponseSpectra {
        let periods: Vec<f64> = (1..=60).map(|i| i as f64 * 0.05).collect();
        ResponseSpectrumEngine::new(0.05)
            .unwrap()
            .compute(&motion.accelerations, motion.time_step, &periods)
            .unwrap()
    }

    #[test]
    fn test_summary_peak_values() {
        let motion = test_motion();
        let spectra = test_spectra(&motion);
        let summary =
            GroundMotionSummary::compute(&motion, &spectra, &GmpConfig::default()).unwrap();

        assert!((summary.pga - max_abs(&motion.accelerations)).abs() < 1e-15);
        assert!((summary.pgv - max_abs(&motion.velocities)).abs() < 1e-12);
        assert!((summary.pgd - max_abs(&motion.displacements)).abs() < 1e-12);
        assert!(summary.pga_time > 0.0 && summary.pga_time <= motion.duration());

        // The record's energy concentrates around t = 10 s.
        assert!((summary.pga_time - 10.0).abs() < 3.0, "pga at {}", summary.pga_time);
    }

    #[test]
    fn test_summary_energy_measures() {
        let motion = test_motion();
        let spectra = test_spectra(&motion);
        let summary =
            GroundMotionSummary::compute(&motion, &spectra, &GmpConfig::default()).unwrap();

        assert!(summary.arias_intensity > 0.0);
        assert_eq!(summary.arias_intensity_series.len(), motion.len());
        // The build-up is monotone.
        for w in summary.arias_intensity_series.windows(2) {
            assert!(w[1] >= w[0]);
        }
        assert!(summary.cumulative_absolute_velocity > 0.0);
        assert!(summary.specific_energy_density > 0.0);
        assert!(summary.rms_acceleration > 0.0);
        assert!(summary.characteristic_intensity > 0.0);
    }

    #[test]
    fn test_summary_durations() {
        let motion = test_motion();
        let spectra = test_spectra(&motion);
        let summary =
            GroundMotionSummary::compute(&motion, &spectra, &GmpConfig::default()).unwrap();

        assert!(summary.uniform_duration > 0.0);
        assert!(summary.uniform_duration <= motion.duration());
        assert!(summary.bracketed_duration > 0.0);
        assert!(summary.significant_duration > 0.0);
        assert!(summary.significant_duration <= summary.bracketed_duration + motion.time_step);
    }

    #[test]
    fn test_summary_spectrum_derived_values() {
        let motion = test_motion();
        let spectra = test_spectra(&motion);
        let summary =
            GroundMotionSummary::compute(&motion, &spectra, &GmpConfig::default()).unwrap();

        assert!(summary.housner_intensity > 0.0);
        assert!(summary.acceleration_spectrum_intensity > 0.0);
        assert!(summary.velocity_spectrum_intensity > 0.0);
        // The 1.5 Hz tone dominates; its period is 0.667 s.
        assert!(
            summary.predominant_period > 0.3 && summary.predominant_period < 1.2,
            "predominant period {}",
            summary.predominant_period
        );
        assert!(summary.mean_period > 0.0);
    }

    #[test]
    fn test_a95_below_pga() {
        let motion = test_motion();
        let spectra = test_spectra(&motion);
        let summary =
            GroundMotionSummary::compute(&motion, &spectra, &GmpConfig::default()).unwrap();
        assert!(summary.a95 > 0.0);
        assert!(summary.a95 <= summary.pga);
    }

    #[test]
    fn test_effective_design_acceleration_tracks_pga_for_low_frequency_motion() {
        let motion = test_motion();
        let spectra = test_spectra(&motion);
        let summary =
            GroundMotionSummary::compute(&motion, &spectra, &GmpConfig::default()).unwrap();
        // A 9 Hz low-pass barely touches a record whose content is below 6 Hz.
        assert!(
            summary.effective_design_acceleration > 0.5 * summary.pga,
            "eda = {}, pga = {}",
            summary.effective_design_acceleration,
            summary.pga
        );
        assert!(summary.effective_design_acceleration <= 1.5 * summary.pga);
    }

    #[test]
    fn test_sustained_max_is_third_largest() {
        let values = vec![0.1, -0.9, 0.5, 0.7, -0.3];
        assert_eq!(sustained_max(&values).unwrap(), 0.5);
        assert!(sustained_max(&[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_config_controls_eda_filter() {
        let motion = test_motion();
        let tight = GmpConfig {
            eda_corner_frequency: 0.5,
            eda_filter_order: 2,
        };
        let loose = GmpConfig::default();
        let eda_tight = effective_design_acceleration(&motion, &tight).unwrap();
        let eda_loose = effective_design_acceleration(&motion, &loose).unwrap();
        assert!(
            eda_tight < eda_loose,
            "tight {} should pass less than loose {}",
            eda_tight,
            eda_loose
        );
    }

    #[test]
    fn test_short_record_rejected() {
        let motion = MotionData::from_acceleration(&[0.1, 0.2], AccelerationUnit::G, 0.01).unwrap();
        let spectra = test_spectra(&test_motion());
        assert!(GroundMotionSummary::compute(&motion, &spectra, &GmpConfig::default()).is_err());
    }
}
