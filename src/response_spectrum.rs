//! Elastic response spectra by piecewise-exact SDOF integration.
//!
//! For every requested natural period, a single-degree-of-freedom oscillator
//! is driven by the acceleration record and integrated with the
//! Nigam-Jennings recursion: the closed-form solution of the damped SDOF
//! equation for an excitation that is linear between samples. The recursion
//! is exact per step, so accuracy does not depend on the time step being
//! small relative to the oscillator period.
//!
//! Computation is independent across periods and strictly sequential along
//! the time axis. With the `parallel` feature enabled the period sweep fans
//! out over a rayon thread pool and merges back in request order; either
//! path honors a cooperative cancellation flag checked once per period.
//!
//! ## Example
//!
//! ```rust
//! use strong_motion::response_spectrum::ResponseSpectrumEngine;
//!
//! let engine = ResponseSpectrumEngine::new(0.05).unwrap();
//! let record: Vec<f64> = (0..200).map(|i| (i as f64 * 0.3).sin() * 0.1).collect();
//! let periods = vec![0.1, 0.5, 1.0];
//! let spectra = engine.compute(&record, 0.01, &periods).unwrap();
//! assert_eq!(spectra.spectral_accelerations.len(), 3);
//! ```

use crate::error::{MotionError, MotionResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Conversion constant between g and cm/s².
pub const CM_PER_S2_PER_G: f64 = 981.0;

/// Substitute for a literal zero natural period, to keep `ω = 2π/T` finite.
const MIN_PERIOD: f64 = 1e-6;

/// One immutable snapshot of spectral ordinates, all indexed 1:1 with
/// `periods`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSpectra {
    /// Natural periods actually used (zero entries substituted), in s.
    pub periods: Vec<f64>,
    /// Peak absolute response acceleration, in g.
    pub spectral_accelerations: Vec<f64>,
    /// Peak relative velocity, in cm/s.
    pub spectral_velocities: Vec<f64>,
    /// Peak relative displacement, in cm.
    pub spectral_displacements: Vec<f64>,
    /// `ω²·Sd / 981`, in g.
    pub pseudo_accelerations: Vec<f64>,
    /// `ω·Sd`, in cm/s.
    pub pseudo_velocities: Vec<f64>,
}

/// Spectral ordinates for a single period, in the order they are pushed
/// into the result arrays.
type Ordinates = (f64, f64, f64, f64, f64);

/// Recursion constants for one oscillator, derived once per period.
#[derive(Debug, Clone, Copy)]
struct OscillatorCoeffs {
    omega: f64,
    omega2: f64,
    f1: f64,
    f2: f64,
    f4: f64,
    f5: f64,
    f6: f64,
    g1: f64,
    g2: f64,
    h1: f64,
    h2: f64,
}

impl OscillatorCoeffs {
    fn new(period: f64, damping: f64, dt: f64) -> Self {
        let omega = 2.0 * PI / period;
        let omega2 = omega.powi(2);
        let omega3 = omega.powi(3);
        let omega_d = omega * (1.0 - damping * damping).sqrt();

        let f1 = 2.0 * damping / dt / omega3;
        let f2 = 1.0 / omega2;
        let f3 = omega * damping;
        let f4 = 1.0 / omega_d;
        let f5 = f3 * f4;
        let f6 = f3 * 2.0;
        let e = (f3 * -dt).exp();
        let s = (omega_d * dt).sin();
        let c = (omega_d * dt).cos();
        let g1 = e * s;
        let g2 = e * c;
        let h1 = omega_d * g2 - f3 * g1;
        let h2 = omega_d * g1 + f3 * g2;

        Self {
            omega,
            omega2,
            f1,
            f2,
            f4,
            f5,
            f6,
            g1,
            g2,
            h1,
            h2,
        }
    }
}

/// Peak absolute values of the three response histories.
#[derive(Debug, Clone, Copy, Default)]
struct PeakResponse {
    xd: f64,
    xv: f64,
    xa: f64,
}

/// Advance the oscillator over every consecutive sample pair and track the
/// response peaks.
///
/// The term grouping below fixes the floating-point evaluation order; it is
/// part of the numeric contract and must not be reassociated.
fn integrate_oscillator(co: &OscillatorCoeffs, acc: &[f64], dt: f64) -> PeakResponse {
    let mut peaks = PeakResponse::default();
    let mut xd_prev = 0.0;
    let mut xv_prev = 0.0;

    for i in 0..acc.len() - 1 {
        let dug = acc[i + 1] - acc[i];
        let z1 = co.f2 * dug;
        let z2 = co.f2 * acc[i];
        let z3 = co.f1 * dug;
        let z4 = z1 / dt;

        let b;
        let a;
        if i == 0 {
            b = z2 - z3;
            a = co.f5 * b + co.f4 * z4;
        } else {
            b = xd_prev + (z2 - z3);
            a = (co.f5 * b + co.f4 * z4) + co.f4 * xv_prev;
        }

        let xd = a * co.g1 + (b * co.g2 + (z3 - (z1 + z2)));
        let xv = a * co.h1 - (b * co.h2 + z4);
        let xa = -(co.f6 * xv + co.omega2 * xd);

        peaks.xd = peaks.xd.max(xd.abs());
        peaks.xv = peaks.xv.max(xv.abs());
        peaks.xa = peaks.xa.max(xa.abs());

        xd_prev = xd;
        xv_prev = xv;
    }

    peaks
}

/// Sweeps an SDOF oscillator across natural periods and reduces the exact
/// response histories to spectral ordinates.
#[derive(Debug, Clone)]
pub struct ResponseSpectrumEngine {
    damping: f64,
}

impl ResponseSpectrumEngine {
    /// Create an engine for the given damping ratio.
    ///
    /// # Errors
    ///
    /// [`MotionError::NumericDegeneracy`] unless `0 < damping < 1`; at the
    /// boundaries the damped frequency degenerates and the recursion is
    /// undefined.
    pub fn new(damping: f64) -> MotionResult<Self> {
        if !damping.is_finite() || damping <= 0.0 || damping >= 1.0 {
            return Err(MotionError::NumericDegeneracy(format!(
                "damping ratio must lie strictly between 0 and 1, got {}",
                damping
            )));
        }
        Ok(Self { damping })
    }

    /// Damping ratio this engine was built with.
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Compute response spectra for an acceleration record.
    ///
    /// # Arguments
    ///
    /// * `accelerations` - Record in g, at least two samples.
    /// * `dt` - Sample spacing in seconds.
    /// * `periods` - Natural periods in seconds; a literal 0 entry is
    ///   treated as a vanishingly small period.
    ///
    /// # Errors
    ///
    /// [`MotionError::InvalidInput`] for a record shorter than two samples,
    /// non-finite samples, a non-positive time step, an empty period list,
    /// or a negative or non-finite period.
    pub fn compute(
        &self,
        accelerations: &[f64],
        dt: f64,
        periods: &[f64],
    ) -> MotionResult<ResponseSpectra> {
        self.compute_with_cancel(accelerations, dt, periods, &AtomicBool::new(false))
    }

    /// Like [`compute`](Self::compute), with a cooperative cancellation
    /// flag.
    ///
    /// The flag is checked once per period, never mid-recursion; setting it
    /// makes the call return [`MotionError::Cancelled`] before the next
    /// period starts.
    pub fn compute_with_cancel(
        &self,
        accelerations: &[f64],
        dt: f64,
        periods: &[f64],
        cancel: &AtomicBool,
    ) -> MotionResult<ResponseSpectra> {
        validate_request(accelerations, dt, periods)?;

        let periods: Vec<f64> = periods
            .iter()
            .map(|&t| if t == 0.0 { MIN_PERIOD } else { t })
            .collect();

        let rows = self.sweep(accelerations, dt, &periods, cancel)?;

        let mut spectra = ResponseSpectra {
            periods,
            spectral_accelerations: Vec::with_capacity(rows.len()),
            spectral_velocities: Vec::with_capacity(rows.len()),
            spectral_displacements: Vec::with_capacity(rows.len()),
            pseudo_accelerations: Vec::with_capacity(rows.len()),
            pseudo_velocities: Vec::with_capacity(rows.len()),
        };
        for (sa, sv, sd, psa, psv) in rows {
            spectra.spectral_accelerations.push(sa);
            spectra.spectral_velocities.push(sv);
            spectra.spectral_displacements.push(sd);
            spectra.pseudo_accelerations.push(psa);
            spectra.pseudo_velocities.push(psv);
        }
        Ok(spectra)
    }

    /// Ordinates for a single period.
    fn ordinates(&self, period: f64, accelerations: &[f64], dt: f64) -> Ordinates {
        let co = OscillatorCoeffs::new(period, self.damping, dt);
        let peaks = integrate_oscillator(&co, accelerations, dt);

        let sa = peaks.xa;
        let sv = peaks.xv * CM_PER_S2_PER_G;
        let sd = peaks.xd * CM_PER_S2_PER_G;
        let psa = co.omega2 * sd / CM_PER_S2_PER_G;
        let psv = co.omega * sd;
        (sa, sv, sd, psa, psv)
    }

    #[cfg(not(feature = "parallel"))]
    fn sweep(
        &self,
        accelerations: &[f64],
        dt: f64,
        periods: &[f64],
        cancel: &AtomicBool,
    ) -> MotionResult<Vec<Ordinates>> {
        let mut rows = Vec::with_capacity(periods.len());
        for &period in periods {
            if cancel.load(Ordering::Relaxed) {
                return Err(MotionError::Cancelled);
            }
            rows.push(self.ordinates(period, accelerations, dt));
        }
        Ok(rows)
    }

    #[cfg(feature = "parallel")]
    fn sweep(
        &self,
        accelerations: &[f64],
        dt: f64,
        periods: &[f64],
        cancel: &AtomicBool,
    ) -> MotionResult<Vec<Ordinates>> {
        // One task per period; collect preserves request order.
        periods
            .par_iter()
            .map(|&period| {
                if cancel.load(Ordering::Relaxed) {
                    return Err(MotionError::Cancelled);
                }
                Ok(self.ordinates(period, accelerations, dt))
            })
            .collect()
    }
}

fn validate_request(accelerations: &[f64], dt: f64, periods: &[f64]) -> MotionResult<()> {
    if accelerations.len() < 2 {
        return Err(MotionError::invalid(
            "accelerations",
            "record must contain at least two samples",
        ));
    }
    if accelerations.iter().any(|a| !a.is_finite()) {
        return Err(MotionError::invalid(
            "accelerations",
            "record contains a non-finite sample",
        ));
    }
    if dt <= 0.0 || !dt.is_finite() {
        return Err(MotionError::invalid("dt", "time step must be a positive number"));
    }
    if periods.is_empty() {
        return Err(MotionError::invalid("periods", "period list is empty"));
    }
    if periods.iter().any(|t| !t.is_finite() || *t < 0.0) {
        return Err(MotionError::invalid(
            "periods",
            "periods must be finite and non-negative",
        ));
    }
    Ok(())
}
