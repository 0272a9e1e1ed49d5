//! Filter design and application pipeline.
//!
//! Orchestrates the stages: validate → analog prototype → band transform →
//! bilinear discretization → transfer-function realization → recursive
//! application. Corner frequencies are given in the same units as
//! `1 / time_step` (hertz for seconds); internally they are normalized by
//! the Nyquist frequency and prewarped so the bilinear map lands the corners
//! where they were asked for.
//!
//! ## Example
//!
//! ```rust
//! use strong_motion::filter::{apply, BandType, FilterFamily, FilterSpec};
//!
//! let spec = FilterSpec {
//!     family: FilterFamily::Butterworth,
//!     band: BandType::Lowpass,
//!     order: 2,
//!     corner_freqs: vec![10.0],
//!     time_step: 0.005,
//! };
//! let signal = vec![0.0, 0.01, 0.03, 0.02, -0.01, -0.02, 0.0, 0.01];
//! let filtered = apply(&signal, &spec).unwrap();
//! assert_eq!(filtered.len(), signal.len());
//! ```

use super::bilinear::bilinear;
use super::direct_form::lfilter;
use super::tf::{zpk_to_tf, TransferFunction};
use super::transform::{
    lowpass_to_bandpass, lowpass_to_bandstop, lowpass_to_highpass, lowpass_to_lowpass,
};
use super::zpk::{butterworth, chebyshev1, Zpk};
use crate::error::{MotionError, MotionResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Internal sample rate the prewarp / bilinear pair is fixed to.
const DESIGN_SAMPLE_RATE: f64 = 2.0;

/// Analog prototype family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterFamily {
    /// Maximally flat passband.
    Butterworth,
    /// Equiripple passband at a fixed 0.5 dB ripple.
    Chebyshev1,
}

/// Frequency-selective band shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BandType {
    Lowpass,
    Highpass,
    Bandpass,
    Bandstop,
}

/// Complete description of a filter design.
///
/// Low-pass and high-pass take one corner frequency; band-pass and band-stop
/// take two in strictly ascending order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Prototype family.
    pub family: FilterFamily,
    /// Band shape.
    pub band: BandType,
    /// Filter order (at least 1). Band filters double the realized order.
    pub order: usize,
    /// Corner frequencies, in the units of `1 / time_step`.
    pub corner_freqs: Vec<f64>,
    /// Sample spacing of the signal the filter will run on.
    pub time_step: f64,
}

impl FilterSpec {
    /// Corner frequencies normalized by the Nyquist frequency
    /// `0.5 / time_step`. A valid design keeps these strictly inside (0, 1).
    pub fn normalized_cutoffs(&self) -> Vec<f64> {
        let nyquist = 0.5 / self.time_step;
        self.corner_freqs.iter().map(|f| f / nyquist).collect()
    }

    /// Validate the design parameters.
    ///
    /// # Errors
    ///
    /// [`MotionError::InvalidInput`] for empty corners, zero order,
    /// non-positive time step, wrong corner count for the band, descending
    /// corners, or cutoffs outside the open Nyquist interval;
    /// [`MotionError::NumericDegeneracy`] for a band filter whose two
    /// corners coincide (zero bandwidth).
    pub fn validate(&self) -> MotionResult<()> {
        if self.corner_freqs.is_empty() {
            return Err(MotionError::invalid("corner_freqs", "corner frequencies are empty"));
        }
        if self.order < 1 {
            return Err(MotionError::invalid("order", "filter order must be at least 1"));
        }
        if self.time_step <= 0.0 {
            return Err(MotionError::invalid("time_step", "time step must be a positive number"));
        }

        match self.band {
            BandType::Lowpass | BandType::Highpass => {
                if self.corner_freqs.len() != 1 {
                    return Err(MotionError::invalid(
                        "corner_freqs",
                        "lowpass/highpass take exactly one corner frequency",
                    ));
                }
            }
            BandType::Bandpass | BandType::Bandstop => {
                if self.corner_freqs.len() != 2 {
                    return Err(MotionError::invalid(
                        "corner_freqs",
                        "bandpass/bandstop take exactly two corner frequencies",
                    ));
                }
                if self.corner_freqs[0] == self.corner_freqs[1] {
                    return Err(MotionError::NumericDegeneracy(format!(
                        "band corners coincide at {}; bandwidth is zero",
                        self.corner_freqs[0]
                    )));
                }
                if self.corner_freqs[0] > self.corner_freqs[1] {
                    return Err(MotionError::invalid(
                        "corner_freqs",
                        "corner frequencies must be in ascending order",
                    ));
                }
            }
        }

        for wn in self.normalized_cutoffs() {
            if !wn.is_finite() || wn <= 0.0 || wn >= 1.0 {
                return Err(MotionError::invalid(
                    "corner_freqs",
                    "normalized cutoffs must lie strictly between 0 and the Nyquist frequency",
                ));
            }
        }

        Ok(())
    }
}

/// Design the digital filter in zero/pole/gain form.
///
/// Assumes an already-validated spec; exposed to the rest of the crate so
/// tests can inspect pole locations directly.
pub(crate) fn design_zpk(spec: &FilterSpec) -> MotionResult<Zpk> {
    let proto = match spec.family {
        FilterFamily::Butterworth => butterworth(spec.order)?,
        FilterFamily::Chebyshev1 => chebyshev1(spec.order)?,
    };

    // Prewarp each normalized cutoff so the bilinear map at the fixed design
    // rate preserves the corner locations.
    let warped: Vec<f64> = spec
        .normalized_cutoffs()
        .iter()
        .map(|wn| (PI * wn / DESIGN_SAMPLE_RATE).tan() * DESIGN_SAMPLE_RATE * 2.0)
        .collect();

    let shaped = match spec.band {
        BandType::Lowpass => lowpass_to_lowpass(&proto, warped[0]),
        BandType::Highpass => lowpass_to_highpass(&proto, warped[0]),
        BandType::Bandpass | BandType::Bandstop => {
            let bw = warped[1] - warped[0];
            let wo = (warped[0] * warped[1]).sqrt();
            match spec.band {
                BandType::Bandpass => lowpass_to_bandpass(&proto, wo, bw),
                _ => lowpass_to_bandstop(&proto, wo, bw),
            }
        }
    };

    Ok(bilinear(&shaped, DESIGN_SAMPLE_RATE))
}

/// Design a filter from the spec and realize it as transfer-function
/// coefficients.
///
/// # Errors
///
/// Validation errors per [`FilterSpec::validate`]; a
/// [`MotionError::ContractViolation`] if the realized polynomial is not
/// real (conjugate symmetry broken upstream).
pub fn design(spec: &FilterSpec) -> MotionResult<TransferFunction> {
    spec.validate()?;
    zpk_to_tf(&design_zpk(spec)?)
}

/// Validate, design, and run the filter over a signal.
///
/// Returns a filtered signal of identical length, computed with zero
/// initial state. The design is not checked or repaired for stability: an
/// unstable configuration is applied as computed.
///
/// # Errors
///
/// [`MotionError::InvalidInput`] for an empty signal or any spec validation
/// failure.
pub fn apply(signal: &[f64], spec: &FilterSpec) -> MotionResult<Vec<f64>> {
    if signal.is_empty() {
        return Err(MotionError::invalid("signal", "signal is empty"));
    }
    let tf = design(spec)?;
    Ok(lfilter(&tf, signal))
}
