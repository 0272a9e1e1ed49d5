//! Transfer-function realization of a z-domain ZPK.
//!
//! Expands the zero and pole sets into numerator/denominator polynomial
//! coefficients (highest power first) and provides frequency-response
//! evaluation on the realized coefficients.

use super::zpk::Zpk;
use crate::error::{MotionError, MotionResult};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Relative tolerance for the imaginary residue left after expanding a
/// conjugate-paired root set. A residue above this is not rounding noise.
const IMAG_RESIDUE_TOL: f64 = 1e-8;

/// Realized IIR transfer function.
///
/// ```text
/// H(z) = (b[0] + b[1]·z⁻¹ + … + b[N]·z⁻ᴺ) / (a[0] + a[1]·z⁻¹ + … + a[N]·z⁻ᴺ)
/// ```
///
/// Both coefficient vectors have length `order + 1` and `a[0]` is exactly 1
/// (the denominator comes from a monic pole polynomial). Values are derived
/// by [`zpk_to_tf`], never hand-constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferFunction {
    /// Numerator (feed-forward) coefficients, highest power first.
    pub b: Vec<f64>,
    /// Denominator (feedback) coefficients, highest power first.
    pub a: Vec<f64>,
}

impl TransferFunction {
    /// Filter order (denominator degree).
    pub fn order(&self) -> usize {
        self.a.len().saturating_sub(1)
    }

    /// Complex frequency response `H(e^{jω})` at `freq_hz` for a signal
    /// sampled at `sample_rate` Hz.
    pub fn frequency_response(&self, freq_hz: f64, sample_rate: f64) -> Complex64 {
        let omega = 2.0 * PI * freq_hz / sample_rate;
        let num = eval_poly_at_z(&self.b, omega);
        let den = eval_poly_at_z(&self.a, omega);
        num / den
    }

    /// Magnitude response in dB at `freq_hz`.
    pub fn magnitude_db(&self, freq_hz: f64, sample_rate: f64) -> f64 {
        20.0 * self
            .frequency_response(freq_hz, sample_rate)
            .norm()
            .max(1e-30)
            .log10()
    }
}

/// Evaluate `c[0] + c[1]·z⁻¹ + c[2]·z⁻² + …` at `z = e^{jω}`.
fn eval_poly_at_z(coeffs: &[f64], omega: f64) -> Complex64 {
    let mut acc = Complex64::new(0.0, 0.0);
    for (k, &c) in coeffs.iter().enumerate() {
        let angle = -(k as f64) * omega;
        acc += Complex64::new(c * angle.cos(), c * angle.sin());
    }
    acc
}

/// Monic polynomial with the given roots, highest power first.
///
/// Uses the standard root-to-coefficient recurrence: starting from `[1]`,
/// each root updates `c[j] -= r·c[j-1]` from high to low index. The root set
/// must be conjugate-symmetric so the coefficients come out real;
/// `poly(&[])` is `[1.0]`.
///
/// # Errors
///
/// Returns [`MotionError::ContractViolation`] if the imaginary residue of
/// any coefficient exceeds tolerance relative to the largest coefficient
/// magnitude: the root set was not conjugate-symmetric, which means a bug
/// upstream, and truncating would hide it.
pub fn poly(roots: &[Complex64]) -> MotionResult<Vec<f64>> {
    let degree = roots.len();
    let mut coeffs = vec![Complex64::new(0.0, 0.0); degree + 1];
    coeffs[0] = Complex64::new(1.0, 0.0);

    for &root in roots {
        for j in (1..=degree).rev() {
            coeffs[j] = coeffs[j] - root * coeffs[j - 1];
        }
    }

    let scale = coeffs.iter().map(|c| c.norm()).fold(1.0_f64, f64::max);
    if coeffs.iter().any(|c| c.im.abs() > IMAG_RESIDUE_TOL * scale) {
        return Err(MotionError::ContractViolation(
            "polynomial expansion left a non-real residue; root set is not conjugate-symmetric"
                .into(),
        ));
    }

    Ok(coeffs.iter().map(|c| c.re).collect())
}

/// Expand a z-domain ZPK into transfer-function coefficients.
///
/// `b = gain · poly(zeros)`, `a = poly(poles)`.
pub fn zpk_to_tf(zpk: &Zpk) -> MotionResult<TransferFunction> {
    let b = poly(&zpk.zeros)?
        .into_iter()
        .map(|c| c * zpk.gain)
        .collect();
    let a = poly(&zpk.poles)?;
    Ok(TransferFunction { b, a })
}
