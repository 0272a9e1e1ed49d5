//! Analog low-pass prototypes in zero/pole/gain form.
//!
//! A prototype is a normalized analog low-pass filter with its cutoff at
//! 1 rad/s. The band transforms in [`super::transform`] reshape it to the
//! requested band and cutoffs, and [`super::bilinear`] maps the result into
//! the z-plane.
//!
//! ## Example
//!
//! ```rust
//! use strong_motion::filter::butterworth;
//!
//! let proto = butterworth(4).unwrap();
//! assert!(proto.zeros.is_empty());
//! assert_eq!(proto.poles.len(), 4);
//! assert_eq!(proto.gain, 1.0);
//! ```

use crate::error::{MotionError, MotionResult};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Fixed passband ripple used by the Chebyshev Type I prototype, in dB.
pub const CHEBYSHEV_RIPPLE_DB: f64 = 0.5;

/// Zero/pole/gain description of a linear filter.
///
/// Each pipeline stage consumes a `Zpk` and returns a fresh one; values are
/// never mutated after construction. The pole count is always at least the
/// zero count.
#[derive(Debug, Clone, PartialEq)]
pub struct Zpk {
    /// Zeros of the transfer function.
    pub zeros: Vec<Complex64>,
    /// Poles of the transfer function.
    pub poles: Vec<Complex64>,
    /// Scalar gain.
    pub gain: f64,
}

impl Zpk {
    /// Create a new zero/pole/gain value.
    pub fn new(zeros: Vec<Complex64>, poles: Vec<Complex64>, gain: f64) -> Self {
        debug_assert!(poles.len() >= zeros.len());
        Self { zeros, poles, gain }
    }

    /// Number of poles in excess of zeros.
    ///
    /// Governs how many padding zeros the band transforms and the bilinear
    /// map must append.
    pub fn relative_degree(&self) -> usize {
        self.poles.len() - self.zeros.len()
    }
}

/// Product of all roots in a slice (1 for an empty slice).
pub(crate) fn root_product(roots: &[Complex64]) -> Complex64 {
    roots
        .iter()
        .fold(Complex64::new(1.0, 0.0), |acc, &r| acc * r)
}

/// Butterworth analog low-pass prototype of the given order.
///
/// Poles sit on the left half of the unit circle at `-exp(iθ)` with
/// `θ = π·m / (2N)` for `m = -N+1, -N+3, …, N-1`; there are no zeros and
/// the gain is exactly 1.
///
/// # Errors
///
/// Returns [`MotionError::InvalidInput`] if `order` is zero.
pub fn butterworth(order: usize) -> MotionResult<Zpk> {
    if order < 1 {
        return Err(MotionError::invalid("order", "filter order must be at least 1"));
    }

    let n = order as f64;
    let mut poles = Vec::with_capacity(order);
    for k in 0..order {
        let m = (2 * k) as f64 - n + 1.0;
        let theta = PI * m / (2.0 * n);
        poles.push(-Complex64::new(0.0, theta).exp());
    }

    Ok(Zpk::new(Vec::new(), poles, 1.0))
}

/// Chebyshev Type I analog low-pass prototype of the given order.
///
/// Uses the fixed [`CHEBYSHEV_RIPPLE_DB`] passband ripple. Poles are
/// `-sinh(μ + iθ)` over the same angle set as [`butterworth`], with
/// `μ = asinh(1/ε)/N`; the gain is the real part of the product of the
/// negated poles, halved by `sqrt(1 + ε²)` for even orders so the passband
/// rides the ripple correctly.
///
/// # Errors
///
/// Returns [`MotionError::InvalidInput`] if `order` is zero.
pub fn chebyshev1(order: usize) -> MotionResult<Zpk> {
    if order < 1 {
        return Err(MotionError::invalid("order", "filter order must be at least 1"));
    }

    let n = order as f64;
    let eps = (10_f64.powf(0.1 * CHEBYSHEV_RIPPLE_DB) - 1.0).sqrt();
    let mu = (1.0 / eps).asinh() / n;

    let mut poles = Vec::with_capacity(order);
    for k in 0..order {
        let m = (2 * k) as f64 - n + 1.0;
        let theta = m * PI / (2.0 * n);
        poles.push(-Complex64::new(mu, theta).sinh());
    }

    let mut gain = poles
        .iter()
        .map(|&p| -p)
        .fold(Complex64::new(1.0, 0.0), |acc, p| acc * p)
        .re;
    if order % 2 == 0 {
        gain /= (1.0 + eps * eps).sqrt();
    }

    Ok(Zpk::new(Vec::new(), poles, gain))
}
