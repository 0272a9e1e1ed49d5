//! Bilinear discretization of an analog ZPK.
//!
//! Maps a continuous-time (s-plane) zero/pole/gain description into the
//! discrete-time z-plane with the conformal substitution
//! `z = (2·fs + s) / (2·fs - s)`. Analog roots at infinity land at the
//! Nyquist point `z = -1`, so the relative degree's worth of padding zeros
//! is appended there. The design pipeline pairs this map with prewarped
//! cutoffs so the requested corners survive the frequency distortion.

use super::zpk::{root_product, Zpk};
use num_complex::Complex64;

/// Discretize an analog ZPK at sample rate `fs` via the bilinear transform.
///
/// Returns a z-domain [`Zpk`] with the same pole count, the zero set padded
/// to full degree with `-1` entries, and the gain corrected by the real part
/// of `∏(2·fs - z) / ∏(2·fs - p)` over the analog roots.
pub fn bilinear(analog: &Zpk, fs: f64) -> Zpk {
    let degree = analog.relative_degree();
    let fs2 = Complex64::new(2.0 * fs, 0.0);

    let mut zeros: Vec<Complex64> = analog.zeros.iter().map(|&z| (fs2 + z) / (fs2 - z)).collect();
    let poles: Vec<Complex64> = analog.poles.iter().map(|&p| (fs2 + p) / (fs2 - p)).collect();

    let num: Vec<Complex64> = analog.zeros.iter().map(|&z| fs2 - z).collect();
    let den: Vec<Complex64> = analog.poles.iter().map(|&p| fs2 - p).collect();
    let gain = analog.gain * (root_product(&num) / root_product(&den)).re;

    zeros.extend(std::iter::repeat(Complex64::new(-1.0, 0.0)).take(degree));

    Zpk::new(zeros, poles, gain)
}
