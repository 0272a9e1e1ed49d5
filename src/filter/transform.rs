//! Frequency-band transformations of a low-pass ZPK prototype.
//!
//! Each transform takes the normalized analog low-pass prototype and moves
//! it to the requested band at the given analog cutoff(s), returning a new
//! [`Zpk`]. Degree matching appends the zeros the substitution creates at
//! the origin (or at `±i·wo` for band-stop), and the gain is corrected so
//! the passband level is preserved.
//!
//! The formulas assume a conjugate-symmetric root set, which the prototypes
//! guarantee; feeding an asymmetric set is a design error upstream and shows
//! up later as a polynomial-residue contract violation.

use super::zpk::{root_product, Zpk};
use num_complex::Complex64;

/// Shift of the two band roots produced by one low-pass root:
/// `sqrt(r² - wo²)`.
fn band_root_shift(r: Complex64, wo: f64) -> Complex64 {
    (r * r - Complex64::new(wo * wo, 0.0)).sqrt()
}

/// Split every root `r` into the pair `r + sqrt(r² - wo²)`,
/// `r - sqrt(r² - wo²)`, keeping all plus-branch roots ahead of all
/// minus-branch roots. The ordering is fixed: it determines the
/// floating-point accumulation order of the polynomial expansion downstream.
fn split_band_roots(roots: &[Complex64], wo: f64) -> Vec<Complex64> {
    let mut out = Vec::with_capacity(roots.len() * 2);
    for &r in roots {
        out.push(r + band_root_shift(r, wo));
    }
    for &r in roots {
        out.push(r - band_root_shift(r, wo));
    }
    out
}

/// Move a low-pass prototype to a low-pass filter with cutoff `wo`.
///
/// Substitution `s → s/wo`: every root scales by `wo`, and the gain picks up
/// `wo` to the relative degree.
pub fn lowpass_to_lowpass(proto: &Zpk, wo: f64) -> Zpk {
    let degree = proto.relative_degree();
    let zeros = proto.zeros.iter().map(|&z| z * wo).collect();
    let poles = proto.poles.iter().map(|&p| p * wo).collect();
    let gain = proto.gain * wo.powi(degree as i32);
    Zpk::new(zeros, poles, gain)
}

/// Move a low-pass prototype to a high-pass filter with cutoff `wo`.
///
/// Substitution `s → wo/s`: every root inverts around the cutoff, and the
/// relative degree's worth of zeros appears at the origin. The gain picks up
/// the real part of `∏(-z) / ∏(-p)` over the original roots.
pub fn lowpass_to_highpass(proto: &Zpk, wo: f64) -> Zpk {
    let degree = proto.relative_degree();
    let wo_c = Complex64::new(wo, 0.0);

    let mut zeros: Vec<Complex64> = proto.zeros.iter().map(|&z| wo_c / z).collect();
    zeros.extend(std::iter::repeat(Complex64::new(0.0, 0.0)).take(degree));
    let poles: Vec<Complex64> = proto.poles.iter().map(|&p| wo_c / p).collect();

    let neg_zeros: Vec<Complex64> = proto.zeros.iter().map(|&z| -z).collect();
    let neg_poles: Vec<Complex64> = proto.poles.iter().map(|&p| -p).collect();
    let gain = proto.gain * (root_product(&neg_zeros) / root_product(&neg_poles)).re;

    Zpk::new(zeros, poles, gain)
}

/// Move a low-pass prototype to a band-pass filter centered at `wo` with
/// bandwidth `bw`.
///
/// Substitution `s → (s² + wo²) / (bw·s)`: roots scale by `bw/2` and split
/// into pairs, doubling the counts; the relative degree's worth of zeros
/// appears at the origin and the gain picks up `bw` to the relative degree.
pub fn lowpass_to_bandpass(proto: &Zpk, wo: f64, bw: f64) -> Zpk {
    let degree = proto.relative_degree();
    let half_bw = bw / 2.0;

    let scaled_zeros: Vec<Complex64> = proto.zeros.iter().map(|&z| z * half_bw).collect();
    let scaled_poles: Vec<Complex64> = proto.poles.iter().map(|&p| p * half_bw).collect();

    let mut zeros = split_band_roots(&scaled_zeros, wo);
    zeros.extend(std::iter::repeat(Complex64::new(0.0, 0.0)).take(degree));
    let poles = split_band_roots(&scaled_poles, wo);

    let gain = proto.gain * bw.powi(degree as i32);
    Zpk::new(zeros, poles, gain)
}

/// Move a low-pass prototype to a band-stop filter centered at `wo` with
/// bandwidth `bw`.
///
/// Substitution `s → bw·s / (s² + wo²)`: roots invert through `bw/2` and
/// split into pairs; the relative degree's worth of zero pairs appears on
/// the imaginary axis at `±i·wo` (the notch), and the gain picks up the real
/// part of `∏(-z) / ∏(-p)` over the original roots.
pub fn lowpass_to_bandstop(proto: &Zpk, wo: f64, bw: f64) -> Zpk {
    let degree = proto.relative_degree();
    let half_bw = Complex64::new(bw / 2.0, 0.0);

    let inv_zeros: Vec<Complex64> = proto.zeros.iter().map(|&z| half_bw / z).collect();
    let inv_poles: Vec<Complex64> = proto.poles.iter().map(|&p| half_bw / p).collect();

    let mut zeros = split_band_roots(&inv_zeros, wo);
    zeros.extend(std::iter::repeat(Complex64::new(0.0, wo)).take(degree));
    zeros.extend(std::iter::repeat(Complex64::new(0.0, -wo)).take(degree));
    let poles = split_band_roots(&inv_poles, wo);

    let neg_zeros: Vec<Complex64> = proto.zeros.iter().map(|&z| -z).collect();
    let neg_poles: Vec<Complex64> = proto.poles.iter().map(|&p| -p).collect();
    let gain = proto.gain * (root_product(&neg_zeros) / root_product(&neg_poles)).re;

    Zpk::new(zeros, poles, gain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::zpk::butterworth;

    #[test]
    fn test_lowpass_to_lowpass() {
        let proto = butterworth(4).unwrap();
        let lp = lowpass_to_lowpass(&proto, 2.0);
        assert!(lp.zeros.is_empty());
        assert_eq!(lp.poles.len(), 4);
        assert!((lp.gain - 16.0).abs() < 1e-12, "gain = {}", lp.gain);
        for p in &lp.poles {
            assert!((p.norm() - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_lowpass_to_highpass() {
        let proto = butterworth(4).unwrap();
        let hp = lowpass_to_highpass(&proto, 2.0);
        assert_eq!(hp.zeros.len(), 4);
        assert_eq!(hp.poles.len(), 4);
        assert!((hp.gain - 1.0).abs() < 1e-12, "gain = {}", hp.gain);
        for z in &hp.zeros {
            assert_eq!(*z, Complex64::new(0.0, 0.0));
        }
    }

    #[test]
    fn test_lowpass_to_bandpass() {
        let proto = butterworth(4).unwrap();
        let bp = lowpass_to_bandpass(&proto, 2.0, 2.0);
        assert_eq!(bp.zeros.len(), 4);
        assert_eq!(bp.poles.len(), 8);
        assert!((bp.gain - 16.0).abs() < 1e-12, "gain = {}", bp.gain);
    }

    #[test]
    fn test_lowpass_to_bandstop() {
        let proto = butterworth(4).unwrap();
        let bs = lowpass_to_bandstop(&proto, 2.0, 2.0);
        assert_eq!(bs.zeros.len(), 8);
        assert_eq!(bs.poles.len(), 8);
        assert!((bs.gain - 1.0).abs() < 1e-12, "gain = {}", bs.gain);
        // The notch zeros sit on the imaginary axis at +/- wo.
        let on_axis = bs
            .zeros
            .iter()
            .filter(|z| z.re == 0.0 && z.im.abs() == 2.0)
            .count();
        assert_eq!(on_axis, 8);
    }

    #[test]
    fn test_bandpass_roots_conjugate_symmetric() {
        let proto = butterworth(3).unwrap();
        let bp = lowpass_to_bandpass(&proto, 5.0, 1.0);
        for p in &bp.poles {
            let has_conjugate = bp.poles.iter().any(|q| (q - p.conj()).norm() < 1e-9);
            assert!(has_conjugate, "pole {} has no conjugate partner", p);
        }
    }
}
