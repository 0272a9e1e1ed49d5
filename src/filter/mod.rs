//! Digital IIR filtering of ground-motion records.
//!
//! The classic design chain, each stage a pure function over an immutable
//! value:
//!
//! ```text
//! validate → analog prototype → band transform → bilinear → (b, a) → filter
//!            (zpk)              (transform)      (bilinear)  (tf)     (direct_form)
//! ```
//!
//! Two prototype families are supported, Butterworth and Chebyshev Type I
//! at a fixed 0.5 dB ripple, in the four standard band shapes. Designs are
//! returned as computed: stability is a property of the requested
//! configuration, not something the pipeline repairs.
//!
//! Most callers only need [`apply`]; the stage functions are exported for
//! callers that want to inspect intermediate representations.

pub mod bilinear;
pub mod direct_form;
pub mod pipeline;
pub mod tf;
pub mod transform;
pub mod zpk;

pub use bilinear::bilinear;
pub use direct_form::lfilter;
pub use pipeline::{apply, design, BandType, FilterFamily, FilterSpec};
pub use tf::{poly, zpk_to_tf, TransferFunction};
pub use transform::{
    lowpass_to_bandpass, lowpass_to_bandstop, lowpass_to_highpass, lowpass_to_lowpass,
};
pub use zpk::{butterworth, chebyshev1, Zpk, CHEBYSHEV_RIPPLE_DB};
