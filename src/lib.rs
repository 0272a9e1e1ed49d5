//! # Strong-Motion Processing Library
//!
//! This crate computes engineering quantities from earthquake ground-motion
//! records: filtered acceleration signals, elastic response spectra, and the
//! scalar intensity measures derived from them.
//!
//! ## Overview
//!
//! - **IIR Filtering**: classic designs (Butterworth, Chebyshev Type I) in
//!   the four band shapes, built through the analog-prototype → band
//!   transform → bilinear → direct-form chain
//! - **Response Spectra**: piecewise-exact SDOF integration swept over
//!   natural periods, with spectral and pseudo-spectral ordinates
//! - **Record Preparation**: unit conversion plus integration and
//!   differentiation between acceleration, velocity and displacement
//! - **Ground-Motion Parameters**: peak values, energy integrals, spectrum
//!   intensities, durations, RMS levels and period descriptors
//! - **Supporting Tools**: Fourier spectra, code design spectra
//!   (TBDY 2018), spectrum scaling factors, baseline correction
//!
//! ## Processing Flow
//!
//! ```text
//! raw record → MotionData → ResponseSpectrumEngine → ResponseSpectra
//!      │                                                   │
//!      └── filter::apply (band-limited views)              │
//!      └── GroundMotionSummary::compute ◄──────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use strong_motion::filter::{apply, BandType, FilterFamily, FilterSpec};
//! use strong_motion::response_spectrum::ResponseSpectrumEngine;
//!
//! // Band-limit a record to 10 Hz.
//! let record: Vec<f64> = (0..400).map(|i| (i as f64 * 0.2).sin() * 0.05).collect();
//! let spec = FilterSpec {
//!     family: FilterFamily::Butterworth,
//!     band: BandType::Lowpass,
//!     order: 2,
//!     corner_freqs: vec![10.0],
//!     time_step: 0.005,
//! };
//! let filtered = apply(&record, &spec).unwrap();
//!
//! // 5 %-damped response spectra over three periods.
//! let engine = ResponseSpectrumEngine::new(0.05).unwrap();
//! let spectra = engine.compute(&filtered, 0.005, &[0.2, 0.5, 1.0]).unwrap();
//! assert_eq!(spectra.spectral_accelerations.len(), 3);
//! ```
//!
//! All operations are pure, synchronous functions over immutable inputs;
//! repeated calls with identical arguments produce bit-identical results.
//! The `parallel` feature fans the response-spectrum period sweep out over
//! a rayon thread pool.

pub mod baseline;
pub mod design_spectrum;
pub mod error;
pub mod filter;
pub mod fourier;
pub mod ground_motion;
pub mod motion;
pub mod response_spectrum;
pub mod scaling;
pub mod series;

pub use error::{MotionError, MotionResult};
pub use filter::{BandType, FilterFamily, FilterSpec, TransferFunction};
pub use ground_motion::{GmpConfig, GroundMotionSummary};
pub use motion::{AccelerationUnit, DisplacementUnit, MotionData, VelocityUnit};
pub use response_spectrum::{ResponseSpectra, ResponseSpectrumEngine};
