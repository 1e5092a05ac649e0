//! Course-style digital signal processing built from first principles.
//!
//! `dsplab` implements the discrete Fourier transform, linear
//! convolution, window functions, and window-method FIR design by
//! direct evaluation of their defining sums. Kernels validate their
//! configuration eagerly at construction and expose checked
//! `run_into`/`run_alloc` entrypoints; free functions wrap the kernels
//! for quick exploration.
//!
//! # Example
//!
//! Design a lowpass filter and run it over a signal:
//!
//! ```
//! use dsplab::signal::convolve::ConvolveMode;
//! use dsplab::signal::filter::design::{design_fir_dyn, FilterBandType};
//! use dsplab::signal::filter::fir_filter;
//! use dsplab::signal::windows::WindowKind;
//!
//! let taps = design_fir_dyn(
//!     FilterBandType::Lowpass,
//!     &[0.35f64],
//!     24,
//!     WindowKind::Hamming,
//!     None,
//! )
//! .expect("valid design");
//!
//! let x: Vec<f64> = (0..64).map(|i| (i as f64 / 3.0).sin()).collect();
//! let y = fir_filter(&taps, &x, ConvolveMode::Same);
//! assert_eq!(y.len(), x.len());
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

/// Linear algebra and complex number types used in public signatures.
pub use nalgebra as na;

pub mod error;
pub mod kernel;
pub mod signal;
pub mod special;

#[cfg(feature = "std")]
pub mod plot;
