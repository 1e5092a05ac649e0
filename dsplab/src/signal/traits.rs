//! Trait interfaces for signal-processing capabilities.
//!
//! Each kernel implements the capability trait matching its operation, so
//! callers program against `run_into`/`run_alloc` rather than concrete
//! kernel types.

use crate::kernel::{ExecInvariantViolation, Read1D, Write1D};
use nalgebra::Complex;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// 1D convolution capability.
pub trait Convolve1D<T> {
    /// Run convolution into a caller-provided output buffer.
    fn run_into<I1, I2, O>(
        &self,
        in1: &I1,
        in2: &I2,
        out: &mut O,
    ) -> Result<(), ExecInvariantViolation>
    where
        I1: Read1D<T> + ?Sized,
        I2: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Run convolution and allocate output.
    #[cfg(feature = "alloc")]
    fn run_alloc<I1, I2>(&self, in1: &I1, in2: &I2) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I1: Read1D<T> + ?Sized,
        I2: Read1D<T> + ?Sized;
}

/// 1D discrete Fourier transform capability over real input.
pub trait Dft1D<T> {
    /// Run the transform into a caller-provided complex output buffer.
    ///
    /// The buffer length must equal the padded transform length.
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        O: Write1D<Complex<T>> + ?Sized;

    /// Run the transform and allocate the complex spectrum.
    #[cfg(feature = "alloc")]
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<Complex<T>>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// 1D FIR filtering capability.
pub trait FirFilter1D<T> {
    /// Run filtering into a caller-provided output buffer.
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Run filtering and allocate output.
    #[cfg(feature = "alloc")]
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// FIR design capability.
#[cfg(feature = "alloc")]
pub trait FirWinDesign<T> {
    /// Run FIR design into a caller-provided output buffer.
    fn run_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<T> + ?Sized;

    /// Run FIR design and allocate output coefficients.
    fn run_alloc(&self) -> Result<Vec<T>, ExecInvariantViolation>;
}

/// FIR design capability in no-alloc mode.
#[cfg(not(feature = "alloc"))]
pub trait FirWinDesign<T> {}

/// Window generation capability.
#[cfg(feature = "alloc")]
pub trait WindowGenerate<T> {
    /// Run window generation into a caller-provided output buffer.
    fn run_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<T> + ?Sized;

    /// Run window generation and allocate output samples.
    fn run_alloc(&self) -> Result<Vec<T>, ExecInvariantViolation>;
}

/// Window generation capability in no-alloc mode.
#[cfg(not(feature = "alloc"))]
pub trait WindowGenerate<T> {}
