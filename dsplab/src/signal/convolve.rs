//! Direct 1D convolution.
//!
//! The kernel evaluates the discrete convolution as the literal
//! shift-multiply-accumulate sum, so every output sample matches the
//! textbook definition term for term. No transform-based shortcut is
//! taken regardless of operand length.

use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D, Write1D};
use crate::signal::traits::Convolve1D;
use alloc::vec::Vec;
use dsplab_core::numerics;
use ndarray::ArrayView1;
use num_traits::NumAssign;

pub use dsplab_core::numerics::ConvolveMode;

/// Constructor config for [`ConvolveKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvolveConfig {
    /// Output trim mode.
    pub mode: ConvolveMode,
}

/// Direct 1D convolution kernel.
///
/// Computes the full convolution of its two operands and trims the
/// result according to the configured [`ConvolveMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvolveKernel {
    mode: ConvolveMode,
}

impl ConvolveKernel {
    /// Number of output samples for non-empty operands of `in1_len` and
    /// `in2_len` samples.
    pub fn output_len(&self, in1_len: usize, in2_len: usize) -> usize {
        match self.mode {
            ConvolveMode::Full => in1_len + in2_len - 1,
            ConvolveMode::Same => in1_len,
        }
    }
}

impl KernelLifecycle for ConvolveKernel {
    type Config = ConvolveConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        Ok(Self { mode: config.mode })
    }
}

impl<T> Convolve1D<T> for ConvolveKernel
where
    T: NumAssign + Copy,
{
    fn run_into<I1, I2, O>(
        &self,
        in1: &I1,
        in2: &I2,
        out: &mut O,
    ) -> Result<(), ExecInvariantViolation>
    where
        I1: Read1D<T> + ?Sized,
        I2: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized,
    {
        let computed = self.run_alloc(in1, in2)?;
        let out_slice = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        if out_slice.len() != computed.len() {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: computed.len(),
                got: out_slice.len(),
            });
        }
        out_slice.copy_from_slice(&computed);
        Ok(())
    }

    fn run_alloc<I1, I2>(&self, in1: &I1, in2: &I2) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I1: Read1D<T> + ?Sized,
        I2: Read1D<T> + ?Sized,
    {
        let a = in1.read_slice().map_err(ExecInvariantViolation::from)?;
        let v = in2.read_slice().map_err(ExecInvariantViolation::from)?;
        if a.is_empty() || v.is_empty() {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "convolution operands must be non-empty",
            });
        }
        let computed = numerics::convolve(ArrayView1::from(a), ArrayView1::from(v), self.mode)
            .map_err(|_| ExecInvariantViolation::InvalidState {
                reason: "convolve kernel execution failed",
            })?;
        Ok(computed.to_vec())
    }
}

/// Direct convolution of two sequences.
///
/// Returns an empty vector when either operand is empty.
pub fn convolve<T>(in1: &[T], in2: &[T], mode: ConvolveMode) -> Vec<T>
where
    T: NumAssign + Copy,
{
    match ConvolveKernel::try_new(ConvolveConfig { mode }) {
        Ok(kernel) => kernel.run_alloc(in1, in2).unwrap_or_default(),
        Err(_) => Vec::new(),
    }
}
