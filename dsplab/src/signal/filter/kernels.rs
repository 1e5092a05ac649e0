//! Trait-first FIR filtering kernels.
//!
//! [`FirFilterKernel`] holds a validated tap vector and applies it to
//! input signals by direct convolution. The output trim mode is fixed
//! at construction, so one kernel can filter many signals with the
//! same configuration.

use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D, Write1D};
use crate::signal::traits::FirFilter1D;
use alloc::vec::Vec;
use dsplab_core::numerics::{self, ConvolveMode};
use ndarray::ArrayView1;
use num_traits::NumAssign;

/// Constructor config for [`FirFilterKernel`].
#[derive(Debug, Clone, PartialEq)]
pub struct FirFilterConfig<T> {
    /// Filter taps, coefficient `i` at index `i`.
    pub h: Vec<T>,
    /// Output trim mode.
    pub mode: ConvolveMode,
}

/// 1D FIR filtering kernel.
///
/// Convolves the input with the configured taps. `Full` mode returns
/// every sample of the convolution; `Same` mode trims the result to
/// the input length, keeping the centered samples.
#[derive(Debug, Clone, PartialEq)]
pub struct FirFilterKernel<T> {
    h: Vec<T>,
    mode: ConvolveMode,
}

impl<T> FirFilterKernel<T> {
    /// Number of output samples for a non-empty input of `n` samples.
    pub fn output_len(&self, n: usize) -> usize {
        match self.mode {
            ConvolveMode::Full => n + self.h.len() - 1,
            ConvolveMode::Same => n,
        }
    }
}

impl<T> KernelLifecycle for FirFilterKernel<T>
where
    T: NumAssign + Copy,
{
    type Config = FirFilterConfig<T>;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.h.is_empty() {
            return Err(ConfigError::EmptyInput { arg: "h" });
        }
        Ok(Self {
            h: config.h,
            mode: config.mode,
        })
    }
}

impl<T> FirFilter1D<T> for FirFilterKernel<T>
where
    T: NumAssign + Copy,
{
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized,
    {
        let filtered = self.run_alloc(input)?;
        let out_slice = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        if out_slice.len() != filtered.len() {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: filtered.len(),
                got: out_slice.len(),
            });
        }
        out_slice.copy_from_slice(&filtered);
        Ok(())
    }

    fn run_alloc<I>(&self, input: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
    {
        let x = input.read_slice().map_err(ExecInvariantViolation::from)?;
        if x.is_empty() {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "fir filter input must be non-empty",
            });
        }
        let filtered = numerics::convolve(
            ArrayView1::from(x),
            ArrayView1::from(self.h.as_slice()),
            self.mode,
        )
        .map_err(|_| ExecInvariantViolation::InvalidState {
            reason: "fir filter kernel execution failed",
        })?;
        Ok(filtered.to_vec())
    }
}

/// Apply FIR taps `h` to the signal `x`.
///
/// Returns an empty vector when the taps or the signal are empty.
pub fn fir_filter<T>(h: &[T], x: &[T], mode: ConvolveMode) -> Vec<T>
where
    T: NumAssign + Copy,
{
    match FirFilterKernel::try_new(FirFilterConfig { h: h.to_vec(), mode }) {
        Ok(kernel) => kernel.run_alloc(x).unwrap_or_default(),
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{fir_filter, ConvolveMode, FirFilterConfig, FirFilterKernel};
    use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle};
    use crate::signal::filter::design::{design_fir_dyn, FilterBandType};
    use crate::signal::traits::FirFilter1D;
    use crate::signal::windows::WindowKind;

    #[test]
    fn full_mode_matches_the_direct_convolution() {
        let kernel = FirFilterKernel::try_new(FirFilterConfig {
            h: vec![0.5f64, 1.0, 0.5],
            mode: ConvolveMode::Full,
        })
        .expect("fir filter kernel should initialize");

        let x = [2.0f64, 1.0, 0.0, 1.0, 2.0];
        let y = kernel
            .run_alloc(x.as_slice())
            .expect("fir filter run_alloc should succeed");
        assert_eq!(y, vec![1.0, 2.5, 2.0, 1.0, 2.0, 2.5, 1.0]);
    }

    #[test]
    fn same_mode_keeps_the_input_length() {
        let kernel = FirFilterKernel::try_new(FirFilterConfig {
            h: vec![0.5f64, 1.0, 0.5],
            mode: ConvolveMode::Same,
        })
        .expect("fir filter kernel should initialize");

        let x = [2.0f64, 1.0, 0.0, 1.0, 2.0];
        let y = kernel
            .run_alloc(x.as_slice())
            .expect("fir filter run_alloc should succeed");
        assert_eq!(y.len(), x.len());
        assert_eq!(y, vec![2.5, 2.0, 1.0, 2.0, 2.5]);

        let average = fir_filter(&[0.5f64, 0.5], &[1.0, 2.0, 3.0, 4.0], ConvolveMode::Same);
        assert_eq!(average, vec![0.5, 1.5, 2.5, 3.5]);
    }

    #[test]
    fn run_into_checks_the_output_length() {
        let kernel = FirFilterKernel::try_new(FirFilterConfig {
            h: vec![0.5f64, 1.0, 0.5],
            mode: ConvolveMode::Full,
        })
        .expect("fir filter kernel should initialize");

        let x = [2.0f64, 1.0, 0.0, 1.0, 2.0];
        let mut short = vec![0.0f64; 3];
        let err = kernel
            .run_into(x.as_slice(), short.as_mut_slice())
            .expect_err("output size mismatch must fail");
        assert!(matches!(
            err,
            ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: 7,
                got: 3,
            }
        ));

        let mut exact = vec![0.0f64; kernel.output_len(x.len())];
        kernel
            .run_into(x.as_slice(), exact.as_mut_slice())
            .expect("fir filter run_into should succeed");
        assert_eq!(exact[3], 1.0);
    }

    #[test]
    fn constructors_reject_empty_taps() {
        let err = FirFilterKernel::<f64>::try_new(FirFilterConfig {
            h: vec![],
            mode: ConvolveMode::Full,
        })
        .expect_err("empty taps must fail");
        assert_eq!(err, ConfigError::EmptyInput { arg: "h" });
    }

    #[test]
    fn empty_input_fails_at_run_time() {
        let kernel = FirFilterKernel::try_new(FirFilterConfig {
            h: vec![0.5f64, 0.5],
            mode: ConvolveMode::Same,
        })
        .expect("fir filter kernel should initialize");

        let empty: [f64; 0] = [];
        let err = kernel
            .run_alloc(empty.as_slice())
            .expect_err("empty input must fail");
        assert_eq!(
            err,
            ExecInvariantViolation::InvalidState {
                reason: "fir filter input must be non-empty",
            }
        );
    }

    #[test]
    fn designed_filters_shape_dc_as_expected() {
        let ones = vec![1.0f64; 64];

        let lowpass = design_fir_dyn(
            FilterBandType::Lowpass,
            &[0.5f64],
            32,
            WindowKind::Hamming,
            None,
        )
        .expect("lowpass design should succeed");
        let y = fir_filter(&lowpass, &ones, ConvolveMode::Same);
        assert!((y[32] - 1.0).abs() < 0.05);

        let highpass = design_fir_dyn(
            FilterBandType::Highpass,
            &[0.5f64],
            32,
            WindowKind::Hamming,
            None,
        )
        .expect("highpass design should succeed");
        let y = fir_filter(&highpass, &ones, ConvolveMode::Same);
        assert!(y[32].abs() < 0.05);
    }
}
