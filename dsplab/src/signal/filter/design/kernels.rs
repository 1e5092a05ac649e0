//! Trait-first kernels for filter design APIs.

use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Write1D};
use crate::signal::traits::FirWinDesign;
use crate::signal::windows::{self, WindowKind};
use crate::special::Bessel;
use alloc::vec::Vec;
use nalgebra::RealField;
use num_traits::FromPrimitive;

use super::{ideal_response_impl, FilterBandType};

/// Constructor config for [`FirDesignKernel`].
///
/// Order `M` produces `M + 1` coefficients with the center tap at index
/// `M / 2`, so `M` must be even and positive. Cutoffs are normalized to
/// the Nyquist rate. The window is always explicit; pass
/// [`WindowKind::Rectangular`] for the bare ideal response.
#[derive(Debug, Clone, PartialEq)]
pub struct FirDesignConfig<F> {
    /// Band geometry to design.
    pub band: FilterBandType,
    /// Cutoff frequencies in `(0, 1)`, strictly increasing: one for
    /// lowpass/highpass, two for bandpass/bandstop.
    pub cutoff: Vec<F>,
    /// Filter order; the design has `order + 1` taps.
    pub order: usize,
    /// Window applied to the ideal response.
    pub window: WindowKind,
    /// Kaiser shape parameter; required for kaiser, rejected otherwise.
    pub beta: Option<F>,
}

/// Trait-first FIR design kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct FirDesignKernel<F> {
    band: FilterBandType,
    cutoff: Vec<F>,
    order: usize,
    window: WindowKind,
    beta: Option<F>,
}

impl<F> KernelLifecycle for FirDesignKernel<F>
where
    F: RealField + Copy,
{
    type Config = FirDesignConfig<F>;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.order == 0 {
            return Err(ConfigError::InvalidArgument {
                arg: "order",
                reason: "order must be greater than zero",
            });
        }
        if config.order % 2 != 0 {
            return Err(ConfigError::InvalidArgument {
                arg: "order",
                reason: "order must be even so the design has a center tap",
            });
        }
        if config.cutoff.is_empty() {
            return Err(ConfigError::EmptyInput { arg: "cutoff" });
        }
        let expected = match config.band {
            FilterBandType::Lowpass | FilterBandType::Highpass => 1,
            FilterBandType::Bandpass | FilterBandType::Bandstop => 2,
        };
        if config.cutoff.len() != expected {
            return Err(ConfigError::InvalidArgument {
                arg: "cutoff",
                reason: match config.band {
                    FilterBandType::Lowpass | FilterBandType::Highpass => {
                        "lowpass/highpass designs require one cutoff"
                    }
                    FilterBandType::Bandpass | FilterBandType::Bandstop => {
                        "bandpass/bandstop designs require two cutoffs"
                    }
                },
            });
        }
        if config
            .cutoff
            .iter()
            .any(|c| *c <= F::zero() || *c >= F::one())
        {
            return Err(ConfigError::InvalidArgument {
                arg: "cutoff",
                reason: "cutoff frequencies must lie in (0, 1)",
            });
        }
        if config.cutoff.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::InvalidArgument {
                arg: "cutoff",
                reason: "cutoff frequencies must be strictly increasing",
            });
        }
        windows::validate_config(config.window, config.order + 1, config.beta)?;

        Ok(Self {
            band: config.band,
            cutoff: config.cutoff,
            order: config.order,
            window: config.window,
            beta: config.beta,
        })
    }
}

impl<F> FirWinDesign<F> for FirDesignKernel<F>
where
    F: RealField + FromPrimitive + Bessel + Copy,
{
    fn run_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<F> + ?Sized,
    {
        let coeffs = self.run_alloc()?;
        let out_slice = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        if out_slice.len() != coeffs.len() {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: coeffs.len(),
                got: out_slice.len(),
            });
        }
        out_slice.copy_from_slice(&coeffs);
        Ok(())
    }

    fn run_alloc(&self) -> Result<Vec<F>, ExecInvariantViolation> {
        let ideal = ideal_response_impl(self.band, &self.cutoff, self.order);
        let window = windows::get_window(self.window, self.order + 1, self.beta)
            .map_err(ExecInvariantViolation::from)?;
        Ok(ideal
            .iter()
            .zip(window.iter())
            .map(|(h, w)| *h * *w)
            .collect())
    }
}
