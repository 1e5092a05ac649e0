//! Trait-first window generation kernels.

use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Write1D};
use crate::signal::traits::WindowGenerate;
use crate::special::Bessel;
use alloc::vec::Vec;
use nalgebra::RealField;
use num_traits::FromPrimitive;

use super::WindowKind;

/// Constructor config for [`WindowKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowConfig<F> {
    /// Window family.
    pub kind: WindowKind,
    /// Output length.
    pub nx: usize,
    /// Kaiser shape parameter; required for kaiser, rejected otherwise.
    pub beta: Option<F>,
}

/// Trait-first window generation kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowKernel<F> {
    kind: WindowKind,
    nx: usize,
    beta: Option<F>,
}

impl<F> KernelLifecycle for WindowKernel<F>
where
    F: RealField + Copy,
{
    type Config = WindowConfig<F>;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        super::validate_config(config.kind, config.nx, config.beta)?;
        Ok(Self {
            kind: config.kind,
            nx: config.nx,
            beta: config.beta,
        })
    }
}

impl<F> WindowGenerate<F> for WindowKernel<F>
where
    F: RealField + FromPrimitive + Bessel + Copy,
{
    fn run_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<F> + ?Sized,
    {
        let generated = self.run_alloc()?;
        let out_slice = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        if out_slice.len() != generated.len() {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: generated.len(),
                got: out_slice.len(),
            });
        }
        out_slice.copy_from_slice(&generated);
        Ok(())
    }

    fn run_alloc(&self) -> Result<Vec<F>, ExecInvariantViolation> {
        Ok(super::generate(self.kind, self.nx, self.beta))
    }
}
