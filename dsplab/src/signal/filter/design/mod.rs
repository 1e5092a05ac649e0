//! Window-method FIR filter design.
//!
//! Designs follow the classical recipe: build the ideal (infinite-order)
//! band response truncated to `order + 1` taps around an exact center tap,
//! then taper it with a window from [`crate::signal::windows`]. No
//! passband rescaling is applied afterwards, so the DC gain of a windowed
//! lowpass is close to, but not exactly, one.

use crate::error::Error;
use crate::kernel::KernelLifecycle;
use crate::signal::traits::FirWinDesign;
use crate::signal::windows::WindowKind;
use crate::special::Bessel;
use alloc::vec::Vec;
use nalgebra::RealField;
use num_traits::FromPrimitive;

mod kernels;

pub use kernels::*;

/// Band geometry of a designed filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterBandType {
    /// Pass frequencies below the cutoff.
    Lowpass,
    /// Pass frequencies above the cutoff.
    Highpass,
    /// Pass frequencies between the two cutoffs.
    Bandpass,
    /// Reject frequencies between the two cutoffs.
    Bandstop,
}

/// Ideal lowpass prototype `h[i] = wc * sinc(wc * (i - order/2))` using
/// the normalized sinc, so the center tap is exactly `wc`.
fn ideal_lowpass_impl<F>(cutoff: F, order: usize) -> Vec<F>
where
    F: RealField + FromPrimitive + Copy,
{
    let center = order / 2;
    (0..=order)
        .map(|i| {
            if i == center {
                cutoff
            } else {
                let m = F::from_isize(i as isize - center as isize).expect("index conversion");
                (F::pi() * cutoff * m).sin() / (F::pi() * m)
            }
        })
        .collect()
}

/// Pre-window ideal response for any band type.
///
/// Highpass and bandstop are spectral complements: negate the lowpass
/// portion and restore the unit impulse at the center tap.
fn ideal_response_impl<F>(band: FilterBandType, cutoff: &[F], order: usize) -> Vec<F>
where
    F: RealField + FromPrimitive + Copy,
{
    let center = order / 2;
    match band {
        FilterBandType::Lowpass => ideal_lowpass_impl(cutoff[0], order),
        FilterBandType::Highpass => {
            let mut h: Vec<F> = ideal_lowpass_impl(cutoff[0], order)
                .iter()
                .map(|x| -*x)
                .collect();
            h[center] += F::one();
            h
        }
        FilterBandType::Bandpass => {
            let low = ideal_lowpass_impl(cutoff[0], order);
            let high = ideal_lowpass_impl(cutoff[1], order);
            high.iter().zip(low.iter()).map(|(h, l)| *h - *l).collect()
        }
        FilterBandType::Bandstop => {
            let low = ideal_lowpass_impl(cutoff[0], order);
            let high = ideal_lowpass_impl(cutoff[1], order);
            let mut h: Vec<F> = low.iter().zip(high.iter()).map(|(l, x)| *l - *x).collect();
            h[center] += F::one();
            h
        }
    }
}

/// Design a windowed FIR filter, allocating the coefficient vector.
///
/// Order `M` produces `M + 1` coefficients with the center tap at index
/// `M / 2`; `M` must be even and positive so that center exists. Cutoffs
/// are normalized to the Nyquist rate and must lie in `(0, 1)`,
/// strictly increasing: one cutoff for lowpass/highpass, two for
/// bandpass/bandstop. `beta` is required for the Kaiser window and
/// rejected for every other kind.
pub fn design_fir_dyn<F>(
    band: FilterBandType,
    cutoff: &[F],
    order: usize,
    window: WindowKind,
    beta: Option<F>,
) -> Result<Vec<F>, Error>
where
    F: RealField + FromPrimitive + Bessel + Copy,
{
    let kernel = FirDesignKernel::try_new(FirDesignConfig {
        band,
        cutoff: cutoff.to_vec(),
        order,
        window,
        beta,
    })
    .map_err(Error::from)?;
    kernel.run_alloc().map_err(Error::from)
}
