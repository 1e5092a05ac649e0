//! Window functions for spectral shaping and FIR design.
//!
//! All windows are generated symmetric over `n in 0..len` with
//! denominator `len - 1`, matching the symmetric (`sym=True`) forms of
//! `numpy`/`scipy.signal.windows`. Values lie in `[0, 1]`; the Kaiser
//! window takes its shape from the `beta` parameter and is the only kind
//! that accepts one.

use crate::kernel::ConfigError;
use crate::special::Bessel;
use alloc::vec;
use alloc::vec::Vec;
use nalgebra::RealField;
use num_traits::FromPrimitive;

mod kernels;

pub use kernels::*;

/// Window families supported by [`get_window`] and [`WindowKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    /// All ones.
    Rectangular,
    /// Raised cosine, zero at both ends.
    Hann,
    /// Raised cosine on a pedestal.
    Hamming,
    /// Three-term cosine with stronger sidelobe suppression.
    Blackman,
    /// Bessel-shaped window parameterized by `beta`.
    Kaiser,
}

pub(crate) fn validate_config<F>(
    kind: WindowKind,
    nx: usize,
    beta: Option<F>,
) -> Result<(), ConfigError>
where
    F: RealField + Copy,
{
    if nx <= 1 {
        return Err(ConfigError::InvalidArgument {
            arg: "nx",
            reason: "window length must be greater than 1",
        });
    }
    match (kind, beta) {
        (WindowKind::Kaiser, None) => Err(ConfigError::InvalidArgument {
            arg: "beta",
            reason: "kaiser window requires a beta parameter",
        }),
        (WindowKind::Kaiser, Some(beta)) if beta < F::zero() => Err(ConfigError::InvalidArgument {
            arg: "beta",
            reason: "beta must be non-negative",
        }),
        (WindowKind::Kaiser, Some(_)) => Ok(()),
        (_, Some(_)) => Err(ConfigError::InvalidArgument {
            arg: "beta",
            reason: "beta only applies to the kaiser window",
        }),
        (_, None) => Ok(()),
    }
}

/// Samples for a validated window spec. Callers must have run
/// [`validate_config`] first so the arithmetic cannot degenerate.
fn generate<F>(kind: WindowKind, nx: usize, beta: Option<F>) -> Vec<F>
where
    F: RealField + FromPrimitive + Bessel + Copy,
{
    match kind {
        WindowKind::Rectangular => vec![F::one(); nx],
        WindowKind::Hann => general_cosine_impl(nx, &[0.5, -0.5]),
        WindowKind::Hamming => general_cosine_impl(nx, &[0.54, -0.46]),
        WindowKind::Blackman => {
            // The exact endpoints are 0; roundoff drives them to -2e-17,
            // which would break the [0, 1] range contract.
            general_cosine_impl(nx, &[0.42, -0.5, 0.08])
                .into_iter()
                .map(|w: F| w.max(F::zero()))
                .collect()
        }
        WindowKind::Kaiser => {
            let beta = beta.unwrap_or_else(F::zero);
            kaiser_impl(nx, beta)
        }
    }
}

/// `w[n] = sum_j a_j * cos(2*pi*j*n / (nx - 1))`.
///
/// Hann, Hamming, and Blackman are all members of this family; the signs
/// of the higher-order terms are carried in `weights`.
fn general_cosine_impl<F>(nx: usize, weights: &[f64]) -> Vec<F>
where
    F: RealField + FromPrimitive + Copy,
{
    let denom = F::from_usize(nx - 1).expect("length conversion");
    (0..nx)
        .map(|n| {
            let theta = F::two_pi() * F::from_usize(n).expect("index conversion") / denom;
            weights
                .iter()
                .enumerate()
                .fold(F::zero(), |acc, (j, &a)| {
                    let aj = F::from_f64(a).expect("scalar conversion");
                    let j = F::from_usize(j).expect("index conversion");
                    acc + aj * (j * theta).cos()
                })
        })
        .collect()
}

/// `w[n] = I0(beta * sqrt(1 - ((n - a)/a)^2)) / I0(beta)` with
/// `a = (nx - 1)/2`. The endpoint ratio is exactly ±1, so the square root
/// argument never goes negative.
fn kaiser_impl<F>(nx: usize, beta: F) -> Vec<F>
where
    F: RealField + FromPrimitive + Bessel + Copy,
{
    let half = F::one() / (F::one() + F::one());
    let alpha = F::from_usize(nx - 1).expect("length conversion") * half;
    let denom = beta.i0();
    (0..nx)
        .map(|n| {
            let ratio = (F::from_usize(n).expect("index conversion") - alpha) / alpha;
            let arg = beta * (F::one() - ratio * ratio).sqrt();
            arg.i0() / denom
        })
        .collect()
}

/// Generate a symmetric window of the requested kind and length.
///
/// `beta` is required for [`WindowKind::Kaiser`] and rejected for every
/// other kind; it is never defaulted.
pub fn get_window<F>(kind: WindowKind, nx: usize, beta: Option<F>) -> Result<Vec<F>, ConfigError>
where
    F: RealField + FromPrimitive + Bessel + Copy,
{
    validate_config(kind, nx, beta)?;
    Ok(generate(kind, nx, beta))
}

/// Rectangular window of length `nx`, or empty on an invalid length.
pub fn rectangular<F>(nx: usize) -> Vec<F>
where
    F: RealField + FromPrimitive + Bessel + Copy,
{
    get_window(WindowKind::Rectangular, nx, None).unwrap_or_default()
}

/// Hann window of length `nx`, or empty on an invalid length.
pub fn hann<F>(nx: usize) -> Vec<F>
where
    F: RealField + FromPrimitive + Bessel + Copy,
{
    get_window(WindowKind::Hann, nx, None).unwrap_or_default()
}

/// Hamming window of length `nx`, or empty on an invalid length.
pub fn hamming<F>(nx: usize) -> Vec<F>
where
    F: RealField + FromPrimitive + Bessel + Copy,
{
    get_window(WindowKind::Hamming, nx, None).unwrap_or_default()
}

/// Blackman window of length `nx`, or empty on an invalid length.
pub fn blackman<F>(nx: usize) -> Vec<F>
where
    F: RealField + FromPrimitive + Bessel + Copy,
{
    get_window(WindowKind::Blackman, nx, None).unwrap_or_default()
}

/// Kaiser window of length `nx` with shape `beta`, or empty on invalid
/// arguments.
pub fn kaiser<F>(nx: usize, beta: F) -> Vec<F>
where
    F: RealField + FromPrimitive + Bessel + Copy,
{
    get_window(WindowKind::Kaiser, nx, Some(beta)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_symmetric(w: &[f64]) {
        for i in 0..w.len() / 2 {
            assert_abs_diff_eq!(w[i], w[w.len() - 1 - i], epsilon = 1e-12);
        }
    }

    #[test]
    fn hann_matches_reference_values() {
        let w: Vec<f64> = hann(5);
        let expected = [0.0, 0.5, 1.0, 0.5, 0.0];
        for (a, b) in w.iter().zip(expected.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn hamming_matches_reference_values() {
        let w: Vec<f64> = hamming(5);
        let expected = [0.08, 0.54, 1.0, 0.54, 0.08];
        for (a, b) in w.iter().zip(expected.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn blackman_matches_reference_values() {
        let w: Vec<f64> = blackman(5);
        let expected = [0.0, 0.34, 1.0, 0.34, 0.0];
        for (a, b) in w.iter().zip(expected.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn all_kinds_are_symmetric() {
        for nx in [8usize, 9, 32, 33] {
            assert_symmetric(&hann::<f64>(nx));
            assert_symmetric(&hamming::<f64>(nx));
            assert_symmetric(&blackman::<f64>(nx));
            assert_symmetric(&kaiser::<f64>(nx, 4.0));
        }
    }

    #[test]
    fn all_kinds_stay_inside_the_unit_range() {
        for nx in [8usize, 17, 64] {
            for w in [
                rectangular::<f64>(nx),
                hann::<f64>(nx),
                hamming::<f64>(nx),
                blackman::<f64>(nx),
                kaiser::<f64>(nx, 8.0),
            ] {
                assert_eq!(w.len(), nx);
                for v in w {
                    assert!((0.0..=1.0).contains(&v), "window value {v} out of range");
                }
            }
        }
    }

    #[test]
    fn rectangular_is_exactly_one() {
        let w: Vec<f64> = rectangular(16);
        assert!(w.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn kaiser_center_and_edges_follow_the_bessel_form() {
        use crate::special::Bessel;

        let beta = 4.0f64;
        let w: Vec<f64> = kaiser(9, beta);
        assert_abs_diff_eq!(w[4], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(w[0], 1.0 / beta.i0(), epsilon = 1e-12);
        assert_abs_diff_eq!(w[8], 1.0 / beta.i0(), epsilon = 1e-12);
    }

    #[test]
    fn kaiser_with_zero_beta_degenerates_to_rectangular() {
        let w: Vec<f64> = kaiser(12, 0.0);
        for v in w {
            assert_abs_diff_eq!(v, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn larger_beta_narrows_the_kaiser_window() {
        let wide: Vec<f64> = kaiser(17, 2.0);
        let narrow: Vec<f64> = kaiser(17, 10.0);
        assert!(narrow[0] < wide[0]);
    }

    #[test]
    fn invalid_specs_surface_through_get_window() {
        let err = get_window::<f64>(WindowKind::Kaiser, 16, None)
            .expect_err("kaiser without beta must fail");
        assert_eq!(
            err,
            ConfigError::InvalidArgument {
                arg: "beta",
                reason: "kaiser window requires a beta parameter",
            }
        );

        let sugar: Vec<f64> = hann(1);
        assert!(sugar.is_empty());
    }
}
