//! Special functions backing the signal kernels.

use nalgebra::RealField;
use num_traits::FromPrimitive;

/// Zeroth-order modified Bessel function of the first kind.
///
/// Required by the Kaiser window. Evaluated with the Abramowitz & Stegun
/// 9.8.1/9.8.2 polynomial approximations: a power series in `(x/3.75)^2`
/// below the split point and a scaled asymptotic series above it, accurate
/// to better than 2e-7 of the scaled value across the real line.
pub trait Bessel {
    /// Evaluate `I0(self)`.
    fn i0(self) -> Self;
}

const I0_SMALL: [f64; 7] = [
    1.0, 3.5156229, 3.0899424, 1.2067492, 0.2659732, 0.0360768, 0.0045813,
];

const I0_LARGE: [f64; 9] = [
    0.39894228,
    0.01328592,
    0.00225319,
    -0.00157565,
    0.00916281,
    -0.02057706,
    0.02635537,
    -0.01647633,
    0.00392377,
];

impl<F> Bessel for F
where
    F: RealField + FromPrimitive + Copy,
{
    fn i0(self) -> Self {
        let split = F::from_f64(3.75).expect("scalar conversion");
        let ax = self.abs();
        if ax < split {
            let t = (self / split) * (self / split);
            horner(&I0_SMALL, t)
        } else {
            let t = split / ax;
            (ax.exp() / ax.sqrt()) * horner(&I0_LARGE, t)
        }
    }
}

fn horner<F>(coeffs: &[f64], t: F) -> F
where
    F: RealField + FromPrimitive + Copy,
{
    coeffs.iter().rev().fold(F::zero(), |acc, &c| {
        acc * t + F::from_f64(c).expect("scalar conversion")
    })
}
