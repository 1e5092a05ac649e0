//! Linear convolution evaluated directly from its defining sum.

use crate::{Error, Result};
use alloc::string::String;
use ndarray::{s, Array1, ArrayView1};

/// Convolve mode determines how much of the raw convolution is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvolveMode {
    /// Every overlap of the two sequences: `a.len() + v.len() - 1` samples.
    Full,
    /// The centered `a.len()` samples of the full convolution, with
    /// `(v.len() - 1) / 2` samples dropped from the leading edge.
    Same,
}

/// Linear convolution of two one-dimensional sequences.
///
/// The result is accumulated term by term from the defining sum
/// `y[n] = sum_k v[k] * a[n - k]`, with `a` treated as zero outside its
/// support. We take `v` as the convolution kernel. No transform-domain
/// shortcut is used, so every output sample can be traced back to the
/// products that formed it.
///
/// Matches `numpy.convolve` for `Full`, and for `Same` whenever
/// `a.len() >= v.len()`; `Same` always returns `a.len()` samples here.
///
/// # Parameters
/// * `a` - the input sequence.
/// * `v` - the convolution kernel.
/// * `mode` - how much of the raw convolution to return.
///
/// # Errors
/// Returns [`Error::Conv`] when either operand is empty.
///
/// # Examples
/// ```
/// use dsplab_core::numerics::{convolve, ConvolveMode};
/// use ndarray::array;
///
/// let x = array![2., 1., 0., 1., 2.];
/// let h = array![0.5, 1., 0.5];
///
/// let full = convolve(x.view(), h.view(), ConvolveMode::Full).unwrap();
/// assert_eq!(full, array![1., 2.5, 2., 1., 2., 2.5, 1.]);
///
/// let same = convolve(x.view(), h.view(), ConvolveMode::Same).unwrap();
/// assert_eq!(same, array![2.5, 2., 1., 2., 2.5]);
/// ```
pub fn convolve<T>(a: ArrayView1<T>, v: ArrayView1<T>, mode: ConvolveMode) -> Result<Array1<T>>
where
    T: num_traits::NumAssign + core::marker::Copy,
{
    if a.is_empty() || v.is_empty() {
        return Err(Error::Conv {
            reason: String::from("convolution operands must be non-empty"),
        });
    }
    let mut full = Array1::<T>::zeros(a.len() + v.len() - 1);
    for (i, &ai) in a.iter().enumerate() {
        for (j, &vj) in v.iter().enumerate() {
            full[i + j] += ai * vj;
        }
    }
    match mode {
        ConvolveMode::Full => Ok(full),
        ConvolveMode::Same => {
            let start = (v.len() - 1) / 2;
            Ok(full.slice(s![start..start + a.len()]).to_owned())
        }
    }
}
