//! Spectral analysis by direct evaluation of the discrete Fourier
//! transform.
//!
//! Every bin is computed as the literal correlation of the input with a
//! complex exponential, so the cost is quadratic in the transform
//! length. That keeps each output term traceable to the defining sum,
//! which is the point of this crate; none of these routines ever swap
//! in an FFT. The per-bin sums are mutually independent, so the outer
//! loop over bins could run in parallel; it is kept sequential here.
//!
//! Padding policy: an explicit transform length is honored exactly.
//! Without one, an input whose length is already a power of two is
//! transformed as-is, and any other length is zero-extended to the next
//! power of two.

use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D, Write1D};
use crate::signal::traits::Dft1D;
use alloc::vec::Vec;
use nalgebra::Complex;

fn transform_len(n: usize, padding: Option<usize>) -> usize {
    match padding {
        Some(target) => target,
        // A power-of-two input passes through unpadded; only other
        // lengths grow to the next power of two.
        None if n.is_power_of_two() => n,
        None => n.next_power_of_two(),
    }
}

fn dft_real_impl(x: &[f64], n: usize) -> Vec<Complex<f64>> {
    let mut spectrum = Vec::with_capacity(n);
    for k in 0..n {
        let mut sum = Complex::new(0.0, 0.0);
        for (i, sample) in x.iter().enumerate() {
            let angle = -2.0 * core::f64::consts::PI * (k as f64) * (i as f64) / (n as f64);
            sum += Complex::new(sample * angle.cos(), sample * angle.sin());
        }
        spectrum.push(sum);
    }
    spectrum
}

fn dft_complex_impl(x: &[Complex<f64>], n: usize) -> Vec<Complex<f64>> {
    let mut spectrum = Vec::with_capacity(n);
    for k in 0..n {
        let mut sum = Complex::new(0.0, 0.0);
        for (i, sample) in x.iter().enumerate() {
            let angle = -2.0 * core::f64::consts::PI * (k as f64) * (i as f64) / (n as f64);
            sum += sample * Complex::from_polar(1.0, angle);
        }
        spectrum.push(sum);
    }
    spectrum
}

/// Constructor config for [`DftKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DftConfig {
    /// Explicit transform length; `None` applies the power-of-two
    /// padding policy.
    pub padding: Option<usize>,
}

/// Direct DFT kernel.
///
/// The samples beyond the input length are implied zeros, so padded
/// transforms never materialize the extended input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DftKernel {
    padding: Option<usize>,
}

impl DftKernel {
    fn checked_len(&self, input_len: usize) -> Result<usize, ExecInvariantViolation> {
        if input_len == 0 {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "dft input must be non-empty",
            });
        }
        if let Some(target) = self.padding {
            if target < input_len {
                return Err(ExecInvariantViolation::Config(ConfigError::InvalidArgument {
                    arg: "padding",
                    reason: "padding must not be smaller than the input length",
                }));
            }
        }
        Ok(transform_len(input_len, self.padding))
    }

    /// Transform complex samples with the configured padding policy.
    pub fn run_complex_alloc<I>(
        &self,
        input: &I,
    ) -> Result<Vec<Complex<f64>>, ExecInvariantViolation>
    where
        I: Read1D<Complex<f64>> + ?Sized,
    {
        let x = input.read_slice().map_err(ExecInvariantViolation::from)?;
        let n = self.checked_len(x.len())?;
        Ok(dft_complex_impl(x, n))
    }
}

impl KernelLifecycle for DftKernel {
    type Config = DftConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.padding == Some(0) {
            return Err(ConfigError::InvalidArgument {
                arg: "padding",
                reason: "padding must be greater than zero",
            });
        }
        Ok(Self {
            padding: config.padding,
        })
    }
}

impl Dft1D<f64> for DftKernel {
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<f64> + ?Sized,
        O: Write1D<Complex<f64>> + ?Sized,
    {
        let spectrum = self.run_alloc(input)?;
        let out_slice = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        if out_slice.len() != spectrum.len() {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: spectrum.len(),
                got: out_slice.len(),
            });
        }
        out_slice.copy_from_slice(&spectrum);
        Ok(())
    }

    fn run_alloc<I>(&self, input: &I) -> Result<Vec<Complex<f64>>, ExecInvariantViolation>
    where
        I: Read1D<f64> + ?Sized,
    {
        let x = input.read_slice().map_err(ExecInvariantViolation::from)?;
        let n = self.checked_len(x.len())?;
        Ok(dft_real_impl(x, n))
    }
}

/// DFT of real samples under the default padding policy.
pub fn dft(x: &[f64]) -> Vec<Complex<f64>> {
    dft_padded(x, None)
}

/// DFT of real samples with an explicit transform length.
pub fn dft_padded(x: &[f64], padding: Option<usize>) -> Vec<Complex<f64>> {
    let kernel = match DftKernel::try_new(DftConfig { padding }) {
        Ok(kernel) => kernel,
        Err(_) => return Vec::new(),
    };
    kernel.run_alloc(x).unwrap_or_default()
}

/// DFT of complex samples with an optional explicit transform length.
pub fn dft_complex(x: &[Complex<f64>], padding: Option<usize>) -> Vec<Complex<f64>> {
    let kernel = match DftKernel::try_new(DftConfig { padding }) {
        Ok(kernel) => kernel,
        Err(_) => return Vec::new(),
    };
    kernel.run_complex_alloc(x).unwrap_or_default()
}

/// Magnitude of each spectrum bin.
pub fn magnitude(spectrum: &[Complex<f64>]) -> Vec<f64> {
    spectrum.iter().map(|z| z.norm()).collect()
}

/// Phase of each spectrum bin in radians.
pub fn phase(spectrum: &[Complex<f64>]) -> Vec<f64> {
    spectrum.iter().map(|z| z.arg()).collect()
}

/// Magnitude of each spectrum bin in decibels.
///
/// The `1e-10` floor keeps zero-magnitude bins at exactly -200 dB
/// rather than negative infinity.
pub fn magnitude_db(spectrum: &[Complex<f64>]) -> Vec<f64> {
    spectrum
        .iter()
        .map(|z| 20.0 * (z.norm() + 1e-10).log10())
        .collect()
}

/// Frequency in Hz of each of `n` bins at sample rate `fs`.
pub fn bin_frequencies(n: usize, fs: f64) -> Vec<f64> {
    (0..n).map(|k| k as f64 * fs / n as f64).collect()
}

/// Reorder a spectrum so the zero-frequency bin sits at the center.
pub fn center_spectrum(spectrum: &[Complex<f64>]) -> Vec<Complex<f64>> {
    let split = (spectrum.len() + 1) / 2;
    let mut centered = Vec::with_capacity(spectrum.len());
    centered.extend_from_slice(&spectrum[split..]);
    centered.extend_from_slice(&spectrum[..split]);
    centered
}

/// Bin frequencies in [`center_spectrum`] ordering, negative half first.
pub fn centered_bin_frequencies(n: usize, fs: f64) -> Vec<f64> {
    (0..n)
        .map(|k| (k as isize - (n / 2) as isize) as f64 * fs / n as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::convolve::{convolve, ConvolveMode};
    use approx::assert_abs_diff_eq;

    #[test]
    fn dft_matches_the_analytic_transform_of_a_short_ramp() {
        // Length 3 pads to 4; the four bins have closed forms.
        let x = [1.0f64, 0.5, 0.25];
        let spectrum = dft(&x);
        assert_eq!(spectrum.len(), 4);

        let expected = [
            Complex::new(1.75, 0.0),
            Complex::new(0.75, -0.5),
            Complex::new(0.75, 0.0),
            Complex::new(0.75, 0.5),
        ];
        for (actual, expected) in spectrum.iter().zip(expected.iter()) {
            assert_abs_diff_eq!(actual.re, expected.re, epsilon = 1e-12);
            assert_abs_diff_eq!(actual.im, expected.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn power_of_two_inputs_stay_unpadded_and_others_grow() {
        assert_eq!(dft(&vec![1.0f64; 8]).len(), 8);
        assert_eq!(dft(&vec![1.0f64; 5]).len(), 8);
        assert_eq!(dft(&vec![1.0f64; 6]).len(), 8);
        assert_eq!(dft(&vec![1.0f64; 9]).len(), 16);
        assert_eq!(dft(&[1.0f64]).len(), 1);
    }

    #[test]
    fn explicit_padding_controls_the_transform_length() {
        let x = [1.0f64, 2.0, 3.0];
        let spectrum = dft_padded(&x, Some(10));
        assert_eq!(spectrum.len(), 10);
        // Zero padding leaves the DC bin at the plain sum.
        assert_abs_diff_eq!(spectrum[0].re, 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(spectrum[0].im, 0.0, epsilon = 1e-12);

        let exact = dft_padded(&x, Some(3));
        assert_eq!(exact.len(), 3);
    }

    #[test]
    fn a_pure_tone_concentrates_in_its_bin() {
        let n = 16usize;
        let x: Vec<f64> = (0..n)
            .map(|i| (2.0 * core::f64::consts::PI * 3.0 * i as f64 / n as f64).cos())
            .collect();
        let spectrum = dft(&x);
        let mags = magnitude(&spectrum);

        assert_abs_diff_eq!(mags[3], n as f64 / 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(mags[n - 3], n as f64 / 2.0, epsilon = 1e-9);
        for (k, m) in mags.iter().enumerate() {
            if k != 3 && k != n - 3 {
                assert_abs_diff_eq!(*m, 0.0, epsilon = 1e-9);
            }
        }

        let freqs = bin_frequencies(n, 16_000.0);
        assert_abs_diff_eq!(freqs[3], 3_000.0, epsilon = 1e-12);
    }

    #[test]
    fn the_transform_is_linear() {
        let x = [0.2f64, -1.0, 0.5, 2.0, -0.3, 1.1, 0.0, -0.7];
        let y = [1.0f64, 0.25, -0.5, 0.75, 0.1, -1.2, 0.6, 0.9];
        let (a, b) = (2.0f64, -0.5f64);

        let combined: Vec<f64> = x.iter().zip(y.iter()).map(|(xi, yi)| a * xi + b * yi).collect();
        let lhs = dft(&combined);
        let fx = dft(&x);
        let fy = dft(&y);
        for (k, bin) in lhs.iter().enumerate() {
            let rhs = fx[k] * a + fy[k] * b;
            assert_abs_diff_eq!(bin.re, rhs.re, epsilon = 1e-9);
            assert_abs_diff_eq!(bin.im, rhs.im, epsilon = 1e-9);
        }
    }

    #[test]
    fn convolution_in_time_is_multiplication_in_frequency() {
        let h = [0.5f64, 1.0, 0.5];
        let x = [2.0f64, 1.0, 0.0, 1.0, 2.0];
        let y = convolve(&x, &h, ConvolveMode::Full);
        assert_eq!(y.len(), 7);

        let fy = dft_padded(&y, Some(8));
        let fh = dft_padded(&h, Some(8));
        let fx = dft_padded(&x, Some(8));
        for k in 0..8 {
            let product = fh[k] * fx[k];
            assert_abs_diff_eq!(fy[k].re, product.re, epsilon = 1e-9);
            assert_abs_diff_eq!(fy[k].im, product.im, epsilon = 1e-9);
        }
    }

    #[test]
    fn kernel_contracts_validate_config_and_inputs() {
        let err = DftKernel::try_new(DftConfig { padding: Some(0) })
            .expect_err("zero padding must fail");
        assert_eq!(
            err,
            ConfigError::InvalidArgument {
                arg: "padding",
                reason: "padding must be greater than zero",
            }
        );

        let kernel =
            DftKernel::try_new(DftConfig { padding: Some(4) }).expect("dft kernel should initialize");
        let too_long = [1.0f64; 6];
        let err = kernel
            .run_alloc(too_long.as_slice())
            .expect_err("padding below input length must fail");
        assert_eq!(
            err,
            ExecInvariantViolation::Config(ConfigError::InvalidArgument {
                arg: "padding",
                reason: "padding must not be smaller than the input length",
            })
        );

        let kernel =
            DftKernel::try_new(DftConfig { padding: None }).expect("dft kernel should initialize");
        let empty: [f64; 0] = [];
        let err = kernel
            .run_alloc(empty.as_slice())
            .expect_err("empty input must fail");
        assert_eq!(
            err,
            ExecInvariantViolation::InvalidState {
                reason: "dft input must be non-empty",
            }
        );
    }

    #[test]
    fn run_into_checks_the_output_length() {
        let kernel =
            DftKernel::try_new(DftConfig { padding: None }).expect("dft kernel should initialize");
        let x = [1.0f64, 0.5, 0.25, 0.125, 0.0625];

        let mut short = vec![Complex::new(0.0f64, 0.0); 5];
        let err = kernel
            .run_into(x.as_slice(), short.as_mut_slice())
            .expect_err("output size mismatch must fail");
        assert!(matches!(
            err,
            ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: 8,
                got: 5,
            }
        ));

        let mut exact = vec![Complex::new(0.0f64, 0.0); 8];
        kernel
            .run_into(x.as_slice(), exact.as_mut_slice())
            .expect("dft run_into should succeed");
        assert_abs_diff_eq!(exact[0].re, x.iter().sum::<f64>(), epsilon = 1e-12);
    }

    #[test]
    fn complex_input_matches_the_real_path() {
        let x = [0.5f64, -0.25, 1.0, 0.75, -1.5];
        let xc: Vec<Complex<f64>> = x.iter().map(|v| Complex::new(*v, 0.0)).collect();

        let real_path = dft(&x);
        let complex_path = dft_complex(&xc, None);
        assert_eq!(real_path.len(), complex_path.len());
        for (a, b) in real_path.iter().zip(complex_path.iter()) {
            assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-12);
            assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn spectrum_helpers_report_magnitude_phase_and_bins() {
        let bins = [Complex::new(3.0f64, 4.0), Complex::new(0.0, 1.0), Complex::new(0.0, 0.0)];
        let mags = magnitude(&bins);
        assert_abs_diff_eq!(mags[0], 5.0, epsilon = 1e-12);

        let phases = phase(&bins);
        assert_abs_diff_eq!(phases[1], core::f64::consts::FRAC_PI_2, epsilon = 1e-12);

        let db = magnitude_db(&bins);
        assert_abs_diff_eq!(db[2], -200.0, epsilon = 1e-9);
        let unit = magnitude_db(&[Complex::new(1.0f64, 0.0)]);
        assert_abs_diff_eq!(unit[0], 0.0, epsilon = 1e-8);
    }

    #[test]
    fn centering_splits_the_spectrum_at_the_nyquist_bin() {
        let bins: Vec<Complex<f64>> = (0..4).map(|k| Complex::new(k as f64, 0.0)).collect();
        let centered = center_spectrum(&bins);
        let order: Vec<f64> = centered.iter().map(|z| z.re).collect();
        assert_eq!(order, vec![2.0, 3.0, 0.0, 1.0]);
        assert_eq!(
            centered_bin_frequencies(4, 4_000.0),
            vec![-2_000.0, -1_000.0, 0.0, 1_000.0]
        );

        let bins: Vec<Complex<f64>> = (0..5).map(|k| Complex::new(k as f64, 0.0)).collect();
        let centered = center_spectrum(&bins);
        let order: Vec<f64> = centered.iter().map(|z| z.re).collect();
        assert_eq!(order, vec![3.0, 4.0, 0.0, 1.0, 2.0]);
        assert_eq!(
            centered_bin_frequencies(5, 5_000.0),
            vec![-2_000.0, -1_000.0, 0.0, 1_000.0, 2_000.0]
        );
    }
}
