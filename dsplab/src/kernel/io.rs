use super::ConfigError;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

#[cfg(feature = "alloc")]
use ndarray::{Array1, ArrayView1, ArrayViewMut1};

/// Adapter trait for reading contiguous 1D input.
///
/// Signals, tap vectors, and windows all reach the kernels through this
/// trait, so callers can hand over slices, fixed arrays, `Vec`s, or
/// `ndarray` views interchangeably.
pub trait Read1D<T> {
    /// Borrow the underlying input as a contiguous slice.
    fn read_slice(&self) -> Result<&[T], ConfigError>;
}

/// Adapter trait for writing contiguous 1D output.
pub trait Write1D<T> {
    /// Borrow the underlying output as a mutable contiguous slice.
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError>;
}

impl<T> Read1D<T> for [T] {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        Ok(self)
    }
}

impl<T> Write1D<T> for [T] {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        Ok(self)
    }
}

impl<T, const N: usize> Read1D<T> for [T; N] {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        Ok(self)
    }
}

impl<T, const N: usize> Write1D<T> for [T; N] {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        Ok(self)
    }
}

#[cfg(feature = "alloc")]
impl<T> Read1D<T> for Vec<T> {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        Ok(self.as_slice())
    }
}

#[cfg(feature = "alloc")]
impl<T> Write1D<T> for Vec<T> {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        Ok(self.as_mut_slice())
    }
}

#[cfg(feature = "alloc")]
impl<T> Read1D<T> for Array1<T> {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        self.as_slice()
            .ok_or(ConfigError::NonContiguous { arg: "array" })
    }
}

#[cfg(feature = "alloc")]
impl<T> Write1D<T> for Array1<T> {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        self.as_slice_mut()
            .ok_or(ConfigError::NonContiguous { arg: "array" })
    }
}

#[cfg(feature = "alloc")]
impl<'a, T> Read1D<T> for ArrayView1<'a, T> {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        self.as_slice()
            .ok_or(ConfigError::NonContiguous { arg: "array_view" })
    }
}

#[cfg(feature = "alloc")]
impl<'a, T> Write1D<T> for ArrayViewMut1<'a, T> {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        self.as_slice_mut().ok_or(ConfigError::NonContiguous {
            arg: "array_view_mut",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, Read1D, Write1D};

    #[test]
    fn taps_read_through_slices_and_arrays() {
        let taps = [0.5f64, 1.0, 0.5];
        assert_eq!(taps.read_slice().expect("array adapter").len(), 3);

        let s: &[f64] = &taps;
        assert_eq!(s.read_slice().expect("slice adapter")[1], 1.0);
    }

    #[test]
    fn windows_write_through_vecs() {
        let mut window = vec![0.0f64; 5];
        let slice = window.write_slice_mut().expect("vec write adapter");
        slice.copy_from_slice(&[0.08, 0.54, 1.0, 0.54, 0.08]);
        assert_eq!(window, vec![0.08, 0.54, 1.0, 0.54, 0.08]);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn ndarray_adapters_roundtrip() {
        use ndarray::Array1;

        let signal = Array1::from(vec![2.0f64, 1.0, 0.0, 1.0, 2.0]);
        assert_eq!(signal.read_slice().expect("array1 read")[4], 2.0);

        let mut out = Array1::from(vec![0.0f64; 3]);
        out.write_slice_mut()
            .expect("array1 write")
            .copy_from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(out.as_slice().expect("slice"), &[1.0, 2.0, 3.0]);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn strided_views_are_rejected() {
        use ndarray::{s, Array1};

        let signal = Array1::from(vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let every_other = signal.slice(s![..;2]);
        let err = every_other
            .read_slice()
            .expect_err("strided view should not read");
        assert_eq!(err, ConfigError::NonContiguous { arg: "array_view" });
    }
}
