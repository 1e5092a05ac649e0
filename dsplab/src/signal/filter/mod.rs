//! FIR filtering and window-method filter design.
//!
//! [`design`] turns a band specification into FIR taps; the kernels in
//! this module apply those taps to signals by direct convolution.

pub mod design;

mod kernels;
pub use kernels::*;
