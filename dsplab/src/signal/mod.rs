//! Signal processing kernels and helpers.
//!
//! Submodules are organized by operation: [`convolve`] and [`filter`]
//! for time-domain work, [`spectral`] for the direct DFT, [`windows`]
//! for window generation, and [`traits`] for the capability traits the
//! kernels implement.

pub mod traits;

#[cfg(feature = "alloc")]
pub mod convolve;
#[cfg(feature = "alloc")]
pub mod filter;
#[cfg(feature = "alloc")]
pub mod windows;

#[cfg(feature = "std")]
pub mod spectral;
