//! First-principles numeric routines expressed over `ndarray` views.

pub mod convolve;

pub use convolve::{convolve, ConvolveMode};
