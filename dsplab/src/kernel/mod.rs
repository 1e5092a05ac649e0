//! Shared trait-first kernel substrate.
//!
//! Reusable interfaces for constructor validation and 1D buffer
//! adapters. Every signal kernel in this crate is built on the same
//! skeleton: a config struct, eager validation through
//! [`KernelLifecycle::try_new`], and checked `run_into`/`run_alloc`
//! entrypoints over [`Read1D`]/[`Write1D`] buffers.

mod errors;
mod io;
mod lifecycle;

pub use errors::*;
pub use io::*;
pub use lifecycle::*;
