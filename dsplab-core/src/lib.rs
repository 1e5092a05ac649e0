//! Numeric substrate shared by the `dsplab` workspace.
//!
//! The routines in this crate are written from their textbook definitions
//! so the arithmetic stays inspectable end to end. Higher-level kernels in
//! `dsplab` wrap these primitives with validation and buffer management.
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod error;

pub use error::{Error, Result};

#[cfg(feature = "alloc")]
pub mod numerics;
