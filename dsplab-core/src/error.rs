//! Failure type shared by the numeric primitives.

#[cfg(feature = "alloc")]
use alloc::string::String;

/// Convenience alias for results produced by this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Failure raised by a numeric primitive.
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Convolution could not be computed from the provided operands.
    Conv {
        /// Human-readable description of the failure.
        reason: String,
    },
}

/// Failure raised by a numeric primitive.
#[cfg(not(feature = "alloc"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Convolution could not be computed from the provided operands.
    Conv,
}

#[cfg(feature = "alloc")]
impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Conv { reason } => write!(f, "convolution failure: {reason}"),
        }
    }
}

#[cfg(not(feature = "alloc"))]
impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Conv => write!(f, "convolution failure"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
