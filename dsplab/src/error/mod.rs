//! Crate-level error for the dynamic design entrypoints.
//!
//! Kernels report [`crate::kernel::ConfigError`] and
//! [`crate::kernel::ExecInvariantViolation`] directly; the `_dyn` free
//! functions fold both into this heap-backed type.

use core::{error, fmt};

use crate::kernel::{ConfigError, ExecInvariantViolation};

#[cfg(feature = "alloc")]
use alloc::string::String;

/// Errors raised whilst running dsplab.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// Argument passed into a function was invalid.
    #[cfg(feature = "alloc")]
    InvalidArg {
        /// The invalid arg
        arg: String,
        /// Explaining why arg is invalid.
        reason: String,
    },
    /// Argument passed into a function was invalid.
    #[cfg(not(feature = "alloc"))]
    InvalidArg,
    /// Execution was attempted with a violated kernel invariant.
    #[cfg(feature = "alloc")]
    ExecInvariantViolation {
        /// Why execution could not proceed.
        reason: String,
    },
    /// Execution was attempted with a violated kernel invariant.
    #[cfg(not(feature = "alloc"))]
    ExecInvariantViolation,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "alloc")]
            Error::InvalidArg { arg, reason } => {
                write!(f, "Invalid argument `{arg}`: {reason}")
            }
            #[cfg(not(feature = "alloc"))]
            Error::InvalidArg => write!(f, "Invalid argument."),
            #[cfg(feature = "alloc")]
            Error::ExecInvariantViolation { reason } => {
                write!(f, "Execution invariant violation: {reason}")
            }
            #[cfg(not(feature = "alloc"))]
            Error::ExecInvariantViolation => write!(f, "Execution invariant violation."),
        }
    }
}

impl error::Error for Error {}

#[cfg(feature = "alloc")]
impl From<ConfigError> for Error {
    fn from(value: ConfigError) -> Self {
        match value {
            ConfigError::EmptyInput { arg } => Error::InvalidArg {
                arg: arg.into(),
                reason: "must not be empty".into(),
            },
            ConfigError::InvalidArgument { arg, reason } => Error::InvalidArg {
                arg: arg.into(),
                reason: reason.into(),
            },
            ConfigError::NonContiguous { arg } => Error::InvalidArg {
                arg: arg.into(),
                reason: "must be contiguous in memory".into(),
            },
            ConfigError::LengthMismatch { arg, expected, got } => Error::InvalidArg {
                arg: arg.into(),
                reason: alloc::format!("expected length {expected}, got {got}"),
            },
        }
    }
}

#[cfg(not(feature = "alloc"))]
impl From<ConfigError> for Error {
    fn from(_: ConfigError) -> Self {
        Error::InvalidArg
    }
}

#[cfg(feature = "alloc")]
impl From<ExecInvariantViolation> for Error {
    fn from(value: ExecInvariantViolation) -> Self {
        match value {
            ExecInvariantViolation::Config(err) => Error::from(err),
            ExecInvariantViolation::InvalidState { reason } => Error::ExecInvariantViolation {
                reason: reason.into(),
            },
            ExecInvariantViolation::LengthMismatch { arg, expected, got } => {
                Error::ExecInvariantViolation {
                    reason: alloc::format!(
                        "length mismatch on `{arg}`: expected {expected}, got {got}"
                    ),
                }
            }
        }
    }
}

#[cfg(not(feature = "alloc"))]
impl From<ExecInvariantViolation> for Error {
    fn from(_: ExecInvariantViolation) -> Self {
        Error::ExecInvariantViolation
    }
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use super::*;

    #[test]
    fn config_errors_convert_with_their_context() {
        let err: Error = ConfigError::InvalidArgument {
            arg: "order",
            reason: "order must be even so the design has a center tap",
        }
        .into();
        assert_eq!(
            err,
            Error::InvalidArg {
                arg: "order".into(),
                reason: "order must be even so the design has a center tap".into(),
            }
        );
    }

    #[test]
    fn wrapped_config_errors_unwrap_through_exec_conversion() {
        let exec = ExecInvariantViolation::Config(ConfigError::EmptyInput { arg: "cutoff" });
        let err: Error = exec.into();
        assert_eq!(
            err,
            Error::InvalidArg {
                arg: "cutoff".into(),
                reason: "must not be empty".into(),
            }
        );
    }
}
