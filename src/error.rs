//! Error types for fasttrig runs.
//!
//! Numeric discrepancies and an unsupported timer are not errors: they are
//! reported on the console and the run continues. The variants below cover
//! the few setup failures that stop a run before any pass is timed, plus a
//! report sink that stops accepting output.

use std::fmt;
use std::io;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FasttrigError {
    /// The allocator could not provide a batch buffer.
    AllocationError { bytes: usize, alignment: usize },
    /// No valid layout exists for a batch of `len` values.
    LayoutError { len: usize, message: String },
    /// Rejected input: zero count, bad tolerance, mismatched batch lengths.
    ValidationError { message: String },
    /// The report sink failed.
    OutputError { kind: io::ErrorKind, message: String },
}

impl fmt::Display for FasttrigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FasttrigError::AllocationError { bytes, alignment } => write!(
                f,
                "could not allocate a {bytes}-byte batch aligned to {alignment} bytes"
            ),
            FasttrigError::LayoutError { len, message } => {
                write!(f, "no buffer layout for {len} angles: {message}")
            }
            FasttrigError::ValidationError { message } => {
                write!(f, "invalid run parameters: {message}")
            }
            FasttrigError::OutputError { kind, message } => {
                write!(f, "cannot write report ({kind:?}): {message}")
            }
        }
    }
}

impl std::error::Error for FasttrigError {}

impl From<io::Error> for FasttrigError {
    fn from(err: io::Error) -> Self {
        FasttrigError::OutputError {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FasttrigError>;

pub fn allocation_error(bytes: usize, alignment: usize) -> FasttrigError {
    FasttrigError::AllocationError { bytes, alignment }
}

pub fn layout_error(len: usize, message: impl Into<String>) -> FasttrigError {
    FasttrigError::LayoutError {
        len,
        message: message.into(),
    }
}

pub fn validation_error(message: impl Into<String>) -> FasttrigError {
    FasttrigError::ValidationError {
        message: message.into(),
    }
}
