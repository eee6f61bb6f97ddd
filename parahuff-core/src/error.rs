//! Error types shared by the parahuff workspace.
//!
//! Mirrors the shape of a typical compression-crate error enum: one
//! variant per failure mode named in the design, plus an `Io` passthrough.

use std::io;
use thiserror::Error;

/// The error type for ParaHuff compression and decompression operations.
#[derive(Debug, Error)]
pub enum ParaHuffError {
    /// I/O error from the underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A CLI argument was missing, wrong in count, or pointed at an unreadable path.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the argument problem.
        message: String,
    },

    /// The device reported insufficient free memory for `fixed + 50 MiB`.
    #[error("insufficient device memory: {required} bytes required, {free} bytes free")]
    InsufficientMemory {
        /// Bytes free on the device.
        free: u64,
        /// Bytes required (fixed structures + the 50 MiB floor).
        required: u64,
    },

    /// The device runtime reported a failure after a kernel launch.
    #[error("device launch failed: {message}")]
    DeviceLaunch {
        /// Message reported by the device runtime.
        message: String,
    },

    /// The container's payload was exhausted before `expected` bytes were decoded.
    #[error("truncated payload: decoded {decoded} of {expected} bytes")]
    Truncated {
        /// Number of bytes actually decoded before the payload ran out.
        decoded: u32,
        /// Number of bytes the container header promised.
        expected: u32,
    },

    /// The container is structurally invalid (too short to hold its header, etc).
    #[error("corrupt container: {message}")]
    CorruptContainer {
        /// Description of what was wrong.
        message: String,
    },
}

/// Result type alias for ParaHuff operations.
pub type Result<T> = std::result::Result<T, ParaHuffError>;

impl ParaHuffError {
    /// Build an [`ParaHuffError::InvalidArgument`].
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Build an [`ParaHuffError::InsufficientMemory`].
    pub fn insufficient_memory(free: u64, required: u64) -> Self {
        Self::InsufficientMemory { free, required }
    }

    /// Build a [`ParaHuffError::DeviceLaunch`].
    pub fn device_launch(message: impl Into<String>) -> Self {
        Self::DeviceLaunch {
            message: message.into(),
        }
    }

    /// Build a [`ParaHuffError::CorruptContainer`].
    pub fn corrupt_container(message: impl Into<String>) -> Self {
        Self::CorruptContainer {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParaHuffError::insufficient_memory(10 * 1024 * 1024, 50 * 1024 * 1024);
        assert!(err.to_string().contains("insufficient device memory"));

        let err = ParaHuffError::invalid_argument("expected 2 positional arguments");
        assert!(err.to_string().contains("expected 2 positional"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: ParaHuffError = io_err.into();
        assert!(matches!(err, ParaHuffError::Io(_)));
    }
}
