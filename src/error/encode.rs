// Encode error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Encode error code constants shared with host-side diagnostics tooling.
///
/// Error code range: 1001-1002
pub struct EncodeErrorCodes {}

impl EncodeErrorCodes {
    /// Caller-provided buffer is smaller than the declared encoded size
    pub const BUFFER_TOO_SMALL: i32 = 1001;

    /// Producer symbol would collide with the NUL absence signal
    pub const INVALID_SYMBOL: i32 = 1002;
}

/// Log an encode error with structured context
pub fn log_encode_error(err: &EncodeError, context: &str) {
    error!(
        "Encode error in {}: code={}, component=Encoder, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Encoding-related errors
///
/// These errors cover the producer encode contract: a producer declares its
/// exact encoded size up front and must never write more than that into the
/// caller's buffer.
///
/// Error code range: 1001-1002
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Caller-provided buffer is smaller than the declared encoded size
    BufferTooSmall { required: usize, available: usize },

    /// Producer symbol is NUL or outside printable ASCII
    InvalidSymbol { symbol: u8 },
}

impl ErrorCode for EncodeError {
    fn code(&self) -> i32 {
        match self {
            EncodeError::BufferTooSmall { .. } => EncodeErrorCodes::BUFFER_TOO_SMALL,
            EncodeError::InvalidSymbol { .. } => EncodeErrorCodes::INVALID_SYMBOL,
        }
    }

    fn message(&self) -> String {
        match self {
            EncodeError::BufferTooSmall {
                required,
                available,
            } => {
                format!("Buffer too small: need {}, got {}", required, available)
            }
            EncodeError::InvalidSymbol { symbol } => {
                format!(
                    "Symbol 0x{:02x} is not a printable non-NUL ASCII character",
                    symbol
                )
            }
        }
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EncodeError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for EncodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_error_codes() {
        assert_eq!(
            EncodeError::BufferTooSmall {
                required: 6,
                available: 2
            }
            .code(),
            EncodeErrorCodes::BUFFER_TOO_SMALL
        );
        assert_eq!(
            EncodeError::InvalidSymbol { symbol: 0 }.code(),
            EncodeErrorCodes::INVALID_SYMBOL
        );
    }

    #[test]
    fn test_encode_error_messages() {
        let err = EncodeError::BufferTooSmall {
            required: 6,
            available: 2,
        };
        assert_eq!(err.message(), "Buffer too small: need 6, got 2");

        let err = EncodeError::InvalidSymbol { symbol: 0 };
        assert!(err.message().contains("0x00"));
    }

    #[test]
    fn test_encode_error_display() {
        let err = EncodeError::InvalidSymbol { symbol: 0 };
        let display = format!("{}", err);
        assert!(display.contains("EncodeError"));
        assert!(display.contains(&err.code().to_string()));
    }
}
