// Transport error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Transport error code constants shared with host-side diagnostics tooling.
///
/// Error code range: 2001-2003
pub struct TransportErrorCodes {}

impl TransportErrorCodes {
    /// Transport channel is not open
    pub const NOT_OPEN: i32 = 2001;

    /// Writing a frame to the transport failed
    pub const WRITE_FAILED: i32 = 2002;

    /// Reading inbound host data failed
    pub const READ_FAILED: i32 = 2003;
}

/// Log a transport error with structured context
pub fn log_transport_error(err: &TransportError, context: &str) {
    error!(
        "Transport error in {}: code={}, component=Transport, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Transport-related errors
///
/// These errors cover the frame-delivery boundary. Transport unreadiness
/// observed via `is_open`/`has_data` is not an error; these fire only when
/// an actual read or write attempt fails.
///
/// Error code range: 2001-2003
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Transport channel is not open
    NotOpen,

    /// Writing a frame to the transport failed
    WriteFailed { reason: String },

    /// Reading inbound host data failed
    ReadFailed { reason: String },
}

impl ErrorCode for TransportError {
    fn code(&self) -> i32 {
        match self {
            TransportError::NotOpen => TransportErrorCodes::NOT_OPEN,
            TransportError::WriteFailed { .. } => TransportErrorCodes::WRITE_FAILED,
            TransportError::ReadFailed { .. } => TransportErrorCodes::READ_FAILED,
        }
    }

    fn message(&self) -> String {
        match self {
            TransportError::NotOpen => {
                "Transport not open. Check is_open() before output().".to_string()
            }
            TransportError::WriteFailed { reason } => {
                format!("Failed to write frame: {}", reason)
            }
            TransportError::ReadFailed { reason } => {
                format!("Failed to read inbound data: {}", reason)
            }
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TransportError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for TransportError {}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::WriteFailed {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_codes() {
        assert_eq!(TransportError::NotOpen.code(), TransportErrorCodes::NOT_OPEN);
        assert_eq!(
            TransportError::WriteFailed {
                reason: "test".to_string()
            }
            .code(),
            TransportErrorCodes::WRITE_FAILED
        );
        assert_eq!(
            TransportError::ReadFailed {
                reason: "test".to_string()
            }
            .code(),
            TransportErrorCodes::READ_FAILED
        );
    }

    #[test]
    fn test_transport_error_messages() {
        assert!(TransportError::NotOpen.message().contains("not open"));
        let err = TransportError::WriteFailed {
            reason: "device detached".to_string(),
        };
        assert_eq!(err.message(), "Failed to write frame: device detached");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe");
        let err: TransportError = io_err.into();
        match err {
            TransportError::WriteFailed { reason } => assert!(reason.contains("broken pipe")),
            other => panic!("Expected WriteFailed, got {:?}", other),
        }
    }
}
