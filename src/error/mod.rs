// Error types for the glove pipeline
//
// This module defines custom error types for encoding, transport, and
// pipeline orchestration, providing structured error handling with numeric
// error codes suitable for host-driver diagnostics.

mod encode;
mod pipeline;
mod transport;

pub use encode::{log_encode_error, EncodeError, EncodeErrorCodes};
pub use pipeline::{log_pipeline_error, PipelineError, PipelineErrorCodes};
pub use transport::{log_transport_error, TransportError, TransportErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// the host-driver boundary.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
