// Pipeline error types and constants

use crate::error::{EncodeError, ErrorCode, TransportError};
use log::error;
use std::fmt;

/// Pipeline error code constants shared with host-side diagnostics tooling.
///
/// Error code range: 3001-3005
pub struct PipelineErrorCodes {}

impl PipelineErrorCodes {
    /// Tick received a sample slice whose length does not match the arena
    pub const SAMPLE_COUNT_MISMATCH: i32 = 3001;

    /// Calibration bounds are degenerate or inverted
    pub const INVALID_BOUNDS: i32 = 3002;

    /// A gesture or producer references a finger outside the arena
    pub const UNKNOWN_FINGER: i32 = 3003;

    /// A producer failed to encode its slot
    pub const ENCODE: i32 = 3004;

    /// The transport failed while sending or receiving
    pub const TRANSPORT: i32 = 3005;
}

/// Log a pipeline error with structured context
pub fn log_pipeline_error(err: &PipelineError, context: &str) {
    error!(
        "Pipeline error in {}: code={}, component=GlovePipeline, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Pipeline orchestration errors
///
/// These errors cover assembly-time validation (bounds, finger references)
/// and per-tick failures bubbled up from the encode and transport layers.
///
/// Error code range: 3001-3005
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Tick received a sample slice whose length does not match the arena
    SampleCountMismatch { expected: usize, got: usize },

    /// Calibration bounds are degenerate or inverted
    InvalidBounds { reason: String },

    /// A gesture or producer references a finger outside the arena
    UnknownFinger { index: usize, fingers: usize },

    /// A producer failed to encode its slot
    Encode(EncodeError),

    /// The transport failed while sending or receiving
    Transport(TransportError),
}

impl ErrorCode for PipelineError {
    fn code(&self) -> i32 {
        match self {
            PipelineError::SampleCountMismatch { .. } => {
                PipelineErrorCodes::SAMPLE_COUNT_MISMATCH
            }
            PipelineError::InvalidBounds { .. } => PipelineErrorCodes::INVALID_BOUNDS,
            PipelineError::UnknownFinger { .. } => PipelineErrorCodes::UNKNOWN_FINGER,
            PipelineError::Encode(_) => PipelineErrorCodes::ENCODE,
            PipelineError::Transport(_) => PipelineErrorCodes::TRANSPORT,
        }
    }

    fn message(&self) -> String {
        match self {
            PipelineError::SampleCountMismatch { expected, got } => {
                format!("Sample count mismatch: expected {}, got {}", expected, got)
            }
            PipelineError::InvalidBounds { reason } => {
                format!("Invalid calibration bounds: {}", reason)
            }
            PipelineError::UnknownFinger { index, fingers } => {
                format!(
                    "Finger index {} out of range (arena holds {})",
                    index, fingers
                )
            }
            PipelineError::Encode(err) => err.message(),
            PipelineError::Transport(err) => err.message(),
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PipelineError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for PipelineError {}

impl From<EncodeError> for PipelineError {
    fn from(err: EncodeError) -> Self {
        PipelineError::Encode(err)
    }
}

impl From<TransportError> for PipelineError {
    fn from(err: TransportError) -> Self {
        PipelineError::Transport(err)
    }
}
