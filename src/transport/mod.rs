// Transport module - frame-delivery boundary
//
// The core consumes this contract; it never implements a physical channel.
// Readiness is queried, not awaited: `is_open` is a precondition the caller
// checks before `output`, and `has_data` is a non-blocking poll for inbound
// host data. An unready transport is not an error - the tick's frame is
// simply not sent, and buffering/retry policy belongs to the outer loop.
//
// LoopbackTransport is the in-memory stand-in used by tests and the
// simulator CLI where the real channel would be Bluetooth or serial.

use std::collections::VecDeque;

use crate::error::TransportError;

/// Contract a physical channel must satisfy for the pipeline to use it.
pub trait Transport {
    /// Whether the channel is ready to carry frames. Precondition for
    /// [Transport::output].
    fn is_open(&self) -> bool;

    /// Non-blocking query for inbound data availability.
    fn has_data(&self) -> bool;

    /// Hand a fully formed frame to the channel for transmission.
    ///
    /// # Errors
    /// `TransportError::NotOpen` when called against a closed channel,
    /// `TransportError::WriteFailed` on a failed transmission attempt.
    fn output(&mut self, frame: &[u8]) -> Result<(), TransportError>;

    /// Read one newline-terminated inbound line into `buf` (delimiter
    /// stripped). Returns `false` when no line was available.
    ///
    /// # Errors
    /// `TransportError::ReadFailed` when the channel fails mid-read.
    fn read_line(&mut self, buf: &mut Vec<u8>) -> Result<bool, TransportError>;
}

/// In-memory transport recording sent frames and replaying queued inbound
/// lines.
#[derive(Debug, Default)]
pub struct LoopbackTransport {
    open: bool,
    sent: Vec<Vec<u8>>,
    inbound: VecDeque<Vec<u8>>,
}

impl LoopbackTransport {
    /// An open loopback channel.
    pub fn new() -> Self {
        Self {
            open: true,
            ..Self::default()
        }
    }

    /// A loopback channel that reports closed, for skip-path tests.
    pub fn closed() -> Self {
        Self::default()
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Queue a host-to-glove line for the pipeline to pick up.
    pub fn queue_inbound(&mut self, line: &[u8]) {
        self.inbound.push_back(line.to_vec());
    }

    /// Every frame sent so far, oldest first.
    pub fn sent_frames(&self) -> &[Vec<u8>] {
        &self.sent
    }
}

impl Transport for LoopbackTransport {
    fn is_open(&self) -> bool {
        self.open
    }

    fn has_data(&self) -> bool {
        !self.inbound.is_empty()
    }

    fn output(&mut self, frame: &[u8]) -> Result<(), TransportError> {
        if !self.open {
            return Err(TransportError::NotOpen);
        }
        self.sent.push(frame.to_vec());
        Ok(())
    }

    fn read_line(&mut self, buf: &mut Vec<u8>) -> Result<bool, TransportError> {
        match self.inbound.pop_front() {
            Some(line) => {
                buf.clear();
                buf.extend_from_slice(&line);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
