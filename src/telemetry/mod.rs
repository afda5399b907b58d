//! Core telemetry event types describing per-tick pipeline activity,
//! emitted through the `log` facade as structured JSON lines.

use serde::{Deserialize, Serialize};

/// Why a tick's frame was not handed to the transport.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// `is_open` reported the channel unavailable; non-fatal, no retry.
    TransportClosed,
}

/// Pipeline lifecycle and per-tick events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum PipelineEvent {
    FrameSent {
        tick: u64,
        bytes: usize,
    },
    FrameSkipped {
        tick: u64,
        reason: SkipReason,
    },
    InboundLine {
        tick: u64,
        bytes: usize,
    },
    CalibrationReset {
        producers: usize,
    },
}

/// Emit one telemetry event as a JSON line at debug level.
///
/// Serialization of these enums cannot realistically fail; if it ever does
/// the event is dropped rather than disturbing the tick.
pub fn emit(event: &PipelineEvent) {
    if let Ok(json) = serde_json::to_string(event) {
        log::debug!(target: "glove_core::telemetry", "{}", json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_shape() {
        let json = serde_json::to_string(&PipelineEvent::FrameSent { tick: 3, bytes: 42 }).unwrap();
        assert!(json.contains("\"type\":\"frame_sent\""));
        assert!(json.contains("\"tick\":3"));
        assert!(json.contains("\"bytes\":42"));
    }

    #[test]
    fn test_skip_reason_serialization() {
        let json = serde_json::to_string(&PipelineEvent::FrameSkipped {
            tick: 0,
            reason: SkipReason::TransportClosed,
        })
        .unwrap();
        assert!(json.contains("transport_closed"));
    }

    #[test]
    fn test_event_round_trip() {
        let event = PipelineEvent::CalibrationReset { producers: 7 };
        let json = serde_json::to_string(&event).unwrap();
        let parsed: PipelineEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }
}
