//! Gesture detectors - boolean state derived from finger flexion.
//!
//! Each detector is a pure function of its bound fingers' latest calibrated
//! values, fully recomputed every tick with no history or hysteresis. All
//! detectors share one threshold policy: the (mean) flexion must be
//! strictly greater than half of the maximum analog output value. A future
//! detector that deviates from this policy must document it here.

use crate::encoding::{encode_symbol, Encoder};
use crate::error::EncodeError;
use crate::input::finger::{FingerId, FingerSet};

/// Frame symbol for the grab gesture.
pub const GRAB_SYMBOL: u8 = b'L';
/// Frame symbol for the pinch gesture.
pub const PINCH_SYMBOL: u8 = b'M';
/// Frame symbol for the trigger gesture.
pub const TRIGGER_SYMBOL: u8 = b'P';

/// The detector variants this glove recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    /// Mean of four finger flexions above half-max (fist closed).
    Grab,
    /// A single finger's flexion above half-max.
    Trigger,
    /// Mean of thumb and index flexion above half-max.
    ///
    /// The averaging (rather than thresholding each finger on its own) is
    /// deliberate: it matches the wire behavior host drivers already expect.
    Pinch,
}

/// One gesture detector bound to fingers in the arena.
///
/// Holds finger ids, a symbol identifying the gesture on the wire, and one
/// boolean updated per tick - the only mutable state.
#[derive(Debug, Clone)]
pub struct Gesture {
    kind: GestureKind,
    symbol: u8,
    fingers: Vec<FingerId>,
    /// Strict activation threshold: half of the analog output maximum.
    threshold: f32,
    value: bool,
}

impl Gesture {
    /// Grab: active when the mean flexion of four fingers exceeds half-max.
    pub fn grab(
        index: FingerId,
        middle: FingerId,
        ring: FingerId,
        pinky: FingerId,
        analog_max: f32,
    ) -> Self {
        Self {
            kind: GestureKind::Grab,
            symbol: GRAB_SYMBOL,
            fingers: vec![index, middle, ring, pinky],
            threshold: analog_max / 2.0,
            value: false,
        }
    }

    /// Trigger: active when one finger's flexion exceeds half-max.
    pub fn trigger(index: FingerId, analog_max: f32) -> Self {
        Self {
            kind: GestureKind::Trigger,
            symbol: TRIGGER_SYMBOL,
            fingers: vec![index],
            threshold: analog_max / 2.0,
            value: false,
        }
    }

    /// Pinch: active when the mean of thumb and index flexion exceeds
    /// half-max.
    pub fn pinch(thumb: FingerId, index: FingerId, analog_max: f32) -> Self {
        Self {
            kind: GestureKind::Pinch,
            symbol: PINCH_SYMBOL,
            fingers: vec![thumb, index],
            threshold: analog_max / 2.0,
            value: false,
        }
    }

    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    pub fn symbol(&self) -> u8 {
        self.symbol
    }

    /// Finger ids this detector observes, for assembly-time validation.
    pub fn finger_ids(&self) -> &[FingerId] {
        &self.fingers
    }

    /// Re-evaluate the gesture from the fingers' current flexion values.
    /// Strict comparison: a mean exactly at the threshold stays inactive.
    pub fn read_input(&mut self, fingers: &FingerSet) {
        let sum: f32 = self.fingers.iter().map(|&id| fingers.flexion(id)).sum();
        let mean = sum / self.fingers.len() as f32;
        self.value = mean > self.threshold;
    }

    /// Whether the gesture is currently active.
    pub fn is_pressed(&self) -> bool {
        self.value
    }
}

impl Encoder for Gesture {
    // Encode string size = single char + '\0' absence signal sharing the slot
    fn encoded_size(&self) -> usize {
        1
    }

    fn encode_into(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        encode_symbol(buf, self.symbol, self.value)
    }
}
