//! Finger - one tracked flexion axis and the fixed arena holding all five.
//!
//! A Finger owns exactly one Calibrator for its whole lifetime and stores
//! nothing beyond the latest calibrated flexion value; gestures reference
//! fingers through [FingerId] indices into the [FingerSet] arena rather
//! than owning pointers, so their lifetime is tied to the glove assembly.

use crate::calibration::{Calibrate, Calibrator};
use crate::encoding::{encode_keyed_value, keyed_slot_size, Encoder};
use crate::error::{EncodeError, PipelineError};

/// Index of a finger within the [FingerSet] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FingerId(pub usize);

impl FingerId {
    pub const THUMB: FingerId = FingerId(0);
    pub const INDEX: FingerId = FingerId(1);
    pub const MIDDLE: FingerId = FingerId(2);
    pub const RING: FingerId = FingerId(3);
    pub const PINKY: FingerId = FingerId(4);
}

/// One tracked joint/axis with its calibrator and frame slot key.
#[derive(Debug, Clone)]
pub struct Finger {
    /// Frame slot key letter ('A'..'E' in the standard layout).
    key: u8,
    calibrator: Calibrator,
    /// Latest calibrated flexion value, in output units.
    flexion: f32,
}

impl Finger {
    /// Create a finger around its calibrator.
    ///
    /// The initial flexion is the output midpoint regardless of strategy,
    /// so a frame encoded before the first sample still carries defined
    /// neutral data.
    pub fn new(key: u8, calibrator: Calibrator) -> Self {
        let flexion = calibrator.bounds().output_midpoint();
        Self {
            key,
            calibrator,
            flexion,
        }
    }

    /// Feed one raw sample: fold it into the calibration range, then store
    /// the calibrated flexion. Called exactly once per sampling tick.
    pub fn read(&mut self, raw_sample: f32) {
        self.calibrator.update(raw_sample);
        self.flexion = self.calibrator.calibrate(raw_sample);
    }

    /// Calibrated flexion of the latest raw sample, in output units.
    pub fn flexion_value(&self) -> f32 {
        self.flexion
    }

    /// Frame slot key letter.
    pub fn key(&self) -> u8 {
        self.key
    }

    /// Upper bound of the calibrated output range.
    pub fn output_max(&self) -> f32 {
        self.calibrator.bounds().output_max
    }

    /// Drop the learned range and return the reading to neutral.
    pub fn reset_calibration(&mut self) {
        self.calibrator.reset();
        self.flexion = self.calibrator.bounds().output_midpoint();
    }
}

impl Encoder for Finger {
    fn encoded_size(&self) -> usize {
        keyed_slot_size(self.output_max())
    }

    fn encode_into(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        encode_keyed_value(buf, self.key, self.flexion, self.output_max())
    }
}

/// Fixed arena of fingers owned by the glove assembly.
///
/// Gestures hold [FingerId] indices into this arena; the arena is never
/// resized after construction.
#[derive(Debug)]
pub struct FingerSet {
    fingers: Vec<Finger>,
}

impl FingerSet {
    pub fn new(fingers: Vec<Finger>) -> Self {
        Self { fingers }
    }

    pub fn len(&self) -> usize {
        self.fingers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fingers.is_empty()
    }

    /// Resolve a finger id, erroring on out-of-range references.
    ///
    /// Used at assembly time to validate gesture wiring; per-tick reads go
    /// through [FingerSet::flexion] after wiring has been validated.
    pub fn get(&self, id: FingerId) -> Result<&Finger, PipelineError> {
        self.fingers.get(id.0).ok_or(PipelineError::UnknownFinger {
            index: id.0,
            fingers: self.fingers.len(),
        })
    }

    /// Calibrated flexion for a validated finger id.
    ///
    /// Ids are checked against the arena when gestures are assembled, so a
    /// miss here means the arena was rebuilt behind the gestures; neutral
    /// zero keeps the tick well-defined rather than panicking.
    pub fn flexion(&self, id: FingerId) -> f32 {
        self.fingers.get(id.0).map_or(0.0, Finger::flexion_value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Finger> {
        self.fingers.iter()
    }

    /// Feed one raw sample per finger, in arena order.
    ///
    /// # Errors
    /// `PipelineError::SampleCountMismatch` when the slice length differs
    /// from the arena size; no finger is updated in that case.
    pub fn read_all(&mut self, raw_samples: &[f32]) -> Result<(), PipelineError> {
        if raw_samples.len() != self.fingers.len() {
            return Err(PipelineError::SampleCountMismatch {
                expected: self.fingers.len(),
                got: raw_samples.len(),
            });
        }
        for (finger, &sample) in self.fingers.iter_mut().zip(raw_samples) {
            finger.read(sample);
        }
        Ok(())
    }

    /// Reset every finger's calibration to the neutral state.
    pub fn reset_calibration(&mut self) {
        for finger in &mut self.fingers {
            finger.reset_calibration();
        }
    }
}
