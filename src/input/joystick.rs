//! Joystick axis - a numeric producer whose rest position is the center.
//!
//! An axis owns a Calibrator like a finger does, but typically a deviation
//! strategy: a stick's meaningful signal is how far it sits from rest, not
//! its absolute reading. On the wire an axis is a keyed numeric slot, same
//! as a finger.

use crate::calibration::{Calibrate, Calibrator};
use crate::encoding::{encode_keyed_value, keyed_slot_size, Encoder};
use crate::error::EncodeError;

/// One joystick axis with its calibrator and frame slot key.
#[derive(Debug, Clone)]
pub struct JoystickAxis {
    /// Frame slot key letter ('F' for X, 'G' for Y in the standard layout).
    key: u8,
    calibrator: Calibrator,
    /// Latest calibrated position, in output units.
    value: f32,
}

impl JoystickAxis {
    /// Create an axis around its calibrator, primed at the output midpoint
    /// (center stick) until the first sample arrives.
    pub fn new(key: u8, calibrator: Calibrator) -> Self {
        let value = calibrator.bounds().output_midpoint();
        Self {
            key,
            calibrator,
            value,
        }
    }

    /// Feed one raw sample per tick.
    pub fn read(&mut self, raw_sample: f32) {
        self.calibrator.update(raw_sample);
        self.value = self.calibrator.calibrate(raw_sample);
    }

    /// Calibrated position of the latest raw sample, in output units.
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn key(&self) -> u8 {
        self.key
    }

    fn output_max(&self) -> f32 {
        self.calibrator.bounds().output_max
    }

    pub fn reset_calibration(&mut self) {
        self.calibrator.reset();
        self.value = self.calibrator.bounds().output_midpoint();
    }
}

impl Encoder for JoystickAxis {
    fn encoded_size(&self) -> usize {
        keyed_slot_size(self.output_max())
    }

    fn encode_into(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        encode_keyed_value(buf, self.key, self.value, self.output_max())
    }
}
