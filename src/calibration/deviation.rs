//! Center-point deviation calibration.
//!
//! Used when a sensor's absolute reading drifts device to device but its
//! deviation from rest is meaningful and boundable. Instead of trusting
//! absolute min/max, output is expressed as a clamped signed deviation from
//! a center point - either inferred from the tracked travel range
//! ([CenterPointDeviationCalibrator]) or fixed at half of `sensor_max`
//! ([FixedCenterPointDeviationCalibrator]).

use crate::calibration::mapping::remap;
use crate::calibration::{Calibrate, CalibrationBounds};

/// Map a deviation from `center` onto the output range.
///
/// The deviation is clamped to `±driver_max_deviation` first, so the result
/// always lies within the output bounds regardless of how extreme the
/// input is.
fn calibrate_around_center(bounds: &CalibrationBounds, sample: f32, center: f32) -> f32 {
    // Map the pre-scaled sample back into the sensor's range of motion.
    let in_sensor_units = remap(
        sample,
        bounds.output_min,
        bounds.output_max,
        0.0,
        bounds.sensor_max,
    );

    // Signed deviation from center, constrained to what the driver supports.
    let deviation = (in_sensor_units - center).clamp(
        -bounds.driver_max_deviation,
        bounds.driver_max_deviation,
    );

    remap(
        deviation,
        -bounds.driver_max_deviation,
        bounds.driver_max_deviation,
        bounds.output_min,
        bounds.output_max,
    )
}

/// Calibrator that infers the sensor's travel range at runtime and centers
/// output on the middle of that range.
#[derive(Debug, Clone)]
pub struct CenterPointDeviationCalibrator {
    bounds: CalibrationBounds,
    /// Smallest observed position in sensor units; starts at `sensor_max`.
    range_min: f32,
    /// Largest observed position in sensor units; starts at zero.
    range_max: f32,
}

impl CenterPointDeviationCalibrator {
    /// Create a calibrator with the range in its neutral, inverted state.
    pub fn new(bounds: CalibrationBounds) -> Self {
        Self {
            bounds,
            range_min: bounds.sensor_max,
            range_max: 0.0,
        }
    }

    /// Bounds this calibrator was constructed with.
    pub fn bounds(&self) -> &CalibrationBounds {
        &self.bounds
    }

    /// Center of the tracked travel range, in sensor units.
    ///
    /// Before any update the inverted range still yields `sensor_max / 2`,
    /// the same neutral center the fixed variant uses.
    fn center(&self) -> f32 {
        (self.range_min + self.range_max) / 2.0
    }
}

impl Calibrate for CenterPointDeviationCalibrator {
    fn reset(&mut self) {
        self.range_min = self.bounds.sensor_max;
        self.range_max = 0.0;
    }

    fn update(&mut self, sample: f32) {
        // The input arrives pre-scaled in output units; invert the remap to
        // track the range in sensor units.
        let in_sensor_units = remap(
            sample,
            self.bounds.output_min,
            self.bounds.output_max,
            0.0,
            self.bounds.sensor_max,
        );

        if in_sensor_units < self.range_min {
            self.range_min = in_sensor_units;
        }
        if in_sensor_units > self.range_max {
            self.range_max = in_sensor_units;
        }
    }

    fn calibrate(&self, sample: f32) -> f32 {
        calibrate_around_center(&self.bounds, sample, self.center())
    }
}

/// Deviation calibrator with a fixed physical center at `sensor_max / 2`.
///
/// `reset` and `update` are no-ops: when the rest position is known a
/// priori, adaptive tracking only adds drift from noisy transient extremes.
#[derive(Debug, Clone)]
pub struct FixedCenterPointDeviationCalibrator {
    bounds: CalibrationBounds,
}

impl FixedCenterPointDeviationCalibrator {
    pub fn new(bounds: CalibrationBounds) -> Self {
        Self { bounds }
    }

    /// Bounds this calibrator was constructed with.
    pub fn bounds(&self) -> &CalibrationBounds {
        &self.bounds
    }
}

impl Calibrate for FixedCenterPointDeviationCalibrator {
    fn reset(&mut self) {}

    fn update(&mut self, _sample: f32) {}

    fn calibrate(&self, sample: f32) -> f32 {
        calibrate_around_center(&self.bounds, sample, self.bounds.sensor_max / 2.0)
    }
}
