//! Min-max calibration - learn the observed sample range and remap it
//! linearly onto the output range.
//!
//! The tracked range starts inverted (min at `sensor_max`, the largest
//! possible raw sample; max at zero, the smallest), so the very first
//! `update` collapses it onto the first observed sample. An inverted range
//! therefore doubles as the "never calibrated" marker.

use crate::calibration::mapping::remap;
use crate::calibration::{Calibrate, CalibrationBounds};

/// Calibrator that tracks the observed minimum and maximum of raw samples.
#[derive(Debug, Clone)]
pub struct MinMaxCalibrator {
    bounds: CalibrationBounds,
    /// Smallest raw sample seen so far; starts at `sensor_max` (inverted).
    value_min: f32,
    /// Largest raw sample seen so far; starts at zero (inverted).
    value_max: f32,
}

impl MinMaxCalibrator {
    /// Create a calibrator in the neutral, never-updated state.
    pub fn new(bounds: CalibrationBounds) -> Self {
        Self {
            bounds,
            value_min: bounds.sensor_max,
            value_max: 0.0,
        }
    }

    /// Bounds this calibrator was constructed with.
    pub fn bounds(&self) -> &CalibrationBounds {
        &self.bounds
    }

    /// Whether at least one sample has been folded into the range.
    fn has_range(&self) -> bool {
        self.value_min <= self.value_max
    }
}

impl Calibrate for MinMaxCalibrator {
    fn reset(&mut self) {
        self.value_min = self.bounds.sensor_max;
        self.value_max = 0.0;
    }

    fn update(&mut self, sample: f32) {
        // Expand-only: both branches fire on the first sample because the
        // range starts inverted.
        if sample < self.value_min {
            self.value_min = sample;
        }
        if sample > self.value_max {
            self.value_max = sample;
        }
    }

    fn calibrate(&self, sample: f32) -> f32 {
        // No calibration data yet: return the neutral midpoint instead of
        // remapping through an inverted range.
        if !self.has_range() {
            return self.bounds.output_midpoint();
        }

        // Constant signal: the remap denominator would be zero.
        if self.value_min == self.value_max {
            return self.bounds.output_midpoint();
        }

        let output = remap(
            sample,
            self.value_min,
            self.value_max,
            self.bounds.output_min,
            self.bounds.output_max,
        );

        // A sample outside the observed range (a new extreme not yet folded
        // in via update) overshoots the interpolation; lock it to the
        // output range.
        self.bounds.clamp_output(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_bounds() -> CalibrationBounds {
        CalibrationBounds::new(4095.0, 1024.0, 0.0, 1000.0).unwrap()
    }

    #[test]
    fn test_calibrate_before_any_update_returns_midpoint() {
        let cal = MinMaxCalibrator::new(test_bounds());
        assert_eq!(cal.calibrate(0.0), 500.0);
        assert_eq!(cal.calibrate(4095.0), 500.0);
        assert_eq!(cal.calibrate(-123.0), 500.0);
    }

    #[test]
    fn test_observed_extremes_map_to_output_bounds() {
        let mut cal = MinMaxCalibrator::new(test_bounds());
        for sample in [100.0, 500.0, 900.0] {
            cal.update(sample);
        }
        assert_eq!(cal.calibrate(900.0), 1000.0);
        assert_eq!(cal.calibrate(100.0), 0.0);
        assert_eq!(cal.calibrate(500.0), 500.0);
    }

    #[test]
    fn test_output_always_within_range() {
        let mut cal = MinMaxCalibrator::new(test_bounds());
        cal.update(1000.0);
        cal.update(2000.0);

        // Samples far outside the observed range must still clamp.
        for sample in [-1e6, 0.0, 1500.0, 3000.0, 1e6] {
            let out = cal.calibrate(sample);
            assert!(
                (0.0..=1000.0).contains(&out),
                "calibrate({}) = {} escaped [0, 1000]",
                sample,
                out
            );
        }
    }

    #[test]
    fn test_constant_signal_returns_midpoint() {
        let mut cal = MinMaxCalibrator::new(test_bounds());
        cal.update(777.0);
        cal.update(777.0);
        // Degenerate range: remap denominator would be zero.
        assert_eq!(cal.calibrate(777.0), 500.0);
        assert_eq!(cal.calibrate(0.0), 500.0);
    }

    #[test]
    fn test_single_update_sets_both_extremes() {
        let mut cal = MinMaxCalibrator::new(test_bounds());
        cal.update(300.0);
        assert_eq!(cal.value_min, 300.0);
        assert_eq!(cal.value_max, 300.0);
    }

    #[test]
    fn test_reset_restores_neutral_behavior() {
        let mut cal = MinMaxCalibrator::new(test_bounds());
        cal.update(100.0);
        cal.update(900.0);
        assert_eq!(cal.calibrate(900.0), 1000.0);

        cal.reset();
        assert_eq!(cal.calibrate(900.0), 500.0);

        // Range learning starts over after reset.
        cal.update(200.0);
        cal.update(400.0);
        assert_eq!(cal.calibrate(400.0), 1000.0);
    }

    #[test]
    fn test_interpolation_is_exact() {
        let mut cal = MinMaxCalibrator::new(test_bounds());
        cal.update(0.0);
        cal.update(10.0);
        // 3/10 of the range, no integer truncation.
        assert!((cal.calibrate(3.0) - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_nonzero_output_min() {
        let bounds = CalibrationBounds::new(4095.0, 1024.0, 200.0, 800.0).unwrap();
        let mut cal = MinMaxCalibrator::new(bounds);
        assert_eq!(cal.calibrate(0.0), 500.0);

        cal.update(0.0);
        cal.update(100.0);
        assert_eq!(cal.calibrate(0.0), 200.0);
        assert_eq!(cal.calibrate(100.0), 800.0);
        assert_eq!(cal.calibrate(50.0), 500.0);
    }
}
