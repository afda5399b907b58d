// Calibration module - runtime range learning for analog sensors
//
// This module maps raw per-axis sensor samples into a bounded output range.
// Three interchangeable strategies share one contract:
// 1. MinMaxCalibrator: learns the observed min/max and remaps linearly
// 2. CenterPointDeviationCalibrator: infers the travel range at runtime and
//    expresses output as clamped deviation from the inferred center
// 3. FixedCenterPointDeviationCalibrator: deviation from a known center,
//    with no adaptive tracking
//
// Every strategy guarantees its output lies in [output_min, output_max] and
// resolves uninitialized or degenerate ranges to the output midpoint rather
// than dividing by zero.

pub mod deviation;
pub mod mapping;
pub mod minmax;

pub use deviation::{CenterPointDeviationCalibrator, FixedCenterPointDeviationCalibrator};
pub use minmax::MinMaxCalibrator;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Contract shared by every calibration strategy.
///
/// `update` is called once per sampling tick with the raw sample;
/// `calibrate` is a pure query, safe to call any number of times and before
/// any update has happened.
pub trait Calibrate {
    /// Return the strategy to its neutral, just-constructed state.
    fn reset(&mut self);

    /// Fold a raw sample into the tracked range statistics.
    fn update(&mut self, sample: f32);

    /// Map a raw sample into `[output_min, output_max]`.
    fn calibrate(&self, sample: f32) -> f32;
}

/// Per-sensor range constants, validated once at construction and shared
/// by every strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationBounds {
    /// Maximum raw value the ADC can produce (e.g. 4095 for 12-bit).
    pub sensor_max: f32,
    /// Largest deviation from center the host driver accepts, in sensor units.
    pub driver_max_deviation: f32,
    /// Lower bound of the calibrated output range.
    pub output_min: f32,
    /// Upper bound of the calibrated output range.
    pub output_max: f32,
}

impl CalibrationBounds {
    /// Validate and construct bounds.
    ///
    /// # Errors
    /// Returns `PipelineError::InvalidBounds` when the output range is empty,
    /// inverted, or extends below zero, or when `sensor_max` or the driver
    /// deviation is not positive. The wire grammar encodes values as unsigned
    /// decimal, so a negative `output_min` could never survive encoding and
    /// is rejected here instead of being silently collapsed on the wire.
    pub fn new(
        sensor_max: f32,
        driver_max_deviation: f32,
        output_min: f32,
        output_max: f32,
    ) -> Result<Self, PipelineError> {
        if output_min >= output_max {
            return Err(PipelineError::InvalidBounds {
                reason: format!(
                    "output range [{}, {}] is empty or inverted",
                    output_min, output_max
                ),
            });
        }
        if output_min < 0.0 {
            return Err(PipelineError::InvalidBounds {
                reason: format!(
                    "output_min must be non-negative for unsigned wire encoding (got {})",
                    output_min
                ),
            });
        }
        if sensor_max <= 0.0 {
            return Err(PipelineError::InvalidBounds {
                reason: format!("sensor_max must be positive (got {})", sensor_max),
            });
        }
        if driver_max_deviation <= 0.0 {
            return Err(PipelineError::InvalidBounds {
                reason: format!(
                    "driver_max_deviation must be positive (got {})",
                    driver_max_deviation
                ),
            });
        }
        Ok(Self {
            sensor_max,
            driver_max_deviation,
            output_min,
            output_max,
        })
    }

    /// Midpoint of the output range - the defined neutral value.
    pub fn output_midpoint(&self) -> f32 {
        (self.output_min + self.output_max) / 2.0
    }

    /// Clamp a value to the output range.
    pub fn clamp_output(&self, value: f32) -> f32 {
        value.clamp(self.output_min, self.output_max)
    }
}

/// Strategy selector, chosen per sensor in the runtime configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationStrategy {
    MinMax,
    CenterPointDeviation,
    FixedCenterPointDeviation,
}

/// Enum-dispatched calibrator.
///
/// The three strategies are concrete structs; this wrapper lets a sensor
/// own "some calibrator" without boxing or virtual dispatch on the tight
/// per-tick sampling path.
#[derive(Debug, Clone)]
pub enum Calibrator {
    MinMax(MinMaxCalibrator),
    CenterPointDeviation(CenterPointDeviationCalibrator),
    FixedCenterPointDeviation(FixedCenterPointDeviationCalibrator),
}

impl Calibrator {
    /// Construct the strategy selected by `strategy` over `bounds`.
    pub fn new(strategy: CalibrationStrategy, bounds: CalibrationBounds) -> Self {
        match strategy {
            CalibrationStrategy::MinMax => Self::MinMax(MinMaxCalibrator::new(bounds)),
            CalibrationStrategy::CenterPointDeviation => {
                Self::CenterPointDeviation(CenterPointDeviationCalibrator::new(bounds))
            }
            CalibrationStrategy::FixedCenterPointDeviation => {
                Self::FixedCenterPointDeviation(FixedCenterPointDeviationCalibrator::new(bounds))
            }
        }
    }

    /// Bounds this calibrator was constructed with.
    pub fn bounds(&self) -> &CalibrationBounds {
        match self {
            Self::MinMax(c) => c.bounds(),
            Self::CenterPointDeviation(c) => c.bounds(),
            Self::FixedCenterPointDeviation(c) => c.bounds(),
        }
    }
}

impl Calibrate for Calibrator {
    fn reset(&mut self) {
        match self {
            Self::MinMax(c) => c.reset(),
            Self::CenterPointDeviation(c) => c.reset(),
            Self::FixedCenterPointDeviation(c) => c.reset(),
        }
    }

    fn update(&mut self, sample: f32) {
        match self {
            Self::MinMax(c) => c.update(sample),
            Self::CenterPointDeviation(c) => c.update(sample),
            Self::FixedCenterPointDeviation(c) => c.update(sample),
        }
    }

    fn calibrate(&self, sample: f32) -> f32 {
        match self {
            Self::MinMax(c) => c.calibrate(sample),
            Self::CenterPointDeviation(c) => c.calibrate(sample),
            Self::FixedCenterPointDeviation(c) => c.calibrate(sample),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_validation() {
        assert!(CalibrationBounds::new(4095.0, 1024.0, 0.0, 4095.0).is_ok());

        // Inverted output range
        let err = CalibrationBounds::new(4095.0, 1024.0, 1000.0, 0.0).unwrap_err();
        match err {
            PipelineError::InvalidBounds { reason } => {
                assert!(reason.contains("inverted"));
            }
            other => panic!("Expected InvalidBounds, got {:?}", other),
        }

        // Empty output range
        assert!(CalibrationBounds::new(4095.0, 1024.0, 500.0, 500.0).is_err());
        // Non-positive sensor_max
        assert!(CalibrationBounds::new(0.0, 1024.0, 0.0, 1000.0).is_err());
        // Non-positive deviation
        assert!(CalibrationBounds::new(4095.0, 0.0, 0.0, 1000.0).is_err());
    }

    #[test]
    fn test_negative_output_min_rejected() {
        // The wire grammar has no sign slot, so a range reaching below zero
        // could never round-trip through a frame.
        let err = CalibrationBounds::new(4095.0, 1024.0, -100.0, 100.0).unwrap_err();
        match err {
            PipelineError::InvalidBounds { reason } => {
                assert!(reason.contains("non-negative"));
            }
            other => panic!("Expected InvalidBounds, got {:?}", other),
        }
    }

    #[test]
    fn test_output_midpoint() {
        let bounds = CalibrationBounds::new(4095.0, 1024.0, 0.0, 1000.0).unwrap();
        assert_eq!(bounds.output_midpoint(), 500.0);

        let bounds = CalibrationBounds::new(4095.0, 1024.0, 1000.0, 3000.0).unwrap();
        assert_eq!(bounds.output_midpoint(), 2000.0);
    }

    #[test]
    fn test_enum_dispatch_matches_concrete_strategy() {
        let bounds = CalibrationBounds::new(4095.0, 1024.0, 0.0, 1000.0).unwrap();

        let mut wrapped = Calibrator::new(CalibrationStrategy::MinMax, bounds);
        let mut direct = MinMaxCalibrator::new(bounds);

        for sample in [100.0, 900.0, 500.0] {
            wrapped.update(sample);
            direct.update(sample);
        }
        assert_eq!(wrapped.calibrate(700.0), direct.calibrate(700.0));

        wrapped.reset();
        direct.reset();
        assert_eq!(wrapped.calibrate(700.0), direct.calibrate(700.0));
    }

    #[test]
    fn test_strategy_serde_round_trip() {
        let json = serde_json::to_string(&CalibrationStrategy::CenterPointDeviation).unwrap();
        assert_eq!(json, "\"center_point_deviation\"");
        let parsed: CalibrationStrategy = serde_json::from_str("\"min_max\"").unwrap();
        assert_eq!(parsed, CalibrationStrategy::MinMax);
    }
}
