//! Configuration management for per-device tuning
//!
//! This module provides runtime configuration loading from JSON files,
//! enabling per-glove adjustment without recompilation. Calibration bounds,
//! strategy selection, gesture enablement, and the auxiliary producer set
//! can all be adjusted via the config file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::calibration::{CalibrationBounds, CalibrationStrategy};
use crate::error::PipelineError;

/// Complete glove configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GloveConfig {
    pub calibration: CalibrationConfig,
    pub gestures: GestureConfig,
    pub inputs: InputConfig,
}

/// Calibration bounds and per-sensor strategy selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Maximum raw ADC value (4095 for a 12-bit converter)
    pub sensor_max: f32,
    /// Largest center deviation the host driver accepts, in sensor units
    pub driver_max_deviation: f32,
    /// Lower bound of the calibrated output range
    pub output_min: f32,
    /// Upper bound of the calibrated output range
    pub output_max: f32,
    /// Strategy used for finger flexion sensors
    pub finger_strategy: CalibrationStrategy,
    /// Strategy used for joystick axes
    pub joystick_strategy: CalibrationStrategy,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            // 12-bit ADC, full-range output, driver accepts a quarter of
            // the sensor range as deviation.
            sensor_max: 4095.0,
            driver_max_deviation: 1024.0,
            output_min: 0.0,
            output_max: 4095.0,
            finger_strategy: CalibrationStrategy::MinMax,
            joystick_strategy: CalibrationStrategy::FixedCenterPointDeviation,
        }
    }
}

impl CalibrationConfig {
    /// Validate the configured values into usable bounds.
    pub fn bounds(&self) -> Result<CalibrationBounds, PipelineError> {
        CalibrationBounds::new(
            self.sensor_max,
            self.driver_max_deviation,
            self.output_min,
            self.output_max,
        )
    }
}

/// Which gesture detectors are wired up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    pub grab: bool,
    pub trigger: bool,
    pub pinch: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            grab: true,
            trigger: true,
            pinch: true,
        }
    }
}

/// Auxiliary producers beyond the five fingers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Wire joystick X/Y axes into the frame
    pub joystick: bool,
    /// Frame symbols of the physical buttons, in slot order
    pub button_symbols: Vec<char>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            joystick: true,
            // A and B face buttons.
            button_symbols: vec!['J', 'K'],
        }
    }
}

impl Default for GloveConfig {
    /// Default configuration values (fallback if config file not found)
    fn default() -> Self {
        Self {
            calibration: CalibrationConfig::default(),
            gestures: GestureConfig::default(),
            inputs: InputConfig::default(),
        }
    }
}

impl GloveConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The loaded configuration, or the defaults if the file does not exist
    /// or fails to parse (logged at warn level in either case).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GloveConfig::default();
        assert_eq!(config.calibration.sensor_max, 4095.0);
        assert_eq!(config.calibration.output_max, 4095.0);
        assert_eq!(
            config.calibration.finger_strategy,
            CalibrationStrategy::MinMax
        );
        assert!(config.gestures.grab);
        assert_eq!(config.inputs.button_symbols, vec!['J', 'K']);
    }

    #[test]
    fn test_default_bounds_are_valid() {
        let config = GloveConfig::default();
        assert!(config.calibration.bounds().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = GloveConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: GloveConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.calibration.sensor_max, config.calibration.sensor_max);
        assert_eq!(
            parsed.calibration.joystick_strategy,
            config.calibration.joystick_strategy
        );
        assert_eq!(parsed.inputs.joystick, config.inputs.joystick);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let config = GloveConfig::load_from_file("/nonexistent/glove.json");
        assert_eq!(config.calibration.sensor_max, 4095.0);
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let config = CalibrationConfig {
            output_min: 1000.0,
            output_max: 0.0,
            ..CalibrationConfig::default()
        };
        assert!(config.bounds().is_err());
    }
}
