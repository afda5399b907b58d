// Glove Core - sensor-to-wire pipeline for a motion-capture glove
// Calibration, gesture detection, and fixed-grammar frame encoding

// Module declarations
pub mod calibration;
pub mod config;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod input;
pub mod telemetry;
pub mod transport;

// Re-exports for convenience
pub use config::GloveConfig;
pub use engine::{GlovePipeline, TickReport};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_structure() {
        // Verify the crate's public surface assembles end to end.
        let pipeline = GlovePipeline::from_config(&GloveConfig::default());
        assert!(pipeline.is_ok());
    }
}
