//! GlovePipeline: tick-driven sensor-to-wire orchestration.
//!
//! One external sampling loop drives this once per tick: feed raw samples,
//! re-evaluate gestures, encode the frame in fixed producer order, hand it
//! to the transport if the channel is open, and poll for inbound host data.
//! Everything is single-threaded and sequential; nothing here blocks,
//! suspends, or owns a background task. All state is constructor-injected -
//! no globals, no singletons.

use serde::{Deserialize, Serialize};

use crate::config::GloveConfig;
use crate::encoding::{Encoder, FrameBuilder};
use crate::error::{log_encode_error, log_transport_error, PipelineError};
use crate::input::{Button, Finger, FingerId, FingerSet, Gesture, JoystickAxis};
use crate::calibration::Calibrator;
use crate::telemetry::{self, PipelineEvent, SkipReason};
use crate::transport::Transport;

/// Standard finger slot keys, thumb through pinky.
const FINGER_KEYS: [u8; 5] = [b'A', b'B', b'C', b'D', b'E'];
/// Joystick axis slot keys, X then Y.
const JOYSTICK_KEYS: [u8; 2] = [b'F', b'G'];

/// What one tick produced, for logging and host-side diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickReport {
    /// Monotonic tick counter, starting at zero.
    pub tick: u64,
    /// Length of the encoded frame, delimiter included.
    pub frame_bytes: usize,
    /// Whether the frame was handed to the transport this tick.
    pub sent: bool,
    /// Symbols of the gestures active this tick, in producer order.
    pub active_gestures: Vec<char>,
    /// Inbound host line picked up this tick, if any.
    pub inbound: Option<String>,
}

/// The glove's sensor-to-wire pipeline.
///
/// Owns the finger arena, the gesture detectors bound to it by index, and
/// the auxiliary producers. Producer order within a frame is fixed at
/// construction: fingers, joystick axes, buttons, gestures.
#[derive(Debug)]
pub struct GlovePipeline {
    fingers: FingerSet,
    joysticks: Vec<JoystickAxis>,
    buttons: Vec<Button>,
    gestures: Vec<Gesture>,
    frame: FrameBuilder,
    inbound_buf: Vec<u8>,
    tick: u64,
}

impl GlovePipeline {
    /// Assemble the standard five-finger pipeline described by `config`.
    ///
    /// # Errors
    /// `PipelineError::InvalidBounds` for unusable calibration bounds,
    /// `PipelineError::Encode` for an unencodable button symbol, and
    /// `PipelineError::UnknownFinger` if gesture wiring references a finger
    /// outside the arena.
    pub fn from_config(config: &GloveConfig) -> Result<Self, PipelineError> {
        let bounds = config.calibration.bounds()?;

        let fingers = FingerSet::new(
            FINGER_KEYS
                .iter()
                .map(|&key| {
                    Finger::new(
                        key,
                        Calibrator::new(config.calibration.finger_strategy, bounds),
                    )
                })
                .collect(),
        );

        let joysticks = if config.inputs.joystick {
            JOYSTICK_KEYS
                .iter()
                .map(|&key| {
                    JoystickAxis::new(
                        key,
                        Calibrator::new(config.calibration.joystick_strategy, bounds),
                    )
                })
                .collect()
        } else {
            Vec::new()
        };

        let buttons = config
            .inputs
            .button_symbols
            .iter()
            .map(|&ch| {
                let symbol = u8::try_from(u32::from(ch)).unwrap_or(0xff);
                Button::new(symbol)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let analog_max = bounds.output_max;
        let mut gestures = Vec::new();
        if config.gestures.grab {
            gestures.push(Gesture::grab(
                FingerId::INDEX,
                FingerId::MIDDLE,
                FingerId::RING,
                FingerId::PINKY,
                analog_max,
            ));
        }
        if config.gestures.trigger {
            gestures.push(Gesture::trigger(FingerId::INDEX, analog_max));
        }
        if config.gestures.pinch {
            gestures.push(Gesture::pinch(FingerId::THUMB, FingerId::INDEX, analog_max));
        }

        Self::new(fingers, joysticks, buttons, gestures)
    }

    /// Assemble a pipeline from explicit parts, validating gesture wiring
    /// against the finger arena.
    pub fn new(
        fingers: FingerSet,
        joysticks: Vec<JoystickAxis>,
        buttons: Vec<Button>,
        gestures: Vec<Gesture>,
    ) -> Result<Self, PipelineError> {
        for gesture in &gestures {
            for &id in gesture.finger_ids() {
                fingers.get(id)?;
            }
        }

        Ok(Self {
            fingers,
            joysticks,
            buttons,
            gestures,
            frame: FrameBuilder::new(),
            inbound_buf: Vec::new(),
            tick: 0,
        })
    }

    /// Number of bytes every frame of this pipeline occupies.
    pub fn frame_size(&self) -> usize {
        self.producer_sizes() + 1
    }

    fn producer_sizes(&self) -> usize {
        self.fingers
            .iter()
            .map(Encoder::encoded_size)
            .chain(self.joysticks.iter().map(Encoder::encoded_size))
            .chain(self.buttons.iter().map(Encoder::encoded_size))
            .chain(self.gestures.iter().map(Encoder::encoded_size))
            .sum()
    }

    pub fn fingers(&self) -> &FingerSet {
        &self.fingers
    }

    pub fn gestures(&self) -> &[Gesture] {
        &self.gestures
    }

    /// Push a button's debounced state from the out-of-scope pin scan.
    pub fn set_button(&mut self, index: usize, pressed: bool) {
        match self.buttons.get_mut(index) {
            Some(button) => button.set_pressed(pressed),
            None => log::warn!(
                "set_button({}, {}) ignored: only {} buttons wired",
                index,
                pressed,
                self.buttons.len()
            ),
        }
    }

    /// Drop every learned calibration range and return readings to neutral.
    pub fn reset_calibration(&mut self) {
        self.fingers.reset_calibration();
        for axis in &mut self.joysticks {
            axis.reset_calibration();
        }
        telemetry::emit(&PipelineEvent::CalibrationReset {
            producers: self.fingers.len() + self.joysticks.len(),
        });
    }

    /// Run one sampling tick.
    ///
    /// `flexion_samples` are raw per-finger readings in arena order;
    /// `joystick_samples` are raw axis readings (empty when no joystick is
    /// wired). An unready transport skips transmission without error; an
    /// actual write failure propagates.
    ///
    /// # Errors
    /// `PipelineError::SampleCountMismatch` for wrong slice lengths, plus
    /// bubbled-up encode and transport failures.
    pub fn tick(
        &mut self,
        flexion_samples: &[f32],
        joystick_samples: &[f32],
        transport: &mut dyn Transport,
    ) -> Result<TickReport, PipelineError> {
        let tick = self.tick;

        // 1. Validate both sample slices before any calibrator absorbs
        // data, so a rejected tick leaves no partial state behind.
        if joystick_samples.len() != self.joysticks.len() {
            return Err(PipelineError::SampleCountMismatch {
                expected: self.joysticks.len(),
                got: joystick_samples.len(),
            });
        }
        self.fingers.read_all(flexion_samples)?;
        for (axis, &sample) in self.joysticks.iter_mut().zip(joystick_samples) {
            axis.read(sample);
        }

        // 2. Re-evaluate every gesture against the fresh flexion values.
        for gesture in &mut self.gestures {
            gesture.read_input(&self.fingers);
        }

        // 3. Encode the frame in fixed producer order.
        let producers: Vec<&dyn Encoder> = self
            .fingers
            .iter()
            .map(|f| f as &dyn Encoder)
            .chain(self.joysticks.iter().map(|j| j as &dyn Encoder))
            .chain(self.buttons.iter().map(|b| b as &dyn Encoder))
            .chain(self.gestures.iter().map(|g| g as &dyn Encoder))
            .collect();
        let frame = match self.frame.build(&producers) {
            Ok(frame) => frame,
            Err(err) => {
                log_encode_error(&err, "frame assembly");
                return Err(err.into());
            }
        };
        let frame_bytes = frame.len();

        // 4. Hand the frame over, or skip the tick if the channel is down.
        let sent = if transport.is_open() {
            if let Err(err) = transport.output(frame) {
                log_transport_error(&err, "frame transmission");
                return Err(err.into());
            }
            telemetry::emit(&PipelineEvent::FrameSent {
                tick,
                bytes: frame_bytes,
            });
            true
        } else {
            telemetry::emit(&PipelineEvent::FrameSkipped {
                tick,
                reason: SkipReason::TransportClosed,
            });
            false
        };

        // 5. Poll for inbound host data; interpretation belongs to the
        // outer loop.
        let inbound = if transport.has_data() {
            match transport.read_line(&mut self.inbound_buf) {
                Ok(true) => {
                    telemetry::emit(&PipelineEvent::InboundLine {
                        tick,
                        bytes: self.inbound_buf.len(),
                    });
                    Some(String::from_utf8_lossy(&self.inbound_buf).into_owned())
                }
                Ok(false) => None,
                Err(err) => {
                    log_transport_error(&err, "inbound poll");
                    return Err(err.into());
                }
            }
        } else {
            None
        };

        let active_gestures = self
            .gestures
            .iter()
            .filter(|g| g.is_pressed())
            .map(|g| char::from(g.symbol()))
            .collect();

        self.tick += 1;
        Ok(TickReport {
            tick,
            frame_bytes,
            sent,
            active_gestures,
            inbound,
        })
    }
}
