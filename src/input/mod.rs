// Input module - tracked state producers fed by the sampling loop
//
// Producers come in two shapes:
// - Numeric: Finger and JoystickAxis own a Calibrator and expose a
//   calibrated value in the output range
// - Boolean: Gesture (derived from finger flexion) and Button (fed from the
//   out-of-scope pin scan) expose a pressed state
//
// All of them implement the Encoder contract, so the frame assembly never
// needs to know which is which.

pub mod button;
pub mod finger;
pub mod gesture;
pub mod joystick;

pub use button::Button;
pub use finger::{Finger, FingerId, FingerSet};
pub use gesture::{Gesture, GestureKind};
pub use joystick::JoystickAxis;
