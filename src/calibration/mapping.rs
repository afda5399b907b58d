//! Linear remapping helpers shared by the calibration strategies.
//!
//! These are exact (non-truncating) interpolations: integer-style `map`
//! arithmetic would lose sub-unit precision that matters when a sensor's
//! observed range is narrow.

/// Linearly remap `x` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// Callers are responsible for guaranteeing `in_min != in_max`; every
/// calibration strategy special-cases degenerate ranges before reaching
/// this function.
pub fn remap(x: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Same as [remap], but both minimums are zero.
pub fn remap_simple(x: f32, in_max: f32, out_max: f32) -> f32 {
    x * out_max / in_max
}
