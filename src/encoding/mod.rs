// Encoding module - uniform producer-to-frame serialization contract
//
// Every state producer (finger, gesture, button, joystick axis) implements
// the Encoder capability: declare an exact encoded size, then write exactly
// that many bytes into caller-provided storage. The transport-facing
// FrameBuilder iterates a heterogeneous producer list through this trait and
// assembles one frame per tick without per-type branching.
//
// Frame grammar: a sequence of fixed-size character slots in stable producer
// order, terminated by '\n'. Numeric producers encode as a key letter plus a
// zero-padded decimal value plus NUL; boolean producers encode one byte -
// their symbol when active, NUL when inactive.

use crate::error::EncodeError;

/// Capability required of every state producer that contributes to a frame.
///
/// Contract: `encode_into` never writes more than `encoded_size()` bytes,
/// and returns the count it wrote. Callers size their buffers from the
/// former before calling the latter.
pub trait Encoder {
    /// Exact number of bytes (including any terminator) the producer writes.
    fn encoded_size(&self) -> usize;

    /// Write the encoded form into `buf` and return the byte count written.
    ///
    /// # Errors
    /// `EncodeError::BufferTooSmall` when `buf` is shorter than
    /// `encoded_size()`. Nothing is written in that case.
    fn encode_into(&self, buf: &mut [u8]) -> Result<usize, EncodeError>;
}

/// Digit count of `output_max` once rounded, which fixes the slot width for
/// every numeric producer sharing those bounds.
pub fn value_digits(output_max: f32) -> usize {
    let mut v = output_max.round().max(0.0) as u32;
    let mut digits = 1;
    while v >= 10 {
        v /= 10;
        digits += 1;
    }
    digits
}

/// Slot size of a keyed numeric producer: key letter + zero-padded decimal
/// digits + NUL terminator.
pub fn keyed_slot_size(output_max: f32) -> usize {
    1 + value_digits(output_max) + 1
}

/// Encode `value` under `key` as a fixed-width slot.
///
/// The value is clamped to `[0, output_max]` and rounded; zero-padding keeps
/// the slot width constant so the frame length never varies tick to tick.
pub fn encode_keyed_value(
    buf: &mut [u8],
    key: u8,
    value: f32,
    output_max: f32,
) -> Result<usize, EncodeError> {
    let size = keyed_slot_size(output_max);
    if buf.len() < size {
        return Err(EncodeError::BufferTooSmall {
            required: size,
            available: buf.len(),
        });
    }

    let digits = size - 2;
    buf[0] = key;

    // Fill digits right to left; the clamp means the value always fits the
    // fixed width.
    let mut v = value.clamp(0.0, output_max).round() as u32;
    for slot in buf[1..=digits].iter_mut().rev() {
        *slot = b'0' + (v % 10) as u8;
        v /= 10;
    }
    buf[size - 1] = 0;

    Ok(size)
}

/// Encode a boolean producer slot: `symbol` when active, NUL when inactive.
///
/// The single-byte slot lets the transport represent "no gesture" and
/// "gesture X" with the same fixed width.
pub fn encode_symbol(buf: &mut [u8], symbol: u8, active: bool) -> Result<usize, EncodeError> {
    if buf.is_empty() {
        return Err(EncodeError::BufferTooSmall {
            required: 1,
            available: 0,
        });
    }
    buf[0] = if active { symbol } else { 0 };
    Ok(1)
}

/// Validate a producer symbol: printable ASCII, never NUL (NUL is the
/// absence signal).
pub fn validate_symbol(symbol: u8) -> Result<u8, EncodeError> {
    if symbol.is_ascii_graphic() {
        Ok(symbol)
    } else {
        Err(EncodeError::InvalidSymbol { symbol })
    }
}

/// Assembles one frame per tick from an ordered producer list.
///
/// The internal buffer is reused across ticks; a frame is transient data
/// with no identity beyond the tick that produced it.
#[derive(Debug, Default)]
pub struct FrameBuilder {
    buf: Vec<u8>,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenate every producer's slot in order and append the frame
    /// delimiter. Returns the finished frame bytes.
    ///
    /// # Errors
    /// Propagates the first `EncodeError` a producer reports.
    pub fn build(&mut self, producers: &[&dyn Encoder]) -> Result<&[u8], EncodeError> {
        let total: usize = producers.iter().map(|p| p.encoded_size()).sum::<usize>() + 1;
        self.buf.clear();
        self.buf.resize(total, 0);

        let mut offset = 0;
        for producer in producers {
            let size = producer.encoded_size();
            let written = producer.encode_into(&mut self.buf[offset..offset + size])?;
            // Contract: a producer writes exactly what it declared. A
            // mismatch is a producer bug, caught here in tests rather than
            // papered over with dynamic resizing.
            debug_assert_eq!(
                written, size,
                "producer wrote {} bytes but declared {}",
                written, size
            );
            offset += size;
        }
        self.buf[offset] = b'\n';

        Ok(&self.buf[..total])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_digits() {
        assert_eq!(value_digits(0.0), 1);
        assert_eq!(value_digits(9.0), 1);
        assert_eq!(value_digits(10.0), 2);
        assert_eq!(value_digits(1000.0), 4);
        assert_eq!(value_digits(4095.0), 4);
    }

    #[test]
    fn test_encode_keyed_value_layout() {
        let mut buf = [0xffu8; 6];
        let written = encode_keyed_value(&mut buf, b'A', 42.0, 1000.0).unwrap();
        assert_eq!(written, 6);
        assert_eq!(&buf, b"A0042\0");
    }

    #[test]
    fn test_encode_keyed_value_clamps_and_rounds() {
        let mut buf = [0u8; 6];
        encode_keyed_value(&mut buf, b'B', 1234.0, 1000.0).unwrap();
        assert_eq!(&buf, b"B1000\0");

        encode_keyed_value(&mut buf, b'B', -5.0, 1000.0).unwrap();
        assert_eq!(&buf, b"B0000\0");

        encode_keyed_value(&mut buf, b'B', 499.6, 1000.0).unwrap();
        assert_eq!(&buf, b"B0500\0");
    }

    #[test]
    fn test_encode_keyed_value_buffer_too_small() {
        let mut buf = [0u8; 3];
        let err = encode_keyed_value(&mut buf, b'A', 42.0, 1000.0).unwrap_err();
        assert_eq!(
            err,
            EncodeError::BufferTooSmall {
                required: 6,
                available: 3
            }
        );
        // Nothing written on failure.
        assert_eq!(buf, [0u8; 3]);
    }

    #[test]
    fn test_encode_symbol_active_and_inactive() {
        let mut buf = [0xffu8; 1];
        assert_eq!(encode_symbol(&mut buf, b'L', true).unwrap(), 1);
        assert_eq!(buf[0], b'L');

        assert_eq!(encode_symbol(&mut buf, b'L', false).unwrap(), 1);
        assert_eq!(buf[0], 0);
    }

    #[test]
    fn test_validate_symbol() {
        assert_eq!(validate_symbol(b'L').unwrap(), b'L');
        assert!(validate_symbol(0).is_err());
        assert!(validate_symbol(b' ').is_err());
        assert!(validate_symbol(b'\n').is_err());
    }

    struct FixedProducer {
        bytes: Vec<u8>,
    }

    impl Encoder for FixedProducer {
        fn encoded_size(&self) -> usize {
            self.bytes.len()
        }

        fn encode_into(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
            if buf.len() < self.bytes.len() {
                return Err(EncodeError::BufferTooSmall {
                    required: self.bytes.len(),
                    available: buf.len(),
                });
            }
            buf[..self.bytes.len()].copy_from_slice(&self.bytes);
            Ok(self.bytes.len())
        }
    }

    #[test]
    fn test_frame_builder_concatenates_in_order() {
        let a = FixedProducer {
            bytes: b"A0500\0".to_vec(),
        };
        let b = FixedProducer {
            bytes: b"L".to_vec(),
        };
        let c = FixedProducer { bytes: vec![0] };

        let mut builder = FrameBuilder::new();
        let frame = builder.build(&[&a as &dyn Encoder, &b, &c]).unwrap();
        assert_eq!(frame, b"A0500\0L\0\n");
    }

    #[test]
    fn test_frame_builder_empty_producer_list() {
        let mut builder = FrameBuilder::new();
        let frame = builder.build(&[]).unwrap();
        assert_eq!(frame, b"\n");
    }

    #[test]
    fn test_frame_builder_reuses_buffer_across_ticks() {
        let a = FixedProducer {
            bytes: b"A0001\0".to_vec(),
        };
        let mut builder = FrameBuilder::new();
        let first = builder.build(&[&a as &dyn Encoder]).unwrap().to_vec();
        let second = builder.build(&[&a as &dyn Encoder]).unwrap().to_vec();
        assert_eq!(first, second);
    }
}
