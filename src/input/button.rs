//! Button - boolean producer fed from the out-of-scope pin scan.
//!
//! The pipeline never reads pins itself; the outer loop pushes the debounced
//! pressed state in before each tick. On the wire a button looks exactly
//! like a gesture: its symbol when pressed, NUL when released.

use crate::encoding::{encode_symbol, validate_symbol, Encoder};
use crate::error::EncodeError;

/// A physical button's wire-facing state.
#[derive(Debug, Clone)]
pub struct Button {
    symbol: u8,
    pressed: bool,
}

impl Button {
    /// Create a button with its frame symbol.
    ///
    /// # Errors
    /// `EncodeError::InvalidSymbol` when the symbol is NUL or not printable
    /// ASCII - NUL is reserved as the released/absence signal.
    pub fn new(symbol: u8) -> Result<Self, EncodeError> {
        Ok(Self {
            symbol: validate_symbol(symbol)?,
            pressed: false,
        })
    }

    pub fn symbol(&self) -> u8 {
        self.symbol
    }

    /// Push the debounced state from the pin scan.
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

impl Encoder for Button {
    fn encoded_size(&self) -> usize {
        1
    }

    fn encode_into(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        encode_symbol(buf, self.symbol, self.pressed)
    }
}
