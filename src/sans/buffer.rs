//! Line storage shared between raw text and decoded bytes.

use super::hex::{self, InvalidHex};

/// Which interpretation of the storage is currently valid, and its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    /// Characters of a line being accumulated.
    Text(usize),
    /// Bytes decoded from the last completed line.
    Binary(usize),
}

/// Returned when a character is pushed onto a full buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full;

/// A fixed-capacity buffer holding either the text of one record line or the
/// bytes decoded from it, never both.
///
/// Decoding consumes the text view and writes bytes over its prefix; the next
/// pushed character discards the bytes and starts a new line.
#[derive(Debug, Clone)]
pub struct LineBuffer<const N: usize> {
    bytes: [u8; N],
    view: View,
}

impl<const N: usize> LineBuffer<N> {
    /// Create an empty buffer in the text view.
    pub const fn new() -> Self {
        Self {
            bytes: [0; N],
            view: View::Text(0),
        }
    }

    /// Discard any content and return to an empty text view.
    pub fn clear(&mut self) {
        self.view = View::Text(0);
    }

    /// Append a character to the line.
    ///
    /// If the buffer holds decoded bytes, they are dropped first.
    pub fn push(&mut self, c: u8) -> Result<(), Full> {
        let len = match self.view {
            View::Text(len) => len,
            View::Binary(_) => 0,
        };

        if len == N {
            return Err(Full);
        }

        self.bytes[len] = c;
        self.view = View::Text(len + 1);

        Ok(())
    }

    /// The characters accumulated so far, or nothing in the binary view.
    pub fn text(&self) -> &[u8] {
        match self.view {
            View::Text(len) => &self.bytes[..len],
            View::Binary(_) => &[],
        }
    }

    /// The decoded bytes, or nothing in the text view.
    pub fn binary(&self) -> &[u8] {
        match self.view {
            View::Binary(len) => &self.bytes[..len],
            View::Text(_) => &[],
        }
    }

    /// Decode the hex digits following `skip` leading characters, switching to
    /// the binary view.
    ///
    /// A trailing unpaired digit is ignored. On failure the buffer is left
    /// empty, as its prefix has been partially overwritten.
    pub fn decode(&mut self, skip: usize) -> Result<&[u8], InvalidHex> {
        let count = self.text().len().saturating_sub(skip) / 2;

        // The text view is gone from here on, whatever the outcome.
        self.view = View::Binary(0);
        hex::decode_in_place(&mut self.bytes, skip, count)?;
        self.view = View::Binary(count);

        Ok(&self.bytes[..count])
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
