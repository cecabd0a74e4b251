//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module are suited to decoding complete images from
//! files and data slices, publishing data records to a [`FromRecords`]
//! receiver. Decoding stops at the end of file record; anything after it is
//! not read.

#[cfg(feature = "std")]
pub mod reader;
pub mod slice;

#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;

use crate::sans::{Decoder, record};

/// Receive data records for an image.
///
/// Implemented for closures taking an address and payload, so a receiver can
/// be written inline:
///
/// ```
/// let mut image = [0xff; 0x1000];
/// ihexline::avec::decode_slice(data, &mut |address: u32, data: &[u8]| {
///     let start = address as usize;
///     image[start..start + data.len()].copy_from_slice(data);
/// })?;
/// ```
pub trait FromRecords {
    /// Add a data record, with its payload starting at `address`.
    ///
    /// The payload slice is only valid for the duration of the call.
    fn add_data(&mut self, address: u32, data: &[u8]);
}

impl<F: FnMut(u32, &[u8])> FromRecords for F {
    fn add_data(&mut self, address: u32, data: &[u8]) {
        self(address, data)
    }
}

/// Terminate a final line that lacks a line feed, publishing it if it is a
/// data record.
///
/// Returns whether the decoder has reached the end of file record.
fn finish(decoder: &mut Decoder, o: &mut impl FromRecords) -> Result<bool, record::Error> {
    decoder.feed(b"\n")?;

    if let Some(record) = decoder.record() {
        o.add_data(record.address, record.data);
        decoder.acknowledge();
    }

    Ok(decoder.is_eof())
}
