//! Incremental, sans-I/O decoding of Intel HEX text.
//!
//! This module is intended for applications that manage their own input, such
//! as bootloaders receiving an image over a serial link. See [`crate::avec`]
//! for implementations covering common decoding patterns.
//!
//! # Architecture
//!
//! A [`Decoder`] is fed text in slices of any size. It buffers characters until
//! a line feed, then decodes the line in place and validates it. Carriage
//! returns are ignored, so both LF and CRLF line endings are accepted.
//!
//! At most one line is decoded per call to [`Decoder::feed`], which reports how
//! many bytes it consumed. Bytes after the line feed are left for the caller
//! to pass again.
//!
//! When a data record is decoded, its address and payload become readable
//! through [`Decoder::record`], and the decoder consumes nothing further until
//! [`Decoder::acknowledge`] is called. The payload lives in the line buffer
//! and is overwritten by the next line.
//!
//! After an end of file record, the decoder consumes nothing further.
//!
//! Errors are latching: every call to `feed` after a malformed line returns
//! the same error until the decoder is reset. A damaged image should never be
//! silently resynchronized.
//!
//! A typical loop looks like:
//!
//! ```
//! let mut decoder = Decoder::new();
//! let mut input: &[u8] = image;
//!
//! while !decoder.is_eof() {
//!     let n = decoder.feed(input)?;
//!     input = &input[n..];
//!
//!     if let Some(record) = decoder.record() {
//!         flash.write(record.address, record.data);
//!         decoder.acknowledge();
//!     } else if input.is_empty() {
//!         break;
//!     }
//! }
//! ```

pub mod buffer;
pub mod check;
pub mod hex;
pub mod record;
pub mod stream;

/// Entrypoint to the decoder, for lines of up to
/// [`stream::DEFAULT_LINE_LENGTH`] characters.
pub type Decoder = stream::Decoder<{ stream::DEFAULT_LINE_LENGTH }>;
