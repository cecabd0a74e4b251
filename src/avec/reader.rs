//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::io::{ErrorKind, Read};

use thiserror::Error;

use crate::sans::{Decoder, record};

use super::{FromRecords, finish};

extern crate std;

/// Bytes requested from the reader per call.
const CHUNK_SIZE: usize = 256;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The reader was exhausted before an end of file record.
    #[error("Reached the end of the reader before an end of file record.")]
    EndOfReader,
    /// A malformed record.
    #[error("Malformed record: {0}")]
    Record(#[from] record::Error),
}

/// Decode records from a reader of an image, publishing to a receiver.
///
/// The reader is consumed in chunks, so bytes following the end of file record
/// may have been read from it when this returns.
///
/// A final line without a line feed is accepted.
///
/// This method is also re-exported as `ihexline::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(r: &mut impl Read, o: &mut impl FromRecords) -> Result<(), Error> {
    let mut decoder = Decoder::new();
    let mut buf = [0; CHUNK_SIZE];

    loop {
        let n = match r.read(&mut buf) {
            Ok(0) if finish(&mut decoder, o)? => return Ok(()),
            Ok(0) => Err(Error::EndOfReader)?,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => Err(err)?,
        };

        let mut chunk = &buf[..n];

        while !chunk.is_empty() {
            let used = decoder.feed(chunk)?;
            chunk = &chunk[used..];

            if let Some(record) = decoder.record() {
                o.add_data(record.address, record.data);
                decoder.acknowledge();
            } else if decoder.is_eof() {
                return Ok(());
            }
        }
    }
}
