//! Slice-based decoder implementation.

use thiserror::Error;

use crate::sans::{Decoder, record};

use super::{FromRecords, finish};

/// Errors occurring while decoding from a slice.
#[derive(Debug, Error)]
pub enum Error {
    /// Reached the end of the slice before an end of file record.
    #[error("Reached the end of the slice before an end of file record.")]
    EndOfSlice,
    /// A malformed record.
    #[error("Malformed record: {0}")]
    Record(#[from] record::Error),
}

/// Decode records from a slice of an image, publishing to a receiver.
///
/// A final line without a line feed is accepted.
///
/// This method is also re-exported as `ihexline::avec::decode_slice`.
pub fn decode(r: &[u8], o: &mut impl FromRecords) -> Result<(), Error> {
    let mut decoder = Decoder::new();
    let mut r = r;

    loop {
        let n = decoder.feed(r)?;
        r = &r[n..];

        if let Some(record) = decoder.record() {
            o.add_data(record.address, record.data);
            decoder.acknowledge();
        } else if decoder.is_eof() {
            return Ok(());
        } else if r.is_empty() {
            if finish(&mut decoder, o)? {
                return Ok(());
            }

            Err(Error::EndOfSlice)?;
        }
    }
}
