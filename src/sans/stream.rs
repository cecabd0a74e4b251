//! Line accumulation and flow control over a byte stream.

use super::{
    buffer::LineBuffer,
    record::{self, DATA_OFFSET, Error, MIN_LINE_LENGTH, Record},
};

/// Default maximum line length, including the start code: a full 255 byte data
/// record and some headroom.
pub const DEFAULT_LINE_LENGTH: usize = 521;

/// Observable state of a decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Accepting input.
    Ready,
    /// A data record awaits acknowledgement.
    RecordReady,
    /// The end of file record was decoded. Terminal.
    Eof,
    /// A malformed line was decoded. Terminal until reset.
    Failed,
}

/// A decoded data record, valid until acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataRecord<'a> {
    /// Address of the first payload byte, including any extended linear
    /// address.
    pub address: u32,
    /// Payload bytes.
    pub data: &'a [u8],
}

/// Incremental decoder for lines of up to `N` characters.
///
/// `N` bounds the text of one line (excluding its terminator) and also the
/// storage for its decoded bytes, which reuse the same region.
#[derive(Debug, Clone)]
pub struct Decoder<const N: usize = DEFAULT_LINE_LENGTH> {
    line: LineBuffer<N>,
    /// Payload length of an unacknowledged data record, otherwise zero.
    length: u8,
    address: u32,
    extended_address: u32,
    eof: bool,
    error: Option<Error>,
}

impl<const N: usize> Decoder<N> {
    /// Largest data record payload that fits in a line.
    pub const DATA_CAPACITY: usize = (N - MIN_LINE_LENGTH) / 2;

    /// Create a decoder ready to accept the first line.
    pub const fn new() -> Self {
        const { assert!(N >= MIN_LINE_LENGTH, "line length is too short for any record") };

        Self {
            line: LineBuffer::new(),
            length: 0,
            address: 0,
            extended_address: 0,
            eof: false,
            error: None,
        }
    }

    /// Return to the initial state, clearing any latched error, end of file,
    /// and extended linear address.
    pub fn reset(&mut self) {
        self.line.clear();
        self.length = 0;
        self.address = 0;
        self.extended_address = 0;
        self.eof = false;
        self.error = None;
    }

    /// Pass text to the decoder.
    ///
    /// Returns the number of bytes consumed, up to and including the first
    /// line feed that completes a line. Returns zero without consuming
    /// anything while a data record awaits acknowledgement or after end of
    /// file. Returns the latched error if a malformed line has been seen,
    /// including one completed by this call.
    pub fn feed(&mut self, r: &[u8]) -> Result<usize, Error> {
        if let Some(err) = self.error {
            return Err(err);
        }

        if self.eof || self.length != 0 {
            return Ok(0);
        }

        for (i, &c) in r.iter().enumerate() {
            match c {
                b'\n' if self.line.text().is_empty() => {}
                b'\n' => {
                    self.end_line()?;
                    return Ok(i + 1);
                }
                b'\r' => {}
                _ => {
                    if self.line.push(c).is_err() {
                        return Err(self.latch(Error::LineTooLong));
                    }
                }
            }
        }

        Ok(r.len())
    }

    /// Release the current data record, allowing input to resume.
    ///
    /// Its payload must be considered overwritten. Has no effect unless a
    /// record is ready.
    pub fn acknowledge(&mut self) {
        self.length = 0;
    }

    /// The unacknowledged data record, if any.
    pub fn record(&self) -> Option<DataRecord<'_>> {
        let data = self.data()?;

        Some(DataRecord {
            address: self.address,
            data,
        })
    }

    /// Payload of the unacknowledged data record, if any.
    pub fn data(&self) -> Option<&[u8]> {
        if self.length == 0 {
            return None;
        }

        let end = DATA_OFFSET + self.length as usize;
        self.line.binary().get(DATA_OFFSET..end)
    }

    /// Address of the unacknowledged data record, if any.
    pub fn address(&self) -> Option<u32> {
        (self.length != 0).then_some(self.address)
    }

    /// Upper address bits applied to data records, from the last extended
    /// linear address record.
    pub fn extended_address(&self) -> u32 {
        self.extended_address
    }

    /// Whether the end of file record has been decoded.
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// The latched error, if any.
    pub fn error(&self) -> Option<Error> {
        self.error
    }

    /// Where the decoder stands in its record cycle.
    pub fn state(&self) -> State {
        if self.error.is_some() {
            State::Failed
        } else if self.eof {
            State::Eof
        } else if self.length != 0 {
            State::RecordReady
        } else {
            State::Ready
        }
    }

    fn end_line(&mut self) -> Result<(), Error> {
        match record::process_line(&mut self.line) {
            Ok(Record::Data { address, length }) => {
                self.address = u32::from(address) | self.extended_address;
                self.length = length;
                trace!("data record at {}, {} bytes", self.address, length);
            }
            Ok(Record::EndOfFile) => {
                self.eof = true;
                debug!("end of file");
            }
            Ok(Record::ExtendedLinearAddress(address)) => {
                self.extended_address = address;
                trace!("extended linear address {}", address);
            }
            Ok(Record::StartLinearAddress) => {}
            Err(err) => return Err(self.latch(err)),
        }

        Ok(())
    }

    fn latch(&mut self, err: Error) -> Error {
        debug!("latched error: {}", err);
        self.error = Some(err);
        err
    }
}

impl<const N: usize> Default for Decoder<N> {
    fn default() -> Self {
        Self::new()
    }
}
