//! Validation and dispatch of complete record lines.

use thiserror::Error;
use zerocopy::FromBytes;

use super::{buffer::LineBuffer, check};

/// Shortest well-formed line, `:LLAAAATTCC`.
pub const MIN_LINE_LENGTH: usize = 11;

/// Bytes of a decoded line outside its payload: length, address, type, and
/// checksum.
pub const FRAME_BYTES: usize = 5;

/// Offset of the payload within a decoded line.
pub const DATA_OFFSET: usize = 4;

/// A malformed line. Once returned by a decoder, it is latched until reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A character outside `[0-9a-fA-F]` where a hex digit was expected.
    #[error("Invalid hex digit.")]
    InvalidHex,
    /// The line exceeded the buffer capacity before a terminator was seen.
    #[error("Line exceeds the buffer capacity.")]
    LineTooLong,
    /// The line is odd-sized or too short, or its declared length disagrees
    /// with its contents.
    #[error("Invalid record length.")]
    InvalidLength,
    /// The bytes of the line do not sum to zero.
    #[error("Checksum mismatch.")]
    ChecksumMismatch,
    /// Record type other than data, end of file, extended linear address or
    /// start linear address.
    #[error("Unsupported record type ({0}).")]
    UnsupportedRecord(u8),
    /// Extended linear address record with a length other than two or a
    /// nonzero address field.
    #[error("Invalid extended linear address record.")]
    InvalidExtendedAddress,
    /// End of file record with a payload or a nonzero address field.
    #[error("Invalid end of file record.")]
    InvalidEof,
    /// The line does not begin with `:`.
    #[error("Missing start code.")]
    InvalidStart,
}

/// A short, static label for an error.
pub const fn error_name(err: Error) -> &'static str {
    match err {
        Error::InvalidHex => "HEX",
        Error::LineTooLong => "LINE_LENGTH",
        Error::InvalidLength => "LEN",
        Error::ChecksumMismatch => "CHECKSUM",
        Error::UnsupportedRecord(_) => "UNSUPPORTED_RECORD",
        Error::InvalidExtendedAddress => "EXT_ADDR",
        Error::InvalidEof => "EOF",
        Error::InvalidStart => "START",
    }
}

/// Supported record types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RecordType {
    Data = 0x00,
    EndOfFile = 0x01,
    ExtendedLinearAddress = 0x04,
    StartLinearAddress = 0x05,
}

impl TryFrom<u8> for RecordType {
    type Error = Error;

    fn try_from(b: u8) -> Result<Self, Error> {
        match b {
            0x00 => Ok(Self::Data),
            0x01 => Ok(Self::EndOfFile),
            0x04 => Ok(Self::ExtendedLinearAddress),
            0x05 => Ok(Self::StartLinearAddress),
            _ => Err(Error::UnsupportedRecord(b)),
        }
    }
}

/// The leading bytes of a decoded line.
#[repr(C, packed)]
#[derive(Debug, FromBytes)]
struct RecordHeader {
    length: u8,
    address: [u8; 2],
    kind: u8,
}

/// A validated line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    /// A data record whose payload of `length` bytes starts at
    /// [`DATA_OFFSET`] of the decoded line.
    Data { address: u16, length: u8 },
    /// The end of file record.
    EndOfFile,
    /// An extended linear address record, holding the upper sixteen bits of
    /// subsequent data addresses already shifted into place.
    ExtendedLinearAddress(u32),
    /// A start linear address record. Its contents are not interpreted.
    StartLinearAddress,
}

/// Validate and decode the line held in a buffer.
///
/// Checks run in order (start code, line length, hex digits, declared length,
/// checksum, record type) and the first failure is returned. The buffer is in
/// its binary view afterward unless the start code or line length was wrong.
pub fn process_line<const N: usize>(line: &mut LineBuffer<N>) -> Result<Record, Error> {
    let text = line.text();

    if text.first() != Some(&b':') {
        Err(Error::InvalidStart)?;
    }

    if text.len() % 2 == 0 || text.len() < MIN_LINE_LENGTH {
        Err(Error::InvalidLength)?;
    }

    let r = line.decode(1).map_err(|_| Error::InvalidHex)?;

    let (RecordHeader { length, address, kind }, payload) =
        RecordHeader::read_from_prefix(r).map_err(|_| Error::InvalidLength)?;

    if length as usize != r.len() - FRAME_BYTES {
        Err(Error::InvalidLength)?;
    }

    if !check::is_valid(r) {
        Err(Error::ChecksumMismatch)?;
    }

    let record = match RecordType::try_from(kind)? {
        RecordType::Data => Record::Data {
            address: u16::from_be_bytes(address),
            length,
        },
        RecordType::EndOfFile => {
            if length != 0 || address != [0, 0] {
                Err(Error::InvalidEof)?;
            }

            Record::EndOfFile
        }
        RecordType::ExtendedLinearAddress => {
            if length != 2 || address != [0, 0] {
                Err(Error::InvalidExtendedAddress)?;
            }

            let upper = u16::from_be_bytes([payload[0], payload[1]]);
            Record::ExtendedLinearAddress(u32::from(upper) << 16)
        }
        RecordType::StartLinearAddress => Record::StartLinearAddress,
    };

    Ok(record)
}
