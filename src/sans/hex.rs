//! Conversion of ASCII hex digit pairs to bytes.

/// A character outside `[0-9a-fA-F]` where a hex digit was expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidHex;

/// Decode a single ASCII hex digit, case-insensitively.
pub fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Decode a pair of ASCII hex digits, high nibble first.
pub fn decode_pair(hi: u8, lo: u8) -> Result<u8, InvalidHex> {
    let hi = nibble(hi).ok_or(InvalidHex)?;
    let lo = nibble(lo).ok_or(InvalidHex)?;

    Ok((hi << 4) | lo)
}

/// Decode `count` digit pairs starting at `src` in `buf`, writing the bytes to
/// the front of the same buffer.
///
/// Output byte `i` is written only after reading digits `src + 2i` and
/// `src + 2i + 1`, and `i <= src + 2i`, so writes never overtake unread text.
/// Decoding stops at the first invalid digit, leaving later bytes untouched.
pub fn decode_in_place(buf: &mut [u8], src: usize, count: usize) -> Result<(), InvalidHex> {
    for i in 0..count {
        let j = src + 2 * i;
        buf[i] = decode_pair(buf[j], buf[j + 1])?;
    }

    Ok(())
}
