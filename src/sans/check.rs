//! Helper for computing record checksums.

/// Accumulate a slice of bytes into a checksum value.
///
/// The checksum is the two's-complement byte sum, so accumulating every byte of
/// a well-formed record (including its trailing checksum byte) yields zero.
pub fn compute_checksum(init: u8, r: &[u8]) -> u8 {
    r.iter().fold(init, |acc, b| acc.wrapping_add(*b))
}

/// Whether the bytes of a decoded record line sum to zero.
pub fn is_valid(r: &[u8]) -> bool {
    compute_checksum(0, r) == 0
}
