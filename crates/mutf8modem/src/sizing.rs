//! Sizing helpers for pre-allocating conversion destinations.
//!
//! [`encoded_len`] and [`encoded_len_of`] are exact: they return the byte
//! count [`encode_step`](crate::encode_step) will actually emit. The `max_*`
//! variants are cheap worst-case bounds that do not look at the data.

use crate::error::SizeOverflow;

/// Returns the number of Modified UTF-8 bytes that encode `unit`.
///
/// NUL takes the two-byte overlong form; every other unit takes the shortest
/// UTF-8-shaped form for its value, unpaired surrogate halves included.
///
/// ```rust
/// use mutf8modem::encoded_len;
///
/// assert_eq!(encoded_len(0x0000), 2); // overlong C0 80
/// assert_eq!(encoded_len(0x0041), 1);
/// assert_eq!(encoded_len(0x00E9), 2);
/// assert_eq!(encoded_len(0xD83D), 3); // lone high surrogate
/// ```
#[must_use]
pub const fn encoded_len(unit: u16) -> usize {
    match unit {
        0 => 2,
        1..=0x7F => 1,
        0x80..=0x7FF => 2,
        _ => 3,
    }
}

/// Returns the exact number of bytes needed to encode all of `units`.
#[must_use]
pub fn encoded_len_of(units: &[u16]) -> usize {
    units.iter().map(|&unit| encoded_len(unit)).sum()
}

/// Returns the worst-case encoded size for `unit_count` code units.
///
/// Every unit may need the three-byte form.
///
/// # Errors
///
/// Returns [`SizeOverflow`] when the bound exceeds `usize`, meaning the
/// caller must chunk its input.
pub const fn max_encoded_len(unit_count: usize) -> Result<usize, SizeOverflow> {
    match unit_count.checked_mul(3) {
        Some(len) => Ok(len),
        None => Err(SizeOverflow { count: unit_count }),
    }
}

/// Returns the worst-case decoded size for `byte_count` input bytes.
///
/// Every byte may decode (or substitute) to its own unit, and one more unit
/// may already be pending inside the decoder from an earlier call.
///
/// # Errors
///
/// Returns [`SizeOverflow`] when the bound exceeds `usize`.
pub const fn max_decoded_len(byte_count: usize) -> Result<usize, SizeOverflow> {
    match byte_count.checked_add(1) {
        Some(len) => Ok(len),
        None => Err(SizeOverflow { count: byte_count }),
    }
}

#[cfg(test)]
mod tests {
    use super::{encoded_len, encoded_len_of, max_decoded_len, max_encoded_len};

    #[test]
    fn boundary_values() {
        assert_eq!(encoded_len(0x0000), 2);
        assert_eq!(encoded_len(0x0001), 1);
        assert_eq!(encoded_len(0x007F), 1);
        assert_eq!(encoded_len(0x0080), 2);
        assert_eq!(encoded_len(0x07FF), 2);
        assert_eq!(encoded_len(0x0800), 3);
        assert_eq!(encoded_len(0xD800), 3);
        assert_eq!(encoded_len(0xDFFF), 3);
        assert_eq!(encoded_len(0xFFFF), 3);
    }

    #[test]
    fn sequence_length_is_a_sum() {
        assert_eq!(encoded_len_of(&[]), 0);
        assert_eq!(encoded_len_of(&[0x0041, 0xD83D, 0xDE0A, 0x0000]), 9);
    }

    #[test]
    fn worst_case_bounds() {
        assert_eq!(max_encoded_len(0), Ok(0));
        assert_eq!(max_encoded_len(10), Ok(30));
        assert!(max_encoded_len(usize::MAX).is_err());

        assert_eq!(max_decoded_len(0), Ok(1));
        assert_eq!(max_decoded_len(10), Ok(11));
        assert!(max_decoded_len(usize::MAX).is_err());
    }
}
