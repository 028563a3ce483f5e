//! The Modified UTF-8 encoder.
//!
//! Encoding is stateless: each UTF-16 code unit maps independently to one,
//! two, or three bytes, so nothing needs to persist between calls and the
//! functions here are safe for unrestricted concurrent use. Surrogate halves
//! are deliberately encoded on their own — a pair becomes two independent
//! three-byte sequences, never one four-byte sequence — and NUL becomes the
//! overlong `C0 80` so the output never contains a zero byte.

use alloc::vec::Vec;

use crate::{
    error::EncodeError,
    sizing::{encoded_len, encoded_len_of},
};

/// Progress of a best-effort encode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeProgress {
    /// Code units fully encoded into the destination.
    pub units_read: usize,
    /// Bytes written to the destination.
    pub bytes_written: usize,
}

/// Writes the encoding of one unit into `dst` and returns its width.
/// Callers must have checked `dst.len() >= encoded_len(unit)`.
#[allow(clippy::cast_possible_truncation)]
fn write_unit(unit: u16, dst: &mut [u8]) -> usize {
    match unit {
        0 => {
            dst[0] = 0xC0;
            dst[1] = 0x80;
            2
        }
        1..=0x7F => {
            dst[0] = unit as u8;
            1
        }
        0x80..=0x7FF => {
            dst[0] = 0xC0 | (unit >> 6) as u8;
            dst[1] = 0x80 | (unit & 0x3F) as u8;
            2
        }
        _ => {
            dst[0] = 0xE0 | (unit >> 12) as u8;
            dst[1] = 0x80 | ((unit >> 6) & 0x3F) as u8;
            dst[2] = 0x80 | (unit & 0x3F) as u8;
            3
        }
    }
}

/// Encodes as many leading units of `units` as fit in `dst`.
///
/// Never fails on capacity: encoding stops before the first unit whose full
/// multi-byte form does not fit, so the destination never receives a torn
/// sequence. The returned [`EncodeProgress`] tells the caller how far to
/// advance both buffers before calling again.
///
/// ```rust
/// use mutf8modem::encode_step;
///
/// let units = [0x0041, 0x4E2D]; // 'A' then a 3-byte unit
/// let mut dst = [0u8; 2];
/// let progress = encode_step(&units, &mut dst);
/// assert_eq!(progress.units_read, 1);
/// assert_eq!(progress.bytes_written, 1);
/// ```
#[must_use]
pub fn encode_step(units: &[u16], dst: &mut [u8]) -> EncodeProgress {
    let mut bytes_written = 0;
    let mut units_read = 0;
    for &unit in units {
        if dst.len() - bytes_written < encoded_len(unit) {
            break;
        }
        bytes_written += write_unit(unit, &mut dst[bytes_written..]);
        units_read += 1;
    }
    EncodeProgress {
        units_read,
        bytes_written,
    }
}

/// Encodes all of `units` into `dst`, returning the bytes written.
///
/// This is the atomic variant: the whole input must fit.
///
/// # Errors
///
/// Returns [`EncodeError::OutputFull`] if `dst` is too small for the full
/// encoding; use [`encoded_len_of`] or
/// [`max_encoded_len`](crate::max_encoded_len) to size it up front.
pub fn encode_to_slice(units: &[u16], dst: &mut [u8]) -> Result<usize, EncodeError> {
    let progress = encode_step(units, dst);
    if progress.units_read != units.len() {
        return Err(EncodeError::OutputFull);
    }
    Ok(progress.bytes_written)
}

/// Encodes all of `units` into a freshly allocated, exactly sized buffer.
#[must_use]
pub fn encode_to_vec(units: &[u16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len_of(units));
    let mut scratch = [0u8; 3];
    for &unit in units {
        let len = write_unit(unit, &mut scratch);
        out.extend_from_slice(&scratch[..len]);
    }
    out
}

/// Encodes the UTF-16 code units of `text`.
///
/// Supplementary-plane characters pass through `str`'s surrogate-pair
/// expansion and therefore come out as two three-byte sequences:
///
/// ```rust
/// use mutf8modem::encode_str;
///
/// assert_eq!(
///     encode_str("A\u{1F60A}\0"),
///     [0x41, 0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x8A, 0xC0, 0x80],
/// );
/// ```
#[must_use]
pub fn encode_str(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    let mut scratch = [0u8; 3];
    for unit in text.encode_utf16() {
        let len = write_unit(unit, &mut scratch);
        out.extend_from_slice(&scratch[..len]);
    }
    out
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use rstest::rstest;

    use super::{encode_step, encode_str, encode_to_slice, encode_to_vec};
    use crate::{error::EncodeError, sizing::encoded_len};

    #[rstest]
    #[case(0x0000, &[0xC0, 0x80])]
    #[case(0x0041, &[0x41])]
    #[case(0x007F, &[0x7F])]
    #[case(0x0080, &[0xC2, 0x80])]
    #[case(0x07FF, &[0xDF, 0xBF])]
    #[case(0x0800, &[0xE0, 0xA0, 0x80])]
    #[case(0xD83D, &[0xED, 0xA0, 0xBD])] // lone high surrogate, 3-byte form
    #[case(0xFFFF, &[0xEF, 0xBF, 0xBF])]
    fn single_unit_forms(#[case] unit: u16, #[case] expected: &[u8]) {
        assert_eq!(encode_to_vec(&[unit]), expected);
    }

    #[test]
    fn worked_example() {
        // "A😊\0" as code units.
        let units = [0x0041, 0xD83D, 0xDE0A, 0x0000];
        let expected = [0x41, 0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x8A, 0xC0, 0x80];
        assert_eq!(encode_to_vec(&units), expected);
        assert_eq!(encode_str("A\u{1F60A}\0"), expected);
    }

    #[test]
    fn sizing_matches_emission() {
        let mut dst = [0u8; 3];
        for unit in 0..=u16::MAX {
            let progress = encode_step(&[unit], &mut dst);
            assert_eq!(progress.units_read, 1);
            assert_eq!(progress.bytes_written, encoded_len(unit), "unit {unit:#06X}");
        }
    }

    #[test]
    fn atomic_encode_rejects_short_destination() {
        let mut dst = [0u8; 2];
        assert_eq!(
            encode_to_slice(&[0x4E2D], &mut dst),
            Err(EncodeError::OutputFull)
        );
        // Nothing was torn: a partial lead byte is never written.
        let mut dst = [0u8; 4];
        assert_eq!(encode_to_slice(&[0x4E2D, 0x41], &mut dst), Ok(4));
        assert_eq!(dst, [0xE4, 0xB8, 0xAD, 0x41]);
    }

    #[test]
    fn step_stops_at_unit_boundary() {
        let units = [0x0041, 0x0000, 0x4E2D];
        let mut dst = [0u8; 4];
        let progress = encode_step(&units, &mut dst);
        assert_eq!(progress.units_read, 2);
        assert_eq!(progress.bytes_written, 3);
        assert_eq!(&dst[..3], &[0x41, 0xC0, 0x80]);

        // Resume where the first call stopped.
        let mut rest = vec![0u8; 3];
        let progress = encode_step(&units[progress.units_read..], &mut rest);
        assert_eq!(progress.units_read, 1);
        assert_eq!(rest, [0xE4, 0xB8, 0xAD]);
    }

    #[test]
    fn zero_byte_never_emitted() {
        let units: alloc::vec::Vec<u16> = (0..=0x7FF).collect();
        assert!(!encode_to_vec(&units).contains(&0));
    }
}
