use alloc::vec::Vec;

use quickcheck::QuickCheck;

use crate::{Decoder, encode_to_vec};

/// Feeds `bytes` to `decoder` in chunk sizes derived from `splits`, with
/// `flush` only on the final call, and returns every unit emitted.
fn decode_in_chunks(decoder: &mut Decoder, bytes: &[u8], splits: &[usize]) -> Vec<u16> {
    let mut out = Vec::new();
    let mut idx = 0;
    let mut remaining = bytes.len();
    for &s in splits {
        if remaining == 0 {
            break;
        }
        let size = 1 + (s % remaining);
        let end = idx + size;
        out.extend(decoder.decode_to_vec(&bytes[idx..end], false).unwrap());
        idx = end;
        remaining -= size;
    }
    out.extend(decoder.decode_to_vec(&bytes[idx..], true).unwrap());
    out
}

/// Property: decoding a well-formed stream in arbitrarily sized fragments
/// must yield exactly the units that were encoded, regardless of where the
/// fragment boundaries fall inside multi-byte sequences.
#[test]
fn partition_roundtrip_quickcheck() {
    fn prop(units: Vec<u16>, splits: Vec<usize>) -> bool {
        let bytes = encode_to_vec(&units);
        decode_in_chunks(&mut Decoder::default(), &bytes, &splits) == units
    }

    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(Vec<u16>, Vec<usize>) -> bool);
}

/// Property: for *arbitrary* bytes — including malformed sequences broken
/// across fragment boundaries — chunked decoding agrees with decoding the
/// whole input in one call.
#[test]
fn partition_equivalence_on_malformed_input() {
    fn prop(data: Vec<u8>, splits: Vec<usize>) -> bool {
        let whole = Decoder::default().decode_to_vec(&data, true).unwrap();
        decode_in_chunks(&mut Decoder::default(), &data, &splits) == whole
    }

    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(Vec<u8>, Vec<usize>) -> bool);
}
