#![no_main]
use libfuzzer_sys::fuzz_target;
use mutf8modem::{Decoder, DecoderOptions};

const HEADER: usize = 5; // 1 flag byte + 4-byte split seed

fuzz_target!(|data: &[u8]| decoder(data));

fn decoder(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let split_seed = u32::from_le_bytes(data[1..5].try_into().unwrap()) as u64;
    let data = &data[HEADER..];

    let fail_on_invalid = flags & 1 != 0;
    // A deliberately tiny destination forces frequent suspensions.
    let dst_len = usize::from((flags >> 1) & 0x07) + 1;

    let mut decoder = Decoder::new(DecoderOptions { fail_on_invalid });
    let mut dst = vec![0u16; dst_len];
    let mut out = Vec::new();

    let chunks = split_into_chunks(data, split_seed);
    let count = chunks.len();
    'feed: for (n, chunk) in chunks.into_iter().enumerate() {
        let flush = n + 1 == count;
        let mut offset = 0;
        loop {
            let Ok(progress) = decoder.decode_step(&chunk[offset..], &mut dst, flush) else {
                // Strict policy: the error path is exercised, nothing to
                // compare afterwards.
                assert!(fail_on_invalid);
                return;
            };
            out.extend_from_slice(&dst[..progress.units_written]);
            offset += progress.bytes_read;
            if progress.completed {
                assert_eq!(offset, chunk.len());
                continue 'feed;
            }
            if !flush && offset == chunk.len() {
                // Not a suspension: a partial sequence is waiting for the
                // next chunk.
                continue 'feed;
            }
            // A suspended call must have made progress somewhere.
            assert!(progress.bytes_read > 0 || progress.units_written > 0);
        }
    }

    // Chunked decoding with suspensions must agree with a one-shot decode.
    match Decoder::new(DecoderOptions { fail_on_invalid }).decode_to_vec(data, true) {
        Ok(whole) => assert_eq!(out, whole),
        Err(_) => assert!(fail_on_invalid),
    }
}

/// Split `data` into deterministic chunk sizes derived from `split_seed`.
/// Every chunk is at least one byte; splits may land anywhere, including
/// inside multi-byte sequences.
fn split_into_chunks(data: &[u8], split_seed: u64) -> Vec<&[u8]> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let len = data.len();

    while start < len {
        let remaining = len - start;
        let size = (split_seed as usize % remaining) + 1;
        chunks.push(&data[start..start + size]);
        start += size;
    }

    if chunks.is_empty() {
        chunks.push(data);
    }

    chunks
}
