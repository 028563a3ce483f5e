//! An incremental transcoder between UTF-16 code units and Modified UTF-8 —
//! the UTF-8 variant in which NUL is the overlong two-byte form `C0 80` and
//! supplementary-plane characters are two independent three-byte sequences,
//! so the byte stream never contains a zero byte and can be handled as a
//! C string.
//!
//! Encoding is stateless and per-unit; decoding is a resumable state machine
//! that accepts input in arbitrary fragments and writes into caller-owned
//! destinations, persisting partial sequences and unwritable output between
//! calls.
//!
//! ```rust
//! use mutf8modem::{Decoder, DecoderOptions, encode_str};
//!
//! let bytes = encode_str("A\u{1F60A}\0");
//! assert_eq!(bytes, [0x41, 0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x8A, 0xC0, 0x80]);
//!
//! let mut decoder = Decoder::new(DecoderOptions::default());
//! let units = decoder.decode_to_vec(&bytes, true).unwrap();
//! assert_eq!(units, [0x0041, 0xD83D, 0xDE0A, 0x0000]);
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod decoder;
mod encoder;
mod error;
mod options;
mod sizing;

#[cfg(test)]
mod tests;

pub use decoder::{DecodeProgress, Decoder, REPLACEMENT_UNIT, decode_to_string};
pub use encoder::{EncodeProgress, encode_step, encode_str, encode_to_slice, encode_to_vec};
pub use error::{DecodeError, EncodeError, SizeOverflow};
pub use options::DecoderOptions;
pub use sizing::{encoded_len, encoded_len_of, max_decoded_len, max_encoded_len};
