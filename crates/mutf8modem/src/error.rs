use thiserror::Error;

/// Errors reported while encoding UTF-16 code units into Modified UTF-8.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// The destination buffer cannot hold the full encoding of the input.
    ///
    /// Only the atomic entry point ([`encode_to_slice`]) reports this; the
    /// best-effort entry point ([`encode_step`]) stops early instead.
    ///
    /// [`encode_to_slice`]: crate::encode_to_slice
    /// [`encode_step`]: crate::encode_step
    #[error("the output buffer is too small to contain the encoded bytes")]
    OutputFull,
}

/// Errors reported while decoding Modified UTF-8 into UTF-16 code units.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A byte that cannot belong to any well-formed sequence at its position.
    ///
    /// Reported only when [`DecoderOptions::fail_on_invalid`] is set; with
    /// the default policy the offending byte is substituted with U+FFFD.
    ///
    /// [`DecoderOptions::fail_on_invalid`]: crate::DecoderOptions::fail_on_invalid
    #[error("invalid byte 0x{byte:02X} at input position {index}")]
    InvalidSequence {
        /// The raw offending byte.
        byte: u8,
        /// Absolute input offset of the byte, counted across all calls since
        /// the decoder was constructed or reset.
        index: usize,
    },
    /// The destination buffer cannot hold all decoded units.
    ///
    /// Only the fixed-capacity entry point ([`Decoder::decode_exact`])
    /// reports this; [`Decoder::decode_step`] signals it recoverably through
    /// [`DecodeProgress::completed`] instead.
    ///
    /// [`Decoder::decode_exact`]: crate::Decoder::decode_exact
    /// [`Decoder::decode_step`]: crate::Decoder::decode_step
    /// [`DecodeProgress::completed`]: crate::DecodeProgress::completed
    #[error("the output buffer is too small to contain the decoded units")]
    OutputFull,
}

/// A worst-case size computation exceeded `usize`.
///
/// Signals that the input must be chunked before sizing a destination.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("worst-case conversion size for {count} input elements overflows usize")]
pub struct SizeOverflow {
    /// The input element count that could not be sized.
    pub count: usize,
}
