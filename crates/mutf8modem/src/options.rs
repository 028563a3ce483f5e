/// Configuration options for the Modified UTF-8 [`Decoder`].
///
/// The options are fixed for the lifetime of the decoder instance; the
/// fallback policy in particular is not switchable per call.
///
/// # Examples
///
/// ```rust
/// use mutf8modem::{Decoder, DecoderOptions};
///
/// let strict = Decoder::new(DecoderOptions {
///     fail_on_invalid: true,
/// });
/// ```
///
/// # Default
///
/// All options default to `false`.
///
/// [`Decoder`]: crate::Decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct DecoderOptions {
    /// Whether malformed input is reported as an error instead of being
    /// substituted.
    ///
    /// When `false`, every byte that cannot belong to a well-formed sequence
    /// produces one U+FFFD replacement unit and decoding continues. When
    /// `true`, the first such byte aborts the call with
    /// [`DecodeError::InvalidSequence`] carrying the byte and its absolute
    /// input position.
    ///
    /// # Default
    ///
    /// `false`
    ///
    /// [`DecodeError::InvalidSequence`]: crate::DecodeError::InvalidSequence
    pub fail_on_invalid: bool,
}
