//! The streaming Modified UTF-8 decoder.
//!
//! This module provides the [`Decoder`] for incremental Modified UTF-8
//! decoding, capable of processing byte input in arbitrary fragments and
//! writing UTF-16 code units into caller-owned destinations.
//!
//! A multi-byte sequence may span two calls, and a decoded surrogate pair may
//! itself span an output-buffer boundary, so the decoder persists three
//! things between calls: the raw bytes of the sequence in flight, the value
//! bits accumulated from them, and any decoded units that were computed but
//! could not be written because the destination was full. The last of these
//! is always flushed before new input is consumed.
//!
//! # Examples
//!
//! Basic usage:
//!
//! ```rust
//! use mutf8modem::{Decoder, DecoderOptions};
//!
//! let mut decoder = Decoder::new(DecoderOptions::default());
//! let units = decoder.decode_to_vec(&[0xC0, 0x80, 0x41], true).unwrap();
//! assert_eq!(units, [0x0000, 0x0041]);
//! ```
#![allow(clippy::cast_possible_truncation)]

use alloc::{string::String, vec::Vec};

use crate::{error::DecodeError, options::DecoderOptions};

/// The code unit substituted for each offending byte under the default
/// fallback policy.
pub const REPLACEMENT_UNIT: u16 = 0xFFFD;

/// Progress of one [`Decoder::decode_step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeProgress {
    /// Input bytes consumed by this call. A byte counts as consumed once its
    /// decoded output has been written or is held pending inside the
    /// decoder, so resubmitting the unconsumed tail never replays a byte.
    pub bytes_read: usize,
    /// Code units written to the destination by this call.
    pub units_written: usize,
    /// `false` when the destination filled before all input was consumed
    /// (call again with more destination space and the unconsumed tail), or
    /// when `flush` was `false` and a multi-byte sequence is still awaiting
    /// its continuation bytes.
    pub completed: bool,
}

/// Outcome of the shared decode loop, independent of the sink in use.
struct Run {
    bytes_read: usize,
    completed: bool,
}

/// Destination seam of the decode loop. `push` returns `false` when the sink
/// cannot accept the unit, which suspends the conversion.
trait UnitSink {
    fn push(&mut self, unit: u16) -> bool;
}

struct SliceSink<'a> {
    dst: &'a mut [u16],
    written: usize,
}

impl UnitSink for SliceSink<'_> {
    fn push(&mut self, unit: u16) -> bool {
        if self.written == self.dst.len() {
            return false;
        }
        self.dst[self.written] = unit;
        self.written += 1;
        true
    }
}

struct VecSink<'a> {
    out: &'a mut Vec<u16>,
}

impl UnitSink for VecSink<'_> {
    fn push(&mut self, unit: u16) -> bool {
        self.out.push(unit);
        true
    }
}

#[derive(Default)]
struct CountSink {
    count: usize,
}

impl UnitSink for CountSink {
    fn push(&mut self, _unit: u16) -> bool {
        self.count += 1;
        true
    }
}

#[derive(Debug, Clone)]
/// The streaming Modified UTF-8 decoder.
///
/// A `Decoder` owns the state of exactly one logical byte stream. It may be
/// moved between threads, but concurrent use from two streams requires one
/// decoder per stream; [`reset`](Decoder::reset) begins a new stream on an
/// existing instance.
///
/// The fallback policy for malformed input is fixed at construction through
/// [`DecoderOptions`]: substitute U+FFFD per offending byte (default), or
/// report [`DecodeError::InvalidSequence`].
///
/// Decoding is deliberately lenient in two ways the encoder is not: a raw
/// zero byte decodes to unit 0 even though conforming streams only carry NUL
/// as `C0 80`, and four-byte sequences are accepted (as a surrogate pair)
/// even though this encoder never emits them.
///
/// # Examples
///
/// ```rust
/// use mutf8modem::{Decoder, DecoderOptions};
///
/// let mut decoder = Decoder::new(DecoderOptions::default());
/// let mut dst = [0u16; 8];
///
/// // A surrogate pair split across two chunks.
/// let first = decoder
///     .decode_step(&[0xED, 0xA0], &mut dst, false)
///     .unwrap();
/// assert_eq!(first.bytes_read, 2);
/// assert!(!first.completed);
///
/// let second = decoder
///     .decode_step(&[0xBD, 0xED, 0xB8, 0x8A], &mut dst[..], true)
///     .unwrap();
/// assert_eq!(second.units_written, 2);
/// assert!(second.completed);
/// assert_eq!(&dst[..2], &[0xD83D, 0xDE0A]);
/// ```
pub struct Decoder {
    fail_on_invalid: bool,

    /// Raw bytes of the sequence in flight, lead byte first.
    seq: [u8; 4],
    seq_len: u8,
    /// Continuation bytes still needed; zero means between sequences.
    remaining: u8,
    /// Value bits assembled from the sequence so far.
    acc: u32,

    /// Decoded units computed but not yet written (destination was full).
    /// Holds at most both halves of a pair or one substitution per byte of a
    /// broken sequence.
    carry: [u16; 4],
    carry_len: u8,

    /// Absolute input offset of the next byte, counted since construction or
    /// [`reset`](Decoder::reset). Drives the `index` of
    /// [`DecodeError::InvalidSequence`] across chunk boundaries.
    pos: usize,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DecoderOptions::default())
    }
}

impl Decoder {
    /// Creates a decoder with the given options, ready to begin a stream.
    #[must_use]
    pub fn new(options: DecoderOptions) -> Self {
        Self {
            fail_on_invalid: options.fail_on_invalid,
            seq: [0; 4],
            seq_len: 0,
            remaining: 0,
            acc: 0,
            carry: [0; 4],
            carry_len: 0,
            pos: 0,
        }
    }

    /// Clears all persisted state — the partial sequence, pending output
    /// units, and the stream position — to begin an unrelated stream.
    pub fn reset(&mut self) {
        self.seq_len = 0;
        self.remaining = 0;
        self.acc = 0;
        self.carry_len = 0;
        self.pos = 0;
    }

    /// Decodes bytes from `src` into `dst`, resuming any state persisted by
    /// earlier calls.
    ///
    /// Pending output from a previous destination-full suspension is flushed
    /// before any new input is consumed. `flush` signals that no further
    /// input will ever arrive for this stream: a dangling partial sequence
    /// is then resolved through the fallback policy instead of being kept
    /// for a next call.
    ///
    /// This entry point never fails on capacity; see
    /// [`DecodeProgress::completed`] for the resumption contract.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidSequence`] for malformed input when the
    /// decoder was constructed with
    /// [`fail_on_invalid`](DecoderOptions::fail_on_invalid). After an error
    /// the decoder state is unspecified until [`reset`](Decoder::reset).
    pub fn decode_step(
        &mut self,
        src: &[u8],
        dst: &mut [u16],
        flush: bool,
    ) -> Result<DecodeProgress, DecodeError> {
        let mut sink = SliceSink { dst, written: 0 };
        let run = self.run(src, &mut sink, flush)?;
        Ok(DecodeProgress {
            bytes_read: run.bytes_read,
            units_written: sink.written,
            completed: run.completed,
        })
    }

    /// Decodes all of `src` into `dst`, returning the units written.
    ///
    /// This is the fixed-capacity variant: the whole input must decode into
    /// `dst` in this one call.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::OutputFull`] if `dst` cannot hold every
    /// decoded unit, and [`DecodeError::InvalidSequence`] as for
    /// [`decode_step`](Decoder::decode_step).
    pub fn decode_exact(
        &mut self,
        src: &[u8],
        dst: &mut [u16],
        flush: bool,
    ) -> Result<usize, DecodeError> {
        let progress = self.decode_step(src, dst, flush)?;
        if progress.bytes_read != src.len() || self.carry_len > 0 {
            return Err(DecodeError::OutputFull);
        }
        Ok(progress.units_written)
    }

    /// Decodes all of `src` into a growable buffer in one call.
    ///
    /// With `flush` set this resolves any dangling sequence; without it the
    /// partial state persists for the next call, exactly as with
    /// [`decode_step`](Decoder::decode_step).
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidSequence`] under the strict fallback
    /// policy.
    pub fn decode_to_vec(&mut self, src: &[u8], flush: bool) -> Result<Vec<u16>, DecodeError> {
        let mut out = Vec::new();
        let mut sink = VecSink { out: &mut out };
        self.run(src, &mut sink, flush)?;
        Ok(out)
    }

    /// Counts the units `src` would decode to, given the current persisted
    /// state, without writing output and without disturbing that state.
    ///
    /// Used to size a destination before calling
    /// [`decode_exact`](Decoder::decode_exact). The count includes pending
    /// output units, fallback substitutions, and surrogate-pair doubling.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidSequence`] under the strict fallback
    /// policy; the live decoder is untouched either way.
    pub fn unit_count(&self, src: &[u8], flush: bool) -> Result<usize, DecodeError> {
        // Replay on a copy so the probe cannot mutate the real state.
        let mut probe = self.clone();
        let mut sink = CountSink::default();
        probe.run(src, &mut sink, flush)?;
        Ok(sink.count)
    }

    /// Records the lead byte of a new multi-byte sequence.
    fn begin(&mut self, lead: u8, continuations: u8, bits: u32) {
        self.seq[0] = lead;
        self.seq_len = 1;
        self.remaining = continuations;
        self.acc = bits;
    }

    /// Pushes `units` to the sink; whatever does not fit is held in the
    /// carry. Returns `false` when the conversion must suspend.
    fn deliver<S: UnitSink>(&mut self, sink: &mut S, units: &[u16]) -> bool {
        debug_assert!(self.carry_len == 0 && units.len() <= self.carry.len());
        let mut blocked = false;
        for &unit in units {
            if blocked || !sink.push(unit) {
                self.carry[usize::from(self.carry_len)] = unit;
                self.carry_len += 1;
                blocked = true;
            }
        }
        !blocked
    }

    /// The decode loop shared by every entry point.
    fn run<S: UnitSink>(
        &mut self,
        src: &[u8],
        sink: &mut S,
        flush: bool,
    ) -> Result<Run, DecodeError> {
        // Units owed from a previous call come first.
        while self.carry_len > 0 {
            if !sink.push(self.carry[0]) {
                return Ok(Run {
                    bytes_read: 0,
                    completed: false,
                });
            }
            self.carry.copy_within(1.., 0);
            self.carry_len -= 1;
        }

        let mut i = 0;
        while i < src.len() {
            let b = src[i];
            if self.remaining == 0 {
                if b & 0x80 == 0 {
                    // Includes a raw zero byte, decoded leniently as unit 0.
                    i += 1;
                    if !self.deliver(sink, &[u16::from(b)]) {
                        return self.suspend(i);
                    }
                } else if b & 0xE0 == 0xC0 {
                    self.begin(b, 1, u32::from(b & 0x1F));
                    i += 1;
                } else if b & 0xF0 == 0xE0 {
                    self.begin(b, 2, u32::from(b & 0x0F));
                    i += 1;
                } else if b & 0xF8 == 0xF0 {
                    self.begin(b, 3, u32::from(b & 0x07));
                    i += 1;
                } else {
                    if self.fail_on_invalid {
                        return Err(DecodeError::InvalidSequence {
                            byte: b,
                            index: self.pos + i,
                        });
                    }
                    i += 1;
                    if !self.deliver(sink, &[REPLACEMENT_UNIT]) {
                        return self.suspend(i);
                    }
                }
            } else if b & 0xC0 == 0x80 {
                self.seq[usize::from(self.seq_len)] = b;
                self.seq_len += 1;
                self.acc = (self.acc << 6) | u32::from(b & 0x3F);
                self.remaining -= 1;
                i += 1;
                if self.remaining == 0 {
                    let ok = if self.acc < 0x1_0000 {
                        self.deliver(sink, &[self.acc as u16])
                    } else {
                        // Beyond the BMP: split into a surrogate pair, each
                        // half written (or carried) on its own.
                        let v = self.acc - 0x1_0000;
                        let high = 0xD800 + (v >> 10) as u16;
                        let low = 0xDC00 + (v & 0x3FF) as u16;
                        self.deliver(sink, &[high, low])
                    };
                    self.seq_len = 0;
                    if !ok {
                        return self.suspend(i);
                    }
                }
            } else {
                // The sequence broke early: each byte collected so far falls
                // back on its own, then `b` is reprocessed as a fresh lead.
                let collected = usize::from(self.seq_len);
                if self.fail_on_invalid {
                    return Err(DecodeError::InvalidSequence {
                        byte: self.seq[0],
                        index: self.pos + i - collected,
                    });
                }
                self.remaining = 0;
                self.seq_len = 0;
                let substitutions = [REPLACEMENT_UNIT; 4];
                if !self.deliver(sink, &substitutions[..collected]) {
                    return self.suspend(i);
                }
            }
        }

        if self.remaining > 0 {
            if flush {
                // No more input will ever come; the dangling partial
                // sequence resolves through the fallback policy.
                let collected = usize::from(self.seq_len);
                if self.fail_on_invalid {
                    return Err(DecodeError::InvalidSequence {
                        byte: self.seq[0],
                        index: self.pos + src.len() - collected,
                    });
                }
                self.remaining = 0;
                self.seq_len = 0;
                let substitutions = [REPLACEMENT_UNIT; 4];
                let ok = self.deliver(sink, &substitutions[..collected]);
                self.pos += src.len();
                return Ok(Run {
                    bytes_read: src.len(),
                    completed: ok,
                });
            }
            self.pos += src.len();
            return Ok(Run {
                bytes_read: src.len(),
                completed: false,
            });
        }

        self.pos += src.len();
        Ok(Run {
            bytes_read: src.len(),
            completed: true,
        })
    }

    /// Ends a call early after the destination filled. `consumed` bytes have
    /// been fully accounted for, either written or carried.
    fn suspend(&mut self, consumed: usize) -> Result<Run, DecodeError> {
        self.pos += consumed;
        Ok(Run {
            bytes_read: consumed,
            completed: false,
        })
    }
}

/// Decodes `bytes` into a `String` in one shot, substituting U+FFFD both for
/// malformed input bytes and for decoded units that do not assemble into
/// valid UTF-16.
#[must_use]
pub fn decode_to_string(bytes: &[u8]) -> String {
    let mut decoder = Decoder::new(DecoderOptions::default());
    // The substitute policy never reports invalid sequences.
    let units = decoder.decode_to_vec(bytes, true).unwrap_or_default();
    String::from_utf16_lossy(&units)
}
