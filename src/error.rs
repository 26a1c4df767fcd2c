//! # Error Types
//!
//! This module defines the error types returned while framing and decoding
//! NMEA 0183 sentences. Every failure is a value; nothing in this crate
//! panics, logs or exits on malformed input.

use core::fmt;

use thiserror::Error;

use crate::nmea_content::SentenceId;

/// Maximum number of characters of the offending line kept in an [`Excerpt`].
pub const EXCERPT_LEN: usize = 80;

/// Represents all possible errors that can occur while parsing one sentence.
///
/// Every variant carries an [`Excerpt`] of the input line so the caller can
/// report what was rejected without keeping the original buffer around.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The checksum of the sentence was corrupt or incorrect.
    ///
    /// The sentence must be discarded as a whole; no field of it is trusted.
    #[error("checksum mismatch: computed {expected:02X}, declared {found:02X} in `{line}`")]
    ChecksumMismatch {
        /// The checksum calculated from the payload
        expected: u8,
        /// The checksum declared after the `*`
        found: u8,
        /// The offending line
        line: Excerpt,
    },

    /// The line could not be split into a checksummed frame.
    #[error("malformed frame ({reason}) in `{line}`")]
    MalformedFrame {
        /// What was wrong with the framing
        reason: FrameError,
        /// The offending line
        line: Excerpt,
    },

    /// A field required by the sentence could not be decoded.
    #[error("{sentence} field {index}: {error} in `{line}`")]
    Field {
        /// The sentence the field belongs to
        sentence: SentenceId,
        /// 0-based field index, counting the sentence id as field 0
        index: usize,
        /// Why the field was rejected
        error: FieldError,
        /// The offending line
        line: Excerpt,
    },
}

impl ParseError {
    /// Returns the excerpt of the line that produced this error.
    pub fn line(&self) -> &Excerpt {
        match self {
            ParseError::ChecksumMismatch { line, .. }
            | ParseError::MalformedFrame { line, .. }
            | ParseError::Field { line, .. } => line,
        }
    }

    /// Returns the field error, if this is a field-level failure.
    pub fn field_error(&self) -> Option<FieldError> {
        match self {
            ParseError::Field { error, .. } => Some(*error),
            _ => None,
        }
    }

    pub(crate) fn frame(reason: FrameError, line: &[u8]) -> Self {
        ParseError::MalformedFrame {
            reason,
            line: Excerpt::new(line),
        }
    }
}

/// Framing failures detected by the tokenizer.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Neither `$` nor `!` was found in the line.
    #[error("no `$` or `!` start marker")]
    MissingStartMarker,
    /// The sentence contains non-ASCII bytes after its start marker.
    #[error("non-ASCII byte in sentence")]
    NonAscii,
    /// No `*` checksum delimiter follows the payload.
    #[error("missing `*` checksum delimiter")]
    MissingChecksum,
    /// The checksum suffix is not exactly two hexadecimal digits.
    #[error("checksum is not two hex digits")]
    InvalidChecksum,
    /// The line ending does not match the configured [`LineEndingMode`](crate::LineEndingMode).
    #[error("unexpected line ending")]
    LineEnding,
    /// The sentence is longer than the configured limit.
    #[error("sentence length {length} exceeds limit {limit}")]
    TooLong {
        /// Length measured from the start marker
        length: usize,
        /// Configured limit
        limit: usize,
    },
    /// The address field is empty, too long or not alphanumeric.
    #[error("invalid address field")]
    InvalidAddress,
    /// The payload carries no field after the sentence id.
    #[error("no fields after sentence id")]
    NoFields,
    /// The payload splits into more fields than a frame can hold.
    #[error("more than {limit} fields")]
    TooManyFields { limit: usize },
}

/// Field-level failures produced by the field decoders.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The field is empty but the sentence requires a value.
    #[error("missing value")]
    Missing,
    /// The field is present but does not follow its encoding.
    #[error("malformed value")]
    Malformed,
    /// The hemisphere indicator is not valid for the coordinate kind.
    #[error("invalid hemisphere")]
    InvalidHemisphere,
    /// The decoded value violates its domain range.
    #[error("value out of range")]
    OutOfRange,
}

/// A bounded, printable copy of the beginning of an input line.
///
/// Control characters and non-ASCII bytes are escaped; the copy stops at
/// [`EXCERPT_LEN`] characters and is marked with a trailing `...` when the
/// line was longer.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Excerpt {
    text: heapless::String<EXCERPT_LEN>,
    truncated: bool,
}

impl Excerpt {
    /// Copies (and escapes) the beginning of `line`.
    pub fn new(line: &[u8]) -> Self {
        let mut text = heapless::String::new();
        let mut truncated = false;

        'bytes: for &byte in line {
            for c in core::ascii::escape_default(byte) {
                if text.push(char::from(c)).is_err() {
                    truncated = true;
                    break 'bytes;
                }
            }
        }

        Excerpt { text, truncated }
    }

    /// The escaped text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the line was cut short.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl fmt::Display for Excerpt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)?;
        if self.truncated {
            f.write_str("...")?;
        }
        Ok(())
    }
}
