//! # NMEA 0183 Framing
//!
//! This module turns one raw line into a [`ChecksumedFrame`]: the transport
//! prefix is skipped, the line ending handled, the `*CC` checksum verified and
//! the payload split into its comma-separated fields.
//!
//! ```text
//!  <transport prefix>$TTSSS,D1,D2,...,Dn*CC\r\n
//!                    ^|_____________________| ^
//!               marker       payload         checksum
//! ```

use nom::{
    Parser,
    bytes::complete::{take_till, take_while_m_n},
    character::complete::{char, one_of},
    error::ErrorKind,
    sequence::preceded,
};

use crate::{
    error::{Excerpt, FieldError, FrameError, ParseError},
    nmea_content::{ParsedSentence, SentenceId},
    parsing::consumed,
};

/// Default upper bound on a sentence length, measured from its start marker.
pub const DEFAULT_MAX_LENGTH: usize = 1024;

/// Most fields a frame can hold, the address included.
pub const MAX_FIELDS: usize = 64;

/// Defines how the tokenizer treats the line ending.
///
/// NMEA 0183 sentences end with `\r\n` on the wire, but transports often strip
/// or normalise it before a line reaches the parser.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LineEndingMode {
    /// Any trailing `\r`/`\n` characters are trimmed.
    #[default]
    Optional,

    /// The line must end with exactly `\r\n`.
    ///
    /// Use this mode when reading raw serial data where a missing terminator
    /// means the line was cut short.
    Required,

    /// The line must not end with `\r` or `\n`.
    Forbidden,
}

/// The character that opened the sentence.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartMarker {
    /// `$` - parametric sentence
    Parametric,
    /// `!` - encapsulated sentence
    Encapsulated,
}

/// A checksum-verified sentence split into its fields.
///
/// `fields[0]` is the address (talker + sentence type). Empty fields are kept
/// as empty slices, so a field index always refers to the same position in the
/// sentence no matter which other fields are blank.
#[derive(Debug, Clone, PartialEq)]
pub struct ChecksumedFrame<'a> {
    line: &'a [u8],
    marker: StartMarker,
    payload: &'a str,
    declared_checksum: u8,
    sentence_id: SentenceId,
    fields: heapless::Vec<&'a str, MAX_FIELDS>,
}

impl<'a> ChecksumedFrame<'a> {
    /// The start marker of the sentence.
    pub fn marker(&self) -> StartMarker {
        self.marker
    }

    /// Everything between the start marker and the final `*`.
    pub fn payload(&self) -> &'a str {
        self.payload
    }

    /// The checksum declared by the sentence (already verified).
    pub fn declared_checksum(&self) -> u8 {
        self.declared_checksum
    }

    /// The address field decoded as a sentence id.
    pub fn sentence_id(&self) -> &SentenceId {
        &self.sentence_id
    }

    /// All fields, including the address at index 0.
    pub fn fields(&self) -> &[&'a str] {
        &self.fields
    }

    /// The field at `index`, or an empty slice past the end of a truncated
    /// sentence.
    pub fn field(&self, index: usize) -> &'a str {
        self.fields.get(index).copied().unwrap_or_default()
    }

    /// The raw line this frame was cut from, transport prefix included.
    pub fn line(&self) -> &'a [u8] {
        self.line
    }

    /// Tags a field failure with this sentence and the field position.
    pub fn field_error(&self, index: usize, error: FieldError) -> ParseError {
        ParseError::Field {
            sentence: self.sentence_id.clone(),
            index,
            error,
            line: Excerpt::new(self.line),
        }
    }
}

/// Builds an [`NmeaParser`] with non-default framing settings.
///
/// # Examples
///
/// ```rust
/// use nmea0183_fix::{LineEndingMode, NmeaParserBuilder};
///
/// let parser = NmeaParserBuilder::new()
///     .line_ending_mode(LineEndingMode::Required)
///     .max_length(Some(82))
///     .build();
///
/// assert!(parser.parse("$GPGSV,1,1,00*79\r\n").is_ok());
/// assert!(parser.parse("$GPGSV,1,1,00*79").is_err()); // (missing CRLF)
/// ```
#[must_use]
#[derive(Debug, Clone, Copy)]
pub struct NmeaParserBuilder {
    line_ending_mode: LineEndingMode,
    max_length: Option<usize>,
}

impl NmeaParserBuilder {
    /// Creates a builder with the default settings:
    /// - Line ending mode: [`LineEndingMode::Optional`]
    /// - Maximum length: [`DEFAULT_MAX_LENGTH`]
    pub fn new() -> Self {
        NmeaParserBuilder {
            line_ending_mode: LineEndingMode::Optional,
            max_length: Some(DEFAULT_MAX_LENGTH),
        }
    }

    /// Sets the line ending mode.
    pub fn line_ending_mode(mut self, mode: LineEndingMode) -> Self {
        self.line_ending_mode = mode;
        self
    }

    /// Sets the maximum sentence length, or lifts the limit with `None`.
    pub fn max_length(mut self, limit: Option<usize>) -> Self {
        self.max_length = limit;
        self
    }

    /// Builds the parser.
    pub fn build(self) -> NmeaParser {
        NmeaParser {
            line_ending_mode: self.line_ending_mode,
            max_length: self.max_length,
        }
    }
}

impl Default for NmeaParserBuilder {
    fn default() -> Self {
        NmeaParserBuilder::new()
    }
}

/// A configured sentence parser.
///
/// The parser holds configuration only; it is `Copy`, keeps no state between
/// calls and can be shared freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NmeaParser {
    line_ending_mode: LineEndingMode,
    max_length: Option<usize>,
}

impl Default for NmeaParser {
    fn default() -> Self {
        NmeaParserBuilder::new().build()
    }
}

impl NmeaParser {
    /// Shorthand for [`NmeaParserBuilder::new`].
    pub fn builder() -> NmeaParserBuilder {
        NmeaParserBuilder::new()
    }

    /// Parses one sentence and dispatches it on its sentence type.
    pub fn parse(&self, line: impl AsRef<[u8]>) -> Result<ParsedSentence, ParseError> {
        let frame = self.tokenize(line.as_ref())?;
        ParsedSentence::from_frame(&frame)
    }

    /// Splits one line into a checksum-verified frame.
    ///
    /// 1. Skips everything before the first `$` or `!`
    /// 2. Handles the line ending according to [`LineEndingMode`]
    /// 3. Checks the length limit
    /// 4. Requires `*` followed by exactly two hex digits as the last three
    ///    characters
    /// 5. Verifies the checksum over every byte between the start marker and
    ///    that final `*`, before anything else looks at the payload
    /// 6. Requires the payload to be ASCII, splits it on `,` and validates the
    ///    address field
    pub fn tokenize<'a, L>(&self, line: &'a L) -> Result<ChecksumedFrame<'a>, ParseError>
    where
        L: AsRef<[u8]> + ?Sized,
    {
        let line = line.as_ref();

        let marker_search: nom::IResult<&[u8], &[u8]> =
            take_till(|b: u8| b == b'$' || b == b'!').parse(line);
        let sentence = match marker_search {
            Ok((sentence, _prefix)) if !sentence.is_empty() => sentence,
            _ => return Err(ParseError::frame(FrameError::MissingStartMarker, line)),
        };

        let sentence = strip_line_ending(sentence, self.line_ending_mode)
            .ok_or_else(|| ParseError::frame(FrameError::LineEnding, line))?;

        if let Some(limit) = self.max_length
            && sentence.len() > limit
        {
            let length = sentence.len();
            return Err(ParseError::frame(FrameError::TooLong { length, limit }, line));
        }

        let marker: nom::IResult<&[u8], char> = one_of("$!").parse(sentence);
        let (body, marker) = match marker {
            Ok((body, '!')) => (body, StartMarker::Encapsulated),
            Ok((body, _)) => (body, StartMarker::Parametric),
            Err(_) => return Err(ParseError::frame(FrameError::MissingStartMarker, line)),
        };

        let (payload, declared_checksum) = match split_checksum(body) {
            Some(split) => split,
            None if body.contains(&b'*') => {
                return Err(ParseError::frame(FrameError::InvalidChecksum, line));
            }
            None => return Err(ParseError::frame(FrameError::MissingChecksum, line)),
        };

        let computed = checksum(payload);
        if computed != declared_checksum {
            return Err(ParseError::ChecksumMismatch {
                expected: computed,
                found: declared_checksum,
                line: Excerpt::new(line),
            });
        }

        if !payload.is_ascii() {
            return Err(ParseError::frame(FrameError::NonAscii, line));
        }
        let payload = core::str::from_utf8(payload)
            .map_err(|_| ParseError::frame(FrameError::NonAscii, line))?;

        let mut fields = heapless::Vec::new();
        for field in payload.split(',') {
            fields.push(field).map_err(|_| {
                ParseError::frame(FrameError::TooManyFields { limit: MAX_FIELDS }, line)
            })?;
        }

        let sentence_id = fields
            .first()
            .and_then(|address| SentenceId::new(address))
            .ok_or_else(|| ParseError::frame(FrameError::InvalidAddress, line))?;
        if fields.len() < 2 {
            return Err(ParseError::frame(FrameError::NoFields, line));
        }

        Ok(ChecksumedFrame {
            line,
            marker,
            payload,
            declared_checksum,
            sentence_id,
            fields,
        })
    }
}

/// Parses one sentence with the default [`NmeaParser`] settings.
///
/// # Examples
///
/// ```rust
/// use nmea0183_fix::{FixStatus, ParsedSentence, parse};
///
/// let sentence = parse(
///     "$GPRMC,131525.57,A,2829.966492,N,07705.154711,E,0.0,302.0,030423,0.8,E,A*3C",
/// )
/// .unwrap();
///
/// match sentence {
///     ParsedSentence::Rmc(fix) => assert_eq!(fix.status, FixStatus::Active),
///     _ => unreachable!(),
/// }
/// ```
pub fn parse(line: impl AsRef<[u8]>) -> Result<ParsedSentence, ParseError> {
    NmeaParser::default().parse(line)
}

/// Tokenizes one sentence with the default [`NmeaParser`] settings.
///
/// # Examples
///
/// ```rust
/// use nmea0183_fix::tokenize;
///
/// let frame = tokenize("+QGPSGNMEA: $GPGSV,1,1,00*79\r\n").unwrap();
/// assert_eq!(frame.fields(), ["GPGSV", "1", "1", "00"]);
/// assert_eq!(frame.declared_checksum(), 0x79);
/// ```
pub fn tokenize<L>(line: &L) -> Result<ChecksumedFrame<'_>, ParseError>
where
    L: AsRef<[u8]> + ?Sized,
{
    NmeaParser::default().tokenize(line)
}

/// Calculates the NMEA 0183 checksum: the XOR of every byte between the start
/// marker and the `*`, both excluded.
///
/// # Examples
///
/// ```rust
/// use nmea0183_fix::checksum;
///
/// assert_eq!(checksum("GPGSV,1,1,00"), 0x79);
/// ```
pub fn checksum(data: impl AsRef<[u8]>) -> u8 {
    data.as_ref()
        .iter()
        .fold(0u8, |accumulated_xor, &byte| accumulated_xor ^ byte)
}

/// Formats a checksum value as a two-digit uppercase hexadecimal string.
///
/// # Examples
///
/// ```rust
/// use nmea0183_fix::format_checksum;
///
/// assert_eq!(format_checksum(0x41), "41");
/// assert_eq!(format_checksum(0x0A), "0A");
/// ```
pub fn format_checksum(checksum: u8) -> String {
    format!("{checksum:02X}")
}

/// Splits `body` into its payload and the value of its trailing `*HH`.
fn split_checksum(body: &[u8]) -> Option<(&[u8], u8)> {
    let (payload, suffix) = body.split_at_checked(body.len().checked_sub(3)?)?;

    let hex_digits: nom::IResult<&[u8], &[u8]> = consumed(
        preceded(
            char('*'),
            take_while_m_n(2, 2, |b: u8| b.is_ascii_hexdigit()),
        ),
        ErrorKind::Count,
    )
    .parse(suffix);
    let (_, digits) = hex_digits.ok()?;

    let digits = core::str::from_utf8(digits).ok()?;
    u8::from_str_radix(digits, 16).ok().map(|cc| (payload, cc))
}

/// Applies the line ending policy; `None` when the line violates it.
fn strip_line_ending(sentence: &[u8], mode: LineEndingMode) -> Option<&[u8]> {
    match mode {
        LineEndingMode::Optional => {
            let end = sentence
                .iter()
                .rposition(|&b| b != b'\r' && b != b'\n')
                .map_or(0, |last| last + 1);
            sentence.get(..end)
        }
        LineEndingMode::Required => sentence.strip_suffix(b"\r\n"),
        LineEndingMode::Forbidden => match sentence.last() {
            Some(b'\r' | b'\n') => None,
            _ => Some(sentence),
        },
    }
}

#[cfg(test)]
mod tests {
    mod checksum;
    mod framing;
    mod line_ending;
}
