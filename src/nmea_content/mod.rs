//! # NMEA Sentence Content
//!
//! Sentence identification, the shared field types and the dispatcher that
//! routes a [`ChecksumedFrame`] to the parser for its sentence type.

macro_rules! field_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $char:literal => $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// Decodes the one-character field encoding.
            pub fn decode(value: &str) -> Result<Self, $crate::FieldError> {
                use nom::Parser;

                if value.is_empty() {
                    return Err($crate::FieldError::Missing);
                }

                $crate::parsing::decode_with(value, nom::branch::alt(($(
                    nom::character::complete::char($char).map(|_| Self::$variant),
                )*)))
            }

            /// The one-character field encoding.
            pub fn as_char(self) -> char {
                match self {
                    $(Self::$variant => $char,)*
                }
            }
        }
    };
}

mod fields;
pub mod parse;
mod sentences;

use core::fmt;

pub use fields::{
    Coordinate, CoordinateKind, Date, EastWest, FaaMode, FixQuality, FixStatus,
    MagneticVariation, NorthSouth, Satellite, UtcTime,
};
pub use sentences::{GgaFix, GpsFix, GsvReport, MAX_SATELLITES_PER_GSV};

use crate::{ChecksumedFrame, error::ParseError};

/// Longest address field accepted by the tokenizer.
pub const MAX_ADDRESS_LEN: usize = 15;

/// A type that can be built from the fields of a checksum-verified frame.
///
/// Implemented by every sentence record. Parsers read fields by fixed
/// position through [`ChecksumedFrame::field`] and tag failures with
/// [`ChecksumedFrame::field_error`].
///
/// # Example
///
/// ```rust
/// use nmea0183_fix::{FromFrame, GsvReport, tokenize};
///
/// let frame = tokenize("$GPGSV,1,1,00*79").unwrap();
/// let report = GsvReport::from_frame(&frame).unwrap();
/// assert_eq!(report.satellites_in_view, 0);
/// ```
pub trait FromFrame: Sized {
    /// The three-letter sentence type this record is parsed from.
    const SENTENCE_TYPE: &'static str;

    /// Decodes the frame's fields into `Self`.
    fn from_frame(frame: &ChecksumedFrame<'_>) -> Result<Self, ParseError>;
}

/// The address field of a sentence: talker id followed by sentence type.
///
/// Standard addresses are five characters (`GPRMC`). Proprietary addresses
/// start with `P` and have no talker.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SentenceId {
    address: heapless::String<MAX_ADDRESS_LEN>,
}

impl SentenceId {
    /// Validates an address field: 1 to [`MAX_ADDRESS_LEN`] ASCII
    /// alphanumeric characters.
    pub fn new(address: &str) -> Option<Self> {
        if address.is_empty() || !address.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return None;
        }

        let mut owned = heapless::String::new();
        owned.push_str(address).ok()?;

        Some(SentenceId { address: owned })
    }

    /// The full address, e.g. `GPRMC`.
    pub fn as_str(&self) -> &str {
        &self.address
    }

    /// Whether this is a manufacturer-specific (`P...`) sentence.
    pub fn is_proprietary(&self) -> bool {
        self.address.starts_with('P')
    }

    fn is_standard(&self) -> bool {
        self.address.len() == 5 && !self.is_proprietary()
    }

    /// The talker of a standard address.
    pub fn talker(&self) -> Option<Talker> {
        if !self.is_standard() {
            return None;
        }
        self.address.get(..2).map(Talker::from_code)
    }

    /// The three-letter sentence type of a standard address.
    pub fn sentence_type(&self) -> Option<&str> {
        if !self.is_standard() {
            return None;
        }
        self.address.get(2..)
    }
}

impl fmt::Display for SentenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

/// The source constellation or device class of a sentence.
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_talker_ids>
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Talker {
    /// GP - GPS
    Gps,
    /// GL - GLONASS
    Glonass,
    /// GA - Galileo
    Galileo,
    /// GB / BD - BeiDou
    Beidou,
    /// GQ - QZSS
    Qzss,
    /// GI - NavIC
    Navic,
    /// GN - combined GNSS solution
    Gnss,
    /// Any other two-character talker
    Other([u8; 2]),
}

impl Talker {
    /// Maps a two-character talker code.
    pub fn from_code(code: &str) -> Self {
        match code {
            "GP" => Talker::Gps,
            "GL" => Talker::Glonass,
            "GA" => Talker::Galileo,
            "GB" | "BD" => Talker::Beidou,
            "GQ" => Talker::Qzss,
            "GI" => Talker::Navic,
            "GN" => Talker::Gnss,
            other => {
                let mut bytes = [b'?'; 2];
                for (slot, byte) in bytes.iter_mut().zip(other.bytes()) {
                    *slot = byte;
                }
                Talker::Other(bytes)
            }
        }
    }
}

impl fmt::Display for Talker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Talker::Gps => "GP",
            Talker::Glonass => "GL",
            Talker::Galileo => "GA",
            Talker::Beidou => "GB",
            Talker::Qzss => "GQ",
            Talker::Navic => "GI",
            Talker::Gnss => "GN",
            Talker::Other([a, b]) => {
                return write!(f, "{}{}", char::from(*a), char::from(*b));
            }
        };
        f.write_str(code)
    }
}

/// The outcome of parsing one sentence.
///
/// ## Supported Sentence Types
///
/// | Variant            | Sentence Type                              |
/// |--------------------|--------------------------------------------|
/// | Rmc([`GpsFix`])    | Recommended Minimum Navigation Information |
/// | Gga([`GgaFix`])    | Global Positioning System Fix Data         |
/// | Gsv([`GsvReport`]) | Satellites in View                         |
///
/// Any other well-formed sentence, proprietary ones included, is reported as
/// [`ParsedSentence::Unsupported`]; that is a classification, not an error.
///
/// ## Example Usage
///
/// ```rust
/// use nmea0183_fix::{ParsedSentence, parse};
///
/// match parse("$GPTXT,01,01,02,ANTSTATUS=OK*3B").unwrap() {
///     ParsedSentence::Unsupported(id) => assert_eq!(id.as_str(), "GPTXT"),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedSentence {
    /// Recommended Minimum Navigation Information
    Rmc(GpsFix),
    /// Global Positioning System Fix Data
    Gga(GgaFix),
    /// Satellites in View
    Gsv(GsvReport),
    /// A valid sentence of a type this crate does not decode
    Unsupported(SentenceId),
}

impl ParsedSentence {
    /// Routes a frame to the parser for its sentence type.
    pub fn from_frame(frame: &ChecksumedFrame<'_>) -> Result<Self, ParseError> {
        let id = frame.sentence_id();

        match id.sentence_type() {
            Some(t) if t == GpsFix::SENTENCE_TYPE => GpsFix::from_frame(frame).map(Self::Rmc),
            Some(t) if t == GgaFix::SENTENCE_TYPE => GgaFix::from_frame(frame).map(Self::Gga),
            Some(t) if t == GsvReport::SENTENCE_TYPE => GsvReport::from_frame(frame).map(Self::Gsv),
            _ => Ok(Self::Unsupported(id.clone())),
        }
    }
}
