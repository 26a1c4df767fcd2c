//! # NMEA 0183 Fix Parser
//!
//! This library parses NMEA 0183 sentences emitted by GNSS receivers into
//! structured, range-checked fixes:
//! `<transport prefix>$TTSSS,D1,D2,...,Dn*CC\r\n`
//!
//! Parsing happens in two stages:
//! - [`tokenize`] verifies the checksum and splits a line into a
//!   [`ChecksumedFrame`] of positional fields
//! - [`ParsedSentence::from_frame`] routes the frame to the RMC, GGA or GSV
//!   parser, or classifies it as [`ParsedSentence::Unsupported`]
//!
//! [`parse`] does both. Every failure is returned as a [`ParseError`]; the
//! crate never panics, logs or prints on bad input.
//!
//! ## Usage
//!
//! ```rust
//! use nmea0183_fix::{LineEndingMode, NmeaParser, ParsedSentence};
//!
//! let parser = NmeaParser::builder()
//!     .line_ending_mode(LineEndingMode::Required)
//!     .build();
//!
//! let line = "$GPGGA,092725.00,4717.11399,N,00833.91590,E,1,08,1.01,499.6,M,48.0,M,,*5B\r\n";
//! match parser.parse(line) {
//!     Ok(ParsedSentence::Gga(fix)) if fix.has_fix() => {
//!         assert_eq!(fix.satellites_in_use, Some(8));
//!     }
//!     Ok(other) => panic!("unexpected {other:?}"),
//!     Err(error) => panic!("{error}"),
//! }
//! ```

pub mod error;
mod nmea0183;
pub mod nmea_content;
pub mod parsing;

pub use error::{Excerpt, FieldError, FrameError, ParseError};
pub use nmea0183::*;
pub use nmea_content::{
    Coordinate, CoordinateKind, Date, EastWest, FaaMode, FixQuality, FixStatus, FromFrame,
    GgaFix, GpsFix, GsvReport, MAX_SATELLITES_PER_GSV, MagneticVariation, NorthSouth,
    ParsedSentence, Satellite, SentenceId, Talker, UtcTime,
};

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;
