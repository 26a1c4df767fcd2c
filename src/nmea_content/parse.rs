//! # Field Decoders
//!
//! Pure functions turning one field (or a value/hemisphere pair) into a typed
//! value. Each decoder looks only at the slice it is given, rejects anything
//! left over after its grammar, and reports an empty field as
//! [`FieldError::Missing`] so the sentence parser can decide whether that
//! matters.

use core::str::FromStr;

use nom::{
    Parser,
    bytes::complete::take_while_m_n,
    character::complete::{char, digit1},
    combinator::{opt, recognize},
    number::complete::double,
    sequence::preceded,
};

use crate::{
    error::FieldError,
    nmea_content::{Coordinate, CoordinateKind, Date, EastWest, FixStatus, NorthSouth, UtcTime},
    parsing::decode_with,
};

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn digits<'a>(count: usize) -> impl Parser<&'a str, Output = &'a str, Error = nom::error::Error<&'a str>> {
    take_while_m_n(count, count, is_digit)
}

fn two_digits(i: &str) -> nom::IResult<&str, u8> {
    digits(2).map_res(|s: &str| s.parse::<u8>()).parse(i)
}

/// Decodes a `ddmm.mmmm` latitude or `dddmm.mmmm` longitude with its
/// hemisphere letter into signed decimal degrees.
///
/// The degree digits are taken by position: exactly two (latitude) or three
/// (longitude) leading digits, followed by exactly two whole-minute digits and
/// an optional fraction.
///
/// # Examples
///
/// ```rust
/// use nmea0183_fix::{CoordinateKind, FieldError, nmea_content::parse::decode_coordinate};
///
/// let lat = decode_coordinate("2829.966492", "N", CoordinateKind::Latitude).unwrap();
/// assert!((lat.degrees() - 28.499441533).abs() < 1e-6);
///
/// let lon = decode_coordinate("07705.154711", "W", CoordinateKind::Longitude).unwrap();
/// assert!((lon.degrees() + 77.085911850).abs() < 1e-6);
///
/// assert_eq!(
///     decode_coordinate("2829.9", "E", CoordinateKind::Latitude),
///     Err(FieldError::InvalidHemisphere)
/// );
/// assert_eq!(
///     decode_coordinate("", "N", CoordinateKind::Latitude),
///     Err(FieldError::Missing)
/// );
/// ```
pub fn decode_coordinate(
    value: &str,
    hemisphere: &str,
    kind: CoordinateKind,
) -> Result<Coordinate, FieldError> {
    if value.is_empty() {
        return Err(FieldError::Missing);
    }

    let (degrees, minutes) = decode_with(
        value,
        (
            digits(kind.degree_width()),
            recognize((digits(2), opt(preceded(char('.'), digit1)))),
        ),
    )?;

    let degrees: u16 = degrees.parse().map_err(|_| FieldError::Malformed)?;
    let minutes: f64 = minutes.parse().map_err(|_| FieldError::Malformed)?;
    if minutes >= 60.0 {
        return Err(FieldError::OutOfRange);
    }

    let negative = match kind {
        CoordinateKind::Latitude => {
            NorthSouth::decode(hemisphere).map_err(|_| FieldError::InvalidHemisphere)?
                == NorthSouth::South
        }
        CoordinateKind::Longitude => {
            EastWest::decode(hemisphere).map_err(|_| FieldError::InvalidHemisphere)?
                == EastWest::West
        }
    };

    let magnitude = f64::from(degrees) + minutes / 60.0;
    Coordinate::new(kind, if negative { -magnitude } else { magnitude })
}

/// Decodes the RMC status field. Never fails: anything but `A` or `V`,
/// including an empty field, is [`FixStatus::Unknown`].
pub fn decode_status(value: &str) -> FixStatus {
    match value {
        "A" => FixStatus::Active,
        "V" => FixStatus::Void,
        _ => FixStatus::Unknown,
    }
}

/// Decodes `hhmmss` with an optional fractional second.
///
/// Fraction digits beyond nanosecond precision are ignored.
///
/// ```rust
/// use nmea0183_fix::{FieldError, nmea_content::parse::decode_time};
///
/// let t = decode_time("131525.57").unwrap();
/// assert_eq!((t.hour, t.minute, t.second, t.nanosecond), (13, 15, 25, 570_000_000));
///
/// assert_eq!(decode_time("246000"), Err(FieldError::OutOfRange));
/// assert_eq!(decode_time("1315"), Err(FieldError::Malformed));
/// ```
pub fn decode_time(value: &str) -> Result<UtcTime, FieldError> {
    if value.is_empty() {
        return Err(FieldError::Missing);
    }

    let (hour, minute, second, fraction) = decode_with(
        value,
        (two_digits, two_digits, two_digits, opt(preceded(char('.'), digit1))),
    )?;

    if hour >= 24 || minute >= 60 || second >= 60 {
        return Err(FieldError::OutOfRange);
    }

    let mut nanosecond = 0u32;
    let mut scale = 100_000_000u32;
    for digit in fraction.unwrap_or_default().bytes().take(9) {
        nanosecond += u32::from(digit - b'0') * scale;
        scale /= 10;
    }

    Ok(UtcTime {
        hour,
        minute,
        second,
        nanosecond,
    })
}

/// Decodes exactly six digits `ddmmyy`.
///
/// Only the day (1-31) and month (1-12) ranges are checked here; the year is
/// kept as two digits.
pub fn decode_date(value: &str) -> Result<Date, FieldError> {
    if value.is_empty() {
        return Err(FieldError::Missing);
    }

    let (day, month, year) = decode_with(value, (two_digits, two_digits, two_digits))?;

    if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
        return Err(FieldError::OutOfRange);
    }

    Ok(Date { day, month, year })
}

/// Decodes a decimal number such as `0.146` or `-21.3`.
///
/// Infinity and NaN spellings are rejected as malformed.
pub fn decode_float(value: &str) -> Result<f64, FieldError> {
    if value.is_empty() {
        return Err(FieldError::Missing);
    }

    let number = decode_with(value, double)?;
    if !number.is_finite() {
        return Err(FieldError::Malformed);
    }

    Ok(number)
}

/// Decodes an unsigned decimal integer. Digits that do not fit `T` are
/// [`FieldError::OutOfRange`].
pub fn decode_unsigned<T: FromStr>(value: &str) -> Result<T, FieldError> {
    if value.is_empty() {
        return Err(FieldError::Missing);
    }

    decode_with(value, digit1)?
        .parse()
        .map_err(|_| FieldError::OutOfRange)
}

/// Decodes one or two hexadecimal digits.
pub fn decode_hex_u8(value: &str) -> Result<u8, FieldError> {
    if value.is_empty() {
        return Err(FieldError::Missing);
    }

    let digits = decode_with(value, take_while_m_n(1, 2, |c: char| c.is_ascii_hexdigit()))?;
    u8::from_str_radix(digits, 16).map_err(|_| FieldError::Malformed)
}
