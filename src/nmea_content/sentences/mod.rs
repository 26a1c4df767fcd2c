mod gga;
mod gsv;
mod rmc;

pub use gga::GgaFix;
pub use gsv::{GsvReport, MAX_SATELLITES_PER_GSV};
pub use rmc::GpsFix;

use core::ops::RangeInclusive;

use crate::{
    ChecksumedFrame,
    error::{FieldError, ParseError},
    nmea_content::{Coordinate, CoordinateKind, Talker, parse::decode_coordinate},
};

/// How much a sentence cares about one of its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Need {
    /// Any failure, an empty field included, fails the sentence.
    Required,
    /// Empty is `None`; garbage still fails the sentence.
    Optional,
    /// The sentence says the value is not to be trusted: failures become `None`.
    DontCare,
}

impl Need {
    fn required_if(condition: bool) -> Self {
        if condition {
            Need::Required
        } else {
            Need::DontCare
        }
    }

    fn optional_if(condition: bool) -> Self {
        if condition {
            Need::Optional
        } else {
            Need::DontCare
        }
    }
}

/// Applies a field policy to a decoder result, tagging surfaced failures
/// with the field index.
fn resolve<T>(
    frame: &ChecksumedFrame<'_>,
    index: usize,
    need: Need,
    decoded: Result<T, FieldError>,
) -> Result<Option<T>, ParseError> {
    match (decoded, need) {
        (Ok(value), _) => Ok(Some(value)),
        (Err(_), Need::DontCare) | (Err(FieldError::Missing), Need::Optional) => Ok(None),
        (Err(error), _) => Err(frame.field_error(index, error)),
    }
}

fn required<T>(
    frame: &ChecksumedFrame<'_>,
    index: usize,
    decoded: Result<T, FieldError>,
) -> Result<T, ParseError> {
    decoded.map_err(|error| frame.field_error(index, error))
}

/// Decodes the value/hemisphere pair starting at `index`.
///
/// A bad hemisphere is reported against the hemisphere field, everything
/// else against the value field.
fn coordinate(
    frame: &ChecksumedFrame<'_>,
    index: usize,
    kind: CoordinateKind,
    need: Need,
) -> Result<Option<Coordinate>, ParseError> {
    let decoded = decode_coordinate(frame.field(index), frame.field(index + 1), kind);
    let index = match decoded {
        Err(FieldError::InvalidHemisphere) => index + 1,
        _ => index,
    };

    resolve(frame, index, need, decoded)
}

fn within<T: PartialOrd>(value: T, range: RangeInclusive<T>) -> Result<T, FieldError> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(FieldError::OutOfRange)
    }
}

/// The talker of a frame whose address must name `sentence_type`.
fn talker(frame: &ChecksumedFrame<'_>, sentence_type: &str) -> Result<Talker, ParseError> {
    let id = frame.sentence_id();
    match (id.talker(), id.sentence_type()) {
        (Some(talker), Some(t)) if t == sentence_type => Ok(talker),
        _ => Err(frame.field_error(0, FieldError::Malformed)),
    }
}

/// Wraps `payload` into a complete sentence with a correct checksum.
#[cfg(test)]
pub(crate) fn sentence(payload: &str) -> String {
    format!("${payload}*{}", crate::format_checksum(crate::checksum(payload)))
}
