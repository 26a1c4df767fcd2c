use crate::{
    ChecksumedFrame,
    error::{FieldError, ParseError},
    nmea_content::{
        Coordinate, CoordinateKind, Date, EastWest, FaaMode, FixStatus, FromFrame,
        MagneticVariation, Talker, UtcTime,
        parse::{decode_date, decode_float, decode_status, decode_time},
    },
};

use super::{Need, coordinate, required, resolve, talker, within};

mod field {
    pub const TIME: usize = 1;
    pub const STATUS: usize = 2;
    pub const LATITUDE: usize = 3;
    pub const LONGITUDE: usize = 5;
    pub const SPEED: usize = 7;
    pub const TRACK: usize = 8;
    pub const DATE: usize = 9;
    pub const MAGNETIC_VARIATION: usize = 10;
    pub const MAGNETIC_VARIATION_DIRECTION: usize = 11;
    pub const MODE: usize = 12;
}

/// RMC - Recommended Minimum Navigation Information
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rmc_recommended_minimum_navigation_information>
///
/// ```text
///         1         2 3       4 5        6  7   8   9    10 1112
///         |         | |       | |        |  |   |   |    |  | |
///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a,m*hh<CR><LF>
/// ```
///
/// Field 12 (FAA mode) exists from NMEA 2.3 on and is optional.
///
/// When [`status`](GpsFix::status) is not [`FixStatus::Active`], the receiver
/// is flagging its own output as untrustworthy: time, position, speed, track
/// and date are kept when they decode and silently dropped when they don't.
/// Use [`GpsFix::is_trusted`] before navigating on a fix.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GpsFix {
    pub talker: Talker,
    /// Fix time in UTC
    pub utc_time: Option<UtcTime>,
    /// Status Mode Indicator
    pub status: FixStatus,
    pub latitude: Option<Coordinate>,
    pub longitude: Option<Coordinate>,
    /// Speed over ground in knots
    pub speed_knots: Option<f64>,
    /// Track made good in degrees true
    pub track_degrees: Option<f64>,
    /// Fix date in UTC
    pub date: Option<Date>,
    pub magnetic_variation: Option<MagneticVariation>,
    /// FAA Mode Indicator
    pub mode: Option<FaaMode>,
}

impl GpsFix {
    /// Whether the fix can be used for navigation: the receiver reports it as
    /// active, it carries a position and its mode does not flag it invalid.
    pub fn is_trusted(&self) -> bool {
        self.status == FixStatus::Active
            && self.latitude.is_some()
            && self.longitude.is_some()
            && self.mode != Some(FaaMode::DataNotValid)
    }
}

impl FromFrame for GpsFix {
    const SENTENCE_TYPE: &'static str = "RMC";

    fn from_frame(frame: &ChecksumedFrame<'_>) -> Result<Self, ParseError> {
        let talker = talker(frame, Self::SENTENCE_TYPE)?;

        let status = decode_status(frame.field(field::STATUS));
        let active = status == FixStatus::Active;
        let fix_field = Need::required_if(active);
        let motion_field = Need::optional_if(active);

        let utc_time = resolve(
            frame,
            field::TIME,
            fix_field,
            decode_time(frame.field(field::TIME)),
        )?;
        let latitude = coordinate(frame, field::LATITUDE, CoordinateKind::Latitude, fix_field)?;
        let longitude = coordinate(frame, field::LONGITUDE, CoordinateKind::Longitude, fix_field)?;
        let speed_knots = resolve(
            frame,
            field::SPEED,
            motion_field,
            decode_float(frame.field(field::SPEED)).and_then(|v| within(v, 0.0..=f64::MAX)),
        )?;
        let track_degrees = resolve(
            frame,
            field::TRACK,
            motion_field,
            decode_float(frame.field(field::TRACK)).and_then(|v| within(v, 0.0..=360.0)),
        )?;
        let date = resolve(
            frame,
            field::DATE,
            fix_field,
            decode_date(frame.field(field::DATE)),
        )?;
        let magnetic_variation = magnetic_variation(frame)?;
        let mode = resolve(
            frame,
            field::MODE,
            Need::Optional,
            FaaMode::decode(frame.field(field::MODE)),
        )?;

        Ok(GpsFix {
            talker,
            utc_time,
            status,
            latitude,
            longitude,
            speed_knots,
            track_degrees,
            date,
            magnetic_variation,
            mode,
        })
    }
}

/// A magnitude without a direction is an error; a direction without a
/// magnitude is ignored.
fn magnetic_variation(frame: &ChecksumedFrame<'_>) -> Result<Option<MagneticVariation>, ParseError> {
    let degrees = resolve(
        frame,
        field::MAGNETIC_VARIATION,
        Need::Optional,
        decode_float(frame.field(field::MAGNETIC_VARIATION)).and_then(|v| within(v, 0.0..=180.0)),
    )?;
    let Some(degrees) = degrees else {
        return Ok(None);
    };

    let direction = match EastWest::decode(frame.field(field::MAGNETIC_VARIATION_DIRECTION)) {
        Err(FieldError::Malformed) => Err(FieldError::InvalidHemisphere),
        other => other,
    };
    let direction = required(frame, field::MAGNETIC_VARIATION_DIRECTION, direction)?;

    Ok(Some(MagneticVariation { degrees, direction }))
}
