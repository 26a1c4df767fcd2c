use crate::{
    ChecksumedFrame,
    error::{FieldError, ParseError},
    nmea_content::{
        Coordinate, CoordinateKind, FixQuality, FromFrame, Talker, UtcTime,
        parse::{decode_float, decode_time, decode_unsigned},
    },
};

use super::{Need, coordinate, required, resolve, talker, within};

mod field {
    pub const TIME: usize = 1;
    pub const LATITUDE: usize = 2;
    pub const LONGITUDE: usize = 4;
    pub const QUALITY: usize = 6;
    pub const SATELLITES: usize = 7;
    pub const HDOP: usize = 8;
    pub const ALTITUDE: usize = 9;
    pub const GEOID_SEPARATION: usize = 11;
    pub const DGPS_AGE: usize = 13;
    pub const DGPS_STATION: usize = 14;
}

/// Highest valid differential reference station id.
const MAX_DGPS_STATION_ID: u16 = 1023;

/// GGA - Global Positioning System Fix Data
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gga_global_positioning_system_fix_data>
///
/// ```text
///                                                      11
///         1         2       3 4        5 6 7  8   9  10 |  12 13  14
///         |         |       | |        | | |  |   |   | |   | |   |
///  $--GGA,hhmmss.ss,ddmm.mm,a,ddmmm.mm,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx*hh<CR><LF>
/// ```
///
/// A quality of [`FixQuality::NoFix`] plays the role RMC's void status does:
/// time and position are kept only when they decode.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GgaFix {
    pub talker: Talker,
    /// Fix time in UTC
    pub utc_time: Option<UtcTime>,
    pub latitude: Option<Coordinate>,
    pub longitude: Option<Coordinate>,
    /// GPS Quality Indicator
    pub quality: FixQuality,
    /// Number of satellites in use
    pub satellites_in_use: Option<u8>,
    /// Horizontal Dilution of Precision
    pub hdop: Option<f64>,
    /// Antenna altitude above/below mean sea level, in meters
    pub altitude_m: Option<f64>,
    /// Geoidal separation in meters; negative when the geoid is below the ellipsoid
    pub geoid_separation_m: Option<f64>,
    /// Age of differential GPS data in seconds
    pub dgps_age_s: Option<f64>,
    /// Differential reference station id, 0000-1023
    pub dgps_station_id: Option<u16>,
}

impl GgaFix {
    /// Whether the receiver reports a fix and a position came with it.
    pub fn has_fix(&self) -> bool {
        self.quality != FixQuality::NoFix && self.latitude.is_some() && self.longitude.is_some()
    }
}

impl FromFrame for GgaFix {
    const SENTENCE_TYPE: &'static str = "GGA";

    fn from_frame(frame: &ChecksumedFrame<'_>) -> Result<Self, ParseError> {
        let talker = talker(frame, Self::SENTENCE_TYPE)?;

        let quality = required(
            frame,
            field::QUALITY,
            FixQuality::decode(frame.field(field::QUALITY)),
        )?;
        let fix_field = Need::required_if(quality != FixQuality::NoFix);

        let utc_time = resolve(
            frame,
            field::TIME,
            fix_field,
            decode_time(frame.field(field::TIME)),
        )?;
        let latitude = coordinate(frame, field::LATITUDE, CoordinateKind::Latitude, fix_field)?;
        let longitude = coordinate(frame, field::LONGITUDE, CoordinateKind::Longitude, fix_field)?;
        let satellites_in_use = resolve(
            frame,
            field::SATELLITES,
            Need::Optional,
            decode_unsigned(frame.field(field::SATELLITES)),
        )?;
        let hdop = resolve(
            frame,
            field::HDOP,
            Need::Optional,
            decode_float(frame.field(field::HDOP)).and_then(|v| within(v, 0.0..=f64::MAX)),
        )?;
        let altitude_m = meters(frame, field::ALTITUDE)?;
        let geoid_separation_m = meters(frame, field::GEOID_SEPARATION)?;
        let dgps_age_s = resolve(
            frame,
            field::DGPS_AGE,
            Need::Optional,
            decode_float(frame.field(field::DGPS_AGE)).and_then(|v| within(v, 0.0..=f64::MAX)),
        )?;
        let dgps_station_id = resolve(
            frame,
            field::DGPS_STATION,
            Need::Optional,
            decode_unsigned(frame.field(field::DGPS_STATION))
                .and_then(|id| within(id, 0..=MAX_DGPS_STATION_ID)),
        )?;

        Ok(GgaFix {
            talker,
            utc_time,
            latitude,
            longitude,
            quality,
            satellites_in_use,
            hdop,
            altitude_m,
            geoid_separation_m,
            dgps_age_s,
            dgps_station_id,
        })
    }
}

/// A distance at `index` whose unit field follows it and must read `M`.
fn meters(frame: &ChecksumedFrame<'_>, index: usize) -> Result<Option<f64>, ParseError> {
    let value = resolve(frame, index, Need::Optional, decode_float(frame.field(index)))?;

    if value.is_some() {
        match frame.field(index + 1) {
            "M" => {}
            "" => return Err(frame.field_error(index + 1, FieldError::Missing)),
            _ => return Err(frame.field_error(index + 1, FieldError::Malformed)),
        }
    }

    Ok(value)
}
