use crate::{
    ChecksumedFrame,
    error::{FieldError, ParseError},
    nmea_content::{
        FromFrame, Satellite, Talker,
        parse::{decode_hex_u8, decode_unsigned},
    },
};

use super::{Need, required, resolve, talker, within};

mod field {
    pub const TOTAL_MESSAGES: usize = 1;
    pub const MESSAGE_NUMBER: usize = 2;
    pub const SATELLITES_IN_VIEW: usize = 3;
    pub const FIRST_SATELLITE: usize = 4;
}

/// Fields per satellite block: PRN, elevation, azimuth, SNR.
const SATELLITE_FIELDS: usize = 4;

/// Maximum number of satellite blocks carried by one GSV message.
pub const MAX_SATELLITES_PER_GSV: usize = 4;

/// GSV - Satellites in View
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsv_satellites_in_view>
///
/// ```text
///         1 2 3 4 5 6 7     n
///         | | | | | | |     |
///  $--GSV,x,x,x,x,x,x,x,...,h*hh<CR><LF>
/// ```
///
/// NMEA 4.10+:
/// ```text
///         1 2 3 4 5 6 7     n m
///         | | | | | | |     | |
///  $--GSV,x,x,x,x,x,x,x,...,h,h*hh<CR><LF>
/// ```
///
/// One report of a sequence that together lists every satellite in view.
/// The satellite blocks are read as a sequence of four-field groups; a
/// single trailing field after the last complete group is the NMEA 4.10
/// signal id.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GsvReport {
    pub talker: Talker,
    /// Number of messages in this sequence
    pub total_messages: u8,
    /// Position of this message in the sequence, starting at 1
    pub message_number: u8,
    /// Total number of satellites in view
    pub satellites_in_view: u16,
    /// Satellites described by this message
    pub satellites: heapless::Vec<Satellite, MAX_SATELLITES_PER_GSV>,
    /// Signal ID (NMEA 4.10+)
    pub signal_id: Option<u8>,
}

impl FromFrame for GsvReport {
    const SENTENCE_TYPE: &'static str = "GSV";

    fn from_frame(frame: &ChecksumedFrame<'_>) -> Result<Self, ParseError> {
        let talker = talker(frame, Self::SENTENCE_TYPE)?;

        let total_messages = required(
            frame,
            field::TOTAL_MESSAGES,
            decode_unsigned(frame.field(field::TOTAL_MESSAGES)).and_then(|n| within(n, 1..=u8::MAX)),
        )?;
        let message_number = required(
            frame,
            field::MESSAGE_NUMBER,
            decode_unsigned(frame.field(field::MESSAGE_NUMBER))
                .and_then(|n| within(n, 1..=total_messages)),
        )?;
        let satellites_in_view = required(
            frame,
            field::SATELLITES_IN_VIEW,
            decode_unsigned(frame.field(field::SATELLITES_IN_VIEW)),
        )?;

        let blocks = frame
            .fields()
            .get(field::FIRST_SATELLITE..)
            .unwrap_or_default();
        let mut groups = blocks.chunks_exact(SATELLITE_FIELDS);

        let mut satellites = heapless::Vec::new();
        let mut index = field::FIRST_SATELLITE;
        for group in groups.by_ref() {
            if let Some(satellite) = satellite(frame, index, group)? {
                satellites
                    .push(satellite)
                    .map_err(|_| frame.field_error(index, FieldError::Malformed))?;
            }
            index += SATELLITE_FIELDS;
        }

        let signal_id = match groups.remainder() {
            [] => None,
            [signal_id] => resolve(frame, index, Need::Optional, decode_hex_u8(signal_id))?,
            partial => return Err(frame.field_error(index + partial.len(), FieldError::Missing)),
        };

        Ok(GsvReport {
            talker,
            total_messages,
            message_number,
            satellites_in_view,
            satellites,
            signal_id,
        })
    }
}

/// Decodes one four-field block starting at `index`. An all-empty block is
/// padding and yields `None`.
fn satellite(
    frame: &ChecksumedFrame<'_>,
    index: usize,
    group: &[&str],
) -> Result<Option<Satellite>, ParseError> {
    let &[prn, elevation, azimuth, snr] = group else {
        return Err(frame.field_error(index + group.len(), FieldError::Missing));
    };
    if group.iter().all(|value| value.is_empty()) {
        return Ok(None);
    }

    let prn = required(frame, index, decode_unsigned(prn))?;
    let elevation = resolve(
        frame,
        index + 1,
        Need::Optional,
        decode_unsigned(elevation).and_then(|e| within(e, 0..=90)),
    )?;
    let azimuth = resolve(
        frame,
        index + 2,
        Need::Optional,
        decode_unsigned(azimuth).and_then(|a| within(a, 0..=359)),
    )?;
    let snr = resolve(
        frame,
        index + 3,
        Need::Optional,
        decode_unsigned(snr).and_then(|s| within(s, 0..=99)),
    )?;

    Ok(Some(Satellite {
        prn,
        elevation,
        azimuth,
        snr,
    }))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{nmea_content::sentences::sentence, tokenize};

    fn gsv(line: &str) -> Result<GsvReport, ParseError> {
        GsvReport::from_frame(&tokenize(line)?)
    }

    #[test]
    fn test_gsv_parsing() {
        let cases = [
            "1,1,00",
            "1,1,00,",
            "1,1,00,F",
            "1,1,01,05,45,120,38,",
            "1,1,04,01,60,150,45,02,30,090,30,03,70,270,50,04,10,010,20,",
            "1,1,01,05,45,120,,",
            "1,1,01,06,30,,40,",
            "1,1,01,07,,070,35,",
            "1,1,01,08,,,30,",
            "1,1,01,09,,180,,",
            "1,1,01,10,50,,,",
            "1,1,01,11,,,,",
            "1,1,03,01,60,150,45,02,30,,30,03,,270,,",
            "1,1,01,05,45,120,38",
            "1,1,04,01,60,150,45,02,30,090,30,03,70,270,50,04,10,010,20",
            "1,1,01,05,45,120,",
            "2,2,05,05,45,120,38,,,,",
        ];

        for input in cases {
            let line = sentence(&format!("GPGSV,{input}"));
            let result = gsv(&line);
            assert!(result.is_ok(), "Failed: {line:?}\n\t{result:?}");
        }
    }

    #[test]
    fn test_gsv_first_message() {
        let report =
            gsv("$GPGSV,3,1,11,03,03,111,00,04,15,270,00,06,01,010,00,13,06,292,00*74").unwrap();

        assert_eq!(report.talker, Talker::Gps);
        assert_eq!(report.total_messages, 3);
        assert_eq!(report.message_number, 1);
        assert_eq!(report.satellites_in_view, 11);
        assert_eq!(report.signal_id, None);
        assert_eq!(
            report.satellites.as_slice(),
            [
                Satellite {
                    prn: 3,
                    elevation: Some(3),
                    azimuth: Some(111),
                    snr: Some(0)
                },
                Satellite {
                    prn: 4,
                    elevation: Some(15),
                    azimuth: Some(270),
                    snr: Some(0)
                },
                Satellite {
                    prn: 6,
                    elevation: Some(1),
                    azimuth: Some(10),
                    snr: Some(0)
                },
                Satellite {
                    prn: 13,
                    elevation: Some(6),
                    azimuth: Some(292),
                    snr: Some(0)
                },
            ]
        );
    }

    #[test]
    fn test_gsv_signal_id_and_empty_values() {
        let report = gsv("$GLGSV,1,1,02,65,45,120,38,66,,,,1*40").unwrap();

        assert_eq!(report.talker, Talker::Glonass);
        assert_eq!(report.signal_id, Some(1));
        assert_eq!(
            report.satellites.as_slice(),
            [
                Satellite {
                    prn: 65,
                    elevation: Some(45),
                    azimuth: Some(120),
                    snr: Some(38)
                },
                Satellite {
                    prn: 66,
                    elevation: None,
                    azimuth: None,
                    snr: None
                },
            ]
        );

        let report = gsv("$GPGSV,1,1,01,05,45,120,38,*68").unwrap();
        assert_eq!(report.signal_id, None);
        assert_eq!(report.satellites.len(), 1);

        let report = gsv("$GPGSV,1,1,00*79").unwrap();
        assert!(report.satellites.is_empty());
    }

    #[test]
    fn test_gsv_errors() {
        let cases = [
            // message number beyond the total
            ("GPGSV,2,3,08", 2, FieldError::OutOfRange),
            ("GPGSV,0,0,08", 1, FieldError::OutOfRange),
            ("GPGSV,1,1,", 3, FieldError::Missing),
            // partial satellite group
            ("GPGSV,1,1,01,05,45", 6, FieldError::Missing),
            ("GPGSV,1,1,01,05,45,120", 7, FieldError::Missing),
            // elevation, azimuth and SNR ranges
            ("GPGSV,1,1,01,05,91,120,38", 5, FieldError::OutOfRange),
            ("GPGSV,1,1,01,05,45,360,38", 6, FieldError::OutOfRange),
            ("GPGSV,1,1,01,05,45,120,100", 7, FieldError::OutOfRange),
            ("GPGSV,1,1,01,,45,120,38", 4, FieldError::Missing),
            ("GPGSV,1,1,01,05,45,120,38,G", 8, FieldError::Malformed),
        ];

        for (payload, expected_index, expected_error) in cases {
            let error = gsv(&sentence(payload)).unwrap_err();
            match error {
                ParseError::Field { index, error, .. } => {
                    assert_eq!((index, error), (expected_index, expected_error), "{payload}");
                }
                other => panic!("{payload}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_gsv_too_many_satellites() {
        let error = gsv(&sentence(
            "GPGSV,1,1,05,01,60,150,45,02,30,090,30,03,70,270,50,04,10,010,20,05,10,010,20",
        ))
        .unwrap_err();

        assert!(matches!(
            error,
            ParseError::Field {
                index: 20,
                error: FieldError::Malformed,
                ..
            }
        ));
    }
}
