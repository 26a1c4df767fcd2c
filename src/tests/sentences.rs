use pretty_assertions::assert_eq;

use crate::{
    Date, EastWest, FaaMode, FieldError, FixQuality, FixStatus, GpsFix, MagneticVariation,
    ParseError, ParsedSentence, Talker, UtcTime, parse,
};

fn rmc(line: &str) -> GpsFix {
    match parse(line) {
        Ok(ParsedSentence::Rmc(fix)) => fix,
        other => panic!("Expected RMC, got {other:?}"),
    }
}

#[test]
fn test_active_rmc() {
    let fix = rmc("$GPRMC,131525.57,A,2829.966492,N,07705.154711,E,0.0,302.0,030423,0.8,E,A*3C");

    assert_eq!(fix.status, FixStatus::Active);
    assert_eq!(fix.speed_knots, Some(0.0));
    assert_eq!(
        fix.date,
        Some(Date {
            day: 3,
            month: 4,
            year: 23
        })
    );

    let latitude = fix.latitude.unwrap().degrees();
    let longitude = fix.longitude.unwrap().degrees();
    assert!((latitude - (28.0 + 29.966492 / 60.0)).abs() < 1e-9);
    assert!((longitude - (77.0 + 5.154711 / 60.0)).abs() < 1e-9);
    assert!((-90.0..=90.0).contains(&latitude));
    assert!((-180.0..=180.0).contains(&longitude));
}

#[test]
fn test_void_rmc_is_not_an_error() {
    let fix = rmc("$GPRMC,,V,,,,,,,,,,N*53");

    assert_eq!(fix.status, FixStatus::Void);
    assert_eq!(fix.latitude, None);
    assert_eq!(fix.longitude, None);
    assert!(!fix.is_trusted());
}

#[test]
fn test_gnss_rmc_west() {
    let fix = rmc("$GNRMC,001031.00,A,4404.13993,N,12118.86023,W,0.146,,100117,,,A*7B");

    assert_eq!(fix.talker, Talker::Gnss);
    assert!((fix.longitude.unwrap().degrees() + (121.0 + 18.86023 / 60.0)).abs() < 1e-9);
    assert_eq!(fix.speed_knots, Some(0.146));
    assert_eq!(fix.track_degrees, None);
    assert_eq!(fix.magnetic_variation, None);
    assert_eq!(fix.mode, Some(FaaMode::Autonomous));

    let time = fix.utc_time.unwrap().to_time().unwrap();
    assert_eq!((time.hour(), time.minute(), time.second()), (0, 10, 31));

    let date = fix.date.unwrap().to_date(20).unwrap();
    assert_eq!(date.year(), 2017);
    assert_eq!(date.month(), time::Month::January);
    assert_eq!(date.day(), 10);
}

#[test]
fn test_rmc_behind_transport_prefix() {
    let fix = rmc(
        "+QGPSGNMEA: $GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n",
    );

    assert_eq!(
        fix.utc_time,
        Some(UtcTime {
            hour: 12,
            minute: 35,
            second: 19,
            nanosecond: 0
        })
    );
    assert_eq!(
        fix.magnetic_variation,
        Some(MagneticVariation {
            degrees: 3.1,
            direction: EastWest::West
        })
    );
}

#[test]
fn test_gga() {
    match parse("$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47") {
        Ok(ParsedSentence::Gga(fix)) => {
            assert_eq!(fix.quality, FixQuality::Gps);
            assert_eq!(fix.satellites_in_use, Some(8));
            assert_eq!(fix.hdop, Some(0.9));
            assert_eq!(fix.altitude_m, Some(545.4));
            assert!(fix.has_fix());
        }
        other => panic!("Expected GGA, got {other:?}"),
    }

    match parse("$GPGGA,,,,,,0,00,99.99,,,,,,*48") {
        Ok(ParsedSentence::Gga(fix)) => assert!(!fix.has_fix()),
        other => panic!("Expected GGA, got {other:?}"),
    }
}

#[test]
fn test_gsv() {
    match parse("$GPGSV,3,1,11,03,03,111,00,04,15,270,00,06,01,010,00,13,06,292,00*74") {
        Ok(ParsedSentence::Gsv(report)) => {
            assert_eq!(
                (
                    report.total_messages,
                    report.message_number,
                    report.satellites_in_view
                ),
                (3, 1, 11)
            );
            assert_eq!(report.satellites.len(), 4);
        }
        other => panic!("Expected GSV, got {other:?}"),
    }
}

#[test]
fn test_unsupported_sentences() {
    for line in [
        "$GPTXT,01,01,02,ANTSTATUS=OK*3B",
        "$PUBX,00,081350.00,4717.113210,N*5B",
    ] {
        match parse(line) {
            Ok(ParsedSentence::Unsupported(id)) => {
                assert_eq!(id.as_str(), &line[1..line.find(',').unwrap()]);
            }
            other => panic!("Expected Unsupported for {line}, got {other:?}"),
        }
    }

    let id = match parse("$PUBX,00,081350.00,4717.113210,N*5B") {
        Ok(ParsedSentence::Unsupported(id)) => id,
        other => panic!("{other:?}"),
    };
    assert!(id.is_proprietary());
    assert_eq!(id.talker(), None);
}

#[test]
fn test_truncated_payload() {
    // The checksum is intact, the payload just stops after the time field.
    let fix = rmc("$GPRMC,1315*61");
    assert_eq!(fix.status, FixStatus::Unknown);
    assert_eq!(fix.utc_time, None);
    assert_eq!(fix.latitude, None);
}

#[test]
fn test_field_errors_carry_context() {
    let error = parse("$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6B")
        .unwrap_err();
    assert!(matches!(error, ParseError::ChecksumMismatch { .. }));

    let payload = "GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,9999";
    let bad = format!("${payload}*{}", crate::format_checksum(crate::checksum(payload)));
    let error = parse(&bad).unwrap_err();

    match &error {
        ParseError::Field {
            sentence,
            index,
            error,
            line,
        } => {
            assert_eq!(sentence.as_str(), "GPGGA");
            assert_eq!(*index, 14);
            assert_eq!(*error, FieldError::OutOfRange);
            assert_eq!(line.as_str(), bad);
        }
        other => panic!("Unexpected error {other:?}"),
    }
    assert_eq!(
        error.to_string(),
        format!("GPGGA field 14: value out of range in `{bad}`")
    );
}
