use crate::{
    FrameError, NmeaParser, ParseError, ParsedSentence, StartMarker, checksum, format_checksum,
    tokenize,
};

fn with_checksum(marker: char, payload: &str) -> String {
    format!("{marker}{payload}*{}", format_checksum(checksum(payload)))
}

fn frame_error(res: Result<impl core::fmt::Debug, ParseError>) -> FrameError {
    match res {
        Err(ParseError::MalformedFrame { reason, .. }) => reason,
        other => panic!("Unexpected result: {other:?}"),
    }
}

#[test]
fn test_transport_prefix_is_skipped() {
    let frame = tokenize("+QGPSGNMEA: $GPGSV,1,1,00*79").unwrap();
    assert_eq!(frame.marker(), StartMarker::Parametric);
    assert_eq!(frame.payload(), "GPGSV,1,1,00");
    assert_eq!(frame.sentence_id().as_str(), "GPGSV");

    // Binary junk before the marker is still just a prefix.
    let frame = tokenize(b"\xff\x00\x1b[0m$GPGSV,1,1,00*79\r\n").unwrap();
    assert_eq!(frame.fields(), ["GPGSV", "1", "1", "00"]);
    assert!(frame.line().starts_with(b"\xff"));
}

#[test]
fn test_empty_fields_keep_their_position() {
    let frame = tokenize("$GPRMC,,V,,,,,,,,,,N*53").unwrap();
    assert_eq!(frame.fields().len(), 13);
    assert_eq!(frame.field(2), "V");
    assert_eq!(frame.field(3), "");
    assert_eq!(frame.field(12), "N");
    assert_eq!(frame.field(13), "");
    assert_eq!(frame.field(usize::MAX), "");
}

#[test]
fn test_encapsulated_sentence() {
    let line = with_checksum('!', "AIVDM,1,1,,A,13aEOK?P00PD2wVMdLDRhgvL289?,0");
    let frame = tokenize(&line).unwrap();
    assert_eq!(frame.marker(), StartMarker::Encapsulated);
    assert!(frame.sentence_id().talker().is_some());

    match NmeaParser::default().parse(&line).unwrap() {
        ParsedSentence::Unsupported(id) => assert_eq!(id.as_str(), "AIVDM"),
        other => panic!("Unexpected sentence: {other:?}"),
    }
}

#[test]
fn test_missing_start_marker() {
    assert_eq!(frame_error(tokenize("")), FrameError::MissingStartMarker);
    assert_eq!(
        frame_error(tokenize("GPGSV,1,1,00*79")),
        FrameError::MissingStartMarker
    );
    assert_eq!(
        frame_error(tokenize("+QGPSGNMEA: ERROR\r\n")),
        FrameError::MissingStartMarker
    );
}

#[test]
fn test_missing_checksum() {
    assert_eq!(frame_error(tokenize("$GPGSV,1,1,00")), FrameError::MissingChecksum);
    assert_eq!(frame_error(tokenize("$")), FrameError::MissingChecksum);
}

#[test]
fn test_invalid_checksum() {
    for line in [
        "$GPGSV,1,1,00*",
        "$GPGSV,1,1,00*7",
        "$GPGSV,1,1,00*7G",
        "$GPGSV,1,1,00*791",
        "$GPGSV,1,1,00*79 ",
        "$GPGSV,1,1,00*79*",
    ] {
        assert_eq!(frame_error(tokenize(line)), FrameError::InvalidChecksum, "{line}");
    }

    // Only the last three bytes are the checksum, an earlier `*` is payload.
    assert!(matches!(
        tokenize("$GPGSV,1,1,00**79"),
        Err(ParseError::ChecksumMismatch {
            expected: 0x53,
            found: 0x79,
            ..
        })
    ));
}

#[test]
fn test_non_ascii_sentence() {
    let mut line = b"$GPTXT,01,01,02,caf\xc3\xa9".to_vec();
    let cc = checksum(&line[1..]);
    line.extend_from_slice(format!("*{}", format_checksum(cc)).as_bytes());

    assert_eq!(frame_error(tokenize(&line)), FrameError::NonAscii);
}

#[test]
fn test_no_fields() {
    assert_eq!(
        frame_error(tokenize(&with_checksum('$', "GPGSV"))),
        FrameError::NoFields
    );
}

#[test]
fn test_too_many_fields() {
    let widest = with_checksum('$', &format!("GPTXT{}", ",1".repeat(crate::MAX_FIELDS - 1)));
    let frame = tokenize(&widest).unwrap();
    assert_eq!(frame.fields().len(), crate::MAX_FIELDS);
    assert_eq!(frame.field(crate::MAX_FIELDS - 1), "1");

    let wider = with_checksum('$', &format!("GPTXT{}", ",1".repeat(crate::MAX_FIELDS)));
    assert_eq!(
        frame_error(tokenize(&wider)),
        FrameError::TooManyFields {
            limit: crate::MAX_FIELDS
        }
    );

    // Empty fields count too.
    let commas = with_checksum('$', &format!("GPTXT{}", ",".repeat(200)));
    assert_eq!(
        frame_error(tokenize(&commas)),
        FrameError::TooManyFields {
            limit: crate::MAX_FIELDS
        }
    );
}

#[test]
fn test_invalid_address() {
    for payload in [",1,1,00", "GP-SV,1,1,00", "GP GSV,1", "ABCDEFGHIJKLMNOP,1"] {
        let line = with_checksum('$', payload);
        assert_eq!(frame_error(tokenize(&line)), FrameError::InvalidAddress, "{line}");
    }

    // Fifteen characters is still an address, just not a standard one.
    let line = with_checksum('$', "ABCDEFGHIJKLMNO,1");
    let frame = tokenize(&line).unwrap();
    assert_eq!(frame.sentence_id().sentence_type(), None);
}

#[test]
fn test_max_length() {
    let long = with_checksum('$', &format!("GPTXT,{}", "A".repeat(2000)));

    match tokenize(&long) {
        Err(ParseError::MalformedFrame {
            reason: FrameError::TooLong { length, limit },
            line,
        }) => {
            assert_eq!(length, long.len());
            assert_eq!(limit, crate::DEFAULT_MAX_LENGTH);
            assert!(line.is_truncated());
        }
        other => panic!("Unexpected result: {other:?}"),
    }

    let unlimited = NmeaParser::builder().max_length(None).build();
    assert!(unlimited.tokenize(&long).is_ok());

    // The limit is measured without the prefix and the line ending.
    let strict = NmeaParser::builder().max_length(Some(16)).build();
    assert!(strict.tokenize("+QGPSGNMEA: $GPGSV,1,1,00*79\r\n").is_ok());

    let stricter = NmeaParser::builder().max_length(Some(15)).build();
    assert_eq!(
        frame_error(stricter.tokenize("$GPGSV,1,1,00*79")),
        FrameError::TooLong {
            length: 16,
            limit: 15
        }
    );
}
