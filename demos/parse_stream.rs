#[macro_use]
extern crate log;

use std::io::{self, BufRead};

use env_logger::Env;
use nmea0183_fix::{
    DEFAULT_MAX_LENGTH, LineEndingMode, NmeaParser, ParseError, ParsedSentence,
};

fn report(parsed: &ParsedSentence) {
    match parsed {
        ParsedSentence::Rmc(fix) if fix.is_trusted() => {
            let (Some(latitude), Some(longitude)) = (fix.latitude, fix.longitude) else {
                return;
            };
            info!(
                "{}RMC fix {:.6},{:.6} at {:?} knots",
                fix.talker,
                latitude.degrees(),
                longitude.degrees(),
                fix.speed_knots
            );
        }
        ParsedSentence::Rmc(fix) => info!("{}RMC untrusted, status {:?}", fix.talker, fix.status),
        ParsedSentence::Gga(fix) => info!(
            "{}GGA {:?}, {:?} satellites, altitude {:?} m",
            fix.talker, fix.quality, fix.satellites_in_use, fix.altitude_m
        ),
        ParsedSentence::Gsv(report) => info!(
            "{}GSV {}/{}: {} in view, {} listed",
            report.talker,
            report.message_number,
            report.total_messages,
            report.satellites_in_view,
            report.satellites.len()
        ),
        ParsedSentence::Unsupported(id) => debug!("skipping {}", id),
    }
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let matches = clap::Command::new("parse_stream")
        .about("Parses NMEA 0183 sentences read line by line from stdin")
        .arg(
            clap::Arg::new("require-crlf")
                .long("require-crlf")
                .help("Reject lines that do not end in CRLF")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("max-length")
                .long("max-length")
                .help("Maximum sentence length")
                .value_parser(clap::value_parser!(usize)),
        )
        .get_matches();

    let line_ending_mode = if matches.get_flag("require-crlf") {
        LineEndingMode::Required
    } else {
        LineEndingMode::Optional
    };
    let max_length = matches
        .get_one::<usize>("max-length")
        .copied()
        .unwrap_or(DEFAULT_MAX_LENGTH);
    let parser = NmeaParser::builder()
        .line_ending_mode(line_ending_mode)
        .max_length(Some(max_length))
        .build();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = Vec::new();
    let (mut parsed, mut rejected) = (0usize, 0usize);

    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if line.iter().all(|b| b.is_ascii_whitespace()) {
            continue;
        }

        match parser.parse(&line) {
            Ok(sentence) => {
                parsed += 1;
                report(&sentence);
            }
            Err(error @ ParseError::ChecksumMismatch { .. }) => {
                rejected += 1;
                warn!("discarding corrupt sentence: {}", error);
            }
            Err(error) => {
                rejected += 1;
                warn!("{}", error);
            }
        }
    }

    info!("{} sentences parsed, {} rejected", parsed, rejected);
    Ok(())
}
