use crate::error::FieldError;

/// Which axis a [`Coordinate`] measures.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateKind {
    /// `ddmm.mm`, north/south, within [-90, 90]
    Latitude,
    /// `dddmm.mm`, east/west, within [-180, 180]
    Longitude,
}

impl CoordinateKind {
    /// Number of leading digits that encode whole degrees.
    pub fn degree_width(self) -> usize {
        match self {
            CoordinateKind::Latitude => 2,
            CoordinateKind::Longitude => 3,
        }
    }

    /// Largest valid magnitude in degrees.
    pub fn limit(self) -> f64 {
        match self {
            CoordinateKind::Latitude => 90.0,
            CoordinateKind::Longitude => 180.0,
        }
    }
}

/// A latitude or longitude in signed decimal degrees.
///
/// South and west are negative. A `Coordinate` is always within the range of
/// its [`CoordinateKind`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    kind: CoordinateKind,
    degrees: f64,
}

impl Coordinate {
    /// Creates a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(kind: CoordinateKind, degrees: f64) -> Result<Self, FieldError> {
        if !degrees.is_finite() || degrees.abs() > kind.limit() {
            return Err(FieldError::OutOfRange);
        }

        Ok(Coordinate { kind, degrees })
    }

    /// Whether this is a latitude or a longitude.
    pub fn kind(&self) -> CoordinateKind {
        self.kind
    }

    /// Signed decimal degrees.
    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    /// Encodes the coordinate back into its NMEA field pair, e.g.
    /// `("2829.966492", 'N')`, with minutes to six decimal places.
    ///
    /// ```rust
    /// use nmea0183_fix::{Coordinate, CoordinateKind};
    ///
    /// let lon = Coordinate::new(CoordinateKind::Longitude, -7.5).unwrap();
    /// assert_eq!(lon.to_nmea(), ("00730.000000".to_string(), 'W'));
    /// ```
    pub fn to_nmea(&self) -> (String, char) {
        // Work in whole micro-minutes so rounding can never produce "60" minutes.
        let total = (self.degrees.abs() * 60_000_000.0).round() as u64;
        let whole_degrees = total / 60_000_000;
        let micro_minutes = total % 60_000_000;
        let minutes = micro_minutes / 1_000_000;
        let fraction = micro_minutes % 1_000_000;

        let width = self.kind.degree_width();
        let value = format!("{whole_degrees:0width$}{minutes:02}.{fraction:06}");

        let negative = self.degrees < 0.0;
        let hemisphere = match self.kind {
            CoordinateKind::Latitude if negative => NorthSouth::South.as_char(),
            CoordinateKind::Latitude => NorthSouth::North.as_char(),
            CoordinateKind::Longitude if negative => EastWest::West.as_char(),
            CoordinateKind::Longitude => EastWest::East.as_char(),
        };

        (value, hemisphere)
    }
}

field_enum! {
    /// Latitude hemisphere
    pub enum NorthSouth {
        /// N - North
        'N' => North,
        /// S - South
        'S' => South,
    }
}

field_enum! {
    /// Longitude hemisphere, also used for magnetic variation
    pub enum EastWest {
        /// E - East
        'E' => East,
        /// W - West
        'W' => West,
    }
}

/// Receiver status reported by RMC.
///
/// Only [`FixStatus::Active`] fixes may be used for navigation. Void fixes
/// often still carry the last known position, which is stale.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixStatus {
    /// A - data valid
    Active,
    /// V - navigation receiver warning
    Void,
    /// Anything else, including an empty field
    Unknown,
}

field_enum! {
    /// Quality of the GPS fix
    pub enum FixQuality {
        /// 0 - Fix not available
        '0' => NoFix,
        /// 1 - GPS fix
        '1' => Gps,
        /// 2 - Differential GPS fix
        '2' => Dgps,
        /// 3 - PPS fix
        '3' => Pps,
        /// 4 - Real Time Kinematic
        '4' => Rtk,
        /// 5 - Float RTK
        '5' => FloatRtk,
        /// 6 - estimated (dead reckoning)
        '6' => Estimated,
        /// 7 - Manual input mode
        '7' => Manual,
        /// 8 - Simulation mode
        '8' => Simulation,
    }
}

field_enum! {
    /// FAA Mode Indicator (NMEA 2.3 and later)
    ///
    /// <https://gpsd.gitlab.io/gpsd/NMEA.html#_sentence_mixes_and_nmea_variations>
    pub enum FaaMode {
        /// A - Autonomous mode
        'A' => Autonomous,
        /// C - Quectel Querk, "Caution"
        'C' => Caution,
        /// D - Differential Mode
        'D' => Differential,
        /// E - Estimated (dead-reckoning) mode
        'E' => Estimated,
        /// F - RTK Float mode
        'F' => FloatRtk,
        /// M - Manual Input Mode
        'M' => Manual,
        /// N - Data Not Valid
        'N' => DataNotValid,
        /// P - Precise
        'P' => Precise,
        /// R - RTK Integer mode
        'R' => FixedRtk,
        /// S - Simulated Mode
        'S' => Simulator,
        /// U - Quectel Querk, "Unsafe"
        'U' => Unsafe,
    }
}

/// Time of day in UTC, `hhmmss.ss`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UtcTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub nanosecond: u32,
}

impl UtcTime {
    /// Converts to a [`time::Time`].
    pub fn to_time(self) -> Result<time::Time, FieldError> {
        time::Time::from_hms_nano(self.hour, self.minute, self.second, self.nanosecond)
            .map_err(|_| FieldError::OutOfRange)
    }
}

/// Calendar date as sent on the wire, `ddmmyy`.
///
/// The year keeps its two digits; which century it belongs to is for the
/// caller to decide, see [`Date::to_date`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date {
    pub day: u8,
    pub month: u8,
    /// Year within its century, 0-99
    pub year: u8,
}

impl Date {
    /// Resolves the two-digit year against `century` (e.g. `20` for 20xx) and
    /// checks the day against the month length.
    ///
    /// ```rust
    /// use nmea0183_fix::Date;
    ///
    /// let date = Date { day: 3, month: 4, year: 23 };
    /// let full = date.to_date(20).unwrap();
    /// assert_eq!(full.year(), 2023);
    ///
    /// assert!(Date { day: 30, month: 2, year: 23 }.to_date(20).is_err());
    /// ```
    pub fn to_date(self, century: i32) -> Result<time::Date, FieldError> {
        let month = time::Month::try_from(self.month).map_err(|_| FieldError::OutOfRange)?;
        let year = century * 100 + i32::from(self.year);

        time::Date::from_calendar_date(year, month, self.day).map_err(|_| FieldError::OutOfRange)
    }
}

/// Magnetic variation reported by RMC.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagneticVariation {
    /// Magnitude in degrees
    pub degrees: f64,
    pub direction: EastWest,
}

impl MagneticVariation {
    /// Variation in degrees, westerly variation negative.
    pub fn signed_degrees(&self) -> f64 {
        match self.direction {
            EastWest::East => self.degrees,
            EastWest::West => -self.degrees,
        }
    }
}

/// Satellite information used in [`GsvReport`](super::GsvReport) sentences
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Satellite {
    pub prn: u16,
    /// Elevation in degrees, 0-90
    pub elevation: Option<u8>,
    /// Azimuth in degrees true, 0-359
    pub azimuth: Option<u16>,
    /// Signal to noise ratio in dB-Hz, 0-99
    pub snr: Option<u8>,
}
