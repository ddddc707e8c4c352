//! Sentence tokenizing and field extraction
//!
//! A candidate sentence is accepted purely on its comma token count; the
//! checksum after the `*` marker is not verified. The wire-position mapping
//! of the fields lives here and nowhere else.

use crate::conversion::meters_to_feet;

/// Identifier of the RMC sentence within the frame
pub const RMC_MARKER: &str = "$GPRMC";
/// Identifier of the GGA sentence within the frame
pub const GGA_MARKER: &str = "$GPGGA";

/// Comma token count of a well-formed RMC sentence (identifier included)
pub const RMC_TOKEN_COUNT: usize = 12;
/// Comma token count of a well-formed GGA sentence (identifier included)
pub const GGA_TOKEN_COUNT: usize = 15;

// Wire positions within a tokenized RMC sentence
const RMC_TALKER_ID: usize = 0;
const RMC_LATITUDE: usize = 3;
const RMC_LAT_HEMISPHERE: usize = 4;
const RMC_LONGITUDE: usize = 5;
const RMC_LON_HEMISPHERE: usize = 6;
const RMC_GROUND_SPEED: usize = 7;
const RMC_TRACK_TRUE: usize = 8;

// Wire position of the altitude (meters) within a tokenized GGA sentence
const GGA_ALTITUDE_METERS: usize = 9;

/// Validity of one sentence type within a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceStatus {
    Valid,
    /// Wrong token count, missing identifier, or unparsable altitude;
    /// the sentence is skipped for this cycle
    Malformed,
    /// No slice for this sentence type was taken from the frame
    Missing,
}

impl SentenceStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, SentenceStatus::Valid)
    }
}

/// The seven fields extracted from a valid RMC sentence
#[derive(Debug, Clone)]
pub struct RmcFields {
    pub talker_id: String,
    pub latitude: String,
    pub lat_hemisphere: String,
    pub longitude: String,
    pub lon_hemisphere: String,
    pub ground_speed: String,
    pub track_true: String,
}

/// Tokenize an RMC candidate and extract its fields.
///
/// Returns `None` unless splitting on `,` yields exactly 12 tokens.
pub fn parse_rmc(candidate: &str) -> Option<RmcFields> {
    let tokens: Vec<&str> = candidate.split(',').collect();
    if tokens.len() != RMC_TOKEN_COUNT {
        return None;
    }
    Some(RmcFields {
        talker_id: tokens[RMC_TALKER_ID].to_string(),
        latitude: tokens[RMC_LATITUDE].to_string(),
        lat_hemisphere: tokens[RMC_LAT_HEMISPHERE].to_string(),
        longitude: tokens[RMC_LONGITUDE].to_string(),
        lon_hemisphere: tokens[RMC_LON_HEMISPHERE].to_string(),
        ground_speed: tokens[RMC_GROUND_SPEED].to_string(),
        track_true: tokens[RMC_TRACK_TRUE].to_string(),
    })
}

/// The contribution of a valid GGA sentence: its altitude, already in feet
#[derive(Debug, Clone, Copy)]
pub struct GgaFields {
    pub altitude_feet: i64,
}

/// Tokenize a GGA candidate and convert its altitude.
///
/// A `$` past position 0 means the slice caught an unstarted or
/// concatenated sentence; such candidates are skipped, as are candidates
/// without exactly 15 tokens or with an unparsable altitude.
pub fn parse_gga(candidate: &str) -> Option<GgaFields> {
    if matches!(candidate.find('$'), Some(pos) if pos > 0) {
        return None;
    }
    let tokens: Vec<&str> = candidate.split(',').collect();
    if tokens.len() != GGA_TOKEN_COUNT {
        return None;
    }
    let meters = tokens[GGA_ALTITUDE_METERS].trim().parse::<f64>().ok()?;
    Some(GgaFields {
        altitude_feet: meters_to_feet(meters),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rmc_extracts_positional_fields() {
        let fields =
            parse_rmc("$GPRMC,110645,A,4807.038,N,01131.000,E,22.4,084.4,230394,003.1,W*6A\r\n")
                .expect("12 tokens");
        assert_eq!(fields.talker_id, "$GPRMC");
        assert_eq!(fields.latitude, "4807.038");
        assert_eq!(fields.lat_hemisphere, "N");
        assert_eq!(fields.longitude, "01131.000");
        assert_eq!(fields.lon_hemisphere, "E");
        assert_eq!(fields.ground_speed, "22.4");
        assert_eq!(fields.track_true, "084.4");
    }

    #[test]
    fn test_parse_rmc_rejects_wrong_token_count() {
        assert!(parse_rmc("$GPRMC,110645,A,4807.038,N*6A\r\n").is_none());
        // 13 tokens is just as invalid as 11
        assert!(
            parse_rmc("$GPRMC,110645,A,4807.038,N,01131.000,E,22.4,084.4,230394,003.1,W,X*6A")
                .is_none()
        );
    }

    #[test]
    fn test_parse_gga_converts_altitude() {
        let fields =
            parse_gga("$GPGGA,110645,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n")
                .expect("15 tokens");
        // 545.4 m * 3.2808 = 1789.3 ft
        assert_eq!(fields.altitude_feet, 1789);
    }

    #[test]
    fn test_parse_gga_rejects_embedded_dollar() {
        assert!(
            parse_gga("xx$GPGGA,110645,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47")
                .is_none()
        );
    }

    #[test]
    fn test_parse_gga_rejects_wrong_token_count() {
        assert!(parse_gga("$GPGGA,110645,4807.038,N*47").is_none());
    }

    #[test]
    fn test_parse_gga_rejects_unparsable_altitude() {
        assert!(
            parse_gga("$GPGGA,110645,4807.038,N,01131.000,E,1,08,0.9,bogus,M,46.9,M,,*47")
                .is_none()
        );
    }
}
