#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Raw bytes accumulated since the last successful decode.
///
/// Owned by the frame accumulator until handed to the splitter by value;
/// the splitter never outlives its borrows into the frame.
#[derive(Debug, Clone)]
pub struct RawFrame {
    data: Vec<u8>,
}

impl RawFrame {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Decode the frame as text. The wire format is ASCII; anything else is
    /// replaced rather than rejected so a corrupt byte cannot stall the feed.
    pub fn as_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

/// The eight decoded navigation fields from one GPRMC/GPGGA pair.
///
/// Either all fields are empty (cleared state) or all were committed by one
/// successful split; partial writes are never observable. The record is
/// cleared again once consumed for display.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavigationRecord {
    pub talker_id: String,
    pub latitude: String,
    pub lat_hemisphere: String,
    pub longitude: String,
    pub lon_hemisphere: String,
    pub ground_speed: String,
    pub track_true: String,
    pub altitude_feet: String,
}

impl NavigationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite all eight fields in one write.
    pub fn write(&mut self, other: NavigationRecord) {
        *self = other;
    }

    /// Reset to the cleared state.
    pub fn clean(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.talker_id.is_empty()
            && self.latitude.is_empty()
            && self.lat_hemisphere.is_empty()
            && self.longitude.is_empty()
            && self.lon_hemisphere.is_empty()
            && self.ground_speed.is_empty()
            && self.track_true.is_empty()
            && self.altitude_feet.is_empty()
    }

    /// Ground speed in knots. An empty or unparsable field reads as 0.
    pub fn ground_speed_knots(&self) -> f64 {
        crate::conversion::parse_field_f64(&self.ground_speed)
    }

    /// Altitude in feet, rounded to a whole number.
    pub fn altitude_ft(&self) -> i64 {
        crate::conversion::parse_field_f64(&self.altitude_feet).round() as i64
    }

    /// True track in whole degrees.
    pub fn track_degrees(&self) -> i64 {
        crate::conversion::parse_field_f64(&self.track_true).round() as i64
    }
}

/// Reception statistics for one decode session
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecodeStats {
    pub cycles: u64,
    pub frames_decoded: u64,
    pub frames_discarded: u64,
    pub bytes_received: u64,
    pub rmc_valid: u64,
    pub gga_valid: u64,
    pub null_reads: u64,
    /// Cumulative wall time spent waiting for complete frames
    pub acquire_wait_ms: u64,
}

impl DecodeStats {
    /// Mean wait for a complete frame, across decoded and discarded frames
    pub fn mean_acquire_wait_ms(&self) -> u64 {
        let frames = self.frames_decoded + self.frames_discarded;
        if frames == 0 {
            0
        } else {
            self.acquire_wait_ms / frames
        }
    }
}
