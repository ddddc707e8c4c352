//! Sentence splitting
//!
//! Locates the two target sentences inside a completed frame and extracts
//! their fields. A frame may hold partial, duplicated, or reordered
//! sentences, and a sentence split across two reads leaves an extra
//! embedded line ending, so sentence ends are bounded by an explicit
//! decision table over the line-ending count rather than ad hoc scanning.

use crate::error::{GpsRxError, Result};
use crate::parser::sentence::{
    parse_gga, parse_rmc, SentenceStatus, GGA_MARKER, RMC_MARKER,
};
use crate::types::{NavigationRecord, RawFrame};

/// Byte offsets of each `\n` in a frame, in occurrence order.
///
/// Rebuilt on every decode attempt; offsets are strictly increasing.
#[derive(Debug)]
pub struct LineBreakIndex(Vec<usize>);

impl LineBreakIndex {
    pub fn build(frame: &[u8]) -> Self {
        Self(
            frame
                .iter()
                .enumerate()
                .filter(|(_, &b)| b == b'\n')
                .map(|(i, _)| i)
                .collect(),
        )
    }

    pub fn count(&self) -> usize {
        self.0.len()
    }

    pub fn offset(&self, rank: usize) -> Option<usize> {
        self.0.get(rank).copied()
    }

    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }
}

/// Find the first occurrence of `marker` within `frame`
pub fn find_marker(frame: &[u8], marker: &[u8]) -> Option<usize> {
    if marker.is_empty() || frame.len() < marker.len() {
        return None;
    }
    frame.windows(marker.len()).position(|w| w == marker)
}

/// Outcome of one split attempt: the assembled record plus per-sentence
/// validity. Produced only when at least one sentence decoded.
#[derive(Debug)]
pub struct SplitReport {
    pub record: NavigationRecord,
    pub rmc: SentenceStatus,
    pub gga: SentenceStatus,
}

/// Split a completed frame into its RMC and GGA sentences and assemble the
/// navigation record.
///
/// Fails with `NoUsableSentence` when the frame lacks the structure to
/// bound sentences (fewer than two line endings, RMC marker absent or past
/// the last line ending) or when neither sentence decodes validly. The
/// caller discards the frame either way; a failed split leaves the previous
/// record untouched.
pub fn split_frame(frame: &RawFrame, debug: bool) -> Result<SplitReport> {
    let bytes = frame.as_bytes();
    let breaks = LineBreakIndex::build(bytes);
    if breaks.count() < 2 {
        if debug {
            println!(
                "split_frame: {} line endings, not enough to bound sentences",
                breaks.count()
            );
        }
        return Err(GpsRxError::NoUsableSentence);
    }

    // Marker offsets are re-resolved against the full frame; the
    // accumulator's hits are stale once the buffer has grown past them.
    let rmc_at = find_marker(bytes, RMC_MARKER.as_bytes());
    let gga_at = find_marker(bytes, GGA_MARKER.as_bytes());

    let last_break = match breaks.last() {
        Some(offset) => offset,
        None => return Err(GpsRxError::NoUsableSentence),
    };
    let rmc_at = match rmc_at {
        Some(at) if at <= last_break => at,
        _ => {
            // RMC absent, or it opened after the final line ending and
            // nothing bounds it.
            if debug {
                println!("split_frame: RMC marker missing or unbounded");
            }
            return Err(GpsRxError::NoUsableSentence);
        }
    };

    let (rmc_slice, gga_slice) = match gga_at {
        Some(gga_at) => bound_sentences(bytes.len(), &breaks, rmc_at, gga_at),
        None => (None, None),
    };

    let mut record = NavigationRecord::new();
    let mut gga_status = SentenceStatus::Missing;
    let mut gga_fields = None;
    if let Some((start, end)) = gga_slice {
        let candidate = String::from_utf8_lossy(&bytes[start..end]);
        match parse_gga(&candidate) {
            Some(fields) => {
                gga_status = SentenceStatus::Valid;
                gga_fields = Some(fields);
            }
            None => gga_status = SentenceStatus::Malformed,
        }
    }

    let mut rmc_status = SentenceStatus::Missing;
    if let Some((start, end)) = rmc_slice {
        let candidate = String::from_utf8_lossy(&bytes[start..end]);
        match parse_rmc(&candidate) {
            Some(fields) => {
                rmc_status = SentenceStatus::Valid;
                record.talker_id = fields.talker_id;
                record.latitude = fields.latitude;
                record.lat_hemisphere = fields.lat_hemisphere;
                record.longitude = fields.longitude;
                record.lon_hemisphere = fields.lon_hemisphere;
                record.ground_speed = fields.ground_speed;
                record.track_true = fields.track_true;
            }
            None => rmc_status = SentenceStatus::Malformed,
        }
    }

    if rmc_status.is_valid() {
        // The literal "0" stands in for the altitude when GGA is unusable.
        record.altitude_feet = match gga_fields {
            Some(fields) => fields.altitude_feet.to_string(),
            None => "0".to_string(),
        };
    } else if let Some(fields) = gga_fields {
        record.altitude_feet = fields.altitude_feet.to_string();
    }

    if !rmc_status.is_valid() && !gga_status.is_valid() {
        if debug {
            println!(
                "split_frame: no usable sentence (RMC {:?}, GGA {:?})",
                rmc_status, gga_status
            );
        }
        return Err(GpsRxError::NoUsableSentence);
    }

    Ok(SplitReport {
        record,
        rmc: rmc_status,
        gga: gga_status,
    })
}

/// Bound the two sentences by the line-ending count.
///
/// The table handles the irregular framing that sentence pairs split across
/// reads produce. With 1 or 2 line endings the first sentence ends at
/// ending 0; the second ends at ending 1 unless its marker lies beyond the
/// last ending, in which case it runs to the frame end. With 3 endings the
/// first sentence ends at ending 1 and the second at ending 2. Any other
/// count takes no slice and the split fails on validation.
fn bound_sentences(
    frame_len: usize,
    breaks: &LineBreakIndex,
    rmc_at: usize,
    gga_at: usize,
) -> (Option<(usize, usize)>, Option<(usize, usize)>) {
    let (first_at, second_at) = if rmc_at < gga_at {
        (rmc_at, gga_at)
    } else {
        (gga_at, rmc_at)
    };

    let first = match breaks.count() {
        1 | 2 => breaks.offset(0),
        3 => breaks.offset(1),
        _ => None,
    }
    .map(|end| (first_at, end + 1))
    .filter(|&(start, end)| end > start);

    let second = match breaks.count() {
        2 => breaks.offset(1).map(|bound| {
            let end = if second_at > bound { frame_len } else { bound + 1 };
            (second_at, end)
        }),
        3 => breaks.offset(2).map(|end| (second_at, end + 1)),
        _ => None,
    }
    .filter(|&(start, end)| end > start);

    if rmc_at < gga_at {
        (first, second)
    } else {
        (second, first)
    }
}
