//! Display-line formatting for decoded records
//!
//! Produces the four 20-column text lines the display collaborator shows:
//! latitude and longitude as degrees/minutes with the hemisphere letter,
//! then ground speed with altitude, then the true track. Pushing the lines
//! to actual hardware is the collaborator's business, not ours.

use crate::types::NavigationRecord;

const DEGREE: char = '\u{00b0}';

/// Format a `ddmm.mmmm` position field as a degrees/minutes string with
/// `deg_digits` degree digits, e.g. `48°07'03.08"`. Returns `None` when
/// the field does not carry the expected shape.
fn format_dm(value: &str, deg_digits: usize) -> Option<String> {
    let dot = value.find('.')?;
    if dot != deg_digits + 2 || !value.is_ascii() {
        return None;
    }
    let frac = &value[dot + 1..];
    if frac.len() < 2 {
        return None;
    }
    let degrees = &value[..deg_digits];
    let minutes = &value[deg_digits..dot];
    let frac_hi = &frac[..2];
    let frac_lo = &frac[2..];
    Some(format!(
        "{: >2}{}{:0>2}'{:0>2}.{:0>2}\"",
        degrees, DEGREE, minutes, frac_hi, frac_lo
    ))
}

/// Latitude line, e.g. `N    48°07'03.08"`. Falls back to the raw field
/// when it does not look like `ddmm.mmm`.
pub fn format_latitude(value: &str, hemisphere: &str) -> String {
    let formatted = match value.find('.') {
        Some(4) => format_dm(value, 2),
        Some(3) => format_dm(value, 1),
        _ => None,
    };
    match formatted {
        Some(s) => format!("{}    {}", hemisphere, s),
        None => format!("{}    {}", hemisphere, value),
    }
}

/// Longitude line, e.g. `E   011°31'00.00"`.
pub fn format_longitude(value: &str, hemisphere: &str) -> String {
    let formatted = match value.find('.') {
        Some(5) => format_dm(value, 3),
        Some(4) => format_dm(value, 2),
        _ => None,
    };
    match formatted {
        Some(s) => format!("{}   {}", hemisphere, s),
        None => format!("{}   {}", hemisphere, value),
    }
}

/// Ground speed and altitude line, e.g. `GS   22 ALT  1789 FT`
pub fn format_speed_altitude(record: &NavigationRecord) -> String {
    format!(
        "GS  {: >3} ALT {: >5} FT",
        record.ground_speed_knots().round() as i64,
        record.altitude_ft()
    )
}

/// True track line, e.g. `CRS 084 DEGS`
pub fn format_track(record: &NavigationRecord) -> String {
    format!("CRS {:0>3} DEGS", record.track_degrees())
}

/// The four display lines for a populated record
pub fn render_record(record: &NavigationRecord) -> Vec<String> {
    vec![
        format_latitude(&record.latitude, &record.lat_hemisphere),
        format_longitude(&record.longitude, &record.lon_hemisphere),
        format_speed_altitude(record),
        format_track(record),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> NavigationRecord {
        NavigationRecord {
            talker_id: "$GPRMC".to_string(),
            latitude: "4807.038".to_string(),
            lat_hemisphere: "N".to_string(),
            longitude: "01131.000".to_string(),
            lon_hemisphere: "E".to_string(),
            ground_speed: "22.4".to_string(),
            track_true: "084.4".to_string(),
            altitude_feet: "1789".to_string(),
        }
    }

    #[test]
    fn test_format_latitude_two_digit_degrees() {
        assert_eq!(format_latitude("4807.038", "N"), "N    48\u{00b0}07'03.08\"");
    }

    #[test]
    fn test_format_latitude_one_digit_degrees() {
        assert_eq!(format_latitude("807.52", "S"), "S     8\u{00b0}07'52.00\"");
    }

    #[test]
    fn test_format_longitude_three_digit_degrees() {
        assert_eq!(format_longitude("01131.000", "E"), "E   011\u{00b0}31'00.00\"");
    }

    #[test]
    fn test_unrecognized_shape_falls_back_to_raw() {
        assert_eq!(format_latitude("garbage", "N"), "N    garbage");
    }

    #[test]
    fn test_speed_altitude_and_track_lines() {
        let record = sample_record();
        assert_eq!(format_speed_altitude(&record), "GS   22 ALT  1789 FT");
        assert_eq!(format_track(&record), "CRS 084 DEGS");
    }

    #[test]
    fn test_render_record_yields_four_lines() {
        assert_eq!(render_record(&sample_record()).len(), 4);
    }
}
