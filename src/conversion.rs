//! Data conversion utilities for feed decoding
//!
//! Contains the altitude unit conversion and the lenient numeric field
//! parsing shared by the record accessors and the movement classifier.

/// Feet per meter, as used by the wire's consumers
pub const FEET_PER_METER: f64 = 3.2808;

/// Convert a GGA altitude (meters) to whole feet
pub fn meters_to_feet(meters: f64) -> i64 {
    (meters * FEET_PER_METER).round() as i64
}

/// Parse a sentence field as f64. Empty or unparsable fields read as 0,
/// matching the wire's "missing means zero" convention for the speed field.
pub fn parse_field_f64(field: &str) -> f64 {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(0.0)
}
