//! Export functionality for decoded feed data
//!
//! Contains functions for exporting decoded navigation records to a CSV
//! track file and recorded movement notices to JSON.

use crate::types::NavigationRecord;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Export options for controlling output formats
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub csv: bool,
    pub events: bool,
    pub output_dir: Option<String>,
}

/// Compute an output path next to the input file, honoring an explicit
/// output directory.
pub fn compute_export_path(input_path: &Path, extension: &str, options: &ExportOptions) -> PathBuf {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("feed");
    let file_name = format!("{}.{}", stem, extension);
    match &options.output_dir {
        Some(dir) => Path::new(dir).join(file_name),
        None => input_path.with_file_name(file_name),
    }
}

/// Export decoded navigation records to CSV, one row per record
#[cfg(feature = "csv")]
pub fn export_track_csv(records: &[NavigationRecord], output_path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record([
        "talker_id",
        "latitude",
        "lat_hemisphere",
        "longitude",
        "lon_hemisphere",
        "ground_speed",
        "track_true",
        "altitude_feet",
    ])?;
    for record in records {
        writer.write_record([
            record.talker_id.as_str(),
            record.latitude.as_str(),
            record.lat_hemisphere.as_str(),
            record.longitude.as_str(),
            record.lon_hemisphere.as_str(),
            record.ground_speed.as_str(),
            record.track_true.as_str(),
            record.altitude_feet.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Export recorded movement notices as a JSON array
#[cfg(feature = "json")]
pub fn export_notices_json(
    entries: &[crate::types::NoticeEntry],
    output_path: &Path,
) -> Result<()> {
    let file = std::fs::File::create(output_path)?;
    serde_json::to_writer_pretty(file, entries)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_export_path_beside_input() {
        let options = ExportOptions::default();
        let path = compute_export_path(Path::new("/data/feed.bin"), "track.csv", &options);
        assert_eq!(path, Path::new("/data/feed.track.csv"));
    }

    #[test]
    fn test_compute_export_path_with_output_dir() {
        let options = ExportOptions {
            output_dir: Some("/tmp/out".to_string()),
            ..ExportOptions::default()
        };
        let path = compute_export_path(Path::new("/data/feed.bin"), "track.csv", &options);
        assert_eq!(path, Path::new("/tmp/out/feed.track.csv"));
    }
}
