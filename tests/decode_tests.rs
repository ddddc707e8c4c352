use gps_rx_parser::{
    AccumulatorConfig, CancelFlag, FeedDecoder, FrameAccumulator, GpsRxError, MovementState,
    ReplaySource,
};
use std::time::Duration;

/// End-to-end decode tests feeding synthetic byte streams through the
/// replay source, the way a serial link would deliver them.

const RMC: &str = "$GPRMC,110645,A,4807.038,N,01131.000,E,22.4,084.4,230394,003.1,W*6A\r\n";
const GGA: &str = "$GPGGA,110645,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";

fn test_config() -> AccumulatorConfig {
    AccumulatorConfig {
        retry_delay: Duration::from_millis(0),
        ..AccumulatorConfig::default()
    }
}

fn decode_one(stream: &[u8]) -> (FeedDecoder, gps_rx_parser::CycleOutcome) {
    let mut source = ReplaySource::from_bytes(stream, 152);
    let mut decoder = FeedDecoder::with_config(test_config(), false);
    let cancel = CancelFlag::new();
    let outcome = decoder.run_cycle(&mut source, &cancel).expect("one cycle");
    (decoder, outcome)
}

#[test]
fn test_round_trip_synthetic_stream() {
    let stream = "$GPRMC,A,,B,C,D,E,5.0,F,G,H,I*0\r\n$GPGGA,A,B,C,D,E,1,2,3,100.0,M,4,M,5,6*0\r\n";
    let (decoder, outcome) = decode_one(stream.as_bytes());

    assert!(outcome.decoded);
    let record = decoder.record();
    assert_eq!(record.ground_speed, "5.0");
    // 100 m converts to 328 ft, rounded
    assert_eq!(record.altitude_feet, "328");
    assert_eq!(record.latitude, "B");
    assert_eq!(record.lat_hemisphere, "C");
    assert_eq!(record.longitude, "D");
    assert_eq!(record.lon_hemisphere, "E");
    assert_eq!(record.track_true, "F");
    assert_eq!(record.talker_id, "$GPRMC");
    // 5 knots is taxying speed
    assert_eq!(outcome.state, MovementState::Taxying);
}

#[test]
fn test_sentences_decode_in_either_order() {
    let (decoder, outcome) = decode_one(format!("{GGA}{RMC}").as_bytes());
    assert!(outcome.decoded);
    assert_eq!(decoder.record().ground_speed, "22.4");
    assert_eq!(decoder.record().altitude_feet, "1789");
}

#[test]
fn test_pair_split_across_reads() {
    let stream = format!("{RMC}{GGA}");
    let (first, second) = stream.as_bytes().split_at(stream.len() - 20);
    let mut source = ReplaySource::from_chunks([first.to_vec(), second.to_vec()]);
    let mut decoder = FeedDecoder::with_config(test_config(), false);
    let cancel = CancelFlag::new();

    let outcome = decoder.run_cycle(&mut source, &cancel).expect("one cycle");
    assert!(outcome.decoded);
    assert_eq!(decoder.record().ground_speed, "22.4");
    assert_eq!(decoder.stats().frames_decoded, 1);
}

#[test]
fn test_gga_only_commits_altitude_with_default_fields() {
    // RMC present but short a few fields; GGA intact.
    let bad_rmc = "$GPRMC,110645,A,4807.038,N,01131.000,E,22.4*6A\r\n";
    let (decoder, outcome) = decode_one(format!("{bad_rmc}{GGA}").as_bytes());

    assert!(outcome.decoded);
    let record = decoder.record();
    assert_eq!(record.altitude_feet, "1789");
    assert!(record.talker_id.is_empty());
    assert!(record.ground_speed.is_empty());
    assert_eq!(decoder.stats().gga_valid, 1);
    assert_eq!(decoder.stats().rmc_valid, 0);
}

#[test]
fn test_unusable_frame_leaves_previous_record_untouched() {
    // Frame 1 decodes; frame 2 completes accumulation but carries four
    // line endings, which the split table rejects.
    let good = format!("{RMC}{GGA}");
    let junk = format!("a\r\nb\r\n{RMC}{GGA}");
    let mut source = ReplaySource::from_chunks([good.into_bytes(), junk.into_bytes()]);
    let mut decoder = FeedDecoder::with_config(test_config(), false);
    let cancel = CancelFlag::new();

    let first = decoder.run_cycle(&mut source, &cancel).expect("cycle 1");
    assert!(first.decoded);
    let second = decoder.run_cycle(&mut source, &cancel).expect("cycle 2");
    assert!(!second.decoded);

    // Stale-but-valid beats partially overwritten.
    assert_eq!(decoder.record().ground_speed, "22.4");
    assert_eq!(decoder.stats().frames_decoded, 1);
    assert_eq!(decoder.stats().frames_discarded, 1);
}

#[test]
fn test_accumulator_holds_frame_while_rmc_marker_near_tail() {
    let mut acc = FrameAccumulator::with_config(test_config(), false);
    let pad = "x".repeat(3 * (RMC.len() + GGA.len()));

    assert!(acc.push(GGA.as_bytes()).unwrap().is_none());
    assert!(acc.push(pad.as_bytes()).unwrap().is_none());
    // Everything needed is buffered, but the RMC marker sits past 75% of
    // the bytes so far: no frame yet.
    assert!(acc.push(RMC.as_bytes()).unwrap().is_none());

    // Trailing bytes shift the marker under the threshold.
    let trailer = format!("{}*00\r\n", "y".repeat(2 * pad.len()));
    assert!(acc.push(trailer.as_bytes()).unwrap().is_some());
}

#[test]
fn test_null_byte_reads_are_counted_not_fatal() {
    let stream = format!("{RMC}{GGA}");
    let mut source = ReplaySource::from_chunks([vec![0u8], vec![0u8], stream.into_bytes()]);
    let mut decoder = FeedDecoder::with_config(test_config(), false);
    let cancel = CancelFlag::new();

    let outcome = decoder.run_cycle(&mut source, &cancel).expect("one cycle");
    assert!(outcome.decoded);
    assert_eq!(decoder.stats().null_reads, 2);
}

#[test]
fn test_source_closed_propagates() {
    let mut source = ReplaySource::from_chunks(Vec::<Vec<u8>>::new());
    let mut decoder = FeedDecoder::with_config(test_config(), false);
    let cancel = CancelFlag::new();
    assert!(matches!(
        decoder.run_cycle(&mut source, &cancel),
        Err(GpsRxError::SourceClosed)
    ));
}

#[test]
fn test_cancellation_observed_between_retries() {
    let stream = format!("{RMC}{GGA}");
    let mut source = ReplaySource::from_bytes(stream.as_bytes(), 152);
    let mut decoder = FeedDecoder::with_config(test_config(), false);
    let cancel = CancelFlag::new();
    cancel.cancel();
    assert!(matches!(
        decoder.run_cycle(&mut source, &cancel),
        Err(GpsRxError::Cancelled)
    ));
}

#[test]
fn test_take_record_clears_for_next_display() {
    let (mut decoder, outcome) = decode_one(format!("{RMC}{GGA}").as_bytes());
    assert!(outcome.decoded);
    let record = decoder.take_record();
    assert_eq!(record.ground_speed, "22.4");
    assert!(decoder.record().is_empty());
}

#[cfg(feature = "csv")]
#[test]
fn test_track_csv_export() {
    use gps_rx_parser::export_track_csv;
    use std::fs;

    let (mut decoder, _) = decode_one(format!("{RMC}{GGA}").as_bytes());
    let track = vec![decoder.take_record()];

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("feed.track.csv");
    export_track_csv(&track, &path).expect("export");

    let content = fs::read_to_string(&path).expect("read csv");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "talker_id,latitude,lat_hemisphere,longitude,lon_hemisphere,ground_speed,track_true,altitude_feet"
    );
    assert!(lines[1].contains("22.4"));
    assert!(lines[1].contains("1789"));
}
