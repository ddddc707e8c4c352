use anyhow::Result;
use clap::{Arg, Command};
use glob::glob;
use gps_rx_parser::{
    render_record, AccumulatorConfig, CancelFlag, ExportOptions, FeedDecoder, GpsRxError,
    MovementState, NavigationRecord, NoticeEntry, ReplaySource,
};
use std::path::PathBuf;
use std::time::Duration;

fn build_command() -> Command {
    let cmd = Command::new("GPS RX Parser")
        .version(env!("CARGO_PKG_VERSION"))
        .about(
            "Decode interleaved GPRMC/GPGGA feed captures into navigation records \
             and movement states. Prints decoded records while flying and movement \
             notices as they fire.",
        )
        .arg(
            Arg::new("files")
                .help("Feed capture files to replay, in serial-read-sized chunks. Supports globbing.")
                .required(false)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and detailed parsing information")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .help("Export decoded records to a CSV track file")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("events")
                .long("events")
                .help("Export movement notices to a JSON file (requires the json feature)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for output files (default: same as input file)")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("chunk")
                .long("chunk")
                .help("Replay read size in bytes, matching the serial receive buffer")
                .value_name("BYTES")
                .default_value("152"),
        );

    #[cfg(feature = "serial")]
    let cmd = cmd
        .arg(
            Arg::new("port")
                .long("port")
                .help("Read from a live serial port instead of replay files")
                .value_name("NAME"),
        )
        .arg(
            Arg::new("baud")
                .long("baud")
                .help("Baud rate for the live serial port")
                .value_name("RATE")
                .default_value("4800"),
        );

    cmd
}

/// Expand input patterns to concrete file paths, keeping the order given.
/// Unmatched patterns and unreadable paths warn and are skipped.
fn expand_input_paths(patterns: &[String]) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for pattern in patterns {
        if pattern.contains('*') || pattern.contains('?') {
            match glob(pattern) {
                Ok(matches) => {
                    let mut matched_any = false;
                    for entry in matches.flatten() {
                        matched_any = true;
                        paths.push(entry);
                    }
                    if !matched_any {
                        eprintln!("Warning: pattern matched no files: {pattern}");
                    }
                }
                Err(e) => eprintln!("Warning: invalid glob pattern '{pattern}': {e}"),
            }
            continue;
        }
        let path = PathBuf::from(pattern);
        if path.is_file() {
            paths.push(path);
        } else {
            eprintln!("Warning: file not found: {pattern}");
        }
    }
    paths
}

/// Drive the decoder until the source closes or is cancelled. Returns the
/// decoded track and the notices that fired.
fn run_feed(
    source: &mut dyn gps_rx_parser::ByteSource,
    decoder: &mut FeedDecoder,
    cancel: &CancelFlag,
) -> Result<(Vec<NavigationRecord>, Vec<NoticeEntry>)> {
    let mut track = Vec::new();
    let mut notices = Vec::new();
    loop {
        match decoder.run_cycle(source, cancel) {
            Ok(outcome) => {
                if let Some(notice) = outcome.notice {
                    println!("{}", notice.message());
                    notices.push(NoticeEntry::new(decoder.stats().cycles, notice));
                }
                if outcome.decoded && outcome.state == MovementState::Flying {
                    let record = decoder.take_record();
                    for line in render_record(&record) {
                        println!("{line}");
                    }
                    track.push(record);
                }
            }
            Err(GpsRxError::SourceClosed) | Err(GpsRxError::Cancelled) => break,
            Err(e) => return Err(e.into()),
        }
    }
    Ok((track, notices))
}

fn print_summary(decoder: &FeedDecoder) {
    let stats = decoder.stats();
    println!("........................");
    println!("Cycles      {:6}", stats.cycles);
    println!("Decoded     {:6}", stats.frames_decoded);
    println!("Discarded   {:6}", stats.frames_discarded);
    println!("RMC valid   {:6}", stats.rmc_valid);
    println!("GGA valid   {:6}", stats.gga_valid);
    println!("Bytes       {:6}", stats.bytes_received);
    println!("Mean wait   {:6} ms", stats.mean_acquire_wait_ms());
}

fn export_outputs(
    input_path: &std::path::Path,
    track: &[NavigationRecord],
    notices: &[NoticeEntry],
    options: &ExportOptions,
) -> Result<()> {
    #[cfg(feature = "csv")]
    if options.csv {
        let path = gps_rx_parser::compute_export_path(input_path, "track.csv", options);
        gps_rx_parser::export_track_csv(track, &path)?;
        println!("Exported track: {}", path.display());
    }
    #[cfg(not(feature = "csv"))]
    if options.csv {
        eprintln!("Warning: built without the csv feature; --csv ignored");
    }

    #[cfg(feature = "json")]
    if options.events {
        let path = gps_rx_parser::compute_export_path(input_path, "events.json", options);
        gps_rx_parser::export_notices_json(notices, &path)?;
        println!("Exported notices: {}", path.display());
    }
    #[cfg(not(feature = "json"))]
    if options.events {
        let _ = notices;
        eprintln!("Warning: built without the json feature; --events ignored");
    }

    Ok(())
}

fn replay_file(
    path: &std::path::Path,
    chunk_len: usize,
    debug: bool,
    options: &ExportOptions,
) -> Result<()> {
    println!("Processing: {}", path.display());
    let mut source = ReplaySource::from_file(path, chunk_len)?;
    let mut decoder = FeedDecoder::with_config(
        AccumulatorConfig {
            // Replay never idles; no point sleeping between polls.
            retry_delay: Duration::from_millis(0),
            chunk_len,
            ..AccumulatorConfig::default()
        },
        debug,
    );
    let cancel = CancelFlag::new();
    let (track, notices) = run_feed(&mut source, &mut decoder, &cancel)?;
    print_summary(&decoder);
    export_outputs(path, &track, &notices, options)?;
    Ok(())
}

#[cfg(feature = "serial")]
fn run_serial(port_name: &str, baud_rate: u32, debug: bool) -> Result<()> {
    println!("Reading from serial port {port_name} at {baud_rate} baud");
    let mut source = gps_rx_parser::SerialSource::open(port_name, baud_rate)?;
    let mut decoder = FeedDecoder::new(debug);
    let cancel = CancelFlag::new();
    let (_track, _notices) = run_feed(&mut source, &mut decoder, &cancel)?;
    print_summary(&decoder);
    Ok(())
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();

    let debug = matches.get_flag("debug");
    let options = ExportOptions {
        csv: matches.get_flag("csv"),
        events: matches.get_flag("events"),
        output_dir: matches.get_one::<String>("output-dir").cloned(),
    };
    let chunk_len = matches
        .get_one::<String>("chunk")
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or_else(|| {
            eprintln!("Warning: invalid --chunk value, using 152");
            152
        });

    #[cfg(feature = "serial")]
    if let Some(port) = matches.get_one::<String>("port") {
        let baud = matches
            .get_one::<String>("baud")
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(4800);
        return run_serial(port, baud, debug);
    }

    let patterns: Vec<String> = match matches.get_many::<String>("files") {
        Some(files) => files.cloned().collect(),
        None => {
            build_command().print_help()?;
            println!();
            return Ok(());
        }
    };

    let paths = expand_input_paths(&patterns);
    if paths.is_empty() {
        eprintln!("Error: no valid input files found.");
        std::process::exit(1);
    }

    let mut processed_files = 0;
    for path in &paths {
        match replay_file(path, chunk_len, debug, &options) {
            Ok(()) => processed_files += 1,
            Err(e) => eprintln!("Error processing {}: {e}", path.display()),
        }
    }

    if debug {
        println!("Processed {processed_files} of {} files", paths.len());
    }
    Ok(())
}
