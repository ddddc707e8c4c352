//! GPS RX Parser Library
//!
//! A Rust library for decoding interleaved `$GPRMC`/`$GPGGA` sentence pairs
//! arriving as a continuous byte stream over a serial link (for example the
//! FSUIPC "GPS Out" feed of a flight simulator), and for deriving a debounced
//! movement state (stopped / taxying / flying) from the decoded record.
//!
//! # Features
//!
//! - **`csv`** (default): Enable CSV track export functionality
//! - **`cli`** (default): Build the command-line interface binary
//! - **`json`**: Enable movement-notice export in JSON format
//! - **`serde`**: Enable serialization/deserialization of types
//! - **`serial`**: Enable the live serial-port byte source
//!
//! # Quick Start
//!
//! Replay a captured feed and watch the movement state:
//! ```rust,no_run
//! use gps_rx_parser::{CancelFlag, FeedDecoder, ReplaySource};
//!
//! let mut source = ReplaySource::from_file(std::path::Path::new("feed.bin"), 152).unwrap();
//! let mut decoder = FeedDecoder::new(false);
//! let cancel = CancelFlag::new();
//! while let Ok(outcome) = decoder.run_cycle(&mut source, &cancel) {
//!     if let Some(notice) = outcome.notice {
//!         println!("{}", notice.message());
//!     }
//! }
//! ```
//!
//! # Public API
//!
//! ## Decoding
//! - [`FeedDecoder`] - Cooperative decode session (accumulate, split, classify)
//! - [`FrameAccumulator`] / [`acquire_frame`] - Frame acquisition
//! - [`split_frame`] - Sentence splitting and field extraction
//!
//! ## Data Types
//! - [`NavigationRecord`] - The eight decoded navigation fields
//! - [`MovementState`] / [`MovementNotice`] - Movement classification output
//! - [`DecodeStats`] - Per-session reception statistics
//!
//! ## Collaborator Interfaces
//! - [`ByteSource`] - The inbound byte transport seam
//! - [`ReplaySource`] - Chunked in-memory / file replay source
//! - [`CancelFlag`] - Cooperative cancellation
//!
//! ## Display and Export
//! - [`render_record`] - Display-line formatting for a decoded record
//! - [`export_track_csv`] - Export decoded records to CSV

// Module declarations
pub mod classifier;
pub mod conversion;
pub mod decoder;
pub mod display;
pub mod error;
pub mod export;
pub mod parser;
pub mod source;
pub mod types;

// Re-export everything from modules for convenience
#[allow(ambiguous_glob_reexports)]
pub use classifier::*;
#[allow(ambiguous_glob_reexports)]
pub use conversion::*;
#[allow(ambiguous_glob_reexports)]
pub use decoder::*;
#[allow(ambiguous_glob_reexports)]
pub use display::*;
#[allow(ambiguous_glob_reexports)]
pub use error::*;
#[allow(ambiguous_glob_reexports)]
pub use export::*;
#[allow(ambiguous_glob_reexports)]
pub use parser::*;
#[allow(ambiguous_glob_reexports)]
pub use source::*;
#[allow(ambiguous_glob_reexports)]
pub use types::*;

// Re-export Result type for convenience
pub use anyhow::Result;
