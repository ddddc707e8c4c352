//! Frame acquisition
//!
//! Accumulates raw bytes from the byte source until the buffer holds one
//! complete, decodable pair of sentences. The wire format has no length
//! prefix, so completion is judged heuristically: a `*` near the end of the
//! buffer, both sentence markers present, and the RMC marker not so close to
//! the tail that it is likely still arriving.

use crate::error::{GpsRxError, Result};
use crate::parser::sentence::{GGA_MARKER, RMC_MARKER};
use crate::parser::splitter::find_marker;
use crate::source::{ByteSource, CancelFlag};
use crate::types::RawFrame;
use std::thread;
use std::time::Duration;

/// Tuning constants for frame acquisition.
///
/// The tail window and marker fraction are empirically tuned against the
/// feed's irregular framing; treat them as configuration, not derived values.
#[derive(Debug, Clone)]
pub struct AccumulatorConfig {
    /// Characters inspected at the end of the buffer for the `*` marker
    pub tail_window: usize,
    /// Fraction of the buffer beyond which an RMC marker is judged too
    /// close to the tail to be trustworthy
    pub marker_fraction: f64,
    /// Delay between byte-source polls when nothing is ready
    pub retry_delay: Duration,
    /// Upper bound on buffer growth; exceeding it without a complete
    /// frame discards the buffer
    pub max_frame_len: usize,
    /// Read chunk size per poll, sized like the serial receive buffer
    pub chunk_len: usize,
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self {
            tail_window: 15,
            marker_fraction: 0.75,
            retry_delay: Duration::from_millis(200),
            max_frame_len: 4096,
            chunk_len: 152,
        }
    }
}

/// Accumulates bytes between decode attempts and decides frame completion
pub struct FrameAccumulator {
    buffer: Vec<u8>,
    config: AccumulatorConfig,
    null_reads: u64,
    debug: bool,
}

impl FrameAccumulator {
    pub fn new(debug: bool) -> Self {
        Self::with_config(AccumulatorConfig::default(), debug)
    }

    pub fn with_config(config: AccumulatorConfig, debug: bool) -> Self {
        Self {
            buffer: Vec::new(),
            config,
            null_reads: 0,
            debug,
        }
    }

    pub fn config(&self) -> &AccumulatorConfig {
        &self.config
    }

    /// Bytes currently buffered
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Null-byte reads observed since the session started
    pub fn null_reads(&self) -> u64 {
        self.null_reads
    }

    /// Append newly read bytes. Returns the completed frame once the
    /// buffer holds a decodable sentence pair; the buffer restarts empty.
    pub fn push(&mut self, bytes: &[u8]) -> Result<Option<RawFrame>> {
        self.buffer.extend_from_slice(bytes);
        if self.frame_ready() {
            let frame = self.take_frame();
            if self.debug {
                println!("accumulator: complete frame, {} bytes", frame.len());
            }
            return Ok(Some(frame));
        }
        if self.buffer.len() > self.config.max_frame_len {
            if self.debug {
                println!(
                    "accumulator: discarding {} buffered bytes without a sentence pair",
                    self.buffer.len()
                );
            }
            self.buffer.clear();
            return Err(GpsRxError::FrameOverflow(self.config.max_frame_len));
        }
        Ok(None)
    }

    /// Hand the buffered bytes over as a frame, leaving the buffer empty.
    pub fn take_frame(&mut self) -> RawFrame {
        RawFrame::new(std::mem::take(&mut self.buffer))
    }

    /// Throw away everything buffered so far.
    pub fn discard(&mut self) {
        self.buffer.clear();
    }

    /// Whether the buffer holds one complete, decodable sentence pair.
    fn frame_ready(&self) -> bool {
        // A '*' in the tail means the last sentence probably terminated;
        // the checksum behind it is not verified.
        let tail_start = self.buffer.len().saturating_sub(self.config.tail_window);
        if !self.buffer[tail_start..].contains(&b'*') {
            return false;
        }
        let rmc_at = match find_marker(&self.buffer, RMC_MARKER.as_bytes()) {
            Some(at) => at,
            None => return false,
        };
        if find_marker(&self.buffer, GGA_MARKER.as_bytes()).is_none() {
            return false;
        }
        // An RMC marker in the last quarter of the buffer was likely
        // truncated by the read and will complete on the next poll.
        let threshold = (self.buffer.len() as f64 * self.config.marker_fraction) as usize;
        rmc_at <= threshold
    }

    fn record_null_read(&mut self) {
        self.null_reads += 1;
        if self.null_reads % 1000 == 0 {
            println!("Waiting for serial line to become ready");
        }
    }
}

/// Repeatedly poll the byte source until a complete frame is buffered.
///
/// This is the decode loop's only suspension point: an empty poll sleeps
/// for the configured retry delay and tries again. Cancellation is observed
/// between retries. Source errors are fatal and propagate.
pub fn acquire_frame(
    source: &mut dyn ByteSource,
    accumulator: &mut FrameAccumulator,
    cancel: &CancelFlag,
) -> Result<RawFrame> {
    let mut chunk = vec![0u8; accumulator.config.chunk_len.max(1)];
    loop {
        if cancel.is_cancelled() {
            return Err(GpsRxError::Cancelled);
        }
        let nr_bytes = source.poll(&mut chunk)?;
        if nr_bytes == 0 {
            thread::sleep(accumulator.config.retry_delay);
            continue;
        }
        if nr_bytes == 1 && chunk[0] == 0 {
            // Line not yet ready; the feed idles with null bytes.
            accumulator.record_null_read();
            thread::sleep(accumulator.config.retry_delay);
            continue;
        }
        if let Some(frame) = accumulator.push(&chunk[..nr_bytes])? {
            return Ok(frame);
        }
    }
}
