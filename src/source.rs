//! Byte transport collaborators
//!
//! The decode pipeline reads through the [`ByteSource`] seam. A poll may
//! yield zero bytes without that being an error; only a closed or failed
//! source is fatal. Implementations cover captured-feed replay and, with
//! the `serial` feature, a live serial port.

use crate::error::{GpsRxError, Result};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Inbound byte transport.
pub trait ByteSource {
    /// Read available bytes into `buf`. `Ok(0)` means nothing is ready
    /// yet; errors mean the source is gone and the decode loop must stop.
    fn poll(&mut self, buf: &mut [u8]) -> Result<usize>;
}

/// Cooperative stop request, observed between accumulation retries and
/// after completed decode cycles, never mid-slice.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Replays a captured feed in chunks, the way a serial read would deliver
/// it. Reports the source closed once drained.
pub struct ReplaySource {
    chunks: VecDeque<Vec<u8>>,
}

impl ReplaySource {
    /// Replay explicit chunks, one per poll. Empty chunks replay as
    /// zero-byte polls.
    pub fn from_chunks<I>(chunks: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        Self {
            chunks: chunks.into_iter().collect(),
        }
    }

    /// Replay a byte capture in `chunk_len`-byte reads.
    pub fn from_bytes(data: &[u8], chunk_len: usize) -> Self {
        Self {
            chunks: data
                .chunks(chunk_len.max(1))
                .map(|c| c.to_vec())
                .collect(),
        }
    }

    /// Replay a capture file in `chunk_len`-byte reads.
    pub fn from_file(path: &Path, chunk_len: usize) -> Result<Self> {
        let data = fs::read(path)?;
        Ok(Self::from_bytes(&data, chunk_len))
    }

    /// Chunks not yet delivered
    pub fn remaining(&self) -> usize {
        self.chunks.len()
    }
}

impl ByteSource for ReplaySource {
    fn poll(&mut self, buf: &mut [u8]) -> Result<usize> {
        match self.chunks.pop_front() {
            Some(chunk) => {
                let n = chunk.len().min(buf.len());
                buf[..n].copy_from_slice(&chunk[..n]);
                if n < chunk.len() {
                    // Deliver the remainder on the next poll.
                    self.chunks.push_front(chunk[n..].to_vec());
                }
                Ok(n)
            }
            None => Err(GpsRxError::SourceClosed),
        }
    }
}

/// Live serial-port byte source.
///
/// The read timeout is bounded so a poll never blocks indefinitely; a
/// timed-out read surfaces as a zero-byte poll.
#[cfg(feature = "serial")]
pub struct SerialSource {
    port: Box<dyn serialport::SerialPort>,
}

#[cfg(feature = "serial")]
impl SerialSource {
    pub fn open(port_name: &str, baud_rate: u32) -> Result<Self> {
        let port = serialport::new(port_name, baud_rate)
            .timeout(std::time::Duration::from_millis(200))
            .data_bits(serialport::DataBits::Eight)
            .open()
            .map_err(|e| {
                GpsRxError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("failed to open serial port {}: {}", port_name, e),
                ))
            })?;
        Ok(Self { port })
    }
}

#[cfg(feature = "serial")]
impl ByteSource for SerialSource {
    fn poll(&mut self, buf: &mut [u8]) -> Result<usize> {
        use std::io::Read;
        match self.port.read(buf) {
            Ok(n) => Ok(n),
            Err(ref e) if e.kind() == std::io::ErrorKind::TimedOut => Ok(0),
            Err(e) => Err(GpsRxError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_delivers_chunks_then_closes() {
        let mut source = ReplaySource::from_bytes(b"abcdef", 4);
        let mut buf = [0u8; 16];
        assert_eq!(source.poll(&mut buf).unwrap(), 4);
        assert_eq!(&buf[..4], b"abcd");
        assert_eq!(source.poll(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"ef");
        assert!(matches!(
            source.poll(&mut buf),
            Err(GpsRxError::SourceClosed)
        ));
    }

    #[test]
    fn test_replay_splits_chunks_larger_than_buffer() {
        let mut source = ReplaySource::from_chunks([b"abcdef".to_vec()]);
        let mut buf = [0u8; 4];
        assert_eq!(source.poll(&mut buf).unwrap(), 4);
        assert_eq!(source.poll(&mut buf).unwrap(), 2);
    }

    #[test]
    fn test_replay_empty_chunk_is_a_quiet_poll() {
        let mut source = ReplaySource::from_chunks([Vec::new(), b"ab".to_vec()]);
        let mut buf = [0u8; 4];
        assert_eq!(source.poll(&mut buf).unwrap(), 0);
        assert_eq!(source.poll(&mut buf).unwrap(), 2);
    }

    #[test]
    fn test_cancel_flag_is_shared() {
        let flag = CancelFlag::new();
        let other = flag.clone();
        assert!(!other.is_cancelled());
        flag.cancel();
        assert!(other.is_cancelled());
    }
}
