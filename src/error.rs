use std::fmt;

/// Custom error types for feed decoding
#[derive(Debug)]
pub enum GpsRxError {
    /// I/O errors from the byte source
    Io(std::io::Error),
    /// Byte source reported closed; the decode loop cannot continue
    SourceClosed,
    /// Neither sentence type could be decoded from the frame
    NoUsableSentence,
    /// Accumulation exceeded the configured frame bound without completing
    FrameOverflow(usize),
    /// Cooperative stop requested by the caller
    Cancelled,
    /// Parse errors with context
    Parse(String),
}

impl fmt::Display for GpsRxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpsRxError::Io(err) => write!(f, "I/O error: {}", err),
            GpsRxError::SourceClosed => write!(f, "Byte source closed"),
            GpsRxError::NoUsableSentence => write!(f, "No usable sentence in frame"),
            GpsRxError::FrameOverflow(limit) => {
                write!(f, "Frame exceeded {} bytes without completing", limit)
            }
            GpsRxError::Cancelled => write!(f, "Cancelled by caller"),
            GpsRxError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for GpsRxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpsRxError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GpsRxError {
    fn from(err: std::io::Error) -> Self {
        GpsRxError::Io(err)
    }
}

impl From<anyhow::Error> for GpsRxError {
    fn from(err: anyhow::Error) -> Self {
        GpsRxError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GpsRxError>;
