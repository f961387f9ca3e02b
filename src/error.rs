#[cfg(feature = "wav")]
use crate::wav::error::WavError;

use core::fmt::{Display, Formatter, Result as FmtResult};
use std::io;
use thiserror::Error;

use crate::riff::chunks::ChunkID;

/// Result type for riff_wave_io operations
#[allow(clippy::result_large_err)]
pub type RiffResult<T> = Result<T, RiffError>;

/// Error type shared by the container codec and the chunk codecs
#[derive(Debug, Error)]
pub enum RiffError {
    /// File I/O errors (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The container magic did not match
    #[error("RIFF header mismatch at byte {index}: found 0x{found:02X}, expected 0x{expected:02X}")]
    HeaderMismatch { index: usize, found: u8, expected: u8 },

    /// A chunk id, container type or LIST key is not exactly four ASCII characters
    #[error("Invalid tag {0:?}: tags must be exactly 4 ASCII characters")]
    InvalidTag(String),

    /// A read ran past the end of the available bytes
    #[error("Truncated {what} at {position}: needed {needed} bytes, {available} available")]
    Truncated {
        what: String,
        needed: usize,
        available: usize,
        position: ErrorPosition,
    },

    #[error("Corrupted data at {position}: {description} - {details}")]
    /// Data corruption or layout errors
    CorruptedData {
        description: String,
        details: String,
        position: ErrorPosition,
    },

    /// Typed content was handed to the encoder without a registered codec
    #[error("No codec registered for chunk '{0}'")]
    MissingCodec(ChunkID),

    /// A codec was asked to encode a chunk of a different kind
    #[error("Codec for '{codec}' cannot encode chunk '{found}'")]
    CodecMismatch { codec: ChunkID, found: ChunkID },

    #[cfg(feature = "wav")]
    #[error("Wav error: {0}")]
    WavError(#[from] WavError),
}

/// Position information for errors that occur during parsing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorPosition {
    /// Byte offset in the buffer where the error occurred
    pub offset: usize,
    /// Human-readable description of the position
    pub description: String,
}

impl ErrorPosition {
    /// Create a new error position at the given byte offset
    pub fn new(offset: usize) -> Self {
        Self {
            offset,
            description: format!("byte offset {}", offset),
        }
    }

    /// Set a custom description for the error position
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = format!("{} (byte offset {})", description.into(), self.offset);
        self
    }
}

impl Display for ErrorPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.description)
    }
}

impl RiffError {
    /// Create a CorruptedData error with position information
    pub fn corrupted_data(
        description: impl Into<String>,
        details: impl Into<String>,
        position: ErrorPosition,
    ) -> Self {
        RiffError::CorruptedData {
            description: description.into(),
            details: details.into(),
            position,
        }
    }

    /// Create a CorruptedData error without position information (uses default position)
    pub fn corrupted_data_simple(
        description: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        RiffError::CorruptedData {
            description: description.into(),
            details: details.into(),
            position: ErrorPosition::default(),
        }
    }

    pub fn truncated(
        what: impl Into<String>,
        needed: usize,
        available: usize,
        position: ErrorPosition,
    ) -> Self {
        RiffError::Truncated {
            what: what.into(),
            needed,
            available,
            position,
        }
    }

    pub fn invalid_tag(tag: impl Into<String>) -> Self {
        RiffError::InvalidTag(tag.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_mismatch_names_index_and_bytes() {
        let err = RiffError::HeaderMismatch {
            index: 2,
            found: b'X',
            expected: b'F',
        };
        let msg = err.to_string();
        assert!(msg.contains("byte 2"));
        assert!(msg.contains("0x58"));
        assert!(msg.contains("0x46"));
    }

    #[test]
    fn test_error_position_description() {
        let pos = ErrorPosition::new(12).with_description("chunk header");
        assert_eq!(pos.offset, 12);
        assert_eq!(pos.to_string(), "chunk header (byte offset 12)");
    }
}
