use thiserror::Error;

use crate::{
    riff::chunks::ChunkID,
    wav::{AudioFormat, sample_domain::SampleKind},
};

#[derive(Debug, Clone, Error)]
pub enum WavError {
    #[error("Unsupported audio format 0x{0:04X} (expected PCM 0x0001 or IEEE float 0x0003)")]
    UnsupportedAudioFormat(u16),
    #[error("Unsupported bits per channel {bits} for {audio_format} audio")]
    UnsupportedBitsPerChannel { audio_format: AudioFormat, bits: u16 },
    #[error("Required '{0}' chunk not found")]
    MissingChunk(ChunkID),
    #[error("Invalid FMT chunk size: found {0} bytes, need at least 16")]
    InvalidFmtChunkSize(usize),
    #[error("Channel buffers hold {found} samples but the format stores {expected}")]
    SampleTypeMismatch {
        expected: SampleKind,
        found: SampleKind,
    },
    #[error("Channel layout error: {0}")]
    ChannelLayout(String),
    #[error(
        "Unknown coding mode '{0}' (expected raw-blob, raw-buffer, channels-fmt or channels-float32)"
    )]
    UnknownCodingMode(String),
}

impl WavError {
    pub fn channel_layout<S: Into<String>>(message: S) -> Self {
        WavError::ChannelLayout(message.into())
    }
}
