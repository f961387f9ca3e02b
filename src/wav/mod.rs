//! WAVE specialization of the RIFF codec: the `fmt `, `LIST` and `data` chunk codecs,
//! the sample domain table and the coding-mode conversions built on top of them.

pub mod coding;
pub mod data;
pub mod error;
pub mod fmt;
pub mod list;
pub mod sample_domain;
pub mod track_info;
pub mod wav_file;

use core::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::LazyLock;

pub use coding::{AudioPayload, CodingMode, NativeChannels};
pub use data::{DataChunk, DataCodec};
pub use fmt::{FormatChunk, FormatCodec};
pub use list::{ListChunk, ListCodec};
pub use sample_domain::{SampleDomain, SampleKind};
pub use track_info::TrackInfo;
pub use wav_file::{WavFile, decode_wav, decode_wav_with_options, encode_wav, encode_wav_with_options};

use crate::{
    riff::{
        chunks::{ChunkID, DATA_CHUNK, FMT_CHUNK, LIST_CHUNK},
        registry::ChunkRegistry,
    },
    traits::RiffChunk,
    wav::error::WavError,
};

/// WAV format codes (wFormatTag) this crate can interpret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    /// Integer PCM
    Pcm,
    /// IEEE float
    Float,
}

impl AudioFormat {
    /// Canonical numeric WAV format tag
    pub const fn as_u16(self) -> u16 {
        match self {
            AudioFormat::Pcm => 0x0001,
            AudioFormat::Float => 0x0003,
        }
    }

    /// Short symbolic name
    pub const fn as_str(self) -> &'static str {
        match self {
            AudioFormat::Pcm => "PCM",
            AudioFormat::Float => "IEEE_FLOAT",
        }
    }

    pub const fn is_float(self) -> bool {
        matches!(self, AudioFormat::Float)
    }
}

impl TryFrom<u16> for AudioFormat {
    type Error = WavError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            0x0001 => Ok(AudioFormat::Pcm),
            0x0003 => Ok(AudioFormat::Float),
            other => Err(WavError::UnsupportedAudioFormat(other)),
        }
    }
}

impl From<AudioFormat> for u16 {
    fn from(val: AudioFormat) -> Self {
        val.as_u16()
    }
}

impl Display for AudioFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Every chunk kind the WAVE registry decodes. Chunks with other ids end up in
/// [`RiffFile::unknowns`](crate::riff::RiffFile::unknowns).
#[derive(Debug, Clone, PartialEq)]
pub enum WaveChunk {
    Format(FormatChunk),
    List(ListChunk),
    Data(DataChunk),
}

impl RiffChunk for WaveChunk {
    fn id(&self) -> ChunkID {
        match self {
            WaveChunk::Format(_) => FMT_CHUNK,
            WaveChunk::List(_) => LIST_CHUNK,
            WaveChunk::Data(_) => DATA_CHUNK,
        }
    }
}

impl From<FormatChunk> for WaveChunk {
    fn from(value: FormatChunk) -> Self {
        WaveChunk::Format(value)
    }
}

impl From<ListChunk> for WaveChunk {
    fn from(value: ListChunk) -> Self {
        WaveChunk::List(value)
    }
}

impl From<DataChunk> for WaveChunk {
    fn from(value: DataChunk) -> Self {
        WaveChunk::Data(value)
    }
}

static WAVE_REGISTRY: LazyLock<ChunkRegistry<WaveChunk>> = LazyLock::new(|| {
    ChunkRegistry::new()
        .with(FMT_CHUNK, FormatCodec)
        .with(LIST_CHUNK, ListCodec)
        .with(DATA_CHUNK, DataCodec)
});

/// Shared registry with the `fmt `, `LIST` and `data` codecs
pub fn wave_registry() -> &'static ChunkRegistry<WaveChunk> {
    &WAVE_REGISTRY
}
